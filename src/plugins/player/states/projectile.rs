use std::time::Duration;

use crate::plugins::player::machine::{PlayerCommand, PlayerCtx, PlayerState, StateId};

/// Instant state: throw if allowed, then hand straight back.
pub struct Projectile;

impl PlayerState for Projectile {
    fn id(&self) -> StateId {
        StateId::Projectile
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx) -> Option<StateId> {
        let allowed = ctx.turbocharged || ctx.skills.projectile.register_use();
        if allowed {
            ctx.emit(PlayerCommand::Sound("throw"));
            ctx.emit(PlayerCommand::ThrowProjectile {
                origin: ctx.body.position,
                facing: ctx.body.facing,
            });
        }
        Some(ctx.settle())
    }

    fn on_update(&mut self, ctx: &mut PlayerCtx, _dt: Duration) -> Option<StateId> {
        Some(ctx.settle())
    }
}
