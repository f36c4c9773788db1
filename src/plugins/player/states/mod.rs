//! The six player states.

mod attack;
mod dash;
mod idle;
mod jump;
mod movement;
mod projectile;

pub use attack::{Attack, AttackSequence, SequenceStep};
pub use dash::{Dash, dash_end_x, sine_in_out};
pub use idle::Idle;
pub use jump::Jump;
pub use movement::Move;
pub use projectile::Projectile;

use super::machine::{ActionKey, PlayerCtx, StateId};

/// Actions available whenever the player is standing (Idle and Move).
/// Skill-gated actions are refused here when out of charges.
pub(crate) fn grounded_action(ctx: &PlayerCtx, key: ActionKey) -> Option<StateId> {
    match key {
        ActionKey::Jump => Some(StateId::Jump),
        ActionKey::Dash => ctx.can_dash().then_some(StateId::Dash),
        ActionKey::Attack => Some(StateId::Attack),
        ActionKey::Projectile => ctx.can_throw().then_some(StateId::Projectile),
        ActionKey::Left | ActionKey::Right => Some(StateId::Move),
    }
}

/// Apply held horizontal input: face it and run at boosted speed.
pub(crate) fn steer(ctx: &mut PlayerCtx) -> bool {
    match crate::common::facing::Facing::from_axis(ctx.axis) {
        Some(facing) => {
            ctx.body.facing = facing;
            ctx.body.velocity.x = facing.sign() * ctx.tunables.speed * ctx.boost.speed;
            true
        }
        None => {
            ctx.body.velocity.x = 0.0;
            false
        }
    }
}
