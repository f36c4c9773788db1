use std::time::Duration;

use crate::plugins::player::machine::{ActionKey, PlayerCommand, PlayerCtx, PlayerState, StateId};

use super::grounded_action;

/// Standing still.
pub struct Idle;

impl PlayerState for Idle {
    fn id(&self) -> StateId {
        StateId::Idle
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx) -> Option<StateId> {
        ctx.body.velocity.x = 0.0;
        ctx.emit(PlayerCommand::StopAnimation);
        None
    }

    fn on_update(&mut self, ctx: &mut PlayerCtx, _dt: Duration) -> Option<StateId> {
        ctx.body.velocity.x = 0.0;
        if ctx.is_falling() {
            return Some(StateId::Jump);
        }
        (ctx.axis != 0.0).then_some(StateId::Move)
    }

    fn handle_input(&mut self, ctx: &mut PlayerCtx, key: ActionKey) -> Option<StateId> {
        grounded_action(ctx, key)
    }
}
