use std::time::Duration;

use crate::plugins::player::machine::{ActionKey, PlayerCommand, PlayerCtx, PlayerState, StateId};

use super::{grounded_action, steer};

/// Running along the ground.
pub struct Move;

impl PlayerState for Move {
    fn id(&self) -> StateId {
        StateId::Move
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx) -> Option<StateId> {
        ctx.emit(PlayerCommand::Animate("run"));
        steer(ctx);
        None
    }

    fn on_update(&mut self, ctx: &mut PlayerCtx, _dt: Duration) -> Option<StateId> {
        if ctx.is_falling() {
            return Some(StateId::Jump);
        }
        if !steer(ctx) {
            return Some(StateId::Idle);
        }
        None
    }

    fn handle_input(&mut self, ctx: &mut PlayerCtx, key: ActionKey) -> Option<StateId> {
        match key {
            ActionKey::Left | ActionKey::Right => None,
            _ => grounded_action(ctx, key),
        }
    }
}
