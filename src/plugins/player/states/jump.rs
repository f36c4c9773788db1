use std::time::Duration;

use bevy::prelude::*;

use crate::plugins::player::machine::{ActionKey, PlayerCommand, PlayerCtx, PlayerState, StateId};

use super::steer;

/// Airborne: rising from a jump, or falling.
///
/// A jump press in the air spends a double-jump charge if one is ready;
/// otherwise it is remembered for a short window and fires on landing.
pub struct Jump {
    buffer_window: Duration,
    buffered: Option<Timer>,
    falling: bool,
}

impl Jump {
    pub fn new(buffer_window: Duration) -> Self {
        Self { buffer_window, buffered: None, falling: false }
    }

    fn launch(ctx: &mut PlayerCtx) {
        ctx.body.velocity.y = ctx.tunables.jump_velocity * ctx.boost.jump;
    }
}

impl PlayerState for Jump {
    fn id(&self) -> StateId {
        StateId::Jump
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx) -> Option<StateId> {
        self.buffered = None;
        self.falling = false;
        if ctx.grounded {
            Self::launch(ctx);
            ctx.emit(PlayerCommand::Sound("jump"));
        }
        ctx.emit(PlayerCommand::Animate("jump"));
        None
    }

    fn on_update(&mut self, ctx: &mut PlayerCtx, dt: Duration) -> Option<StateId> {
        if let Some(timer) = self.buffered.as_mut() {
            timer.tick(dt);
            if timer.is_finished() {
                self.buffered = None;
            }
        }

        if ctx.grounded && ctx.body.velocity.y <= 0.0 {
            if self.buffered.take().is_some() {
                Self::launch(ctx);
                self.falling = false;
                ctx.emit(PlayerCommand::Sound("jump"));
                ctx.emit(PlayerCommand::Animate("jump"));
                return None;
            }
            let running = ctx.body.velocity.x.abs() > f32::EPSILON;
            return Some(if running { StateId::Move } else { StateId::Idle });
        }

        steer(ctx);

        let falling = ctx.body.velocity.y < 0.0;
        if falling {
            ctx.body.velocity.y -= ctx.tunables.fall_acceleration * dt.as_secs_f32();
            ctx.body.velocity.y = ctx.body.velocity.y.max(-ctx.tunables.max_fall_speed);
        }
        if falling != self.falling {
            self.falling = falling;
            ctx.emit(PlayerCommand::Animate(if falling { "fall" } else { "jump" }));
        }
        None
    }

    fn on_exit(&mut self, _ctx: &mut PlayerCtx) {
        self.buffered = None;
    }

    fn handle_input(&mut self, ctx: &mut PlayerCtx, key: ActionKey) -> Option<StateId> {
        match key {
            ActionKey::Jump => {
                if !ctx.grounded && ctx.skills.jump.register_use() {
                    Self::launch(ctx);
                    self.falling = false;
                    ctx.emit(PlayerCommand::Sound("double-jump"));
                    ctx.emit(PlayerCommand::Animate("double-jump"));
                } else {
                    self.buffered = Some(Timer::new(self.buffer_window, TimerMode::Once));
                }
                None
            }
            ActionKey::Dash => ctx.can_dash().then_some(StateId::Dash),
            ActionKey::Attack => Some(StateId::Attack),
            ActionKey::Projectile => ctx.can_throw().then_some(StateId::Projectile),
            ActionKey::Left | ActionKey::Right => None,
        }
    }
}
