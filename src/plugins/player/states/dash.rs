use std::f32::consts::PI;
use std::time::Duration;

use bevy::prelude::*;

use crate::common::facing::Facing;
use crate::plugins::combat::{Swing, SwingKind};
use crate::plugins::player::machine::{PlayerCommand, PlayerCtx, PlayerState, StateId};
use crate::plugins::world::TileQuery;

const DASH_TINT: Color = Color::srgb(0.45, 0.6, 1.0);

#[inline]
pub fn sine_in_out(t: f32) -> f32 {
    -((PI * t.clamp(0.0, 1.0)).cos() - 1.0) * 0.5
}

/// Where a dash from `start` ends.
///
/// Walks one unit at a time ahead of the leading edge. The first solid tile
/// stops the dash flush against it; otherwise the full distance is covered.
/// Either way the body stays inside the world.
pub fn dash_end_x(
    start: Vec2,
    facing: Facing,
    half_width: f32,
    distance: f32,
    world_width: f32,
    terrain: &dyn TileQuery,
) -> f32 {
    let dir = facing.sign();
    let edge = start.x + dir * half_width;

    let mut step = 1.0;
    let mut end = start.x + dir * distance;
    while step <= distance {
        if let Some(tile) = terrain.tile_at(Vec2::new(edge + dir * step, start.y)) {
            end = match facing {
                Facing::Right => tile.left() - half_width,
                Facing::Left => tile.right() + half_width,
            };
            break;
        }
        step += 1.0;
    }

    end.clamp(half_width, (world_width - half_width).max(half_width))
}

#[derive(Debug, Clone, Copy)]
struct DashTween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl DashTween {
    /// Advance and return `(x, finished)`.
    fn advance(&mut self, dt: Duration) -> (f32, bool) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };
        let x = self.from + (self.to - self.from) * sine_in_out(t);
        (x, self.elapsed >= self.duration)
    }
}

/// A short invincible burst along the facing direction, ignoring gravity.
pub struct Dash {
    grace: Duration,
    tween: Option<DashTween>,
    swing: Option<Swing>,
}

impl Dash {
    pub fn new(grace: Duration) -> Self {
        Self { grace, tween: None, swing: None }
    }
}

impl PlayerState for Dash {
    fn id(&self) -> StateId {
        StateId::Dash
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx) -> Option<StateId> {
        if !ctx.skills.dash.register_use() {
            return Some(ctx.settle());
        }

        let t = ctx.tunables;
        let from = ctx.body.position.x;
        let to = dash_end_x(
            ctx.body.position,
            ctx.body.facing,
            t.half_width,
            t.dash_distance,
            ctx.world_width,
            ctx.terrain,
        );
        let duration = Duration::from_secs_f32((to - from).abs() / t.dash_speed.max(1.0));
        self.tween = Some(DashTween { from, to, elapsed: Duration::ZERO, duration });
        self.swing = Some(Swing::new(SwingKind::DashStrike));

        ctx.body.locked = true;
        ctx.body.velocity = Vec2::ZERO;
        ctx.invincibility.lock();
        ctx.emit(PlayerCommand::Tint(Some(DASH_TINT)));
        ctx.emit(PlayerCommand::Animate("dash"));
        ctx.emit(PlayerCommand::Sound("dash"));
        None
    }

    fn on_update(&mut self, ctx: &mut PlayerCtx, dt: Duration) -> Option<StateId> {
        if let Some(swing) = self.swing.as_mut() {
            if swing.tick(dt) {
                self.swing = None;
            }
        }

        ctx.body.velocity = Vec2::ZERO;
        let Some(tween) = self.tween.as_mut() else {
            return Some(ctx.settle());
        };
        let (x, finished) = tween.advance(dt);
        ctx.body.position.x = x;
        finished.then(|| ctx.settle())
    }

    fn on_exit(&mut self, ctx: &mut PlayerCtx) {
        self.swing = None;
        // Refused dashes (no charge) never locked anything.
        if self.tween.take().is_none() {
            return;
        }
        ctx.body.locked = false;
        ctx.invincibility.release_with_grace(self.grace);
        ctx.emit(PlayerCommand::Tint(None));
    }

    fn swing(&self) -> Option<&Swing> {
        self.swing.as_ref()
    }

    fn swing_mut(&mut self) -> Option<&mut Swing> {
        self.swing.as_mut()
    }
}
