//! Per-monster walker brain, health and death lifecycle.
//!
//! ```text
//!            wall contact              window over
//!  Walking ───────────────► Turning ───────────────► Walking
//!     ▲                                               │
//!     │ stun over                     take_damage     │
//!     └──────────── TakingDamage ◄────────────────────┘
//!                        │ health hits 0 (from any live state)
//!                        ▼
//!                      Dead (fade, then despawn)
//! ```

use std::time::Duration;

use bevy::prelude::*;

use crate::common::facing::Facing;
use crate::common::tunables::MonsterTunables;

use super::kinds::{EnemyKind, EnemyStats};

#[derive(Debug, Clone)]
pub enum MonsterState {
    Walking,
    Turning(Timer),
    TakingDamage(Timer),
    Dead(Timer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Dead targets take nothing.
    Ignored,
    Damaged { amount: u32, remaining: u32, turbocharged: bool },
    /// This hit was the killing blow. Reported once per monster.
    Killed { amount: u32, exp_reward: u32, turbocharged: bool },
}

/// What the body should do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterStep {
    /// `None` leaves the current velocity alone (knockback plays out).
    pub velocity_x: Option<f32>,
    pub alpha: f32,
    /// Death fade finished: release the sprite.
    pub despawn: bool,
}

#[derive(Component, Debug, Clone)]
pub struct MonsterAgent {
    kind: EnemyKind,
    stats: EnemyStats,
    health: u32,
    direction: Facing,
    state: MonsterState,
    spawn_fade: Timer,
    walk_speed: f32,
    turn_window: Duration,
    damage_stun: Duration,
    death_fade: Duration,
}

impl MonsterAgent {
    pub fn new(kind: EnemyKind, direction: Facing, t: &MonsterTunables) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            stats,
            health: stats.max_health,
            direction,
            state: MonsterState::Walking,
            spawn_fade: Timer::new(t.spawn_fade, TimerMode::Once),
            walk_speed: t.walk_speed,
            turn_window: t.turn_window,
            damage_stun: t.damage_stun,
            death_fade: t.death_fade,
        }
    }

    #[inline]
    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    #[inline]
    pub fn stats(&self) -> &EnemyStats {
        &self.stats
    }

    #[inline]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> u32 {
        self.stats.max_health
    }

    #[inline]
    pub fn direction(&self) -> Facing {
        self.direction
    }

    #[inline]
    pub fn state(&self) -> &MonsterState {
        &self.state
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self.state, MonsterState::Dead(_))
    }

    /// False while fading in after spawn, and once dead.
    #[inline]
    pub fn is_hitbox_active(&self) -> bool {
        self.spawn_fade.is_finished() && !self.is_dead()
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.stats.max_health.max(1) as f32
    }

    pub fn update(&mut self, dt: Duration) -> MonsterStep {
        if !self.spawn_fade.is_finished() {
            self.spawn_fade.tick(dt);
        }
        let walk = self.direction.sign() * self.walk_speed;
        let alpha = self.spawn_fade.fraction();

        match &mut self.state {
            MonsterState::Walking => MonsterStep { velocity_x: Some(walk), alpha, despawn: false },
            MonsterState::Turning(window) => {
                window.tick(dt);
                if window.is_finished() {
                    self.state = MonsterState::Walking;
                    return MonsterStep { velocity_x: Some(walk), alpha, despawn: false };
                }
                MonsterStep { velocity_x: Some(0.0), alpha, despawn: false }
            }
            MonsterState::TakingDamage(stun) => {
                stun.tick(dt);
                if stun.is_finished() {
                    self.state = MonsterState::Walking;
                }
                MonsterStep { velocity_x: None, alpha, despawn: false }
            }
            MonsterState::Dead(fade) => {
                fade.tick(dt);
                MonsterStep {
                    velocity_x: Some(0.0),
                    alpha: fade.fraction_remaining(),
                    despawn: fade.is_finished(),
                }
            }
        }
    }

    /// Wall or world-edge contact. Reverses once, then ignores contacts
    /// until the turning window is over. Returns whether it turned.
    pub fn on_obstacle(&mut self) -> bool {
        if !matches!(self.state, MonsterState::Walking) {
            return false;
        }
        self.direction = self.direction.reversed();
        self.state = MonsterState::Turning(Timer::new(self.turn_window, TimerMode::Once));
        true
    }

    /// Contact with an obstacle on `side`. Only one ahead of the walk
    /// direction turns the agent.
    pub fn on_obstacle_ahead(&mut self, side: Facing) -> bool {
        side == self.direction && self.on_obstacle()
    }

    pub fn take_damage(&mut self, amount: u32, turbocharged: bool) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.state = MonsterState::Dead(Timer::new(self.death_fade, TimerMode::Once));
            return DamageOutcome::Killed {
                amount,
                exp_reward: self.stats.exp_reward,
                turbocharged,
            };
        }

        self.state = MonsterState::TakingDamage(Timer::new(self.damage_stun, TimerMode::Once));
        DamageOutcome::Damaged { amount, remaining: self.health, turbocharged }
    }
}
