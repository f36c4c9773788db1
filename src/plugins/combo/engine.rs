//! Kill combo counter and turbocharge.
//!
//! Exactly one timer runs at a time: either the combo expiry or the
//! turbocharge duration. Both live in a single enum field, so starting one
//! replaces (and thereby cancels) the other.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::tunables::ComboTunables;

/// Stat multipliers applied to the player. All `1.0` outside turbocharge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurboBoost {
    pub speed: f32,
    pub jump: f32,
    pub damage: f32,
}

impl TurboBoost {
    pub const NONE: Self = Self { speed: 1.0, jump: 1.0, damage: 1.0 };
}

impl Default for TurboBoost {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComboEvent {
    /// Combo went up to this count.
    Counted(u32),
    /// Threshold reached: combo reset and turbocharge running for `duration`.
    TurboStarted { duration: Duration },
    /// Share of turbocharge left, in `[0, 1]`.
    TurboMeter(f32),
    TurboEnded,
    /// No kill before the expiry: combo dropped back to zero.
    Expired,
}

#[derive(Debug, Clone)]
enum ComboTimer {
    Idle,
    Decay(Timer),
    Turbo(Timer),
}

#[derive(Component, Debug, Clone)]
pub struct ComboEngine {
    combo: u32,
    threshold: u32,
    expiry: Duration,
    turbo_duration: Duration,
    boost: TurboBoost,
    timer: ComboTimer,
}

impl ComboEngine {
    pub fn new(t: &ComboTunables) -> Self {
        Self {
            combo: 0,
            threshold: t.turbo_threshold.max(1),
            expiry: t.expiry,
            turbo_duration: t.turbo_duration,
            boost: TurboBoost {
                speed: t.speed_multiplier,
                jump: t.jump_multiplier,
                damage: t.damage_multiplier,
            },
            timer: ComboTimer::Idle,
        }
    }

    #[inline]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[inline]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    #[inline]
    pub fn turbo_duration(&self) -> Duration {
        self.turbo_duration
    }

    #[inline]
    pub fn is_turbocharged(&self) -> bool {
        matches!(self.timer, ComboTimer::Turbo(_))
    }

    /// Multipliers for the current tick.
    pub fn boost(&self) -> TurboBoost {
        if self.is_turbocharged() {
            self.boost
        } else {
            TurboBoost::NONE
        }
    }

    pub fn on_kill(&mut self) -> ComboEvent {
        let next = self.combo + 1;
        if next >= self.threshold {
            self.combo = 0;
            self.timer = ComboTimer::Turbo(Timer::new(self.turbo_duration, TimerMode::Once));
            return ComboEvent::TurboStarted { duration: self.turbo_duration };
        }

        self.combo = next;
        // While turbocharged the combo holds; its expiry starts when turbo ends.
        if !self.is_turbocharged() {
            self.timer = ComboTimer::Decay(Timer::new(self.expiry, TimerMode::Once));
        }
        ComboEvent::Counted(self.combo)
    }

    pub fn tick(&mut self, dt: Duration) -> Option<ComboEvent> {
        match &mut self.timer {
            ComboTimer::Idle => None,
            ComboTimer::Decay(timer) => {
                timer.tick(dt);
                if !timer.is_finished() {
                    return None;
                }
                self.combo = 0;
                self.timer = ComboTimer::Idle;
                Some(ComboEvent::Expired)
            }
            ComboTimer::Turbo(timer) => {
                timer.tick(dt);
                if !timer.is_finished() {
                    return Some(ComboEvent::TurboMeter(timer.fraction_remaining()));
                }
                Some(self.on_turbo_end())
            }
        }
    }

    fn on_turbo_end(&mut self) -> ComboEvent {
        self.timer = if self.combo > 0 {
            ComboTimer::Decay(Timer::new(self.expiry, TimerMode::Once))
        } else {
            ComboTimer::Idle
        };
        ComboEvent::TurboEnded
    }

    /// Lower the combo needed for turbocharge, never below one.
    pub fn lower_threshold(&mut self, by: u32) {
        self.threshold = self.threshold.saturating_sub(by).max(1);
        self.combo = self.combo.min(self.threshold - 1);
    }

    /// Lengthen future turbocharges; a running one keeps its length.
    pub fn extend_turbo_duration(&mut self, by: Duration) {
        self.turbo_duration += by;
    }
}
