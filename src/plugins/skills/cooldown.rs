//! Charge-based cooldowns for repeatable skills.
//!
//! A skill holds up to `max_uses` charges. Spending one starts a recharge
//! timer (if it was full); every elapsed `cooldown` gives one charge back
//! until the skill is full again.

use std::time::Duration;

use bevy::prelude::*;

use super::Skill;

/// What a tick wants the skill icon to show.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CooldownReport {
    /// Share of the current recharge still to go, in `[0, 1]`.
    /// `Some(0.0)` is sent on the tick the skill becomes full.
    pub overlay: Option<f32>,
    /// Charges to print on the icon; only for multi-charge skills.
    pub badge: Option<u32>,
    pub recharged: u32,
}

#[derive(Debug, Clone)]
pub struct CooldownResource {
    skill: Skill,
    uses_left: u32,
    max_uses: u32,
    timer: Timer,
}

impl CooldownResource {
    pub fn new(skill: Skill, cooldown: Duration) -> Self {
        Self {
            skill,
            uses_left: 1,
            max_uses: 1,
            timer: Timer::new(cooldown, TimerMode::Repeating),
        }
    }

    /// Start full with `max_uses` charges (at least one).
    pub fn with_max_uses(mut self, max_uses: u32) -> Self {
        self.max_uses = max_uses.max(1);
        self.uses_left = self.max_uses;
        self
    }

    #[inline]
    pub fn skill(&self) -> Skill {
        self.skill
    }

    #[inline]
    pub fn uses_left(&self) -> u32 {
        self.uses_left
    }

    #[inline]
    pub fn max_uses(&self) -> u32 {
        self.max_uses
    }

    #[inline]
    pub fn cooldown(&self) -> Duration {
        self.timer.duration()
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.uses_left > 0
    }

    #[inline]
    pub fn is_recharging(&self) -> bool {
        self.uses_left < self.max_uses
    }

    /// Spend one charge. Returns `false` (and changes nothing) when empty.
    pub fn register_use(&mut self) -> bool {
        if self.uses_left == 0 {
            return false;
        }
        if self.uses_left == self.max_uses {
            self.timer.reset();
        }
        self.uses_left -= 1;
        true
    }

    /// Advance the recharge timer.
    pub fn update(&mut self, dt: Duration) -> CooldownReport {
        if !self.is_recharging() {
            return CooldownReport::default();
        }

        self.timer.tick(dt);
        let missing = self.max_uses - self.uses_left;
        let recharged = self.timer.times_finished_this_tick().min(missing);
        self.uses_left += recharged;

        let overlay = if self.is_recharging() {
            self.timer.fraction_remaining()
        } else {
            // Full again: the next spend starts a fresh period.
            self.timer.reset();
            0.0
        };

        CooldownReport {
            overlay: Some(overlay),
            badge: (self.max_uses > 1).then_some(self.uses_left),
            recharged,
        }
    }

    /// Raise the ceiling. The new charges still have to recharge.
    pub fn increase_max_uses(&mut self, n: u32) {
        if !self.is_recharging() {
            self.timer.reset();
        }
        self.max_uses += n;
    }
}
