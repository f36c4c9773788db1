//! Player health and invincibility windows.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PlayerHealth {
    current: u32,
    max: u32,
}

impl PlayerHealth {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.current);
        self.current -= applied;
        applied
    }

    pub fn restore(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Raise the cap and heal by the same amount.
    pub fn increase_max(&mut self, by: u32) {
        self.max += by;
        self.restore(by);
    }
}

/// Damage immunity. Either held open (`lock`, while dashing) or running
/// down a timed window.
#[derive(Component, Debug, Clone, Default)]
pub struct Invincibility {
    locked: bool,
    window: Option<Timer>,
}

impl Invincibility {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.locked || self.window.is_some()
    }

    /// Start (or replace) a timed window.
    pub fn grant(&mut self, duration: Duration) {
        self.window = Some(Timer::new(duration, TimerMode::Once));
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// End a lock and keep a short grace window after it.
    pub fn release_with_grace(&mut self, grace: Duration) {
        self.locked = false;
        self.grant(grace);
    }

    pub fn tick(&mut self, dt: Duration) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        window.tick(dt);
        if window.is_finished() {
            self.window = None;
        }
    }
}
