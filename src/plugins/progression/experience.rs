//! Experience points and levels.

use bevy::prelude::*;

/// Experience needed to leave level 1.
pub const FIRST_LEVEL_EXP: u32 = 20;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experience {
    level: u32,
    current: u32,
    to_next: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

impl Experience {
    pub fn new() -> Self {
        Self { level: 1, current: 0, to_next: FIRST_LEVEL_EXP }
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn to_next(&self) -> u32 {
        self.to_next
    }

    /// Add experience and return how many levels it bought. Overflow
    /// carries into the next level; each level costs 1.5x the previous one.
    pub fn gain(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_add(amount);
        let mut levels = 0;
        while self.current >= self.to_next {
            self.current -= self.to_next;
            self.level += 1;
            self.to_next = (self.to_next * 3).div_ceil(2);
            levels += 1;
        }
        levels
    }
}
