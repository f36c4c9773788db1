//! Seeded randomness.
//!
//! Every random decision (damage rolls, spawn kinds, walk directions,
//! power-up offers) draws from this one resource so a seed reproduces a run.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Inclusive range; tolerates `lo > hi` by returning `lo`.
    pub fn roll(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.0.u32(lo..=hi)
    }

    pub fn coin(&mut self) -> bool {
        self.0.bool()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}
