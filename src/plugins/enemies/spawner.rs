//! Periodic monster spawning with a live cap.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Component, Debug, Clone)]
pub struct MonsterSpawner {
    timer: Timer,
    cap: usize,
    live: Vec<Entity>,
}

impl MonsterSpawner {
    pub fn new(period: Duration, cap: usize) -> Self {
        Self {
            timer: Timer::new(period, TimerMode::Repeating),
            cap,
            live: Vec::new(),
        }
    }

    /// True on ticks where a spawn attempt is due.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.timer.tick(dt);
        self.timer.times_finished_this_tick() > 0
    }

    /// Forget monsters that died or were despawned.
    pub fn purge(&mut self, mut is_alive: impl FnMut(Entity) -> bool) {
        self.live.retain(|&e| is_alive(e));
    }

    #[inline]
    pub fn has_room(&self) -> bool {
        self.live.len() < self.cap
    }

    #[inline]
    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    pub fn track(&mut self, monster: Entity) {
        self.live.push(monster);
    }
}
