use std::time::Duration;

use bevy::prelude::*;

use crate::common::facing::Facing;
use crate::plugins::combat::{Attacker, HitLedger};

use super::messages::SpawnProjectileRequest;

#[derive(Component, Debug, Clone, Copy)]
pub struct PooledProjectile;

/// A projectile entity known to belong to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileEntity(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

/// What a thrown projectile carries from the moment it left the hand.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub damage: u32,
    pub damage_multiplier: f32,
    pub turbocharged: bool,
    pub facing: Facing,
    pub lifetime: Timer,
    pub ledger: HitLedger,
}

impl Projectile {
    pub fn idle(lifetime: Duration) -> Self {
        Self {
            damage: 0,
            damage_multiplier: 1.0,
            turbocharged: false,
            facing: Facing::Right,
            lifetime: Timer::new(lifetime, TimerMode::Once),
            ledger: HitLedger::default(),
        }
    }

    /// Re-arm for a new throw. The ledger starts empty so every monster can
    /// be hit once again.
    #[inline]
    pub fn reset_for_throw(&mut self, req: &SpawnProjectileRequest) {
        self.damage = req.damage;
        self.damage_multiplier = req.damage_multiplier;
        self.turbocharged = req.turbocharged;
        self.facing = req.facing;
        self.lifetime.reset();
        self.ledger = HitLedger::default();
    }

    pub fn attacker(&self, knockback: Vec2) -> Attacker {
        Attacker {
            base_damage: self.damage,
            damage_multiplier: self.damage_multiplier,
            turbocharged: self.turbocharged,
            facing: self.facing,
            knockback,
        }
    }
}
