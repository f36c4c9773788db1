//! Hit rules between the player's attacks and monsters, and between monsters
//! and the player's body.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::facing::Facing;
use crate::plugins::enemies::{DamageOutcome, MonsterAgent};
use crate::plugins::player::health::{Invincibility, PlayerHealth};

use super::swing::HitLedger;

/// Who is hitting, as seen at the moment of impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attacker {
    pub base_damage: u32,
    pub damage_multiplier: f32,
    pub turbocharged: bool,
    pub facing: Facing,
    pub knockback: Vec2,
}

impl Attacker {
    pub fn damage(&self) -> u32 {
        (self.base_damage as f32 * self.damage_multiplier).round() as u32
    }

    /// Pushed away from the attacker along its facing, with a little lift.
    pub fn knockback(&self) -> Vec2 {
        Vec2::new(self.facing.sign() * self.knockback.x, self.knockback.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    pub damage: u32,
    pub knockback: Vec2,
    pub outcome: DamageOutcome,
}

impl HitReport {
    pub fn killed(&self) -> Option<u32> {
        match self.outcome {
            DamageOutcome::Killed { exp_reward, .. } => Some(exp_reward),
            _ => None,
        }
    }
}

/// Apply one attack to one monster.
///
/// `None` when the monster is dead, still fading in, or already in this
/// attack's ledger. Otherwise the monster is recorded, damaged and the
/// caller gets what to show and which knockback to apply.
pub fn try_apply_hit(
    ledger: &mut HitLedger,
    attacker: &Attacker,
    target: Entity,
    agent: &mut MonsterAgent,
) -> Option<HitReport> {
    if agent.is_dead() || !agent.is_hitbox_active() || ledger.contains(target) {
        return None;
    }
    ledger.record(target);

    let damage = attacker.damage();
    let outcome = agent.take_damage(damage, attacker.turbocharged);
    Some(HitReport { damage, knockback: attacker.knockback(), outcome })
}

/// Contact damage: a fixed share of the player's max health, rounded down.
#[inline]
pub fn touch_damage(max_health: u32, pct: f32) -> u32 {
    (max_health as f32 * pct).floor() as u32
}

/// A monster body touched the player. Returns the damage taken, or `None`
/// while invincible. A hit starts a fresh invincibility window.
pub fn try_touch_damage(
    health: &mut PlayerHealth,
    invincibility: &mut Invincibility,
    pct: f32,
    window: Duration,
) -> Option<u32> {
    if invincibility.is_active() || health.is_dead() {
        return None;
    }
    let damage = touch_damage(health.max(), pct);
    health.take_damage(damage);
    invincibility.grant(window);
    Some(damage)
}
