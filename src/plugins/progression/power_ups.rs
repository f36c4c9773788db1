//! Level-up rewards.

use std::time::Duration;

use crate::common::rng::GameRng;
use crate::plugins::combo::ComboEngine;
use crate::plugins::player::PlayerStats;
use crate::plugins::player::health::PlayerHealth;
use crate::plugins::skills::PlayerSkills;

pub const OFFER_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUp {
    ExtraDash,
    ExtraJump,
    ExtraProjectile,
    ExtraHealth,
    IncreaseDamage,
    TurboDuration,
    ComboThreshold,
}

/// What a power-up can touch on the player.
pub struct PowerUpTarget<'a> {
    pub skills: &'a mut PlayerSkills,
    pub health: &'a mut PlayerHealth,
    pub stats: &'a mut PlayerStats,
    pub combo: &'a mut ComboEngine,
}

impl PowerUp {
    pub const ALL: [PowerUp; 7] = [
        PowerUp::ExtraDash,
        PowerUp::ExtraJump,
        PowerUp::ExtraProjectile,
        PowerUp::ExtraHealth,
        PowerUp::IncreaseDamage,
        PowerUp::TurboDuration,
        PowerUp::ComboThreshold,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Self::ExtraDash => "Gain an extra dash",
            Self::ExtraJump => "Gain an extra double jump",
            Self::ExtraProjectile => "Gain an extra projectile",
            Self::ExtraHealth => "Increase max health",
            Self::IncreaseDamage => "Increase damage of all attacks",
            Self::TurboDuration => "Increase turbo charge duration",
            Self::ComboThreshold => "Reach turbo charge sooner",
        }
    }

    /// Three distinct power-ups in random order.
    pub fn offer(rng: &mut GameRng) -> Vec<PowerUp> {
        let mut pool = Self::ALL.to_vec();
        rng.0.shuffle(&mut pool);
        pool.truncate(OFFER_SIZE);
        pool
    }

    pub fn apply(self, target: &mut PowerUpTarget) {
        match self {
            Self::ExtraDash => target.skills.dash.increase_max_uses(1),
            Self::ExtraJump => target.skills.jump.increase_max_uses(1),
            Self::ExtraProjectile => target.skills.projectile.increase_max_uses(1),
            Self::ExtraHealth => target.health.increase_max(10),
            Self::IncreaseDamage => {
                target.stats.min_damage += 2;
                target.stats.max_damage += 2;
            }
            Self::TurboDuration => target.combo.extend_turbo_duration(Duration::from_millis(2000)),
            Self::ComboThreshold => target.combo.lower_threshold(5),
        }
    }
}
