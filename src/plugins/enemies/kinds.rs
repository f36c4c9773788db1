//! Enemy kinds and the stats derived from them.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Slime,
    Goblin,
    Brute,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_health: u32,
    /// Share of the player's max health dealt on contact.
    pub touch_damage_pct: f32,
    pub exp_reward: u32,
    pub move_animation: &'static str,
    pub size: Vec2,
    pub color: Color,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Slime, EnemyKind::Goblin, EnemyKind::Brute];

    pub fn stats(self) -> EnemyStats {
        match self {
            Self::Slime => EnemyStats {
                max_health: 30,
                touch_damage_pct: 0.10,
                exp_reward: 5,
                move_animation: "slime-move",
                size: Vec2::new(28.0, 20.0),
                color: Color::srgb(0.35, 0.85, 0.4),
            },
            Self::Goblin => EnemyStats {
                max_health: 50,
                touch_damage_pct: 0.15,
                exp_reward: 10,
                move_animation: "goblin-walk",
                size: Vec2::new(26.0, 40.0),
                color: Color::srgb(0.9, 0.55, 0.2),
            },
            Self::Brute => EnemyStats {
                max_health: 90,
                touch_damage_pct: 0.25,
                exp_reward: 25,
                move_animation: "brute-walk",
                size: Vec2::new(40.0, 52.0),
                color: Color::srgb(0.8, 0.22, 0.25),
            },
        }
    }

    /// Weighted pick: slimes are common, brutes rare.
    pub fn pick(roll: u32) -> Self {
        match roll % 10 {
            0..=4 => Self::Slime,
            5..=8 => Self::Goblin,
            _ => Self::Brute,
        }
    }
}
