//! Tunable gameplay constants.
//!
//! Speeds are in pixels per second; per-frame feel values were multiplied
//! by 60. Windows and cooldowns are `Duration`s and plug straight into `Timer`.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub gravity: f32,
    pub player: PlayerTunables,
    pub skills: SkillTunables,
    pub combat: CombatTunables,
    pub combo: ComboTunables,
    pub monsters: MonsterTunables,
    pub world: WorldTunables,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            gravity: 1500.0,
            player: PlayerTunables::default(),
            skills: SkillTunables::default(),
            combat: CombatTunables::default(),
            combo: ComboTunables::default(),
            monsters: MonsterTunables::default(),
            world: WorldTunables::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerTunables {
    pub speed: f32,
    pub jump_velocity: f32,
    pub max_fall_speed: f32,
    /// Extra downward acceleration while falling, on top of world gravity.
    pub fall_acceleration: f32,
    pub dash_distance: f32,
    pub dash_speed: f32,
    pub dash_grace: Duration,
    pub jump_buffer: Duration,
    pub attack_startup: Duration,
    pub half_width: f32,
    pub half_height: f32,
    pub max_health: u32,
    pub spawn: Vec2,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self {
            speed: 300.0,
            jump_velocity: 720.0,
            max_fall_speed: 540.0,
            fall_acceleration: 1200.0,
            dash_distance: 150.0,
            dash_speed: 750.0,
            dash_grace: Duration::from_millis(500),
            jump_buffer: Duration::from_millis(100),
            attack_startup: Duration::from_millis(300),
            half_width: 16.0,
            half_height: 24.0,
            max_health: 100,
            spawn: Vec2::new(40.0, 80.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkillTunables {
    pub jump_cooldown: Duration,
    pub dash_cooldown: Duration,
    pub projectile_cooldown: Duration,
}

impl Default for SkillTunables {
    fn default() -> Self {
        Self {
            jump_cooldown: Duration::from_millis(3000),
            dash_cooldown: Duration::from_millis(4000),
            projectile_cooldown: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CombatTunables {
    pub min_damage: u32,
    pub max_damage: u32,
    pub knockback: Vec2,
    pub damage_invincibility: Duration,
    pub projectile_speed: f32,
    pub projectile_spin: f32,
    pub projectile_damage: u32,
    pub projectile_lifetime: Duration,
    pub projectile_pool: usize,
}

impl Default for CombatTunables {
    fn default() -> Self {
        Self {
            min_damage: 10,
            max_damage: 14,
            knockback: Vec2::new(120.0, 150.0),
            damage_invincibility: Duration::from_millis(1000),
            projectile_speed: 1200.0,
            projectile_spin: 10.0,
            projectile_damage: 8,
            projectile_lifetime: Duration::from_secs(2),
            projectile_pool: 32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComboTunables {
    pub turbo_threshold: u32,
    pub expiry: Duration,
    pub turbo_duration: Duration,
    pub speed_multiplier: f32,
    pub jump_multiplier: f32,
    pub damage_multiplier: f32,
}

impl Default for ComboTunables {
    fn default() -> Self {
        Self {
            turbo_threshold: 50,
            expiry: Duration::from_millis(3000),
            turbo_duration: Duration::from_millis(8000),
            speed_multiplier: 1.5,
            jump_multiplier: 1.2,
            damage_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonsterTunables {
    pub walk_speed: f32,
    pub turn_window: Duration,
    pub damage_stun: Duration,
    pub spawn_fade: Duration,
    pub death_fade: Duration,
    pub spawn_period: Duration,
    pub spawn_cap: usize,
}

impl Default for MonsterTunables {
    fn default() -> Self {
        Self {
            walk_speed: 90.0,
            turn_window: Duration::from_millis(100),
            damage_stun: Duration::from_millis(500),
            spawn_fade: Duration::from_millis(500),
            death_fade: Duration::from_millis(350),
            spawn_period: Duration::from_millis(1000),
            spawn_cap: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorldTunables {
    pub width: f32,
    pub height: f32,
    pub tile_size: f32,
}

impl Default for WorldTunables {
    fn default() -> Self {
        Self { width: 900.0, height: 900.0, tile_size: 30.0 }
    }
}
