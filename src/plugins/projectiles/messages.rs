//! Buffered throw requests.
//!
//! The player state machine only produces intent; the allocator is the one
//! consumer that pops the pool and writes the projectile's components.

use bevy::prelude::*;

use crate::common::facing::Facing;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    /// Thrower's center.
    pub origin: Vec2,
    pub facing: Facing,
    pub damage: u32,
    pub damage_multiplier: f32,
    pub turbocharged: bool,
}
