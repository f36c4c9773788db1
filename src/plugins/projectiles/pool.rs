use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::{Layer, non_interacting};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;

use super::components::{PooledProjectile, Projectile, ProjectileEntity, ProjectileState};

pub const PROJECTILE_RADIUS: f32 = 8.0;

#[derive(Resource, Debug)]
pub struct ProjectilePool {
    free: Vec<ProjectileEntity>,
    capacity: usize,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self { free: Vec::with_capacity(capacity), capacity }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<ProjectileEntity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, e: ProjectileEntity) {
        self.free.push(e);
    }
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline]
pub fn active_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Projectile, [Layer::Enemy])
}

/// Inactive projectiles keep their physics components but collide with nothing.
#[inline]
pub fn inactive_projectile_layers() -> CollisionLayers {
    non_interacting(Layer::Projectile)
}

/// Pre-spawn the session's projectiles, all inactive.
///
/// The entities die with the session, so every run starts with a fresh pool.
pub fn init_projectile_pool(mut commands: Commands, tunables: Res<Tunables>, mut pool: ResMut<ProjectilePool>) {
    let cap = tunables.combat.projectile_pool;
    *pool = ProjectilePool::new(cap);

    for _ in 0..cap {
        let e = commands
            .spawn((
                (
                    Name::new("Projectile(Pooled)"),
                    PooledProjectile,
                    ProjectileState::Inactive,
                    Projectile::idle(tunables.combat.projectile_lifetime),
                    DespawnOnExit(GameState::InGame),
                ),
                (
                    Sprite {
                        color: Color::srgb(0.85, 0.85, 0.95),
                        custom_size: Some(Vec2::splat(PROJECTILE_RADIUS * 2.0)),
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 3.0),
                    Visibility::Hidden,
                ),
                (
                    RigidBody::Kinematic,
                    Sensor,
                    Collider::circle(PROJECTILE_RADIUS),
                    inactive_projectile_layers(),
                    LinearVelocity::ZERO,
                    AngularVelocity::ZERO,
                    CollisionEventsEnabled,
                ),
            ))
            .id();

        pool.push_free(ProjectileEntity(e));
    }
    debug!("Projectile pool ready ({cap})");
}
