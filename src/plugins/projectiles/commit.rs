//! Return commit: recycle projectiles back into the pool.
//!
//! This system owns the inactive invariants. An inactive projectile is
//! hidden, at rest, and collides with nothing.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{PooledProjectile, ProjectileEntity, ProjectileState};
use super::pool::{ProjectilePool, inactive_projectile_layers};

pub fn return_to_pool_commit(
    mut pool: ResMut<ProjectilePool>,
    mut q: Query<
        (
            Entity,
            &mut ProjectileState,
            &mut Visibility,
            &mut LinearVelocity,
            &mut AngularVelocity,
            &mut CollisionLayers,
        ),
        With<PooledProjectile>,
    >,
) {
    for (e, mut state, mut vis, mut vel, mut spin, mut layers) in &mut q {
        if *state != ProjectileState::PendingReturn {
            continue;
        }

        *state = ProjectileState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        spin.0 = 0.0;
        *layers = inactive_projectile_layers();

        pool.push_free(ProjectileEntity(e));
    }
}
