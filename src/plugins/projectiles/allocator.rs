//! Throw consumer: activate projectiles from the pool.
//!
//! An empty pool drops the request; that is a capacity decision. A pooled
//! entity that no longer matches the projectile query is skipped with a
//! warning.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::{PooledProjectile, Projectile, ProjectileEntity, ProjectileState};
use super::messages::SpawnProjectileRequest;
use super::pool::{ProjectilePool, active_projectile_layers};

/// Released a little in front of the thrower's center.
const HAND_OFFSET: f32 = 20.0;

pub fn allocate_projectiles(
    tunables: Res<Tunables>,
    mut pool: ResMut<ProjectilePool>,
    mut reader: MessageReader<SpawnProjectileRequest>,
    mut q: Query<
        (
            &mut ProjectileState,
            &mut Projectile,
            &mut Transform,
            &mut LinearVelocity,
            &mut AngularVelocity,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        With<PooledProjectile>,
    >,
) {
    let combat = &tunables.combat;
    for req in reader.read() {
        let Some(ProjectileEntity(e)) = pool.pop_free() else {
            debug!("Projectile pool empty, throw dropped");
            continue;
        };

        let Ok((mut state, mut projectile, mut tf, mut vel, mut spin, mut vis, mut layers)) =
            q.get_mut(e)
        else {
            warn!("Pooled projectile {e:?} is missing its components");
            continue;
        };

        let dir = req.facing.sign();
        *state = ProjectileState::Active;
        projectile.reset_for_throw(req);
        tf.translation = (req.origin + Vec2::X * dir * HAND_OFFSET).extend(3.0);
        vel.0 = Vec2::new(dir * combat.projectile_speed, 0.0);
        spin.0 = -dir * combat.projectile_spin;
        *vis = Visibility::Visible;
        *layers = active_projectile_layers();
    }
}
