use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::combat::{Impact, land_hit, try_apply_hit};
use crate::plugins::enemies::{HitFlash, MonsterAgent, MonsterKilled};
use crate::plugins::presentation::PresentationRequest;

use super::components::{PooledProjectile, Projectile, ProjectileState};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget { collider: ev.collider1, body: ev.body1 },
        CollisionTarget { collider: ev.collider2, body: ev.body2 },
    )
}

/// Projectiles pass through monsters, hurting each one at most once.
pub fn process_projectile_hits(
    tunables: Res<Tunables>,
    mut started: MessageReader<CollisionStart>,
    q_is_projectile: Query<(), With<PooledProjectile>>,
    mut q_projectiles: Query<(&mut Projectile, &ProjectileState), With<PooledProjectile>>,
    mut q_monsters: Query<(&mut MonsterAgent, &mut LinearVelocity, &mut HitFlash, &Transform)>,
    mut fx: MessageWriter<PresentationRequest>,
    mut kills: MessageWriter<MonsterKilled>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_is_projectile.contains(t1.collider);
        let p2 = q_is_projectile.contains(t2.collider);
        if !(p1 ^ p2) {
            continue;
        }
        let (projectile_side, other_side) = if p1 { (t1, t2) } else { (t2, t1) };

        let Ok((mut projectile, state)) = q_projectiles.get_mut(projectile_side.collider) else {
            continue;
        };
        if *state != ProjectileState::Active {
            continue;
        }

        let monster = other_side.gameplay_owner();
        let Ok((mut agent, mut vel, mut flash, tf)) = q_monsters.get_mut(monster) else {
            continue;
        };

        let attacker = projectile.attacker(tunables.combat.knockback);
        let Some(report) = try_apply_hit(&mut projectile.ledger, &attacker, monster, &mut agent)
        else {
            continue;
        };

        let impact = Impact {
            monster,
            position: tf.translation.truncate(),
            clip: "slash-horizontal-hit",
            facing: projectile.facing,
            turbocharged: projectile.turbocharged,
        };
        land_hit(&report, impact, &mut vel, &mut flash, &mut fx, &mut kills);
    }
}

/// Flag projectiles that left the world or outlived their lifetime.
pub fn expire_projectiles(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut q: Query<(&mut Projectile, &mut ProjectileState, &Transform), With<PooledProjectile>>,
) {
    let width = tunables.world.width;
    let height = tunables.world.height;
    for (mut projectile, mut state, tf) in &mut q {
        if *state != ProjectileState::Active {
            continue;
        }
        projectile.lifetime.tick(time.delta());
        let p = tf.translation;
        let outside = p.x < 0.0 || p.x > width || p.y < 0.0 || p.y > height;
        if outside || projectile.lifetime.is_finished() {
            *state = ProjectileState::PendingReturn;
        }
    }
}
