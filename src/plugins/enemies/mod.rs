//! Enemies plugin: walking monsters, their spawners, and their death lifecycle.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! - FACTS live in `MonsterAgent` (health, walk direction, lifecycle state).
//!   Combat code mutates it through `take_damage`; wall contacts through
//!   `on_obstacle_ahead` (checked every fixed step from `CollidingEntities`).
//! - RULES run in the fixed step: `step_monsters` turns the agent's state into
//!   a body velocity, and a kill is announced exactly once via `MonsterKilled`.
//! - PRESENTATION (hit flash, health bar, fade alpha) is derived from the facts
//!   every frame and never feeds back into gameplay.
//!
//! We avoid despawning physics entities inside the fixed physics step.
//! Dead monsters are marked `PendingDespawn` once their fade finishes and
//! despawned later in PostUpdate.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::Occluder2d;

use crate::common::facing::Facing;
use crate::common::layers::{Layer, is_in_layer};
use crate::common::rng::GameRng;
use crate::common::state::GameState;
use crate::common::tunables::{MonsterTunables, Tunables};
use crate::plugins::presentation::CurrentAnimation;

pub mod agent;
pub mod kinds;
pub mod spawner;

pub use agent::{DamageOutcome, MonsterAgent, MonsterState, MonsterStep};
pub use kinds::{EnemyKind, EnemyStats};
pub use spawner::MonsterSpawner;

// -----------------------------------------------------------------------------
// Messages
// -----------------------------------------------------------------------------

/// A monster took its killing blow this tick.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct MonsterKilled {
    pub monster: Entity,
    pub exp_reward: u32,
    pub position: Vec2,
}

// -----------------------------------------------------------------------------
// Newtypes
// -----------------------------------------------------------------------------

/// Value normalized to [0..1]. Clamped on write so readers never re-check.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct UnitF32(f32);

impl UnitF32 {
    #[inline]
    pub(crate) fn new_clamped(v: f32) -> Self {
        Self(v.clamp(0.0, 1.0))
    }
    #[inline]
    pub(crate) fn get(self) -> f32 {
        self.0
    }
    #[inline]
    pub(crate) fn decay_to_zero(&mut self, rate_per_sec: f32, dt: f32) {
        self.0 = (self.0 - rate_per_sec * dt).max(0.0);
    }
}

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

/// Presentation-only white flash after a hit. Always present so a hit only
/// mutates a number.
#[derive(Component, Debug, Clone, Default)]
pub struct HitFlash(UnitF32);

impl HitFlash {
    pub fn trigger(&mut self) {
        self.0 = UnitF32::new_clamped(1.0);
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.0.get()
    }
}

/// The health bar child drawn above a monster.
#[derive(Component, Debug, Clone, Copy)]
pub struct MonsterHealthBar {
    width: f32,
}

/// Marker: entity should be removed from the world in PostUpdate.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.add_message::<MonsterKilled>();

    app.add_systems(
        FixedUpdate,
        (run_spawners, step_monsters).run_if(in_state(GameState::InGame)),
    );

    // Contacts are only known once the physics step has produced them.
    app.add_systems(
        FixedPostUpdate,
        turn_on_wall_contact
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        Update,
        (flash_hit_monsters, update_health_bars).run_if(in_state(GameState::InGame)),
    );

    app.add_systems(PostUpdate, despawn_marked_monsters);
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

const HEALTH_BAR_HEIGHT: f32 = 4.0;

/// Layers of a live monster: bumps into terrain, is seen by the player's
/// touch sensor, attack hitbox and projectiles.
#[inline]
pub fn live_monster_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Enemy,
        [
            Layer::Floor,
            Layer::Wall,
            Layer::PlayerSensor,
            Layer::AttackHitbox,
            Layer::Projectile,
        ],
    )
}

/// A dead monster keeps standing on the floor while it fades but stops
/// taking part in combat.
#[inline]
pub fn dead_monster_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::Floor, Layer::Wall])
}

pub fn spawn_monster(
    commands: &mut Commands,
    kind: EnemyKind,
    position: Vec2,
    direction: Facing,
    tunables: &MonsterTunables,
) -> Entity {
    let stats = kind.stats();
    let mut color = stats.color.to_srgba();
    color.alpha = 0.0;

    let monster = commands
        .spawn((
            (
                Name::new(format!("{kind:?}")),
                MonsterAgent::new(kind, direction, tunables),
                HitFlash::default(),
                CurrentAnimation::playing(stats.move_animation),
                Sprite {
                    color: color.into(),
                    custom_size: Some(stats.size),
                    flip_x: direction.flip_x(),
                    ..default()
                },
                Transform::from_xyz(position.x, position.y, 1.0),
                DespawnOnExit(GameState::InGame),
            ),
            (
                RigidBody::Dynamic,
                Collider::rectangle(stats.size.x, stats.size.y),
                LockedAxes::ROTATION_LOCKED,
                Friction::ZERO,
                Restitution::ZERO,
                live_monster_layers(),
                CollidingEntities::default(),
                CollisionEventsEnabled,
                LinearVelocity(Vec2::new(direction.sign() * tunables.walk_speed, 0.0)),
                Occluder2d::circle(stats.size.min_element() * 0.5),
            ),
        ))
        .id();

    commands.spawn((
        Name::new("HealthBar"),
        MonsterHealthBar { width: stats.size.x },
        Sprite {
            color: Color::srgb(0.2, 0.9, 0.3),
            custom_size: Some(Vec2::new(stats.size.x, HEALTH_BAR_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, stats.size.y * 0.5 + 6.0, 0.1),
        ChildOf(monster),
    ));

    debug!("Spawned {kind:?} at {position:?}");
    monster
}

/// Tick every spawner; when one is due and under its cap, spawn a random
/// monster walking in a random direction.
pub fn run_spawners(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
    mut q_spawners: Query<(&mut MonsterSpawner, &Transform)>,
    q_agents: Query<&MonsterAgent>,
) {
    for (mut spawner, tf) in &mut q_spawners {
        if !spawner.tick(time.delta()) {
            continue;
        }

        spawner.purge(|e| q_agents.get(e).is_ok_and(|agent| !agent.is_dead()));
        if !spawner.has_room() {
            continue;
        }

        let kind = EnemyKind::pick(rng.roll(0, 9));
        let direction = if rng.coin() { Facing::Left } else { Facing::Right };
        let monster = spawn_monster(
            &mut commands,
            kind,
            tf.translation.truncate(),
            direction,
            &tunables.monsters,
        );
        spawner.track(monster);
    }
}

// -----------------------------------------------------------------------------
// Rules
// -----------------------------------------------------------------------------

/// Drive each monster's body from its agent and run the death fade.
pub fn step_monsters(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut q: Query<
        (
            Entity,
            &mut MonsterAgent,
            &mut LinearVelocity,
            &mut CollisionLayers,
            &mut Sprite,
        ),
        Without<PendingDespawn>,
    >,
) {
    for (e, mut agent, mut vel, mut layers, mut sprite) in &mut q {
        let step = agent.update(time.delta());

        if let Some(vx) = step.velocity_x {
            vel.x = vx;
        }

        if agent.is_dead() && layers.filters.has_all(Layer::AttackHitbox) {
            *layers = dead_monster_layers();
        }

        sprite.flip_x = agent.direction().flip_x();
        let mut c = sprite.color.to_srgba();
        c.alpha = step.alpha;
        sprite.color = c.into();

        if step.despawn {
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

/// Reverse monsters that walk into a wall body.
///
/// Reads ongoing contacts rather than start events, so a wall first touched
/// while stunned still turns the monster once it walks again.
pub fn turn_on_wall_contact(
    mut q_monsters: Query<(&mut MonsterAgent, &CollidingEntities, &Transform)>,
    q_walls: Query<(&CollisionLayers, &Transform), Without<MonsterAgent>>,
) {
    for (mut agent, touching, tf) in &mut q_monsters {
        for &other in touching.iter() {
            let Ok((layers, wall_tf)) = q_walls.get(other) else {
                continue;
            };
            if !is_in_layer(layers, Layer::Wall) {
                continue;
            }
            let side = if wall_tf.translation.x > tf.translation.x {
                Facing::Right
            } else {
                Facing::Left
            };
            if agent.on_obstacle_ahead(side) {
                debug!("{:?} turned {:?}", agent.kind(), agent.direction());
                break;
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Presentation
// -----------------------------------------------------------------------------

fn flash_hit_monsters(
    time: Res<Time>,
    mut q: Query<(&MonsterAgent, &mut HitFlash, &mut Sprite), Without<PendingDespawn>>,
) {
    let dt = time.delta_secs();
    for (agent, mut flash, mut sprite) in &mut q {
        flash.0.decay_to_zero(6.0, dt);

        let base = agent.stats().color.to_srgba();
        let f = flash.intensity();
        let alpha = sprite.color.alpha();
        sprite.color = Color::srgba(
            (base.red + f * 0.8).min(1.0),
            (base.green + f * 0.8).min(1.0),
            (base.blue + f * 0.8).min(1.0),
            alpha,
        );
    }
}

fn update_health_bars(
    q_monsters: Query<&MonsterAgent>,
    mut q_bars: Query<(&MonsterHealthBar, &ChildOf, &mut Transform, &mut Visibility)>,
) {
    for (bar, child_of, mut tf, mut vis) in &mut q_bars {
        let Ok(agent) = q_monsters.get(child_of.parent()) else {
            continue;
        };
        if agent.is_dead() {
            *vis = Visibility::Hidden;
            continue;
        }
        let fraction = agent.health_fraction();
        tf.scale.x = fraction;
        // Keep the bar left-aligned as it shrinks.
        tf.translation.x = -(1.0 - fraction) * bar.width * 0.5;
    }
}

// -----------------------------------------------------------------------------
// Cleanup (PostUpdate)
// -----------------------------------------------------------------------------

fn despawn_marked_monsters(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
