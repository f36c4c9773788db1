//! Player plugin.
//!
//! Pipeline:
//! - Update: sample the keyboard into `PlayerInput` (held axis) and
//!   `InputQueue` (presses since the last fixed step).
//! - FixedUpdate: refresh `Grounded`, tick invincibility, then
//!   `drive_player_state` feeds queued presses and the elapsed step to the
//!   state machine and writes the resulting body back to physics.
//! - FixedPostUpdate: a player at zero health ends the run.
//!
//! API note (Bevy >= 0.18): single-entity access goes through
//! `Query::single`/`single_mut`, which return a `Result`; a missing player is
//! a normal condition (between runs) and simply skips the system.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::facing::Facing;
use crate::common::layers::{Layer, is_in_layer, non_interacting};
use crate::common::state::{GameState, Simulation};
use crate::common::tunables::Tunables;
use crate::plugins::combat::{AttackHitbox, PlayerTouchSensor};
use crate::plugins::combo::ComboEngine;
use crate::plugins::hud::UiMessage;
use crate::plugins::presentation::{BaseColor, CurrentAnimation, PresentationRequest, SoundCue};
use crate::plugins::progression::Experience;
use crate::plugins::projectiles::messages::SpawnProjectileRequest;
use crate::plugins::skills::PlayerSkills;
use crate::plugins::world::PlatformMap;

pub mod health;
pub mod machine;
pub mod states;

use health::{Invincibility, PlayerHealth};
pub use machine::{
    ActionKey, PlayerBody, PlayerCommand, PlayerCtx, PlayerState, PlayerStateMachine, StateId,
};

#[derive(Component, Debug, Default)]
pub struct Player;

/// Damage ranges, raised by power-ups.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    pub min_damage: u32,
    pub max_damage: u32,
    pub projectile_damage: u32,
}

/// Child colliders of the player body.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerParts {
    pub hitbox: Entity,
    pub touch_sensor: Entity,
}

/// Touching a `Floor` body this step.
///
/// Any contact counts, including side or head contact with a floor tile, so
/// brushing the underside of a platform also refreshes the jump.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grounded(pub bool);

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub axis: f32,
}

/// Presses collected between fixed steps, in order.
#[derive(Resource, Default, Debug)]
pub struct InputQueue(Vec<ActionKey>);

impl InputQueue {
    pub fn push(&mut self, key: ActionKey) {
        self.0.push(key);
    }

    pub fn take(&mut self) -> Vec<ActionKey> {
        std::mem::take(&mut self.0)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

const PLAYER_COLOR: Color = Color::srgb(0.2, 0.75, 0.9);

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .init_resource::<InputQueue>()
        .add_systems(OnEnter(GameState::InGame), (clear_input, spawn_player))
        .add_systems(
            Update,
            gather_input.run_if(in_state(Simulation::Running)),
        )
        .add_systems(
            Update,
            restart_on_key.run_if(in_state(GameState::GameOver)),
        )
        .add_systems(
            FixedUpdate,
            (update_grounded, tick_invincibility, drive_player_state)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            end_run_on_death
                .after(crate::plugins::combat::resolve_touch_damage)
                .run_if(in_state(GameState::InGame)),
        );
}

fn clear_input(mut input: ResMut<PlayerInput>, mut queue: ResMut<InputQueue>) {
    input.axis = 0.0;
    queue.clear();
}

pub fn spawn_player(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut ui: MessageWriter<UiMessage>,
) {
    let t = &tunables.player;
    let size = Vec2::new(t.half_width * 2.0, t.half_height * 2.0);

    let player = commands
        .spawn((
            (
                Name::new("Player"),
                Player,
                PlayerStats {
                    min_damage: tunables.combat.min_damage,
                    max_damage: tunables.combat.max_damage,
                    projectile_damage: tunables.combat.projectile_damage,
                },
                PlayerHealth::new(t.max_health),
                Invincibility::default(),
                PlayerSkills::new(&tunables.skills),
                ComboEngine::new(&tunables.combo),
                Experience::new(),
                PlayerStateMachine::with_player_states(t),
                Facing::Right,
                Grounded::default(),
                CurrentAnimation::default(),
            ),
            (
                Sprite {
                    color: PLAYER_COLOR,
                    custom_size: Some(size),
                    ..default()
                },
                BaseColor(PLAYER_COLOR),
                Transform::from_xyz(t.spawn.x, t.spawn.y, 2.0),
                DespawnOnExit(GameState::InGame),
            ),
            (
                RigidBody::Dynamic,
                Collider::rectangle(size.x, size.y),
                LockedAxes::ROTATION_LOCKED,
                Friction::ZERO,
                Restitution::ZERO,
                CollisionLayers::new(Layer::Player, [Layer::Floor, Layer::Wall]),
                CollidingEntities::default(),
                LinearVelocity::ZERO,
                TranslationInterpolation,
            ),
        ))
        .id();

    let hitbox = commands
        .spawn((
            Name::new("AttackHitbox"),
            AttackHitbox::default(),
            Sensor,
            Collider::rectangle(1.0, 1.0),
            non_interacting(Layer::AttackHitbox),
            CollidingEntities::default(),
            Transform::default(),
            ChildOf(player),
        ))
        .id();

    let touch_sensor = commands
        .spawn((
            Name::new("TouchSensor"),
            PlayerTouchSensor,
            Sensor,
            Collider::rectangle(size.x - 4.0, size.y - 4.0),
            CollisionLayers::new(Layer::PlayerSensor, [Layer::Enemy]),
            CollidingEntities::default(),
            Transform::default(),
            ChildOf(player),
        ))
        .id();

    commands.entity(player).insert(PlayerParts { hitbox, touch_sensor });

    ui.write(UiMessage::Health { current: t.max_health, max: t.max_health });
    info!("Player spawned at {:?}", t.spawn);
}

pub fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut input: ResMut<PlayerInput>,
    mut queue: ResMut<InputQueue>,
) {
    let Some(keys) = keys else {
        return;
    };

    let mut axis = 0.0;
    if keys.pressed(KeyCode::ArrowLeft) {
        axis -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        axis += 1.0;
    }
    input.axis = axis;

    for key in keys.get_just_pressed() {
        let action = match key {
            KeyCode::Space => ActionKey::Jump,
            KeyCode::KeyS => ActionKey::Dash,
            KeyCode::KeyF => ActionKey::Attack,
            KeyCode::KeyD => ActionKey::Projectile,
            KeyCode::ArrowLeft => ActionKey::Left,
            KeyCode::ArrowRight => ActionKey::Right,
            _ => continue,
        };
        queue.push(action);
    }
}

pub fn update_grounded(
    mut q_player: Query<(&CollidingEntities, &mut Grounded), With<Player>>,
    q_layers: Query<&CollisionLayers>,
) {
    for (touching, mut grounded) in &mut q_player {
        let on_floor = touching
            .iter()
            .any(|&e| q_layers.get(e).is_ok_and(|l| is_in_layer(l, Layer::Floor)));
        if grounded.0 != on_floor {
            grounded.0 = on_floor;
        }
    }
}

fn tick_invincibility(time: Res<Time<Fixed>>, mut q: Query<&mut Invincibility, With<Player>>) {
    for mut invincibility in &mut q {
        invincibility.tick(time.delta());
    }
}

/// Run one fixed step of the player state machine.
pub fn drive_player_state(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    map: Res<PlatformMap>,
    input: Res<PlayerInput>,
    mut queue: ResMut<InputQueue>,
    mut q_player: Query<
        (
            Entity,
            &mut PlayerStateMachine,
            &Position,
            &mut LinearVelocity,
            &mut RigidBody,
            &mut Facing,
            &Grounded,
            &mut PlayerSkills,
            &mut Invincibility,
            &ComboEngine,
            &PlayerStats,
        ),
        With<Player>,
    >,
    mut fx: MessageWriter<PresentationRequest>,
    mut throws: MessageWriter<SpawnProjectileRequest>,
) {
    let keys = queue.take();
    let Ok((
        entity,
        mut machine,
        position,
        mut velocity,
        mut body_kind,
        mut facing,
        grounded,
        mut skills,
        mut invincibility,
        combo,
        stats,
    )) = q_player.single_mut()
    else {
        return;
    };

    let dt = time.delta();
    let mut body = PlayerBody {
        position: position.0,
        velocity: velocity.0,
        facing: *facing,
        locked: matches!(*body_kind, RigidBody::Kinematic),
    };
    let boost = combo.boost();
    let turbocharged = combo.is_turbocharged();
    let mut out = Vec::new();

    {
        let mut ctx = PlayerCtx {
            body: &mut body,
            grounded: grounded.0,
            axis: input.axis,
            skills: &mut *skills,
            invincibility: &mut *invincibility,
            boost,
            turbocharged,
            tunables: &tunables.player,
            terrain: &*map,
            world_width: map.width(),
            commands: &mut out,
        };

        if machine.current().is_none() {
            machine.set_state(&mut ctx, StateId::Idle);
        }
        for key in keys {
            machine.handle_input(&mut ctx, key);
        }
        machine.update(&mut ctx, dt);
    }

    // Positional moves (dash) become velocity so physics carries the sensors
    // along. The tick that ends a dash still owes its last displacement.
    let shifted = body.position.x - position.x;
    if body.locked || shifted != 0.0 {
        let secs = dt.as_secs_f32();
        let vx = if secs > 0.0 { shifted / secs } else { 0.0 };
        let vy = if body.locked { 0.0 } else { body.velocity.y };
        velocity.0 = Vec2::new(vx, vy);
    } else {
        velocity.0 = body.velocity;
    }

    let wanted = if body.locked { RigidBody::Kinematic } else { RigidBody::Dynamic };
    if *body_kind != wanted {
        *body_kind = wanted;
    }
    if *facing != body.facing {
        *facing = body.facing;
    }

    for command in out {
        match command {
            PlayerCommand::Animate(clip) => {
                fx.write(PresentationRequest::Animation { entity, clip });
            }
            PlayerCommand::StopAnimation => {
                fx.write(PresentationRequest::StopAnimation { entity });
            }
            PlayerCommand::Sound(key) => {
                fx.write(PresentationRequest::Sound(SoundCue::new(key)));
            }
            PlayerCommand::Tint(color) => {
                fx.write(PresentationRequest::Tint { entity, color });
            }
            PlayerCommand::ThrowProjectile { origin, facing } => {
                throws.write(SpawnProjectileRequest {
                    origin,
                    facing,
                    damage: stats.projectile_damage,
                    damage_multiplier: boost.damage,
                    turbocharged,
                });
            }
        }
    }
}

fn end_run_on_death(
    q: Query<&PlayerHealth, With<Player>>,
    mut next: ResMut<NextState<GameState>>,
    mut ui: MessageWriter<UiMessage>,
) {
    let Ok(health) = q.single() else {
        return;
    };
    if health.is_dead() {
        info!("Player died");
        ui.write(UiMessage::ShowGameOver);
        next.set(GameState::GameOver);
    }
}

fn restart_on_key(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::Space]) {
        info!("Restarting");
        next.set(GameState::InGame);
    }
}
