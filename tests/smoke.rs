mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use combo_runner::common::state::{GameState, Simulation};
use combo_runner::plugins::hud::HudModel;
use combo_runner::plugins::player::{Player, PlayerParts, PlayerStateMachine, StateId};
use combo_runner::plugins::projectiles::{PooledProjectile, ProjectilePool};

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
    assert_eq!(*app.world().resource::<State<Simulation>>().get(), Simulation::Running);
}

#[test]
fn session_spawns_player_level_and_pool() {
    let mut app = common::app_headless();
    for _ in 0..5 {
        app.update();
    }

    let world = app.world_mut();
    let players = world
        .query_filtered::<(&PlayerParts, &PlayerStateMachine), (With<Player>, With<TranslationInterpolation>)>()
        .iter(world)
        .count();
    assert_eq!(players, 1, "one interpolated player with its child sensors");

    let statics = world
        .query::<&RigidBody>()
        .iter(world)
        .filter(|b| **b == RigidBody::Static)
        .count();
    assert!(statics > 2, "level floor, platforms and edge walls");

    let pooled = world.query::<&PooledProjectile>().iter(world).count();
    assert_eq!(pooled, world.resource::<ProjectilePool>().capacity());

    let hud = world.resource::<HudModel>();
    assert_eq!((hud.health, hud.max_health), (100, 100));
    assert_eq!(hud.level, 1);
}

#[test]
fn player_state_machine_starts_idle() {
    let mut app = common::app_headless();
    app.insert_resource(Time::<Fixed>::from_hz(64.0));
    for _ in 0..3 {
        app.update();
    }
    // Force at least one fixed step.
    app.world_mut().run_schedule(FixedMain);

    let world = app.world_mut();
    let current = world
        .query_filtered::<&PlayerStateMachine, With<Player>>()
        .single(world)
        .ok()
        .and_then(PlayerStateMachine::current);
    assert!(matches!(current, Some(StateId::Idle | StateId::Jump)));
}

#[test]
fn game_over_clears_the_session_and_restart_respawns() {
    let mut app = common::app_headless();
    app.update();

    app.world_mut().resource_mut::<NextState<GameState>>().set(GameState::GameOver);
    app.update();
    let world = app.world_mut();
    assert_eq!(world.query::<&Player>().iter(world).count(), 0);

    app.world_mut().resource_mut::<NextState<GameState>>().set(GameState::InGame);
    app.update();
    let world = app.world_mut();
    assert_eq!(world.query::<&Player>().iter(world).count(), 1);
}
