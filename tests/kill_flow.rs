//! Kills flowing into combo, experience and the level-up pause.
//!
//! Monster deaths are injected as `MonsterKilled` messages; no physics runs.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use combo_runner::common::rng::GameRng;
use combo_runner::common::state::{GameState, Simulation};
use combo_runner::common::tunables::Tunables;
use combo_runner::plugins::combo::{self, ComboEngine};
use combo_runner::plugins::enemies::MonsterKilled;
use combo_runner::plugins::hud::{self, HudModel};
use combo_runner::plugins::player::health::PlayerHealth;
use combo_runner::plugins::player::{Player, PlayerStats};
use combo_runner::plugins::progression::{self, Experience, PendingLevelUps};
use combo_runner::plugins::skills::PlayerSkills;

fn flow_app(turbo_threshold: u32) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(Tunables::default());
    app.insert_resource(GameRng::seeded(7));
    app.init_state::<GameState>();
    app.add_sub_state::<Simulation>();
    app.add_message::<MonsterKilled>();

    hud::plugin(&mut app);
    combo::plugin(&mut app);
    progression::plugin(&mut app);

    // Enter InGame and run the OnEnter resets.
    app.update();

    let mut tunables = Tunables::default();
    tunables.combo.turbo_threshold = turbo_threshold;
    app.world_mut().spawn((
        Player,
        ComboEngine::new(&tunables.combo),
        Experience::new(),
        PlayerSkills::new(&tunables.skills),
        PlayerHealth::new(100),
        PlayerStats { min_damage: 8, max_damage: 12, projectile_damage: 8 },
    ));
    app
}

fn kill(app: &mut App, exp_reward: u32) {
    let monster = app.world_mut().spawn_empty().id();
    app.world_mut().write_message(MonsterKilled {
        monster,
        exp_reward,
        position: Vec2::new(300.0, 100.0),
    });
}

fn simulation(app: &App) -> Simulation {
    *app.world().resource::<State<Simulation>>().get()
}

#[test]
fn kills_build_the_combo_on_the_hud() {
    let mut app = flow_app(50);
    kill(&mut app, 5);
    kill(&mut app, 5);
    app.world_mut().run_schedule(FixedPostUpdate);
    app.update();

    let world = app.world_mut();
    let combo = world.query::<&ComboEngine>().single(world).ok().map(ComboEngine::combo);
    assert_eq!(combo, Some(2));
    let hud = app.world().resource::<HudModel>();
    assert_eq!(hud.combo, Some(2));
    assert_eq!(hud.exp, 10);
    assert_eq!(hud.level, 1);
    assert_eq!(simulation(&app), Simulation::Running);
}

#[test]
fn reaching_the_threshold_turbocharges() {
    let mut app = flow_app(3);
    for _ in 0..3 {
        kill(&mut app, 5);
    }
    app.world_mut().run_schedule(FixedPostUpdate);
    app.update();

    let world = app.world_mut();
    let turbo = world
        .query::<&ComboEngine>()
        .single(world)
        .ok()
        .map(ComboEngine::is_turbocharged);
    assert_eq!(turbo, Some(true));
    let hud = app.world().resource::<HudModel>();
    assert_eq!(hud.combo, None);
    assert!(hud.turbo_meter.is_some_and(|f| f > 0.9));
}

#[test]
fn level_up_pauses_until_a_power_up_is_picked() {
    let mut app = flow_app(50);
    // 75 exp: level 1 -> 3, two offers queued.
    for _ in 0..3 {
        kill(&mut app, 25);
    }
    app.world_mut().run_schedule(FixedPostUpdate);
    assert_eq!(app.world().resource::<PendingLevelUps>().0, 2);

    // Offer opens this frame, the pause lands on the next transition.
    app.update();
    assert_eq!(app.world().resource::<HudModel>().level, 3);
    let offer = app.world().resource::<HudModel>().level_up_offer.clone();
    assert_eq!(offer.map(|o| o.len()), Some(3));
    app.update();
    assert_eq!(simulation(&app), Simulation::ChoosingPowerUp);
    assert!(app.world().resource::<Time<Virtual>>().is_paused());

    // Nothing pressed keeps the overlay up.
    app.update();
    assert_eq!(simulation(&app), Simulation::ChoosingPowerUp);

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Digit1);
    app.insert_resource(keys);
    app.update();
    app.world_mut().remove_resource::<ButtonInput<KeyCode>>();
    assert!(app.world().resource::<HudModel>().level_up_offer.is_none());

    // Back to running, then straight into the second queued offer.
    app.update();
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());
    assert_eq!(app.world().resource::<PendingLevelUps>().0, 0);
    assert!(app.world().resource::<HudModel>().level_up_offer.is_some());
}

#[test]
fn leaving_the_session_drops_a_pending_pause() {
    let mut app = flow_app(50);
    kill(&mut app, 25);
    app.world_mut().run_schedule(FixedPostUpdate);
    app.update();
    app.update();
    assert_eq!(simulation(&app), Simulation::ChoosingPowerUp);

    app.world_mut().resource_mut::<NextState<GameState>>().set(GameState::GameOver);
    app.update();
    assert!(app.world().get_resource::<State<Simulation>>().is_none());
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());
}
