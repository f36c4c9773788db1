use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{drain_messages, run_system_once};
use crate::common::tunables::ComboTunables;
use crate::plugins::enemies::MonsterKilled;
use crate::plugins::hud::UiMessage;
use crate::plugins::player::Player;

fn engine() -> ComboEngine {
    ComboEngine::new(&ComboTunables::default())
}

fn small(threshold: u32) -> ComboEngine {
    ComboEngine::new(&ComboTunables {
        turbo_threshold: threshold,
        expiry: Duration::from_secs(3),
        turbo_duration: Duration::from_secs(8),
        ..default()
    })
}

#[test]
fn kills_count_up_and_restart_expiry() {
    let mut e = engine();
    assert_eq!(e.on_kill(), ComboEvent::Counted(1));
    e.tick(Duration::from_millis(2900));
    assert_eq!(e.on_kill(), ComboEvent::Counted(2));

    // The second kill restarted the expiry, so 2.9s later the combo holds.
    assert_eq!(e.tick(Duration::from_millis(2900)), None);
    assert_eq!(e.combo(), 2);

    assert_eq!(e.tick(Duration::from_millis(100)), Some(ComboEvent::Expired));
    assert_eq!(e.combo(), 0);
    // Expiry fires once.
    assert_eq!(e.tick(Duration::from_secs(10)), None);
}

#[test]
fn fiftieth_kill_turbocharges_then_reverts() {
    let mut e = engine();
    for i in 1..50 {
        assert_eq!(e.on_kill(), ComboEvent::Counted(i));
    }
    assert_eq!(e.combo(), 49);
    assert_eq!(e.boost(), TurboBoost::NONE);

    let event = e.on_kill();
    assert_eq!(event, ComboEvent::TurboStarted { duration: Duration::from_millis(8000) });
    assert_eq!(e.combo(), 0);
    assert!(e.is_turbocharged());
    assert_eq!(e.boost().damage, 2.0);

    match e.tick(Duration::from_millis(4000)) {
        Some(ComboEvent::TurboMeter(f)) => assert!((f - 0.5).abs() < 1e-4),
        other => panic!("expected meter, got {other:?}"),
    }
    assert_eq!(e.boost().damage, 2.0);

    assert_eq!(e.tick(Duration::from_millis(4000)), Some(ComboEvent::TurboEnded));
    assert!(!e.is_turbocharged());
    assert_eq!(e.boost(), TurboBoost::NONE);
}

#[test]
fn combo_never_reaches_threshold_without_reset() {
    let mut e = small(5);
    for _ in 0..200 {
        e.on_kill();
        assert!(e.combo() < e.threshold());
    }
}

#[test]
fn kills_during_turbo_do_not_cancel_it() {
    let mut e = small(3);
    e.on_kill();
    e.on_kill();
    assert!(matches!(e.on_kill(), ComboEvent::TurboStarted { .. }));

    assert_eq!(e.on_kill(), ComboEvent::Counted(1));
    assert!(e.is_turbocharged());

    // No expiry runs during turbo: the combo survives long gaps.
    e.tick(Duration::from_millis(7000));
    assert_eq!(e.combo(), 1);
    assert!(e.is_turbocharged());

    // Turbo ends and hands over to the expiry timer.
    assert_eq!(e.tick(Duration::from_millis(1000)), Some(ComboEvent::TurboEnded));
    assert_eq!(e.combo(), 1);
    assert_eq!(e.tick(Duration::from_secs(3)), Some(ComboEvent::Expired));
    assert_eq!(e.combo(), 0);
}

#[test]
fn reaching_threshold_during_turbo_restarts_it() {
    let mut e = small(2);
    e.on_kill();
    assert!(matches!(e.on_kill(), ComboEvent::TurboStarted { .. }));
    e.tick(Duration::from_millis(7000));

    e.on_kill();
    assert!(matches!(e.on_kill(), ComboEvent::TurboStarted { .. }));
    // Full fresh duration from here.
    assert!(matches!(
        e.tick(Duration::from_millis(7000)),
        Some(ComboEvent::TurboMeter(_))
    ));
}

#[test]
fn threshold_power_up_floors_at_one_and_clamps_combo() {
    let mut e = small(10);
    for _ in 0..8 {
        e.on_kill();
    }
    e.lower_threshold(5);
    assert_eq!(e.threshold(), 5);
    assert_eq!(e.combo(), 4);

    e.lower_threshold(50);
    assert_eq!(e.threshold(), 1);
    assert_eq!(e.combo(), 0);
    // Every kill now turbocharges.
    assert!(matches!(e.on_kill(), ComboEvent::TurboStarted { .. }));
}

#[test]
fn extended_duration_applies_to_next_turbo() {
    let mut e = small(1);
    e.extend_turbo_duration(Duration::from_secs(2));
    assert_eq!(
        e.on_kill(),
        ComboEvent::TurboStarted { duration: Duration::from_secs(10) }
    );
}

#[test]
fn count_kills_feeds_player_engine_and_hud() {
    let mut world = World::new();
    world.init_resource::<Messages<MonsterKilled>>();
    world.init_resource::<Messages<UiMessage>>();

    let player = world.spawn((Player, small(3))).id();
    for _ in 0..2 {
        world.write_message(MonsterKilled {
            monster: Entity::PLACEHOLDER,
            exp_reward: 5,
            position: Vec2::ZERO,
        });
    }

    run_system_once(&mut world, count_kills);

    assert_eq!(world.get::<ComboEngine>(player).unwrap().combo(), 2);
    let msgs = drain_messages::<UiMessage>(&mut world);
    assert_eq!(msgs, vec![UiMessage::Combo(1), UiMessage::Combo(2)]);
}
