use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::platform::collections::HashSet;

use super::*;
use crate::common::test_utils::{drain_messages, run_system_once};
use crate::common::tunables::{ComboTunables, SkillTunables};

// -----------------------------------------------------------------------------
// Experience
// -----------------------------------------------------------------------------

#[test]
fn experience_carries_overflow_and_grows_cost() {
    let mut exp = Experience::new();
    assert_eq!((exp.level(), exp.current(), exp.to_next()), (1, 0, 20));

    assert_eq!(exp.gain(19), 0);
    assert_eq!(exp.gain(6), 1);
    assert_eq!((exp.level(), exp.current(), exp.to_next()), (2, 5, 30));

    // 105 buys two levels: 30, then 45; 68 is next (45 * 1.5 rounded up).
    assert_eq!(exp.gain(100), 2);
    assert_eq!((exp.level(), exp.current(), exp.to_next()), (4, 30, 68));
}

// -----------------------------------------------------------------------------
// Power-ups
// -----------------------------------------------------------------------------

#[test]
fn offers_are_three_distinct_power_ups() {
    let mut rng = GameRng::seeded(11);
    for _ in 0..50 {
        let offer = PowerUp::offer(&mut rng);
        assert_eq!(offer.len(), 3);
        let unique: HashSet<_> = offer.iter().copied().collect();
        assert_eq!(unique.len(), 3);
    }
}

struct Target {
    skills: PlayerSkills,
    health: PlayerHealth,
    stats: PlayerStats,
    combo: ComboEngine,
}

impl Target {
    fn new() -> Self {
        Self {
            skills: PlayerSkills::new(&SkillTunables::default()),
            health: PlayerHealth::new(100),
            stats: PlayerStats { min_damage: 10, max_damage: 14, projectile_damage: 8 },
            combo: ComboEngine::new(&ComboTunables::default()),
        }
    }

    fn apply(&mut self, power_up: PowerUp) {
        power_up.apply(&mut PowerUpTarget {
            skills: &mut self.skills,
            health: &mut self.health,
            stats: &mut self.stats,
            combo: &mut self.combo,
        });
    }
}

#[test]
fn skill_power_ups_raise_max_uses_without_granting_them() {
    let mut t = Target::new();
    t.apply(PowerUp::ExtraDash);
    t.apply(PowerUp::ExtraJump);
    t.apply(PowerUp::ExtraProjectile);

    for skill in [&t.skills.dash, &t.skills.jump, &t.skills.projectile] {
        assert_eq!(skill.max_uses(), 2);
        assert_eq!(skill.uses_left(), 1);
    }
}

#[test]
fn stat_power_ups() {
    let mut t = Target::new();
    t.health.take_damage(40);
    t.apply(PowerUp::ExtraHealth);
    assert_eq!((t.health.current(), t.health.max()), (70, 110));

    t.apply(PowerUp::IncreaseDamage);
    assert_eq!((t.stats.min_damage, t.stats.max_damage), (12, 16));

    t.apply(PowerUp::TurboDuration);
    assert_eq!(t.combo.turbo_duration(), Duration::from_millis(10_000));

    t.apply(PowerUp::ComboThreshold);
    assert_eq!(t.combo.threshold(), 45);
}

#[test]
fn combo_threshold_never_drops_below_one() {
    let mut t = Target::new();
    for _ in 0..20 {
        t.apply(PowerUp::ComboThreshold);
    }
    assert_eq!(t.combo.threshold(), 1);
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

fn progression_world() -> (World, Entity) {
    let mut world = World::new();
    world.init_resource::<PendingLevelUps>();
    world.init_resource::<LevelUpOffer>();
    world.init_resource::<NextState<Simulation>>();
    world.insert_resource(GameRng::seeded(3));
    world.init_resource::<Messages<MonsterKilled>>();
    world.init_resource::<Messages<UiMessage>>();

    let t = Target::new();
    let player = world
        .spawn((Player, Experience::new(), t.skills, t.health, t.stats, t.combo))
        .id();
    (world, player)
}

fn kill(world: &mut World, exp_reward: u32) {
    let monster = world.spawn_empty().id();
    world.write_message(MonsterKilled { monster, exp_reward, position: Vec2::ZERO });
}

#[test]
fn kills_award_experience_and_queue_level_ups() {
    let (mut world, player) = progression_world();
    kill(&mut world, 10);
    kill(&mut world, 25);

    run_system_once(&mut world, award_experience);

    let exp = world.get::<Experience>(player).unwrap();
    assert_eq!((exp.level(), exp.current()), (2, 15));
    assert_eq!(world.resource::<PendingLevelUps>().0, 1);

    let ui = drain_messages::<UiMessage>(&mut world);
    assert_eq!(ui, vec![UiMessage::Experience { level: 2, current: 15, to_next: 30 }]);
}

#[test]
fn pending_level_up_opens_an_offer_and_pauses() {
    let (mut world, _) = progression_world();
    world.resource_mut::<PendingLevelUps>().0 = 2;

    run_system_once(&mut world, open_level_up);

    assert_eq!(world.resource::<PendingLevelUps>().0, 1);
    let offer = world.resource::<LevelUpOffer>().0.clone();
    assert_eq!(offer.len(), 3);
    assert!(matches!(
        *world.resource::<NextState<Simulation>>(),
        NextState::Pending(Simulation::ChoosingPowerUp)
    ));
    let ui = drain_messages::<UiMessage>(&mut world);
    assert_eq!(ui, vec![UiMessage::ShowLevelUp(offer)]);
}

#[test]
fn number_key_applies_the_matching_power_up() {
    let (mut world, player) = progression_world();
    world.resource_mut::<LevelUpOffer>().0 =
        vec![PowerUp::ExtraJump, PowerUp::IncreaseDamage, PowerUp::ExtraHealth];

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Digit2);
    world.insert_resource(keys);

    run_system_once(&mut world, choose_power_up);

    let stats = world.get::<PlayerStats>(player).unwrap();
    assert_eq!((stats.min_damage, stats.max_damage), (12, 16));
    assert!(world.resource::<LevelUpOffer>().0.is_empty());
    assert!(matches!(
        *world.resource::<NextState<Simulation>>(),
        NextState::Pending(Simulation::Running)
    ));
    let ui = drain_messages::<UiMessage>(&mut world);
    assert_eq!(ui.last(), Some(&UiMessage::HideLevelUp));
}

#[test]
fn other_keys_keep_the_offer_open() {
    let (mut world, _) = progression_world();
    world.resource_mut::<LevelUpOffer>().0 = vec![PowerUp::ExtraJump];

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::Digit3);
    keys.press(KeyCode::KeyF);
    world.insert_resource(keys);

    run_system_once(&mut world, choose_power_up);

    assert_eq!(world.resource::<LevelUpOffer>().0, vec![PowerUp::ExtraJump]);
    assert!(drain_messages::<UiMessage>(&mut world).is_empty());
}
