use bevy::ecs::message::Messages;

use super::view::*;
use super::*;
use crate::common::test_utils::run_system_once;

#[test]
fn combo_shows_then_hides_on_expiry_or_reset() {
    let mut hud = HudModel::default();
    hud.apply(&UiMessage::Combo(3));
    assert_eq!(hud.combo, Some(3));

    hud.apply(&UiMessage::ComboExpired);
    assert_eq!(hud.combo, None);

    hud.apply(&UiMessage::Combo(1));
    hud.apply(&UiMessage::Combo(0));
    assert_eq!(hud.combo, None);
}

#[test]
fn turbo_meter_clamps_and_clears() {
    let mut hud = HudModel::default();
    hud.apply(&UiMessage::TurboMeter(1.4));
    assert_eq!(hud.turbo_meter, Some(1.0));
    hud.apply(&UiMessage::TurboEnded);
    assert_eq!(hud.turbo_meter, None);
}

#[test]
fn skill_icons_are_tracked_separately() {
    let mut hud = HudModel::default();
    hud.apply(&UiMessage::CooldownOverlay { skill: Skill::Dash, fraction: 0.25 });
    hud.apply(&UiMessage::UsesBadge { skill: Skill::Jump, uses: 2 });

    assert_eq!(hud.icon(Skill::Dash).overlay, 0.25);
    assert_eq!(hud.icon(Skill::Dash).badge, None);
    assert_eq!(hud.icon(Skill::Jump).badge, Some(2));
    assert_eq!(hud.icon(Skill::Projectile), &SkillIcon::default());
}

#[test]
fn level_up_offer_round_trip() {
    let mut hud = HudModel::default();
    let offer = vec![PowerUp::ExtraDash, PowerUp::IncreaseDamage];
    hud.apply(&UiMessage::ShowLevelUp(offer.clone()));
    assert_eq!(hud.level_up_offer, Some(offer));
    hud.apply(&UiMessage::HideLevelUp);
    assert_eq!(hud.level_up_offer, None);
}

#[test]
fn system_applies_messages_in_order() {
    let mut world = World::new();
    world.init_resource::<Messages<UiMessage>>();
    world.init_resource::<HudModel>();

    world.write_message(UiMessage::Health { current: 100, max: 100 });
    world.write_message(UiMessage::Health { current: 85, max: 100 });
    world.write_message(UiMessage::ShowGameOver);

    run_system_once(&mut world, apply_ui_messages);

    let hud = world.resource::<HudModel>();
    assert_eq!((hud.health, hud.max_health), (85, 100));
    assert!(hud.game_over);
}

// -----------------------------------------------------------------------------
// View
// -----------------------------------------------------------------------------

#[test]
fn status_line_shows_vitals_and_optional_counters() {
    let mut hud = HudModel::default();
    hud.apply(&UiMessage::Health { current: 70, max: 100 });
    hud.apply(&UiMessage::Experience { level: 2, current: 5, to_next: 40 });
    hud.apply(&UiMessage::UsesBadge { skill: Skill::Dash, uses: 2 });
    hud.apply(&UiMessage::CooldownOverlay { skill: Skill::Dash, fraction: 0.5 });

    let line = status_line(&hud);
    assert!(line.starts_with("HP 70/100  Lv 2  XP 5/40"));
    assert!(line.contains("Dash x2 (50%)"));
    assert!(!line.contains("Combo"));
    assert!(!line.contains("Turbo"));

    hud.apply(&UiMessage::Combo(4));
    hud.apply(&UiMessage::TurboMeter(0.75));
    let line = status_line(&hud);
    assert!(line.contains("Combo x4"));
    assert!(line.contains("Turbo 75%"));
}

#[test]
fn overlay_lists_the_offer_and_game_over_takes_precedence() {
    let mut hud = HudModel::default();
    assert_eq!(overlay_text(&hud), None);

    hud.apply(&UiMessage::Experience { level: 3, current: 0, to_next: 60 });
    hud.apply(&UiMessage::ShowLevelUp(vec![PowerUp::ExtraDash, PowerUp::ExtraHealth]));
    let text = overlay_text(&hud).unwrap();
    assert!(text.starts_with("Level 3!"));
    assert!(text.contains("1) Gain an extra dash"));
    assert!(text.contains("2) Increase max health"));

    hud.apply(&UiMessage::ShowGameOver);
    assert!(overlay_text(&hud).unwrap().starts_with("Game over"));
}

#[test]
fn refresh_writes_text_and_toggles_the_overlay() {
    let mut world = World::new();
    world.init_resource::<HudModel>();
    let status = world.spawn((HudStatusText, Text::default())).id();
    let overlay = world
        .spawn((HudOverlayText, Text::default(), Visibility::Hidden))
        .id();

    world.resource_mut::<HudModel>().apply(&UiMessage::ShowGameOver);
    run_system_once(&mut world, refresh_hud_view);

    assert!(world.get::<Text>(status).unwrap().0.starts_with("HP 0/0"));
    assert!(world.get::<Text>(overlay).unwrap().0.starts_with("Game over"));
    assert_eq!(world.get::<Visibility>(overlay), Some(&Visibility::Inherited));

    *world.resource_mut::<HudModel>() = HudModel::default();
    run_system_once(&mut world, refresh_hud_view);
    assert_eq!(world.get::<Visibility>(overlay), Some(&Visibility::Hidden));
}
