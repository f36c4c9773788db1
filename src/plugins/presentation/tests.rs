use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;

fn world_with_requests(reqs: &[PresentationRequest]) -> World {
    let mut world = World::new();
    world.init_resource::<Messages<PresentationRequest>>();
    for r in reqs {
        world.write_message(*r);
    }
    world
}

#[test]
fn floating_number_spawns_text() {
    let mut world = world_with_requests(&[PresentationRequest::FloatingNumber {
        position: Vec2::new(10.0, 20.0),
        value: 24,
        style: NumberStyle::TurboHit,
    }]);

    run_system_once(&mut world, apply_presentation_requests);

    let mut q = world.query::<(&Text2d, &Transform, &TextColor)>();
    let (text, tf, color) = q.single(&world).unwrap();
    assert_eq!(text.0, "24");
    assert_eq!(tf.translation.truncate(), Vec2::new(10.0, 20.0));
    assert_eq!(color.0, NumberStyle::TurboHit.color());
}

#[test]
fn animation_and_stop_update_current_clip() {
    let mut world = World::new();
    world.init_resource::<Messages<PresentationRequest>>();
    let e = world.spawn(CurrentAnimation::default()).id();

    world.write_message(PresentationRequest::Animation { entity: e, clip: "run" });
    run_system_once(&mut world, apply_presentation_requests);
    assert_eq!(world.get::<CurrentAnimation>(e).unwrap().clip, Some("run"));

    world.write_message(PresentationRequest::StopAnimation { entity: e });
    run_system_once(&mut world, apply_presentation_requests);
    assert_eq!(world.get::<CurrentAnimation>(e).unwrap().clip, None);
}

#[test]
fn clearing_a_tint_restores_base_colour() {
    let mut world = World::new();
    world.init_resource::<Messages<PresentationRequest>>();
    let base = Color::srgb(0.2, 0.75, 0.9);
    let e = world
        .spawn((Sprite { color: base, ..default() }, BaseColor(base)))
        .id();

    let blue = Color::srgb(0.0, 0.0, 1.0);
    world.write_message(PresentationRequest::Tint { entity: e, color: Some(blue) });
    run_system_once(&mut world, apply_presentation_requests);
    assert_eq!(world.get::<Sprite>(e).unwrap().color, blue);

    world.write_message(PresentationRequest::Tint { entity: e, color: None });
    run_system_once(&mut world, apply_presentation_requests);
    assert_eq!(world.get::<Sprite>(e).unwrap().color, base);
}

#[test]
fn requests_for_missing_entities_are_ignored() {
    let mut world = World::new();
    world.init_resource::<Messages<PresentationRequest>>();
    let gone = world.spawn_empty().id();
    world.despawn(gone);

    world.write_message(PresentationRequest::Animation { entity: gone, clip: "run" });
    world.write_message(PresentationRequest::Tint { entity: gone, color: None });
    run_system_once(&mut world, apply_presentation_requests);
}

#[test]
fn floating_text_rises_fades_and_despawns() {
    let mut world = World::new();
    let e = world
        .spawn((
            FloatingText {
                timer: Timer::from_seconds(FLOAT_SECS, TimerMode::Once),
                origin_y: 0.0,
            },
            Transform::default(),
            TextColor(Color::WHITE),
        ))
        .id();

    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs(1));
    world.insert_resource(time);
    run_system_once(&mut world, animate_floating_text);

    let y = world.get::<Transform>(e).unwrap().translation.y;
    assert!(y > 0.0 && y < FLOAT_RISE);
    let alpha = world.get::<TextColor>(e).unwrap().0.alpha();
    assert!(alpha > 0.0 && alpha < 1.0);

    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs(1));
    world.insert_resource(time);
    run_system_once(&mut world, animate_floating_text);
    assert!(world.get_entity(e).is_err());
}
