use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<GameRng>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn keeps_a_seeded_rng_inserted_earlier() {
    let mut app = App::new();
    app.insert_resource(GameRng::seeded(42));
    core::plugin(&mut app);

    let mut expected = GameRng::seeded(42);
    let mut rng = app.world_mut().resource_mut::<GameRng>();
    assert_eq!(rng.roll(0, 1000), expected.roll(0, 1000));
}
