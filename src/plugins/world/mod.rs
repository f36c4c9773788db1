//! World plugin: builds the tile level, its edge walls and monster spawners.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::Occluder2d;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::MonsterSpawner;

pub mod platforms;

pub use platforms::{LEVEL, PlatformMap, Tile, TileQuery, TileRect, TileRun};

pub fn plugin(app: &mut App) {
    let tile_size = app.world().resource::<Tunables>().world.tile_size;
    app.insert_resource(PlatformMap::from_layout(&LEVEL, tile_size));

    app.add_systems(
        OnEnter(GameState::InGame),
        (spawn_level, spawn_edges, spawn_spawners),
    );
}

fn terrain_layers(layer: Layer) -> CollisionLayers {
    CollisionLayers::new(layer, [Layer::Player, Layer::Enemy])
}

fn spawn_level(mut commands: Commands, map: Res<PlatformMap>) {
    for (i, run) in map.solid_runs().into_iter().enumerate() {
        let size = run.rect.max - run.rect.min;
        let center = run.rect.center();
        let (layer, color, name) = match run.tile {
            Tile::Wall => (Layer::Wall, Color::srgb(0.33, 0.3, 0.36), "Wall"),
            _ => (Layer::Floor, Color::srgb(0.25, 0.27, 0.33), "Floor"),
        };

        commands.spawn((
            Name::new(format!("{name}{i}")),
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            terrain_layers(layer),
            Occluder2d::circle(size.min_element() * 0.5),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// Invisible walls just outside the left and right map edges.
fn spawn_edges(mut commands: Commands, map: Res<PlatformMap>) {
    let thickness = map.tile_size();
    let height = map.height() * 2.0;

    for (name, x) in [
        ("EdgeLeft", -thickness * 0.5),
        ("EdgeRight", map.width() + thickness * 0.5),
    ] {
        commands.spawn((
            Name::new(name),
            Transform::from_xyz(x, map.height() * 0.5, 0.0),
            RigidBody::Static,
            Collider::rectangle(thickness, height),
            terrain_layers(Layer::Wall),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn spawn_spawners(mut commands: Commands, map: Res<PlatformMap>, tunables: Res<Tunables>) {
    let t = &tunables.monsters;
    for (i, point) in map.spawner_points().into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Spawner{i}")),
            MonsterSpawner::new(t.spawn_period, t.spawn_cap),
            Transform::from_xyz(point.x, point.y, 0.0),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

#[cfg(test)]
mod tests;
