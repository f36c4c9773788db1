use avian2d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;

fn small_map() -> PlatformMap {
    // 4 x 3, bottom row solid, a wall tile above col 2.
    PlatformMap::from_layout(&["S...", "..|.", "####"], 10.0)
}

#[test]
fn layout_rows_are_flipped_to_world_space() {
    let map = small_map();
    assert_eq!(map.width(), 40.0);
    assert_eq!(map.height(), 30.0);
    assert_eq!(map.tile(0, 0), Tile::Floor);
    assert_eq!(map.tile(2, 1), Tile::Wall);
    assert_eq!(map.tile(0, 2), Tile::Spawner);
    assert_eq!(map.tile(9, 9), Tile::Empty);
}

#[test]
fn tile_at_reports_solid_bounds_only() {
    let map = small_map();
    assert_eq!(
        map.tile_at(Vec2::new(25.0, 15.0)),
        Some(TileRect { min: Vec2::new(20.0, 10.0), max: Vec2::new(30.0, 20.0) })
    );
    assert_eq!(map.tile_at(Vec2::new(5.0, 15.0)), None);
    // Spawners are not solid.
    assert_eq!(map.tile_at(Vec2::new(5.0, 25.0)), None);
    assert_eq!(map.tile_at(Vec2::new(-1.0, 5.0)), None);
    assert_eq!(map.tile_at(Vec2::new(500.0, 5.0)), None);
}

#[test]
fn solid_runs_merge_horizontally() {
    let runs = small_map().solid_runs();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].tile, Tile::Floor);
    assert_eq!(runs[0].rect, TileRect { min: Vec2::ZERO, max: Vec2::new(40.0, 10.0) });
    assert_eq!(runs[1].tile, Tile::Wall);
}

#[test]
fn level_fills_the_world_size() {
    let t = crate::common::tunables::WorldTunables::default();
    let map = PlatformMap::from_layout(&LEVEL, t.tile_size);
    assert_eq!(map.width(), t.width);
    assert_eq!(map.height(), t.height);
    assert!(!map.spawner_points().is_empty());
}

#[test]
fn spawns_level_colliders_and_edges() {
    let mut world = World::new();
    world.insert_resource(small_map());
    run_system_once(&mut world, spawn_level);
    run_system_once(&mut world, spawn_edges);

    let statics = world
        .query::<&RigidBody>()
        .iter(&world)
        .filter(|rb| matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(statics, 4);

    let walls = world
        .query::<&CollisionLayers>()
        .iter(&world)
        .filter(|l| l.memberships.has_all(Layer::Wall))
        .count();
    assert_eq!(walls, 3);
}
