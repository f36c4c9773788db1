//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod combat;
pub mod combo;
pub mod core;
pub mod enemies;
pub mod hud;
pub mod physics;
pub mod player;
pub mod presentation;
pub mod progression;
pub mod projectiles;
pub mod skills;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    presentation::plugin(app);
    hud::plugin(app);
    world::plugin(app);
    skills::plugin(app);
    player::plugin(app);
    combat::plugin(app);
    combo::plugin(app);
    enemies::plugin(app);
    progression::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    hud::view::plugin(app);
}
