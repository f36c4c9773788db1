//! Test helpers.
//!
//! `World::run_system_once` executes a system without building a schedule.
//! Systems that use `Commands` only enqueue structural changes, so we flush
//! afterwards to make them visible to assertions.

use std::time::Duration;

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Insert a `Time<Fixed>` whose last delta is `dt`.
pub fn insert_fixed_delta(world: &mut World, dt: Duration) {
    let mut time = Time::<Fixed>::default();
    time.advance_by(dt);
    world.insert_resource(time);
}

/// Drain every buffered message of type `M`.
pub fn drain_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    world
        .resource_mut::<Messages<M>>()
        .drain()
        .collect()
}
