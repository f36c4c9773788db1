//! Projectiles plugin: pooled throwing blades.
//!
//! # Data flow
//! ```text
//!   OnEnter(InGame)
//!     init_projectile_pool: pre-spawn `projectile_pool` inactive projectiles
//!
//!   FixedUpdate
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  (A) Producer: drive_player_state                                        │
//! │      - writes: SpawnProjectileRequest (origin, facing, damage, boost)    │
//! │                                                                          │
//! │  (B) Consumer: allocate_projectiles                                      │
//! │      - mutates: ProjectilePool.free                                      │
//! │      - mutates: state, Projectile, Transform, velocities, layers         │
//! │                                                                          │
//! │  (C) expire_projectiles: out of the world or lifetime over               │
//! │      - mutates: ProjectileState -> PendingReturn                         │
//! └──────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  (D) Physics emits CollisionStart messages (Avian)                       │
//! │                                                                          │
//! │  (E) process_projectile_hits                                             │
//! │      - per-projectile HitLedger: each monster is hit at most once        │
//! │      - the projectile keeps flying                                       │
//! │                                                                          │
//! │  (F) return_to_pool_commit                                               │
//! │      - writes the inactive invariants, pushes back into the free list    │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The state machine never borrows the pool. It only enqueues intent, and the
//! allocator is the single writer that pops from it.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod messages;
pub mod pool;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub use components::{PooledProjectile, Projectile, ProjectileState};
pub use messages::SpawnProjectileRequest;
pub use pool::ProjectilePool;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProjectilePool>()
            .add_message::<SpawnProjectileRequest>()
            .add_systems(OnEnter(GameState::InGame), pool::init_projectile_pool);

        app.add_systems(
            FixedUpdate,
            (
                allocator::allocate_projectiles.after(crate::plugins::player::drive_player_state),
                collision::expire_projectiles,
            )
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                collision::process_projectile_hits.after(CollisionEventSystems),
                commit::return_to_pool_commit.after(collision::process_projectile_hits),
            )
                .run_if(in_state(GameState::InGame)),
        );
    }
}
