//! Global state machines.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    GameOver,
}

/// Whether the session is simulating or frozen behind the level-up overlay.
///
/// Only exists while in `GameState::InGame`, so leaving the session also
/// drops any pending pause.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, SubStates, Default)]
#[source(GameState = GameState::InGame)]
pub enum Simulation {
    #[default]
    Running,
    ChoosingPowerUp,
}
