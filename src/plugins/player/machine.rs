//! Player state machine.
//!
//! Each state is a `PlayerState` trait object registered under a `StateId`.
//! States never touch the ECS: they read and write a `PlayerCtx` (a view of
//! the player's body, skills and the level), and push `PlayerCommand`s for
//! everything that has to leave the machine (animation, sound, projectiles).
//!
//! ```text
//!            ┌──────── Space ────────┐
//!            │                       ▼
//!   Idle ◄──axis──► Move ──Space──► Jump ──land──► Idle / Move
//!    │  ▲                            │
//!    │  └──── done / no charge ──────┤  (S / F / D from Idle, Move, Jump)
//!    ├──S──► Dash ──────────────────►┤
//!    ├──F──► Attack ──S (charge)──► Dash
//!    └──D──► Projectile ────────────►┘  (instant: back to Idle or Jump)
//! ```

use std::time::Duration;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::common::facing::Facing;
use crate::common::tunables::PlayerTunables;
use crate::plugins::combat::Swing;
use crate::plugins::combo::TurboBoost;
use crate::plugins::skills::PlayerSkills;
use crate::plugins::world::TileQuery;

use super::health::Invincibility;
use super::states;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Idle,
    Move,
    Jump,
    Dash,
    Attack,
    Projectile,
}

/// Discrete key presses fed to the active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKey {
    Jump,
    Dash,
    Attack,
    Projectile,
    Left,
    Right,
}

/// Side effects a state asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Animate(&'static str),
    StopAnimation,
    Sound(&'static str),
    /// `None` clears the tint.
    Tint(Option<Color>),
    ThrowProjectile { origin: Vec2, facing: Facing },
}

/// The player's physical state as the machine sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    /// Position is driven by the machine (dash), not by physics.
    pub locked: bool,
}

pub struct PlayerCtx<'a> {
    pub body: &'a mut PlayerBody,
    pub grounded: bool,
    /// Held horizontal input in `[-1, 1]`.
    pub axis: f32,
    pub skills: &'a mut PlayerSkills,
    pub invincibility: &'a mut Invincibility,
    pub boost: TurboBoost,
    pub turbocharged: bool,
    pub tunables: &'a PlayerTunables,
    pub terrain: &'a dyn TileQuery,
    pub world_width: f32,
    pub commands: &'a mut Vec<PlayerCommand>,
}

impl PlayerCtx<'_> {
    #[inline]
    pub fn emit(&mut self, command: PlayerCommand) {
        self.commands.push(command);
    }

    /// Where to go when an action ends.
    #[inline]
    pub fn settle(&self) -> StateId {
        if self.grounded { StateId::Idle } else { StateId::Jump }
    }

    /// Falling off a ledge without jumping.
    #[inline]
    pub fn is_falling(&self) -> bool {
        !self.grounded && self.body.velocity.y < -1.0
    }

    pub fn can_dash(&self) -> bool {
        self.skills.dash.is_ready()
    }

    /// Turbocharge makes projectiles free.
    pub fn can_throw(&self) -> bool {
        self.turbocharged || self.skills.projectile.is_ready()
    }
}

/// One player state. Every hook returns the state to switch to, if any.
pub trait PlayerState: Send + Sync {
    fn id(&self) -> StateId;

    fn on_enter(&mut self, _ctx: &mut PlayerCtx) -> Option<StateId> {
        None
    }

    fn on_update(&mut self, ctx: &mut PlayerCtx, dt: Duration) -> Option<StateId>;

    fn on_exit(&mut self, _ctx: &mut PlayerCtx) {}

    fn handle_input(&mut self, _ctx: &mut PlayerCtx, _key: ActionKey) -> Option<StateId> {
        None
    }

    /// The melee swing this state is running, if any.
    fn swing(&self) -> Option<&Swing> {
        None
    }

    fn swing_mut(&mut self) -> Option<&mut Swing> {
        None
    }
}

/// `on_enter` may immediately redirect (e.g. Projectile → Idle). Chains
/// longer than this are a bug in a state and get cut.
const MAX_CHAINED_TRANSITIONS: usize = 8;

#[derive(Component, Default)]
pub struct PlayerStateMachine {
    states: HashMap<StateId, Box<dyn PlayerState>>,
    current: Option<StateId>,
    previous: Option<StateId>,
}

impl PlayerStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// All six player states, not yet entered.
    pub fn with_player_states(t: &PlayerTunables) -> Self {
        Self::new()
            .with_state(states::Idle)
            .with_state(states::Move)
            .with_state(states::Jump::new(t.jump_buffer))
            .with_state(states::Dash::new(t.dash_grace))
            .with_state(states::Attack::new(t.attack_startup))
            .with_state(states::Projectile)
    }

    pub fn with_state(mut self, state: impl PlayerState + 'static) -> Self {
        self.register(Box::new(state));
        self
    }

    /// Later registrations replace earlier ones with the same id.
    pub fn register(&mut self, state: Box<dyn PlayerState>) {
        self.states.insert(state.id(), state);
    }

    #[inline]
    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    #[inline]
    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }

    #[inline]
    pub fn is_in(&self, id: StateId) -> bool {
        self.current == Some(id)
    }

    pub fn is_attacking(&self) -> bool {
        self.is_in(StateId::Attack)
    }

    pub fn active_swing(&self) -> Option<&Swing> {
        self.current
            .and_then(|id| self.states.get(&id))
            .and_then(|state| state.swing())
    }

    pub fn active_swing_mut(&mut self) -> Option<&mut Swing> {
        let id = self.current?;
        self.states.get_mut(&id)?.swing_mut()
    }

    /// Switch states. Unknown ids are ignored with a warning; switching to
    /// the current state does nothing.
    pub fn set_state(&mut self, ctx: &mut PlayerCtx, id: StateId) {
        let mut next = id;
        for _ in 0..MAX_CHAINED_TRANSITIONS {
            if !self.states.contains_key(&next) {
                warn!("Player state {next:?} is not registered");
                return;
            }
            if self.current == Some(next) {
                return;
            }

            if let Some(current) = self.current {
                if let Some(state) = self.states.get_mut(&current) {
                    state.on_exit(ctx);
                }
            }
            self.previous = self.current;
            self.current = Some(next);
            debug!("Player {:?} -> {next:?}", self.previous);

            let Some(state) = self.states.get_mut(&next) else {
                return;
            };
            match state.on_enter(ctx) {
                Some(redirect) => next = redirect,
                None => return,
            }
        }
        warn!("Player transition chain cut at {next:?}");
    }

    pub fn update(&mut self, ctx: &mut PlayerCtx, dt: Duration) {
        let Some(id) = self.current else {
            return;
        };
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        if let Some(next) = state.on_update(ctx, dt) {
            self.set_state(ctx, next);
        }
    }

    pub fn handle_input(&mut self, ctx: &mut PlayerCtx, key: ActionKey) {
        let Some(id) = self.current else {
            return;
        };
        let Some(state) = self.states.get_mut(&id) else {
            return;
        };
        if let Some(next) = state.handle_input(ctx, key) {
            self.set_state(ctx, next);
        }
    }
}
