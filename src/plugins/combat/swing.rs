//! Melee swings: frame timing, hitbox window and the per-swing hit ledger.

use std::time::Duration;

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

/// The hitbox is live on frames `0..ACTIVE_FRAMES` of every swing.
pub const ACTIVE_FRAMES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwingKind {
    SlashHorizontal,
    SlashVertical,
    DashStrike,
}

impl SwingKind {
    pub fn frames(self) -> u32 {
        match self {
            Self::SlashHorizontal | Self::SlashVertical => 6,
            Self::DashStrike => 8,
        }
    }

    pub fn frame_time(self) -> Duration {
        match self {
            Self::SlashHorizontal | Self::SlashVertical => Duration::from_millis(60),
            Self::DashStrike => Duration::from_millis(50),
        }
    }

    pub fn duration(self) -> Duration {
        self.frame_time() * self.frames()
    }

    pub fn attack_animation(self) -> &'static str {
        match self {
            Self::SlashHorizontal => "slash-horizontal",
            Self::SlashVertical => "slash-vertical",
            Self::DashStrike => "dash-strike",
        }
    }

    /// Impact effect drawn on the monster.
    pub fn hit_animation(self) -> &'static str {
        match self {
            Self::SlashHorizontal => "slash-horizontal-hit",
            Self::SlashVertical => "slash-vertical-hit",
            Self::DashStrike => "dash-strike-hit",
        }
    }

    /// Hitbox size and offset in front of the player (for `Facing::Right`).
    pub fn hitbox(self) -> (Vec2, Vec2) {
        match self {
            Self::SlashHorizontal => (Vec2::new(56.0, 28.0), Vec2::new(36.0, 0.0)),
            Self::SlashVertical => (Vec2::new(36.0, 60.0), Vec2::new(26.0, 8.0)),
            Self::DashStrike => (Vec2::new(64.0, 40.0), Vec2::new(16.0, 0.0)),
        }
    }
}

/// Monsters one swing has already hit.
#[derive(Debug, Clone, Default)]
pub struct HitLedger(HashSet<Entity>);

impl HitLedger {
    #[inline]
    pub fn contains(&self, target: Entity) -> bool {
        self.0.contains(&target)
    }

    /// Returns false if `target` was already recorded.
    #[inline]
    pub fn record(&mut self, target: Entity) -> bool {
        self.0.insert(target)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Swing {
    kind: SwingKind,
    elapsed: Duration,
    ledger: HitLedger,
}

impl Swing {
    pub fn new(kind: SwingKind) -> Self {
        Self { kind, elapsed: Duration::ZERO, ledger: HitLedger::default() }
    }

    #[inline]
    pub fn kind(&self) -> SwingKind {
        self.kind
    }

    /// Advance; returns true once the last frame has played.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.kind.duration());
        self.is_finished()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.kind.duration()
    }

    pub fn frame(&self) -> u32 {
        let per = self.kind.frame_time().as_nanos().max(1);
        let frame = (self.elapsed.as_nanos() / per) as u32;
        frame.min(self.kind.frames() - 1)
    }

    pub fn is_hitbox_active(&self) -> bool {
        !self.is_finished() && self.frame() < ACTIVE_FRAMES
    }

    pub fn ledger(&self) -> &HitLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut HitLedger {
        &mut self.ledger
    }
}
