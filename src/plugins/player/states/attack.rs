use std::collections::VecDeque;
use std::time::Duration;

use bevy::prelude::*;

use crate::plugins::combat::{Swing, SwingKind};
use crate::plugins::player::machine::{ActionKey, PlayerCommand, PlayerCtx, PlayerState, StateId};

/// Wind-up, then a queue of swings played back to back.
#[derive(Debug, Clone)]
pub struct AttackSequence {
    startup: Timer,
    queue: VecDeque<SwingKind>,
    current: Option<Swing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep {
    Waiting,
    Started(SwingKind),
    Finished,
}

impl AttackSequence {
    pub fn new(startup: Duration, swings: &[SwingKind]) -> Self {
        Self {
            startup: Timer::new(startup, TimerMode::Once),
            queue: swings.iter().copied().collect(),
            current: None,
        }
    }

    pub fn tick(&mut self, dt: Duration) -> SequenceStep {
        if !self.startup.is_finished() {
            self.startup.tick(dt);
            if !self.startup.is_finished() {
                return SequenceStep::Waiting;
            }
            return self.start_next();
        }

        let Some(swing) = self.current.as_mut() else {
            return SequenceStep::Finished;
        };
        if swing.tick(dt) {
            self.start_next()
        } else {
            SequenceStep::Waiting
        }
    }

    fn start_next(&mut self) -> SequenceStep {
        match self.queue.pop_front() {
            Some(kind) => {
                self.current = Some(Swing::new(kind));
                SequenceStep::Started(kind)
            }
            None => {
                self.current = None;
                SequenceStep::Finished
            }
        }
    }

    pub fn swing(&self) -> Option<&Swing> {
        self.current.as_ref()
    }

    pub fn swing_mut(&mut self) -> Option<&mut Swing> {
        self.current.as_mut()
    }
}

/// Melee combo: horizontal slash then vertical slash. Can be cancelled
/// into a dash.
pub struct Attack {
    startup: Duration,
    sequence: Option<AttackSequence>,
}

impl Attack {
    pub const SWINGS: [SwingKind; 2] = [SwingKind::SlashHorizontal, SwingKind::SlashVertical];

    pub fn new(startup: Duration) -> Self {
        Self { startup, sequence: None }
    }
}

impl PlayerState for Attack {
    fn id(&self) -> StateId {
        StateId::Attack
    }

    fn on_enter(&mut self, ctx: &mut PlayerCtx) -> Option<StateId> {
        self.sequence = Some(AttackSequence::new(self.startup, &Self::SWINGS));
        if ctx.grounded {
            ctx.body.velocity.x = 0.0;
        }
        ctx.emit(PlayerCommand::Animate("attack-windup"));
        None
    }

    fn on_update(&mut self, ctx: &mut PlayerCtx, dt: Duration) -> Option<StateId> {
        if ctx.grounded {
            ctx.body.velocity.x = 0.0;
        }
        ctx.body.velocity.y = ctx.body.velocity.y.max(-ctx.tunables.max_fall_speed);

        let Some(sequence) = self.sequence.as_mut() else {
            return Some(ctx.settle());
        };
        match sequence.tick(dt) {
            SequenceStep::Waiting => None,
            SequenceStep::Started(kind) => {
                ctx.emit(PlayerCommand::Animate(kind.attack_animation()));
                ctx.emit(PlayerCommand::Sound("slash"));
                None
            }
            SequenceStep::Finished => Some(ctx.settle()),
        }
    }

    fn on_exit(&mut self, _ctx: &mut PlayerCtx) {
        self.sequence = None;
    }

    fn handle_input(&mut self, ctx: &mut PlayerCtx, key: ActionKey) -> Option<StateId> {
        match key {
            ActionKey::Dash => ctx.can_dash().then_some(StateId::Dash),
            _ => None,
        }
    }

    fn swing(&self) -> Option<&Swing> {
        self.sequence.as_ref().and_then(AttackSequence::swing)
    }

    fn swing_mut(&mut self) -> Option<&mut Swing> {
        self.sequence.as_mut().and_then(AttackSequence::swing_mut)
    }
}
