//! The turn state machine.
//!
//! `Idle` until the first turn starts, then `Open` until the turn's roll is
//! recorded, then `Consumed`. Starting another turn replaces the current one;
//! there is no explicit close.
//!
//! Asking whether a roll is allowed ([`TurnCoordinator::can_roll`]) is kept
//! separate from recording one ([`TurnCoordinator::record_roll`]); callers
//! check the former before doing the latter.

use serde::{Deserialize, Serialize};

use crate::turn::{DiceRequest, Turn};

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// No turn has been started.
    Idle,
    /// A turn is open and its roll is unused.
    Open,
    /// The current turn's roll has been used.
    Consumed,
}

/// Sole owner of turn state.
#[derive(Debug, Clone, Default)]
pub struct TurnCoordinator {
    current: Option<Turn>,
    turns_started: u64,
    allow_reroll_override: bool,
}

impl TurnCoordinator {
    /// Create an idle coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a coordinator whose `can_roll` always answers true.
    ///
    /// Automated tests use this to roll repeatedly in one turn.
    pub fn with_reroll_override(mut self, allow: bool) -> Self {
        self.allow_reroll_override = allow;
        self
    }

    pub(crate) fn restore(
        current: Option<Turn>,
        turns_started: u64,
        allow_reroll_override: bool,
    ) -> Self {
        Self {
            current,
            turns_started,
            allow_reroll_override,
        }
    }

    /// Start a fresh turn, superseding the current one.
    pub fn start_turn(&mut self, request: Option<DiceRequest>) -> &Turn {
        let turn = Turn::start(request);
        self.turns_started += 1;
        tracing::info!(
            turn = %turn.id(),
            die = %turn.die(),
            number = self.turns_started,
            "turn started"
        );
        self.current.insert(turn)
    }

    /// Whether a roll may be made against the current turn.
    pub fn can_roll(&self) -> bool {
        if self.allow_reroll_override {
            return self.current.is_some();
        }
        self.state() == TurnState::Open
    }

    /// Mark the current turn's roll as used. No effect if already used or idle.
    pub fn record_roll(&mut self) {
        match self.current.as_mut() {
            Some(turn) => {
                if turn.mark_rolled() {
                    tracing::debug!(turn = %turn.id(), "turn consumed");
                } else {
                    tracing::debug!(turn = %turn.id(), "roll already recorded for turn");
                }
            }
            None => tracing::debug!("record_roll with no turn"),
        }
    }

    /// The current turn, if any.
    pub fn current_turn(&self) -> Option<&Turn> {
        self.current.as_ref()
    }

    /// The state of the current turn.
    pub fn state(&self) -> TurnState {
        match &self.current {
            None => TurnState::Idle,
            Some(turn) if turn.has_rolled() => TurnState::Consumed,
            Some(_) => TurnState::Open,
        }
    }

    /// How many turns have been started.
    pub fn turns_started(&self) -> u64 {
        self.turns_started
    }

    /// Whether the reroll override is on.
    pub fn reroll_override(&self) -> bool {
        self.allow_reroll_override
    }
}
