//! Per-turn lifecycle of a player action.
//!
//! ```text
//! Ready ──declare_action──▶ AwaitingRoll ──submit_roll──▶ Resolvable
//!   ▲                                                        │
//!   └──────────────────────────resolve───────────────────────┘
//! ```
//!
//! An action declared while no turn is open waits in `Ready` until
//! `start_turn` opens one. Only one action may be in flight at a time, and
//! every rejected call leaves the orchestrator exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dt_dice::{RollOutcome, SeverityTier, classify_outcome};

use crate::config::TurnConfig;
use crate::coordinator::TurnCoordinator;
use crate::error::{TurnError, TurnResult};
use crate::turn::{DiceRequest, Turn, TurnId};

/// Lifecycle phase of the current action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No action is waiting on a roll.
    Ready,
    /// An action is declared and the open turn wants a roll.
    AwaitingRoll,
    /// The roll is in; the action can be resolved.
    Resolvable,
}

/// What a successful `declare_action` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declared {
    /// The action is recorded and the open turn is waiting for its roll.
    AwaitingRoll,
    /// The action is recorded; no turn is asking for a roll yet.
    Pending,
    /// Identical to the previous declaration inside the debounce window.
    Debounced,
    /// Identical to the action already in flight.
    AlreadyPending,
}

/// A player-declared action awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    /// What the player is trying to do.
    pub text: String,
    /// When it was declared.
    pub declared_at: DateTime<Utc>,
}

/// An action paired with its roll: what the narrator needs to continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAction {
    /// The turn the roll was made in.
    pub turn_id: TurnId,
    /// The action text.
    pub action: String,
    /// The roll.
    pub outcome: RollOutcome,
    /// How well the roll went.
    pub tier: SeverityTier,
}

impl std::fmt::Display for ResolvedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}: {}]", self.action, self.outcome, self.tier)
    }
}

/// Serializable copy of an orchestrator's state, for crash recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// The action in flight.
    pub pending: Option<PendingAction>,
    /// The most recent declaration, for debouncing.
    pub last_declared: Option<PendingAction>,
    /// The roll waiting to be resolved.
    pub resolution: Option<ResolvedAction>,
    /// The coordinator's current turn.
    pub turn: Option<Turn>,
    /// How many turns the coordinator has started.
    pub turns_started: u64,
}

impl OrchestratorSnapshot {
    fn check(&self) -> TurnResult<()> {
        let problem = match self.phase {
            Phase::Ready if self.resolution.is_some() => "ready with a roll waiting",
            Phase::AwaitingRoll if self.pending.is_none() => "awaiting a roll with no action",
            Phase::AwaitingRoll if self.turn.is_none() => "awaiting a roll with no turn",
            Phase::AwaitingRoll if self.resolution.is_some() => "awaiting a roll already made",
            Phase::Resolvable if self.pending.is_none() => "resolvable with no action",
            Phase::Resolvable if self.resolution.is_none() => "resolvable with no roll",
            _ => return Ok(()),
        };
        Err(TurnError::InvalidSnapshot(problem.to_string()))
    }
}

/// Pairs declared actions with exactly one roll per turn.
#[derive(Debug, Clone)]
pub struct ActionDiceOrchestrator {
    config: TurnConfig,
    coordinator: TurnCoordinator,
    phase: Phase,
    pending: Option<PendingAction>,
    last_declared: Option<PendingAction>,
    resolution: Option<ResolvedAction>,
}

impl ActionDiceOrchestrator {
    /// Create an orchestrator in `Ready` with no turn.
    pub fn new(config: TurnConfig) -> Self {
        let coordinator = TurnCoordinator::new().with_reroll_override(config.allow_reroll_override);
        Self {
            config,
            coordinator,
            phase: Phase::Ready,
            pending: None,
            last_declared: None,
            resolution: None,
        }
    }

    /// Rebuild an orchestrator from a snapshot.
    ///
    /// Fails with [`TurnError::InvalidSnapshot`] when the phase disagrees
    /// with the pending action, the resolution or the turn.
    pub fn restore(snapshot: OrchestratorSnapshot, config: TurnConfig) -> TurnResult<Self> {
        snapshot.check()?;
        let coordinator = TurnCoordinator::restore(
            snapshot.turn,
            snapshot.turns_started,
            config.allow_reroll_override,
        );
        Ok(Self {
            config,
            coordinator,
            phase: snapshot.phase,
            pending: snapshot.pending,
            last_declared: snapshot.last_declared,
            resolution: snapshot.resolution,
        })
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> OrchestratorSnapshot {
        OrchestratorSnapshot {
            phase: self.phase,
            pending: self.pending.clone(),
            last_declared: self.last_declared.clone(),
            resolution: self.resolution.clone(),
            turn: self.coordinator.current_turn().cloned(),
            turns_started: self.coordinator.turns_started(),
        }
    }

    /// Declare what the player is doing, timestamped now.
    pub fn declare_action(&mut self, text: &str) -> TurnResult<Declared> {
        self.declare_action_at(text, Utc::now())
    }

    /// Declare what the player is doing at time `now`.
    pub fn declare_action_at(&mut self, text: &str, now: DateTime<Utc>) -> TurnResult<Declared> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TurnError::EmptyAction);
        }

        if let Some(last) = &self.last_declared {
            if last.text == text && now - last.declared_at < self.config.debounce() {
                tracing::debug!(action = text, "duplicate declaration debounced");
                return Ok(Declared::Debounced);
            }
        }

        if let Some(pending) = &self.pending {
            if pending.text == text {
                return Ok(Declared::AlreadyPending);
            }
            tracing::warn!(
                pending = %pending.text,
                rejected = text,
                "conflicting action rejected"
            );
            return Err(TurnError::ConflictingAction {
                pending: pending.text.clone(),
            });
        }

        let action = PendingAction {
            text: text.to_string(),
            declared_at: now,
        };
        self.last_declared = Some(action.clone());
        self.pending = Some(action);

        if self.coordinator.can_roll() {
            self.phase = Phase::AwaitingRoll;
            tracing::debug!(action = text, "action awaiting roll");
            Ok(Declared::AwaitingRoll)
        } else {
            tracing::debug!(action = text, "action pending, no roll requested");
            Ok(Declared::Pending)
        }
    }

    /// Open a new turn, superseding the current one.
    ///
    /// A pending action moves to the new turn; rolls made for the old turn
    /// become stale. A roll waiting to be resolved is kept.
    pub fn start_turn(&mut self, request: Option<DiceRequest>) -> Turn {
        let turn = self.coordinator.start_turn(request).clone();
        if self.pending.is_some() && self.phase != Phase::Resolvable {
            self.phase = Phase::AwaitingRoll;
        }
        turn
    }

    /// Submit a roll made for `turn_id`.
    ///
    /// Returns the severity tier on success; the orchestrator then waits in
    /// `Resolvable` for [`resolve`](Self::resolve).
    pub fn submit_roll(
        &mut self,
        turn_id: TurnId,
        outcome: RollOutcome,
    ) -> TurnResult<SeverityTier> {
        let current = self
            .coordinator
            .current_turn()
            .ok_or(TurnError::NoActiveTurn)?;
        if current.id() != turn_id {
            tracing::warn!(submitted = %turn_id, current = %current.id(), "stale roll discarded");
            return Err(TurnError::StaleTurn {
                submitted: turn_id,
                current: current.id(),
            });
        }
        if !self.coordinator.can_roll() || self.phase == Phase::Resolvable {
            tracing::warn!(turn = %turn_id, "roll rejected, turn already consumed");
            return Err(TurnError::TurnAlreadyConsumed);
        }
        if current.die() != outcome.die() {
            tracing::warn!(
                requested = %current.die(),
                rolled = %outcome.die(),
                "roll made with a different die than requested"
            );
        }
        let Some(pending) = self.pending.as_ref().filter(|_| self.phase == Phase::AwaitingRoll)
        else {
            return Err(TurnError::NoPendingAction);
        };

        let tier = classify_outcome(&outcome);
        let resolved = ResolvedAction {
            turn_id,
            action: pending.text.clone(),
            outcome,
            tier,
        };
        self.coordinator.record_roll();
        tracing::info!(turn = %turn_id, %outcome, %tier, "roll accepted");
        self.resolution = Some(resolved);
        self.phase = Phase::Resolvable;
        Ok(tier)
    }

    /// Hand back the resolved (action, roll, tier) triple and return to `Ready`.
    pub fn resolve(&mut self) -> TurnResult<ResolvedAction> {
        if self.phase != Phase::Resolvable {
            return Err(TurnError::NothingToResolve);
        }
        let resolved = self.resolution.take().ok_or(TurnError::NothingToResolve)?;
        self.pending = None;
        self.phase = Phase::Ready;
        tracing::info!(turn = %resolved.turn_id, action = %resolved.action, "action resolved");
        Ok(resolved)
    }

    /// Take the pending action without a roll, when no turn is asking for one.
    pub fn take_unrolled_action(&mut self) -> TurnResult<PendingAction> {
        match self.phase {
            Phase::Ready => self.pending.take().ok_or(TurnError::NoPendingAction),
            Phase::AwaitingRoll => Err(TurnError::RollRequired {
                die: self
                    .coordinator
                    .current_turn()
                    .map(Turn::die)
                    .unwrap_or_default(),
            }),
            Phase::Resolvable => Err(TurnError::TurnAlreadyConsumed),
        }
    }

    /// Drop whatever is in flight and return to `Ready`. Always succeeds.
    pub fn cancel(&mut self) {
        if self.pending.is_some() || self.resolution.is_some() {
            tracing::info!(phase = ?self.phase, "action cancelled");
        }
        self.pending = None;
        self.last_declared = None;
        self.resolution = None;
        self.phase = Phase::Ready;
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The action in flight, if any.
    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// The roll waiting to be resolved, if any.
    pub fn resolution(&self) -> Option<&ResolvedAction> {
        self.resolution.as_ref()
    }

    /// The coordinator's current turn.
    pub fn current_turn(&self) -> Option<&Turn> {
        self.coordinator.current_turn()
    }

    /// Whether the current turn still has its roll.
    pub fn can_roll(&self) -> bool {
        self.coordinator.can_roll()
    }

    /// Read access to the turn coordinator.
    pub fn coordinator(&self) -> &TurnCoordinator {
        &self.coordinator
    }

    /// The active configuration.
    pub fn config(&self) -> &TurnConfig {
        &self.config
    }
}

impl Default for ActionDiceOrchestrator {
    fn default() -> Self {
        Self::new(TurnConfig::default())
    }
}
