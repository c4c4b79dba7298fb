//! A story session: narrator, dice and orchestrator wired together.
//!
//! `TaleSession` runs the loop
//! narrator text → inference → turn → declared action → roll → resolution →
//! narrator text. Narrator calls are the only suspension points; everything
//! else returns immediately.

use dt_dice::{DieType, RandomSource, RollOutcome, SeverityTier};

use crate::config::TurnConfig;
use crate::error::{TurnError, TurnResult};
use crate::infer::infer_request;
use crate::narrator::{NarrationPrompt, Narrator};
use crate::orchestrator::{ActionDiceOrchestrator, Declared, Phase, ResolvedAction};
use crate::turn::{DiceRequest, Turn};

/// Narrator text and the roll it asks for, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    /// The narrator's text.
    pub text: String,
    /// The roll the text asks for.
    pub request: Option<DiceRequest>,
}

/// The outcome of advancing the story past a resolved action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// The action, roll and tier that were handed to the narrator.
    pub resolved: ResolvedAction,
    /// What the narrator said next.
    pub narration: Narration,
}

/// An interactive story session.
pub struct TaleSession<N, R> {
    narrator: N,
    roller: R,
    orchestrator: ActionDiceOrchestrator,
    last_narration: Option<String>,
}

impl<N: Narrator, R: RandomSource> TaleSession<N, R> {
    /// Create a session from a narrator, a random source and a config.
    pub fn new(narrator: N, roller: R, config: TurnConfig) -> Self {
        Self {
            narrator,
            roller,
            orchestrator: ActionDiceOrchestrator::new(config),
            last_narration: None,
        }
    }

    /// Ask the narrator to open the story.
    pub async fn open(&mut self, premise: &str) -> TurnResult<Narration> {
        self.narrate(NarrationPrompt::Opening(premise.to_string()))
            .await
    }

    /// Declare the player's next action.
    pub fn declare(&mut self, action: &str) -> TurnResult<Declared> {
        self.orchestrator.declare_action(action)
    }

    /// Open a turn for `die` even though the narrator did not ask for one.
    pub fn force_roll(&mut self, die: DieType) -> Turn {
        tracing::info!(%die, "roll forced");
        self.orchestrator.start_turn(Some(DiceRequest::forced(die)))
    }

    /// The die the open turn is waiting on, if a roll is wanted.
    pub fn roll_requested(&self) -> Option<DieType> {
        self.orchestrator
            .current_turn()
            .filter(|_| self.orchestrator.can_roll())
            .map(Turn::die)
    }

    /// Roll the die the current turn asks for and submit it.
    ///
    /// The die is only rolled once the roll is sure to be accepted.
    pub fn roll(&mut self) -> TurnResult<(RollOutcome, SeverityTier)> {
        let turn = self
            .orchestrator
            .current_turn()
            .ok_or(TurnError::NoActiveTurn)?;
        let (turn_id, die) = (turn.id(), turn.die());
        if !self.orchestrator.can_roll() || self.orchestrator.phase() == Phase::Resolvable {
            return Err(TurnError::TurnAlreadyConsumed);
        }
        if self.orchestrator.phase() != Phase::AwaitingRoll {
            return Err(TurnError::NoPendingAction);
        }
        let outcome = self.roller.roll_die(die)?;
        let tier = self.orchestrator.submit_roll(turn_id, outcome)?;
        Ok((outcome, tier))
    }

    /// Hand the resolved action to the narrator and move to the next turn.
    ///
    /// If the narrator fails the roll stays resolvable, so the call can be
    /// repeated.
    pub async fn advance(&mut self) -> TurnResult<TurnReport> {
        let resolved = self
            .orchestrator
            .resolution()
            .cloned()
            .ok_or(TurnError::NothingToResolve)?;
        let narration = self
            .narrate(NarrationPrompt::Continuation(resolved))
            .await?;
        let resolved = self.orchestrator.resolve()?;
        Ok(TurnReport {
            resolved,
            narration,
        })
    }

    /// Narrate the pending action directly when no roll is wanted.
    ///
    /// The action is settled before any roll the reply asks for opens a
    /// turn, so that roll waits for a fresh declaration.
    pub async fn narrate_action(&mut self) -> TurnResult<Narration> {
        if self.orchestrator.phase() == Phase::Resolvable {
            return Err(TurnError::TurnAlreadyConsumed);
        }
        let action = match self.orchestrator.pending_action() {
            Some(pending) if self.roll_requested().is_none() => pending.text.clone(),
            Some(_) => {
                return Err(TurnError::RollRequired {
                    die: self.roll_requested().unwrap_or_default(),
                });
            }
            None => return Err(TurnError::NoPendingAction),
        };
        let text = self.generate(NarrationPrompt::Action(action)).await?;
        self.orchestrator.take_unrolled_action()?;
        Ok(self.accept(text))
    }

    /// Drop the action in flight.
    pub fn cancel(&mut self) {
        self.orchestrator.cancel();
    }

    /// The orchestrator behind this session.
    pub fn orchestrator(&self) -> &ActionDiceOrchestrator {
        &self.orchestrator
    }

    /// The narrator behind this session.
    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    /// The most recent narrator text.
    pub fn last_narration(&self) -> Option<&str> {
        self.last_narration.as_deref()
    }

    async fn narrate(&mut self, prompt: NarrationPrompt) -> TurnResult<Narration> {
        let text = self.generate(prompt).await?;
        Ok(self.accept(text))
    }

    async fn generate(&mut self, prompt: NarrationPrompt) -> TurnResult<String> {
        tracing::debug!(%prompt, "asking narrator");
        self.narrator.generate(&prompt).await.map_err(Into::into)
    }

    /// Record narrator text and open a turn for any roll it asks for.
    fn accept(&mut self, text: String) -> Narration {
        let request = infer_request(&text);
        if let Some(req) = &request {
            self.orchestrator.start_turn(Some(req.clone()));
        }
        self.last_narration = Some(text.clone());
        Narration { text, request }
    }
}
