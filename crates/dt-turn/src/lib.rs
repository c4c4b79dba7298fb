//! Turn-gated dice roll coordination for DiceTales.
//!
//! Narrator text is scanned for roll requests ([`infer`]), a request opens a
//! [`Turn`] on the [`TurnCoordinator`], and the [`ActionDiceOrchestrator`]
//! pairs the player's declared action with exactly one roll before handing
//! the resolved triple back to the [`Narrator`]. [`TaleSession`] wires the
//! whole loop together.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod infer;
pub mod narrator;
pub mod orchestrator;
pub mod session;
pub mod turn;

pub use config::TurnConfig;
pub use coordinator::{TurnCoordinator, TurnState};
pub use error::{TurnError, TurnResult};
pub use infer::{Inference, infer, infer_request};
pub use narrator::{NarrationPrompt, Narrator, NarratorError, ScriptedNarrator};
pub use orchestrator::{
    ActionDiceOrchestrator, Declared, OrchestratorSnapshot, Phase, PendingAction, ResolvedAction,
};
pub use session::{Narration, TaleSession, TurnReport};
pub use turn::{DiceRequest, Turn, TurnId};
