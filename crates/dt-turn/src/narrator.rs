//! The narrator seam.
//!
//! The narrator is whatever produces story text: a hosted model, a local
//! one, or a script. This crate only hands it a [`NarrationPrompt`] and reads
//! the text back; prompt templating and retry policy live behind the trait.

use std::collections::VecDeque;

use async_trait::async_trait;
use thiserror::Error;

use crate::orchestrator::ResolvedAction;

/// A narrator failure, reported as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NarratorError {
    message: String,
}

impl NarratorError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What the narrator is asked to continue from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationPrompt {
    /// The opening premise of a story.
    Opening(String),
    /// A player action that needed no roll.
    Action(String),
    /// A player action resolved by a roll.
    Continuation(ResolvedAction),
}

impl std::fmt::Display for NarrationPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opening(premise) => write!(f, "opening: {premise}"),
            Self::Action(action) => write!(f, "action: {action}"),
            Self::Continuation(resolved) => write!(
                f,
                "action: {} | roll: {} on a {} | outcome: {}",
                resolved.action,
                resolved.outcome.result(),
                resolved.outcome.die(),
                resolved.tier.as_str()
            ),
        }
    }
}

/// Produces narrative text for a prompt.
#[async_trait]
pub trait Narrator: Send {
    /// Generate the next piece of narration.
    async fn generate(&mut self, prompt: &NarrationPrompt) -> Result<String, NarratorError>;
}

/// A narrator that replays fixed lines in order.
///
/// Every prompt it receives is kept, so tests can check what was asked.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNarrator {
    lines: VecDeque<String>,
    prompts: Vec<NarrationPrompt>,
}

impl ScriptedNarrator {
    /// Create a narrator that will answer with `lines`, one per prompt.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Parse a script: narration blocks separated by blank lines.
    pub fn from_script(script: &str) -> Self {
        let mut lines = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        for line in script.lines() {
            if line.trim().is_empty() {
                if !block.is_empty() {
                    lines.push(block.join(" "));
                    block.clear();
                }
            } else {
                block.push(line.trim());
            }
        }
        if !block.is_empty() {
            lines.push(block.join(" "));
        }
        Self::new(lines)
    }

    /// Lines not yet used.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }

    /// Every prompt received so far.
    pub fn prompts(&self) -> &[NarrationPrompt] {
        &self.prompts
    }
}

#[async_trait]
impl Narrator for ScriptedNarrator {
    async fn generate(&mut self, prompt: &NarrationPrompt) -> Result<String, NarratorError> {
        self.prompts.push(prompt.clone());
        self.lines
            .pop_front()
            .ok_or_else(|| NarratorError::new("the story has run out of script"))
    }
}

#[cfg(test)]
mod tests {
    use dt_dice::{DieType, RollOutcome, SeverityTier};

    use super::*;
    use crate::turn::TurnId;

    #[tokio::test]
    async fn replays_lines_in_order() {
        let mut n = ScriptedNarrator::new(["first", "second"]);
        let prompt = NarrationPrompt::Opening("a dark forest".to_string());
        assert_eq!(n.generate(&prompt).await.unwrap(), "first");
        assert_eq!(n.generate(&prompt).await.unwrap(), "second");
        assert!(n.generate(&prompt).await.is_err());
        assert_eq!(n.prompts().len(), 3);
        assert_eq!(n.remaining(), 0);
    }

    #[test]
    fn script_blocks_split_on_blank_lines() {
        let n = ScriptedNarrator::from_script(
            "The gate looms.\nRoll a d20 to climb it.\n\n\nYou are over.\n",
        );
        assert_eq!(n.remaining(), 2);
        assert_eq!(
            n.lines.front().map(String::as_str),
            Some("The gate looms. Roll a d20 to climb it.")
        );
    }

    #[test]
    fn continuation_prompt_display() {
        let prompt = NarrationPrompt::Continuation(ResolvedAction {
            turn_id: TurnId::new(),
            action: "climb the gate".to_string(),
            outcome: RollOutcome::new(DieType::D20, 17).unwrap(),
            tier: SeverityTier::Success,
        });
        assert_eq!(
            prompt.to_string(),
            "action: climb the gate | roll: 17 on a d20 | outcome: success"
        );
    }
}
