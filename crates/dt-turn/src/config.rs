//! Configuration for turn coordination.

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{TurnError, TurnResult};

/// Environment variable that overrides [`TurnConfig::debounce_ms`].
pub const DEBOUNCE_ENV: &str = "DICETALES_DEBOUNCE_MS";

/// Configuration for an orchestrator or session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    /// Window in which an identical re-declared action is ignored.
    pub debounce_ms: u64,
    /// Lets a consumed turn be rolled again. Testing aid only.
    pub allow_reroll_override: bool,
    /// RNG seed for reproducible rolls; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 2000,
            allow_reroll_override: false,
            seed: None,
        }
    }
}

impl TurnConfig {
    /// Load a config from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> TurnResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| TurnError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| TurnError::Config(format!("{}: {e}", path.display())))
    }

    /// Apply `DICETALES_DEBOUNCE_MS` from the environment, if set.
    pub fn with_env(self) -> TurnResult<Self> {
        let raw = std::env::var(DEBOUNCE_ENV).ok();
        self.with_debounce_override(raw.as_deref())
    }

    fn with_debounce_override(mut self, raw: Option<&str>) -> TurnResult<Self> {
        if let Some(raw) = raw {
            self.debounce_ms = raw.trim().parse().map_err(|_| {
                TurnError::Config(format!("{DEBOUNCE_ENV} must be milliseconds, got '{raw}'"))
            })?;
        }
        Ok(self)
    }

    /// Set the debounce window in milliseconds.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Enable or disable the reroll override.
    pub fn with_reroll_override(mut self, allow: bool) -> Self {
        self.allow_reroll_override = allow;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.debounce_ms).unwrap_or(i64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = TurnConfig::default();
        assert_eq!(cfg.debounce_ms, 2000);
        assert!(!cfg.allow_reroll_override);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.debounce(), Duration::milliseconds(2000));
    }

    #[test]
    fn builder_methods() {
        let cfg = TurnConfig::default()
            .with_debounce_ms(500)
            .with_reroll_override(true)
            .with_seed(7);
        assert_eq!(cfg.debounce_ms, 500);
        assert!(cfg.allow_reroll_override);
        assert_eq!(cfg.seed, Some(7));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turns.json");
        std::fs::write(&path, r#"{ "seed": 11 }"#).unwrap();
        let cfg = TurnConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.seed, Some(11));
        assert_eq!(cfg.debounce_ms, 2000);
    }

    #[test]
    fn bad_json_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turns.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            TurnConfig::from_json_file(&path),
            Err(TurnError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = TurnConfig::from_json_file(Path::new("/nonexistent/turns.json"));
        assert!(matches!(result, Err(TurnError::Config(_))));
    }

    #[test]
    fn debounce_override() {
        let cfg = TurnConfig::default()
            .with_debounce_override(Some(" 250 "))
            .unwrap();
        assert_eq!(cfg.debounce_ms, 250);

        let unchanged = TurnConfig::default().with_debounce_override(None).unwrap();
        assert_eq!(unchanged.debounce_ms, 2000);

        assert!(TurnConfig::default().with_debounce_override(Some("soon")).is_err());
    }
}
