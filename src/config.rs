//! Configuration types, loadable from TOML.
//!
//! Every section has defaults, so a config file only needs the values it
//! overrides:
//!
//! ```toml
//! agent_delay_ms = 250
//!
//! [engine]
//! epsilon = 0.3
//! seed = 42
//!
//! [session.terminal]
//! round_limit = 0.0
//! ```

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    game::{RewardShaping, TerminalRewards},
};

/// Learning parameters of the Q-learning agent.
///
/// # Examples
///
/// ```
/// use minicheckers::config::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_learning_rate(0.5)
///     .with_discount_factor(0.9)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Initial exploration rate ε
    pub epsilon: f64,
    /// Multiplicative ε decay applied after every agent move
    pub epsilon_decay: f64,
    /// Floor for ε
    pub min_epsilon: f64,
    /// Q-value of pairs that were never updated
    pub default_value: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.7,
            discount_factor: 0.95,
            epsilon: 0.5,
            epsilon_decay: 0.995,
            min_epsilon: 0.1,
            default_value: 0.0,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.min_epsilon = min_epsilon;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid("engine.learning_rate must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(invalid("engine.discount_factor must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid("engine.epsilon must be in [0, 1]"));
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(invalid("engine.epsilon_decay must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.min_epsilon) {
            return Err(invalid("engine.min_epsilon must be in [0, 1]"));
        }
        if !self.default_value.is_finite() {
            return Err(invalid("engine.default_value must be finite"));
        }
        Ok(())
    }
}

/// Turn and reward settings for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// A game ends once the round counter reaches this value
    pub max_rounds: u32,
    /// Start the next game as soon as one ends. When off, the session stays
    /// in `GameOver` until `start_new_game` is called.
    pub auto_restart: bool,
    pub shaping: RewardShaping,
    pub terminal: TerminalRewards,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_rounds: 64,
            auto_restart: true,
            shaping: RewardShaping::default(),
            terminal: TerminalRewards::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_auto_restart(mut self, auto_restart: bool) -> Self {
        self.auto_restart = auto_restart;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(invalid("session.max_rounds must be > 0"));
        }
        Ok(())
    }
}

/// Where the learned table is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub table_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from("q_table.msgpack"),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub session: SessionConfig,
    pub storage: StorageConfig,
    /// Pause between the human's move and the agent's reply
    pub agent_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            session: SessionConfig::default(),
            storage: StorageConfig::default(),
            agent_delay_ms: 1000,
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file {path:?}"),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        self.session.validate()
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidConfiguration {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.min_epsilon, 0.1);
        assert_eq!(config.session.max_rounds, 64);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            agent_delay_ms = 0

            [engine]
            epsilon = 0.2
            seed = 9

            [session.terminal]
            round_limit = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.agent_delay_ms, 0);
        assert_eq!(config.engine.epsilon, 0.2);
        assert_eq!(config.engine.seed, Some(9));
        assert_eq!(config.engine.learning_rate, 0.7);
        assert_eq!(config.session.terminal.round_limit, 0.0);
        assert_eq!(config.session.terminal.agent_win, 20.0);
        assert_eq!(config.storage.table_path, PathBuf::from("q_table.msgpack"));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = AppConfig::from_toml("[engine]\nlearning_rate = 0.0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));

        let err = AppConfig::from_toml("[session]\nmax_rounds = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml("engine = ["),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_or_default(Path::new("/nonexistent/minicheckers.toml"));
        assert_eq!(config.unwrap(), AppConfig::default());
    }
}
