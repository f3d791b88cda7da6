//! Configuration file support.
//!
//! Every section is optional; an empty file yields the defaults. Command
//! line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::analysis::QualityThresholds;
use crate::codec::WordCount;
use crate::dictionary::{Dictionary, DictionaryError};

/// Loosest `max_bit_bias` a config may set. Below this a healthy 128-bit
/// draw is rejected often enough to make generation unreliable.
const MIN_BIT_BIAS: f64 = 0.25;

/// Smallest `max_repeat_run`. A healthy 32-byte draw holds a run of five
/// equal bytes with probability below 1e-8.
const MIN_REPEAT_RUN: usize = 4;

/// Smallest `max_chi_square`. For a 16-32 byte draw the statistic sits near
/// `256 - n` and grows by `512 / n` per colliding pair.
const MIN_CHI_SQUARE: f64 = 512.0;

/// Where generated entropy comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Operating system CSPRNG.
    #[default]
    Secure,
    /// Physical dice with rejection sampling.
    Dice,
    /// Hex typed by the user.
    Hex,
}

impl SourceKind {
    /// Parses a menu answer. An empty answer selects `default`.
    pub fn from_choice(choice: &str, default: SourceKind) -> Option<Self> {
        match choice.trim().to_ascii_lowercase().as_str() {
            "" => Some(default),
            "1" | "secure" | "random" => Some(SourceKind::Secure),
            "2" | "dice" => Some(SourceKind::Dice),
            "3" | "hex" | "manual" => Some(SourceKind::Hex),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SourceKind::Secure => "secure random",
            SourceKind::Dice => "dice",
            SourceKind::Hex => "manual hex",
        })
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
    #[error("invalid health threshold: {0}")]
    InvalidThreshold(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// `[dictionary]` section.
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    /// `[generate]` section.
    #[serde(default)]
    pub generate: GenerateConfig,
    /// `[health]` section: secure-source sanity thresholds.
    #[serde(default)]
    pub health: QualityThresholds,
}

/// Wordlist selection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DictionaryConfig {
    /// Wordlist file; the built-in English list when absent.
    pub path: Option<PathBuf>,
}

impl DictionaryConfig {
    /// Loads the configured dictionary.
    pub fn load(&self) -> Result<Dictionary, DictionaryError> {
        match &self.path {
            Some(path) => Dictionary::from_file(path),
            None => {
                tracing::info!("Using built-in English wordlist");
                Ok(Dictionary::english())
            }
        }
    }
}

/// Defaults offered by the generate command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Word count used when the prompt is left empty.
    pub default_words: WordCount,
    /// Entropy source used when the prompt is left empty.
    pub default_source: SourceKind,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            default_words: WordCount::TwentyFour,
            default_source: SourceKind::Secure,
        }
    }
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates TOML configuration text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let health = &self.health;
        if !(MIN_BIT_BIAS..=0.5).contains(&health.max_bit_bias) {
            return Err(ConfigError::InvalidThreshold(format!(
                "max_bit_bias {} outside {MIN_BIT_BIAS}-0.5",
                health.max_bit_bias
            )));
        }
        if health.max_repeat_run < MIN_REPEAT_RUN {
            return Err(ConfigError::InvalidThreshold(format!(
                "max_repeat_run {} below {MIN_REPEAT_RUN}",
                health.max_repeat_run
            )));
        }
        if let Some(max) = health.max_chi_square {
            if max.is_nan() || max < MIN_CHI_SQUARE {
                return Err(ConfigError::InvalidThreshold(format!(
                    "max_chi_square {max} below {MIN_CHI_SQUARE}"
                )));
            }
        }
        Ok(())
    }
}
