//! Configuration file parser for ~/.config/civic-feed/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted but logged, since they are usually typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::feed::{FeedAssembler, FeedFilter, COMMENT_PREVIEW_LIMIT};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Top-level configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Start the session with the sample categories and posts.
    pub seed_sample_data: bool,

    /// Category selected in the filter bar at startup (none = "All").
    pub default_category: Option<i64>,

    /// Column width of post content in text output.
    pub preview_width: usize,

    /// Comments shown under each post.
    pub comment_preview_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            default_category: None,
            preview_width: 60,
            comment_preview_limit: COMMENT_PREVIEW_LIMIT,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 4] = [
        "seed_sample_data",
        "default_category",
        "preview_width",
        "comment_preview_limit",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing, empty or whitespace-only file → defaults
    /// - Larger than 1 MB → `ConfigError::TooLarge`
    /// - Invalid TOML or wrong value types → `ConfigError::Parse`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content).inspect(|config| {
            tracing::info!(
                path = %path.display(),
                seed_sample_data = config.seed_sample_data,
                "Loaded configuration"
            );
        })
    }

    /// Parse TOML text. Empty input yields defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        Ok(toml::from_str(content)?)
    }

    pub fn initial_filter(&self) -> FeedFilter {
        FeedFilter::from_option(self.default_category)
    }

    pub fn assembler(&self) -> FeedAssembler {
        FeedAssembler::new(self.comment_preview_limit)
    }
}
