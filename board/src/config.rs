//! Configuration for the todo board.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::BoardError;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;
use taskdeck_runtime::StoreConfig;

/// Page size variable
pub const ITEMS_PER_PAGE_VAR: &str = "TASKDECK_ITEMS_PER_PAGE";
/// Sample-data toggle variable
pub const SEED_SAMPLE_VAR: &str = "TASKDECK_SEED_SAMPLE";
/// Store feedback depth variable
pub const MAX_FEEDBACK_DEPTH_VAR: &str = "TASKDECK_MAX_FEEDBACK_DEPTH";

/// Board configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Rows per page (default: 5)
    pub items_per_page: NonZeroUsize,
    /// Start with the two sample todos (default: true)
    pub seed_sample: bool,
    /// How deep store feedback may cascade (default: 16)
    pub max_feedback_depth: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            seed_sample: true,
            max_feedback_depth: StoreConfig::DEFAULT_MAX_FEEDBACK_DEPTH,
        }
    }
}

impl BoardConfig {
    /// Load configuration from environment variables.
    ///
    /// Missing or malformed values fall back to defaults; a malformed value
    /// is logged. Use [`try_from_env`](Self::try_from_env) to surface it.
    #[must_use]
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|error| {
            tracing::warn!(%error, "Ignoring invalid configuration; using defaults");
            Self::default()
        })
    }

    /// Load configuration from environment variables, rejecting bad values.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`] when a variable is set but cannot
    /// be parsed.
    pub fn try_from_env() -> Result<Self, BoardError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidConfig`] when a value is present but
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            items_per_page: parse(&lookup, ITEMS_PER_PAGE_VAR)?.unwrap_or(defaults.items_per_page),
            seed_sample: parse_flag(&lookup, SEED_SAMPLE_VAR)?.unwrap_or(defaults.seed_sample),
            max_feedback_depth: parse(&lookup, MAX_FEEDBACK_DEPTH_VAR)?
                .unwrap_or(defaults.max_feedback_depth),
        })
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default().with_max_feedback_depth(self.max_feedback_depth)
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, BoardError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| BoardError::InvalidConfig {
                key,
                reason: format!("{raw:?}: {e}"),
            })
        })
        .transpose()
}

fn parse_flag<F>(lookup: &F, key: &'static str) -> Result<Option<bool>, BoardError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(BoardError::InvalidConfig {
                key,
                reason: format!("{raw:?} is not a boolean"),
            }),
        })
        .transpose()
}
