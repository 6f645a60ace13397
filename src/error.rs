//! Error types

use thiserror::Error;

/// Configuration errors raised by user-facing selections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Difficulty identifier is not one of easy/medium/hard
    #[error("Unknown difficulty: {0:?} (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}
