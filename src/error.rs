//! Error types

/// Failures that stop a game from being set up.
///
/// Ordinary play (misses, wrong-order clicks, empty boards) never errors.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("randomness source unavailable: {0}")]
    Entropy(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}
