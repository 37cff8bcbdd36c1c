//! Error types for the revolver game.

use thiserror::Error;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Rejected game commands. None of these change any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Requested bullet count is not an integer in 1..=6.
    #[error("bullet count must be between 1 and 6, got {0:?}")]
    InvalidBulletCount(String),

    /// A cylinder with live rounds is already loaded in this group.
    #[error("a game is already in progress")]
    GameInProgress,

    /// No cylinder is loaded in this group.
    #[error("the revolver is not loaded")]
    NotLoaded,
}

/// Failures while reading or writing the misfire switch store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file holds malformed JSON.
    #[error("store data is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures reported by a moderation sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModerationError {
    /// The platform cannot mute members at all.
    #[error("muting is not supported here")]
    Unsupported,

    /// The bot lacks permission to mute this member.
    #[error("no permission to mute {0}")]
    PermissionDenied(String),

    /// Any other platform failure.
    #[error("mute failed: {0}")]
    Platform(String),
}

/// Invalid game settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Misfire probability outside [0, 1] or not a number.
    #[error("misfire probability must be within [0, 1], got {0}")]
    Probability(f64),

    /// Mute bounds are reversed.
    #[error("max mute duration ({max}s) is below min mute duration ({min}s)")]
    MuteBounds {
        /// Configured lower bound in seconds.
        min: u64,
        /// Configured upper bound in seconds.
        max: u64,
    },

    /// Inactivity timeout of zero seconds.
    #[error("inactivity timeout must be at least one second")]
    ZeroTimeout,
}
