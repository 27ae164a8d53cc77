//! Error types.
//!
//! Three failure domains:
//! - [`SourceError`]: the item source could not produce a pool
//! - [`ConfigError`]: engine configuration is unusable
//! - [`EngineError`]: what engine operations return
//!
//! Rejected attempts are not crashes. They surface as
//! [`EngineError::InvariantViolation`] and leave Round State untouched.

use thiserror::Error;

use crate::items::ItemId;

/// Errors raised while fetching or normalizing an item pool.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The item document is not valid JSON or has the wrong shape.
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parallel name/asset lists disagree on length.
    #[error("mismatched item lists: {names} names, {assets} assets")]
    MismatchedLists {
        /// Number of display names supplied.
        names: usize,
        /// Number of asset references supplied.
        assets: usize,
    },

    /// The source is reachable but has nothing to serve.
    #[error("item source unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while building or parsing configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Difficulty name is not one of easy/medium/hard.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// `min_items` must be at least 1.
    #[error("min_items must be at least 1")]
    InvalidMinItems,

    /// `max_lives` must be at least 1.
    #[error("max_lives must be at least 1")]
    InvalidMaxLives,

    /// The configuration document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Why an attempt, timer signal or snapshot was ignored.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    /// The engine is idle.
    #[error("no round in progress")]
    NotPlaying,
    /// The item is not part of the current level.
    #[error("item {0} is not in play")]
    UnknownItem(ItemId),
    /// The item already satisfied its position on this level.
    #[error("item {0} is already placed")]
    AlreadyPlaced(ItemId),
    /// Every position of the current sequence is already satisfied.
    #[error("sequence already complete")]
    SequenceExhausted,
    /// A playing snapshot carries no level sequence.
    #[error("playing snapshot has no sequence")]
    MissingSequence,
    /// A snapshot breaks a Round State invariant.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(&'static str),
}

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The pool is too small to start a round.
    #[error("cannot start: need at least {required} items, pool has {available}")]
    Configuration {
        /// Minimum pool size required.
        required: usize,
        /// Pool size actually available.
        available: usize,
    },

    /// Two pool items share an id.
    #[error("cannot start: duplicate item id {0}")]
    DuplicateItem(ItemId),

    /// The engine configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The item source failed; the engine stays idle and may be retried.
    #[error("cannot start: {0}")]
    SourceUnavailable(#[from] SourceError),

    /// The operation was ignored without changing state.
    #[error("ignored: {0}")]
    InvariantViolation(Rejection),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl EngineError {
    /// True for errors that prevent a round from starting.
    #[must_use]
    pub fn is_start_failure(&self) -> bool {
        matches!(
            self,
            EngineError::Configuration { .. }
                | EngineError::DuplicateItem(_)
                | EngineError::Config(_)
                | EngineError::SourceUnavailable(_)
        )
    }
}
