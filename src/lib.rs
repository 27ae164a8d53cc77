//! # sequence-engine
//!
//! Progression engine for item-sequencing mini-games: the player places
//! tokens in a hidden target order, level by level, with a fixed number
//! of lives and optionally a countdown and score multiplier.
//!
//! ## Design Principles
//!
//! 1. **Logic Only**: No layout, gestures or asset loading. The engine
//!    consumes attempts and emits data-only events and render instructions.
//!
//! 2. **Single Owner**: All mutable state lives in one `RoundState` owned
//!    by the `ProgressionEngine`. Game over and reset replace it wholesale.
//!
//! 3. **Configuration Over Convention**: Difficulty, scoring rule, timer
//!    and pool policy are `EngineConfig` knobs, not hidden defaults.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, Round State, attempt records
//! - `items`: Items, pools, item sources
//! - `sequence`: Target/display order generation
//! - `engine`: Progression state machine, outcome events, render instructions
//! - `timer`: Clocks and the cancel-and-replace countdown
//! - `error`: Error taxonomy

pub mod core;
pub mod engine;
pub mod error;
pub mod items;
pub mod sequence;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{
    AttemptRecord, Difficulty, DifficultyProfile, EngineConfig, GameRng, GameRngState,
    PoolPolicy, RoundState, ScoreRule, ScoringConfig,
};

pub use crate::items::{Item, ItemId, ItemPool, ItemSource, JsonSource, ParallelListSource, StaticSource};

pub use crate::sequence::{item_count_for_level, LevelSequence, SequenceGenerator};

pub use crate::engine::{
    EnginePhase, EngineSnapshot, Events, FeedbackCue, GameOverReason, OutcomeEvent, OutcomeKind,
    ProgressionEngine, RenderInstruction,
};

pub use crate::timer::{Clock, Countdown, ManualClock, SystemClock, TimerController};

pub use crate::error::{ConfigError, EngineError, Rejection, SourceError};
