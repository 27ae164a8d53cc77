//! Core engine types: RNG, configuration, Round State, attempt records.
//!
//! These are the building blocks the sequence generator and progression
//! engine share. Hosts configure them via `EngineConfig` rather than
//! modifying the engine.

pub mod attempt;
pub mod config;
pub mod rng;
pub mod state;

pub use attempt::AttemptRecord;
pub use config::{Difficulty, DifficultyProfile, EngineConfig, PoolPolicy, ScoreRule, ScoringConfig};
pub use rng::{GameRng, GameRngState};
pub use state::RoundState;
