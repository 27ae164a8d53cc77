//! Round State: the single mutable record of a game session.
//!
//! Holds level, lives, score, progress through the current sequence and
//! the sequence itself. Owned exclusively by the progression engine and
//! only mutated through its operations.
//!
//! ## Lifecycle
//!
//! - Created fresh (idle) when the engine is constructed
//! - Mutated by start/attempt/timer operations
//! - Replaced wholesale on game over and reset, never field-reset
//!
//! Uses `im::Vector` for history so snapshots clone in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::attempt::AttemptRecord;
use super::config::{Difficulty, EngineConfig};
use crate::items::ItemId;
use crate::sequence::LevelSequence;

/// Mutable state of one game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Current level (starts at 1).
    pub level: u32,

    /// Remaining lives (floor 0).
    pub lives: u32,

    /// Accumulated score. Stays 0 when scoring is disabled.
    pub score: u64,

    /// Index of the next expected item in the target sequence.
    pub progress_index: usize,

    /// Session difficulty.
    pub difficulty: Difficulty,

    /// Whether a round is in progress.
    pub started: bool,

    /// The current level's sequences. `None` while idle.
    pub sequence: Option<LevelSequence>,

    /// Accepted attempts in this game.
    pub history: Vector<AttemptRecord>,
}

impl RoundState {
    /// A fresh, idle state for the given configuration.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            level: 1,
            lives: config.max_lives,
            score: 0,
            progress_index: 0,
            difficulty: config.difficulty,
            started: false,
            sequence: None,
            history: Vector::new(),
        }
    }

    /// The id the player must submit next, if any position remains.
    #[must_use]
    pub fn expected(&self) -> Option<&ItemId> {
        self.sequence
            .as_ref()
            .and_then(|seq| seq.expected(self.progress_index))
    }

    /// Length of the current target sequence (0 while idle).
    #[must_use]
    pub fn sequence_len(&self) -> usize {
        self.sequence.as_ref().map_or(0, LevelSequence::len)
    }

    /// Ids already satisfied on this level, in target order.
    #[must_use]
    pub fn placed(&self) -> &[ItemId] {
        match &self.sequence {
            Some(seq) => &seq.target[..self.progress_index.min(seq.len())],
            None => &[],
        }
    }

    /// Whether every position of the current sequence is satisfied.
    #[must_use]
    pub fn is_level_complete(&self) -> bool {
        self.sequence.is_some() && self.progress_index >= self.sequence_len()
    }

    /// Install the sequence for a new level and rewind progress.
    pub(crate) fn begin_level(&mut self, sequence: LevelSequence) {
        self.sequence = Some(sequence);
        self.progress_index = 0;
    }

    /// Record an accepted attempt.
    pub(crate) fn record(&mut self, item: ItemId, correct: bool) {
        self.history
            .push_back(AttemptRecord::new(item, self.level, self.progress_index, correct));
    }

    /// Count of correct attempts in this game.
    #[must_use]
    pub fn correct_attempts(&self) -> usize {
        self.history.iter().filter(|r| r.correct).count()
    }
}
