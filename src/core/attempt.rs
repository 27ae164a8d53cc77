//! Attempt records.
//!
//! Every accepted attempt is recorded in Round State history. Rejected
//! attempts are not recorded; they never touched state.

use serde::{Deserialize, Serialize};

use crate::items::ItemId;

/// A processed attempt with its context.
///
/// Used for:
/// - Replay/debugging
/// - End-of-game summaries
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// The item the player submitted.
    pub item: ItemId,

    /// Level the attempt was made on.
    pub level: u32,

    /// Position in the sequence the attempt was made against.
    pub index: usize,

    /// Whether the item matched the expected one.
    pub correct: bool,
}

impl AttemptRecord {
    /// Create a new attempt record.
    #[must_use]
    pub fn new(item: ItemId, level: u32, index: usize, correct: bool) -> Self {
        Self {
            item,
            level,
            index,
            correct,
        }
    }
}
