//! Target-sequence generation.
//!
//! A level's sequence is sized by [`item_count_for_level`] and drawn by a
//! [`SequenceGenerator`] as two independent permutations of the same item
//! subset: the target order and the display order.

mod generator;

pub use generator::{item_count_for_level, LevelSequence, SequenceGenerator};
