//! Sequence generation.
//!
//! Selection rule: the pool is copied and shuffled, and the first `count`
//! ids of that shuffle form the level's subset. The subset is then
//! permuted twice, independently: once for the target order the player
//! must satisfy, once for the display order the view lays items out in.
//! The display order therefore leaks nothing about the target order.
//!
//! Each level gets a fresh, independent generation; nothing is sliced out
//! of a previous level's order.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, GameRngState};
use crate::error::EngineError;
use crate::items::{ItemId, ItemPool};

/// Number of items in the sequence for `level`.
///
/// `min(min_items + level - 1, max_items)`, with `level` starting at 1.
///
/// ```
/// use sequence_engine::sequence::item_count_for_level;
///
/// assert_eq!(item_count_for_level(1, 3, 10), 3);
/// assert_eq!(item_count_for_level(4, 3, 10), 6);
/// assert_eq!(item_count_for_level(20, 3, 10), 10);
/// ```
#[must_use]
pub fn item_count_for_level(level: u32, min_items: usize, max_items: usize) -> usize {
    let extra = level.saturating_sub(1) as usize;
    min_items.saturating_add(extra).min(max_items)
}

/// The target and display orders for one level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSequence {
    /// Order the player must satisfy.
    pub target: Vec<ItemId>,
    /// Visual placement order of the same items.
    pub display: Vec<ItemId>,
}

impl LevelSequence {
    /// Sequence length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.target.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// The id expected at `index`, or `None` past the end.
    #[must_use]
    pub fn expected(&self, index: usize) -> Option<&ItemId> {
        self.target.get(index)
    }

    /// Whether `id` is one of this level's items.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.display.contains(id)
    }
}

/// Randomized sequence generator.
///
/// Owns the RNG so every level draw advances one deterministic stream.
#[derive(Clone, Debug)]
pub struct SequenceGenerator {
    rng: GameRng,
}

impl SequenceGenerator {
    /// Create a generator with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Resume a generator from a saved RNG state.
    #[must_use]
    pub fn from_rng_state(state: &GameRngState) -> Self {
        Self {
            rng: GameRng::from_state(state),
        }
    }

    /// Current RNG state.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Pick `count` distinct ids from `pool` and return them in a uniformly
    /// random order. The pool is not modified.
    ///
    /// Fails with [`EngineError::Configuration`] unless `1 <= count <= pool.len()`.
    pub fn generate(&mut self, pool: &ItemPool, count: usize) -> Result<Vec<ItemId>, EngineError> {
        let mut subset = self.select(pool, count)?;
        self.rng.shuffle(&mut subset);
        Ok(subset)
    }

    /// Generate the target and display orders for `level`.
    pub fn generate_level(
        &mut self,
        pool: &ItemPool,
        level: u32,
        min_items: usize,
    ) -> Result<LevelSequence, EngineError> {
        if pool.len() < min_items {
            return Err(EngineError::Configuration {
                required: min_items,
                available: pool.len(),
            });
        }

        let count = item_count_for_level(level, min_items, pool.len());
        let subset = self.select(pool, count)?;

        let mut target = subset.clone();
        self.rng.shuffle(&mut target);
        let mut display = subset;
        self.rng.shuffle(&mut display);

        Ok(LevelSequence { target, display })
    }

    fn select(&mut self, pool: &ItemPool, count: usize) -> Result<Vec<ItemId>, EngineError> {
        if count == 0 || count > pool.len() {
            return Err(EngineError::Configuration {
                required: count.max(1),
                available: pool.len(),
            });
        }

        let mut ids = pool.ids();
        self.rng.shuffle(&mut ids);
        ids.truncate(count);
        Ok(ids)
    }
}
