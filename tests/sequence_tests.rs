//! Sequence generator integration tests.
//!
//! Validity of generated sequences across levels, and statistical
//! fairness of the Fisher–Yates permutations.

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use sequence_engine::items::{Item, ItemId, ItemPool};
use sequence_engine::sequence::{item_count_for_level, SequenceGenerator};

fn pool(n: usize) -> ItemPool {
    ItemPool::new(
        (0..n)
            .map(|i| Item::new(ItemId::indexed(i), format!("Item {i}"), format!("{i}.png")))
            .collect(),
    )
    .unwrap()
}

/// Pearson chi-square statistic against a uniform expectation.
fn chi_square(counts: &FxHashMap<Vec<ItemId>, usize>, cells: usize, trials: usize) -> f64 {
    let expected = trials as f64 / cells as f64;
    let observed_cells = counts.len();
    let seen: f64 = counts
        .values()
        .map(|&c| {
            let diff = c as f64 - expected;
            diff * diff / expected
        })
        .sum();
    // Cells never observed contribute (0 - e)^2 / e = e each.
    seen + (cells - observed_cells) as f64 * expected
}

// =============================================================================
// Validity
// =============================================================================

#[test]
fn test_levels_one_through_k() {
    let pool = pool(6);
    let mut generator = SequenceGenerator::new(42);

    for level in 1..=10u32 {
        let seq = generator.generate_level(&pool, level, 3).unwrap();
        assert_eq!(seq.len(), (3 + level as usize - 1).min(6));
        assert_eq!(seq.len(), item_count_for_level(level, 3, 6));
    }
}

proptest! {
    #[test]
    fn prop_sequence_valid(
        seed in any::<u64>(),
        pool_size in 1usize..12,
        min_items in 1usize..6,
        level in 1u32..20,
    ) {
        prop_assume!(min_items <= pool_size);
        let pool = pool(pool_size);
        let mut generator = SequenceGenerator::new(seed);

        let seq = generator.generate_level(&pool, level, min_items).unwrap();

        prop_assert_eq!(seq.len(), (min_items + level as usize - 1).min(pool_size));

        let mut unique = seq.target.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), seq.len());
        prop_assert!(seq.target.iter().all(|id| pool.contains(id)));

        let mut display = seq.display.clone();
        display.sort();
        prop_assert_eq!(display, unique);
    }

    #[test]
    fn prop_generate_respects_count(seed in any::<u64>(), pool_size in 1usize..10, count in 1usize..10) {
        prop_assume!(count <= pool_size);
        let pool = pool(pool_size);
        let mut generator = SequenceGenerator::new(seed);

        let seq = generator.generate(&pool, count).unwrap();
        prop_assert_eq!(seq.len(), count);
    }
}

// =============================================================================
// Fairness
// =============================================================================

/// Each of the 3! target orderings occurs with uniform frequency.
#[test]
fn test_target_permutation_fairness() {
    let pool = pool(3);
    let mut generator = SequenceGenerator::new(2024);
    let trials = 6_000;

    let mut counts: FxHashMap<Vec<ItemId>, usize> = FxHashMap::default();
    for _ in 0..trials {
        let seq = generator.generate_level(&pool, 1, 3).unwrap();
        *counts.entry(seq.target).or_default() += 1;
    }

    assert_eq!(counts.len(), 6, "every ordering must appear");
    // df = 5; 20.5 is the 0.1% critical value.
    let stat = chi_square(&counts, 6, trials);
    assert!(stat < 20.5, "chi-square {stat} too large: {counts:?}");
}

/// `generate` alone is also uniform over orderings.
#[test]
fn test_generate_fairness() {
    let pool = pool(3);
    let mut generator = SequenceGenerator::new(7);
    let trials = 6_000;

    let mut counts: FxHashMap<Vec<ItemId>, usize> = FxHashMap::default();
    for _ in 0..trials {
        *counts.entry(generator.generate(&pool, 3).unwrap()).or_default() += 1;
    }

    let stat = chi_square(&counts, 6, trials);
    assert!(stat < 20.5, "chi-square {stat} too large: {counts:?}");
}

/// Display order carries no information about target order: the 36
/// (target, display) pairs are jointly uniform.
#[test]
fn test_display_order_independent_of_target() {
    let pool = pool(3);
    let mut generator = SequenceGenerator::new(99);
    let trials = 36_000;

    let mut counts: FxHashMap<Vec<ItemId>, usize> = FxHashMap::default();
    for _ in 0..trials {
        let seq = generator.generate_level(&pool, 1, 3).unwrap();
        let mut key = seq.target;
        key.extend(seq.display);
        *counts.entry(key).or_default() += 1;
    }

    assert_eq!(counts.len(), 36);
    // df = 35; 66.6 is the 0.1% critical value.
    let stat = chi_square(&counts, 36, trials);
    assert!(stat < 66.6, "chi-square {stat} too large");
}

/// Subset selection from a larger pool gives every item the same chance
/// of being in play.
#[test]
fn test_subset_membership_uniform() {
    let pool = pool(6);
    let mut generator = SequenceGenerator::new(5);
    let trials = 6_000;

    let mut hits: FxHashMap<ItemId, usize> = FxHashMap::default();
    for _ in 0..trials {
        for id in generator.generate_level(&pool, 1, 3).unwrap().target {
            *hits.entry(id).or_default() += 1;
        }
    }

    // Each item appears in half the draws on average.
    let expected = trials as f64 * 3.0 / 6.0;
    for id in pool.ids() {
        let observed = hits.get(&id).copied().unwrap_or(0) as f64;
        assert!(
            (observed - expected).abs() < expected * 0.1,
            "item {id} seen {observed} times, expected about {expected}"
        );
    }
}
