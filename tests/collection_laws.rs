//! Property-based tests for Collection laws.
//!
//! This module verifies the structural invariants of the eager and lazy
//! collections using proptest.

use keyseq::{Collection, Key, LazyCollection};
use proptest::prelude::*;

fn sorted_pairs(mut pairs: Vec<(Key, i32)>) -> Vec<(Key, i32)> {
    pairs.sort();
    pairs
}

// =============================================================================
// Eager Laws
// =============================================================================

proptest! {
    /// Map Length Law: map never changes the number of entries
    #[test]
    fn prop_map_preserves_length(
        elements in prop::collection::vec(any::<i32>(), 0..50),
        offset in any::<i32>()
    ) {
        let collection = Collection::from(elements);
        let mapped = collection.map(|value| value.wrapping_add(offset));
        prop_assert_eq!(mapped.to_array().len(), collection.to_array().len());
    }

    /// Filter/Reject Complement Law: the two halves partition the entries
    #[test]
    fn prop_filter_reject_partition(
        elements in prop::collection::vec(any::<i32>(), 0..50),
        divisor in 1..5_i32
    ) {
        let collection = Collection::from(elements);
        let kept = collection.filter(|value| value % divisor == 0).to_array();
        let dropped = collection.reject(|value| value % divisor == 0).to_array();

        for (key, _) in &kept {
            prop_assert!(dropped.iter().all(|(other, _)| other != key));
        }

        let mut union = kept;
        union.extend(dropped);
        prop_assert_eq!(sorted_pairs(union), sorted_pairs(collection.to_array()));
    }

    /// Merge Length Law: merging value lists keeps every value
    #[test]
    fn prop_merge_of_lists_concatenates(
        left in prop::collection::vec(any::<i32>(), 0..30),
        right in prop::collection::vec(any::<i32>(), 0..30)
    ) {
        let merged = Collection::from(left.clone()).merge(&Collection::from(right.clone()));
        let mut expected = left;
        expected.extend(right);
        prop_assert_eq!(merged.values(), expected);
    }

    /// Sort Law: sorting yields ordered values and keeps every key
    #[test]
    fn prop_sort_orders_values(
        elements in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let collection = Collection::from(elements.clone());
        let sorted = collection.sort(|left, right| left.cmp(right));

        let mut expected = elements;
        expected.sort_unstable();
        prop_assert_eq!(sorted.values(), expected);
        prop_assert_eq!(sorted_pairs(sorted.to_array()), sorted_pairs(collection.to_array()));
    }

    /// Distinct Law: no value survives twice
    #[test]
    fn prop_distinct_is_unique(
        elements in prop::collection::vec(0..10_i32, 0..50)
    ) {
        let values = Collection::from(elements).distinct().values();
        for (index, value) in values.iter().enumerate() {
            prop_assert!(!values[index + 1..].contains(value));
        }
    }

    /// Slice Law: a slice never yields more than requested
    #[test]
    fn prop_slice_is_bounded(
        elements in prop::collection::vec(any::<i32>(), 0..50),
        offset in -60..60_isize,
        length in 0..60_isize
    ) {
        let sliced = Collection::from(elements.clone()).slice(offset, Some(length), false);
        prop_assert!(sliced.len() <= elements.len());
        prop_assert!(isize::try_from(sliced.len()).unwrap() <= length);
    }
}

// =============================================================================
// Lazy Equivalence Laws
// =============================================================================

proptest! {
    /// Lazy map agrees with eager map
    #[test]
    fn prop_lazy_map_matches_eager(
        elements in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let eager = Collection::from(elements.clone()).map(|value| value.wrapping_mul(3));
        let mut lazy = LazyCollection::from_values(elements).map(|value| value.wrapping_mul(3));
        prop_assert_eq!(lazy.to_array(), eager.to_array());
    }

    /// Lazy filter agrees with eager filter, keys included
    #[test]
    fn prop_lazy_filter_matches_eager(
        elements in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let eager = Collection::from(elements.clone()).filter(|value| value % 3 == 0);
        let mut lazy = LazyCollection::from_values(elements).filter(|value| value % 3 == 0);
        prop_assert_eq!(lazy.to_array(), eager.to_array());
    }

    /// Lazy merge agrees with eager merge
    #[test]
    fn prop_lazy_merge_matches_eager(
        left in prop::collection::vec(any::<i32>(), 0..30),
        right in prop::collection::vec(any::<i32>(), 0..30)
    ) {
        let eager = Collection::from(left.clone()).merge(&Collection::from(right.clone()));
        let mut lazy = LazyCollection::from_values(left).merge(LazyCollection::from_values(right));
        prop_assert_eq!(lazy.persist(), eager);
    }
}
