//! Tests for code written once over the Enumerable trait.
//!
//! The trait is imported only here so that its by-value methods do not
//! shadow the borrowing inherent methods elsewhere.

use keyseq::{Collection, Enumerable, Key, LazyCollection};
use rstest::rstest;

fn labels<E: Enumerable<Item = u32>>(source: E) -> Vec<(Key, String)> {
    source
        .reject(|value| *value == 0)
        .map(|value| format!("#{value}"))
        .to_array()
}

fn total<E: Enumerable<Item = u32>>(source: E) -> u32 {
    source.reduce(0, |sum, value| sum + value)
}

#[rstest]
fn generic_pipeline_agrees_across_strategies() {
    let values = vec![3, 0, 7];
    let eager = labels(Collection::from(values.clone()));
    let lazy = labels(LazyCollection::from_values(values));

    assert_eq!(eager, lazy);
    assert_eq!(
        eager,
        vec![(Key::Int(0), "#3".to_string()), (Key::Int(2), "#7".to_string())]
    );
}

#[rstest]
fn generic_reduce_agrees_across_strategies() {
    let values = vec![1, 2, 3, 4];
    assert_eq!(total(Collection::from(values.clone())), 10);
    assert_eq!(total(LazyCollection::from_values(values)), 10);
}

#[rstest]
fn filter_through_trait_keeps_keys() {
    let collection = Collection::from_entries([("a", 1_u32), ("b", 2), ("c", 3)]);
    let odd = Enumerable::filter(collection, |value: &u32| value % 2 == 1);
    assert_eq!(
        odd.to_array(),
        vec![(Key::from("a"), 1), (Key::from("c"), 3)]
    );
}

#[rstest]
fn eager_map_through_trait_moves_values() {
    let collection = Collection::from(vec![String::from("x"), String::from("yz")]);
    let lengths = collection.map(|text: String| text.len());
    assert_eq!(lengths.values(), vec![1, 2]);
}
