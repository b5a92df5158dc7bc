//! Element-wise transformations, windows, folds and quantifiers.

use super::{Collection, Entries};
use crate::{EmptyCollectionError, Key};
use std::cmp::Ordering;

impl<V> Collection<V> {
    /// Calls `function` once per value in iteration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    ///
    /// let mut seen = Vec::new();
    /// Collection::from(vec![1, 2, 3]).each(|value| seen.push(*value));
    /// assert_eq!(seen, vec![1, 2, 3]);
    /// ```
    pub fn each<F>(&self, mut function: F)
    where
        F: FnMut(&V),
    {
        for (_, value) in self.pairs() {
            function(value);
        }
    }

    /// Like [`each`](Self::each), stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `function`, unchanged.
    pub fn try_each<E, F>(&self, mut function: F) -> Result<(), E>
    where
        F: FnMut(&V) -> Result<(), E>,
    {
        self.pairs().iter().try_for_each(|(_, value)| function(value))
    }

    /// Returns a collection with the same keys and `function(value)` as values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    ///
    /// let names = Collection::from_entries([("a", "ada"), ("b", "bob")]);
    /// let lengths = names.map(|name| name.len());
    /// assert_eq!(lengths.get(&"b".into()), Some(&3));
    /// ```
    pub fn map<B, F>(&self, mut function: F) -> Collection<B>
    where
        F: FnMut(&V) -> B,
    {
        Collection::from_store(
            self.pairs()
                .iter()
                .map(|(key, value)| (key.clone(), function(value)))
                .collect(),
        )
    }

    /// Like [`map`](Self::map), stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `function`, unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    ///
    /// let parsed = Collection::from(vec!["1", "x", "3"]).try_map(|text| text.parse::<i32>());
    /// assert!(parsed.is_err());
    /// ```
    pub fn try_map<B, E, F>(&self, mut function: F) -> Result<Collection<B>, E>
    where
        F: FnMut(&V) -> Result<B, E>,
    {
        let mut entries = Entries::with_capacity(self.len());
        for (key, value) in self.pairs() {
            entries.insert(key.clone(), function(value)?);
        }
        Ok(Collection::from_store(entries))
    }

    /// Left fold over the values; no key is passed to `function`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    ///
    /// let sum = Collection::from(vec![1, 2, 3, 4]).reduce(0, |total, value| total + value);
    /// assert_eq!(sum, 10);
    /// ```
    pub fn reduce<B, F>(&self, initial: B, mut function: F) -> B
    where
        F: FnMut(B, &V) -> B,
    {
        self.pairs()
            .iter()
            .fold(initial, |accumulator, (_, value)| function(accumulator, value))
    }

    /// Like [`reduce`](Self::reduce), stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `function`, unchanged.
    pub fn try_reduce<B, E, F>(&self, initial: B, mut function: F) -> Result<B, E>
    where
        F: FnMut(B, &V) -> Result<B, E>,
    {
        self.pairs()
            .iter()
            .try_fold(initial, |accumulator, (_, value)| function(accumulator, value))
    }

    /// Returns `true` if every value satisfies `predicate`.
    pub fn every<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V) -> bool,
    {
        self.pairs().iter().all(|(_, value)| predicate(value))
    }

    /// Returns `true` if at least one value satisfies `predicate`.
    pub fn some<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&V) -> bool,
    {
        self.pairs().iter().any(|(_, value)| predicate(value))
    }

    /// Returns `true` if no value satisfies `predicate`.
    pub fn none<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&V) -> bool,
    {
        !self.some(predicate)
    }

    /// Returns the first value.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyCollectionError`] when the collection has no entries.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Collection, EmptyCollectionError};
    ///
    /// assert_eq!(Collection::from(vec![1, 2, 3]).head(), Ok(&1));
    /// assert_eq!(Collection::<i32>::new().head(), Err(EmptyCollectionError));
    /// ```
    pub fn head(&self) -> Result<&V, EmptyCollectionError> {
        self.pairs()
            .first()
            .map(|(_, value)| value)
            .ok_or(EmptyCollectionError)
    }
}

impl<V: Clone> Collection<V> {
    /// Keeps the entries whose value satisfies `predicate`; keys are kept.
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V) -> bool,
    {
        Self::from_store(
            self.pairs()
                .iter()
                .filter(|(_, value)| predicate(value))
                .cloned()
                .collect(),
        )
    }

    /// Alias for [`filter`](Self::filter).
    #[inline]
    pub fn select<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&V) -> bool,
    {
        self.filter(predicate)
    }

    /// Like [`filter`](Self::filter), stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `predicate`, unchanged.
    pub fn try_filter<E, P>(&self, mut predicate: P) -> Result<Self, E>
    where
        P: FnMut(&V) -> Result<bool, E>,
    {
        let mut entries = Entries::with_capacity(self.len());
        for (key, value) in self.pairs() {
            if predicate(value)? {
                entries.insert(key.clone(), value.clone());
            }
        }
        Ok(Self::from_store(entries))
    }

    /// Keeps the entries whose value does not satisfy `predicate`.
    pub fn reject<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&V) -> bool,
    {
        self.filter(|value| !predicate(value))
    }

    /// Reorders the entries by value with a three-way comparator.
    ///
    /// Every key keeps its value. The sort is stable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Collection, Key};
    ///
    /// let sorted = Collection::from(vec![3, 1, 2]).sort(|left, right| left.cmp(right));
    /// assert_eq!(
    ///     sorted.to_array(),
    ///     vec![(Key::Int(1), 1), (Key::Int(2), 2), (Key::Int(0), 3)]
    /// );
    /// ```
    pub fn sort<F>(&self, mut comparator: F) -> Self
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let mut pairs = self.pairs().to_vec();
        pairs.sort_by(|(_, left), (_, right)| comparator(left, right));
        Self::from_store(pairs.into_iter().collect())
    }

    /// Returns the window starting at `offset` spanning up to `length` entries.
    ///
    /// A negative `offset` counts from the end. `None` as `length` runs to the
    /// end and a negative `length` stops that many entries before the end.
    /// Unless `preserve_keys` is set, integer keys are renumbered from 0;
    /// string keys are always kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    ///
    /// let numbers = Collection::from(vec![1, 2, 3, 4]);
    /// assert_eq!(numbers.slice(1, Some(2), false).values(), vec![2, 3]);
    /// assert_eq!(numbers.slice(-2, None, false).values(), vec![3, 4]);
    /// assert_eq!(numbers.slice(0, Some(-1), false).values(), vec![1, 2, 3]);
    /// ```
    pub fn slice(&self, offset: isize, length: Option<isize>, preserve_keys: bool) -> Self {
        let (start, end) = window(self.len(), offset, length);
        let mut entries = Entries::with_capacity(end - start);
        for (key, value) in &self.pairs()[start..end] {
            if preserve_keys || !key.is_int() {
                entries.insert(key.clone(), value.clone());
            } else {
                entries.push_or_warn(value.clone());
            }
        }
        Self::from_store(entries)
    }

    /// Returns the first `length` entries; see [`slice`](Self::slice).
    pub fn take(&self, length: usize, preserve_keys: bool) -> Self {
        let length = isize::try_from(length).unwrap_or(isize::MAX);
        self.slice(0, Some(length), preserve_keys)
    }

    /// Returns every entry but the first, keys preserved.
    pub fn tail(&self) -> Self {
        Self::from_store(self.pairs().iter().skip(1).cloned().collect())
    }
}

/// Resolves offset and length bounds into a `start..end` range of indices.
fn window(len: usize, offset: isize, length: Option<isize>) -> (usize, usize) {
    let len = isize::try_from(len).unwrap_or(isize::MAX);
    let start = if offset < 0 {
        len.saturating_add(offset).max(0)
    } else {
        offset.min(len)
    };
    let end = match length {
        None => len,
        Some(length) if length < 0 => len.saturating_add(length).max(start),
        Some(length) => start.saturating_add(length).min(len),
    };
    (
        usize::try_from(start).unwrap_or(0),
        usize::try_from(end).unwrap_or(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4, 1, Some(2), (1, 3))]
    #[case(4, 0, None, (0, 4))]
    #[case(4, -1, None, (3, 4))]
    #[case(4, -10, Some(2), (0, 2))]
    #[case(4, 10, None, (4, 4))]
    #[case(4, 1, Some(-1), (1, 3))]
    #[case(4, 3, Some(-3), (3, 3))]
    #[case(4, 2, Some(100), (2, 4))]
    #[case(0, 0, Some(3), (0, 0))]
    #[case(4, isize::MIN, Some(isize::MAX), (0, 4))]
    fn test_window(
        #[case] len: usize,
        #[case] offset: isize,
        #[case] length: Option<isize>,
        #[case] expected: (usize, usize),
    ) {
        assert_eq!(window(len, offset, length), expected);
    }

    #[rstest]
    fn test_map_preserves_keys() {
        let collection = Collection::from_entries([("x", 1), ("y", 2)]);
        let mapped = collection.map(|value| value * 10);
        assert_eq!(
            mapped.to_array(),
            vec![(Key::from("x"), 10), (Key::from("y"), 20)]
        );
    }

    #[rstest]
    fn test_filter_keeps_original_keys() {
        let filtered = Collection::from(vec![1, 2, 3, 4]).filter(|value| value % 2 == 0);
        assert_eq!(filtered.to_array(), vec![(Key::Int(1), 2), (Key::Int(3), 4)]);
    }

    #[rstest]
    fn test_slice_renumbers_integer_keys_only() {
        let collection =
            Collection::from_entries([(Key::Int(5), 'a'), (Key::from("k"), 'b'), (Key::Int(9), 'c')]);
        let sliced = collection.slice(0, None, false);
        assert_eq!(
            sliced.to_array(),
            vec![(Key::Int(0), 'a'), (Key::from("k"), 'b'), (Key::Int(1), 'c')]
        );
    }

    #[rstest]
    fn test_slice_preserving_keys() {
        let sliced = Collection::from(vec![1, 2, 3, 4]).slice(1, Some(2), true);
        assert_eq!(sliced.to_array(), vec![(Key::Int(1), 2), (Key::Int(2), 3)]);
    }

    #[rstest]
    fn test_sort_is_stable() {
        let collection = Collection::from(vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')]);
        let sorted = collection.sort(|left, right| left.0.cmp(&right.0));
        let letters: Vec<char> = sorted.values().into_iter().map(|(_, letter)| letter).collect();
        assert_eq!(letters, vec!['b', 'd', 'a', 'c']);
    }

    #[rstest]
    fn test_tail_of_empty_is_empty() {
        let empty: Collection<i32> = Collection::new();
        assert!(empty.tail().is_empty());
    }

    #[rstest]
    fn test_tail_preserves_keys() {
        let tail = Collection::from(vec![1, 2, 3]).tail();
        assert_eq!(tail.to_array(), vec![(Key::Int(1), 2), (Key::Int(2), 3)]);
    }

    #[rstest]
    fn test_try_map_returns_callback_error_unchanged() {
        let result = Collection::from(vec!["1", "two"]).try_map(|text| {
            text.parse::<i32>()
                .map_err(|_| format!("not a number: {text}"))
        });
        assert_eq!(result, Err("not a number: two".to_string()));
    }

    #[rstest]
    fn test_try_map_success_keeps_keys() {
        let result: Result<Collection<i32>, String> =
            Collection::from_entries([("a", "1")]).try_map(|text| text.parse().map_err(|_| String::new()));
        assert_eq!(result.map(|collection| collection.to_array()), Ok(vec![(Key::from("a"), 1)]));
    }

    #[rstest]
    fn test_try_filter_stops_at_first_error() {
        let mut calls = 0;
        let result = Collection::from(vec![1, 2, 3]).try_filter(|value| {
            calls += 1;
            if *value == 2 { Err("boom") } else { Ok(true) }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 2);
    }

    #[rstest]
    fn test_try_reduce_and_try_each() {
        let collection = Collection::from(vec![1, 2, 3]);
        assert_eq!(
            collection.try_reduce(0, |total, value| Ok::<_, ()>(total + value)),
            Ok(6)
        );
        assert_eq!(
            collection.try_each(|value| if *value > 2 { Err(*value) } else { Ok(()) }),
            Err(3)
        );
    }
}
