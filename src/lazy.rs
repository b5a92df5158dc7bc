//! Deferred, single-pass keyed sequences.
//!
//! A [`LazyCollection`] wraps a cursor over `(Key, V)` pairs. Transformations
//! stack adapters onto the cursor without pulling it; only a terminal
//! operation ([`to_array`](LazyCollection::to_array),
//! [`persist`](LazyCollection::persist), [`reduce`](LazyCollection::reduce)
//! and friends) drains it. The source may be infinite as long as it is
//! bounded with [`take`](LazyCollection::take) or
//! [`slice`](LazyCollection::slice) before a terminal operation.
//!
//! # Examples
//!
//! ```rust
//! use keyseq::{Key, LazyCollection, LazyState};
//!
//! let mut squares = LazyCollection::from_values(1..)
//!     .map(|value: u64| value * value)
//!     .filter(|value| value % 2 == 1)
//!     .take(3);
//!
//! // Nothing has been pulled yet
//! assert_eq!(squares.state(), LazyState::Unconsumed);
//!
//! assert_eq!(
//!     squares.to_array(),
//!     vec![(Key::Int(0), 1), (Key::Int(2), 9), (Key::Int(4), 25)]
//! );
//!
//! // The cursor is exhausted
//! assert_eq!(squares.state(), LazyState::Consumed);
//! assert!(squares.to_array().is_empty());
//! ```

use std::fmt;

use crate::collection::Entries;
use crate::{Collection, Key};

/// Whether a [`LazyCollection`] has been drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LazyState {
    /// No terminal operation has run yet.
    Unconsumed,
    /// A terminal operation drained the cursor. Further terminal operations
    /// observe an empty sequence.
    Consumed,
}

/// A lazily evaluated, single-owner keyed sequence.
///
/// Transformations take `self` and return a new wrapper around the same
/// cursor. Terminal operations take `&mut self` and leave the wrapper in the
/// [`LazyState::Consumed`] state.
pub struct LazyCollection<'a, V> {
    source: Box<dyn Iterator<Item = (Key, V)> + 'a>,
    state: LazyState,
}

impl<'a, V: 'a> LazyCollection<'a, V> {
    fn from_source(source: impl Iterator<Item = (Key, V)> + 'a, state: LazyState) -> Self {
        Self {
            source: Box::new(source),
            state,
        }
    }

    /// Wraps `items`, keyed `0, 1, 2, ...` as they are pulled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Key, LazyCollection};
    ///
    /// let mut letters = LazyCollection::from_values(['a', 'b']);
    /// assert_eq!(letters.to_array(), vec![(Key::Int(0), 'a'), (Key::Int(1), 'b')]);
    /// ```
    pub fn from_values<I>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: 'a,
    {
        Self::from_source(
            items
                .into_iter()
                .enumerate()
                .map(|(index, value)| (Key::from(index), value)),
            LazyState::Unconsumed,
        )
    }

    /// Wraps `(key, value)` pairs, including an eager [`Collection`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Collection, LazyCollection};
    ///
    /// let eager = Collection::from_entries([("a", 1), ("b", 2)]);
    /// let mut lazy = LazyCollection::from_entries(eager.clone());
    /// assert_eq!(lazy.persist(), eager);
    /// ```
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<Key> + 'a,
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: 'a,
    {
        Self::from_source(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value)),
            LazyState::Unconsumed,
        )
    }

    /// Returns whether a terminal operation has drained the cursor.
    #[inline]
    pub const fn state(&self) -> LazyState {
        self.state
    }

    // =========================================================================
    // Terminal operations
    // =========================================================================

    /// Takes the cursor out, leaving an empty one and the `Consumed` state.
    fn drain(&mut self) -> Box<dyn Iterator<Item = (Key, V)> + 'a> {
        self.state = LazyState::Consumed;
        std::mem::replace(&mut self.source, Box::new(std::iter::empty()))
    }

    fn materialize(&mut self) -> Entries<V> {
        self.drain().collect()
    }

    /// Drains the chain into ordered `(key, value)` pairs.
    ///
    /// A key produced twice keeps its first position and its last value.
    pub fn to_array(&mut self) -> Vec<(Key, V)> {
        let pairs = self.materialize().into_pairs();
        tracing::trace!(entries = pairs.len(), "materialized lazy collection");
        pairs
    }

    /// Drains the chain into an eager [`Collection`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Collection, LazyCollection};
    ///
    /// let mut lazy = LazyCollection::from_values(vec![1, 2, 3]).map(|value| value * 10);
    /// assert_eq!(lazy.persist(), Collection::from(vec![10, 20, 30]));
    /// ```
    pub fn persist(&mut self) -> Collection<V> {
        let collection = Collection::from_store(self.materialize());
        tracing::trace!(entries = collection.len(), "materialized lazy collection");
        collection
    }

    /// Drains the chain into its values, keys discarded.
    pub fn values(&mut self) -> Vec<V> {
        self.to_array().into_iter().map(|(_, value)| value).collect()
    }

    /// Left fold over the remaining values.
    ///
    /// Never returns on an unbounded source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::LazyCollection;
    ///
    /// let mut numbers = LazyCollection::from_values(1..=4);
    /// assert_eq!(numbers.reduce(0, |sum, value| sum + value), 10);
    /// ```
    pub fn reduce<B, F>(&mut self, initial: B, mut function: F) -> B
    where
        F: FnMut(B, V) -> B,
    {
        self.drain()
            .fold(initial, |accumulator, (_, value)| function(accumulator, value))
    }

    /// Left fold that stops at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error `function` returns. The cursor is consumed
    /// either way.
    pub fn try_reduce<B, E, F>(&mut self, initial: B, mut function: F) -> Result<B, E>
    where
        F: FnMut(B, V) -> Result<B, E>,
    {
        self.drain()
            .try_fold(initial, |accumulator, (_, value)| function(accumulator, value))
    }

    /// Calls `function` on every remaining value.
    pub fn each<F>(&mut self, mut function: F)
    where
        F: FnMut(V),
    {
        self.drain().for_each(|(_, value)| function(value));
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Applies `function` to each value as it is pulled. Keys are kept.
    pub fn map<B, F>(self, mut function: F) -> LazyCollection<'a, B>
    where
        B: 'a,
        F: FnMut(V) -> B + 'a,
    {
        LazyCollection::from_source(
            self.source.map(move |(key, value)| (key, function(value))),
            self.state,
        )
    }

    /// Skips the values not satisfying `predicate`. Keys are kept.
    pub fn filter<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&V) -> bool + 'a,
    {
        Self::from_source(
            self.source.filter(move |(_, value)| predicate(value)),
            self.state,
        )
    }

    /// Alias for [`filter`](Self::filter).
    #[inline]
    pub fn select<P>(self, predicate: P) -> Self
    where
        P: FnMut(&V) -> bool + 'a,
    {
        self.filter(predicate)
    }

    /// Skips the values satisfying `predicate`.
    pub fn reject<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&V) -> bool + 'a,
    {
        self.filter(move |value| !predicate(value))
    }

    /// Pulls `self` to the end, then `other`.
    ///
    /// Integer keys of both sources are renumbered from 0 in pull order.
    /// String keys pass through; a repeated one overwrites in place when the
    /// result is materialized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Key, LazyCollection};
    ///
    /// let left = LazyCollection::from_entries([(Key::Int(4), 'a'), (Key::from("k"), 'b')]);
    /// let right = LazyCollection::from_values(['c']);
    /// assert_eq!(
    ///     left.merge(right).to_array(),
    ///     vec![(Key::Int(0), 'a'), (Key::from("k"), 'b'), (Key::Int(1), 'c')]
    /// );
    /// ```
    pub fn merge(self, other: Self) -> Self {
        let state = if self.state == LazyState::Consumed && other.state == LazyState::Consumed {
            LazyState::Consumed
        } else {
            LazyState::Unconsumed
        };
        let mut next_index = 0_i64;
        Self::from_source(
            self.source
                .chain(other.source)
                .map(move |(key, value)| match key {
                    Key::Int(_) => {
                        let renumbered = Key::Int(next_index);
                        next_index += 1;
                        (renumbered, value)
                    }
                    Key::Str(_) => (key, value),
                }),
            state,
        )
    }

    /// Yields at most `length` entries.
    pub fn take(self, length: usize) -> Self {
        Self::from_source(self.source.take(length), self.state)
    }

    /// Skips `offset` entries, then yields at most `length` of them, or all
    /// the rest when `length` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Key, LazyCollection};
    ///
    /// let mut window = LazyCollection::from_values(0..).slice(2, Some(2));
    /// assert_eq!(window.to_array(), vec![(Key::Int(2), 2), (Key::Int(3), 3)]);
    /// ```
    pub fn slice(self, offset: usize, length: Option<usize>) -> Self {
        let state = self.state;
        let skipped = self.source.skip(offset);
        match length {
            Some(length) => Self::from_source(skipped.take(length), state),
            None => Self::from_source(skipped, state),
        }
    }
}

impl<'a, V: 'a> IntoIterator for LazyCollection<'a, V> {
    type Item = (Key, V);
    type IntoIter = Box<dyn Iterator<Item = (Key, V)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.source
    }
}

impl<V> fmt::Debug for LazyCollection<'_, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LazyCollection")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a, V: 'a> crate::Enumerable for LazyCollection<'a, V> {
    type Item = V;
    type WithItem<B: Clone + 'static> = LazyCollection<'a, B>;

    fn map<B, F>(self, function: F) -> LazyCollection<'a, B>
    where
        F: FnMut(V) -> B + 'static,
        B: Clone + 'static,
    {
        Self::map(self, function)
    }

    fn filter<P>(self, predicate: P) -> Self
    where
        P: FnMut(&V) -> bool + 'static,
    {
        Self::filter(self, predicate)
    }

    fn reduce<B, F>(mut self, initial: B, function: F) -> B
    where
        F: FnMut(B, V) -> B,
    {
        Self::reduce(&mut self, initial, function)
    }

    fn to_array(mut self) -> Vec<(Key, V)> {
        Self::to_array(&mut self)
    }
}
