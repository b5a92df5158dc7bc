//! Eager, immutable, ordered keyed collections.
//!
//! A [`Collection`] maps [`Key`]s to values and remembers insertion order.
//! It is fully materialized: every transformation runs immediately and
//! returns a new collection, leaving the receiver untouched.
//!
//! # Structural Sharing
//!
//! Entries live behind a reference counter, so cloning a collection is O(1).
//! The direct primitives ([`Collection::push`], [`Collection::insert`],
//! [`Collection::remove`]) copy the entries on write when they are shared.
//!
//! # Examples
//!
//! ```rust
//! use keyseq::{Collection, Key};
//!
//! let numbers = Collection::from(vec![1, 2, 3, 4]);
//! let evens = numbers.filter(|value| value % 2 == 0);
//!
//! // Keys survive filtering
//! assert_eq!(evens.to_array(), vec![(Key::Int(1), 2), (Key::Int(3), 4)]);
//!
//! // The receiver is never modified
//! assert_eq!(numbers.values(), vec![1, 2, 3, 4]);
//! ```

mod algebra;
mod grouping;
mod operations;

pub use algebra::Concatenable;
pub use grouping::{GroupKeys, IntoGroupKeys};

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{Key, KeyOverflowError};

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// `std::sync::Arc` with the `arc` feature, `std::rc::Rc` otherwise.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

// =============================================================================
// Entries
// =============================================================================

/// Ordered, key-unique entry storage.
///
/// `positions` maps every key to its index in `pairs`. `next_index` is the key
/// [`Entries::push`] assigns: one past the largest non-negative integer key
/// ever inserted, or `None` once `i64::MAX` has been used.
#[derive(Clone)]
pub(crate) struct Entries<V> {
    pairs: Vec<(Key, V)>,
    positions: HashMap<Key, usize>,
    next_index: Option<i64>,
}

impl<V> Entries<V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            next_index: Some(0),
        }
    }

    /// Sets `key`, overwriting the value in place when the key exists.
    pub(crate) fn insert(&mut self, key: Key, value: V) -> Option<V> {
        if let Key::Int(index) = key {
            self.next_index = match (self.next_index, index.checked_add(1)) {
                (Some(next), Some(following)) => Some(next.max(following)),
                _ => None,
            };
        }
        match self.positions.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.pairs[position].1, value)),
            None => {
                self.positions.insert(key.clone(), self.pairs.len());
                self.pairs.push((key, value));
                None
            }
        }
    }

    /// Appends `value` under the next integer key.
    pub(crate) fn push(&mut self, value: V) -> Result<(), KeyOverflowError> {
        let index = self.next_index.ok_or(KeyOverflowError)?;
        self.insert(Key::Int(index), value);
        Ok(())
    }

    /// Like [`Entries::push`], dropping `value` with a warning when no
    /// integer key is left.
    pub(crate) fn push_or_warn(&mut self, value: V) {
        if let Err(error) = self.push(value) {
            tracing::warn!(%error, "dropped appended value");
        }
    }

    /// Returns the value under `key`, inserting `default()` first when absent.
    pub(crate) fn get_or_insert_with(&mut self, key: Key, default: impl FnOnce() -> V) -> &mut V {
        let position = match self.positions.get(&key) {
            Some(&position) => position,
            None => {
                self.insert(key, default());
                self.pairs.len() - 1
            }
        };
        &mut self.pairs[position].1
    }

    fn remove(&mut self, key: &Key) -> Option<V> {
        let position = self.positions.remove(key)?;
        let (_, value) = self.pairs.remove(position);
        for (shifted, (key, _)) in self.pairs.iter().enumerate().skip(position) {
            self.positions.insert(key.clone(), shifted);
        }
        Some(value)
    }

    fn get(&self, key: &Key) -> Option<&V> {
        self.positions
            .get(key)
            .map(|&position| &self.pairs[position].1)
    }

    /// Returns `true` when the keys are exactly `0, 1, ..., len - 1` in order.
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    fn is_list(&self) -> bool {
        self.pairs
            .iter()
            .zip(0_i64..)
            .all(|((key, _), expected)| *key == Key::Int(expected))
    }

    pub(crate) fn into_pairs(self) -> Vec<(Key, V)> {
        self.pairs
    }
}

impl<V> FromIterator<(Key, V)> for Entries<V> {
    fn from_iter<I: IntoIterator<Item = (Key, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut entries = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            entries.insert(key, value);
        }
        entries
    }
}

// =============================================================================
// Collection
// =============================================================================

/// An immutable, ordered mapping from [`Key`] to `V`.
///
/// Keys are unique and iteration follows insertion order. Transformations
/// borrow the receiver and allocate a new collection.
///
/// # Examples
///
/// ```rust
/// use keyseq::Collection;
///
/// let words = Collection::from_entries([("first", "alpha"), ("second", "beta")]);
/// assert_eq!(words.get(&"second".into()), Some(&"beta"));
/// assert_eq!(words.len(), 2);
/// ```
pub struct Collection<V> {
    entries: ReferenceCounter<Entries<V>>,
}

impl<V> Collection<V> {
    /// Creates an empty collection.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(Entries::with_capacity(0))
    }

    #[inline]
    pub(crate) fn from_store(entries: Entries<V>) -> Self {
        Self {
            entries: ReferenceCounter::new(entries),
        }
    }

    /// Builds a collection keyed `0..n` from `items`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Collection, Key};
    ///
    /// let collection = Collection::from_values(["a", "b"]);
    /// assert_eq!(collection.to_array(), vec![(Key::Int(0), "a"), (Key::Int(1), "b")]);
    /// ```
    pub fn from_values<I: IntoIterator<Item = V>>(items: I) -> Self {
        Self::from_store(
            items
                .into_iter()
                .enumerate()
                .map(|(index, value)| (Key::from(index), value))
                .collect(),
        )
    }

    /// Builds a collection from `(key, value)` pairs.
    ///
    /// A repeated key overwrites the earlier value and keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    ///
    /// let collection = Collection::from_entries([("a", 1), ("b", 2), ("a", 3)]);
    /// assert_eq!(collection.values(), vec![3, 2]);
    /// ```
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_store(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.pairs.len()
    }

    /// Returns `true` if the collection has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.pairs.is_empty()
    }

    /// Returns the value stored under `key`.
    #[inline]
    pub fn get(&self, key: &Key) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.positions.contains_key(key)
    }

    /// Returns the keys in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.pairs.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over `(&Key, &V)` in iteration order.
    #[inline]
    pub fn iter(&self) -> CollectionIterator<'_, V> {
        CollectionIterator {
            inner: self.entries.pairs.iter(),
        }
    }

    #[inline]
    pub(crate) fn pairs(&self) -> &[(Key, V)] {
        &self.entries.pairs
    }
}

impl<V: Clone> Collection<V> {
    /// Snapshot of the entries in iteration order.
    pub fn to_array(&self) -> Vec<(Key, V)> {
        self.entries.pairs.clone()
    }

    /// Snapshot of the values in iteration order, keys discarded.
    pub fn values(&self) -> Vec<V> {
        self.entries
            .pairs
            .iter()
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Appends `value` under the next integer key.
    ///
    /// This is a direct primitive: it mutates the receiver, copying shared
    /// entries first.
    ///
    /// # Errors
    ///
    /// Returns [`KeyOverflowError`] once `i64::MAX` has been used as a key.
    /// The collection is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Collection, Key};
    ///
    /// let original = Collection::from_entries([(5, "five")]);
    /// let mut extended = original.clone();
    /// assert_eq!(extended.push("six"), Ok(()));
    ///
    /// assert_eq!(extended.get(&Key::Int(6)), Some(&"six"));
    /// assert_eq!(original.len(), 1);
    /// ```
    pub fn push(&mut self, value: V) -> Result<(), KeyOverflowError> {
        if self.entries.next_index.is_none() {
            return Err(KeyOverflowError);
        }
        ReferenceCounter::make_mut(&mut self.entries).push(value)
    }

    /// Sets `key` to `value`, returning the previous value.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<Key>, value: V) -> Option<V> {
        ReferenceCounter::make_mut(&mut self.entries).insert(key.into(), value)
    }

    /// Unsets `key`, returning its value.
    pub fn remove(&mut self, key: &Key) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        ReferenceCounter::make_mut(&mut self.entries).remove(key)
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Borrowing iterator over a [`Collection`], yielding `(&Key, &V)`.
pub struct CollectionIterator<'a, V> {
    inner: std::slice::Iter<'a, (Key, V)>,
}

impl<'a, V> Iterator for CollectionIterator<'a, V> {
    type Item = (&'a Key, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for CollectionIterator<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl<V> ExactSizeIterator for CollectionIterator<'_, V> {}

/// Owning iterator over a [`Collection`], yielding `(Key, V)`.
///
/// Values are moved out when the collection was the only owner of its
/// entries and cloned otherwise.
pub struct CollectionIntoIterator<V> {
    inner: std::vec::IntoIter<(Key, V)>,
}

impl<V> Iterator for CollectionIntoIterator<V> {
    type Item = (Key, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for CollectionIntoIterator<V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for CollectionIntoIterator<V> {}

impl<V: Clone> IntoIterator for Collection<V> {
    type Item = (Key, V);
    type IntoIter = CollectionIntoIterator<V>;

    fn into_iter(self) -> Self::IntoIter {
        let pairs = ReferenceCounter::try_unwrap(self.entries)
            .map_or_else(|shared| shared.pairs.clone(), |owned| owned.pairs);
        CollectionIntoIterator {
            inner: pairs.into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a Collection<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = CollectionIterator<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<V> Clone for Collection<V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            entries: ReferenceCounter::clone(&self.entries),
        }
    }
}

impl<V> Default for Collection<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<V> for Collection<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<V> From<Vec<V>> for Collection<V> {
    #[inline]
    fn from(values: Vec<V>) -> Self {
        Self::from_values(values)
    }
}

impl<V, const N: usize> From<[V; N]> for Collection<V> {
    #[inline]
    fn from(values: [V; N]) -> Self {
        Self::from_values(values)
    }
}

impl<V: Clone> Extend<V> for Collection<V> {
    /// Appends every value under the next integer keys. Values arriving
    /// after `i64::MAX` has been used are dropped with a warning.
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        let entries = ReferenceCounter::make_mut(&mut self.entries);
        for value in iter {
            entries.push_or_warn(value);
        }
    }
}

impl<V: PartialEq> PartialEq for Collection<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.pairs == other.entries.pairs
    }
}

impl<V: Eq> Eq for Collection<V> {}

impl<V: Hash> Hash for Collection<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Collection<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for Collection<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Enumerable
// =============================================================================

impl<V: Clone> crate::Enumerable for Collection<V> {
    type Item = V;
    type WithItem<B: Clone + 'static> = Collection<B>;

    fn map<B, F>(self, mut function: F) -> Collection<B>
    where
        F: FnMut(V) -> B + 'static,
        B: Clone + 'static,
    {
        Collection::from_store(
            self.into_iter()
                .map(|(key, value)| (key, function(value)))
                .collect(),
        )
    }

    fn filter<P>(self, predicate: P) -> Self
    where
        P: FnMut(&V) -> bool + 'static,
    {
        Self::filter(&self, predicate)
    }

    fn reduce<B, F>(self, initial: B, mut function: F) -> B
    where
        F: FnMut(B, V) -> B,
    {
        self.into_iter()
            .fold(initial, |accumulator, (_, value)| function(accumulator, value))
    }

    fn to_array(self) -> Vec<(Key, V)> {
        self.into_iter().collect()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<V: serde::Serialize> serde::Serialize for Collection<V> {
    /// Serializes as a sequence when the keys are exactly `0..n`, and as a
    /// map otherwise.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.entries.is_list() {
            use serde::ser::SerializeSeq;
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (_, value) in self {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            use serde::ser::SerializeMap;
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

#[cfg(feature = "serde")]
struct CollectionVisitor<V> {
    marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<V> CollectionVisitor<V> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, V> serde::de::Visitor<'de> for CollectionVisitor<V>
where
    V: serde::Deserialize<'de>,
{
    type Value = Collection<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence or a map")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut entries = Entries::with_capacity(capacity);
        while let Some(value) = seq.next_element()? {
            entries.push(value).map_err(serde::de::Error::custom)?;
        }
        Ok(Collection::from_store(entries))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = map.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut entries = Entries::with_capacity(capacity);
        while let Some((key, value)) = map.next_entry::<Key, V>()? {
            entries.insert(key, value);
        }
        Ok(Collection::from_store(entries))
    }
}

#[cfg(feature = "serde")]
impl<'de, V> serde::Deserialize<'de> for Collection<V>
where
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(CollectionVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
