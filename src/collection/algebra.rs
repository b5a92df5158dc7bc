//! Value-based set algebra, merging and one-level flattening.
//!
//! Set operations compare values with `PartialEq` and keep the receiver's
//! keys. [`Collection::merge`] and [`Collection::concat`] share
//! one splicing rule: integer keys are renumbered sequentially while a
//! repeated string key overwrites the earlier value in place.

use super::{Collection, Entries};
use crate::Key;

/// Values that `concat` and `flat_map` can splice into a collection.
///
/// Collections and arrays splice their entries. Anything else returns
/// `None` and is skipped silently.
///
/// # Examples
///
/// ```rust
/// use keyseq::Collection;
///
/// let nested = Collection::from(vec![Some(vec![1, 2]), None, Some(vec![3])]);
/// assert_eq!(nested.concat().values(), vec![1, 2, 3]);
/// ```
pub trait Concatenable<T> {
    /// Returns the entries to splice, or `None` when this value is not a
    /// collection or an array.
    fn spliced_entries(&self) -> Option<Vec<(Key, T)>>;
}

impl<T: Clone> Concatenable<T> for Collection<T> {
    fn spliced_entries(&self) -> Option<Vec<(Key, T)>> {
        Some(self.to_array())
    }
}

impl<T: Clone> Concatenable<T> for Vec<T> {
    fn spliced_entries(&self) -> Option<Vec<(Key, T)>> {
        self.as_slice().spliced_entries()
    }
}

impl<T: Clone, const N: usize> Concatenable<T> for [T; N] {
    fn spliced_entries(&self) -> Option<Vec<(Key, T)>> {
        self.as_slice().spliced_entries()
    }
}

impl<T: Clone> Concatenable<T> for [T] {
    fn spliced_entries(&self) -> Option<Vec<(Key, T)>> {
        Some(
            self.iter()
                .enumerate()
                .map(|(index, value)| (Key::from(index), value.clone()))
                .collect(),
        )
    }
}

impl<T, C: Concatenable<T>> Concatenable<T> for Option<C> {
    fn spliced_entries(&self) -> Option<Vec<(Key, T)>> {
        self.as_ref().and_then(|inner| inner.spliced_entries())
    }
}

/// Appends `entries` to `merged`: integer keys take the next sequential key,
/// string keys overwrite in place.
fn merge_into<T>(merged: &mut Entries<T>, entries: impl IntoIterator<Item = (Key, T)>) {
    for (key, value) in entries {
        if key.is_int() {
            merged.push_or_warn(value);
        } else {
            merged.insert(key, value);
        }
    }
}

impl<V: Clone> Collection<V> {
    /// Concatenates `other` after `self`.
    ///
    /// Integer keys of both sides are renumbered from 0; a string key of
    /// `other` that already exists overwrites the value in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    ///
    /// let merged = Collection::from(vec![1, 2, 3]).merge(&Collection::from(vec![4, 5, 6]));
    /// assert_eq!(merged.values(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = Entries::with_capacity(self.len() + other.len());
        merge_into(&mut merged, self.pairs().iter().cloned());
        merge_into(&mut merged, other.pairs().iter().cloned());
        Self::from_store(merged)
    }

    /// Maps every value to something [`Concatenable`] and flattens one level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    ///
    /// let expanded = Collection::from(vec![1, 2, 3, 4]).flat_map(|value| vec![*value, value + 1]);
    /// assert_eq!(expanded.values(), vec![1, 2, 2, 3, 3, 4, 4, 5]);
    /// ```
    pub fn flat_map<T, C, F>(&self, mut function: F) -> Collection<T>
    where
        C: Concatenable<T>,
        F: FnMut(&V) -> C,
    {
        let mut flattened = Entries::with_capacity(self.len());
        for (_, value) in self.pairs() {
            if let Some(entries) = function(value).spliced_entries() {
                merge_into(&mut flattened, entries);
            }
        }
        Collection::from_store(flattened)
    }

    /// Alias for [`flat_map`](Self::flat_map).
    #[inline]
    pub fn mapcat<T, C, F>(&self, function: F) -> Collection<T>
    where
        C: Concatenable<T>,
        F: FnMut(&V) -> C,
    {
        self.flat_map(function)
    }
}

impl<V: Clone + PartialEq> Collection<V> {
    /// Keeps the entries whose value does not appear in `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Collection, Key};
    ///
    /// let difference = Collection::from(vec![1, 2, 3, 4]).difference(&Collection::from(vec![2, 3]));
    /// assert_eq!(difference.to_array(), vec![(Key::Int(0), 1), (Key::Int(3), 4)]);
    /// ```
    pub fn difference(&self, other: &Self) -> Self {
        self.filter(|value| !other.contains_value(value))
    }

    /// Keeps the entries whose value also appears in `other`.
    pub fn intersection(&self, other: &Self) -> Self {
        self.filter(|value| other.contains_value(value))
    }

    /// Removes repeated values, keeping the first occurrence and its key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Collection, Key};
    ///
    /// let distinct = Collection::from(vec![1, 6, 1, 3, 6]).distinct();
    /// assert_eq!(
    ///     distinct.to_array(),
    ///     vec![(Key::Int(0), 1), (Key::Int(1), 6), (Key::Int(3), 3)]
    /// );
    /// ```
    pub fn distinct(&self) -> Self {
        let mut seen: Vec<&V> = Vec::with_capacity(self.len());
        let mut entries = Entries::with_capacity(self.len());
        for (key, value) in self.pairs() {
            if !seen.contains(&value) {
                seen.push(value);
                entries.insert(key.clone(), value.clone());
            }
        }
        Self::from_store(entries)
    }

    /// Returns `true` if some value equals `value`.
    pub fn contains_value(&self, value: &V) -> bool {
        self.pairs().iter().any(|(_, candidate)| candidate == value)
    }
}

impl<C> Collection<C> {
    /// Flattens a collection of collections (or arrays) one level.
    ///
    /// Elements that are neither are skipped. Entries are spliced with the
    /// [`merge`](Collection::merge) rules.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    ///
    /// let nested = Collection::from(vec![Collection::from(vec![1, 2, 3]), Collection::from(vec![4, 5, 6])]);
    /// assert_eq!(nested.concat().values(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn concat<T>(&self) -> Collection<T>
    where
        C: Concatenable<T>,
    {
        let mut flattened = Entries::with_capacity(self.len());
        for (_, element) in self.pairs() {
            if let Some(entries) = element.spliced_entries() {
                merge_into(&mut flattened, entries);
            }
        }
        Collection::from_store(flattened)
    }
}
