//! Partitioning a collection by classifier keys.

use smallvec::{SmallVec, smallvec};

use super::{Collection, Entries};
use crate::Key;

/// The group identifiers returned by a `group_by` classifier.
///
/// Most classifiers name one or two groups, which stay inline.
pub type GroupKeys = SmallVec<[Key; 2]>;

/// Classifier results accepted by [`Collection::group_by`].
///
/// A classifier names one group (an integer, a string, a `char`, a [`Key`]
/// or a `bool`), several groups (a `Vec`, an array or a slice of those) or
/// possibly none (an `Option`).
///
/// `bool` is the only non-key type accepted: `true` names group `1` and
/// `false` names group `0`. Other types, floats included, are rejected at
/// compile time instead of being coerced.
///
/// # Examples
///
/// ```rust
/// use keyseq::{IntoGroupKeys, Key};
///
/// assert_eq!(true.into_group_keys().as_slice(), &[Key::Int(1)]);
/// assert_eq!(vec!["a", "b"].into_group_keys().len(), 2);
/// assert!(None::<i32>.into_group_keys().is_empty());
/// ```
pub trait IntoGroupKeys {
    /// Converts the classifier result into group identifiers.
    fn into_group_keys(self) -> GroupKeys;
}

macro_rules! impl_single_group_key {
    ($($source:ty),*) => {
        $(
            impl IntoGroupKeys for $source {
                #[inline]
                fn into_group_keys(self) -> GroupKeys {
                    smallvec![Key::from(self)]
                }
            }
        )*
    };
}

impl_single_group_key!(
    Key, i8, i16, i32, i64, u8, u16, u32, u64, usize, bool, char, String
);

impl IntoGroupKeys for &str {
    #[inline]
    fn into_group_keys(self) -> GroupKeys {
        smallvec![Key::from(self)]
    }
}

impl<K: Into<Key>> IntoGroupKeys for Vec<K> {
    fn into_group_keys(self) -> GroupKeys {
        self.into_iter().map(Into::into).collect()
    }
}

impl<K: Into<Key>, const N: usize> IntoGroupKeys for [K; N] {
    fn into_group_keys(self) -> GroupKeys {
        self.into_iter().map(Into::into).collect()
    }
}

impl<K: Into<Key> + Clone> IntoGroupKeys for &[K] {
    fn into_group_keys(self) -> GroupKeys {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl<K: Into<Key>> IntoGroupKeys for Option<K> {
    fn into_group_keys(self) -> GroupKeys {
        self.into_iter().map(Into::into).collect()
    }
}

impl IntoGroupKeys for GroupKeys {
    #[inline]
    fn into_group_keys(self) -> GroupKeys {
        self
    }
}

impl<V: Clone> Collection<V> {
    /// Partitions the entries by the group keys `classifier(value, key)` names.
    ///
    /// A value named into several groups is placed into each of them. Groups
    /// appear in the order their key is first produced. Members receive fresh
    /// sequential keys unless `preserve_keys` is set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::{Collection, Key};
    ///
    /// let ages = Collection::from(vec![10, 30, 20]);
    /// let grouped = ages.group_by(|age, _| *age <= 25, false);
    ///
    /// assert_eq!(grouped.len(), 2);
    /// assert_eq!(grouped.get(&Key::from(true)).map(Collection::values), Some(vec![10, 20]));
    /// assert_eq!(grouped.get(&Key::from(false)).map(Collection::values), Some(vec![30]));
    /// ```
    pub fn group_by<G, F>(&self, mut classifier: F, preserve_keys: bool) -> Collection<Self>
    where
        G: IntoGroupKeys,
        F: FnMut(&V, &Key) -> G,
    {
        let mut groups: Entries<Entries<V>> = Entries::with_capacity(0);
        for (key, value) in self.pairs() {
            for group_key in classifier(value, key).into_group_keys() {
                let members = groups.get_or_insert_with(group_key, || Entries::with_capacity(1));
                if preserve_keys {
                    members.insert(key.clone(), value.clone());
                } else {
                    members.push_or_warn(value.clone());
                }
            }
        }
        tracing::trace!(groups = groups.pairs.len(), "grouped collection");
        Collection::from_store(
            groups
                .pairs
                .into_iter()
                .map(|(group_key, members)| (group_key, Self::from_store(members)))
                .collect(),
        )
    }
}
