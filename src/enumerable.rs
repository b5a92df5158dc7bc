//! The capability surface shared by eager and lazy collections.
//!
//! [`Collection`](crate::Collection) and [`LazyCollection`](crate::LazyCollection)
//! differ in evaluation strategy only. [`Enumerable`] captures the operations
//! both support so that code can be written once and run against either.
//!
//! The element type changes under `map`, so the trait carries a generic
//! associated type naming "the same collection kind holding `B`". Callbacks
//! and element types are `'static` because a lazy implementation stores them
//! in its pending chain. Mapped element types are also `Clone`, since an
//! eager collection may share its storage.
//!
//! Bring the trait into scope only where code is generic over the strategy.
//! Its methods take `self` by value, so in method-call syntax they win over
//! the borrowing inherent methods of the same name.
//!
//! # Examples
//!
//! ```rust
//! use keyseq::{Collection, Enumerable, Key, LazyCollection};
//!
//! fn doubled_evens<E: Enumerable<Item = i32>>(source: E) -> Vec<(Key, i32)> {
//!     source.filter(|value| value % 2 == 0).map(|value| value * 2).to_array()
//! }
//!
//! let eager = doubled_evens(Collection::from(vec![1, 2, 3, 4]));
//! let lazy = doubled_evens(LazyCollection::from_values(vec![1, 2, 3, 4]));
//! assert_eq!(eager, lazy);
//! assert_eq!(eager, vec![(Key::Int(1), 4), (Key::Int(3), 8)]);
//! ```

use crate::Key;

/// Operations common to every collection evaluation strategy.
///
/// All methods consume the receiver. Implementations for eager collections
/// run each step immediately; implementations for lazy collections defer
/// everything except [`reduce`](Enumerable::reduce) and
/// [`to_array`](Enumerable::to_array).
pub trait Enumerable: Sized {
    /// The element type.
    type Item;

    /// The same collection kind with a different element type.
    type WithItem<B: Clone + 'static>: Enumerable<Item = B>;

    /// Transforms every element, keeping keys.
    fn map<B, F>(self, function: F) -> Self::WithItem<B>
    where
        F: FnMut(Self::Item) -> B + 'static,
        B: Clone + 'static;

    /// Keeps the elements satisfying `predicate`, keeping their keys.
    fn filter<P>(self, predicate: P) -> Self
    where
        P: FnMut(&Self::Item) -> bool + 'static;

    /// Drops the elements satisfying `predicate`.
    fn reject<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&Self::Item) -> bool + 'static,
    {
        self.filter(move |item| !predicate(item))
    }

    /// Left fold over the elements in iteration order.
    fn reduce<B, F>(self, initial: B, function: F) -> B
    where
        F: FnMut(B, Self::Item) -> B;

    /// Materializes the entries in iteration order.
    fn to_array(self) -> Vec<(Key, Self::Item)>;
}
