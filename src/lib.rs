//! # keyseq
//!
//! Immutable, ordered keyed collections with two evaluation strategies.
//!
//! ## Overview
//!
//! Every collection maps [`Key`]s (integers or strings) to values and keeps
//! insertion order. Two flavours share the same vocabulary:
//!
//! - **[`Collection`]**: fully materialized. Every transformation borrows the
//!   receiver and returns a new collection immediately.
//! - **[`LazyCollection`]**: a single-pass cursor. Transformations stack up
//!   without pulling the source until a terminal operation drains it.
//!
//! Code that should not care which strategy it runs against can be written
//! once over the [`Enumerable`] trait.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Key`] and [`Collection`]
//! - `json`: construction from `serde_json::Value` (implies `serde`)
//! - `arc`: share collection storage through `Arc` instead of `Rc`
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use keyseq::prelude::*;
//!
//! let people = Collection::from_entries([("alice", 31), ("bob", 17), ("carol", 45)]);
//! let adults = people.filter(|age| *age >= 18);
//! assert_eq!(adults.keys().collect::<Vec<_>>(), vec![&Key::from("alice"), &Key::from("carol")]);
//!
//! let mut total = LazyCollection::from_entries(adults).map(|age| age * 2);
//! assert_eq!(total.reduce(0, |sum, age| sum + age), 152);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the collection types, their key and error types, and the
/// traits used by `concat` and `group_by`.
///
/// [`Enumerable`] is not part of the prelude: its by-value methods would
/// shadow the borrowing inherent methods of the same name.
///
/// # Usage
///
/// ```rust
/// use keyseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collection::{Collection, Concatenable, IntoGroupKeys};
    pub use crate::error::{
        ArgumentError, CollectionError, EmptyCollectionError, KeyOverflowError,
    };
    pub use crate::key::Key;
    pub use crate::lazy::{LazyCollection, LazyState};
}

mod collection;
mod enumerable;
mod error;
mod key;
mod lazy;

#[cfg(feature = "json")]
pub mod json;

pub use collection::{
    Collection, CollectionIntoIterator, CollectionIterator, Concatenable, GroupKeys,
    IntoGroupKeys,
};
pub use enumerable::Enumerable;
pub use error::{ArgumentError, CollectionError, EmptyCollectionError, KeyOverflowError};
pub use key::Key;
pub use lazy::{LazyCollection, LazyState};

static_assertions::assert_impl_all!(Key: Send, Sync, Clone, Ord, std::hash::Hash);
static_assertions::assert_impl_all!(ArgumentError: Send, Sync, std::error::Error);
static_assertions::assert_impl_all!(CollectionError: Send, Sync, std::error::Error);
static_assertions::assert_not_impl_any!(LazyCollection<'static, i32>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Collection<i32>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Collection<i32>: Send, Sync);
