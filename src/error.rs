//! Error types for collection construction and access.
//!
//! Transformations never fail on their own. The library reports three
//! failures: an unsupported construction source ([`ArgumentError`]), the
//! head of an empty collection ([`EmptyCollectionError`]) and an append with
//! no integer key left ([`KeyOverflowError`]). Errors raised by
//! caller-supplied callbacks pass through untouched.

use thiserror::Error;

/// A collection was constructed from a value that is neither an array nor
/// an iterable.
///
/// # Examples
///
/// ```rust
/// use keyseq::ArgumentError;
///
/// let error = ArgumentError::new("boolean");
/// assert_eq!(
///     error.to_string(),
///     "Argument 1 must be an instance of an iterable or an array, boolean given"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Argument 1 must be an instance of an iterable or an array, {given} given")]
pub struct ArgumentError {
    /// The runtime type name of the rejected value.
    pub given: String,
}

impl ArgumentError {
    /// Creates an error naming the runtime type that was given.
    #[must_use]
    pub fn new(given: impl Into<String>) -> Self {
        Self {
            given: given.into(),
        }
    }
}

/// `head()` was called on a collection without entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot take the head of an empty collection")]
pub struct EmptyCollectionError;

/// `push` found no integer key left to append under.
///
/// The next integer key is one past the largest one ever used, so a
/// collection that once held `i64::MAX` can no longer append.
///
/// # Examples
///
/// ```rust
/// use keyseq::{Collection, KeyOverflowError};
///
/// let mut collection = Collection::from_entries([(i64::MAX, "last")]);
/// assert_eq!(collection.push("next"), Err(KeyOverflowError));
/// assert_eq!(collection.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot append: the next integer key is already occupied")]
pub struct KeyOverflowError;

/// Any error produced by this crate.
///
/// Lets callers propagate both error kinds with `?` from one function.
///
/// # Examples
///
/// ```rust
/// use keyseq::{Collection, CollectionError};
///
/// fn first_doubled(collection: &Collection<i32>) -> Result<i32, CollectionError> {
///     Ok(collection.head()? * 2)
/// }
///
/// assert_eq!(first_doubled(&Collection::from(vec![4, 5])), Ok(8));
/// assert!(first_doubled(&Collection::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// The construction source was rejected.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    /// The collection was empty.
    #[error(transparent)]
    Empty(#[from] EmptyCollectionError),
    /// No integer key was left to append under.
    #[error(transparent)]
    Overflow(#[from] KeyOverflowError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("NULL")]
    #[case("boolean")]
    #[case("string")]
    #[case("integer")]
    #[case("object")]
    fn test_argument_error_names_the_given_type(#[case] given: &str) {
        let error = ArgumentError::new(given);
        assert_eq!(
            error.to_string(),
            format!("Argument 1 must be an instance of an iterable or an array, {given} given")
        );
    }

    #[rstest]
    fn test_empty_collection_error_display() {
        assert_eq!(
            EmptyCollectionError.to_string(),
            "cannot take the head of an empty collection"
        );
    }

    #[rstest]
    fn test_collection_error_is_transparent() {
        let error = CollectionError::from(ArgumentError::new("double"));
        assert_eq!(
            error.to_string(),
            "Argument 1 must be an instance of an iterable or an array, double given"
        );
        assert_eq!(
            CollectionError::from(EmptyCollectionError),
            CollectionError::Empty(EmptyCollectionError)
        );
    }

    #[rstest]
    fn test_key_overflow_error_converts() {
        assert_eq!(
            CollectionError::from(KeyOverflowError).to_string(),
            "cannot append: the next integer key is already occupied"
        );
    }
}
