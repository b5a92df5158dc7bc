//! Keys of a keyed collection.
//!
//! Every entry of a [`Collection`](crate::Collection) or a
//! [`LazyCollection`](crate::LazyCollection) is addressed by a [`Key`],
//! which is either an integer or a string.
//!
//! # Examples
//!
//! ```rust
//! use keyseq::Key;
//!
//! assert_eq!(Key::from(3), Key::Int(3));
//! assert_eq!(Key::from("name"), Key::Str("name".to_string()));
//! assert!(Key::from(100) < Key::from("a"));
//! ```

use std::fmt;

/// The key of a collection entry.
///
/// Integer keys order before string keys. Integer keys compare numerically
/// and string keys lexicographically.
///
/// Keys built through `From` are canonical: a string that is the exact
/// decimal rendering of an `i64` becomes [`Key::Int`]. A hand-built
/// `Key::Str("1")` is not canonical and comes back from deserialization as
/// `Key::Int(1)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// An integer key.
    Int(i64),
    /// A string key.
    Str(String),
}

impl Key {
    /// Returns the integer value if this is an integer key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Key;
    ///
    /// assert_eq!(Key::Int(7).as_int(), Some(7));
    /// assert_eq!(Key::from("7").as_int(), Some(7));
    /// assert_eq!(Key::from("07").as_int(), None);
    /// ```
    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(index) => Some(*index),
            Self::Str(_) => None,
        }
    }

    /// Returns the string value if this is a string key.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(name) => Some(name),
        }
    }

    /// Returns `true` for integer keys.
    #[inline]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(index) => write!(formatter, "{index}"),
            Self::Str(name) => formatter.write_str(name),
        }
    }
}

macro_rules! impl_key_from_lossless_int {
    ($($source:ty),*) => {
        $(
            impl From<$source> for Key {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_key_from_lossless_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Key {
    /// Saturates at `i64::MAX`.
    #[inline]
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<u64> for Key {
    /// Saturates at `i64::MAX`.
    #[inline]
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for Key {
    /// `true` becomes `1` and `false` becomes `0`.
    #[inline]
    fn from(value: bool) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<char> for Key {
    /// Digits become integer keys, like every canonical decimal string.
    #[inline]
    fn from(value: char) -> Self {
        value
            .to_digit(10)
            .map_or_else(|| Self::Str(value.to_string()), |digit| Self::Int(i64::from(digit)))
    }
}

impl From<&str> for Key {
    /// The exact decimal rendering of an `i64` becomes an integer key.
    ///
    /// ```rust
    /// use keyseq::Key;
    ///
    /// assert_eq!(Key::from("-12"), Key::Int(-12));
    /// assert_eq!(Key::from("012"), Key::Str("012".to_string()));
    /// ```
    #[inline]
    fn from(value: &str) -> Self {
        parse_canonical_int(value).map_or_else(|| Self::Str(value.to_string()), Self::Int)
    }
}

impl From<String> for Key {
    /// The exact decimal rendering of an `i64` becomes an integer key.
    #[inline]
    fn from(value: String) -> Self {
        parse_canonical_int(&value).map_or(Self::Str(value), Self::Int)
    }
}

impl From<&String> for Key {
    #[inline]
    fn from(value: &String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&Key> for Key {
    #[inline]
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Int(index) => serializer.serialize_i64(*index),
            Self::Str(name) => serializer.serialize_str(name),
        }
    }
}

#[cfg(feature = "serde")]
struct KeyVisitor;

#[cfg(feature = "serde")]
impl serde::de::Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a string key")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Key::Int(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        i64::try_from(value)
            .map(Key::Int)
            .map_err(|_| E::custom(format!("integer key {value} exceeds i64::MAX")))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Key::from(value))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Key::from(value))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(KeyVisitor)
    }
}

/// Parses `text` only when it is the exact decimal rendering of an `i64`.
///
/// `"12"` and `"-3"` parse; `"012"`, `"+1"`, `"-0"` and `" 1"` do not.
fn parse_canonical_int(text: &str) -> Option<i64> {
    let parsed = text.parse::<i64>().ok()?;
    (parsed.to_string() == text).then_some(parsed)
}
