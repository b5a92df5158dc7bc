//! Construction from dynamic JSON values.
//!
//! Rust's type system already guarantees that the ordinary constructors
//! receive something iterable. A `serde_json::Value` is the one input whose
//! shape is only known at runtime, so it is where a non-iterable source is
//! rejected with an [`ArgumentError`].
//!
//! Only JSON arrays are accepted. A JSON object is a plain untyped object and
//! is rejected like every scalar.

use serde_json::Value;

use crate::{ArgumentError, Collection, Concatenable, Key, LazyCollection};

/// Runtime type name of a JSON value, as reported in [`ArgumentError`].
///
/// # Examples
///
/// ```rust
/// use keyseq::json::type_name;
/// use serde_json::json;
///
/// assert_eq!(type_name(&json!(null)), "NULL");
/// assert_eq!(type_name(&json!(1.5)), "double");
/// ```
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NULL",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_i64() || number.is_u64() => "integer",
        Value::Number(_) => "double",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Splits `value` into its array elements or the error rejecting it.
fn array_elements(value: Value) -> Result<Vec<Value>, ArgumentError> {
    match value {
        Value::Array(elements) => Ok(elements),
        other => {
            let given = type_name(&other);
            tracing::debug!(given, "rejected non-iterable collection source");
            Err(ArgumentError::new(given))
        }
    }
}

impl Collection<Value> {
    /// Builds a collection from a JSON array, keyed `0..n`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] naming the runtime type when `value` is not
    /// an array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use keyseq::Collection;
    /// use serde_json::json;
    ///
    /// let collection = Collection::try_from_json(json!([1, "two"])).unwrap();
    /// assert_eq!(collection.len(), 2);
    ///
    /// let error = Collection::try_from_json(json!("toto")).unwrap_err();
    /// assert_eq!(
    ///     error.to_string(),
    ///     "Argument 1 must be an instance of an iterable or an array, string given"
    /// );
    /// ```
    pub fn try_from_json(value: Value) -> Result<Self, ArgumentError> {
        array_elements(value).map(Self::from_values)
    }
}

impl LazyCollection<'static, Value> {
    /// Wraps the elements of a JSON array in a lazy collection.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] naming the runtime type when `value` is not
    /// an array.
    pub fn try_from_json(value: Value) -> Result<Self, ArgumentError> {
        array_elements(value).map(Self::from_values)
    }
}

impl Concatenable<Value> for Value {
    /// JSON arrays splice their elements; every other JSON value is skipped.
    fn spliced_entries(&self) -> Option<Vec<(Key, Value)>> {
        self.as_array().and_then(|elements| elements.spliced_entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(null), "NULL")]
    #[case(json!(true), "boolean")]
    #[case(json!("toto"), "string")]
    #[case(json!(15), "integer")]
    #[case(json!(u64::MAX), "integer")]
    #[case(json!(-2.5), "double")]
    #[case(json!({}), "object")]
    #[case(json!([]), "array")]
    fn test_type_name(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(type_name(&value), expected);
    }

    #[rstest]
    fn test_array_elements_accepts_arrays_only() {
        assert_eq!(array_elements(json!([1, 2])), Ok(vec![json!(1), json!(2)]));
        assert_eq!(
            array_elements(json!({"a": 1})),
            Err(ArgumentError::new("object"))
        );
    }

    #[rstest]
    fn test_concat_over_json_skips_scalars() {
        let nested = Collection::try_from_json(json!([[1, 2], 3, {"a": 4}, [5]])).unwrap();
        assert_eq!(nested.concat().values(), vec![json!(1), json!(2), json!(5)]);
    }
}
