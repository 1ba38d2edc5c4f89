//! Length validator for strings and sequences
//!
//! String length is measured in Unicode scalar values (chars), sequence
//! length in elements.

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::foundation::{ErrorKind, Validate, ValidationError};
use crate::schema::Coerced;

// ============================================================================
// MEASURE
// ============================================================================

/// A value that may have a length.
///
/// `None` means the value is neither a string nor a sequence.
pub trait Measure {
    /// Returns the length, if the value has one.
    fn measure(&self) -> Option<usize>;
}

impl Measure for str {
    fn measure(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Measure for String {
    fn measure(&self) -> Option<usize> {
        self.as_str().measure()
    }
}

impl<T> Measure for [T] {
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> Measure for Vec<T> {
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Measure> Measure for Option<T> {
    fn measure(&self) -> Option<usize> {
        self.as_ref().and_then(Measure::measure)
    }
}

impl Measure for Value {
    fn measure(&self) -> Option<usize> {
        match self {
            Self::String(s) => s.measure(),
            Self::Array(items) => Some(items.len()),
            _ => None,
        }
    }
}

impl Measure for Coerced {
    fn measure(&self) -> Option<usize> {
        match self {
            Self::String(s) => s.measure(),
            Self::Array(items) => Some(items.len()),
            Self::Json(value) => value.measure(),
            _ => None,
        }
    }
}

// ============================================================================
// LENGTH
// ============================================================================

/// Validates that a length lies within `[min, max]`, both ends included.
///
/// Values without a length fail with `invalid_value`.
///
/// # Examples
///
/// ```
/// use formcast::validators::length;
/// use formcast::foundation::Validate;
///
/// assert!(length::<str>(2, 4).validate("abc").is_ok());
/// assert!(length::<Vec<u8>>(1, 2).validate(&vec![]).is_err());
/// ```
pub struct Length<T: ?Sized> {
    /// Minimum length (inclusive).
    pub min: usize,
    /// Maximum length (inclusive).
    pub max: usize,
    marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized> Length<T> {
    /// Creates a new length validator.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max,
            marker: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Length<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Length")
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

impl<T: ?Sized> Clone for Length<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Length<T> {}

impl<T: ?Sized + Measure> Validate for Length<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        match input.measure() {
            None => Err(ValidationError::new(ErrorKind::InvalidValue)),
            Some(len) if len < self.min || len > self.max => {
                Err(ValidationError::invalid_length(self.min, self.max))
            }
            Some(_) => Ok(()),
        }
    }
}

/// Creates a [`Length`] validator.
#[must_use]
pub const fn length<T: ?Sized>(min: usize, max: usize) -> Length<T> {
    Length::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("", false)]
    #[case("a", true)]
    #[case("abc", true)]
    #[case("abcd", false)]
    #[case("日本語", true)]
    fn test_string_length(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(length::<str>(1, 3).validate(input).is_ok(), ok);
    }

    #[test]
    fn test_error_params() {
        let error = length::<String>(2, 5).validate(&"a".to_owned()).unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidLength);
        assert_eq!(error.params.as_slice(), &[json!(2), json!(5)]);
    }

    #[test]
    fn test_sequence_length() {
        let validator = length::<Vec<f64>>(1, 2);
        assert!(validator.validate(&vec![1.0]).is_ok());
        assert!(validator.validate(&vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_value_without_length_is_invalid() {
        let error = length::<Value>(0, 10).validate(&json!(42)).unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidValue);
        assert!(length::<Value>(0, 10).validate(&json!(["a"])).is_ok());
    }

    #[test]
    fn test_missing_option_is_invalid() {
        let error = length::<Option<String>>(0, 1).validate(&None).unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidValue);
    }
}
