//! Exact-match validator

use serde::Serialize;

use crate::foundation::{Validate, ValidationError, to_json};

/// Validates that a value equals an expected literal.
///
/// # Examples
///
/// ```
/// use formcast::validators::exactly;
/// use formcast::foundation::Validate;
///
/// let admin = exactly::<String, _>("admin");
/// assert!(admin.validate(&"admin".to_owned()).is_ok());
/// assert!(admin.validate(&"Admin".to_owned()).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Exactly<T> {
    /// The only accepted value.
    pub expected: T,
}

impl<T> Exactly<T> {
    /// Creates a new exact-match validator.
    #[must_use]
    pub const fn new(expected: T) -> Self {
        Self { expected }
    }
}

impl<T: PartialEq + Serialize> Validate for Exactly<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if *input == self.expected {
            Ok(())
        } else {
            Err(ValidationError::invalid_value(to_json(&self.expected)))
        }
    }
}

/// Creates an [`Exactly`] validator.
#[must_use]
pub fn exactly<T, E: Into<T>>(expected: E) -> Exactly<T> {
    Exactly::new(expected.into())
}

/// Alias of [`exactly`].
#[must_use]
pub fn literal<T, E: Into<T>>(expected: E) -> Exactly<T> {
    exactly(expected)
}
