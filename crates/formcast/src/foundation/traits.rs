//! Core traits for coercion and validation
//!
//! This module defines the two seams of the crate: [`Valuer`] turns an
//! untyped raw value into a typed one, [`Validate`] checks a typed value
//! after coercion succeeded.

use std::borrow::Cow;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::combinators::{
    Checked, Fallback, NumberCast, Nullable, Optional, ToNumber, WithMessage,
};
use crate::foundation::{Context, ErrorKind, Failure, ValidationError};

// ============================================================================
// VALIDATOR TRAIT
// ============================================================================

/// A post-coercion predicate.
///
/// Validators do not know which field they run for; the composition
/// operator ([`Checked`]) stamps the field and the offending value onto the
/// error they return.
///
/// # Examples
///
/// ```rust
/// use formcast::foundation::{Validate, ValidationError};
///
/// struct Even;
///
/// impl Validate for Even {
///     type Input = f64;
///
///     fn validate(&self, input: &f64) -> Result<(), ValidationError> {
///         if input % 2.0 == 0.0 {
///             Ok(())
///         } else {
///             Err(ValidationError::new("not_even"))
///         }
///     }
/// }
///
/// assert!(Even.validate(&4.0).is_ok());
/// assert!(Even.validate(&3.0).is_err());
/// ```
pub trait Validate {
    /// The type being validated (can be `?Sized` for `str` and slices).
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

// ============================================================================
// VALUER TRAIT
// ============================================================================

/// Whether a field holds one value or a list of values.
///
/// Multi-valued sources such as form data use this to decide between
/// "get" and "get all" for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    /// One value per key.
    #[default]
    Scalar,
    /// Every value submitted under the key, in order.
    List,
}

/// Coerces an untyped raw value into `Self::Output` for one field.
///
/// `raw` is `None` when the key is missing from the input.
pub trait Valuer {
    /// The coerced type.
    type Output;

    /// Coerces `raw`, or fails with typed errors.
    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Self::Output, Failure>;

    /// The shape of input this valuer expects.
    fn shape(&self) -> Shape {
        Shape::Scalar
    }
}

impl<V: Valuer + ?Sized> Valuer for Box<V> {
    type Output = V::Output;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Self::Output, Failure> {
        (**self).coerce(raw, cx)
    }

    fn shape(&self) -> Shape {
        (**self).shape()
    }
}

impl<V: Valuer + ?Sized> Valuer for Arc<V> {
    type Output = V::Output;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Self::Output, Failure> {
        (**self).coerce(raw, cx)
    }

    fn shape(&self) -> Shape {
        (**self).shape()
    }
}

// ============================================================================
// VALUER EXTENSION TRAIT
// ============================================================================

/// Extension trait providing modifier methods for valuers.
///
/// Automatically implemented for every [`Valuer`].
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde_json::json;
///
/// let age = number().check(minmax(0.0, 120.0)).optional();
///
/// assert_eq!(age.coerce_field(Some(&json!("")), "age").unwrap(), None);
/// assert_eq!(age.coerce_field(Some(&json!("35")), "age").unwrap(), Some(35.0));
/// assert!(age.coerce_field(Some(&json!("150")), "age").is_err());
/// ```
pub trait ValuerExt: Valuer + Sized {
    /// Attaches a validator that runs after successful coercion.
    ///
    /// Chaining `.check(..)` on the result adds further validators to the
    /// same field; all of them run even when an earlier one fails.
    fn check<C>(self, validator: C) -> Checked<Self>
    where
        C: Validate<Input = Self::Output> + Send + Sync + 'static,
        Self::Output: Serialize,
    {
        Checked::new(self).check(validator)
    }

    /// Absent input becomes `None`.
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    /// Absent input becomes [`OrNull::Null`](crate::combinators::OrNull).
    fn nullable(self) -> Nullable<Self> {
        Nullable::new(self)
    }

    /// Absent input becomes `default`.
    fn fallback(self, default: Self::Output) -> Fallback<Self>
    where
        Self::Output: Clone,
    {
        Fallback::new(self, default)
    }

    /// Casts the coerced value to a number.
    fn to_number(self) -> ToNumber<Self>
    where
        Self::Output: NumberCast,
    {
        ToNumber::new(self)
    }

    /// Replaces the message of every error this valuer reports.
    fn with_message(self, message: impl Into<Cow<'static, str>>) -> WithMessage<Self> {
        WithMessage::new(self, message)
    }

    /// Replaces the kind of every error this valuer reports.
    fn with_code(self, kind: impl Into<ErrorKind>) -> WithMessage<Self> {
        WithMessage::code_only(self, kind)
    }

    /// Coerces outside a schema, with the default configuration.
    fn coerce_field(&self, raw: Option<&Value>, field: &str) -> Result<Self::Output, Failure> {
        self.coerce(raw, &Context::detached(field))
    }
}

impl<T: Valuer> ValuerExt for T {}
