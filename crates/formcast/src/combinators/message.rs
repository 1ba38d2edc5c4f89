//! MESSAGE combinator - custom error messages and kinds

use std::borrow::Cow;

use serde_json::Value;

use crate::foundation::{
    Context, ErrorKind, Failure, Shape, Validate, ValidationError, Valuer,
};

// ============================================================================
// WITH MESSAGE COMBINATOR
// ============================================================================

/// Replaces the message and/or kind of every error the inner valuer or
/// validator reports.
///
/// Field, value, params and cause are kept. Un-typed failures pass through.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde_json::json;
///
/// let age = number().with_message("Age must be a number");
///
/// let failure = age.coerce_field(Some(&json!("old")), "age").unwrap_err();
/// let error = failure.errors().unwrap().first().unwrap();
/// assert_eq!(error.message, "Age must be a number");
/// assert_eq!(error.kind, ErrorKind::ExpectedNumber);
/// ```
#[derive(Debug, Clone)]
pub struct WithMessage<V> {
    inner: V,
    message: Option<Cow<'static, str>>,
    kind: Option<ErrorKind>,
}

impl<V> WithMessage<V> {
    /// Creates a new WithMessage combinator with a custom message.
    pub fn new(inner: V, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            inner,
            message: Some(message.into()),
            kind: None,
        }
    }

    /// Creates a combinator that only overrides the error kind, keeping the
    /// original message.
    pub fn code_only(inner: V, kind: impl Into<ErrorKind>) -> Self {
        Self {
            inner,
            message: None,
            kind: Some(kind.into()),
        }
    }

    /// Also replaces the error kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_code(mut self, kind: impl Into<ErrorKind>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Returns a reference to the inner valuer or validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Returns the custom message, if set.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the custom kind, if set.
    pub fn kind(&self) -> Option<&ErrorKind> {
        self.kind.as_ref()
    }

    fn rewrite(&self, mut error: ValidationError) -> ValidationError {
        if let Some(kind) = &self.kind {
            error.kind = kind.clone();
        }
        if let Some(message) = &self.message {
            error.message = message.clone();
        }
        error
    }
}

impl<V: Valuer> Valuer for WithMessage<V> {
    type Output = V::Output;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<V::Output, Failure> {
        self.inner
            .coerce(raw, cx)
            .map_err(|failure| failure.map_errors(|error| self.rewrite(error)))
    }

    fn shape(&self) -> Shape {
        self.inner.shape()
    }
}

impl<V: Validate> Validate for WithMessage<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.inner.validate(input).map_err(|error| self.rewrite(error))
    }
}

/// Creates a WithMessage combinator.
pub fn with_message<V>(inner: V, message: impl Into<Cow<'static, str>>) -> WithMessage<V> {
    WithMessage::new(inner, message)
}

/// Creates a combinator that overrides only the error kind.
pub fn with_code<V>(inner: V, kind: impl Into<ErrorKind>) -> WithMessage<V> {
    WithMessage::code_only(inner, kind)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValuerExt;
    use crate::validators::minmax;
    use crate::valuers::{number, string};
    use serde_json::json;

    #[test]
    fn test_message_replaced_kind_kept() {
        let valuer = string().with_message("Please enter your name");
        let failure = valuer.coerce_field(None, "name").unwrap_err();
        let error = failure.errors().unwrap().first().unwrap();

        assert_eq!(error.message, "Please enter your name");
        assert_eq!(error.kind, ErrorKind::ExpectedString);
        assert_eq!(error.field, "name");
    }

    #[test]
    fn test_code_only_keeps_message() {
        let valuer = number().with_code("age_not_numeric");
        let failure = valuer.coerce_field(Some(&json!("x")), "age").unwrap_err();
        let error = failure.errors().unwrap().first().unwrap();

        assert_eq!(error.kind, ErrorKind::custom("age_not_numeric"));
        assert_eq!(error.message, ErrorKind::ExpectedNumber.default_message());
    }

    #[test]
    fn test_message_and_code() {
        let valuer = WithMessage::new(number(), "bad").with_code("age");
        let failure = valuer.coerce_field(None, "age").unwrap_err();
        let error = failure.errors().unwrap().first().unwrap();

        assert_eq!(error.message, "bad");
        assert_eq!(error.kind, ErrorKind::custom("age"));
    }

    #[test]
    fn test_success_untouched() {
        let valuer = number().with_message("bad");
        assert_eq!(valuer.coerce_field(Some(&json!(3)), "n").unwrap(), 3.0);
    }

    #[test]
    fn test_wraps_validators() {
        let validator = with_message(minmax(0.0, 120.0), "Age must be between 0 and 120");
        let error = validator.validate(&150.0).unwrap_err();

        assert_eq!(error.message, "Age must be between 0 and 120");
        assert_eq!(error.kind, ErrorKind::OutOfRange);
        assert_eq!(error.params.len(), 2);
    }
}
