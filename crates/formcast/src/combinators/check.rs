//! CHECK combinator - binds validators to a valuer

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::foundation::{
    Context, Failure, Shape, Validate, ValidationError, ValidationErrors, Valuer, to_json,
};

type BoxedValidator<T> = Box<dyn Validate<Input = T> + Send + Sync>;

/// A valuer followed by validators.
///
/// Coercion runs first; if it fails, its errors are returned and no validator
/// runs. Otherwise every validator runs in declaration order and all of
/// their failures are reported together. Each failure is stamped with the
/// field name and the coerced value unless the validator set them already.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde_json::json;
///
/// let code = string().check(length(4, 4)).check(matches_regex(r"^\d+$").unwrap());
///
/// let failure = code.coerce_field(Some(&json!("abcde")), "pin").unwrap_err();
/// assert_eq!(failure.errors().unwrap().len(), 2);
/// ```
pub struct Checked<V: Valuer> {
    inner: V,
    validators: Vec<BoxedValidator<V::Output>>,
}

impl<V: Valuer> Checked<V> {
    /// Creates a check combinator with no validators.
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            validators: Vec::new(),
        }
    }

    /// Appends a validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn check<C>(mut self, validator: C) -> Self
    where
        C: Validate<Input = V::Output> + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    /// Returns a reference to the inner valuer.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Returns the number of attached validators.
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }
}

impl<V: Valuer + fmt::Debug> fmt::Debug for Checked<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checked")
            .field("inner", &self.inner)
            .field("validators", &self.validators.len())
            .finish()
    }
}

fn stamp<T: Serialize>(mut error: ValidationError, cx: &Context<'_>, value: &T) -> ValidationError {
    if error.field.is_empty() {
        error.field = cx.field().to_owned().into();
    }
    if error.value.is_none() {
        error.value = Some(to_json(value));
    }
    error
}

impl<V> Valuer for Checked<V>
where
    V: Valuer,
    V::Output: Serialize,
{
    type Output = V::Output;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<V::Output, Failure> {
        let value = self.inner.coerce(raw, cx)?;

        let errors: ValidationErrors = self
            .validators
            .iter()
            .filter_map(|validator| validator.validate(&value).err())
            .map(|error| stamp(error, cx, &value))
            .collect();

        errors.into_result(value).map_err(Failure::from)
    }

    fn shape(&self) -> Shape {
        self.inner.shape()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{ErrorKind, ValuerExt};
    use crate::validators::{email, exactly, length, minmax, validator_fn};
    use crate::valuers::{number, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_passes_value_through() {
        let age = number().check(minmax(0.0, 120.0));
        assert_eq!(age.coerce_field(Some(&json!("35")), "age").unwrap(), 35.0);
    }

    #[test]
    fn test_stamps_field_and_value() {
        let age = number().check(minmax(0.0, 120.0));
        let failure = age.coerce_field(Some(&json!("150")), "age").unwrap_err();

        let errors = failure.errors().unwrap();
        assert_eq!(
            errors.errors(),
            &[ValidationError::out_of_range(0, 120)
                .with_field("age")
                .with_value(json!(150))]
        );
    }

    #[test]
    fn test_runs_every_validator() {
        let name = string()
            .check(length(5, 10))
            .check(email())
            .check(exactly("someone@example.com"));
        let failure = name.coerce_field(Some(&json!("abc")), "email").unwrap_err();

        let kinds: Vec<ErrorKind> = failure.errors().unwrap().iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::InvalidLength,
                ErrorKind::InvalidFormattedEmail,
                ErrorKind::InvalidValue,
            ]
        );
    }

    #[test]
    fn test_coercion_failure_skips_validators() {
        let age = number().check(validator_fn(|_: &f64| -> Result<(), ValidationError> {
            panic!("validator must not run")
        }));
        let failure = age.coerce_field(Some(&json!("x")), "age").unwrap_err();
        assert_eq!(failure.errors().unwrap().len(), 1);
        assert_eq!(failure.errors().unwrap().first().unwrap().kind, ErrorKind::ExpectedNumber);
    }

    #[test]
    fn test_validator_field_is_kept() {
        let custom = string().check(validator_fn(|_: &String| {
            Err(ValidationError::new("nope").with_field("other"))
        }));
        let failure = custom.coerce_field(Some(&json!("a")), "name").unwrap_err();
        assert_eq!(failure.errors().unwrap().first().unwrap().field, "other");
    }

    #[test]
    fn test_no_validators() {
        let checked = Checked::new(string());
        assert_eq!(checked.validator_count(), 0);
        assert!(checked.coerce_field(Some(&json!("a")), "name").is_ok());
    }
}
