//! Closure-backed validators

use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError};

/// A validator backed by a closure.
///
/// # Examples
///
/// ```
/// use formcast::foundation::{Validate, ValidationError};
/// use formcast::validators::validator_fn;
///
/// let even = validator_fn(|n: &f64| {
///     if n % 2.0 == 0.0 { Ok(()) } else { Err(ValidationError::new("not_even")) }
/// });
/// assert!(even.validate(&4.0).is_ok());
/// ```
pub struct ValidatorFn<F, T: ?Sized> {
    check: F,
    marker: PhantomData<fn(&T)>,
}

impl<F: Clone, T: ?Sized> Clone for ValidatorFn<F, T> {
    fn clone(&self) -> Self {
        Self {
            check: self.check.clone(),
            marker: PhantomData,
        }
    }
}

impl<F, T: ?Sized> fmt::Debug for ValidatorFn<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorFn").finish_non_exhaustive()
    }
}

impl<F, T> Validate for ValidatorFn<F, T>
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), ValidationError>,
{
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        (self.check)(input)
    }
}

/// Wraps a closure as a [`Validate`] implementation.
#[must_use]
pub fn validator_fn<T, F>(check: F) -> ValidatorFn<F, T>
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), ValidationError>,
{
    ValidatorFn {
        check,
        marker: PhantomData,
    }
}
