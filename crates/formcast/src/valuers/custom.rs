//! Closure-backed valuers

use std::fmt;
use std::marker::PhantomData;

use serde_json::Value;

use crate::foundation::{BoxError, Context, Failure, Valuer};

/// A valuer backed by a closure.
///
/// The closure may fail with any error. A [`ValidationError`] or
/// [`ValidationErrors`] is reported as is, with the field filled in when
/// left empty; anything else surfaces as `unknown_error`.
///
/// [`ValidationError`]: crate::foundation::ValidationError
/// [`ValidationErrors`]: crate::foundation::ValidationErrors
///
/// # Examples
///
/// ```
/// use formcast::prelude::*;
/// use serde_json::{json, Value};
///
/// let upper = from_fn(|raw: Option<&Value>, cx: &Context<'_>| match raw {
///     Some(Value::String(s)) => Ok(s.to_uppercase()),
///     _ => Err(cx.error(ErrorKind::ExpectedString, raw)),
/// });
///
/// assert_eq!(upper.coerce_field(Some(&json!("abc")), "code").unwrap(), "ABC");
/// ```
pub struct FromFn<F, T, E> {
    coerce: F,
    marker: PhantomData<fn() -> (T, E)>,
}

impl<F: Clone, T, E> Clone for FromFn<F, T, E> {
    fn clone(&self) -> Self {
        Self {
            coerce: self.coerce.clone(),
            marker: PhantomData,
        }
    }
}

impl<F, T, E> fmt::Debug for FromFn<F, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<F, T, E> Valuer for FromFn<F, T, E>
where
    F: Fn(Option<&Value>, &Context<'_>) -> Result<T, E>,
    E: Into<BoxError>,
{
    type Output = T;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<T, Failure> {
        (self.coerce)(raw, cx).map_err(|error| {
            Failure::from_boxed(error.into()).map_errors(|error| {
                if error.field.is_empty() {
                    error.with_field(cx.field().to_owned())
                } else {
                    error
                }
            })
        })
    }
}

/// Wraps a closure as a [`Valuer`].
#[must_use]
pub fn from_fn<F, T, E>(coerce: F) -> FromFn<F, T, E>
where
    F: Fn(Option<&Value>, &Context<'_>) -> Result<T, E>,
    E: Into<BoxError>,
{
    FromFn {
        coerce,
        marker: PhantomData,
    }
}
