//! CONSTRUCT combinator - builds a value of a caller type from raw input
//!
//! Any failure of the constructor is reported as
//! `expected_instance_of_a_class` with the constructor's error as cause.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde_json::Value;

use crate::foundation::{BoxError, Context, ErrorKind, Failure, Valuer};

// ============================================================================
// FROM STR
// ============================================================================

/// Parses the raw value with `T::from_str`.
///
/// Strings are parsed as is; numbers and booleans are rendered to text
/// first. Every other raw value fails.
///
/// # Examples
///
/// ```rust
/// use std::net::IpAddr;
///
/// use formcast::prelude::*;
/// use serde_json::json;
///
/// let ip = construct::<IpAddr>();
/// assert!(ip.coerce_field(Some(&json!("10.0.0.1")), "ip").is_ok());
///
/// let failure = ip.coerce_field(Some(&json!("10.0.0")), "ip").unwrap_err();
/// let error = failure.errors().unwrap().first().unwrap();
/// assert_eq!(error.kind, ErrorKind::ExpectedInstanceOfAClass);
/// assert!(std::error::Error::source(error).is_some());
/// ```
pub struct Construct<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> Construct<T> {
    /// Creates a new constructor modifier.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> Default for Construct<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Construct<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Construct<T> {}

impl<T> fmt::Debug for Construct<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Construct")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Valuer for Construct<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    type Output = T;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<T, Failure> {
        let text: Cow<'_, str> = match raw {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(Value::Number(n)) => Cow::Owned(n.to_string()),
            Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
            _ => return Err(cx.error(ErrorKind::ExpectedInstanceOfAClass, raw).into()),
        };

        T::from_str(&text).map_err(|cause| {
            cx.error(ErrorKind::ExpectedInstanceOfAClass, raw)
                .with_cause(cause)
                .into()
        })
    }
}

/// Creates a [`Construct`] modifier for `T`.
#[must_use]
pub const fn construct<T>() -> Construct<T> {
    Construct::new()
}

// ============================================================================
// FROM CLOSURE
// ============================================================================

/// Builds the value with a fallible closure over the raw value.
///
/// A missing key is passed as `null`.
pub struct ConstructWith<F, T, E> {
    build: F,
    marker: PhantomData<fn() -> (T, E)>,
}

impl<F: Clone, T, E> Clone for ConstructWith<F, T, E> {
    fn clone(&self) -> Self {
        Self {
            build: self.build.clone(),
            marker: PhantomData,
        }
    }
}

impl<F, T, E> fmt::Debug for ConstructWith<F, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructWith")
            .field("target", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<F, T, E> Valuer for ConstructWith<F, T, E>
where
    F: Fn(&Value) -> Result<T, E>,
    E: Into<BoxError>,
{
    type Output = T;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<T, Failure> {
        (self.build)(raw.unwrap_or(&Value::Null)).map_err(|cause| {
            cx.error(ErrorKind::ExpectedInstanceOfAClass, raw)
                .with_boxed_cause(cause.into())
                .into()
        })
    }
}

/// Creates a [`ConstructWith`] modifier.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde_json::{json, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Cents(u64);
///
/// let price = construct_with(|raw: &Value| {
///     raw.as_u64().map(Cents).ok_or("price must be a whole number of cents")
/// });
///
/// assert_eq!(price.coerce_field(Some(&json!(250)), "price").unwrap(), Cents(250));
/// assert!(price.coerce_field(Some(&json!(2.5)), "price").is_err());
/// ```
#[must_use]
pub fn construct_with<F, T, E>(build: F) -> ConstructWith<F, T, E>
where
    F: Fn(&Value) -> Result<T, E>,
    E: Into<BoxError>,
{
    ConstructWith {
        build,
        marker: PhantomData,
    }
}

// ============================================================================
// TESTS
// ============================================================================
