//! Absence modifiers: OPTIONAL, NULLABLE and FALLBACK
//!
//! All three decide absence through [`is_absent`]: a missing key, `null`,
//! and `""` are the same thing. The inner valuer never sees an absent value.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::foundation::{Context, Failure, Shape, Valuer, is_absent};

// ============================================================================
// OPTIONAL
// ============================================================================

/// Absent input becomes `None`; anything else goes to the inner valuer.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde_json::json;
///
/// let nickname = string().optional();
/// assert_eq!(nickname.coerce_field(None, "nickname").unwrap(), None);
/// assert_eq!(nickname.coerce_field(Some(&json!("")), "nickname").unwrap(), None);
/// assert_eq!(
///     nickname.coerce_field(Some(&json!("Bo")), "nickname").unwrap(),
///     Some("Bo".to_owned())
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Optional<V> {
    inner: V,
}

impl<V> Optional<V> {
    /// Creates a new optional modifier.
    pub const fn new(inner: V) -> Self {
        Self { inner }
    }

    /// Returns a reference to the inner valuer.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V: Valuer> Valuer for Optional<V> {
    type Output = Option<V::Output>;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Self::Output, Failure> {
        if is_absent(raw) {
            return Ok(None);
        }
        self.inner.coerce(raw, cx).map(Some)
    }

    fn shape(&self) -> Shape {
        self.inner.shape()
    }
}

/// Creates an optional modifier.
pub const fn optional<V>(inner: V) -> Optional<V> {
    Optional::new(inner)
}

// ============================================================================
// NULLABLE
// ============================================================================

/// A value, or an explicit null.
///
/// Unlike `Option`, which marks a field that may be left out, `OrNull`
/// marks a field whose absence is itself the value. Serializes as the inner
/// value or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum OrNull<T> {
    /// The null sentinel.
    Null,
    /// A present value.
    Value(T),
}

impl<T> OrNull<T> {
    /// Returns true if this is the null sentinel.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the present value, if any.
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Null => None,
            Self::Value(value) => Some(value),
        }
    }

    /// Converts into an `Option`, mapping null to `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Null => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for OrNull<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<T: fmt::Display> fmt::Display for OrNull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Value(value) => value.fmt(f),
        }
    }
}

/// Absent input becomes [`OrNull::Null`]; anything else goes to the inner
/// valuer.
#[derive(Debug, Clone, Copy)]
pub struct Nullable<V> {
    inner: V,
}

impl<V> Nullable<V> {
    /// Creates a new nullable modifier.
    pub const fn new(inner: V) -> Self {
        Self { inner }
    }

    /// Returns a reference to the inner valuer.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V: Valuer> Valuer for Nullable<V> {
    type Output = OrNull<V::Output>;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Self::Output, Failure> {
        if is_absent(raw) {
            return Ok(OrNull::Null);
        }
        self.inner.coerce(raw, cx).map(OrNull::Value)
    }

    fn shape(&self) -> Shape {
        self.inner.shape()
    }
}

/// Creates a nullable modifier.
pub const fn nullable<V>(inner: V) -> Nullable<V> {
    Nullable::new(inner)
}

// ============================================================================
// FALLBACK
// ============================================================================

/// Absent input becomes a default value; anything else goes to the inner
/// valuer.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde_json::json;
///
/// let page = number().fallback(1.0);
/// assert_eq!(page.coerce_field(None, "page").unwrap(), 1.0);
/// assert_eq!(page.coerce_field(Some(&json!("3")), "page").unwrap(), 3.0);
/// ```
pub struct Fallback<V: Valuer> {
    inner: V,
    default: V::Output,
}

impl<V: Valuer> Fallback<V> {
    /// Creates a new fallback modifier.
    pub const fn new(inner: V, default: V::Output) -> Self {
        Self { inner, default }
    }

    /// Returns a reference to the inner valuer.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Returns the default value.
    pub fn default_value(&self) -> &V::Output {
        &self.default
    }
}

impl<V> fmt::Debug for Fallback<V>
where
    V: Valuer + fmt::Debug,
    V::Output: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fallback")
            .field("inner", &self.inner)
            .field("default", &self.default)
            .finish()
    }
}

impl<V> Clone for Fallback<V>
where
    V: Valuer + Clone,
    V::Output: Clone,
{
    fn clone(&self) -> Self {
        Self::new(self.inner.clone(), self.default.clone())
    }
}

impl<V> Valuer for Fallback<V>
where
    V: Valuer,
    V::Output: Clone,
{
    type Output = V::Output;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Self::Output, Failure> {
        if is_absent(raw) {
            return Ok(self.default.clone());
        }
        self.inner.coerce(raw, cx)
    }

    fn shape(&self) -> Shape {
        self.inner.shape()
    }
}

/// Creates a fallback modifier.
pub const fn fallback<V: Valuer>(inner: V, default: V::Output) -> Fallback<V> {
    Fallback::new(inner, default)
}

// ============================================================================
// TESTS
// ============================================================================
