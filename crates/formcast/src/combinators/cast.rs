//! TO_NUMBER combinator - numeric casting of coerced values

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::combinators::OrNull;
use crate::foundation::{Context, ErrorKind, Failure, Shape, Valuer};

// ============================================================================
// NUMBER CAST
// ============================================================================

/// General numeric conversion of a coerced value.
///
/// Booleans cast to `1`/`0`; strings follow the usual loose numeric rules
/// (whitespace trimmed, empty is `0`, hex/octal/binary prefixes, exponents,
/// `Infinity`); anything without a numeric reading is NaN.
pub trait NumberCast {
    /// Casts `self` to a number, possibly NaN.
    fn cast_number(&self) -> f64;
}

impl NumberCast for f64 {
    fn cast_number(&self) -> f64 {
        *self
    }
}

impl NumberCast for bool {
    fn cast_number(&self) -> f64 {
        if *self { 1.0 } else { 0.0 }
    }
}

impl NumberCast for str {
    fn cast_number(&self) -> f64 {
        cast_str(self)
    }
}

impl NumberCast for String {
    fn cast_number(&self) -> f64 {
        cast_str(self)
    }
}

impl NumberCast for DateTime<Utc> {
    fn cast_number(&self) -> f64 {
        self.timestamp_millis() as f64
    }
}

impl<T: NumberCast> NumberCast for Option<T> {
    fn cast_number(&self) -> f64 {
        self.as_ref().map_or(f64::NAN, NumberCast::cast_number)
    }
}

impl<T: NumberCast> NumberCast for OrNull<T> {
    fn cast_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Value(value) => value.cast_number(),
        }
    }
}

impl<T: NumberCast> NumberCast for Vec<T> {
    fn cast_number(&self) -> f64 {
        match self.as_slice() {
            [] => 0.0,
            [single] => single.cast_number(),
            _ => f64::NAN,
        }
    }
}

impl NumberCast for Value {
    fn cast_number(&self) -> f64 {
        match self {
            Self::Null => 0.0,
            Self::Bool(b) => b.cast_number(),
            Self::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Self::String(s) => cast_str(s),
            Self::Array(items) => match items.as_slice() {
                [] => 0.0,
                [single] => single.cast_number(),
                _ => f64::NAN,
            },
            Self::Object(_) => f64::NAN,
        }
    }
}

fn cast_str(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            // Digits only after the prefix, no sign.
            if !digits.chars().all(|c| c.is_digit(radix)) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
        }
    }

    // `f64::from_str` also takes "inf" and "nan" spellings, which are not numbers here.
    if !text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

// ============================================================================
// TO NUMBER COMBINATOR
// ============================================================================

/// Runs the inner valuer, then casts its result with [`NumberCast`].
///
/// A non-finite result fails `expected_number` unless the parse allows
/// non-finite casts.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde_json::json;
///
/// let agreed = checkbox().to_number();
/// assert_eq!(agreed.coerce_field(Some(&json!("on")), "agreed").unwrap(), 1.0);
///
/// let amount = string().to_number();
/// assert_eq!(amount.coerce_field(Some(&json!(" 1e3 ")), "amount").unwrap(), 1000.0);
/// assert!(amount.coerce_field(Some(&json!("lots")), "amount").is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ToNumber<V> {
    inner: V,
}

impl<V> ToNumber<V> {
    /// Creates a new cast modifier.
    pub const fn new(inner: V) -> Self {
        Self { inner }
    }

    /// Returns a reference to the inner valuer.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V> Valuer for ToNumber<V>
where
    V: Valuer,
    V::Output: NumberCast,
{
    type Output = f64;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<f64, Failure> {
        let number = self.inner.coerce(raw, cx)?.cast_number();
        if number.is_finite() || cx.config().allow_non_finite_casts {
            Ok(number)
        } else {
            Err(cx.error(ErrorKind::ExpectedNumber, raw).into())
        }
    }

    fn shape(&self) -> Shape {
        self.inner.shape()
    }
}

/// Creates a cast modifier.
pub const fn to_number<V>(inner: V) -> ToNumber<V> {
    ToNumber::new(inner)
}

// ============================================================================
// TESTS
// ============================================================================
