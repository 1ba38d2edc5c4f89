//! Helpers for untyped input values

use serde::Serialize;
use serde_json::Value;

/// Returns true if `raw` counts as absent: missing, `null`, or `""`.
///
/// `optional`, `nullable` and `fallback` all decide through this function.
#[inline]
#[must_use]
pub fn is_absent(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Largest integer an `f64` holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Renders a float as a JSON number, using an integer when it has no
/// fractional part. Non-finite values become `null`.
#[must_use]
pub fn number_value(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Serializes `value` for an error's `value` or `params`.
///
/// Floats with no fractional part render as integers, so `120.0` and `120`
/// produce the same JSON. Unserializable values become `null`.
#[must_use]
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(Value::Number(n)) if n.is_f64() => n.as_f64().map_or(Value::Null, number_value),
        Ok(value) => value,
        Err(_) => Value::Null,
    }
}
