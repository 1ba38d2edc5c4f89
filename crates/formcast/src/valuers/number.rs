//! Number valuer

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::foundation::{Context, ErrorKind, Failure, Valuer};

// Unsigned integer or decimal. No sign, no exponent, no surrounding spaces.
static DECIMAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").unwrap());

/// Accepts a JSON number, or a string holding a plain decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberValuer {
    kind: ErrorKind,
}

impl NumberValuer {
    /// Creates a number valuer failing with `expected_number`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: ErrorKind::ExpectedNumber,
        }
    }

    /// Overrides the error kind reported on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: impl Into<ErrorKind>) -> Self {
        self.kind = kind.into();
        self
    }
}

impl Default for NumberValuer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses `s` if it is a finite plain decimal.
pub(crate) fn parse_decimal(s: &str) -> Option<f64> {
    if !DECIMAL_REGEX.is_match(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Valuer for NumberValuer {
    type Output = f64;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<f64, Failure> {
        let parsed = match raw {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => parse_decimal(s),
            _ => None,
        };
        parsed.ok_or_else(|| cx.error(self.kind.clone(), raw).into())
    }
}

/// Creates a [`NumberValuer`].
#[must_use]
pub const fn number() -> NumberValuer {
    NumberValuer::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValuerExt;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("42"), 42.0)]
    #[case(json!("42.5"), 42.5)]
    #[case(json!("007"), 7.0)]
    #[case(json!(42), 42.0)]
    #[case(json!(-3.5), -3.5)]
    fn test_accepts(#[case] raw: Value, #[case] expected: f64) {
        assert_eq!(number().coerce_field(Some(&raw), "n").unwrap(), expected);
    }

    #[rstest]
    #[case(json!("abc"))]
    #[case(json!("-1"))]
    #[case(json!("+1"))]
    #[case(json!("1e3"))]
    #[case(json!("1."))]
    #[case(json!(".5"))]
    #[case(json!(" 1"))]
    #[case(json!(""))]
    #[case(json!("NaN"))]
    #[case(json!("٣"))]
    #[case(json!(true))]
    #[case(json!(null))]
    #[case(json!([1]))]
    fn test_rejects(#[case] raw: Value) {
        let failure = number().coerce_field(Some(&raw), "n").unwrap_err();
        let error = failure.errors().unwrap().first().unwrap();
        assert_eq!(error.kind, ErrorKind::ExpectedNumber);
        assert_eq!(error.value, Some(raw));
    }

    #[test]
    fn test_overflowing_decimal_is_rejected() {
        let huge = "9".repeat(400);
        assert!(number().coerce_field(Some(&json!(huge)), "n").is_err());
    }
}
