//! Boolean valuers
//!
//! [`checkbox`] follows HTML checkbox semantics, where an unchecked box
//! sends nothing at all. [`bool`] is strict.

use serde_json::Value;

use crate::foundation::{Context, ErrorKind, Failure, Valuer};

// ============================================================================
// CHECKBOX
// ============================================================================

/// Tri-state checkbox: missing means unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxValuer {
    kind: ErrorKind,
}

impl CheckboxValuer {
    /// Creates a checkbox valuer failing with `expected_truthy_or_falsy`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: ErrorKind::ExpectedTruthyOrFalsy,
        }
    }

    /// Overrides the error kind reported on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: impl Into<ErrorKind>) -> Self {
        self.kind = kind.into();
        self
    }
}

impl Default for CheckboxValuer {
    fn default() -> Self {
        Self::new()
    }
}

impl Valuer for CheckboxValuer {
    type Output = bool;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<bool, Failure> {
        match raw {
            None | Some(Value::Null) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
            Some(Value::String(s)) => match s.as_str() {
                "true" | "on" | "1" => Ok(true),
                "false" | "off" | "0" => Ok(false),
                _ => Err(cx.error(self.kind.clone(), raw).into()),
            },
            Some(_) => Err(cx.error(self.kind.clone(), raw).into()),
        }
    }
}

/// Creates a [`CheckboxValuer`].
#[must_use]
pub const fn checkbox() -> CheckboxValuer {
    CheckboxValuer::new()
}

// ============================================================================
// BOOL
// ============================================================================

/// Accepts a JSON boolean or exactly `"true"` / `"false"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolValuer {
    kind: ErrorKind,
}

impl BoolValuer {
    /// Creates a bool valuer failing with `expected_boolean`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: ErrorKind::ExpectedBoolean,
        }
    }

    /// Overrides the error kind reported on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: impl Into<ErrorKind>) -> Self {
        self.kind = kind.into();
        self
    }
}

impl Default for BoolValuer {
    fn default() -> Self {
        Self::new()
    }
}

impl Valuer for BoolValuer {
    type Output = bool;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<bool, Failure> {
        match raw {
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) if s == "true" => Ok(true),
            Some(Value::String(s)) if s == "false" => Ok(false),
            _ => Err(cx.error(self.kind.clone(), raw).into()),
        }
    }
}

/// Creates a [`BoolValuer`].
#[must_use]
pub const fn bool() -> BoolValuer {
    BoolValuer::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValuerExt;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(None, false)]
    #[case(Some(json!(null)), false)]
    #[case(Some(json!(true)), true)]
    #[case(Some(json!(false)), false)]
    #[case(Some(json!(1)), true)]
    #[case(Some(json!(-0.5)), true)]
    #[case(Some(json!(0)), false)]
    #[case(Some(json!("on")), true)]
    #[case(Some(json!("true")), true)]
    #[case(Some(json!("1")), true)]
    #[case(Some(json!("off")), false)]
    #[case(Some(json!("false")), false)]
    #[case(Some(json!("0")), false)]
    fn test_checkbox_accepts(#[case] raw: Option<Value>, #[case] expected: bool) {
        assert_eq!(checkbox().coerce_field(raw.as_ref(), "agree").unwrap(), expected);
    }

    #[rstest]
    #[case(json!("maybe"))]
    #[case(json!("ON"))]
    #[case(json!(""))]
    #[case(json!([]))]
    #[case(json!({}))]
    fn test_checkbox_rejects(#[case] raw: Value) {
        let failure = checkbox().coerce_field(Some(&raw), "agree").unwrap_err();
        assert_eq!(
            failure.errors().unwrap().first().unwrap().kind,
            ErrorKind::ExpectedTruthyOrFalsy
        );
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!("true"), true)]
    #[case(json!(false), false)]
    #[case(json!("false"), false)]
    fn test_bool_accepts(#[case] raw: Value, #[case] expected: bool) {
        assert_eq!(bool().coerce_field(Some(&raw), "flag").unwrap(), expected);
    }

    #[rstest]
    #[case(Some(json!("True")))]
    #[case(Some(json!("on")))]
    #[case(Some(json!(1)))]
    #[case(Some(json!(null)))]
    #[case(None)]
    fn test_bool_rejects(#[case] raw: Option<Value>) {
        let failure = bool().coerce_field(raw.as_ref(), "flag").unwrap_err();
        assert_eq!(
            failure.errors().unwrap().first().unwrap().kind,
            ErrorKind::ExpectedBoolean
        );
    }
}
