//! String valuer

use serde_json::Value;

use crate::foundation::{Context, ErrorKind, Failure, Valuer};

/// Accepts only a JSON string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringValuer {
    kind: ErrorKind,
}

impl StringValuer {
    /// Creates a string valuer failing with `expected_string`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: ErrorKind::ExpectedString,
        }
    }

    /// Overrides the error kind reported on failure.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: impl Into<ErrorKind>) -> Self {
        self.kind = kind.into();
        self
    }
}

impl Default for StringValuer {
    fn default() -> Self {
        Self::new()
    }
}

impl Valuer for StringValuer {
    type Output = String;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<String, Failure> {
        match raw {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(cx.error(self.kind.clone(), raw).into()),
        }
    }
}

/// Creates a [`StringValuer`].
#[must_use]
pub const fn string() -> StringValuer {
    StringValuer::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValuerExt;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_accepts_strings_only() {
        assert_eq!(string().coerce_field(Some(&json!("hi")), "name").unwrap(), "hi");
        assert_eq!(string().coerce_field(Some(&json!("")), "name").unwrap(), "");

        for raw in [json!(1), json!(true), json!(null), json!(["a"])] {
            assert!(string().coerce_field(Some(&raw), "name").is_err());
        }
    }

    #[test]
    fn test_error_reports_field_and_value() {
        let failure = string().coerce_field(Some(&json!(5)), "name").unwrap_err();
        let error = failure.errors().unwrap().first().unwrap();
        assert_eq!(error.kind, ErrorKind::ExpectedString);
        assert_eq!(error.field, "name");
        assert_eq!(error.value, Some(json!(5)));
    }

    #[test]
    fn test_missing_is_recorded_as_missing() {
        let failure = string().coerce_field(None, "name").unwrap_err();
        assert_eq!(failure.errors().unwrap().first().unwrap().value, None);
    }

    #[test]
    fn test_kind_override() {
        let failure = string()
            .with_kind("name_required")
            .coerce_field(None, "name")
            .unwrap_err();
        assert_eq!(
            failure.errors().unwrap().first().unwrap().kind,
            ErrorKind::custom("name_required")
        );
    }
}
