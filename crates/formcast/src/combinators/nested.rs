//! NESTED combinator - embeds a schema as a field
//!
//! The field value is parsed as an object with the embedded schema, using
//! the configuration of the enclosing parse.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::foundation::{Context, ErrorKind, Failure, ValidationError, Valuer, is_absent};
use crate::schema::{Record, Schema, parse};

/// Parses the field value with an embedded schema.
///
/// - absent input fails `expected_schema`;
/// - a non-object (or, when the parse allows it, a string that is not a
///   JSON-encoded object) fails `invalid_schema`;
/// - failures of the embedded schema are reported as one `invalid_schema`
///   error whose `nested` list holds them, re-pathed as `parent.child`.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde_json::json;
///
/// let role = Schema::builder()
///     .field("id", number())
///     .field("name", string())
///     .build()
///     .unwrap();
/// let user = Schema::builder().field("role", nested(&role)).build().unwrap();
///
/// let input = json!({ "role": { "id": "x", "name": "admin" } });
/// let errors = user.parse_object(input.as_object().unwrap()).unwrap_err();
///
/// let error = errors.first().unwrap();
/// assert_eq!(error.kind, ErrorKind::InvalidSchema);
/// assert_eq!(error.nested[0].field, "role.id");
/// ```
#[derive(Debug, Clone)]
pub struct Nested {
    schema: Schema,
}

impl Nested {
    /// Creates a new nested-schema modifier.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Returns the embedded schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn parse_map(
        &self,
        map: &Map<String, Value>,
        raw: Option<&Value>,
        cx: &Context<'_>,
    ) -> Result<Record, Failure> {
        parse::run(&self.schema, map, cx.config()).map_err(|errors| {
            let nested = errors
                .into_iter()
                .map(|error| repath(error, cx.field()))
                .collect();
            Failure::from(cx.error(ErrorKind::InvalidSchema, raw).with_nested(nested))
        })
    }
}

/// Prefixes `error` and everything nested under it with `parent`.
fn repath(mut error: ValidationError, parent: &str) -> ValidationError {
    error.field = if error.field.is_empty() {
        Cow::Owned(parent.to_owned())
    } else {
        Cow::Owned(format!("{parent}.{}", error.field))
    };
    error.nested = error
        .nested
        .into_iter()
        .map(|child| repath(child, parent))
        .collect();
    error
}

impl Valuer for Nested {
    type Output = Record;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Record, Failure> {
        if is_absent(raw) {
            return Err(cx.error(ErrorKind::ExpectedSchema, raw).into());
        }

        match raw {
            Some(Value::Object(map)) => self.parse_map(map, raw, cx),
            Some(Value::String(text)) if cx.config().nested_json_strings => {
                match serde_json::from_str::<Value>(text) {
                    Ok(Value::Object(map)) => self.parse_map(&map, raw, cx),
                    Ok(_) => Err(cx.error(ErrorKind::InvalidSchema, raw).into()),
                    Err(cause) => Err(cx
                        .error(ErrorKind::InvalidSchema, raw)
                        .with_cause(cause)
                        .into()),
                }
            }
            _ => Err(cx.error(ErrorKind::InvalidSchema, raw).into()),
        }
    }
}

/// Creates a nested-schema modifier.
#[must_use]
pub fn nested(schema: &Schema) -> Nested {
    Nested::new(schema.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::foundation::ValuerExt;
    use crate::schema::Coerced;
    use crate::valuers::{number, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn role() -> Nested {
        let schema = Schema::builder()
            .field("id", number())
            .field("name", string())
            .build()
            .unwrap();
        nested(&schema)
    }

    #[test]
    fn test_parses_object() {
        let record = role()
            .coerce_field(Some(&json!({ "id": "7", "name": "admin" })), "role")
            .unwrap();
        assert_eq!(record.get("id"), Some(&Coerced::Number(7.0)));
        assert_eq!(record.get("name"), Some(&Coerced::String("admin".to_owned())));
    }

    #[test]
    fn test_parses_json_string() {
        let record = role()
            .coerce_field(Some(&json!(r#"{"id": 7, "name": "admin"}"#)), "role")
            .unwrap();
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_json_string_rejected_when_disabled() {
        let config = ParserConfig::strict();
        let cx = Context::new("role", &config);
        let failure = role()
            .coerce(Some(&json!(r#"{"id": 7, "name": "admin"}"#)), &cx)
            .unwrap_err();
        assert_eq!(failure.errors().unwrap().first().unwrap().kind, ErrorKind::InvalidSchema);
    }

    #[test]
    fn test_absent_is_expected_schema() {
        for raw in [None, Some(json!(null)), Some(json!(""))] {
            let failure = role().coerce_field(raw.as_ref(), "role").unwrap_err();
            assert_eq!(
                failure.errors().unwrap().first().unwrap().kind,
                ErrorKind::ExpectedSchema
            );
        }
    }

    #[test]
    fn test_non_object_is_invalid_schema() {
        for raw in [json!(5), json!([]), json!("[1, 2]"), json!("{not json")] {
            let failure = role().coerce_field(Some(&raw), "role").unwrap_err();
            let error = failure.errors().unwrap().first().unwrap();
            assert_eq!(error.kind, ErrorKind::InvalidSchema);
            assert!(error.nested.is_empty());
        }
    }

    #[test]
    fn test_child_errors_are_repathed() {
        let failure = role()
            .coerce_field(Some(&json!({ "id": "x" })), "role")
            .unwrap_err();
        let error = failure.errors().unwrap().first().unwrap();

        let paths: Vec<&str> = error.nested.iter().map(|e| &*e.field).collect();
        assert_eq!(paths, vec!["role.id", "role.name"]);
        assert_eq!(error.total_error_count(), 3);
    }

    #[test]
    fn test_deep_nesting_paths() {
        let inner = Schema::builder().field("zip", number()).build().unwrap();
        let middle = Schema::builder().field("address", nested(&inner)).build().unwrap();

        let failure = nested(&middle)
            .coerce_field(Some(&json!({ "address": { "zip": "abc" } })), "user")
            .unwrap_err();
        let flat: Vec<String> = failure
            .errors()
            .unwrap()
            .flatten()
            .iter()
            .map(|e| e.field.to_string())
            .collect();
        assert_eq!(flat, vec!["user", "user.address", "user.address.zip"]);
    }
}
