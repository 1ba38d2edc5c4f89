//! Integration tests for the prelude module.
//!
//! Verifies that `use formcast::prelude::*` brings in everything a consumer
//! needs to declare a schema, including validators of their own.

use formcast::prelude::*;
use formcast::validator;
use serde_json::json;

// ============================================================================
// PRELUDE IMPORT SMOKE TEST
// ============================================================================

#[test]
fn prelude_provides_valuers_and_validators() {
    let field = string().check(length(3, 20)).check(email());
    assert!(field.coerce_field(Some(&json!("ada@example.com")), "email").is_ok());
    assert!(field.coerce_field(Some(&json!("a@")), "email").is_err());
}

#[test]
fn prelude_provides_schema_and_config() {
    let schema = Schema::builder()
        .field("when", timestamp().nullable())
        .config(ParserConfig::lenient().with_array_errors(ArrayErrors::FirstOnly))
        .build()
        .unwrap();

    let record = schema.parse(&json!({ "when": 0 })).unwrap();
    assert_eq!(
        record.get("when").map(Coerced::to_json),
        Some(json!("1970-01-01T00:00:00Z"))
    );
}

#[test]
fn literal_is_exactly() {
    let role = string().check(literal("admin"));
    assert!(role.coerce_field(Some(&json!("admin")), "role").is_ok());

    let failure = role.coerce_field(Some(&json!("user")), "role").unwrap_err();
    let error = failure.errors().unwrap().first().unwrap();
    assert_eq!(error.kind, ErrorKind::InvalidValue);
    assert_eq!(error.param(0), Some(&json!("admin")));
}

// ============================================================================
// USER-DECLARED VALIDATORS
// ============================================================================

validator! {
    pub NotBlank for String;
    rule(input) { !input.trim().is_empty() }
    error(input) { ValidationError::new("blank") }
    fn not_blank();
}

validator! {
    #[derive(Copy, PartialEq)]
    pub Step { step: f64 } for f64;
    rule(self, input) { (input / self.step).fract() == 0.0 }
    error(self, input) { ValidationError::new("off_step").with_param(self.step) }
    fn step(step: f64);
}

#[test]
fn declared_validators_compose_with_builtins() {
    let schema = Schema::builder()
        .field("title", string().check(not_blank()))
        .field("price", number().check(step(0.5)).check(minmax(0.0, 100.0)))
        .build()
        .unwrap();

    assert!(schema.parse(&json!({ "title": "Lamp", "price": "12.5" })).is_ok());

    let errors = schema
        .parse(&json!({ "title": "   ", "price": "200.25" }))
        .unwrap_err();
    let kinds: Vec<String> = errors.iter().map(|e| e.kind.to_string()).collect();
    assert_eq!(kinds, vec!["blank", "off_step", "out_of_range"]);
    assert_eq!(errors.errors()[1].param(0), Some(&json!(0.5)));
}

#[test]
fn validator_fn_wraps_a_closure() {
    let even = validator_fn(|n: &f64| {
        if n % 2.0 == 0.0 {
            Ok(())
        } else {
            Err(ValidationError::new("odd"))
        }
    });
    let field = number().check(even);

    assert_eq!(field.coerce_field(Some(&json!("4")), "n").unwrap(), 4.0);
    let failure = field.coerce_field(Some(&json!("3")), "n").unwrap_err();
    assert_eq!(failure.errors().unwrap().first().unwrap().field, "n");
}
