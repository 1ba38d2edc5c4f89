//! Parses a submitted user form and prints the result or every error.
//!
//! Run with `RUST_LOG=formcast=debug` to see the parse trace.

use chrono::{DateTime, Duration, Utc};
use formcast::prelude::*;
use tracing_subscriber::EnvFilter;

fn in_the_past() -> impl Validate<Input = DateTime<Utc>> + Send + Sync + 'static {
    validator_fn(|at: &DateTime<Utc>| {
        if *at > Utc::now() {
            Err(ValidationError::new("expected_past_timestamp")
                .with_message("expected a timestamp in the past"))
        } else {
            Ok(())
        }
    })
}

fn user_schema() -> Result<Schema, SchemaError> {
    let role = Schema::builder()
        .field("id", string())
        .field("name", string())
        .build()?;

    Schema::builder()
        .field("username", string())
        .field("age", number())
        .field("email", string().check(email()))
        .field("ids", array(string()))
        .field("created_at", timestamp().check(in_the_past()))
        .field("admin", bool().fallback(false))
        .field("deleted", timestamp().optional())
        .field("this_is_nullable", string().nullable())
        .field("is_remote", bool().optional())
        .field(
            "have_you_heard_about_our_extended_warranty",
            checkbox().check(literal(false)).to_number(),
        )
        .field("role", nested(&role))
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let schema = user_schema()?;

    let mut form = FormData::new();
    form.append("username", "jeppech");
    form.append("age", "35");
    form.append("email", "der@die.das");
    form.append("ids[]", "1");
    form.append("ids[]", "number");
    form.append("created_at", (Utc::now() - Duration::minutes(5)).to_rfc3339());
    form.append("deleted", Utc::now().to_rfc3339());
    form.append("have_you_heard_about_our_extended_warranty", "false");
    form.append("role", r#"{"id": "admin", "name": "Administrator"}"#);

    match schema.parse_formdata(&form) {
        Ok(user) => println!("{}", serde_json::to_string_pretty(&user)?),
        Err(errors) => {
            for error in &errors {
                println!("{} {}", error.path(), error.message);
            }
        }
    }

    Ok(())
}
