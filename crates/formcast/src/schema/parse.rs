//! The schema parse loop and its public entry points
//!
//! Every field is visited in declaration order. A failing field adds its
//! errors to one batch and parsing moves on; the caller receives either a
//! complete [`Record`] or the complete batch, never both.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::ParserConfig;
use crate::foundation::{
    Context, Failure, Shape, ValidationError, ValidationErrors,
};
use crate::schema::{FormData, Record, Schema, Source};

pub(crate) fn run<S: Source + ?Sized>(
    schema: &Schema,
    source: &S,
    config: &ParserConfig,
) -> Result<Record, ValidationErrors> {
    let span = tracing::debug_span!("parse", fields = schema.len());
    let _enter = span.enter();

    let mut record = Record::with_capacity(schema.len());
    let mut errors = ValidationErrors::new();

    for (name, valuer) in schema.entries() {
        let raw = match valuer.shape() {
            Shape::Scalar => source.get(name),
            Shape::List => source.get_list(name),
        };
        let raw = raw.as_deref();
        let cx = Context::new(name, config);

        match valuer.coerce_erased(raw, &cx) {
            Ok(value) => {
                record.insert(name, value);
            }
            Err(Failure::Invalid(field_errors)) => {
                tracing::debug!(field = %name, errors = field_errors.len(), "field failed");
                errors.extend(field_errors);
            }
            Err(Failure::Unexpected(cause)) => {
                tracing::warn!(field = %name, error = %cause, "unexpected error while coercing field");
                errors.add(
                    ValidationError::unknown(cause)
                        .with_field(name.to_owned())
                        .with_raw(raw),
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        tracing::debug!(errors = errors.len(), "parse failed");
        Err(errors)
    }
}

/// Parses any [`Source`] with `schema`.
pub fn parse<S: Source + ?Sized>(schema: &Schema, source: &S) -> Result<Record, ValidationErrors> {
    run(schema, source, schema.config())
}

/// Parses submitted form data with `schema`.
///
/// List-shaped fields collect every value under `key` and `key[]`.
pub fn parse_formdata(schema: &Schema, input: &FormData) -> Result<Record, ValidationErrors> {
    run(schema, input, schema.config())
}

/// Parses a JSON object with `schema`.
pub fn parse_object(
    schema: &Schema,
    record: &Map<String, Value>,
) -> Result<Record, ValidationErrors> {
    run(schema, record, schema.config())
}

/// Parses with `schema` and deserializes the result into `T`.
///
/// A record that does not fit `T` is reported as one `unknown_error` with
/// the serde error as cause.
pub fn parse_into<T, S>(schema: &Schema, source: &S) -> Result<T, ValidationErrors>
where
    T: DeserializeOwned,
    S: Source + ?Sized,
{
    let record = parse(schema, source)?;
    record
        .deserialize()
        .map_err(|error| ValidationError::unknown(Box::new(error)).into())
}
