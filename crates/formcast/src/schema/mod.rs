//! Schemas: ordered field-name to valuer mappings
//!
//! A [`Schema`] is built once and parsed against many inputs. It is cheap to
//! clone and safe to share across threads; nothing is written during a parse.
//!
//! # Examples
//!
//! ```rust
//! use formcast::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::builder()
//!     .field("email", string().check(email()))
//!     .field("age", number().check(minmax(0.0, 120.0)))
//!     .field("newsletter", checkbox())
//!     .build()
//!     .unwrap();
//!
//! let input = json!({ "email": "ada@example.com", "age": "150" });
//! let errors = schema.parse_object(input.as_object().unwrap()).unwrap_err();
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.first().unwrap().kind, ErrorKind::OutOfRange);
//! ```

pub mod parse;
pub mod record;
pub mod source;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::ParserConfig;
use crate::foundation::{Context, Failure, Shape, ValidationErrors, Valuer};

pub use parse::{parse, parse_formdata, parse_into, parse_object};
pub use record::{Coerced, FromCoerced, IntoCoerced, Record};
pub use source::{FormData, Source};

// ============================================================================
// ERASED VALUER
// ============================================================================

/// Object-safe view of a field valuer whose output is stored in a [`Record`].
pub(crate) trait ErasedValuer: Send + Sync {
    fn coerce_erased(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Coerced, Failure>;

    fn shape(&self) -> Shape;
}

impl<V> ErasedValuer for V
where
    V: Valuer + Send + Sync,
    V::Output: IntoCoerced,
{
    fn coerce_erased(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Coerced, Failure> {
        self.coerce(raw, cx).map(IntoCoerced::into_coerced)
    }

    fn shape(&self) -> Shape {
        Valuer::shape(self)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Why a schema could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A field was declared with an empty name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// The same field name was declared twice.
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),
}

// ============================================================================
// SCHEMA
// ============================================================================

struct SchemaInner {
    fields: IndexMap<String, Box<dyn ErasedValuer>>,
    config: ParserConfig,
}

/// An immutable, ordered mapping from field name to valuer.
#[derive(Clone)]
pub struct Schema {
    inner: Arc<SchemaInner>,
}

impl Schema {
    /// Starts building a schema.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.fields.len()
    }

    /// Returns true if the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.fields.is_empty()
    }

    /// Iterates over field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.inner.fields.keys().map(String::as_str)
    }

    /// Returns true if the schema declares `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.fields.contains_key(name)
    }

    /// Returns the configuration parses of this schema run with.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.inner.config
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &dyn ErasedValuer)> {
        self.inner
            .fields
            .iter()
            .map(|(name, valuer)| (name.as_str(), valuer.as_ref()))
    }

    /// Parses any [`Source`].
    pub fn parse<S: Source + ?Sized>(&self, source: &S) -> Result<Record, ValidationErrors> {
        parse::parse(self, source)
    }

    /// Parses submitted form data.
    pub fn parse_formdata(&self, input: &FormData) -> Result<Record, ValidationErrors> {
        parse::parse_formdata(self, input)
    }

    /// Parses a JSON object.
    pub fn parse_object(&self, record: &Map<String, Value>) -> Result<Record, ValidationErrors> {
        parse::parse_object(self, record)
    }

    /// Parses and deserializes the result into `T`.
    pub fn parse_into<T, S>(&self, source: &S) -> Result<T, ValidationErrors>
    where
        T: DeserializeOwned,
        S: Source + ?Sized,
    {
        parse::parse_into(self, source)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field(
                "fields",
                &self
                    .inner
                    .fields
                    .iter()
                    .map(|(name, valuer)| (name.as_str(), valuer.shape()))
                    .collect::<Vec<_>>(),
            )
            .field("config", &self.inner.config)
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Schema`].
///
/// Invalid declarations are remembered and reported by [`build`](Self::build),
/// so declarations can be chained without intermediate `?`.
#[must_use = "builder methods must be chained or built"]
pub struct SchemaBuilder {
    fields: IndexMap<String, Box<dyn ErasedValuer>>,
    config: ParserConfig,
    error: Option<SchemaError>,
}

impl SchemaBuilder {
    /// Creates an empty builder with the default configuration.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            config: ParserConfig::default(),
            error: None,
        }
    }

    /// Declares a field.
    pub fn field<V>(mut self, name: impl Into<String>, valuer: V) -> Self
    where
        V: Valuer + Send + Sync + 'static,
        V::Output: IntoCoerced,
    {
        let name = name.into();
        if self.error.is_some() {
            return self;
        }
        if name.is_empty() {
            self.error = Some(SchemaError::EmptyFieldName);
            return self;
        }
        match self.fields.entry(name) {
            Entry::Occupied(entry) => {
                self.error = Some(SchemaError::DuplicateField(entry.key().clone()));
            }
            Entry::Vacant(entry) => {
                entry.insert(Box::new(valuer));
            }
        }
        self
    }

    /// Sets the configuration parses of the schema run with.
    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Finishes the schema.
    pub fn build(self) -> Result<Schema, SchemaError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(Schema {
            inner: Arc::new(SchemaInner {
                fields: self.fields,
                config: self.config,
            }),
        })
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .field("error", &self.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::array;
    use crate::valuers::{number, string};

    #[test]
    fn test_field_order_is_declaration_order() {
        let schema = Schema::builder()
            .field("b", string())
            .field("a", number())
            .build()
            .unwrap();
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(schema.contains("a"));
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let error = Schema::builder()
            .field("a", string())
            .field("a", number())
            .build()
            .unwrap_err();
        assert_eq!(error, SchemaError::DuplicateField("a".to_owned()));
        assert_eq!(error.to_string(), "field `a` is declared more than once");
    }

    #[test]
    fn test_empty_field_name_is_rejected() {
        let error = Schema::builder().field("", string()).build().unwrap_err();
        assert_eq!(error, SchemaError::EmptyFieldName);
    }

    #[test]
    fn test_config_is_attached() {
        let schema = Schema::builder()
            .config(ParserConfig::strict())
            .build()
            .unwrap();
        assert_eq!(schema.config(), &ParserConfig::strict());
        assert!(schema.is_empty());
    }

    #[test]
    fn test_debug_lists_fields_and_shapes() {
        let schema = Schema::builder()
            .field("ids", array(number()))
            .build()
            .unwrap();
        let debug = format!("{schema:?}");
        assert!(debug.contains("\"ids\""));
        assert!(debug.contains("List"));
    }

    #[test]
    fn test_schema_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Schema>();
    }
}
