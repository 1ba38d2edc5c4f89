//! Per-field context handed to every valuer

use serde_json::Value;

use crate::config::ParserConfig;
use crate::foundation::{ErrorKind, ValidationError};

static DEFAULT_CONFIG: ParserConfig = ParserConfig::new();

/// The field being coerced and the configuration of the running parse.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    field: &'a str,
    config: &'a ParserConfig,
}

impl<'a> Context<'a> {
    /// Creates a context for `field`.
    #[must_use]
    pub const fn new(field: &'a str, config: &'a ParserConfig) -> Self {
        Self { field, config }
    }

    /// Creates a context with the default configuration, for using a valuer
    /// outside a schema.
    #[must_use]
    pub fn detached(field: &'a str) -> Self {
        Self::new(field, &DEFAULT_CONFIG)
    }

    /// The schema key being coerced.
    #[must_use]
    pub const fn field(&self) -> &'a str {
        self.field
    }

    /// The configuration of the running parse.
    #[must_use]
    pub const fn config(&self) -> &'a ParserConfig {
        self.config
    }

    /// Creates an error of `kind` for this field, recording `raw`.
    #[must_use]
    pub fn error(&self, kind: impl Into<ErrorKind>, raw: Option<&Value>) -> ValidationError {
        ValidationError::new(kind)
            .with_field(self.field.to_owned())
            .with_raw(raw)
    }
}
