//! Configuration for schema parsing
//!
//! A [`ParserConfig`] is attached to a [`Schema`](crate::schema::Schema) when
//! it is built and is visible to every valuer through its
//! [`Context`](crate::foundation::Context). Embedded schemas are parsed with
//! the configuration of the outermost parse.

use serde::{Deserialize, Serialize};

/// How `array` reports failing elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayErrors {
    /// Coerce every element and report every failure, each tagged with the
    /// element index.
    #[default]
    CollectAll,
    /// Stop at the first failing element.
    FirstOnly,
}

/// Main configuration for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Element failure policy for `array`.
    pub array_errors: ArrayErrors,
    /// Let `to_number` return NaN or infinities instead of failing.
    pub allow_non_finite_casts: bool,
    /// Accept JSON-encoded strings where an embedded schema expects an object.
    pub nested_json_strings: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            array_errors: ArrayErrors::CollectAll,
            allow_non_finite_casts: false,
            nested_json_strings: true,
        }
    }

    /// Nested values must be real objects and arrays stop at the first bad
    /// element.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            array_errors: ArrayErrors::FirstOnly,
            allow_non_finite_casts: false,
            nested_json_strings: false,
        }
    }

    /// Accepts everything the defaults accept, plus non-finite casts.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            array_errors: ArrayErrors::CollectAll,
            allow_non_finite_casts: true,
            nested_json_strings: true,
        }
    }

    /// Loads a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the array element failure policy.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_array_errors(mut self, policy: ArrayErrors) -> Self {
        self.array_errors = policy;
        self
    }

    /// Allows or rejects non-finite `to_number` results.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_non_finite_casts(mut self, allow: bool) -> Self {
        self.allow_non_finite_casts = allow;
        self
    }

    /// Allows or rejects JSON-encoded strings for embedded schemas.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_nested_json_strings(mut self, allow: bool) -> Self {
        self.nested_json_strings = allow;
        self
    }
}
