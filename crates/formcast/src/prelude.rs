//! Prelude module for convenient imports.
//!
//! `use formcast::prelude::*;` brings in the traits, error types, valuers,
//! modifiers, validators and schema types needed to declare and run a
//! schema.
//!
//! # Examples
//!
//! ```rust
//! use formcast::prelude::*;
//!
//! let phone = string().check(imei()).optional();
//! let age = number().check(minmax(0.0, 120.0));
//! let tags = array(string().check(length(1, 20)));
//! # let _ = (phone, age, tags);
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, context
// ============================================================================

pub use crate::foundation::{
    BoxError, Context, ErrorKind, Failure, Shape, Validate, ValidationError, ValidationErrors,
    Valuer, ValuerExt,
};

// ============================================================================
// VALUERS: Raw value coercion
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::valuers::*;

// ============================================================================
// VALIDATORS: All built-in validators
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// COMBINATORS: Modifiers and composition
// ============================================================================

pub use crate::combinators::{
    Array, Checked, Construct, ConstructWith, Fallback, Nested, NumberCast, Nullable, Optional,
    OrNull, ToNumber, WithMessage, array, construct, construct_with, fallback, nested, nullable,
    optional, to_number, with_code, with_message,
};

// ============================================================================
// SCHEMA: Declaration, sources, results
// ============================================================================

pub use crate::schema::{
    Coerced, FormData, FromCoerced, IntoCoerced, Record, Schema, SchemaBuilder, SchemaError,
    Source, parse, parse_formdata, parse_into, parse_object,
};

// ============================================================================
// CONFIG
// ============================================================================

pub use crate::config::{ArrayErrors, ParserConfig};
