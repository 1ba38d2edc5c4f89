//! Core coercion and validation types and traits
//!
//! This module contains the fundamental building blocks of the crate:
//!
//! - **Traits**: [`Valuer`], [`ValuerExt`], [`Validate`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`Failure`]
//! - **Context**: [`Context`], the field and configuration a valuer runs for
//!
//! # Architecture
//!
//! ## 1. Coercion first, validation second
//!
//! A valuer turns an untyped raw value into a typed one. Validators only
//! ever see the typed value:
//!
//! ```rust
//! use formcast::prelude::*;
//! use serde_json::json;
//!
//! let email_field = string().check(email());
//! assert!(email_field.coerce_field(Some(&json!("a@b.com")), "email").is_ok());
//! ```
//!
//! ## 2. Every failure is collected
//!
//! A field runs all of its validators, and a schema visits all of its
//! fields. Errors come back as one ordered batch:
//!
//! ```rust
//! use formcast::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::builder()
//!     .field("age", number().check(minmax(0.0, 120.0)))
//!     .field("name", string())
//!     .build()
//!     .unwrap();
//!
//! let input = json!({ "age": "150" });
//! let errors = schema.parse_object(input.as_object().unwrap()).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

pub mod context;
pub mod error;
pub mod raw;
pub mod traits;

pub use context::Context;
pub use error::{BoxError, ErrorKind, Failure, ValidationError, ValidationErrors};
pub use raw::{is_absent, number_value, to_json};
pub use traits::{Shape, Validate, ValuerExt, Valuer};
