//! Combinators for composing valuers
//!
//! Modifiers wrap a valuer and return a new one with altered behaviour. Most
//! are also reachable as methods through
//! [`ValuerExt`](crate::foundation::ValuerExt).
//!
//! # Absence
//!
//! - [`Optional`] - absent becomes `None`
//! - [`Nullable`] - absent becomes [`OrNull::Null`]
//! - [`Fallback`] - absent becomes a default value
//!
//! # Structure
//!
//! - [`Array`] - coerce every element of a sequence
//! - [`Nested`] - parse an embedded schema
//! - [`Construct`], [`ConstructWith`] - build a caller type
//!
//! # Conversion and reporting
//!
//! - [`ToNumber`] - numeric cast of the coerced value
//! - [`Checked`] - attach validators (the composition operator)
//! - [`WithMessage`] - override error messages and kinds
//!
//! # Examples
//!
//! ```rust
//! use formcast::prelude::*;
//! use serde_json::json;
//!
//! let ids = array(number().check(minmax(1.0, 9999.0))).optional();
//! assert_eq!(
//!     ids.coerce_field(Some(&json!(["1", 2])), "ids").unwrap(),
//!     Some(vec![1.0, 2.0])
//! );
//! ```

pub mod array;
pub mod cast;
pub mod check;
pub mod construct;
pub mod message;
pub mod nested;
pub mod optional;

pub use array::{Array, array};
pub use cast::{NumberCast, ToNumber, to_number};
pub use check::Checked;
pub use construct::{Construct, ConstructWith, construct, construct_with};
pub use message::{WithMessage, with_code, with_message};
pub use nested::{Nested, nested};
pub use optional::{Fallback, Nullable, Optional, OrNull, fallback, nullable, optional};
