//! Built-in validators
//!
//! Validators run after a valuer succeeded and see the coerced value. Attach
//! them to a field with [`ValuerExt::check`](crate::foundation::ValuerExt::check).
//!
//! # Categories
//!
//! - **Equality**: [`exactly`], [`literal`]
//! - **Numeric**: [`minmax`]
//! - **Length**: [`length`] for strings and sequences
//! - **Format**: [`email`], [`imei`], [`matches_regex`]
//! - **Custom**: [`validator_fn`] and the [`validator!`](crate::validator) macro
//!
//! # Examples
//!
//! ```rust
//! use formcast::prelude::*;
//!
//! let username = string().check(length(3, 20));
//! let contact = string().check(email());
//! let age = number().check(minmax(18.0, 100.0));
//! let role = string().check(exactly("admin"));
//! ```

pub mod content;
pub mod custom;
pub mod exactly;
pub mod length;
pub mod range;

pub use content::{Pattern, email, imei, matches_regex};
pub use custom::{ValidatorFn, validator_fn};
pub use exactly::{Exactly, exactly, literal};
pub use length::{Length, Measure, length};
pub use range::{MinMax, Operand, minmax};
