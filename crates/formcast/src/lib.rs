//! # formcast
//!
//! Schema-driven coercion and validation of untyped form and record input.
//!
//! ## Quick Start
//!
//! ```rust
//! use formcast::prelude::*;
//!
//! let schema = Schema::builder()
//!     .field("email", string().check(email()))
//!     .field("age", number().check(minmax(18.0, 120.0)))
//!     .field("terms", checkbox().check(exactly(true)))
//!     .field("ids", array(number()).optional())
//!     .build()
//!     .unwrap();
//!
//! let form: FormData = [
//!     ("email", "ada@example.com"),
//!     ("age", "36"),
//!     ("terms", "on"),
//!     ("ids[]", "7"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let record = schema.parse_formdata(&form).unwrap();
//! assert_eq!(record.get_f64("age"), Some(36.0));
//! assert_eq!(record.get_as::<Vec<f64>>("ids"), Some(vec![7.0]));
//! ```
//!
//! ## Building blocks
//!
//! - **Valuers** turn a raw value into a typed one:
//!   [`string`](valuers::string), [`number`](valuers::number),
//!   [`timestamp`](valuers::timestamp), [`checkbox`](valuers::checkbox),
//!   [`bool`](valuers::bool)
//! - **Modifiers** wrap valuers: [`optional`](combinators::optional),
//!   [`nullable`](combinators::nullable), [`fallback`](combinators::fallback),
//!   [`array`](combinators::array), [`to_number`](combinators::to_number),
//!   [`construct`](combinators::construct), [`nested`](combinators::nested)
//! - **Validators** check a typed value: [`exactly`](validators::exactly),
//!   [`minmax`](validators::minmax), [`length`](validators::length),
//!   [`email`](validators::email), [`imei`](validators::imei)
//! - [`check`](foundation::ValuerExt::check) attaches validators to a valuer
//!
//! Use the [`validator!`] macro to write new validators without boilerplate.

// ValidationError is returned by value from every validator; boxing it would
// add an allocation to each check.
#![allow(clippy::result_large_err)]
// Wrapped valuers such as Optional<Checked<Array<Checked<NumberValuer>>>>
// produce long types.
#![allow(clippy::type_complexity)]

pub mod combinators;
pub mod config;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod schema;
pub mod validators;
pub mod valuers;
