//! Primitive valuers
//!
//! One coercer per base type. Each factory returns a valuer failing with the
//! canonical kind for its type; `.with_kind(..)` overrides it.
//!
//! | Factory       | Output          | Accepts                                        |
//! |---------------|-----------------|------------------------------------------------|
//! | [`string`]    | `String`        | JSON strings                                   |
//! | [`number`]    | `f64`           | JSON numbers, plain decimal strings            |
//! | [`timestamp`] | `DateTime<Utc>` | epoch milliseconds, date strings               |
//! | [`checkbox`]  | `bool`          | missing, booleans, numbers, on/off spellings   |
//! | [`bool`]      | `bool`          | booleans, `"true"`, `"false"`                  |
//! | [`from_fn`]   | any             | whatever the closure accepts                   |

pub mod boolean;
pub mod custom;
pub mod number;
pub mod string;
pub mod timestamp;

pub use boolean::{BoolValuer, CheckboxValuer, bool, checkbox};
pub use custom::{FromFn, from_fn};
pub use number::{NumberValuer, number};
pub use string::{StringValuer, string};
pub use timestamp::{TimestampValuer, timestamp};
