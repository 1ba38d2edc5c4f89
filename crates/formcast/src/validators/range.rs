//! Inclusive range validator

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::foundation::{ValidationError, number_value};

/// A bound usable with [`minmax`].
///
/// `to_param` renders the bound the way it appears in error params.
pub trait Operand: PartialOrd + Copy {
    /// Renders this bound as a JSON operand.
    fn to_param(&self) -> Value;
}

macro_rules! int_operand {
    ($($ty:ty),+) => {
        $(
            impl Operand for $ty {
                fn to_param(&self) -> Value {
                    Value::from(*self)
                }
            }
        )+
    };
}

int_operand!(i32, i64, u32, u64, usize);

impl Operand for f64 {
    fn to_param(&self) -> Value {
        number_value(*self)
    }
}

impl Operand for f32 {
    fn to_param(&self) -> Value {
        number_value(f64::from(*self))
    }
}

impl Operand for DateTime<Utc> {
    fn to_param(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

crate::validator! {
    /// Validates that a value lies within `[min, max]`, both ends included.
    ///
    /// NaN is never in range.
    ///
    /// # Examples
    ///
    /// ```
    /// use formcast::validators::minmax;
    /// use formcast::foundation::Validate;
    ///
    /// let validator = minmax(0.0, 120.0);
    /// assert!(validator.validate(&120.0).is_ok());
    /// assert!(validator.validate(&150.0).is_err());
    /// ```
    #[derive(Copy, PartialEq)]
    pub MinMax<T: Operand> { min: T, max: T } for T;
    rule(self, input) { *input >= self.min && *input <= self.max }
    error(self, input) {
        ValidationError::out_of_range(self.min.to_param(), self.max.to_param())
    }
    fn minmax(min: T, max: T);
}
