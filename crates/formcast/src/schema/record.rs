//! The parsed object returned by a successful parse

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::combinators::OrNull;
use crate::foundation::{number_value, to_json};

// ============================================================================
// COERCED VALUE
// ============================================================================

/// A coerced field value, shaped by the valuer that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// An optional field that was absent.
    None,
    /// A nullable field that was absent.
    Null,
    /// From `bool` and `checkbox`.
    Bool(bool),
    /// From `number` and `to_number`.
    Number(f64),
    /// From `string`.
    String(String),
    /// From `timestamp`.
    Timestamp(DateTime<Utc>),
    /// From `array`.
    Array(Vec<Coerced>),
    /// From an embedded schema.
    Object(Record),
    /// Anything a custom valuer produced as raw JSON.
    Json(Value),
}

impl Coerced {
    /// Returns true for [`Coerced::None`] and [`Coerced::Null`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::None | Self::Null)
    }

    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a number.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the timestamp, if this is a timestamp.
    #[must_use]
    pub const fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(at) => Some(at),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Coerced]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the embedded record, if this is an object.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Object(record) => Some(record),
            _ => None,
        }
    }

    /// Renders this value as JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::None | Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => number_value(*n),
            Self::String(s) => Value::String(s.clone()),
            Self::Timestamp(at) => to_json(at),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(record) => record.to_json(),
            Self::Json(value) => value.clone(),
        }
    }
}

impl Serialize for Coerced {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None | Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => match number_value(*n) {
                Value::Number(number) => number.serialize(serializer),
                _ => serializer.serialize_f64(*n),
            },
            Self::String(s) => serializer.serialize_str(s),
            Self::Timestamp(at) => at.serialize(serializer),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(record) => record.serialize(serializer),
            Self::Json(value) => value.serialize(serializer),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Converts a valuer output into a [`Coerced`] for storage in a [`Record`].
///
/// Every valuer used as a schema field must produce a type implementing
/// this trait.
pub trait IntoCoerced {
    /// Performs the conversion.
    fn into_coerced(self) -> Coerced;
}

/// Reads a typed value back out of a [`Coerced`].
pub trait FromCoerced: Sized {
    /// Returns `None` if `value` has a different shape.
    fn from_coerced(value: &Coerced) -> Option<Self>;
}

impl IntoCoerced for Coerced {
    fn into_coerced(self) -> Coerced {
        self
    }
}

impl IntoCoerced for String {
    fn into_coerced(self) -> Coerced {
        Coerced::String(self)
    }
}

impl IntoCoerced for f64 {
    fn into_coerced(self) -> Coerced {
        Coerced::Number(self)
    }
}

impl IntoCoerced for bool {
    fn into_coerced(self) -> Coerced {
        Coerced::Bool(self)
    }
}

impl IntoCoerced for DateTime<Utc> {
    fn into_coerced(self) -> Coerced {
        Coerced::Timestamp(self)
    }
}

impl IntoCoerced for Record {
    fn into_coerced(self) -> Coerced {
        Coerced::Object(self)
    }
}

impl IntoCoerced for Value {
    fn into_coerced(self) -> Coerced {
        Coerced::Json(self)
    }
}

impl<T: IntoCoerced> IntoCoerced for Vec<T> {
    fn into_coerced(self) -> Coerced {
        Coerced::Array(self.into_iter().map(IntoCoerced::into_coerced).collect())
    }
}

impl<T: IntoCoerced> IntoCoerced for Option<T> {
    fn into_coerced(self) -> Coerced {
        self.map_or(Coerced::None, IntoCoerced::into_coerced)
    }
}

impl<T: IntoCoerced> IntoCoerced for OrNull<T> {
    fn into_coerced(self) -> Coerced {
        match self {
            Self::Null => Coerced::Null,
            Self::Value(value) => value.into_coerced(),
        }
    }
}

macro_rules! number_into_coerced {
    ($($ty:ty),+) => {
        $(
            impl IntoCoerced for $ty {
                fn into_coerced(self) -> Coerced {
                    Coerced::Number(self as f64)
                }
            }
        )+
    };
}

number_into_coerced!(i32, i64, u16, u32, u64);

impl IntoCoerced for IpAddr {
    fn into_coerced(self) -> Coerced {
        Coerced::String(self.to_string())
    }
}

impl FromCoerced for Coerced {
    fn from_coerced(value: &Coerced) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromCoerced for String {
    fn from_coerced(value: &Coerced) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FromCoerced for f64 {
    fn from_coerced(value: &Coerced) -> Option<Self> {
        value.as_f64()
    }
}

impl FromCoerced for bool {
    fn from_coerced(value: &Coerced) -> Option<Self> {
        value.as_bool()
    }
}

impl FromCoerced for DateTime<Utc> {
    fn from_coerced(value: &Coerced) -> Option<Self> {
        value.as_timestamp().copied()
    }
}

impl FromCoerced for Record {
    fn from_coerced(value: &Coerced) -> Option<Self> {
        value.as_record().cloned()
    }
}

impl FromCoerced for Value {
    fn from_coerced(value: &Coerced) -> Option<Self> {
        Some(value.to_json())
    }
}

impl<T: FromCoerced> FromCoerced for Vec<T> {
    fn from_coerced(value: &Coerced) -> Option<Self> {
        value.as_array()?.iter().map(T::from_coerced).collect()
    }
}

impl<T: FromCoerced> FromCoerced for Option<T> {
    fn from_coerced(value: &Coerced) -> Option<Self> {
        if value.is_absent() {
            Some(None)
        } else {
            T::from_coerced(value).map(Some)
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// Field name to coerced value, in schema declaration order.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Signup {
///     email: String,
///     age: Option<f64>,
/// }
///
/// let schema = Schema::builder()
///     .field("email", string().check(email()))
///     .field("age", number().optional())
///     .build()
///     .unwrap();
///
/// let input = json!({ "email": "a@b.com", "age": "" });
/// let record = schema.parse_object(input.as_object().unwrap()).unwrap();
///
/// assert_eq!(record.get_str("email"), Some("a@b.com"));
/// assert_eq!(record.get_as::<Option<f64>>("age"), Some(None));
///
/// let signup: Signup = record.deserialize().unwrap();
/// assert_eq!(signup.age, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, Coerced>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts a field, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Coerced) -> Option<Coerced> {
        self.fields.insert(name.into(), value)
    }

    /// Returns the value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Coerced> {
        self.fields.get(name)
    }

    /// Returns the value of `name` read as `T`.
    #[must_use]
    pub fn get_as<T: FromCoerced>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(T::from_coerced)
    }

    /// Returns the string value of `name`.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Coerced::as_str)
    }

    /// Returns the number value of `name`.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Coerced::as_f64)
    }

    /// Returns the boolean value of `name`.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Coerced::as_bool)
    }

    /// Returns the embedded record under `name`.
    #[must_use]
    pub fn get_record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(Coerced::as_record)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Renders the record as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Converts the record into a caller type through serde.
    ///
    /// Timestamps are handed over as RFC 3339 strings, which `chrono`
    /// deserializes back into `DateTime<Utc>`.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    fn sample() -> Record {
        let mut record = Record::new();
        record.insert("name", "Ada".to_owned().into_coerced());
        record.insert("age", 36.0_f64.into_coerced());
        record.insert("nickname", None::<String>.into_coerced());
        record.insert("manager", OrNull::<String>::Null.into_coerced());
        record.insert(
            "joined",
            Utc.with_ymd_and_hms(2020, 5, 17, 9, 0, 0).unwrap().into_coerced(),
        );
        record.insert("tags", vec!["a".to_owned(), "b".to_owned()].into_coerced());
        record
    }

    #[test]
    fn test_order_is_insertion_order() {
        let record = sample();
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["name", "age", "nickname", "manager", "joined", "tags"]);
    }

    #[test]
    fn test_typed_access() {
        let record = sample();
        assert_eq!(record.get_str("name"), Some("Ada"));
        assert_eq!(record.get_f64("age"), Some(36.0));
        assert_eq!(record.get_as::<Option<String>>("nickname"), Some(None));
        assert_eq!(record.get_as::<Vec<String>>("tags").unwrap().len(), 2);
        assert_eq!(record.get_as::<f64>("name"), None);
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_serializes_to_json() {
        assert_eq!(
            serde_json::to_value(sample()).unwrap(),
            json!({
                "name": "Ada",
                "age": 36,
                "nickname": null,
                "manager": null,
                "joined": "2020-05-17T09:00:00Z",
                "tags": ["a", "b"],
            })
        );
        assert_eq!(serde_json::to_value(sample()).unwrap(), sample().to_json());
    }

    #[test]
    fn test_deserialize_into_struct() {
        #[derive(Debug, Deserialize)]
        struct Employee {
            name: String,
            age: u8,
            nickname: Option<String>,
            joined: DateTime<Utc>,
            tags: Vec<String>,
        }

        let employee: Employee = sample().deserialize().unwrap();
        assert_eq!(employee.name, "Ada");
        assert_eq!(employee.age, 36);
        assert_eq!(employee.nickname, None);
        assert_eq!(employee.joined.timestamp(), 1_589_706_000);
        assert_eq!(employee.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_absent_variants() {
        assert!(Coerced::None.is_absent());
        assert!(!Coerced::Bool(false).is_absent());
        assert_eq!(Coerced::Number(1.5).to_json(), json!(1.5));
    }

    #[test]
    fn test_constructed_outputs() {
        assert_eq!(8080_u16.into_coerced(), Coerced::Number(8080.0));
        assert_eq!(
            IpAddr::from([127, 0, 0, 1]).into_coerced(),
            Coerced::String("127.0.0.1".to_owned())
        );
    }
}
