//! Input sources a schema can parse
//!
//! A [`Source`] answers "what was submitted under this key". Single-valued
//! sources such as JSON objects only implement [`Source::get`];
//! multi-valued ones such as [`FormData`] also gather every value for
//! list-shaped fields.

use std::borrow::Cow;

use serde_json::{Map, Value};

/// A keyed collection of raw values.
pub trait Source {
    /// Returns the value under `key`, or `None` if the key is missing.
    fn get(&self, key: &str) -> Option<Cow<'_, Value>>;

    /// Returns every value under `key` as one sequence, for list-shaped
    /// fields. Defaults to [`Source::get`].
    fn get_list(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get(key)
    }
}

impl<S: Source + ?Sized> Source for &S {
    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        (**self).get(key)
    }

    fn get_list(&self, key: &str) -> Option<Cow<'_, Value>> {
        (**self).get_list(key)
    }
}

impl Source for Map<String, Value> {
    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        Self::get(self, key).map(Cow::Borrowed)
    }
}

/// Only objects have keys; any other JSON value is an empty source.
impl Source for Value {
    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.as_object()?.get(key).map(Cow::Borrowed)
    }
}

// ============================================================================
// FORM DATA
// ============================================================================

/// Ordered multi-map of form fields, as submitted by an HTML form.
///
/// A key may appear several times. [`Source::get`] returns its first value;
/// [`Source::get_list`] returns all values under `key` followed by those
/// under `key[]`.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
///
/// let mut form = FormData::new();
/// form.append("name", "Ada");
/// form.append("ids[]", "1");
/// form.append("ids[]", "2");
///
/// let schema = Schema::builder()
///     .field("name", string())
///     .field("ids", array(number()))
///     .build()
///     .unwrap();
///
/// let record = schema.parse_formdata(&form).unwrap();
/// assert_eq!(record.get_as::<Vec<f64>>("ids"), Some(vec![1.0, 2.0]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Creates empty form data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value under `name`, keeping existing ones.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replaces every value under `name` with `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.entries.retain(|(key, _)| *key != name);
        self.entries.push((name, value.into()));
    }

    /// Returns the first value under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns every value under `name`, in submission order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        form.extend(iter);
        form
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for FormData {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

impl Source for FormData {
    fn get(&self, key: &str) -> Option<Cow<'_, Value>> {
        Self::get(self, key).map(|value| Cow::Owned(Value::String(value.to_owned())))
    }

    fn get_list(&self, key: &str) -> Option<Cow<'_, Value>> {
        let bracketed = format!("{key}[]");
        let values: Vec<Value> = self
            .entries
            .iter()
            .filter(|(name, _)| name == key || *name == bracketed)
            .map(|(_, value)| Value::String(value.clone()))
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(Cow::Owned(Value::Array(values)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn form() -> FormData {
        [
            ("name", "Ada"),
            ("ids[]", "1"),
            ("ids", "2"),
            ("ids[]", "3"),
            ("name", "Grace"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_get_returns_first_value() {
        assert_eq!(FormData::get(&form(), "name"), Some("Ada"));
        assert_eq!(
            Source::get(&form(), "name").map(Cow::into_owned),
            Some(json!("Ada"))
        );
        assert_eq!(Source::get(&form(), "missing"), None);
    }

    #[test]
    fn test_get_list_merges_bracketed_keys() {
        assert_eq!(
            form().get_list("ids").map(Cow::into_owned),
            Some(json!(["1", "2", "3"]))
        );
        assert_eq!(form().get_list("tags"), None);
    }

    #[test]
    fn test_set_replaces_all_values() {
        let mut form = form();
        form.set("name", "Linus");
        assert_eq!(form.get_all("name").collect::<Vec<_>>(), vec!["Linus"]);
        assert_eq!(form.len(), 4);
    }

    #[test]
    fn test_json_sources() {
        let value = json!({ "a": 1 });
        assert_eq!(Source::get(&value, "a").map(Cow::into_owned), Some(json!(1)));
        assert_eq!(Source::get(&json!([1]), "a"), None);
    }
}
