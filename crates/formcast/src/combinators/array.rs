//! ARRAY combinator - coerces every element of a sequence

use serde_json::Value;

use crate::config::ArrayErrors;
use crate::foundation::{Context, ErrorKind, Failure, Shape, ValidationErrors, Valuer};

/// Maps the inner valuer over every element of a sequence.
///
/// Non-sequences fail `expected_array`. Element failures keep the array's
/// own field name and record the element position in `index`. By default
/// every element is coerced and every failure reported; with
/// [`ArrayErrors::FirstOnly`] coercion stops at the first failing element.
/// An un-typed element failure is reported in place as `unknown_error`.
///
/// # Examples
///
/// ```rust
/// use formcast::prelude::*;
/// use serde_json::json;
///
/// let tags = array(string());
/// assert_eq!(
///     tags.coerce_field(Some(&json!(["a", "b"])), "tags").unwrap(),
///     vec!["a".to_owned(), "b".to_owned()]
/// );
///
/// let failure = tags.coerce_field(Some(&json!(["a", 5])), "tags").unwrap_err();
/// let error = failure.errors().unwrap().first().unwrap();
/// assert_eq!(error.field, "tags");
/// assert_eq!(error.index, Some(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Array<V> {
    inner: V,
}

impl<V> Array<V> {
    /// Creates a new array modifier.
    pub const fn new(inner: V) -> Self {
        Self { inner }
    }

    /// Returns a reference to the element valuer.
    pub fn inner(&self) -> &V {
        &self.inner
    }
}

impl<V: Valuer> Valuer for Array<V> {
    type Output = Vec<V::Output>;

    fn coerce(&self, raw: Option<&Value>, cx: &Context<'_>) -> Result<Self::Output, Failure> {
        let Some(Value::Array(items)) = raw else {
            return Err(cx.error(ErrorKind::ExpectedArray, raw).into());
        };

        let first_only = cx.config().array_errors == ArrayErrors::FirstOnly;
        let mut values = Vec::with_capacity(items.len());
        let mut errors = ValidationErrors::new();

        for (index, item) in items.iter().enumerate() {
            match self.inner.coerce(Some(item), cx) {
                Ok(value) => values.push(value),
                Err(failure) => {
                    let element_errors = failure.into_errors(Some(item), cx.field());
                    errors.extend(element_errors.into_iter().map(|error| {
                        if error.index.is_none() {
                            error.with_index(index)
                        } else {
                            error
                        }
                    }));
                    if first_only {
                        break;
                    }
                }
            }
        }

        errors.into_result(values).map_err(Failure::from)
    }

    fn shape(&self) -> Shape {
        Shape::List
    }
}

/// Creates an array modifier.
pub const fn array<V>(inner: V) -> Array<V> {
    Array::new(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::foundation::{BoxError, ValidationError, ValuerExt};
    use crate::validators::{length, minmax};
    use crate::valuers::{from_fn, number, string};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_not_an_array() {
        let failure = array(string())
            .coerce_field(Some(&json!("not-array")), "tags")
            .unwrap_err();
        assert_eq!(
            failure.errors().unwrap().errors(),
            &[ValidationError::new(ErrorKind::ExpectedArray)
                .with_field("tags")
                .with_value(json!("not-array"))]
        );
    }

    #[test]
    fn test_missing_is_not_an_array() {
        assert!(array(string()).coerce_field(None, "tags").is_err());
    }

    #[test]
    fn test_empty_array() {
        assert!(array(number()).coerce_field(Some(&json!([])), "ids").unwrap().is_empty());
    }

    #[test]
    fn test_collects_every_element_error() {
        let failure = array(number())
            .coerce_field(Some(&json!(["1", "x", "3", "y"])), "ids")
            .unwrap_err();

        let errors = failure.errors().unwrap();
        let indices: Vec<Option<usize>> = errors.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![Some(1), Some(3)]);
        assert!(errors.iter().all(|e| e.field == "ids"));
        assert_eq!(errors.first().unwrap().value, Some(json!("x")));
    }

    #[test]
    fn test_untyped_element_failure_keeps_earlier_errors() {
        let items = array(from_fn(|raw: Option<&Value>, _: &Context<'_>| {
            match raw.and_then(Value::as_str) {
                Some("boom") => Err::<String, BoxError>("store offline".into()),
                Some("bad") => Err(ValidationError::new("bad_item").into()),
                _ => Ok("ok".to_owned()),
            }
        }));

        let failure = items
            .coerce_field(Some(&json!(["bad", "boom", "fine"])), "items")
            .unwrap_err();

        let errors = failure.errors().unwrap();
        let summary: Vec<(String, Option<usize>)> = errors
            .iter()
            .map(|e| (e.kind.to_string(), e.index))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("bad_item".to_owned(), Some(0)),
                ("unknown_error".to_owned(), Some(1)),
            ]
        );
        assert!(errors.iter().all(|e| e.field == "items"));
        assert_eq!(errors.errors()[1].value, Some(json!("boom")));
    }

    #[test]
    fn test_first_only_policy() {
        let config = ParserConfig::strict();
        let cx = Context::new("ids", &config);
        let failure = array(number())
            .coerce(Some(&json!(["x", "y"])), &cx)
            .unwrap_err();
        assert_eq!(failure.errors().unwrap().len(), 1);
    }

    #[test]
    fn test_element_validators() {
        let failure = array(number().check(minmax(1.0, 10.0)))
            .coerce_field(Some(&json!([5, 50])), "scores")
            .unwrap_err();
        let error = failure.errors().unwrap().first().unwrap();
        assert_eq!(error.kind, ErrorKind::OutOfRange);
        assert_eq!(error.path(), "scores[1]");
        assert_eq!(error.value, Some(json!(50)));
    }

    #[test]
    fn test_array_level_validators() {
        let tags = array(string()).check(length(1, 2));
        let failure = tags
            .coerce_field(Some(&json!(["a", "b", "c"])), "tags")
            .unwrap_err();
        let error = failure.errors().unwrap().first().unwrap();
        assert_eq!(error.kind, ErrorKind::InvalidLength);
        assert_eq!(error.index, None);
    }

    #[test]
    fn test_shape_is_list() {
        assert_eq!(array(string()).shape(), Shape::List);
        assert_eq!(array(string()).optional().shape(), Shape::List);
    }
}
