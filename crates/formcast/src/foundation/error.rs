//! Error types for coercion and validation failures
//!
//! This module provides the structured error carried by every failing field,
//! the ordered batch a parse returns, and the [`Failure`] type valuers
//! propagate internally.
//!
//! Static kinds and messages use `Cow<'static, str>` so the common case of a
//! built-in failure does not allocate for its text.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;

/// Boxed, thread-safe error used for un-typed failures raised by user code.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// ============================================================================
// ERROR KIND
// ============================================================================

/// The kind of a validation failure.
///
/// The built-in variants cover every failure the crate itself produces.
/// [`ErrorKind::Custom`] carries free-form kinds raised by user validators.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The raw value was not a string.
    ExpectedString,
    /// The raw value was neither a number nor a plain decimal string.
    ExpectedNumber,
    /// The raw value could not be turned into a timestamp.
    ExpectedValidTimestamp,
    /// The raw value was not one of the checkbox spellings.
    ExpectedTruthyOrFalsy,
    /// The raw value was neither a boolean nor `"true"`/`"false"`.
    ExpectedBoolean,
    /// The raw value was not a sequence.
    ExpectedArray,
    /// A constructor rejected the raw value.
    ExpectedInstanceOfAClass,
    /// An embedded schema received no value.
    ExpectedSchema,
    /// An embedded schema failed to parse.
    InvalidSchema,
    /// The value did not equal the expected literal, or had no length.
    InvalidValue,
    /// A number fell outside an inclusive range.
    OutOfRange,
    /// A string or sequence length fell outside an inclusive range.
    InvalidLength,
    /// The string is not an email address.
    InvalidFormattedEmail,
    /// The string is not an IMEI.
    InvalidFormattedImei,
    /// The string did not match a pattern.
    InvalidFormat,
    /// A user-supplied coercer raised an error that was not a validation error.
    UnknownError,
    /// A kind defined outside this crate.
    Custom(Cow<'static, str>),
}

impl ErrorKind {
    /// Creates a custom kind.
    pub fn custom(kind: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom(kind.into())
    }

    /// Returns the snake_case code of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ExpectedString => "expected_string",
            Self::ExpectedNumber => "expected_number",
            Self::ExpectedValidTimestamp => "expected_valid_timestamp",
            Self::ExpectedTruthyOrFalsy => "expected_truthy_or_falsy",
            Self::ExpectedBoolean => "expected_boolean",
            Self::ExpectedArray => "expected_array",
            Self::ExpectedInstanceOfAClass => "expected_instance_of_a_class",
            Self::ExpectedSchema => "expected_schema",
            Self::InvalidSchema => "invalid_schema",
            Self::InvalidValue => "invalid_value",
            Self::OutOfRange => "out_of_range",
            Self::InvalidLength => "invalid_length",
            Self::InvalidFormattedEmail => "invalid_formatted_email",
            Self::InvalidFormattedImei => "invalid_formatted_imei",
            Self::InvalidFormat => "invalid_format",
            Self::UnknownError => "unknown_error",
            Self::Custom(kind) => kind,
        }
    }

    /// Returns the English message used when none is given explicitly.
    #[must_use]
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ExpectedString => "expected a string",
            Self::ExpectedNumber => "expected a number",
            Self::ExpectedValidTimestamp => "expected a valid timestamp",
            Self::ExpectedTruthyOrFalsy => "expected a truthy or falsy value",
            Self::ExpectedBoolean => "expected a boolean",
            Self::ExpectedArray => "expected an array",
            Self::ExpectedInstanceOfAClass => "could not construct a value of the expected type",
            Self::ExpectedSchema => "cannot parse empty schema",
            Self::InvalidSchema => "could not parse schema",
            Self::InvalidValue => "invalid value",
            Self::OutOfRange => "value is out of range",
            Self::InvalidLength => "invalid length",
            Self::InvalidFormattedEmail => "expected an email",
            Self::InvalidFormattedImei => "expected an IMEI",
            Self::InvalidFormat => "invalid format",
            Self::UnknownError => "unknown error",
            Self::Custom(_) => "validation failed",
        }
    }
}

impl From<&str> for ErrorKind {
    fn from(code: &str) -> Self {
        match code {
            "expected_string" => Self::ExpectedString,
            "expected_number" => Self::ExpectedNumber,
            "expected_valid_timestamp" => Self::ExpectedValidTimestamp,
            "expected_truthy_or_falsy" => Self::ExpectedTruthyOrFalsy,
            "expected_boolean" => Self::ExpectedBoolean,
            "expected_array" => Self::ExpectedArray,
            "expected_instance_of_a_class" => Self::ExpectedInstanceOfAClass,
            "expected_schema" => Self::ExpectedSchema,
            "invalid_schema" => Self::InvalidSchema,
            "invalid_value" => Self::InvalidValue,
            "out_of_range" => Self::OutOfRange,
            "invalid_length" => Self::InvalidLength,
            "invalid_formatted_email" => Self::InvalidFormattedEmail,
            "invalid_formatted_imei" => Self::InvalidFormattedImei,
            "invalid_format" => Self::InvalidFormat,
            "unknown_error" => Self::UnknownError,
            other => Self::Custom(Cow::Owned(other.to_owned())),
        }
    }
}

impl From<String> for ErrorKind {
    fn from(code: String) -> Self {
        match Self::from(code.as_str()) {
            Self::Custom(_) => Self::Custom(Cow::Owned(code)),
            builtin => builtin,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single field-level failure.
///
/// # Examples
///
/// ```rust
/// use formcast::foundation::{ErrorKind, ValidationError};
///
/// let error = ValidationError::out_of_range(0, 120)
///     .with_field("age")
///     .with_value(150.into());
///
/// assert_eq!(error.kind, ErrorKind::OutOfRange);
/// assert_eq!(error.params.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// What went wrong, for programmatic handling.
    pub kind: ErrorKind,

    /// Human-readable message. Defaults to [`ErrorKind::default_message`].
    pub message: Cow<'static, str>,

    /// The offending value. `None` means the key was missing entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Schema key, or dotted path for embedded schemas.
    pub field: Cow<'static, str>,

    /// Element position when the failure came from inside an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    /// Constraint operands in declaration order, e.g. `[min, max]`.
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub params: SmallVec<[Value; 2]>,

    /// Errors of an embedded schema, re-pathed under this field.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<ValidationError>,

    /// The underlying error, when this failure wraps one.
    #[serde(skip)]
    pub cause: Option<Arc<dyn StdError + Send + Sync + 'static>>,
}

impl ValidationError {
    /// Creates an error of the given kind with its default message.
    pub fn new(kind: impl Into<ErrorKind>) -> Self {
        let kind = kind.into();
        Self {
            message: Cow::Borrowed(kind.default_message()),
            kind,
            value: None,
            field: Cow::Borrowed(""),
            index: None,
            params: SmallVec::new(),
            nested: Vec::new(),
            cause: None,
        }
    }

    /// Sets the field path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = field.into();
        self
    }

    /// Sets the offending value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Records a raw input, keeping "missing" distinct from `null`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_raw(mut self, raw: Option<&Value>) -> Self {
        self.value = raw.cloned();
        self
    }

    /// Sets the array element position.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Appends a constraint operand.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, param: impl Into<Value>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Replaces the message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the nested errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidationError>) -> Self {
        self.nested = errors;
        self
    }

    /// Attaches the underlying error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Attaches an already boxed underlying error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_boxed_cause(mut self, cause: BoxError) -> Self {
        self.cause = Some(Arc::from(cause));
        self
    }

    /// Returns the operand at `position`.
    #[must_use]
    pub fn param(&self, position: usize) -> Option<&Value> {
        self.params.get(position)
    }

    /// Returns true if this error is of `kind`.
    #[must_use]
    pub fn is(&self, kind: &ErrorKind) -> bool {
        &self.kind == kind
    }

    /// Returns the field path including the element index, e.g. `ids[1]`.
    #[must_use]
    pub fn path(&self) -> String {
        match self.index {
            Some(index) => format!("{}[{index}]", self.field),
            None => self.field.to_string(),
        }
    }

    /// Returns true if this error has nested errors.
    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }

    /// Returns the number of errors (including nested).
    #[must_use]
    pub fn total_error_count(&self) -> usize {
        1 + self
            .nested
            .iter()
            .map(ValidationError::total_error_count)
            .sum::<usize>()
    }

    /// Flattens this error and its nested errors (depth-first).
    #[must_use]
    pub fn flatten(&self) -> Vec<&ValidationError> {
        let mut result = vec![self];
        for nested in &self.nested {
            result.extend(nested.flatten());
        }
        result
    }
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates an "out_of_range" error with `[min, max]` params.
    pub fn out_of_range(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        Self::new(ErrorKind::OutOfRange)
            .with_param(min)
            .with_param(max)
    }

    /// Creates an "invalid_length" error with `[min, max]` params.
    pub fn invalid_length(min: usize, max: usize) -> Self {
        Self::new(ErrorKind::InvalidLength)
            .with_param(min)
            .with_param(max)
    }

    /// Creates an "invalid_value" error with the expected literal as param.
    pub fn invalid_value(expected: Value) -> Self {
        Self::new(ErrorKind::InvalidValue).with_param(expected)
    }

    /// Creates an "unknown_error" wrapping an un-typed failure.
    pub fn unknown(cause: BoxError) -> Self {
        let message = format!("unknown error: {cause}");
        Self::new(ErrorKind::UnknownError)
            .with_message(message)
            .with_boxed_cause(cause)
    }
}

impl PartialEq for ValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.message == other.message
            && self.value == other.value
            && self.field == other.field
            && self.index == other.index
            && self.params == other.params
            && self.nested == other.nested
            && self.cause.as_ref().map(ToString::to_string)
                == other.cause.as_ref().map(ToString::to_string)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}: {}", self.kind, self.message)?;
        } else {
            write!(f, "[{}] {}: {}", self.path(), self.kind, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, param) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{param}")?;
            }
            write!(f, "])")?;
        }

        if !self.nested.is_empty() {
            write!(f, "\n  Nested errors:")?;
            for (i, error) in self.nested.iter().enumerate() {
                write!(f, "\n    {}. {}", i + 1, error)?;
            }
        }

        Ok(())
    }
}

impl StdError for ValidationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}

// ============================================================================
// ERROR BATCH
// ============================================================================

/// The ordered collection of failures produced by one valuer or one parse.
///
/// Insertion order is preserved and nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Appends an error.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends every error of `errors`.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the first error, if any.
    #[must_use]
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Iterates over the errors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Returns the errors reported for `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |error| error.field == field)
    }

    /// Flattens every error and its nested errors (depth-first).
    #[must_use]
    pub fn flatten(&self) -> Vec<&ValidationError> {
        self.errors.iter().flat_map(ValidationError::flatten).collect()
    }

    /// Consumes the batch and returns the errors.
    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Returns `ok_value` if the batch is empty, otherwise the batch.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl StdError for ValidationErrors {}

// ============================================================================
// FAILURE
// ============================================================================

/// Why a valuer could not produce a value.
///
/// `Invalid` is the typed path every built-in valuer uses. `Unexpected`
/// carries errors raised by user code that are not validation errors; the
/// schema parser reports them as `unknown_error`.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// One or more typed validation failures.
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),

    /// An un-typed error raised inside a user-supplied coercer.
    #[error("unexpected error: {0}")]
    Unexpected(#[source] BoxError),
}

impl Failure {
    /// Classifies a boxed error, recovering validation errors by downcast.
    pub fn from_boxed(error: BoxError) -> Self {
        let error = match error.downcast::<ValidationErrors>() {
            Ok(errors) => return Self::Invalid(*errors),
            Err(other) => other,
        };
        match error.downcast::<ValidationError>() {
            Ok(error) => Self::Invalid(ValidationErrors::from(*error)),
            Err(other) => Self::Unexpected(other),
        }
    }

    /// Returns the typed errors, if this is an `Invalid` failure.
    #[must_use]
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Unexpected(_) => None,
        }
    }

    /// Converts into a batch, wrapping an un-typed error as `unknown_error`.
    #[must_use]
    pub fn into_errors(self, raw: Option<&Value>, field: &str) -> ValidationErrors {
        match self {
            Self::Invalid(errors) => errors,
            Self::Unexpected(cause) => ValidationError::unknown(cause)
                .with_field(field.to_owned())
                .with_raw(raw)
                .into(),
        }
    }

    /// Applies `f` to every typed error. Un-typed failures pass through.
    #[must_use]
    pub fn map_errors(self, f: impl FnMut(ValidationError) -> ValidationError) -> Self {
        match self {
            Self::Invalid(errors) => Self::Invalid(errors.into_iter().map(f).collect()),
            unexpected @ Self::Unexpected(_) => unexpected,
        }
    }
}

impl From<ValidationError> for Failure {
    fn from(error: ValidationError) -> Self {
        Self::Invalid(ValidationErrors::from(error))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_message_follows_kind() {
        let error = ValidationError::new(ErrorKind::ExpectedString);
        assert_eq!(error.message, "expected a string");
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_kind_round_trips_through_code() {
        for kind in [
            ErrorKind::ExpectedNumber,
            ErrorKind::OutOfRange,
            ErrorKind::InvalidFormattedImei,
            ErrorKind::UnknownError,
        ] {
            assert_eq!(ErrorKind::from(kind.as_str()), kind);
        }
        assert_eq!(
            ErrorKind::from("not_in_the_past"),
            ErrorKind::custom("not_in_the_past")
        );
    }

    #[test]
    fn test_out_of_range_params() {
        let error = ValidationError::out_of_range(0, 120).with_field("age");
        assert_eq!(error.param(0), Some(&json!(0)));
        assert_eq!(error.param(1), Some(&json!(120)));
        assert_eq!(error.to_string(), "[age] out_of_range: value is out of range (params: [0, 120])");
    }

    #[test]
    fn test_path_includes_index() {
        let error = ValidationError::new(ErrorKind::ExpectedString)
            .with_field("ids")
            .with_index(1);
        assert_eq!(error.path(), "ids[1]");
    }

    #[test]
    fn test_missing_value_is_not_null() {
        let missing = ValidationError::new(ErrorKind::ExpectedString).with_raw(None);
        let null = ValidationError::new(ErrorKind::ExpectedString).with_raw(Some(&Value::Null));
        assert_ne!(missing, null);
    }

    #[test]
    fn test_flatten_walks_nested() {
        let error = ValidationError::new(ErrorKind::InvalidSchema).with_nested(vec![
            ValidationError::new(ErrorKind::ExpectedString).with_field("role.id"),
            ValidationError::new(ErrorKind::ExpectedString).with_field("role.name"),
        ]);
        assert_eq!(error.total_error_count(), 3);
        assert_eq!(error.flatten().len(), 3);
    }

    #[test]
    fn test_batch_preserves_order_and_duplicates() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new(ErrorKind::ExpectedNumber).with_field("a"));
        errors.add(ValidationError::new(ErrorKind::ExpectedNumber).with_field("a"));
        errors.add(ValidationError::new(ErrorKind::ExpectedString).with_field("b"));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.for_field("a").count(), 2);
        let fields: Vec<&str> = errors.iter().map(|e| &*e.field).collect();
        assert_eq!(fields, vec!["a", "a", "b"]);
    }

    #[test]
    fn test_failure_recovers_typed_errors() {
        let boxed: BoxError = Box::new(ValidationError::new(ErrorKind::InvalidValue));
        assert!(matches!(Failure::from_boxed(boxed), Failure::Invalid(_)));

        let boxed: BoxError = "database offline".into();
        assert!(matches!(Failure::from_boxed(boxed), Failure::Unexpected(_)));
    }

    #[test]
    fn test_unexpected_becomes_unknown_error() {
        let failure = Failure::Unexpected("boom".into());
        let errors = failure.into_errors(Some(&json!("x")), "field");

        let error = errors.first().unwrap();
        assert_eq!(error.kind, ErrorKind::UnknownError);
        assert_eq!(error.field, "field");
        assert_eq!(error.value, Some(json!("x")));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serializes_without_cause() {
        let error = ValidationError::out_of_range(0, 120)
            .with_field("age")
            .with_value(json!(150))
            .with_cause(std::fmt::Error);
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "out_of_range",
                "message": "value is out of range",
                "value": 150,
                "field": "age",
                "params": [0, 120],
            })
        );
    }
}
