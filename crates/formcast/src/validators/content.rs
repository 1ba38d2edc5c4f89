//! String content validators
//!
//! Validators for checking the format of string values.

use std::fmt;
use std::marker::PhantomData;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::{ErrorKind, Validate, ValidationError};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_%+\-]+(?:\.[A-Za-z0-9_%+\-]+)*@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .unwrap()
});

// 2+6+6 digits, then an optional check digit or software version.
static IMEI_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\s?\d{6}\s?\d{6}(?:\s?\d{1,3})?$").unwrap());

// ============================================================================
// PATTERN VALIDATOR
// ============================================================================

/// Validates that a string matches a regular expression.
///
/// Email, IMEI and free-form patterns share this type and differ only in
/// the regex and the error kind.
pub struct Pattern<T: ?Sized = str> {
    regex: Regex,
    kind: ErrorKind,
    marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized> Pattern<T> {
    fn with_regex(regex: Regex, kind: ErrorKind) -> Self {
        Self {
            regex,
            kind,
            marker: PhantomData,
        }
    }

    /// Returns the underlying regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Overrides the error kind reported on mismatch.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: impl Into<ErrorKind>) -> Self {
        self.kind = kind.into();
        self
    }
}

impl<T: ?Sized> fmt::Debug for Pattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("regex", &self.regex.as_str())
            .field("kind", &self.kind)
            .finish()
    }
}

impl<T: ?Sized> Clone for Pattern<T> {
    fn clone(&self) -> Self {
        Self::with_regex(self.regex.clone(), self.kind.clone())
    }
}

impl<T: ?Sized + AsRef<str>> Validate for Pattern<T> {
    type Input = T;

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if self.regex.is_match(input.as_ref()) {
            return Ok(());
        }
        let error = ValidationError::new(self.kind.clone());
        if self.kind == ErrorKind::InvalidFormat {
            Err(error.with_param(self.regex.as_str()))
        } else {
            Err(error)
        }
    }
}

/// Validates email addresses: a dot-separated local part, `@`, and a domain
/// with at least one dot and a TLD of two or more letters.
#[must_use]
pub fn email<T: ?Sized>() -> Pattern<T> {
    Pattern::with_regex(EMAIL_REGEX.clone(), ErrorKind::InvalidFormattedEmail)
}

/// Validates IMEI numbers: 14 to 17 digits grouped as 2+6+6(+1..3), with
/// optional single whitespace between groups.
#[must_use]
pub fn imei<T: ?Sized>() -> Pattern<T> {
    Pattern::with_regex(IMEI_REGEX.clone(), ErrorKind::InvalidFormattedImei)
}

/// Validates against a caller-supplied regex, failing with `invalid_format`
/// and the pattern as param.
pub fn matches_regex<T: ?Sized>(pattern: &str) -> Result<Pattern<T>, regex::Error> {
    Ok(Pattern::with_regex(Regex::new(pattern)?, ErrorKind::InvalidFormat))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("a@b.com", true)]
    #[case("first.last+tag@sub.example.org", true)]
    #[case("a@@b", false)]
    #[case("a@b", false)]
    #[case("a.@b.com", false)]
    #[case(".a@b.com", false)]
    #[case("a..b@b.com", false)]
    #[case("a@b.c", false)]
    #[case("a@-b.com", false)]
    #[case("", false)]
    fn test_email(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(email::<str>().validate(input).is_ok(), ok, "{input}");
    }

    #[test]
    fn test_email_error_kind() {
        let error = email::<str>().validate("nope").unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidFormattedEmail);
        assert!(error.params.is_empty());
    }

    #[rstest]
    #[case("49015420323751", true)]
    #[case("490154203237518", true)]
    #[case("49 015420 323751 8", true)]
    #[case("49 015420 323751 899", true)]
    #[case("4901542032375", false)]
    #[case("49  015420 323751", false)]
    #[case("49-015420-323751-8", false)]
    #[case("abcdefghijklmn", false)]
    fn test_imei(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(imei::<str>().validate(input).is_ok(), ok, "{input}");
    }

    #[test]
    fn test_works_on_owned_strings() {
        assert!(email::<String>().validate(&"a@b.com".to_owned()).is_ok());
    }

    #[test]
    fn test_regex() {
        let validator = matches_regex::<str>(r"^\d{3}-\d{4}$").unwrap();
        assert!(validator.validate("123-4567").is_ok());

        let error = validator.validate("invalid").unwrap_err();
        assert_eq!(error.kind, ErrorKind::InvalidFormat);
        assert_eq!(error.param(0), Some(&json!(r"^\d{3}-\d{4}$")));
    }

    #[test]
    fn test_invalid_regex() {
        assert!(matches_regex::<str>("(").is_err());
    }

    #[test]
    fn test_kind_override() {
        let error = email::<str>()
            .with_kind("bad_contact")
            .validate("x")
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::custom("bad_contact"));
    }
}
