//! Field checks shared by the write-side drafts.
//!
//! Each check returns an [`Outcome`] so that a draft constructor can run all
//! of them and combine the results with [`Outcome::and`], reporting every
//! broken rule in one message.

use validator::ValidateEmail;

use crate::domain::outcome::{FailureReason, Outcome};

/// A draft was rejected before reaching storage.
///
/// The display text is the combined, client-facing reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct DraftValidationError(FailureReason);

impl DraftValidationError {
    /// The combined reason text.
    pub fn message(&self) -> &str {
        self.0.as_str()
    }

    /// The individual reasons, in check order.
    pub fn reasons(&self) -> Vec<&str> {
        self.message()
            .split(crate::domain::outcome::COMBINED_FAILURE_SEPARATOR)
            .collect()
    }
}

impl From<FailureReason> for DraftValidationError {
    fn from(value: FailureReason) -> Self {
        Self(value)
    }
}

/// Turn the combined checks for a draft into the draft itself.
pub(crate) fn finish<T>(checks: Outcome, build: impl FnOnce() -> T) -> Result<T, DraftValidationError> {
    checks.map(|()| build()).into_result().map_err(DraftValidationError::from)
}

/// A required text field: non-blank and at most `max` characters.
pub(crate) fn required_text(field: &str, value: &str, max: usize) -> Outcome {
    Outcome::ensure(!value.trim().is_empty(), || {
        format!("{field} should not be empty")
    })
    .and(max_chars(field, value, max))
}

/// An optional text field: at most `max` characters when present.
pub(crate) fn optional_text(field: &str, value: Option<&str>, max: usize) -> Outcome {
    value.map_or_else(Outcome::ok, |text| max_chars(field, text, max))
}

fn max_chars(field: &str, value: &str, max: usize) -> Outcome {
    Outcome::ensure(value.chars().count() <= max, || {
        format!("{field} should be at most {max} characters")
    })
}

/// A well-formed e-mail address, as judged by `validator`.
pub(crate) fn email_format(field: &str, value: &str) -> Outcome {
    if value.trim().is_empty() {
        // Emptiness is reported by the required check.
        return Outcome::ok();
    }
    Outcome::ensure(ValidateEmail::validate_email(&value), || {
        format!("{field} should be a valid e-mail address")
    })
}

/// An integer that must be at least one.
pub(crate) fn at_least_one(field: &str, value: i32) -> Outcome {
    Outcome::ensure(value >= 1, || format!("{field} should be >= 1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Acme", true)]
    #[case("", false)]
    #[case("   ", false)]
    fn required_text_rejects_blank(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(required_text("Name", value, 50).is_success(), valid);
    }

    #[rstest]
    fn required_text_reports_length_limit() {
        let long = "x".repeat(51);
        assert_eq!(
            required_text("Name", &long, 50).message(),
            Some("Name should be at most 50 characters")
        );
    }

    #[rstest]
    fn length_limit_counts_characters_not_bytes() {
        let accented = "é".repeat(50);
        assert!(required_text("Name", &accented, 50).is_success());
    }

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("a.b+c@mail.example.org", true)]
    #[case("ada", false)]
    #[case("@example.com", false)]
    #[case("ada@localhost", true)]
    #[case("ada@example", true)]
    #[case("ada@example..com", false)]
    #[case("ada@@example.com", false)]
    #[case("ada@-example.com", false)]
    #[case("ada lovelace@example.com", false)]
    fn email_format_accepts_common_addresses(#[case] value: &str, #[case] valid: bool) {
        assert_eq!(email_format("EmailAddress", value).is_success(), valid);
    }

    #[rstest]
    fn email_format_leaves_emptiness_to_required_check() {
        assert!(email_format("EmailAddress", "").is_success());
    }

    #[rstest]
    fn finish_reports_every_reason() {
        let checks = required_text("Name", "", 50).and(at_least_one("NumberOfTerms", 0));
        let error = finish(checks, || ()).expect_err("both checks fail");
        assert_eq!(
            error.reasons(),
            vec!["Name should not be empty", "NumberOfTerms should be >= 1"]
        );
    }
}
