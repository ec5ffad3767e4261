//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection produced here is an `invalid_request` error; the details
//! payload tells clients which kind of check failed.

use chrono::{DateTime, NaiveDate, Utc};
use pagination::{PageRequest, PageRequestError};
use serde_json::json;
use tracing::info;

use crate::domain::{DraftValidationError, Error, FailureReason};

/// Detail codes attached to rejected requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RejectionCode {
    InvalidTimestamp,
    BusinessRule,
    MalformedBody,
    MalformedQuery,
    MalformedPath,
}

impl RejectionCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::BusinessRule => "business_rule",
            Self::MalformedBody => "malformed_body",
            Self::MalformedQuery => "malformed_query",
            Self::MalformedPath => "malformed_path",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Client error listing every validation message.
fn errors_list(message: String, errors: &[&str]) -> Error {
    Error::invalid_request(message).with_details(json!({ "errors": errors }))
}

/// Validate paging parameters, applying defaults for absent values.
pub(crate) fn page_request(
    page_number: Option<i64>,
    page_size: Option<i64>,
) -> Result<PageRequest, Error> {
    PageRequest::from_optional(page_number, page_size).map_err(page_request_error)
}

fn page_request_error(error: PageRequestError) -> Error {
    let messages = error.messages();
    let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
    errors_list(error.to_string(), &refs)
}

/// Reject a write whose fields failed validation.
///
/// The message keeps the combined wording of the failed checks.
pub(crate) fn draft_error(error: &DraftValidationError) -> Error {
    errors_list(error.message().to_owned(), &error.reasons())
}

/// Reject a write refused by a business rule, keeping its wording.
pub(crate) fn business_rule_error(reason: FailureReason) -> Error {
    info!(reason = %reason, "write refused by business rule");
    Error::invalid_request(String::from(reason))
        .with_details(json!({ "code": RejectionCode::BusinessRule.as_str() }))
}

/// Reject a body that could not be deserialized.
pub(crate) fn malformed_body_error(message: impl Into<String>) -> Error {
    Error::invalid_request(message)
        .with_details(json!({ "code": RejectionCode::MalformedBody.as_str() }))
}

/// Reject a query string that could not be deserialized.
pub(crate) fn malformed_query_error(message: impl Into<String>) -> Error {
    Error::invalid_request(message)
        .with_details(json!({ "code": RejectionCode::MalformedQuery.as_str() }))
}

/// Reject a path whose identity segment is not an integer.
pub(crate) fn malformed_path_error(message: impl Into<String>) -> Error {
    Error::invalid_request(message)
        .with_details(json!({ "code": RejectionCode::MalformedPath.as_str() }))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!(
        "{field} must be an RFC 3339 timestamp or a YYYY-MM-DD date"
    ))
    .with_details(json!({
        "field": field,
        "value": value,
        "code": RejectionCode::InvalidTimestamp.as_str(),
    }))
}

/// Parse an RFC 3339 timestamp, or a calendar date taken as UTC midnight.
pub(crate) fn parse_timestamp(value: &str, field: FieldName) -> Result<DateTime<Utc>, Error> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| invalid_timestamp_error(field, value))
}

pub(crate) fn parse_optional_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value.map(|raw| parse_timestamp(raw, field)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    use crate::domain::{BrandDraft, ErrorCode, Outcome};

    const START: FieldName = FieldName::new("startDate");

    #[rstest]
    fn absent_paging_uses_defaults() {
        let request = page_request(None, None).expect("defaults are valid");
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), 100);
    }

    #[rstest]
    fn paging_errors_list_every_violation() {
        let error = page_request(Some(0), Some(0)).expect_err("both invalid");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({
                "errors": ["pageNumber should be >= 1", "pageSize should be >= 1"]
            }))
        );
    }

    #[rstest]
    fn draft_errors_list_reasons() {
        let rejected = BrandDraft::try_new("").expect_err("blank");
        let error = draft_error(&rejected);

        assert_eq!(error.message(), "Name should not be empty");
        assert_eq!(
            error.details(),
            Some(&json!({ "errors": ["Name should not be empty"] }))
        );
    }

    #[rstest]
    fn business_rules_keep_their_wording() {
        let reason = Outcome::<()>::fail("e-mail ada@example.com already registered")
            .into_result()
            .expect_err("failure");
        let error = business_rule_error(reason);

        assert_eq!(error.message(), "e-mail ada@example.com already registered");
        assert_eq!(error.details(), Some(&json!({ "code": "business_rule" })));
    }

    #[rstest]
    #[case("2024-02-10T12:30:00Z", Utc.with_ymd_and_hms(2024, 2, 10, 12, 30, 0))]
    #[case("2024-02-10T12:30:00+02:00", Utc.with_ymd_and_hms(2024, 2, 10, 10, 30, 0))]
    #[case("2024-02-10", Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0))]
    fn timestamps_accept_rfc3339_and_dates(
        #[case] raw: &str,
        #[case] expected: chrono::LocalResult<DateTime<Utc>>,
    ) {
        let expected = expected.single().expect("valid timestamp");
        assert_eq!(parse_timestamp(raw, START).expect("parses"), expected);
    }

    #[rstest]
    #[case("10/02/2024")]
    #[case("2024-02-30")]
    #[case("")]
    fn malformed_timestamps_are_rejected(#[case] raw: &str) {
        let error = parse_timestamp(raw, START).expect_err("invalid");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details().and_then(|details| details.get("code")),
            Some(&json!("invalid_timestamp"))
        );
    }

    #[rstest]
    fn absent_timestamp_is_none() {
        assert_eq!(parse_optional_timestamp(None, START).expect("absent"), None);
    }
}
