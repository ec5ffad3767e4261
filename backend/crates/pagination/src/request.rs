//! Validated paging parameters.

use std::fmt;

use thiserror::Error;

/// Page number used when a client omits `pageNumber`.
pub const DEFAULT_PAGE_NUMBER: i64 = 1;

/// Page size used when a client omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// A single broken paging rule.
///
/// The display text is the client-facing validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestViolation {
    /// The requested page number was zero or negative.
    #[error("pageNumber should be >= 1")]
    PageNumberTooSmall,
    /// The requested page size was zero or negative.
    #[error("pageSize should be >= 1")]
    PageSizeTooSmall,
}

/// Every paging rule a request broke, in rule order.
///
/// Both rules are always evaluated, so a request with a bad page number and
/// a bad page size reports two violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequestError {
    violations: Vec<PageRequestViolation>,
}

impl PageRequestError {
    /// The broken rules, page number first.
    #[must_use]
    pub fn violations(&self) -> &[PageRequestViolation] {
        &self.violations
    }

    /// Client-facing message for each broken rule.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for PageRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for PageRequestError {}

/// A 1-based page number paired with a positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page_number: u64,
    page_size: u64,
}

impl PageRequest {
    /// Validate raw paging parameters as received from a client.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] listing every violated rule when either
    /// value is below one.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{PageRequest, PageRequestViolation};
    ///
    /// let error = PageRequest::try_new(0, 0).expect_err("both values are invalid");
    /// assert_eq!(
    ///     error.violations(),
    ///     &[
    ///         PageRequestViolation::PageNumberTooSmall,
    ///         PageRequestViolation::PageSizeTooSmall,
    ///     ]
    /// );
    /// ```
    pub fn try_new(page_number: i64, page_size: i64) -> Result<Self, PageRequestError> {
        let number = u64::try_from(page_number).ok().filter(|value| *value >= 1);
        let size = u64::try_from(page_size).ok().filter(|value| *value >= 1);

        match (number, size) {
            (Some(valid_number), Some(valid_size)) => Ok(Self {
                page_number: valid_number,
                page_size: valid_size,
            }),
            _ => {
                let mut violations = Vec::with_capacity(2);
                if number.is_none() {
                    violations.push(PageRequestViolation::PageNumberTooSmall);
                }
                if size.is_none() {
                    violations.push(PageRequestViolation::PageSizeTooSmall);
                }
                Err(PageRequestError { violations })
            }
        }
    }

    /// Validate optional parameters, substituting the defaults for absent
    /// values.
    ///
    /// # Errors
    ///
    /// Same as [`PageRequest::try_new`].
    pub fn from_optional(
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<Self, PageRequestError> {
        Self::try_new(
            page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page_number(&self) -> u64 {
        self.page_number
    }

    /// The maximum number of items on the page.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of items that precede this page in the ordered source.
    ///
    /// Saturates rather than overflowing for absurdly large page numbers; such
    /// pages are simply empty.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page_number.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE.unsigned_abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Validation rules for raw paging parameters.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1)]
    #[case(3, 10)]
    #[case(i64::MAX, i64::MAX)]
    fn accepts_positive_values(#[case] number: i64, #[case] size: i64) {
        let request = PageRequest::try_new(number, size).expect("valid request");
        assert_eq!(request.page_number(), number.unsigned_abs());
        assert_eq!(request.page_size(), size.unsigned_abs());
    }

    #[rstest]
    #[case(0, 10, &[PageRequestViolation::PageNumberTooSmall])]
    #[case(-4, 10, &[PageRequestViolation::PageNumberTooSmall])]
    #[case(1, 0, &[PageRequestViolation::PageSizeTooSmall])]
    #[case(1, -1, &[PageRequestViolation::PageSizeTooSmall])]
    #[case(
        0,
        0,
        &[
            PageRequestViolation::PageNumberTooSmall,
            PageRequestViolation::PageSizeTooSmall,
        ]
    )]
    fn reports_every_violation(
        #[case] number: i64,
        #[case] size: i64,
        #[case] expected: &[PageRequestViolation],
    ) {
        let error = PageRequest::try_new(number, size).expect_err("invalid request");
        assert_eq!(error.violations(), expected);
    }

    #[rstest]
    fn messages_use_client_parameter_names() {
        let error = PageRequest::try_new(0, 0).expect_err("invalid request");
        assert_eq!(
            error.messages(),
            vec![
                "pageNumber should be >= 1".to_owned(),
                "pageSize should be >= 1".to_owned(),
            ]
        );
        assert_eq!(
            error.to_string(),
            "pageNumber should be >= 1; pageSize should be >= 1"
        );
    }

    #[rstest]
    fn missing_values_fall_back_to_defaults() {
        let request = PageRequest::from_optional(None, None).expect("defaults are valid");
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), 100);
    }

    #[rstest]
    fn explicit_zero_is_not_replaced_by_default() {
        let error = PageRequest::from_optional(Some(0), None).expect_err("zero is invalid");
        assert_eq!(
            error.violations(),
            &[PageRequestViolation::PageNumberTooSmall]
        );
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(4, 25, 75)]
    fn offset_skips_previous_pages(#[case] number: i64, #[case] size: i64, #[case] offset: u64) {
        let request = PageRequest::try_new(number, size).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    fn offset_saturates_instead_of_overflowing() {
        let request = PageRequest::try_new(i64::MAX, i64::MAX).expect("valid request");
        assert_eq!(request.offset(), u64::MAX);
    }
}
