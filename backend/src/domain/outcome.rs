//! Success/failure carrier for expected business outcomes.
//!
//! Storage adapters return [`Outcome`] from every mutating operation so that
//! expected failures (a missing parent record, a duplicate e-mail address, a
//! delete blocked by dependent records) travel as values with a
//! client-facing message. Unexpected failures use the port's error type
//! instead.

use std::fmt;

/// Separator placed between the reasons of two combined failures.
pub const COMBINED_FAILURE_SEPARATOR: &str = "\nand\n";

/// Returned when a failure is constructed without a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("failure reasons must not be empty")]
pub struct EmptyFailureReason;

/// Non-empty, client-facing explanation of why an operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FailureReason(String);

impl FailureReason {
    /// Validate and wrap a reason.
    pub fn try_new(message: impl Into<String>) -> Result<Self, EmptyFailureReason> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(EmptyFailureReason);
        }
        Ok(Self(message))
    }

    /// The reason text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn joined(self, other: Self) -> Self {
        Self(format!("{}{COMBINED_FAILURE_SEPARATOR}{}", self.0, other.0))
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<FailureReason> for String {
    fn from(value: FailureReason) -> Self {
        value.0
    }
}

/// Result of an operation whose failures are part of normal business flow.
///
/// `Outcome` without a type argument is the data-less form.
///
/// # Examples
/// ```
/// use subscriptions::domain::Outcome;
///
/// let name: Outcome = Outcome::fail("Name should not be empty");
/// let term: Outcome = Outcome::fail("Term allowed values annually or monthly");
///
/// let combined = name.and(term);
/// assert!(!combined.is_success());
/// assert_eq!(
///     combined.message(),
///     Some("Name should not be empty\nand\nTerm allowed values annually or monthly")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T = ()> {
    /// The operation succeeded and produced `T`.
    Success(T),
    /// The operation was refused for the given reason.
    Failure(FailureReason),
}

impl Outcome<()> {
    /// A data-less success.
    pub const fn ok() -> Self {
        Self::Success(())
    }

    /// Data-less success when `condition` holds, otherwise a failure with
    /// the message produced by `message`.
    ///
    /// # Panics
    ///
    /// Panics when `condition` is false and `message` yields an empty string.
    pub fn ensure(condition: bool, message: impl FnOnce() -> String) -> Self {
        if condition {
            Self::ok()
        } else {
            Self::fail(message())
        }
    }
}

impl<T> Outcome<T> {
    /// A success carrying `data`.
    pub const fn success(data: T) -> Self {
        Self::Success(data)
    }

    /// A failure with a client-facing message.
    ///
    /// # Panics
    ///
    /// Panics when `message` is empty once trimmed; use
    /// [`Outcome::try_fail`] for messages that are not known to be
    /// non-empty.
    pub fn fail(message: impl Into<String>) -> Self {
        match Self::try_fail(message) {
            Ok(outcome) => outcome,
            Err(err) => panic!("outcome failures must carry a reason: {err}"),
        }
    }

    /// A failure with a client-facing message, rejecting empty messages.
    pub fn try_fail(message: impl Into<String>) -> Result<Self, EmptyFailureReason> {
        FailureReason::try_new(message).map(Self::Failure)
    }

    /// Whether the operation succeeded.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The failure message; `None` for successes.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason.as_str()),
        }
    }

    /// The produced data; `None` for failures.
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Consume the outcome, returning the produced data if any.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// The produced data, or `default` for failures.
    pub fn unwrap_or(self, default: T) -> T {
        self.into_data().unwrap_or(default)
    }

    /// Transform the success data, keeping failures unchanged.
    pub fn map<U, F>(self, convert: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(data) => Outcome::Success(convert(data)),
            Self::Failure(reason) => Outcome::Failure(reason),
        }
    }

    /// Fallibly transform the success data.
    ///
    /// An error from `convert` is an unexpected failure and is returned as
    /// such rather than folded into the outcome.
    pub fn try_map<U, E, F>(self, convert: F) -> Result<Outcome<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        match self {
            Self::Success(data) => convert(data).map(Outcome::Success),
            Self::Failure(reason) => Ok(Outcome::Failure(reason)),
        }
    }

    /// Continue with `next` after a success, keeping failures unchanged.
    pub fn and_then<U, F>(self, next: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self {
            Self::Success(data) => next(data),
            Self::Failure(reason) => Outcome::Failure(reason),
        }
    }

    /// Combine two outcomes into a data-less one.
    ///
    /// - both succeed: success;
    /// - both fail: one failure with both reasons joined by
    ///   [`COMBINED_FAILURE_SEPARATOR`], `self` first;
    /// - exactly one fails: that failure unchanged.
    pub fn and<U>(self, other: Outcome<U>) -> Outcome<()> {
        match (self, other) {
            (Self::Success(_), Outcome::Success(_)) => Outcome::ok(),
            (Self::Failure(first), Outcome::Failure(second)) => {
                Outcome::Failure(first.joined(second))
            }
            (Self::Failure(reason), Outcome::Success(_))
            | (Self::Success(_), Outcome::Failure(reason)) => Outcome::Failure(reason),
        }
    }

    /// Convert into a standard `Result`.
    pub fn into_result(self) -> Result<T, FailureReason> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(reason) => Err(reason),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, FailureReason> {
    fn from(value: Outcome<T>) -> Self {
        value.into_result()
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for outcome construction and combination.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn ok_is_success_without_message() {
        let outcome = Outcome::ok();
        assert!(outcome.is_success());
        assert!(outcome.message().is_none());
    }

    #[rstest]
    fn success_carries_data() {
        let outcome = Outcome::success(42);
        assert_eq!(outcome.data(), Some(&42));
        assert!(outcome.message().is_none());
    }

    #[rstest]
    fn fail_carries_message_and_no_data() {
        let outcome = Outcome::<i32>::fail("Brand with id = 9 does not exist");
        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), Some("Brand with id = 9 does not exist"));
        assert!(outcome.data().is_none());
    }

    #[rstest]
    #[case("")]
    #[case(" \n ")]
    fn try_fail_rejects_empty_messages(#[case] message: &str) {
        assert_eq!(Outcome::<()>::try_fail(message), Err(EmptyFailureReason));
    }

    #[rstest]
    #[should_panic(expected = "outcome failures must carry a reason")]
    fn fail_panics_on_empty_message() {
        let _outcome = Outcome::<()>::fail("");
    }

    #[rstest]
    fn unwrap_or_falls_back_for_failures() {
        assert_eq!(Outcome::success(3).unwrap_or(0), 3);
        assert_eq!(Outcome::fail("nope").unwrap_or(0), 0);
    }

    #[rstest]
    fn and_of_two_successes_succeeds() {
        assert_eq!(Outcome::success(1).and(Outcome::success("x")), Outcome::ok());
    }

    #[rstest]
    fn and_keeps_the_single_failure_unchanged() {
        let failing = Outcome::<()>::fail("a");
        assert_eq!(failing.clone().and(Outcome::ok()), failing);
        assert_eq!(Outcome::ok().and(failing.clone()), failing);
    }

    #[rstest]
    fn and_joins_two_failures_in_argument_order() {
        let combined = Outcome::<()>::fail("a").and(Outcome::<()>::fail("b"));
        assert_eq!(combined.message(), Some("a\nand\nb"));

        let reversed = Outcome::<()>::fail("b").and(Outcome::<()>::fail("a"));
        assert_eq!(reversed.message(), Some("b\nand\na"));
    }

    #[rstest]
    fn chained_and_is_associative_in_wording() {
        let a = || Outcome::<()>::fail("a");
        let b = || Outcome::<()>::fail("b");
        let c = || Outcome::<()>::fail("c");

        let left = a().and(b()).and(c());
        let right = a().and(b().and(c()));

        assert_eq!(left.message(), Some("a\nand\nb\nand\nc"));
        assert_eq!(left, right);
    }

    #[rstest]
    fn chained_and_skips_successes_between_failures() {
        let combined = Outcome::<()>::fail("a")
            .and(Outcome::ok())
            .and(Outcome::<()>::fail("c"));
        assert_eq!(combined.message(), Some("a\nand\nc"));
    }

    #[rstest]
    fn ensure_builds_message_only_on_failure() {
        assert!(Outcome::ensure(true, || unreachable_message()).is_success());
        assert_eq!(
            Outcome::ensure(false, || "Name should not be empty".to_owned()).message(),
            Some("Name should not be empty")
        );
    }

    fn unreachable_message() -> String {
        panic!("message must not be built for a satisfied condition")
    }

    #[rstest]
    fn try_map_separates_conversion_errors() {
        let converted: Result<Outcome<i64>, &str> =
            Outcome::success("7").try_map(|raw| raw.parse::<i64>().map_err(|_| "bad number"));
        assert_eq!(converted, Ok(Outcome::success(7)));

        let broken: Result<Outcome<i64>, &str> =
            Outcome::success("x").try_map(|raw| raw.parse::<i64>().map_err(|_| "bad number"));
        assert_eq!(broken, Err("bad number"));

        let refused: Result<Outcome<i64>, &str> =
            Outcome::<&str>::fail("refused").try_map(|_| Err("never called"));
        assert_eq!(refused, Ok(Outcome::fail("refused")));
    }

    #[rstest]
    fn into_result_exposes_reason() {
        let result = Outcome::<()>::fail("blocked").into_result();
        assert_eq!(result.map_err(String::from), Err("blocked".to_owned()));
    }
}
