//! Translation of pool and Diesel failures into [`RepositoryError`].

use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map pool failures to connection errors.
pub(super) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map Diesel failures to connection or query errors.
pub(super) fn map_diesel_error(error: diesel::result::Error) -> RepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        DieselError::DeserializationError(err) => {
            RepositoryError::query(format!("stored value could not be read: {err}"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RepositoryError::query("duplicate value")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            RepositoryError::query("foreign key violation")
        }
        _ => RepositoryError::query("database error"),
    }
}

/// Build an `ILIKE` pattern matching `needle` anywhere, escaping wildcards.
pub(super) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(error, RepositoryError::Connection { .. }));
        assert!(error.to_string().contains("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let error = map_diesel_error(DieselError::NotFound);

        assert!(matches!(error, RepositoryError::Query { .. }));
        assert!(error.to_string().contains("record not found"));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        ));

        assert!(matches!(error, RepositoryError::Connection { .. }));
    }

    #[rstest]
    fn unique_violation_maps_to_query_error() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_owned()),
        ));

        assert!(matches!(error, RepositoryError::Query { .. }));
        assert!(error.to_string().contains("duplicate value"));
    }

    #[rstest]
    #[case("gym", "%gym%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\", "%c:\\\\%")]
    #[case("", "%%")]
    fn contains_pattern_escapes_wildcards(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(needle), expected);
    }
}
