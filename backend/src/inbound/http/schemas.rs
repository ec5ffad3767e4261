//! OpenAPI schema definitions for domain and pagination types.
//!
//! Domain types and `PaginatedList` stay free of utoipa derives; the wrappers
//! here mirror their serialized shape so the document can describe them.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation or breaks a business rule.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Storage is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Brand with id = 7 does not exist")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details: `errors` for validation, `code` for rule breaks.
    details: Option<serde_json::Value>,
}

/// Declare the schema of one page of `$item` views.
macro_rules! page_schema {
    ($name:ident, $item:ty) => {
        #[doc = concat!("One page of `", stringify!($item), "` values.")]
        #[derive(utoipa::ToSchema)]
        #[schema(rename_all = "camelCase")]
        #[expect(
            dead_code,
            reason = "Used only for OpenAPI schema generation via utoipa"
        )]
        pub struct $name {
            /// Items on this page, in identity order.
            items: Vec<$item>,
            /// 1-based page number.
            page_index: u64,
            /// Requested page size.
            page_size: u64,
            /// Matching items across all pages.
            total_count: u64,
            /// Number of pages.
            total_pages: u64,
            /// Whether a previous page exists.
            has_previous_page: bool,
            /// Whether a later page exists.
            has_next_page: bool,
        }
    };
}
pub(crate) use page_schema;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    page_schema!(NumberPage, u32);

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        for code in [
            "invalid_request",
            "not_found",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"), "schema should use traceId");
        assert!(schema_json.contains("details"));
    }

    #[test]
    fn page_schema_describes_navigation_flags() {
        let schema_json = schema_to_json::<NumberPage>();
        for field in ["items", "pageIndex", "totalPages", "hasPreviousPage", "hasNextPage"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
