use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gadget_core::error::CoreError;
use gadget_db::StoreError;
use serde_json::json;

/// Message returned when the origin guard rejects a request.
pub const ORIGIN_REJECTED_MESSAGE: &str =
    "The CORS policy for this site does not allow access from the specified Origin.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent `{ "message", "code" }` JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `gadget_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store failure, with the route-level message shown to the client.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request declared an origin outside the allow-list.
    #[error("Origin not allowed")]
    OriginNotAllowed,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Attach a route-level message to a store result.
///
/// An unreachable store becomes [`CoreError::Unavailable`] carrying the
/// route message; every other failure stays an [`AppError::Store`].
pub trait StoreContext<T> {
    fn context(self, context: &'static str) -> AppResult<T>;
}

impl<T> StoreContext<T> for Result<T, StoreError> {
    fn context(self, context: &'static str) -> AppResult<T> {
        self.map_err(|source| {
            if source.is_unavailable() {
                tracing::error!(error = %source, context, "Record store unavailable");
                AppError::Core(CoreError::Unavailable(context.to_string()))
            } else {
                AppError::Store { context, source }
            }
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone())
                }
                CoreError::Unavailable(msg) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store { context, source } => classify_store_error(context, source),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::OriginNotAllowed => (
                StatusCode::FORBIDDEN,
                "ORIGIN_NOT_ALLOWED",
                ORIGIN_REJECTED_MESSAGE.to_string(),
            ),
        };

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Check constraint violations (`23514`) map to 400.
/// - Everything else maps to 500.
///
/// The client always sees the route's `context` message, never driver text.
fn classify_store_error(
    context: &'static str,
    err: &StoreError,
) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::Query(sqlx::Error::RowNotFound) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", context.to_string())
        }
        StoreError::Query(sqlx::Error::Database(db_err))
            if db_err.code().as_deref() == Some("23514") =>
        {
            (StatusCode::BAD_REQUEST, "INVALID_INPUT", context.to_string())
        }
        other => {
            tracing::error!(error = %other, context, "Record store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                context.to_string(),
            )
        }
    }
}
