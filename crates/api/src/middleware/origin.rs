//! Origin guard.
//!
//! Requests without an `Origin` header (server-to-server calls, curl,
//! Postman) always pass. Requests declaring an origin pass only when the
//! configured [`CorsPolicy`](crate::config::CorsPolicy) allows it; all
//! others are answered with 403 before any route runs.

use axum::extract::{Request, State};
use axum::http::header::ORIGIN;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::state::AppState;

pub async fn origin_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(origin) = request.headers().get(ORIGIN) {
        let allowed = origin
            .to_str()
            .map(|origin| state.config.cors.allows(origin))
            .unwrap_or(false);
        if !allowed {
            tracing::warn!(?origin, "Rejected request from disallowed origin");
            return Err(AppError::OriginNotAllowed);
        }
    }
    Ok(next.run(request).await)
}
