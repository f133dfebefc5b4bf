pub mod admin_dashboard;
pub mod candidate_routes;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod live;
pub mod recruiter_dashboard;

use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::error::Error;

/// Failure envelope for the report endpoints: `{ok: false, message}`.
/// Internal detail stays in the log; callers get a generic message except
/// for scope problems they can fix themselves.
pub(crate) fn report_failure(err: Error) -> Response {
    tracing::error!(error = %err, "report computation failed");
    let message = match &err {
        Error::BadScope(msg) | Error::NotFound(msg) => msg.clone(),
        Error::Timeout(_) => "Report timed out".to_string(),
        _ => "Server error".to_string(),
    };
    (err.status_code(), Json(json!({ "ok": false, "message": message }))).into_response()
}
