//! Legacy single-day stats endpoint consumed by the landing dashboard and
//! re-used by the live channel.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::dto::dashboard_dto::{DaySnapshot, SnapshotQuery};
use crate::error::Result;
use crate::services::report_service::ReportScope;
use crate::AppState;

pub(crate) async fn snapshot_for(state: &AppState, query: &SnapshotQuery) -> Result<DaySnapshot> {
    let recruiter = ReportScope::parse_recruiter(query.recruiter_id.as_deref())?;
    let (day, _) = ReportScope::parse_dates(query.date.as_deref(), None)?;
    let scope = ReportScope::new(day, day, recruiter, None);
    state.report_service.compute_day_snapshot(&scope).await
}

pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    Query(query): Query<SnapshotQuery>,
) -> Response {
    match snapshot_for(&state, &query).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "dashboard stats failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Server error" })),
            )
                .into_response()
        }
    }
}
