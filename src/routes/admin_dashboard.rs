use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json, Response},
};

use crate::dto::dashboard_dto::{AdminDataQuery, RangeQuery, Report, ReportEnvelope};
use crate::error::{Error, Result};
use crate::routes::report_failure;
use crate::services::report_service::{RecruiterScope, ReportScope};
use crate::AppState;

async fn org_report(state: &AppState, query: &AdminDataQuery) -> Result<Report> {
    let recruiter = ReportScope::parse_recruiter(query.recruiter_id.as_deref())?;
    let (start, end) =
        ReportScope::parse_dates(query.start_date.as_deref(), query.end_date.as_deref())?;
    let scope = ReportScope::new(start, end, recruiter, None);
    state.report_service.compute_report(&scope).await
}

/// Org-wide report, optionally narrowed to one recruiter or the admin
/// bucket via `recruiterId`.
pub async fn get_admin_data(
    State(state): State<AppState>,
    Query(query): Query<AdminDataQuery>,
) -> Response {
    match org_report(&state, &query).await {
        Ok(report) => Json(ReportEnvelope { ok: true, report }).into_response(),
        Err(err) => report_failure(err),
    }
}

async fn recruiter_report(state: &AppState, id: &str, query: &RangeQuery) -> Result<Report> {
    let recruiter_id = id
        .parse()
        .map_err(|_| Error::BadScope(format!("Invalid recruiter id: {}", id)))?;
    // 404 before querying so a dead link renders as not-found, not a
    // server error.
    state
        .user_service
        .find_recruiter(recruiter_id)
        .await?
        .ok_or_else(|| Error::NotFound("Recruiter not found".to_string()))?;

    let (start, end) =
        ReportScope::parse_dates(query.start_date.as_deref(), query.end_date.as_deref())?;
    let scope = ReportScope::new(
        start,
        end,
        RecruiterScope::Recruiter(recruiter_id),
        query.client.clone().filter(|c| !c.is_empty()),
    );
    state.report_service.compute_report(&scope).await
}

/// Single recruiter's performance data, admin view.
pub async fn get_recruiter_performance_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Response {
    match recruiter_report(&state, &id, &query).await {
        Ok(report) => Json(ReportEnvelope { ok: true, report }).into_response(),
        Err(err) => report_failure(err),
    }
}

/// Recruiter list for the dashboard filter dropdowns.
pub async fn list_recruiters(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let recruiters = state.user_service.list_recruiters().await?;
    Ok(Json(recruiters))
}
