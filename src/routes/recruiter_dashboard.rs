use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
    Extension,
};

use crate::dto::dashboard_dto::{RangeQuery, Report, ReportEnvelope};
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::routes::report_failure;
use crate::services::report_service::{RecruiterScope, ReportScope};
use crate::AppState;

async fn self_report(state: &AppState, claims: &Claims, query: &RangeQuery) -> Result<Report> {
    let caller = claims.user_id()?;
    let (start, end) =
        ReportScope::parse_dates(query.start_date.as_deref(), query.end_date.as_deref())?;
    let scope = ReportScope::new(
        start,
        end,
        RecruiterScope::Recruiter(caller),
        query.client.clone().filter(|c| !c.is_empty()),
    );
    state.report_service.compute_report(&scope).await
}

/// Self-service performance view: always scoped to the caller's own
/// records, whatever the query says.
pub async fn get_self_dashboard_data(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<RangeQuery>,
) -> Response {
    match self_report(&state, &claims, &query).await {
        Ok(report) => Json(ReportEnvelope { ok: true, report }).into_response(),
        Err(err) => report_failure(err),
    }
}
