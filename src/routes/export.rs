use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::dto::candidate_dto::BulkExportRequest;
use crate::error::Result;
use crate::services::export_service::ExportService;
use crate::AppState;

/// Export the selected candidates as an XLSX attachment.
pub async fn export_candidates(
    State(state): State<AppState>,
    Json(payload): Json<BulkExportRequest>,
) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.find_by_ids(&payload.ids).await?;

    let mut user_ids: Vec<_> = candidates
        .iter()
        .flat_map(|c| [Some(c.created_by), c.updated_by])
        .flatten()
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();
    let username_map = state.user_service.usernames_for(&user_ids).await?;

    let buffer = ExportService::generate_candidates_xlsx(&candidates, &username_map)?;

    let filename = format!("candidates_{}.xlsx", chrono::Utc::now().format("%Y%m%d"));
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
