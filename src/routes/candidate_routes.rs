use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::candidate_dto::{CandidateListResponse, CandidatePayload, ListCandidatesQuery};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::AppState;

/// Recruiters only ever see their own records; admins see everything.
fn ownership_scope(claims: &Claims) -> Result<Option<Uuid>> {
    if claims.is_recruiter() {
        Ok(Some(claims.user_id()?))
    } else {
        Ok(None)
    }
}

pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListCandidatesQuery>,
) -> Result<impl IntoResponse> {
    let page = state
        .candidate_service
        .list_candidates(&query, ownership_scope(&claims)?)
        .await?;

    Ok(Json(CandidateListResponse {
        candidates: page.candidates,
        total_count: page.total_count,
        page: page.page,
        total_pages: page.total_pages,
    }))
}

pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let created_by = claims.user_id()?;
    let candidate = state
        .candidate_service
        .create_candidate(&payload, created_by)
        .await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidate_service
        .get_candidate(id)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

    if let Some(owner) = ownership_scope(&claims)? {
        if candidate.created_by != owner {
            return Err(Error::Forbidden("Not authorized".to_string()));
        }
    }

    Ok(Json(candidate))
}

pub async fn update_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let existing = state
        .candidate_service
        .get_candidate(id)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    if let Some(owner) = ownership_scope(&claims)? {
        if existing.created_by != owner {
            return Err(Error::Forbidden("Not authorized".to_string()));
        }
    }

    let updated_by = claims.user_id()?;
    let candidate = state
        .candidate_service
        .update_candidate(id, &payload, updated_by)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
    Ok(Json(candidate))
}

pub async fn delete_candidate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    if let Some(owner) = ownership_scope(&claims)? {
        let existing = state
            .candidate_service
            .get_candidate(id)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;
        if existing.created_by != owner {
            return Err(Error::Forbidden("Not authorized".to_string()));
        }
    }

    let deleted = state.candidate_service.delete_candidate(id).await?;
    if !deleted {
        return Err(Error::NotFound("Candidate not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}
