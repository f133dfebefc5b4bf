use crate::models::candidate::{
    Candidate, Client, ClientStatus, FinalStatus, HrStatus, InterviewType, SourceType,
};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Browser forms submit `""` for the optional funnel selects; treat that the
/// same as an absent field.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<JsonValue>::deserialize(deserializer)? {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) if s.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if mobile.len() == 10 && mobile.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    Err(ValidationError::new("mobile_must_be_10_digits"))
}

/// Full candidate form body, used for both create and update (the edit form
/// resubmits every field).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
    pub date_of_call: NaiveDate,
    pub interview_type: InterviewType,
    pub client: Client,
    pub source_type: SourceType,
    pub source: String,
    pub candidate_name: String,
    #[validate(custom(function = "validate_mobile"))]
    pub mobile: String,
    #[validate(email)]
    pub email: Option<String>,
    pub gender: String,
    #[validate(range(min = 15))]
    pub age: Option<i32>,
    pub location: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub company_name: Option<String>,
    pub position: String,
    pub department: Option<String>,
    pub hr_comments: Option<String>,
    pub hr_status: HrStatus,
    pub comments: Option<String>,
    pub client_interview_date: Option<NaiveDate>,
    pub interview_attended: Option<String>,
    pub not_attended_comments: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub client_status: Option<ClientStatus>,
    pub client_comments: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub final_status: Option<FinalStatus>,
    pub resume: Option<String>,
    pub resume_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCandidatesQuery {
    pub search_name: Option<String>,
    pub search_mobile: Option<String>,
    pub search_position: Option<String>,
    pub serial_ref_number: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateListResponse {
    pub candidates: Vec<Candidate>,
    pub total_count: i64,
    pub page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkExportRequest {
    pub ids: Vec<Uuid>,
}
