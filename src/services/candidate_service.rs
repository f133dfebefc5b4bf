use crate::dto::candidate_dto::{CandidatePayload, ListCandidatesQuery};
use crate::models::candidate::{Candidate, CandidateRow};
use anyhow::Result;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const ITEMS_PER_PAGE: i64 = 15;

const CANDIDATE_COLUMNS: &str = "id, serial_ref_number, date_of_call, interview_type, client, \
     source_type, source, candidate_name, mobile, email, gender, age, location, qualification, \
     experience, company_name, position, department, hr_comments, hr_status, comments, \
     client_interview_date, interview_attended, not_attended_comments, client_status, \
     client_comments, final_status, resume, resume_path, created_by, updated_by, created_at, \
     updated_at";

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

pub struct CandidatePage {
    pub candidates: Vec<Candidate>,
    pub total_count: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new record owned by `created_by`. The serial reference number
    /// comes from the `candidate_serial` sequence inside the INSERT, so
    /// concurrent writers always get distinct, increasing values.
    pub async fn create_candidate(
        &self,
        payload: &CandidatePayload,
        created_by: Uuid,
    ) -> Result<Candidate> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            r#"
            INSERT INTO candidates (
                date_of_call, interview_type, client, source_type, source,
                candidate_name, mobile, email, gender, age, location,
                qualification, experience, company_name, position, department,
                hr_comments, hr_status, comments, client_interview_date,
                interview_attended, not_attended_comments, client_status,
                client_comments, final_status, resume, resume_path, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24,
                    $25, $26, $27, $28)
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(payload.date_of_call)
        .bind(payload.interview_type.as_str())
        .bind(payload.client.as_str())
        .bind(payload.source_type.as_str())
        .bind(&payload.source)
        .bind(&payload.candidate_name)
        .bind(&payload.mobile)
        .bind(&payload.email)
        .bind(&payload.gender)
        .bind(payload.age)
        .bind(&payload.location)
        .bind(&payload.qualification)
        .bind(&payload.experience)
        .bind(&payload.company_name)
        .bind(&payload.position)
        .bind(&payload.department)
        .bind(&payload.hr_comments)
        .bind(payload.hr_status.as_str())
        .bind(&payload.comments)
        .bind(payload.client_interview_date)
        .bind(&payload.interview_attended)
        .bind(&payload.not_attended_comments)
        .bind(payload.client_status.map(|s| s.as_str()))
        .bind(&payload.client_comments)
        .bind(payload.final_status.map(|s| s.as_str()))
        .bind(&payload.resume)
        .bind(&payload.resume_path)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Candidate::try_from).transpose()
    }

    /// Full-form update. The owner and serial number never change; the
    /// editing user is recorded as `updated_by`.
    pub async fn update_candidate(
        &self,
        id: Uuid,
        payload: &CandidatePayload,
        updated_by: Uuid,
    ) -> Result<Option<Candidate>> {
        let row = sqlx::query_as::<_, CandidateRow>(&format!(
            r#"
            UPDATE candidates SET
                date_of_call = $1, interview_type = $2, client = $3,
                source_type = $4, source = $5, candidate_name = $6,
                mobile = $7, email = $8, gender = $9, age = $10,
                location = $11, qualification = $12, experience = $13,
                company_name = $14, position = $15, department = $16,
                hr_comments = $17, hr_status = $18, comments = $19,
                client_interview_date = $20, interview_attended = $21,
                not_attended_comments = $22, client_status = $23,
                client_comments = $24, final_status = $25, resume = $26,
                resume_path = $27, updated_by = $28, updated_at = NOW()
            WHERE id = $29
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(payload.date_of_call)
        .bind(payload.interview_type.as_str())
        .bind(payload.client.as_str())
        .bind(payload.source_type.as_str())
        .bind(&payload.source)
        .bind(&payload.candidate_name)
        .bind(&payload.mobile)
        .bind(&payload.email)
        .bind(&payload.gender)
        .bind(payload.age)
        .bind(&payload.location)
        .bind(&payload.qualification)
        .bind(&payload.experience)
        .bind(&payload.company_name)
        .bind(&payload.position)
        .bind(&payload.department)
        .bind(&payload.hr_comments)
        .bind(payload.hr_status.as_str())
        .bind(&payload.comments)
        .bind(payload.client_interview_date)
        .bind(&payload.interview_attended)
        .bind(&payload.not_attended_comments)
        .bind(payload.client_status.map(|s| s.as_str()))
        .bind(&payload.client_comments)
        .bind(payload.final_status.map(|s| s.as_str()))
        .bind(&payload.resume)
        .bind(&payload.resume_path)
        .bind(updated_by)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Candidate::try_from).transpose()
    }

    /// Hard delete. Reports run afterwards simply no longer see the record.
    pub async fn delete_candidate(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Paged listing with the index-page search filters. When `owned_by` is
    /// set (recruiter callers), only that user's records are visible.
    pub async fn list_candidates(
        &self,
        query: &ListCandidatesQuery,
        owned_by: Option<Uuid>,
    ) -> Result<CandidatePage> {
        let page = query.page.unwrap_or(1).max(1);

        let push_search = |qb: &mut QueryBuilder<'_, Postgres>| {
            qb.push(" WHERE TRUE");
            if let Some(name) = &query.search_name {
                if !name.is_empty() {
                    qb.push(" AND candidate_name ILIKE ");
                    qb.push_bind(format!("%{}%", name.trim()));
                }
            }
            if let Some(mobile) = &query.search_mobile {
                if !mobile.is_empty() {
                    qb.push(" AND mobile ILIKE ");
                    qb.push_bind(format!("%{}%", mobile.trim()));
                }
            }
            if let Some(position) = &query.search_position {
                if !position.is_empty() {
                    qb.push(" AND position ILIKE ");
                    qb.push_bind(format!("%{}%", position.trim()));
                }
            }
            if let Some(serial) = query.serial_ref_number {
                qb.push(" AND serial_ref_number = ");
                qb.push_bind(serial);
            }
            if let Some(owner) = owned_by {
                qb.push(" AND created_by = ");
                qb.push_bind(owner);
            }
        };

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM candidates");
        push_search(&mut count_qb);
        let total_count: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::new(format!("SELECT {CANDIDATE_COLUMNS} FROM candidates"));
        push_search(&mut qb);
        qb.push(" ORDER BY date_of_call DESC, serial_ref_number DESC LIMIT ");
        qb.push_bind(ITEMS_PER_PAGE);
        qb.push(" OFFSET ");
        qb.push_bind((page - 1) * ITEMS_PER_PAGE);

        let rows: Vec<CandidateRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        let candidates = rows
            .into_iter()
            .map(Candidate::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(CandidatePage {
            candidates,
            total_count,
            page,
            total_pages: (total_count + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE,
        })
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Candidate>> {
        let rows = sqlx::query_as::<_, CandidateRow>(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Candidate::try_from).collect()
    }
}
