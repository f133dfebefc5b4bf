//! Query surface the reporting engine needs from the candidate record store.
//!
//! The engine depends on the [`CandidateStore`] trait rather than a pool so
//! tests can substitute an in-memory store; [`PgCandidateStore`] is the
//! production implementation.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::candidate::{FinalStatus, HrStatus};

/// Record subset a report runs over: a closed `created_at` range plus
/// optional owner, client and funnel-status constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub client: Option<String>,
    pub hr_status: Option<HrStatus>,
    pub final_status: Option<Vec<FinalStatus>>,
}

impl RecordFilter {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from,
            to,
            created_by: None,
            client: None,
            hr_status: None,
            final_status: None,
        }
    }

    pub fn with_created_by(mut self, id: Option<Uuid>) -> Self {
        self.created_by = id;
        self
    }

    pub fn with_client(mut self, client: Option<String>) -> Self {
        self.client = client;
        self
    }

    pub fn with_hr_status(mut self, status: HrStatus) -> Self {
        self.hr_status = Some(status);
        self
    }

    pub fn with_final_status(mut self, statuses: &[FinalStatus]) -> Self {
        self.final_status = Some(statuses.to_vec());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ClientCount {
    pub client: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RecruiterCount {
    pub recruiter_id: Uuid,
    pub username: Option<String>,
    pub calls: i64,
}

/// Stage-one rollup row: one (UTC calendar day, client) group.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DayClientRow {
    pub day: NaiveDate,
    pub client: String,
    pub calls: i64,
    pub selected: i64,
}

#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Number of records matching the filter.
    async fn count(&self, filter: &RecordFilter) -> Result<i64>;

    /// Records grouped by client, sorted by count descending (ties broken by
    /// client name so repeated runs are identical), optionally capped.
    async fn count_by_client(
        &self,
        filter: &RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<ClientCount>>;

    /// Records grouped by owning recruiter, with the username joined in.
    async fn count_by_recruiter(&self, filter: &RecordFilter) -> Result<Vec<RecruiterCount>>;

    /// Stage-one grouping by (UTC day of `created_at`, client) with per-group
    /// call and selected counts, ordered by day then client.
    async fn day_client_rollup(&self, filter: &RecordFilter) -> Result<Vec<DayClientRow>>;

    /// Distinct client values present in the filtered subset, ascending.
    async fn distinct_clients(&self, filter: &RecordFilter) -> Result<Vec<String>>;
}

#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause for a filter. `col` prefixes column references
/// when the candidates table carries an alias (joins).
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &RecordFilter, col: &str) {
    qb.push(format!(" WHERE {col}created_at >= "));
    qb.push_bind(filter.from);
    qb.push(format!(" AND {col}created_at <= "));
    qb.push_bind(filter.to);
    if let Some(id) = filter.created_by {
        qb.push(format!(" AND {col}created_by = "));
        qb.push_bind(id);
    }
    if let Some(client) = &filter.client {
        qb.push(format!(" AND {col}client = "));
        qb.push_bind(client.clone());
    }
    if let Some(status) = filter.hr_status {
        qb.push(format!(" AND {col}hr_status = "));
        qb.push_bind(status.as_str());
    }
    if let Some(statuses) = &filter.final_status {
        qb.push(format!(" AND {col}final_status IN ("));
        let mut separated = qb.separated(", ");
        for status in statuses {
            separated.push_bind(status.as_str());
        }
        qb.push(")");
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn count(&self, filter: &RecordFilter) -> Result<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM candidates");
        push_filter(&mut qb, filter, "");
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn count_by_client(
        &self,
        filter: &RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<ClientCount>> {
        let mut qb = QueryBuilder::new("SELECT client, COUNT(*) AS count FROM candidates");
        push_filter(&mut qb, filter, "");
        qb.push(" GROUP BY client ORDER BY count DESC, client ASC");
        if let Some(limit) = limit {
            qb.push(" LIMIT ");
            qb.push_bind(limit);
        }
        let rows = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn count_by_recruiter(&self, filter: &RecordFilter) -> Result<Vec<RecruiterCount>> {
        let mut qb = QueryBuilder::new(
            "SELECT c.created_by AS recruiter_id, u.username, COUNT(*) AS calls \
             FROM candidates c LEFT JOIN users u ON u.id = c.created_by",
        );
        push_filter(&mut qb, filter, "c.");
        qb.push(" GROUP BY c.created_by, u.username ORDER BY calls DESC, recruiter_id ASC");
        let rows = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn day_client_rollup(&self, filter: &RecordFilter) -> Result<Vec<DayClientRow>> {
        let mut qb = QueryBuilder::new(
            "SELECT (created_at AT TIME ZONE 'UTC')::date AS day, client, \
             COUNT(*) AS calls, \
             COUNT(*) FILTER (WHERE hr_status = ",
        );
        qb.push_bind(HrStatus::Select.as_str());
        qb.push(") AS selected FROM candidates");
        push_filter(&mut qb, filter, "");
        qb.push(" GROUP BY day, client ORDER BY day ASC, client ASC");
        let rows = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn distinct_clients(&self, filter: &RecordFilter) -> Result<Vec<String>> {
        let mut qb = QueryBuilder::new("SELECT DISTINCT client FROM candidates");
        push_filter(&mut qb, filter, "");
        qb.push(" ORDER BY client ASC");
        let clients = qb.build_query_scalar().fetch_all(&self.pool).await?;
        Ok(clients)
    }
}
