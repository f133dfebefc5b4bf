//! Dashboard aggregation engine.
//!
//! The three report views (org-wide, per-recruiter, self) and the live
//! channel all call into [`ReportService::compute_report`] /
//! [`ReportService::compute_day_snapshot`] with differently constructed
//! scopes; there is exactly one copy of the grouping logic.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::dto::dashboard_dto::{
    ClientCallsRow, ClientSelectedRow, DayRow, DaySnapshot, RecruiterCallsRow, RecruiterRef,
    Report,
};
use crate::error::{Error, Result};
use crate::models::candidate::{FinalStatus, HrStatus};
use crate::services::store::{CandidateStore, RecordFilter};

/// Dashboard lists silently stop at this many client rows.
const CLIENT_ROW_CAP: i64 = 50;

/// Who a report is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecruiterScope {
    /// Every record in range.
    All,
    /// The virtual bucket of admin-attributed records
    /// (`recruiterId=admin` on the wire).
    AdminBucket,
    /// One specific recruiter via `created_by`.
    Recruiter(Uuid),
}

/// Parameters of one report computation: an inclusive whole-day date range
/// plus optional recruiter and client constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportScope {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub recruiter: RecruiterScope,
    pub client: Option<String>,
}

impl ReportScope {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        recruiter: RecruiterScope,
        client: Option<String>,
    ) -> Self {
        Self {
            start,
            end,
            recruiter,
            client,
        }
    }

    /// Parse optional `YYYY-MM-DD` bounds; absent or empty values default to
    /// today. Malformed input is a bad scope, rejected before any query runs.
    pub fn parse_dates(
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<(NaiveDate, NaiveDate)> {
        let today = Utc::now().date_naive();
        let parse = |raw: Option<&str>| -> Result<NaiveDate> {
            match raw {
                None => Ok(today),
                Some(s) if s.is_empty() => Ok(today),
                Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| Error::BadScope(format!("Invalid date: {}", s))),
            }
        };
        Ok((parse(start)?, parse(end)?))
    }

    /// Parse the `recruiterId` query value. The `admin` sentinel selects the
    /// admin bucket; anything else must be a user id.
    pub fn parse_recruiter(raw: Option<&str>) -> Result<RecruiterScope> {
        match raw {
            None => Ok(RecruiterScope::All),
            Some("") => Ok(RecruiterScope::All),
            Some("admin") => Ok(RecruiterScope::AdminBucket),
            Some(id) => id
                .parse()
                .map(RecruiterScope::Recruiter)
                .map_err(|_| Error::BadScope(format!("Invalid recruiter id: {}", id))),
        }
    }

    /// Start of the first day, 00:00:00.000 UTC.
    pub fn range_from(&self) -> DateTime<Utc> {
        self.start.and_hms_opt(0, 0, 0).unwrap().and_utc()
    }

    /// End of the last day, 23:59:59.999 UTC.
    pub fn range_to(&self) -> DateTime<Utc> {
        self.end.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn CandidateStore>,
    admin_bucket: Uuid,
    timeout: Duration,
}

impl ReportService {
    pub fn new(store: Arc<dyn CandidateStore>, admin_bucket: Uuid, timeout: Duration) -> Self {
        Self {
            store,
            admin_bucket,
            timeout,
        }
    }

    fn base_filter(&self, scope: &ReportScope) -> RecordFilter {
        let created_by = match scope.recruiter {
            RecruiterScope::All => None,
            RecruiterScope::AdminBucket => Some(self.admin_bucket),
            RecruiterScope::Recruiter(id) => Some(id),
        };
        RecordFilter::new(scope.range_from(), scope.range_to())
            .with_created_by(created_by)
            .with_client(scope.client.clone())
    }

    /// Full report for a scope. Sub-queries run concurrently; any failure
    /// fails the whole computation, and the unit is bounded by the configured
    /// report timeout.
    pub async fn compute_report(&self, scope: &ReportScope) -> Result<Report> {
        let secs = self.timeout.as_secs();
        tokio::time::timeout(self.timeout, self.report_inner(scope))
            .await
            .map_err(|_| Error::Timeout(secs))?
    }

    async fn report_inner(&self, scope: &ReportScope) -> Result<Report> {
        let base = self.base_filter(scope);
        let selected = base.clone().with_hr_status(HrStatus::Select);
        let offers = base.clone().with_final_status(&FinalStatus::OFFER);
        let dropouts_filter = base.clone().with_final_status(&FinalStatus::DROPOUT);

        let (
            total_calls,
            client_calls,
            selected_count,
            client_selected,
            offers_made,
            dropouts,
            rollup,
            all_clients,
        ) = tokio::try_join!(
            self.store.count(&base),
            self.store.count_by_client(&base, Some(CLIENT_ROW_CAP)),
            self.store.count(&selected),
            self.store.count_by_client(&selected, Some(CLIENT_ROW_CAP)),
            self.store.count(&offers),
            self.store.count(&dropouts_filter),
            self.store.day_client_rollup(&base),
            self.store.distinct_clients(&base),
        )?;

        // Stage two of the byDay grouping: fold (day, client) rows into one
        // row per day carrying a client -> selected map.
        let mut days: BTreeMap<NaiveDate, DayRow> = BTreeMap::new();
        for row in rollup {
            let entry = days.entry(row.day).or_insert_with(|| DayRow {
                date: row.day.format("%Y-%m-%d").to_string(),
                calls: 0,
                selected: 0,
                clients: BTreeMap::new(),
            });
            entry.calls += row.calls;
            entry.selected += row.selected;
            entry.clients.insert(row.client, row.selected);
        }

        let conversion_rate = if total_calls > 0 {
            round2(offers_made as f64 / total_calls as f64 * 100.0)
        } else {
            0.0
        };

        Ok(Report {
            total_calls,
            client_calls: client_calls
                .into_iter()
                .map(|c| ClientCallsRow {
                    client: c.client,
                    calls: c.count,
                })
                .collect(),
            selected_count,
            client_selected: client_selected
                .into_iter()
                .map(|c| ClientSelectedRow {
                    client: c.client,
                    selected: c.count,
                })
                .collect(),
            offers_made,
            dropouts,
            conversion_rate,
            by_day: days.into_values().collect(),
            all_clients,
        })
    }

    /// Legacy single-day org view: totals plus per-recruiter and per-client
    /// call counts. Served by `/api/dashboard-stats` and the live channel.
    pub async fn compute_day_snapshot(&self, scope: &ReportScope) -> Result<DaySnapshot> {
        let secs = self.timeout.as_secs();
        tokio::time::timeout(self.timeout, self.snapshot_inner(scope))
            .await
            .map_err(|_| Error::Timeout(secs))?
    }

    async fn snapshot_inner(&self, scope: &ReportScope) -> Result<DaySnapshot> {
        let base = self.base_filter(scope);
        let selected = base.clone().with_hr_status(HrStatus::Select);

        let (total_calls, total_selected, recruiter_counts, client_calls) = tokio::try_join!(
            self.store.count(&base),
            self.store.count(&selected),
            self.store.count_by_recruiter(&base),
            self.store.count_by_client(&base, None),
        )?;

        Ok(DaySnapshot {
            total_calls,
            total_selected,
            recruiter_calls: recruiter_counts
                .into_iter()
                .map(|r| RecruiterCallsRow {
                    id: r.recruiter_id,
                    calls: r.calls,
                    recruiter: r.username.map(|username| RecruiterRef {
                        id: r.recruiter_id,
                        username,
                    }),
                })
                .collect(),
            client_calls: client_calls
                .into_iter()
                .map(|c| ClientCallsRow {
                    client: c.client,
                    calls: c.count,
                })
                .collect(),
        })
    }
}
