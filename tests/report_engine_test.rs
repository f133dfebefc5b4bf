//! Reporting engine behavior against an in-memory candidate store. The
//! engine only sees the `CandidateStore` trait, so these tests exercise the
//! whole aggregation path without a database.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use hrms_backend::models::candidate::{FinalStatus, HrStatus};
use hrms_backend::services::report_service::{RecruiterScope, ReportScope, ReportService};
use hrms_backend::services::store::{
    CandidateStore, ClientCount, DayClientRow, RecordFilter, RecruiterCount,
};

#[derive(Debug, Clone)]
struct Rec {
    created_at: DateTime<Utc>,
    created_by: Uuid,
    username: &'static str,
    client: String,
    hr_status: HrStatus,
    final_status: Option<FinalStatus>,
}

struct MemoryStore {
    records: Vec<Rec>,
}

impl MemoryStore {
    fn matching<'a>(&'a self, filter: &'a RecordFilter) -> impl Iterator<Item = &'a Rec> + 'a {
        self.records.iter().filter(move |r| {
            r.created_at >= filter.from
                && r.created_at <= filter.to
                && filter.created_by.map_or(true, |id| r.created_by == id)
                && filter.client.as_deref().map_or(true, |c| r.client == c)
                && filter.hr_status.map_or(true, |s| r.hr_status == s)
                && filter.final_status.as_ref().map_or(true, |wanted| {
                    r.final_status.map_or(false, |fs| wanted.contains(&fs))
                })
        })
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn count(&self, filter: &RecordFilter) -> Result<i64> {
        Ok(self.matching(filter).count() as i64)
    }

    async fn count_by_client(
        &self,
        filter: &RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<ClientCount>> {
        let mut counts = std::collections::BTreeMap::<String, i64>::new();
        for r in self.matching(filter) {
            *counts.entry(r.client.clone()).or_default() += 1;
        }
        let mut rows: Vec<ClientCount> = counts
            .into_iter()
            .map(|(client, count)| ClientCount { client, count })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.client.cmp(&b.client)));
        if let Some(limit) = limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn count_by_recruiter(&self, filter: &RecordFilter) -> Result<Vec<RecruiterCount>> {
        let mut counts = std::collections::BTreeMap::<Uuid, (Option<String>, i64)>::new();
        for r in self.matching(filter) {
            let entry = counts
                .entry(r.created_by)
                .or_insert((Some(r.username.to_string()), 0));
            entry.1 += 1;
        }
        let mut rows: Vec<RecruiterCount> = counts
            .into_iter()
            .map(|(recruiter_id, (username, calls))| RecruiterCount {
                recruiter_id,
                username,
                calls,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.calls
                .cmp(&a.calls)
                .then(a.recruiter_id.cmp(&b.recruiter_id))
        });
        Ok(rows)
    }

    async fn day_client_rollup(&self, filter: &RecordFilter) -> Result<Vec<DayClientRow>> {
        let mut groups = std::collections::BTreeMap::<(NaiveDate, String), (i64, i64)>::new();
        for r in self.matching(filter) {
            let key = (r.created_at.date_naive(), r.client.clone());
            let entry = groups.entry(key).or_default();
            entry.0 += 1;
            if r.hr_status == HrStatus::Select {
                entry.1 += 1;
            }
        }
        Ok(groups
            .into_iter()
            .map(|((day, client), (calls, selected))| DayClientRow {
                day,
                client,
                calls,
                selected,
            })
            .collect())
    }

    async fn distinct_clients(&self, filter: &RecordFilter) -> Result<Vec<String>> {
        let mut clients: Vec<String> = self.matching(filter).map(|r| r.client.clone()).collect();
        clients.sort();
        clients.dedup();
        Ok(clients)
    }
}

const ADMIN_BUCKET: Uuid = Uuid::from_u128(0xA0A0_A0A0_A0A0_A0A0_A0A0_A0A0_A0A0_A0A0);

fn service(records: Vec<Rec>) -> ReportService {
    ReportService::new(
        Arc::new(MemoryStore { records }),
        ADMIN_BUCKET,
        Duration::from_secs(5),
    )
}

fn at(date: &str, hour: u32) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
        .and_utc()
}

fn rec(
    date: &str,
    hour: u32,
    created_by: Uuid,
    client: &str,
    hr_status: HrStatus,
    final_status: Option<FinalStatus>,
) -> Rec {
    Rec {
        created_at: at(date, hour),
        created_by,
        username: "recruiter",
        client: client.to_string(),
        hr_status,
        final_status,
    }
}

fn scope(start: &str, end: &str) -> ReportScope {
    ReportScope::new(
        NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
        NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
        RecruiterScope::All,
        None,
    )
}

#[tokio::test]
async fn empty_scope_has_zero_conversion_rate() {
    let svc = service(vec![]);
    let report = svc.compute_report(&scope("2024-01-01", "2024-01-07")).await.unwrap();

    assert_eq!(report.total_calls, 0);
    assert_eq!(report.conversion_rate, 0.0);
    assert!(report.by_day.is_empty());
    assert!(report.all_clients.is_empty());
}

#[tokio::test]
async fn concrete_two_day_scenario() {
    let r1 = Uuid::new_v4();
    let svc = service(vec![
        rec("2024-01-01", 9, r1, "Wonderla", HrStatus::Select, None),
        rec("2024-01-01", 11, r1, "Wonderla", HrStatus::Reject, None),
        rec("2024-01-02", 10, r1, "Suzen", HrStatus::Select, None),
    ]);
    let report = svc.compute_report(&scope("2024-01-01", "2024-01-02")).await.unwrap();

    assert_eq!(report.total_calls, 3);
    assert_eq!(report.selected_count, 2);
    assert_eq!(report.client_calls.len(), 2);
    assert_eq!(report.client_calls[0].client, "Wonderla");
    assert_eq!(report.client_calls[0].calls, 2);
    assert_eq!(report.client_calls[1].client, "Suzen");
    assert_eq!(report.client_calls[1].calls, 1);

    assert_eq!(report.by_day.len(), 2);
    let day1 = &report.by_day[0];
    assert_eq!(day1.date, "2024-01-01");
    assert_eq!(day1.calls, 2);
    assert_eq!(day1.selected, 1);
    assert_eq!(day1.clients.get("Wonderla"), Some(&1));
    let day2 = &report.by_day[1];
    assert_eq!(day2.date, "2024-01-02");
    assert_eq!(day2.calls, 1);
    assert_eq!(day2.selected, 1);
    assert_eq!(day2.clients.get("Suzen"), Some(&1));

    assert_eq!(report.all_clients, vec!["Suzen", "Wonderla"]);
}

#[tokio::test]
async fn by_day_calls_sum_to_total_and_selected_never_exceeds_total() {
    let r1 = Uuid::new_v4();
    let r2 = Uuid::new_v4();
    let svc = service(vec![
        rec("2024-02-01", 9, r1, "Wonderla", HrStatus::Select, None),
        rec("2024-02-01", 10, r2, "Pride", HrStatus::Hold, None),
        rec("2024-02-02", 9, r1, "Pride", HrStatus::Select, Some(FinalStatus::Offered)),
        rec("2024-02-03", 9, r2, "Chakde", HrStatus::Reject, None),
        rec("2024-02-03", 15, r1, "Chakde", HrStatus::Review, None),
    ]);
    let report = svc.compute_report(&scope("2024-02-01", "2024-02-05")).await.unwrap();

    let day_sum: i64 = report.by_day.iter().map(|d| d.calls).sum();
    assert_eq!(day_sum, report.total_calls);
    assert!(report.selected_count <= report.total_calls);
}

#[tokio::test]
async fn offers_and_dropouts_count_final_statuses() {
    let r1 = Uuid::new_v4();
    let svc = service(vec![
        rec("2024-03-01", 9, r1, "Suzen", HrStatus::Select, Some(FinalStatus::OfferInProgress)),
        rec("2024-03-01", 10, r1, "Suzen", HrStatus::Select, Some(FinalStatus::Offered)),
        rec("2024-03-01", 11, r1, "Suzen", HrStatus::Select, Some(FinalStatus::Joined)),
        rec("2024-03-01", 12, r1, "Suzen", HrStatus::Select, Some(FinalStatus::OfferDropout)),
        rec("2024-03-01", 13, r1, "Suzen", HrStatus::Reject, None),
        rec("2024-03-01", 14, r1, "Suzen", HrStatus::Select, Some(FinalStatus::ShortlistDropout)),
    ]);
    let report = svc.compute_report(&scope("2024-03-01", "2024-03-01")).await.unwrap();

    assert_eq!(report.total_calls, 6);
    assert_eq!(report.offers_made, 2);
    assert_eq!(report.dropouts, 2);
    // 2 offers / 6 calls
    assert_eq!(report.conversion_rate, 33.33);
}

#[tokio::test]
async fn client_lists_are_sorted_desc_and_capped_at_fifty() {
    let r1 = Uuid::new_v4();
    let mut records = Vec::new();
    // 60 distinct clients; client-00 gets the most calls, descending from there.
    for i in 0..60 {
        for _ in 0..(60 - i) {
            records.push(rec(
                "2024-04-01",
                9,
                r1,
                &format!("client-{:02}", i),
                HrStatus::Select,
                None,
            ));
        }
    }
    let svc = service(records);
    let report = svc.compute_report(&scope("2024-04-01", "2024-04-01")).await.unwrap();

    assert_eq!(report.client_calls.len(), 50);
    assert_eq!(report.client_selected.len(), 50);
    for pair in report.client_calls.windows(2) {
        assert!(pair[0].calls >= pair[1].calls);
    }
    for pair in report.client_selected.windows(2) {
        assert!(pair[0].selected >= pair[1].selected);
    }
    // allClients is not capped.
    assert_eq!(report.all_clients.len(), 60);
}

#[tokio::test]
async fn recruiter_scope_excludes_other_owners() {
    let mine = Uuid::new_v4();
    let other = Uuid::new_v4();
    let svc = service(vec![
        rec("2024-05-01", 9, mine, "Wonderla", HrStatus::Select, None),
        rec("2024-05-01", 10, other, "Wonderla", HrStatus::Select, None),
        rec("2024-05-01", 11, other, "Suzen", HrStatus::Reject, None),
    ]);

    let mut s = scope("2024-05-01", "2024-05-01");
    s.recruiter = RecruiterScope::Recruiter(mine);
    let report = svc.compute_report(&s).await.unwrap();

    assert_eq!(report.total_calls, 1);
    assert_eq!(report.all_clients, vec!["Wonderla"]);
}

#[tokio::test]
async fn admin_bucket_scope_selects_the_configured_owner() {
    let other = Uuid::new_v4();
    let svc = service(vec![
        rec("2024-05-02", 9, ADMIN_BUCKET, "Pride", HrStatus::Select, None),
        rec("2024-05-02", 10, other, "Pride", HrStatus::Select, None),
    ]);

    let mut s = scope("2024-05-02", "2024-05-02");
    s.recruiter = RecruiterScope::AdminBucket;
    let report = svc.compute_report(&s).await.unwrap();
    assert_eq!(report.total_calls, 1);
}

#[tokio::test]
async fn client_filter_narrows_the_scope() {
    let r1 = Uuid::new_v4();
    let svc = service(vec![
        rec("2024-05-03", 9, r1, "Wonderla", HrStatus::Select, None),
        rec("2024-05-03", 10, r1, "Suzen", HrStatus::Select, None),
    ]);

    let mut s = scope("2024-05-03", "2024-05-03");
    s.client = Some("Suzen".to_string());
    let report = svc.compute_report(&s).await.unwrap();
    assert_eq!(report.total_calls, 1);
    assert_eq!(report.all_clients, vec!["Suzen"]);
}

#[tokio::test]
async fn records_outside_the_date_range_are_ignored() {
    let r1 = Uuid::new_v4();
    let svc = service(vec![
        rec("2024-06-01", 0, r1, "Wonderla", HrStatus::Select, None),
        rec("2024-06-02", 23, r1, "Wonderla", HrStatus::Select, None),
        rec("2024-06-03", 0, r1, "Wonderla", HrStatus::Select, None),
    ]);
    let report = svc.compute_report(&scope("2024-06-01", "2024-06-02")).await.unwrap();
    assert_eq!(report.total_calls, 2);
}

#[tokio::test]
async fn identical_scope_yields_identical_reports() {
    let r1 = Uuid::new_v4();
    let svc = service(vec![
        rec("2024-07-01", 9, r1, "Wonderla", HrStatus::Select, Some(FinalStatus::Offered)),
        rec("2024-07-01", 10, r1, "Suzen", HrStatus::Reject, None),
        rec("2024-07-02", 9, r1, "Suzen", HrStatus::Select, None),
    ]);
    let s = scope("2024-07-01", "2024-07-02");

    let first = svc.compute_report(&s).await.unwrap();
    let second = svc.compute_report(&s).await.unwrap();
    assert_eq!(first, second);

    let a = serde_json::to_string(&first).unwrap();
    let b = serde_json::to_string(&second).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn day_snapshot_joins_recruiters_and_sorts_clients() {
    let r1 = Uuid::new_v4();
    let r2 = Uuid::new_v4();
    let svc = service(vec![
        rec("2024-08-01", 9, r1, "Wonderla", HrStatus::Select, None),
        rec("2024-08-01", 10, r1, "Wonderla", HrStatus::Reject, None),
        rec("2024-08-01", 11, r2, "Suzen", HrStatus::Select, None),
    ]);
    let snapshot = svc
        .compute_day_snapshot(&scope("2024-08-01", "2024-08-01"))
        .await
        .unwrap();

    assert_eq!(snapshot.total_calls, 3);
    assert_eq!(snapshot.total_selected, 2);
    assert_eq!(snapshot.recruiter_calls.len(), 2);
    assert!(snapshot.recruiter_calls[0].recruiter.is_some());
    assert_eq!(snapshot.client_calls[0].client, "Wonderla");
    assert_eq!(snapshot.client_calls[0].calls, 2);
}

/// Store whose queries never resolve in time; the engine must surface a
/// timeout failure instead of hanging the caller.
struct StalledStore;

#[async_trait]
impl CandidateStore for StalledStore {
    async fn count(&self, _: &RecordFilter) -> Result<i64> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(0)
    }
    async fn count_by_client(
        &self,
        _: &RecordFilter,
        _: Option<i64>,
    ) -> Result<Vec<ClientCount>> {
        Ok(vec![])
    }
    async fn count_by_recruiter(&self, _: &RecordFilter) -> Result<Vec<RecruiterCount>> {
        Ok(vec![])
    }
    async fn day_client_rollup(&self, _: &RecordFilter) -> Result<Vec<DayClientRow>> {
        Ok(vec![])
    }
    async fn distinct_clients(&self, _: &RecordFilter) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_store_surfaces_a_timeout() {
    let svc = ReportService::new(
        Arc::new(StalledStore),
        ADMIN_BUCKET,
        Duration::from_millis(100),
    );
    let err = svc
        .compute_report(&scope("2024-09-01", "2024-09-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, hrms_backend::error::Error::Timeout(_)));
}

/// Store that fails one sub-query; the whole report must fail, never a
/// partial result.
struct FailingStore;

#[async_trait]
impl CandidateStore for FailingStore {
    async fn count(&self, _: &RecordFilter) -> Result<i64> {
        Ok(0)
    }
    async fn count_by_client(
        &self,
        _: &RecordFilter,
        _: Option<i64>,
    ) -> Result<Vec<ClientCount>> {
        anyhow::bail!("store unreachable")
    }
    async fn count_by_recruiter(&self, _: &RecordFilter) -> Result<Vec<RecruiterCount>> {
        Ok(vec![])
    }
    async fn day_client_rollup(&self, _: &RecordFilter) -> Result<Vec<DayClientRow>> {
        Ok(vec![])
    }
    async fn distinct_clients(&self, _: &RecordFilter) -> Result<Vec<String>> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn one_failing_sub_query_fails_the_whole_report() {
    let svc = ReportService::new(Arc::new(FailingStore), ADMIN_BUCKET, Duration::from_secs(5));
    assert!(svc
        .compute_report(&scope("2024-09-02", "2024-09-02"))
        .await
        .is_err());
}
