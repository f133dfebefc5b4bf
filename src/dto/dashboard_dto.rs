//! Wire shapes for the dashboard endpoints. Field names (including the
//! legacy `_id` keys) are part of the public contract consumed by the
//! dashboard front-end, so they are preserved verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDataQuery {
    pub recruiter_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub client: Option<String>,
}

/// Query for the legacy single-day stats endpoint and the live channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotQuery {
    pub recruiter_id: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCallsRow {
    #[serde(rename = "_id")]
    pub client: String,
    pub calls: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSelectedRow {
    #[serde(rename = "_id")]
    pub client: String,
    pub selected: i64,
}

/// One day of the trend table: total calls/selected plus a per-client
/// selected-count breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRow {
    #[serde(rename = "_id")]
    pub date: String,
    pub calls: i64,
    pub selected: i64,
    pub clients: BTreeMap<String, i64>,
}

/// Aggregated statistics for one report scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_calls: i64,
    pub client_calls: Vec<ClientCallsRow>,
    pub selected_count: i64,
    pub client_selected: Vec<ClientSelectedRow>,
    pub offers_made: i64,
    pub dropouts: i64,
    pub conversion_rate: f64,
    pub by_day: Vec<DayRow>,
    pub all_clients: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEnvelope {
    pub ok: bool,
    #[serde(flatten)]
    pub report: Report,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruiterRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruiterCallsRow {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub calls: i64,
    pub recruiter: Option<RecruiterRef>,
}

/// The single-day org view pushed over the live channel and served by
/// `/api/dashboard-stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySnapshot {
    pub total_calls: i64,
    pub total_selected: i64,
    pub recruiter_calls: Vec<RecruiterCallsRow>,
    pub client_calls: Vec<ClientCallsRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_envelope_keeps_legacy_keys() {
        let report = Report {
            total_calls: 1,
            client_calls: vec![ClientCallsRow {
                client: "Wonderla".into(),
                calls: 1,
            }],
            selected_count: 0,
            client_selected: vec![],
            offers_made: 0,
            dropouts: 0,
            conversion_rate: 0.0,
            by_day: vec![DayRow {
                date: "2024-01-01".into(),
                calls: 1,
                selected: 0,
                clients: BTreeMap::from([("Wonderla".to_string(), 0)]),
            }],
            all_clients: vec!["Wonderla".into()],
        };
        let value = serde_json::to_value(ReportEnvelope { ok: true, report }).unwrap();

        assert_eq!(value["ok"], true);
        assert_eq!(value["totalCalls"], 1);
        assert_eq!(value["clientCalls"][0]["_id"], "Wonderla");
        assert_eq!(value["byDay"][0]["_id"], "2024-01-01");
        assert_eq!(value["byDay"][0]["clients"]["Wonderla"], 0);
        assert_eq!(value["conversionRate"], 0.0);
    }

    #[test]
    fn snapshot_serializes_recruiter_join() {
        let id = Uuid::new_v4();
        let snapshot = DaySnapshot {
            total_calls: 2,
            total_selected: 1,
            recruiter_calls: vec![RecruiterCallsRow {
                id,
                calls: 2,
                recruiter: Some(RecruiterRef {
                    id,
                    username: "asha".into(),
                }),
            }],
            client_calls: vec![],
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["totalSelected"], 1);
        assert_eq!(value["recruiterCalls"][0]["recruiter"]["username"], "asha");
        assert_eq!(
            value["recruiterCalls"][0]["_id"],
            serde_json::json!(id.to_string())
        );
    }
}
