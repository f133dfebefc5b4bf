//! Live update channel: a per-connection request/response loop over a
//! WebSocket. A `requestStats` frame re-runs the single-day snapshot through
//! the same engine the HTTP surface uses and emits a `statsUpdate` frame to
//! this connection only. The server never pushes without a request.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::dto::dashboard_dto::{DaySnapshot, SnapshotQuery};
use crate::routes::dashboard::snapshot_for;
use crate::AppState;

const REQUEST_STATS: &str = "requestStats";
const STATS_UPDATE: &str = "statsUpdate";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InboundFrame {
    event: String,
    recruiter_id: Option<String>,
    date: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatsFrame {
    event: &'static str,
    data: DaySnapshot,
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    tracing::debug!("live channel connected");

    while let Some(Ok(message)) = socket.recv().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered by axum; everything else is not ours.
            _ => continue,
        };

        let frame: InboundFrame = match serde_json::from_str(&text) {
            Ok(frame) => frame,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring malformed live frame");
                continue;
            }
        };
        if frame.event != REQUEST_STATS {
            continue;
        }

        let query = SnapshotQuery {
            recruiter_id: frame.recruiter_id,
            date: frame.date,
        };
        // Failures degrade to "no update": logged, connection stays open.
        let snapshot = match snapshot_for(&state, &query).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::error!(error = %err, "live stats computation failed");
                continue;
            }
        };

        let payload = StatsFrame {
            event: STATS_UPDATE,
            data: snapshot,
        };
        let json = match serde_json::to_string(&payload) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(error = %err, "failed to encode stats frame");
                continue;
            }
        };
        if socket.send(Message::Text(json)).await.is_err() {
            break;
        }
    }

    tracing::debug!("live channel disconnected");
}
