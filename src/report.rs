use gloo_net::http::Request;
use serde::Serialize;
use std::fmt;
use wasm_bindgen_futures::spawn_local;

use crate::queue::Decision;

// The backend upserts on (link, image, client); a resubmit after an
// undo overwrites the earlier row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionReport {
    pub image_id: String,
    pub decision: Decision,
    pub order_index: usize,
    pub client_id: String,
    pub session_id: String,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Network(String),
    Rejected(u16),
}

impl ReportError {
    fn network<E: fmt::Display>(err: E) -> Self {
        Self::Network(err.to_string())
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Network(detail) => write!(f, "network error: {detail}"),
            ReportError::Rejected(status) => write!(f, "rejected with HTTP {status}"),
        }
    }
}

pub async fn send_report(token: &str, report: &DecisionReport) -> Result<(), ReportError> {
    let url = format!("/api/r/{}/events", token);
    let response = Request::post(&url)
        .json(report)
        .map_err(ReportError::network)?
        .send()
        .await
        .map_err(ReportError::network)?;

    if !response.ok() {
        return Err(ReportError::Rejected(response.status()));
    }
    Ok(())
}

pub fn spawn_report(token: String, report: DecisionReport) {
    spawn_local(async move {
        if let Err(err) = send_report(&token, &report).await {
            log::warn!("Decision report for {} failed: {err}", report.image_id);
        }
    });
}
