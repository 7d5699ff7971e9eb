use std::collections::BTreeMap;

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

pub const SERVICE_ID: &str = "ai-app-backend";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Ready,
    NotReady,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: ReadinessStatus,
    pub checks: BTreeMap<String, CheckStatus>,
}

impl ReadinessResponse {
    /// Ready only when every individual check passed.
    pub fn from_checks(checks: BTreeMap<String, CheckStatus>) -> Self {
        let status = if checks.values().all(|c| *c == CheckStatus::Ok) {
            ReadinessStatus::Ready
        } else {
            ReadinessStatus::NotReady
        };
        Self { status, checks }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.status {
            ReadinessStatus::Ready => StatusCode::OK,
            ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

pub async fn health_handler() -> Json<HealthResponse> {
    tracing::debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_ID.to_string(),
    })
}

// Dependency checks (e.g. completion API reachability) plug in here.
pub async fn ready_handler() -> (StatusCode, Json<ReadinessResponse>) {
    let checks = BTreeMap::from([("api".to_string(), CheckStatus::Ok)]);
    let response = ReadinessResponse::from_checks(checks);
    (response.status_code(), Json(response))
}
