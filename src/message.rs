// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub trace_id: String,
}

/// Body for handled failures (400, upstream 500).
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// Body for unhandled failures. Never carries internal detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct InternalErrorBody {
    pub error: String,
    pub request_id: String,
}

impl InternalErrorBody {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            error: "Internal server error".to_string(),
            request_id: request_id.into(),
        }
    }
}
