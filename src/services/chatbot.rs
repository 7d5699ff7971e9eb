use async_trait::async_trait;
use axum::http::StatusCode;
use thiserror::Error;

pub const STUB_NOTICE: &str =
    "(This is a stub response. Configure OPENAI_API_KEY to enable AI responses.)";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request to completion service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("completion service returned no answer")]
    EmptyAnswer,
}

/// Produces an answer for a single user message.
///
/// One implementation is picked at startup and shared by every request.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, message: &str) -> Result<String, CompletionError>;
}

/// Deterministic placeholder used when no external service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoCompleter;

impl EchoCompleter {
    pub fn reply(message: &str) -> String {
        format!("Echo: {message} {STUB_NOTICE}")
    }
}

#[async_trait]
impl ChatCompleter for EchoCompleter {
    fn name(&self) -> &'static str {
        "echo-stub"
    }

    async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        tracing::info!("Returning stub response");
        Ok(Self::reply(message))
    }
}
