use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::chatbot::{ChatCompleter, CompletionError};
use crate::settings::Settings;

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [PromptMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct PromptMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u64,
}

/// Forwards messages to an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompleter {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiCompleter {
    pub fn new(settings: &Settings, api_key: impl Into<String>) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.openai_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.openai_base_url),
            api_key: api_key.into(),
            model: settings.openai_model.clone(),
            max_tokens: settings.openai_max_tokens,
            temperature: settings.openai_temperature,
        })
    }
}

#[async_trait]
impl ChatCompleter for OpenAiCompleter {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: [
                PromptMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                PromptMessage {
                    role: "user",
                    content: message,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::info!(model = %self.model, "Calling completion API");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::Status { status, body });
        }

        let body: CompletionResponse = response.json().await?;
        let tokens_used = body.usage.map(|u| u.total_tokens);
        let answer = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(CompletionError::EmptyAnswer)?;

        tracing::info!(model = %self.model, tokens_used = ?tokens_used, "Completion response received");
        Ok(answer)
    }
}
