// src/state.rs
use std::sync::Arc;

use crate::services::chatbot::{ChatCompleter, CompletionError, EchoCompleter};
use crate::services::openai::OpenAiCompleter;
use crate::settings::Settings;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub settings: Arc<Settings>,
    pub completer: Arc<dyn ChatCompleter>,
}

impl AppState {
    /// Picks the completion strategy once: external service when an API key
    /// is configured, echo stub otherwise.
    pub fn from_settings(settings: Settings) -> Result<Self, CompletionError> {
        let completer: Arc<dyn ChatCompleter> = match settings.openai_api_key.as_deref() {
            Some(key) => Arc::new(OpenAiCompleter::new(&settings, key)?),
            None => Arc::new(EchoCompleter),
        };
        Ok(Self::with_completer(settings, completer))
    }

    pub fn with_completer(settings: Settings, completer: Arc<dyn ChatCompleter>) -> Self {
        Self {
            settings: Arc::new(settings),
            completer,
        }
    }
}
