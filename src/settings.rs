// src/settings.rs
use axum::http::HeaderValue;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("failed to read .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, <LogLevel as TryFrom<String>>::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" | "CRITICAL" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level {value:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl TryFrom<String> for LogFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("unknown log format {value:?}, expected `pretty` or `json`")),
        }
    }
}

/// `*` allows every origin; an empty list allows none.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

// Accepts a JSON array (`["http://a", "http://b"]`) or a comma-separated list.
impl TryFrom<String> for CorsOrigins {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let origins: Vec<String> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed).map_err(|e| e.to_string())?
        } else {
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect()
        };

        if origins.iter().any(|o| o == "*") {
            return Ok(CorsOrigins::Any);
        }

        origins
            .iter()
            .map(|o| HeaderValue::from_str(o).map_err(|e| format!("{o:?}: {e}")))
            .collect::<Result<Vec<_>, _>>()
            .map(CorsOrigins::List)
    }
}

/// Process-wide configuration snapshot. Built once at startup, read-only after.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    pub environment: String,

    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_max_tokens: u32,
    pub openai_temperature: f32,
    pub openai_base_url: String,
    pub openai_timeout_secs: u64,

    pub log_level: LogLevel,
    pub log_format: LogFormat,

    pub cors_origins: CorsOrigins,
    /// Empty means the API routes are mounted at the root.
    pub api_prefix: String,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "AI App Backend".to_string(),
            app_version: "1.0.0".to_string(),
            environment: "dev".to_string(),
            openai_api_key: None,
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_max_tokens: 500,
            openai_temperature: 0.7,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_timeout_secs: 30,
            log_level: LogLevel::Info,
            log_format: LogFormat::Pretty,
            cors_origins: CorsOrigins::Any,
            api_prefix: "/api".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// Loads `.env` (if present, without overriding variables that are
    /// already set) and then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::load(config::Environment::default())
    }

    /// Builds settings from explicit key/value pairs instead of the process
    /// environment. Keys are case-insensitive.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> =
            vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self::load(config::Environment::default().source(Some(vars)))
    }

    fn load(source: config::Environment) -> Result<Self, ConfigError> {
        let mut settings: Settings = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        settings.openai_api_key = settings
            .openai_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        settings.openai_base_url = settings.openai_base_url.trim_end_matches('/').to_string();
        settings.api_prefix = normalize_api_prefix(&settings.api_prefix)?;

        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// `/` (or empty) mounts the API at the root; anything else must be absolute.
fn normalize_api_prefix(value: &str) -> Result<String, ConfigError> {
    let prefix = value.trim().trim_end_matches('/');
    if !prefix.is_empty() && !prefix.starts_with('/') {
        return Err(ConfigError::Invalid {
            key: "API_PREFIX",
            value: value.to_string(),
            reason: "must start with `/`".to_string(),
        });
    }
    Ok(prefix.to_string())
}
