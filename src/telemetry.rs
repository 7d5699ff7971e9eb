// src/telemetry.rs
use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::{LogFormat, Settings};

/// `RUST_LOG` wins when set; otherwise the filter comes from `LOG_LEVEL`.
pub fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = settings.log_level.as_filter();
        format!("{level},ai_app_backend={level},tower_http=warn").into()
    })
}

pub fn init_tracing(settings: &Settings) {
    let fmt_layer = match settings.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt_layer)
        .init();
}
