// src/routes/mod.rs
pub mod chat;
pub mod health;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::{
    middleware::request_pipeline,
    settings::{CorsOrigins, Settings},
    state::SharedState,
    trace_id::REQUEST_ID_HEADER,
};
use chat::chat_handler;
use health::{health_handler, ready_handler};

#[derive(Debug, Serialize, Deserialize)]
pub struct AppInfo {
    pub app: String,
    pub version: String,
    pub environment: String,
}

/// Routes only: `/` plus health and chat under the configured prefix
/// (at the root when the prefix is empty).
pub fn create_router(settings: &Settings) -> Router<SharedState> {
    let api_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/chat", post(chat_handler));

    let router = Router::new().route("/", get(root_handler));
    if settings.api_prefix.is_empty() {
        router.merge(api_routes)
    } else {
        router.nest(&settings.api_prefix, api_routes)
    }
}

/// Fully assembled application: routes, state, CORS and the request pipeline.
pub fn app(state: SharedState) -> Router {
    let cors = cors_layer(&state.settings);
    let router = create_router(&state.settings).with_state(state);
    request_pipeline(router, cors)
}

// Credentials are allowed, so wildcards are expressed by mirroring the request.
pub fn cors_layer(settings: &Settings) -> CorsLayer {
    let origin = match &settings.cors_origins {
        CorsOrigins::Any => AllowOrigin::mirror_request(),
        CorsOrigins::List(origins) => AllowOrigin::list(origins.iter().cloned()),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([REQUEST_ID_HEADER])
}

async fn root_handler(State(state): State<SharedState>) -> Json<AppInfo> {
    Json(AppInfo {
        app: state.settings.app_name.clone(),
        version: state.settings.app_version.clone(),
        environment: state.settings.environment.clone(),
    })
}
