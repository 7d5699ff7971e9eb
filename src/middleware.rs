// src/middleware.rs
use std::{any::Any, net::SocketAddr, time::Duration, time::Instant};

use axum::{
    Json, Router,
    extract::{ConnectInfo, Request},
    http::{StatusCode, header::CONTENT_LENGTH},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};
use tracing::Instrument;

use crate::{
    error::{AppError, UnhandledFailure},
    message::InternalErrorBody,
    trace_id::{REQUEST_ID_HEADER, TraceId},
};

/// Wraps `router` with, outermost first: request tracking, CORS, panic capture.
pub fn request_pipeline(router: Router, cors: CorsLayer) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(middleware::from_fn(track_request))
}

/// Assigns the trace id, logs start and end of every request and turns
/// unhandled failures into the uniform 500 payload.
///
/// Each request produces exactly one of "Request completed" or
/// "Unhandled exception".
pub async fn track_request(mut req: Request, next: Next) -> Response {
    let trace_id = TraceId::generate();
    req.extensions_mut().insert(trace_id.clone());

    let span = tracing::info_span!("request", trace_id = %trace_id);

    async move {
        let client = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());
        tracing::info!(
            method = %req.method(),
            path = %req.uri().path(),
            client = ?client,
            "Request started"
        );

        let started = Instant::now();
        let response = next.run(req).await;
        let elapsed = started.elapsed();

        let failure = response.extensions().get::<UnhandledFailure>().cloned();
        let mut response = match failure {
            Some(UnhandledFailure(detail)) => {
                tracing::error!(
                    detail = %detail,
                    process_time = %format_elapsed(elapsed),
                    "Unhandled exception"
                );
                uniform_failure(response, &trace_id)
            }
            None => {
                tracing::info!(
                    status_code = response.status().as_u16(),
                    process_time = %format_elapsed(elapsed),
                    "Request completed"
                );
                response
            }
        };

        if let Some(value) = trace_id.header_value() {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}

// Keeps headers set by inner layers (CORS) and swaps status and body.
fn uniform_failure(response: Response, trace_id: &TraceId) -> Response {
    let (mut parts, _) = response.into_parts();
    let (fresh, body) = (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalErrorBody::new(trace_id.as_str())),
    )
        .into_response()
        .into_parts();

    parts.status = fresh.status;
    parts.headers.remove(CONTENT_LENGTH);
    parts.headers.extend(fresh.headers);
    parts.extensions.remove::<UnhandledFailure>();
    Response::from_parts(parts, body)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}
