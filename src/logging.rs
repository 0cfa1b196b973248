use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::FailureKind;

/// Used when `RUST_LOG` is unset. Keeps connection-level chatter from the
/// outbound client out of the request log.
const DEFAULT_LOG_FILTER: &str = "info,hyper_util=warn,reqwest=warn";

pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = elapsed_ms,
        "request summary"
    );

    if status.is_server_error() {
        let failure = response
            .extensions()
            .get::<FailureKind>()
            .map_or("unknown", FailureKind::as_str);
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            failure = %failure,
            "relay failure"
        );
    }

    response
}
