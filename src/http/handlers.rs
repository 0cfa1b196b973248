//! Axum HTTP handlers for the relay
//!
//! Provides the `/collect-ip` relay endpoint and the plain-text liveness probe.

use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::domain::visit::{format_notification, parse_visitor_ip};
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub success: bool,
    pub message: &'static str,
}

pub async fn health() -> &'static str {
    "IP Telegram backend is running."
}

pub async fn collect_ip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RelayResponse>, AppError> {
    let ip = parse_visitor_ip(&body)?;
    let text = format_notification(&ip, Utc::now());

    state.notifier.send_message(&text).await?;

    Ok(Json(RelayResponse {
        success: true,
        message: "IP sent to Telegram",
    }))
}
