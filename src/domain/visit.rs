use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct CollectIpRequest {
    #[serde(default)]
    pub ip: Option<String>,
}

/// Extracts the visitor address from a raw request body.
///
/// Any body that does not yield a non-empty `ip` string counts as a missing
/// field. The value itself is relayed verbatim, without address validation.
pub fn parse_visitor_ip(body: &[u8]) -> Result<String, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| AppError::MissingIp)?;
    if !value.is_object() {
        return Err(AppError::MissingIp);
    }

    let request: CollectIpRequest =
        serde_json::from_value(value).map_err(|_| AppError::MissingIp)?;

    request
        .ip
        .filter(|ip| !ip.is_empty())
        .ok_or(AppError::MissingIp)
}

pub fn format_notification(ip: &str, now: DateTime<Utc>) -> String {
    format!(
        "📡 New visitor IP: {ip}\nTime: {}",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}
