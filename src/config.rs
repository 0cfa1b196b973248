use std::{env, net::SocketAddr, time::Duration};

use thiserror::Error;

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub telegram: TelegramConfig,
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
    pub timeout: Duration,
    pub parse_mode: Option<String>,
}

impl TelegramConfig {
    /// First characters of the token, safe to print at startup.
    pub fn masked_token(&self) -> String {
        let prefix: String = self.bot_token.chars().take(8).collect();
        format!("{prefix}...")
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &self.masked_token())
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("parse_mode", &self.parse_mode)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TELEGRAM_BOT_TOKEN is required and must not be empty")]
    MissingBotToken,
    #[error("TELEGRAM_CHAT_ID is required and must not be empty")]
    MissingChatId,
    #[error("PORT must be a valid u16")]
    InvalidPort,
    #[error("TELEGRAM_TIMEOUT_SECS must be a positive integer")]
    InvalidTimeout,
    #[error("invalid bind address or port")]
    InvalidSocket,
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bot_token = non_empty("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::MissingBotToken)?;
        let chat_id = non_empty("TELEGRAM_CHAT_ID").ok_or(ConfigError::MissingChatId)?;

        let bind_addr = non_empty("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let bind_port = non_empty("PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(3000);

        let api_base = non_empty("TELEGRAM_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeout_secs = non_empty("TELEGRAM_TIMEOUT_SECS")
            .map(|value| {
                value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::InvalidTimeout)
            })
            .transpose()?
            .unwrap_or(10);
        let parse_mode = non_empty("TELEGRAM_PARSE_MODE");

        let config = Self {
            bind_addr,
            bind_port,
            telegram: TelegramConfig {
                bot_token,
                chat_id,
                api_base,
                timeout: Duration::from_secs(timeout_secs),
                parse_mode,
            },
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn parse_defaults() {
        let config = parse(&[
            ("TELEGRAM_BOT_TOKEN", "123456:abcdef"),
            ("TELEGRAM_CHAT_ID", "42"),
        ])
        .expect("config should parse");

        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.bind_port, 3000);
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
        assert_eq!(config.telegram.timeout, Duration::from_secs(10));
        assert_eq!(config.telegram.parse_mode, None);
    }

    #[test]
    fn missing_token_fails() {
        let err = parse(&[("TELEGRAM_CHAT_ID", "42")]).expect_err("expected missing token error");
        assert!(matches!(err, ConfigError::MissingBotToken));
    }

    #[test]
    fn blank_chat_id_fails() {
        let err = parse(&[("TELEGRAM_BOT_TOKEN", "t"), ("TELEGRAM_CHAT_ID", "   ")])
            .expect_err("expected missing chat id error");
        assert!(matches!(err, ConfigError::MissingChatId));
    }

    #[test]
    fn port_and_overrides_parse() {
        let config = parse(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("PORT", "8081"),
            ("BIND_ADDR", "127.0.0.1"),
            ("TELEGRAM_API_BASE", "http://localhost:9000/"),
            ("TELEGRAM_TIMEOUT_SECS", "3"),
            ("TELEGRAM_PARSE_MODE", "HTML"),
        ])
        .expect("config should parse");

        assert_eq!(
            config.bind_socket().expect("valid socket"),
            "127.0.0.1:8081"
                .parse::<SocketAddr>()
                .expect("socket literal")
        );
        assert_eq!(config.telegram.api_base, "http://localhost:9000");
        assert_eq!(config.telegram.timeout, Duration::from_secs(3));
        assert_eq!(config.telegram.parse_mode.as_deref(), Some("HTML"));
    }

    #[test]
    fn invalid_port_fails() {
        let err = parse(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("PORT", "70000"),
        ])
        .expect_err("expected invalid port error");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn zero_timeout_fails() {
        let err = parse(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("TELEGRAM_CHAT_ID", "42"),
            ("TELEGRAM_TIMEOUT_SECS", "0"),
        ])
        .expect_err("expected invalid timeout error");
        assert!(matches!(err, ConfigError::InvalidTimeout));
    }

    #[test]
    fn debug_output_masks_token() {
        let config = parse(&[
            ("TELEGRAM_BOT_TOKEN", "123456789:secret-part"),
            ("TELEGRAM_CHAT_ID", "42"),
        ])
        .expect("config should parse");

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-part"));
        assert!(rendered.contains("12345678..."));
    }
}
