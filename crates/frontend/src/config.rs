//! Runtime configuration injected by the hosting page.
//!
//! The page sets `window._env` to base64 encoded JSON. Every field has a
//! default, so a missing or broken blob still yields a usable config.

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_UPLOAD_LIMIT: &str = "500m";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("window._env is not set")]
    Missing,

    #[error("window._env is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("window._env is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid size {0:?}")]
    InvalidSize(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct AppConfig {
    pub auth_required: String,
    pub analytics_enabled: String,
    pub oidc_server_url: Option<String>,
    pub oidc_client_id: Option<String>,
    pub oidc_scope: Option<String>,
    pub upload_limit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth_required: "true".to_string(),
            analytics_enabled: "false".to_string(),
            oidc_server_url: None,
            oidc_client_id: None,
            oidc_scope: None,
            upload_limit: DEFAULT_UPLOAD_LIMIT.to_string(),
        }
    }
}

/// Parse sizes like `500m`, `2g`, `64k` or plain bytes
pub fn parse_size(raw: &str) -> Result<u64, ConfigError> {
    let trimmed = raw.trim().to_lowercase();
    let (digits, multiplier) = match trimmed.chars().last() {
        Some('k') => (&trimmed[..trimmed.len() - 1], 1024),
        Some('m') => (&trimmed[..trimmed.len() - 1], 1024 * 1024),
        Some('g') => (&trimmed[..trimmed.len() - 1], 1024 * 1024 * 1024),
        _ => (trimmed.as_str(), 1),
    };
    digits
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .ok_or_else(|| ConfigError::InvalidSize(raw.to_string()))
}

impl AppConfig {
    pub fn from_base64(encoded: &str) -> Result<Self, ConfigError> {
        let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Read `window._env`, falling back to defaults with a warning
    pub fn load() -> Self {
        match Self::read_window_env().and_then(|encoded| Self::from_base64(&encoded)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default configuration: {}", e);
                Self::default()
            }
        }
    }

    fn read_window_env() -> Result<String, ConfigError> {
        let window = web_sys::window().ok_or(ConfigError::Missing)?;
        js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str("_env"))
            .ok()
            .and_then(|v| v.as_string())
            .ok_or(ConfigError::Missing)
    }

    pub fn is_auth_required(&self) -> bool {
        self.auth_required != "false"
    }

    pub fn is_analytics_enabled(&self) -> bool {
        self.analytics_enabled != "false"
    }

    pub fn upload_limit_bytes(&self) -> u64 {
        parse_size(&self.upload_limit).unwrap_or_else(|e| {
            log::warn!("{}, using {}", e, DEFAULT_UPLOAD_LIMIT);
            500 * 1024 * 1024
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("500m").unwrap(), 500 * 1024 * 1024);
        assert_eq!(parse_size("2G").unwrap(), 2 * 1024 * 1024 * 1024);
        assert_eq!(parse_size("1024").unwrap(), 1024);
        assert!(parse_size("lots").is_err());
        assert!(parse_size("m").is_err());
    }

    #[test]
    fn test_from_base64() {
        let json = r#"{"AUTH_REQUIRED":"false","OIDC_CLIENT_ID":"frontend","UPLOAD_LIMIT":"1g"}"#;
        let encoded = general_purpose::STANDARD.encode(json);
        let config = AppConfig::from_base64(&encoded).unwrap();
        assert!(!config.is_auth_required());
        assert!(!config.is_analytics_enabled());
        assert_eq!(config.oidc_client_id.as_deref(), Some("frontend"));
        assert_eq!(config.upload_limit_bytes(), 1024 * 1024 * 1024);
    }

    #[test]
    fn test_broken_blob() {
        assert!(matches!(
            AppConfig::from_base64("%%%"),
            Err(ConfigError::Base64(_))
        ));
        let encoded = general_purpose::STANDARD.encode("not json");
        assert!(matches!(
            AppConfig::from_base64(&encoded),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.is_auth_required());
        assert_eq!(config.upload_limit_bytes(), 500 * 1024 * 1024);
    }
}
