// src/config.rs
use std::net::SocketAddr;

use tracing::{info, warn};

use crate::services::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig};
use crate::services::session_manager::ErrorDetail;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub bind_addr: SocketAddr,
    pub admin_key: Option<String>,
    pub error_detail: ErrorDetail,
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = var("GEMINI_API_KEY")
            .or_else(|| var("EXPO_PUBLIC_GEMINI_API_KEY"))
            .unwrap_or_default();
        if api_key.is_empty() {
            warn!("GEMINI_API_KEY is not set, requests will be rejected by the API");
        } else {
            info!("Gemini API key loaded");
        }

        let gemini = GeminiConfig::new(api_key)
            .with_base_url(var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
            .with_model(var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()));

        let bind = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key: "BIND_ADDR", value: bind.clone() })?;

        let error_detail = match var("ERROR_DETAIL") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "ERROR_DETAIL", value })?,
            None => ErrorDetail::default(),
        };

        Ok(Self {
            gemini,
            bind_addr,
            admin_key: var("ADMIN_KEY"),
            error_detail,
        })
    }
}
