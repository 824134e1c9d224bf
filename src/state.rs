// src/state.rs
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::gemini::{GeminiClient, GenerationClient};
use crate::services::metrics_manager::MetricsManager;
use crate::services::session_manager::{ChatSession, ErrorDetail};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub session: ChatSession,
    pub metrics: MetricsManager,
    pub admin_key: Option<String>,
}

impl AppState {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self::with_options(client, ErrorDetail::default(), None)
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let client = Arc::new(GeminiClient::new(config.gemini.clone()));
        Self::with_options(client, config.error_detail, config.admin_key.clone())
    }

    pub fn with_options(
        client: Arc<dyn GenerationClient>,
        error_detail: ErrorDetail,
        admin_key: Option<String>,
    ) -> Self {
        let metrics = MetricsManager::new();
        let session = ChatSession::new(client)
            .with_error_detail(error_detail)
            .with_metrics(metrics.clone());
        Self {
            session,
            metrics,
            admin_key,
        }
    }
}
