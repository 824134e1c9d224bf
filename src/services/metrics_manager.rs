use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::gemini::GenerationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Reply,
    NetworkError,
    ApiError,
    MalformedResponse,
    /// Empty input or a submit made while a reply was pending.
    Rejected,
}

impl Outcome {
    pub fn of(result: &Result<String, GenerationError>) -> Self {
        match result {
            Ok(_) => Outcome::Reply,
            Err(GenerationError::Network(_)) => Outcome::NetworkError,
            Err(GenerationError::Api(_)) => Outcome::ApiError,
            Err(GenerationError::MalformedResponse(_)) => Outcome::MalformedResponse,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsData {
    pub replies: u64,
    pub network_errors: u64,
    pub api_errors: u64,
    pub malformed_responses: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record(&self, outcome: Outcome) {
        let mut data = self.inner.write().await;
        let counter = match outcome {
            Outcome::Reply => &mut data.replies,
            Outcome::NetworkError => &mut data.network_errors,
            Outcome::ApiError => &mut data.api_errors,
            Outcome::MalformedResponse => &mut data.malformed_responses,
            Outcome::Rejected => &mut data.rejected,
        };
        *counter += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_each_outcome_separately() {
        let metrics = MetricsManager::new();
        metrics.record(Outcome::of(&Ok("hi".into()))).await;
        metrics.record(Outcome::of(&Ok("again".into()))).await;
        metrics
            .record(Outcome::of(&Err(GenerationError::Api("bad key".into()))))
            .await;
        metrics.record(Outcome::Rejected).await;

        let data = metrics.get_metrics().await;
        assert_eq!(data.replies, 2);
        assert_eq!(data.api_errors, 1);
        assert_eq!(data.rejected, 1);
        assert_eq!(data.network_errors, 0);
        assert_eq!(data.malformed_responses, 0);
    }
}
