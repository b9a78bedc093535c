use super::models::{MetricsSnapshot, Prediction, ScalingStatusView};
use crate::config::ApiConfig;
use crate::error::{Endpoint, FetchError, FetchResult, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn current_metrics(&self) -> FetchResult<MetricsSnapshot>;
    async fn prediction(&self) -> FetchResult<Prediction>;
    async fn status(&self) -> FetchResult<ScalingStatusView>;
}

#[derive(Clone)]
pub struct HttpMetricsSource {
    client: Client,
    base_url: String,
}

impl HttpMetricsSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> FetchResult<T> {
        let url = format!("{}{}", self.base_url, endpoint.path());

        let response = self.client.get(&url).send().await.map_err(|e| FetchError::Network {
            endpoint,
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Protocol { endpoint, status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Network {
            endpoint,
            reason: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Shape {
            endpoint,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    async fn current_metrics(&self) -> FetchResult<MetricsSnapshot> {
        self.get_json(Endpoint::Current).await
    }

    async fn prediction(&self) -> FetchResult<Prediction> {
        self.get_json(Endpoint::Predict).await
    }

    async fn status(&self) -> FetchResult<ScalingStatusView> {
        self.get_json(Endpoint::Status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_trims_base_url() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout_ms: 1000,
        };

        let client = HttpMetricsSource::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_ms: 500,
        };

        let client = HttpMetricsSource::new(&config).unwrap();
        let err = client.current_metrics().await.unwrap_err();
        assert!(matches!(err, FetchError::Network { endpoint: Endpoint::Current, .. }));
    }
}
