//! HTTP client for the optional text enrichment service.
//!
//! The endpoint receives the enrichment context as JSON and answers with
//! `{"text": "..."}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use moneta_core::insight::{EnrichmentContext, EnrichmentError, EnrichmentService};
use moneta_shared::config::EnrichmentConfig;

#[derive(Debug, Serialize)]
struct EnrichmentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    context: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct EnrichmentReply {
    text: String,
}

/// Enrichment service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEnrichmentClient {
    client: Client,
    url: String,
    model: Option<String>,
}

impl HttpEnrichmentClient {
    /// Creates a client posting to `url`.
    pub fn new(url: impl Into<String>, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            model,
        }
    }

    /// Builds a client from configuration, or `None` when enrichment is
    /// disabled or has no endpoint.
    pub fn from_config(config: &EnrichmentConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let url = config.url.as_deref()?;
        Some(Self::new(url, config.model.clone()))
    }
}

#[async_trait]
impl EnrichmentService for HttpEnrichmentClient {
    async fn generate(&self, context: &EnrichmentContext) -> Result<String, EnrichmentError> {
        let request = EnrichmentRequest {
            model: self.model.as_deref(),
            context: context.to_json(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EnrichmentError::Service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Service(format!("HTTP {status}")));
        }

        let reply: EnrichmentReply = response
            .json()
            .await
            .map_err(|e| EnrichmentError::InvalidResponse(e.to_string()))?;
        debug!(chars = reply.text.len(), "Enrichment reply received");
        Ok(reply.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_config_builds_no_client() {
        let config = EnrichmentConfig {
            enabled: false,
            url: Some("http://localhost:9000/enrich".to_string()),
            ..EnrichmentConfig::default()
        };
        assert!(HttpEnrichmentClient::from_config(&config).is_none());
    }

    #[test]
    fn test_enabled_config_requires_url() {
        let config = EnrichmentConfig {
            enabled: true,
            ..EnrichmentConfig::default()
        };
        assert!(HttpEnrichmentClient::from_config(&config).is_none());

        let config = EnrichmentConfig {
            enabled: true,
            url: Some("http://localhost:9000/enrich".to_string()),
            model: Some("small".to_string()),
            ..EnrichmentConfig::default()
        };
        let client = HttpEnrichmentClient::from_config(&config).unwrap();
        assert_eq!(client.url, "http://localhost:9000/enrich");
        assert_eq!(client.model.as_deref(), Some("small"));
    }

    #[test]
    fn test_request_omits_missing_model() {
        let request = EnrichmentRequest {
            model: None,
            context: serde_json::json!({"insights": []}),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("model").is_none());
        assert_eq!(json["context"]["insights"], serde_json::json!([]));
    }
}
