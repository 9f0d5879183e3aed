//! Optional narrative enrichment of the deterministic insights.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::InsightRecord;
use crate::snapshot::Snapshot;

/// Enrichment failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichmentError {
    /// The service could not be reached or answered with an error.
    #[error("Enrichment service failed: {0}")]
    Service(String),

    /// The service answered with something unusable.
    #[error("Invalid enrichment response: {0}")]
    InvalidResponse(String),
}

/// Context handed to the enrichment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichmentContext {
    /// Current snapshot, if complete.
    pub snapshot: Option<Snapshot>,
    /// Deterministic insights, already ranked.
    pub insights: Vec<InsightRecord>,
}

impl EnrichmentContext {
    /// JSON form of the context.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Generates narrative text from a context.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrichmentService: Send + Sync {
    /// Produces a narrative for `context`.
    async fn generate(&self, context: &EnrichmentContext) -> Result<String, EnrichmentError>;
}

/// Deterministic insights plus optional narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedInsights {
    /// Rule engine output, unchanged.
    pub insights: Vec<InsightRecord>,
    /// Narrative text, when enrichment succeeded in time.
    pub narrative: Option<String>,
}

/// Asks `service` for a narrative, giving up after `timeout`.
///
/// Failure, timeout, blank text or a missing service all yield
/// `narrative: None`; the insight list is returned untouched either way.
pub async fn enrich(
    service: Option<&dyn EnrichmentService>,
    context: EnrichmentContext,
    timeout: Duration,
) -> EnrichedInsights {
    let narrative = match service {
        None => None,
        Some(service) => match tokio::time::timeout(timeout, service.generate(&context)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                debug!(chars = text.len(), "Enrichment succeeded");
                Some(text)
            }
            Ok(Ok(_)) => {
                warn!("Enrichment returned empty text");
                None
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Enrichment failed, using deterministic insights only");
                None
            }
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis(), "Enrichment timed out");
                None
            }
        },
    };

    EnrichedInsights {
        insights: context.insights,
        narrative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::{InsightKind, Severity};

    fn context() -> EnrichmentContext {
        EnrichmentContext {
            snapshot: None,
            insights: vec![InsightRecord::new(
                InsightKind::IncomeConcentration,
                0,
                Severity::Danger,
                "No income registered",
                "Add an income source.",
            )],
        }
    }

    #[tokio::test]
    async fn test_narrative_added_on_success() {
        let mut service = MockEnrichmentService::new();
        service
            .expect_generate()
            .times(1)
            .returning(|_| Ok("Start by adding your salary.".to_string()));

        let result = enrich(Some(&service), context(), Duration::from_secs(1)).await;
        assert_eq!(result.narrative.as_deref(), Some("Start by adding your salary."));
        assert_eq!(result.insights, context().insights);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_deterministic_output() {
        let mut service = MockEnrichmentService::new();
        service
            .expect_generate()
            .returning(|_| Err(EnrichmentError::Service("503".to_string())));

        let result = enrich(Some(&service), context(), Duration::from_secs(1)).await;
        assert_eq!(result.narrative, None);
        assert_eq!(result.insights, context().insights);
    }

    #[tokio::test]
    async fn test_blank_text_is_ignored() {
        let mut service = MockEnrichmentService::new();
        service.expect_generate().returning(|_| Ok("   ".to_string()));

        let result = enrich(Some(&service), context(), Duration::from_secs(1)).await;
        assert_eq!(result.narrative, None);
    }

    struct SlowService;

    #[async_trait]
    impl EnrichmentService for SlowService {
        async fn generate(&self, _context: &EnrichmentContext) -> Result<String, EnrichmentError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let result = enrich(Some(&SlowService), context(), Duration::from_millis(100)).await;
        assert_eq!(result.narrative, None);
        assert_eq!(result.insights.len(), 1);
    }

    #[tokio::test]
    async fn test_without_service() {
        let result = enrich(None, context(), Duration::from_millis(10)).await;
        assert_eq!(result.narrative, None);
        assert_eq!(result.insights, context().insights);
    }

    #[test]
    fn test_context_json_shape() {
        let json = context().to_json();
        assert!(json["snapshot"].is_null());
        assert_eq!(json["insights"][0]["id"], "income-0");
        assert_eq!(json["insights"][0]["type"], "income_concentration");
        assert_eq!(json["insights"][0]["severity"], "danger");
    }
}
