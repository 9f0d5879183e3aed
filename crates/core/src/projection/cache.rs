//! Projection result caching using Moka.
//!
//! Repeated projections with identical parameters (e.g. the same
//! investment rendered on every snapshot refresh) are served from memory.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

use moneta_shared::config::NegativeInputPolicy;

use super::engine::ProjectionEngine;
use super::error::ProjectionError;
use super::types::{ProjectionParams, ProjectionResult};

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

type CacheKey = (ProjectionParams, NegativeInputPolicy);

/// Cache for projection results.
///
/// Keyed by the full parameter set plus the negative-input policy. Only
/// successful results are cached.
#[derive(Clone)]
pub struct ProjectionCache {
    cache: Cache<CacheKey, Arc<ProjectionResult>>,
}

impl ProjectionCache {
    /// Creates a cache with default settings (256 entries, 5 minute TTL).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Runs a projection, returning a cached result if available.
    ///
    /// Cached results are returned with `cached: true`.
    ///
    /// # Errors
    ///
    /// Propagates [`ProjectionEngine::compute`] errors; failures are not cached.
    pub fn compute_cached(
        &self,
        params: &ProjectionParams,
        policy: NegativeInputPolicy,
        max_months: u32,
    ) -> Result<ProjectionResult, ProjectionError> {
        ProjectionEngine::check_horizon(params.months, max_months)?;
        let key = (params.clone(), policy);

        if let Some(hit) = self.cache.get(&key) {
            let mut result = (*hit).clone();
            result.cached = true;
            return Ok(result);
        }

        let result = ProjectionEngine::compute(params, policy, max_months)?;
        self.cache.insert(key, Arc::new(result.clone()));
        Ok(result)
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending cache maintenance tasks.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for ProjectionCache {
    fn default() -> Self {
        Self::new()
    }
}
