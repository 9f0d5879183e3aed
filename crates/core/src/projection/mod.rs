//! Time-value-of-money projections.

pub mod cache;
pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use cache::ProjectionCache;
pub use engine::ProjectionEngine;
pub use error::ProjectionError;
pub use moneta_shared::config::NegativeInputPolicy;
pub use types::{ProjectionParams, ProjectionPoint, ProjectionResult};
