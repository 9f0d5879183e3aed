//! Income aggregation.
//!
//! Normalizes income sources of mixed frequencies into a monthly total and
//! an N-month projection.

pub mod error;
pub mod service;
pub mod types;


pub use error::IncomeError;
pub use service::IncomeAggregator;
pub use types::{Frequency, IncomeSource};
