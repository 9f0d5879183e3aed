//! Financial planning aggregation engine for Moneta.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `income` - Income sources and monthly/annual aggregation
//! - `ledger` - Goals, debts and investments: progress, pace, outflows, settlement
//! - `installment` - Debt installment schedules
//! - `projection` - Compounding projections and their cache
//! - `budget` - Categories, subscriptions, variable spending, balance reconciliation
//! - `snapshot` - The derived financial snapshot and its source orchestration
//! - `insight` - Deterministic insight rules and optional enrichment
//! - `market` - Market rate provider seam

pub mod budget;
pub mod error;
pub mod income;
pub mod insight;
pub mod installment;
pub mod ledger;
pub mod market;
pub mod projection;
pub mod snapshot;

pub use error::ErrorClass;
