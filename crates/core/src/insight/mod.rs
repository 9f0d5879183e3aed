//! Insight Rule Engine.
//!
//! Evaluates deterministic threshold rules over the ledger and income
//! sources and returns a ranked list of insight records. Every matching rule
//! fires; nothing short-circuits.
//!
//! ## Rules
//!
//! - **Goal progress** - goal at or above the progress threshold
//! - **Goal pace** - goal behind schedule (warning, escalating to danger)
//! - **High installment** - next pending installment is a large share of the debt
//! - **Investment near goal** - investment projected to reach its target soon
//! - **Income** - no income source, or a single one
//!
//! An optional [`EnrichmentService`] can add narrative text; it never blocks
//! or replaces the deterministic list.

pub mod engine;
pub mod enrichment;
pub mod rules;
pub mod types;


pub use engine::{InsightEngine, InsightInputs, InsightRule};
pub use enrichment::{
    EnrichedInsights, EnrichmentContext, EnrichmentError, EnrichmentService, enrich,
};
pub use rules::{
    GoalPaceRule, GoalProgressRule, HighInstallmentRule, IncomeConcentrationRule,
    InvestmentNearGoalRule,
};
pub use types::{InsightKind, InsightRecord, InsightThresholds, Severity};
