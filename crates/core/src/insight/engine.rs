//! Insight engine: runs every registered rule and ranks the results.

use chrono::NaiveDate;
use tracing::debug;

use super::rules::{
    GoalPaceRule, GoalProgressRule, HighInstallmentRule, IncomeConcentrationRule,
    InvestmentNearGoalRule,
};
use super::types::{InsightKind, InsightRecord, InsightThresholds};
use crate::income::IncomeSource;
use crate::ledger::Obligation;
use crate::market::MarketRates;

/// Data the rules evaluate.
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs<'a> {
    /// Income sources.
    pub income_sources: &'a [IncomeSource],
    /// Goals, debts and investments.
    pub obligations: &'a [Obligation],
    /// Market rates; investment rules are skipped without them.
    pub market_rates: Option<&'a MarketRates>,
    /// Evaluation date.
    pub as_of: NaiveDate,
    /// Horizon for investment projections.
    pub projection_horizon_months: u32,
}

/// A deterministic insight rule.
pub trait InsightRule: Send + Sync {
    /// Rule identifier.
    fn kind(&self) -> InsightKind;

    /// Produces the rule's insights, in input order.
    fn evaluate(
        &self,
        inputs: &InsightInputs<'_>,
        thresholds: &InsightThresholds,
    ) -> Vec<InsightRecord>;
}

/// Runs the registered rules.
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
    thresholds: InsightThresholds,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new(InsightThresholds::default())
    }
}

impl InsightEngine {
    /// Creates an engine with the built-in rules.
    #[must_use]
    pub fn new(thresholds: InsightThresholds) -> Self {
        let mut engine = Self {
            rules: vec![],
            thresholds,
        };

        engine.register(Box::new(GoalProgressRule));
        engine.register(Box::new(GoalPaceRule));
        engine.register(Box::new(HighInstallmentRule));
        engine.register(Box::new(InvestmentNearGoalRule));
        engine.register(Box::new(IncomeConcentrationRule));

        engine
    }

    /// Registers an additional rule, evaluated after the existing ones.
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Thresholds in use.
    #[must_use]
    pub const fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    /// Evaluates every rule and ranks the results, most severe first.
    ///
    /// The sort is stable, so ties keep rule registration order and then
    /// input order. Unchanged inputs always give an identical list.
    #[must_use]
    pub fn evaluate(&self, inputs: &InsightInputs<'_>) -> Vec<InsightRecord> {
        let mut records = Vec::new();

        for rule in &self.rules {
            let found = rule.evaluate(inputs, &self.thresholds);
            debug!(rule = %rule.kind(), count = found.len(), "Insight rule evaluated");
            records.extend(found);
        }

        records.sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));
        records
    }
}
