//! Application configuration management.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Planner (aggregation engine) configuration.
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Insight rule thresholds.
    #[serde(default)]
    pub insights: InsightConfig,
    /// Market rates fed into projections.
    #[serde(default)]
    pub market: MarketConfig,
    /// Optional text enrichment service.
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// What to do with an income source whose frequency is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFrequencyPolicy {
    /// Exclude the source from totals and keep going.
    #[default]
    Skip,
    /// Fail the whole aggregation.
    Throw,
}

/// Whether negative contributions or rates are valid projection inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeInputPolicy {
    /// Accept them (withdrawals, negative real rates).
    #[default]
    Accept,
    /// Reject them as invalid input.
    Reject,
}

/// Planner configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    /// Currency every amount is expressed in.
    #[serde(default)]
    pub currency: Currency,
    /// IANA timezone used to decide what "today" and "this month" are.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Policy for income sources with an unknown frequency.
    #[serde(default)]
    pub on_unknown_frequency: UnknownFrequencyPolicy,
    /// Policy for negative projection inputs.
    #[serde(default)]
    pub negative_projection_inputs: NegativeInputPolicy,
    /// Longest horizon searched when estimating months to an investment goal.
    #[serde(default = "default_projection_horizon")]
    pub projection_horizon_months: u32,
    /// Maximum number of cached projection results.
    #[serde(default = "default_cache_capacity")]
    pub projection_cache_capacity: u64,
    /// Time-to-live for cached projection results.
    #[serde(default = "default_cache_ttl")]
    pub projection_cache_ttl_secs: u64,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_projection_horizon() -> u32 {
    600 // 50 years
}

fn default_cache_capacity() -> u64 {
    256
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            timezone: default_timezone(),
            on_unknown_frequency: UnknownFrequencyPolicy::default(),
            negative_projection_inputs: NegativeInputPolicy::default(),
            projection_horizon_months: default_projection_horizon(),
            projection_cache_capacity: default_cache_capacity(),
            projection_cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl PlannerConfig {
    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone is not a valid IANA name.
    pub fn tz(&self) -> Result<Tz, config::ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| config::ConfigError::Message(format!("invalid timezone: {e}")))
    }

    /// Today's date in the configured timezone, falling back to UTC.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self.tz() {
            Ok(tz) => Utc::now().with_timezone(&tz).date_naive(),
            Err(_) => Utc::now().date_naive(),
        }
    }
}

/// Insight rule thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightConfig {
    /// Goal progress (percent) at or above which a positive insight fires.
    #[serde(default = "default_goal_progress")]
    pub goal_progress_percent: Decimal,
    /// Pace (months) below which a goal is flagged as a warning.
    #[serde(default = "default_behind_warning")]
    pub behind_warning_months: Decimal,
    /// Pace (months) below which the warning escalates to danger.
    #[serde(default = "default_behind_danger")]
    pub behind_danger_months: Decimal,
    /// Installment size, as percent of the debt target, above which it is flagged.
    #[serde(default = "default_high_installment")]
    pub high_installment_percent: Decimal,
    /// Investments projected to reach their target within this many months are celebrated.
    #[serde(default = "default_near_goal")]
    pub investment_near_goal_months: u32,
}

fn default_goal_progress() -> Decimal {
    Decimal::from(70)
}

fn default_behind_warning() -> Decimal {
    Decimal::from(-1)
}

fn default_behind_danger() -> Decimal {
    Decimal::from(-3)
}

fn default_high_installment() -> Decimal {
    Decimal::from(20)
}

fn default_near_goal() -> u32 {
    3
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            goal_progress_percent: default_goal_progress(),
            behind_warning_months: default_behind_warning(),
            behind_danger_months: default_behind_danger(),
            high_installment_percent: default_high_installment(),
            investment_near_goal_months: default_near_goal(),
        }
    }
}

/// Market rate configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketConfig {
    /// Reference annual rate (e.g. 0.1075 for 10.75%).
    #[serde(default)]
    pub reference_annual_rate: Decimal,
    /// Optional annual return of the invested asset, added on top of the reference rate.
    #[serde(default)]
    pub asset_annual_return: Option<Decimal>,
}

/// Enrichment service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    /// Whether enrichment is attempted at all.
    #[serde(default)]
    pub enabled: bool,
    /// Endpoint receiving the enrichment context.
    #[serde(default)]
    pub url: Option<String>,
    /// Model name forwarded to the endpoint.
    #[serde(default)]
    pub model: Option<String>,
    /// Hard timeout for one enrichment call.
    #[serde(default = "default_enrichment_timeout")]
    pub timeout_ms: u64,
}

fn default_enrichment_timeout() -> u64 {
    3000
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: None,
            model: None,
            timeout_ms: default_enrichment_timeout(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MONETA").separator("__"))
            .build()?;

        let app: Self = config.try_deserialize()?;
        app.planner.tz()?;
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        temp_env::with_vars_unset(
            ["MONETA__SERVER__PORT", "MONETA__PLANNER__TIMEZONE"],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.planner.timezone, "UTC");
                assert_eq!(
                    config.planner.on_unknown_frequency,
                    UnknownFrequencyPolicy::Skip
                );
                assert_eq!(config.insights.goal_progress_percent, Decimal::from(70));
                assert!(!config.enrichment.enabled);
            },
        );
    }

    #[test]
    fn test_load_from_env() {
        temp_env::with_vars(
            [
                ("MONETA__SERVER__PORT", Some("9090")),
                ("MONETA__PLANNER__TIMEZONE", Some("America/Sao_Paulo")),
                ("MONETA__PLANNER__ON_UNKNOWN_FREQUENCY", Some("throw")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.planner.tz().unwrap(), chrono_tz::America::Sao_Paulo);
                assert_eq!(
                    config.planner.on_unknown_frequency,
                    UnknownFrequencyPolicy::Throw
                );
            },
        );
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        temp_env::with_var("MONETA__PLANNER__TIMEZONE", Some("Mars/Olympus"), || {
            assert!(AppConfig::load().is_err());
        });
    }
}
