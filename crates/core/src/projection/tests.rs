//! Property-based tests for projection module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use moneta_shared::config::NegativeInputPolicy;

use super::engine::ProjectionEngine;
use super::types::ProjectionParams;

fn params(initial: i64, monthly: i64, months: i64, rate_bp: i64) -> ProjectionParams {
    ProjectionParams {
        initial_amount: Decimal::from(initial),
        monthly_amount: Decimal::from(monthly),
        months,
        annual_rate: Decimal::new(rate_bp, 4),
        asset_annual_return: None,
    }
}

proptest! {
    /// Feature: projection-engine, Property 1: Projection Length
    /// For any N >= 0, the series has exactly N entries numbered 1..=N
    #[test]
    fn test_projection_length(
        months in 0i64..=240,
        initial in 0i64..1_000_000,
        monthly in 0i64..10_000,
        rate_bp in 0i64..2_000,
    ) {
        let result = ProjectionEngine::compute(
            &params(initial, monthly, months, rate_bp),
            NegativeInputPolicy::Accept,
            600,
        ).unwrap();

        prop_assert_eq!(result.series.len() as i64, months);
        for (index, point) in result.series.iter().enumerate() {
            prop_assert_eq!(point.month as usize, index + 1);
        }
    }

    /// Feature: projection-engine, Property 2: Zero Rate Accumulation
    /// With a zero rate, month m holds initial + m * monthly
    #[test]
    fn test_zero_rate_is_linear(
        months in 1i64..=120,
        initial in 0i64..1_000_000,
        monthly in 0i64..10_000,
    ) {
        let result = ProjectionEngine::compute(
            &params(initial, monthly, months, 0),
            NegativeInputPolicy::Accept,
            600,
        ).unwrap();

        for point in &result.series {
            let expected = Decimal::from(initial) + Decimal::from(monthly) * Decimal::from(point.month);
            prop_assert_eq!(point.value, expected);
        }
    }

    /// Feature: projection-engine, Property 3: Monotonic Growth
    /// Non-negative contribution and rate never decrease the balance
    #[test]
    fn test_non_negative_inputs_are_monotonic(
        months in 1i64..=120,
        initial in 0i64..1_000_000,
        monthly in 0i64..10_000,
        rate_bp in 0i64..2_000,
    ) {
        let result = ProjectionEngine::compute(
            &params(initial, monthly, months, rate_bp),
            NegativeInputPolicy::Reject,
            600,
        ).unwrap();

        for pair in result.series.windows(2) {
            prop_assert!(pair[1].value >= pair[0].value);
        }
    }

    /// Feature: projection-engine, Property 4: Determinism
    /// Identical parameters produce identical results
    #[test]
    fn test_projection_is_deterministic(
        months in 0i64..=60,
        initial in 0i64..100_000,
        monthly in 0i64..5_000,
        rate_bp in 0i64..2_000,
    ) {
        let p = params(initial, monthly, months, rate_bp);
        let first = ProjectionEngine::compute(&p, NegativeInputPolicy::Accept, 600).unwrap();
        let second = ProjectionEngine::compute(&p, NegativeInputPolicy::Accept, 600).unwrap();
        prop_assert_eq!(first, second);
    }
}
