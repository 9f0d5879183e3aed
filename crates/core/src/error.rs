//! Failure taxonomy shared by the engine's error types.

use serde::Serialize;

/// Coarse classification of an engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Malformed or out-of-range caller input; rejected locally.
    Input,
    /// An upstream source failed or has not loaded yet.
    PartialData,
    /// A computation could not produce a value.
    Computation,
    /// An operation would break an ownership or all-or-nothing invariant.
    AtomicityViolation,
}
