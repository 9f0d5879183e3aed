//! The derived financial snapshot and its orchestration.
//!
//! [`SnapshotCalculator::compute`] is a pure function of its inputs; the
//! [`SnapshotOrchestrator`] tracks each upstream source, discards stale
//! completions and recomputes only when something changed.

pub mod compute;
pub mod orchestrator;
pub mod types;


pub use compute::SnapshotCalculator;
pub use orchestrator::{
    Completion, Generation, SnapshotOrchestrator, SourceData, SourceError, SourceKind,
    SourceSlot, SourceState,
};
pub use types::{Snapshot, SnapshotInputs, SnapshotSettings, SnapshotStatus};
