use gh_state::{Snapshot, StockState};

use crate::error::SourceError;

/// The snapshot source boundary (§6): everything the reconciliation
/// engine's driver loop needs from a quote producer.
///
/// Implementations are free to own their own cursor/buffer state
/// keyed however they like; the driver loop only ever calls `next`,
/// `is_exhausted`, and `release` for exactly one `StockState` at a
/// time, in that relative order, from a single task.
///
/// `Send` is required so a source can be handed to a per-security
/// worker task in `gh-batch`'s fan-out; it is never `Sync`-shared,
/// matching §5 "no shared mutable state across tasks."
pub trait SnapshotSource: Send {
    /// Return the next quote for `state`'s security. For a historical
    /// replay source this advances a per-security cursor; for a live
    /// feed (out of scope here) it would block on the wire.
    fn next(&mut self, state: &StockState) -> Result<Snapshot, SourceError>;

    /// `true` once there is no more data to feed `state` (historical
    /// cursor at end-of-vector). Live/random sources that never run
    /// out return `false` always.
    fn is_exhausted(&self, state: &StockState) -> bool;

    /// Dispose of whatever buffer or cursor this source holds for
    /// `state`'s security. Called once the driver loop terminates.
    fn release(&mut self, state: &StockState);
}
