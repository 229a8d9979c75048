//! Net-position-value bookkeeping, mark-to-market exit PnL, profit
//! milestones, and realized-PnL finalization.
//!
//! This crate is pure: every function here takes a `&mut StockState`
//! and a handful of scalars, and never touches a clock, a file, or a
//! network socket. The reconciliation engine (`gh-reconcile`) is the
//! only caller.

mod exit_pnl;
mod net_position;
mod realized;
mod side;

pub use exit_pnl::recompute_exit_pnl;
pub use net_position::apply_execution;
pub use realized::{finalize_realized_pnl, RealizedPnlError};
pub use side::Side;
