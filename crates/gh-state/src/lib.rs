//! Per-security state: the `Snapshot` a quote source hands the engine,
//! the `PartialStockState` configuration bag it's built from, and the
//! `StockState` the reconciliation engine mutates in place.
//!
//! One `StockState` is owned by exactly one driver task, from
//! construction to completion (see `gh-driver`); nothing here is
//! shared across tasks.

mod error;
mod factory;
mod milestone;
mod types;

pub use error::ConfigError;
pub use factory::build_stock_state;
pub use milestone::{fresh_milestones, Milestone, MILESTONE_THRESHOLDS};
pub use types::{PartialStockState, Snapshot, StockState};
