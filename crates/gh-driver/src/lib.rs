//! The per-security driver loop (§4.6): pulls snapshots from a
//! [`SnapshotSource`] and feeds them into [`gh_reconcile::reconcile`]
//! until a terminal condition — the historical replay is exhausted,
//! or (live mode) the exit-PnL threshold is crossed.
//!
//! One call to [`run`] owns exactly one [`StockState`] for its whole
//! lifetime; nothing here is shared across concurrent calls (see
//! `gh-batch` for the fan-out that runs many of these concurrently).

use std::sync::atomic::{AtomicBool, Ordering};

use gh_audit::{AuditWriter, TradingLogEntry};
use gh_decimal::{decimal, Decimal};
use gh_pnl::{apply_execution, finalize_realized_pnl, RealizedPnlError, Side};
use gh_reconcile::reconcile;
use gh_source::{SnapshotSource, SourceError};
use gh_state::StockState;

/// Exit-PnL thresholds used only in live mode (§4.6). Historical mode
/// uses `StockState::profit_threshold` directly (populated at config
/// time, possibly from `HISTORICAL_PROFIT_THRESHOLD`), so it needs no
/// separate config here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LiveThresholds {
    pub profit: Decimal,
    /// `None` means "no lower bound" — the `-infinity` default in
    /// spec.md §4.6, which a `Decimal` cannot represent directly.
    pub loss: Option<Decimal>,
}

impl Default for LiveThresholds {
    fn default() -> Self {
        LiveThresholds {
            profit: decimal!("0.005"),
            loss: None,
        }
    }
}

/// Which terminal-condition rule the driver loop applies (§4.6).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Runs until the snapshot source is exhausted; exit-PnL
    /// thresholds are not a termination condition.
    Historical,
    /// Runs until either the source is exhausted or the exit-PnL
    /// threshold check trips.
    Live(LiveThresholds),
}

/// A driver loop terminated abnormally. `Source` errors are §7 "I/O
/// errors" — the caller (`gh-batch`) logs and skips this security.
/// `Realized` can only happen from a driver bug (position wasn't
/// actually closed out before finalizing) and should be treated as
/// fatal.
#[derive(Debug)]
pub enum DriverError {
    Source(SourceError),
    Realized(RealizedPnlError),
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Source(e) => write!(f, "snapshot source error: {e}"),
            DriverError::Realized(e) => write!(f, "realized PnL finalization error: {e}"),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Source(e) => Some(e),
            DriverError::Realized(e) => Some(e),
        }
    }
}

/// Run the driver loop for one security to completion.
///
/// `cancel`, if given, is polled cooperatively at the top of every
/// iteration, before `source.next` — spec.md §5 "cancellation": a
/// reconcile step itself is never interrupted mid-flight. A cancelled
/// run returns `Ok(())` without closing out the position or
/// finalizing realized PnL, since it did not reach a real terminal
/// condition.
pub fn run(
    state: &mut StockState,
    source: &mut dyn SnapshotSource,
    mode: Mode,
    mut audit: Option<&mut AuditWriter>,
    cancel: Option<&AtomicBool>,
) -> Result<(), DriverError> {
    loop {
        if let Some(flag) = cancel {
            if flag.load(Ordering::Relaxed) {
                return Ok(());
            }
        }

        let snapshot = source.next(state).map_err(DriverError::Source)?;
        let position_before = state.position;

        let snapshot = reconcile(state, snapshot);

        if let Some(writer) = audit.as_deref_mut() {
            log_execution_if_any(state, &snapshot, position_before, writer);
        }

        if source.is_exhausted(state) {
            // Mark the final post-fill position before flattening it,
            // so the 0.25-milestone latch and its paired max-loss (read
            // by `gh_batch::is_profitable`) reflect this tick's fill.
            // `reconcile`'s Step 0 only marks on a snapshot change,
            // using the pre-fill position.
            gh_pnl::recompute_exit_pnl(state);

            let position_before_close = state.position;
            close_out_at_last_quote(state);
            if let Some(writer) = audit.as_deref_mut() {
                log_execution_if_any(state, &snapshot, position_before_close, writer);
            }
            finalize_realized_pnl(state).map_err(DriverError::Realized)?;
            source.release(state);
            return Ok(());
        }

        if let Mode::Live(thresholds) = mode {
            if exit_pnl_beyond_thresholds(state, thresholds) {
                source.release(state);
                return Ok(());
            }
        }
    }
}

/// §4.6 `exitPnLBeyondThresholds` for live mode.
fn exit_pnl_beyond_thresholds(state: &StockState, thresholds: LiveThresholds) -> bool {
    if state.exit_pnl_as_percentage >= thresholds.profit {
        return true;
    }
    if let Some(loss) = thresholds.loss {
        if state.exit_pnl_as_percentage <= loss {
            return true;
        }
    }
    false
}

/// Force the position flat at the last recorded quote, the way
/// spec.md §4.6 requires before finalizing realized PnL. A no-op if
/// already flat.
fn close_out_at_last_quote(state: &mut StockState) {
    if state.position == 0 {
        return;
    }

    let (side, price) = if state.position > 0 {
        (Side::Sell, state.last_bid)
    } else {
        (Side::Buy, state.last_ask)
    };

    let price = price.expect(
        "StockState has a nonzero position but no last quote recorded — invariant violation",
    );
    apply_execution(state, side, 0, price);
}

fn log_execution_if_any(
    state: &StockState,
    snapshot: &gh_state::Snapshot,
    position_before: i64,
    writer: &mut AuditWriter,
) {
    let delta = state.position - position_before;
    if delta == 0 {
        return;
    }

    let side = if delta > 0 { Side::Buy } else { Side::Sell };
    let fill_price = match side {
        Side::Buy => snapshot.ask,
        Side::Sell => snapshot.bid,
    };

    let entry = TradingLogEntry::new(
        state.brokerage_id.clone(),
        state.ticker.clone(),
        state.date.clone(),
        snapshot.timestamp.clone(),
        side,
        delta.abs(),
        fill_price,
        state.position,
        state.net_position_value,
    );

    if let Err(err) = writer.append(&entry) {
        tracing::warn!(ticker = %state.ticker, error = %err, "failed to append trading log entry");
    }
}
