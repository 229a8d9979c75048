//! The batch driver (§4.7): fans a collection of independent
//! security-day simulations out across a thread pool and aggregates
//! `{numStocks, numProfitable}` once every task has joined.
//!
//! Fan-out is two-level, mirroring `original_source`'s
//! `std::async(launch::async, ...)` per-stock dispatch in `start.cpp`
//! (`StartStopLossArbCpp`/`HedgeStockWhileMarketIsOpen`):
//!
//! - a top-level list of independent *date groups* runs in parallel
//!   via `rayon`; each group processes its own dates **sequentially**,
//! - within one date, every security runs in parallel — no two tasks
//!   ever touch the same `StockState`.

use gh_decimal::{decimal, Decimal};
use gh_driver::{DriverError, Mode};
use gh_source::SnapshotSource;
use gh_state::StockState;
use rayon::prelude::*;

/// One security-day unit of work: an already-built state, the quote
/// source it owns for the run, and which driver mode to run it in.
pub struct SecurityTask {
    pub ticker: String,
    pub date: String,
    pub state: StockState,
    pub source: Box<dyn SnapshotSource>,
    pub mode: Mode,
}

/// All the security-day tasks for one trading date, run in parallel
/// against each other (never against a task from another date in the
/// same group — see [`run_batch`]).
pub struct DateBatch {
    pub date: String,
    pub tasks: Vec<SecurityTask>,
}

/// Outcome of one finished (or failed) security-day task.
pub struct SecurityOutcome {
    pub ticker: String,
    pub date: String,
    pub result: Result<StockState, DriverError>,
}

/// A security-day task that could not be run to completion (§7 "I/O
/// errors" — logged, the security is skipped, the aggregate count is
/// adjusted accordingly).
pub struct SecurityFailure {
    pub ticker: String,
    pub date: String,
    pub error: String,
}

/// A finished security's PnL summary, kept around so a caller can
/// print per-security results when `PRINT_PNL_VALUES` is set (§6) —
/// the aggregate counts above don't carry enough detail for that.
pub struct SecurityPnlLine {
    pub ticker: String,
    pub date: String,
    pub exit_pnl_as_percentage: Decimal,
    pub realized_pnl_as_percentage: Option<Decimal>,
}

/// Aggregate result of a full batch run.
pub struct BatchReport {
    pub num_stocks: usize,
    pub num_profitable: usize,
    pub failures: Vec<SecurityFailure>,
    pub pnl_lines: Vec<SecurityPnlLine>,
}

/// The lowest profit milestone (§8 "Milestone watermarks"), used as
/// the "became profitable at all" signal for §4.7's aggregate report.
/// Resolved this way because `profitThreshold` is an arbitrary
/// per-security value that need not coincide with one of the eight
/// fixed milestone thresholds — see DESIGN.md.
const PROFITABILITY_MILESTONE: &str = "0.25";

/// §4.7: a security counts as profitable once it reached the lowest
/// milestone threshold without its drawdown-at-that-moment exceeding
/// the security's own configured `lossThreshold`.
pub fn is_profitable(state: &StockState) -> bool {
    let milestone_threshold: Decimal = decimal!(PROFITABILITY_MILESTONE);
    state
        .milestones
        .iter()
        .any(|m| m.threshold == milestone_threshold && m.reached && m.max_loss_when_reached > state.loss_threshold)
}

/// Run every security in `batch` in parallel, returning one outcome
/// per task (success or [`DriverError`]).
fn run_date_batch(batch: DateBatch) -> Vec<SecurityOutcome> {
    batch
        .tasks
        .into_par_iter()
        .map(|mut task| {
            let span = tracing::info_span!("security_day", ticker = %task.ticker, date = %task.date);
            let _guard = span.enter();

            let result = gh_driver::run(&mut task.state, &mut *task.source, task.mode, None, None)
                .map(|()| task.state);

            if let Err(err) = &result {
                tracing::warn!(ticker = %task.ticker, date = %task.date, error = %err, "security-day task failed");
            }

            SecurityOutcome {
                ticker: task.ticker,
                date: task.date,
                result,
            }
        })
        .collect()
}

/// Run a list of dates sequentially, collecting every security-day
/// outcome across all of them.
fn run_date_group(dates: Vec<DateBatch>) -> Vec<SecurityOutcome> {
    let mut outcomes = Vec::new();
    for batch in dates {
        outcomes.extend(run_date_batch(batch));
    }
    outcomes
}

/// Run a batch of independent date groups, each group's dates
/// sequential internally but every group running in parallel with
/// every other group, and aggregate the result.
pub fn run_batch(date_groups: Vec<Vec<DateBatch>>) -> BatchReport {
    let outcomes: Vec<SecurityOutcome> = date_groups
        .into_par_iter()
        .flat_map(run_date_group)
        .collect();

    let mut report = BatchReport {
        num_stocks: 0,
        num_profitable: 0,
        failures: Vec::new(),
        pnl_lines: Vec::new(),
    };

    for outcome in outcomes {
        report.num_stocks += 1;
        match outcome.result {
            Ok(state) => {
                if is_profitable(&state) {
                    report.num_profitable += 1;
                }
                report.pnl_lines.push(SecurityPnlLine {
                    ticker: outcome.ticker,
                    date: outcome.date,
                    exit_pnl_as_percentage: state.exit_pnl_as_percentage,
                    realized_pnl_as_percentage: state.realized_pnl_as_percentage,
                });
            }
            Err(err) => {
                report.failures.push(SecurityFailure {
                    ticker: outcome.ticker,
                    date: outcome.date,
                    error: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        num_stocks = report.num_stocks,
        num_profitable = report.num_profitable,
        num_failures = report.failures.len(),
        "batch run complete"
    );

    report
}
