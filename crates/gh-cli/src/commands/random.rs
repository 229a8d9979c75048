//! `gh random`: drive one synthetic ticker against
//! [`gh_source::RandomWalkSource`] for local exercising of the
//! reconciliation engine without any real market data (§6, debug
//! source).

use std::path::PathBuf;

use anyhow::{Context, Result};
use gh_audit::AuditWriter;
use gh_decimal::Decimal;
use gh_driver::{LiveThresholds, Mode};
use gh_source::RandomWalkSource;
use gh_state::PartialStockState;

pub struct RandomArgs {
    pub ticker: String,
    pub date: String,
    pub brokerage_id: String,
    pub seed: u64,
    pub initial_price: Decimal,
    pub shares_per_interval: i64,
    pub target_position: i64,
    pub space_between_intervals: Decimal,
    pub interval_profit: Decimal,
    pub brokerage_trading_cost_per_share: Decimal,
    pub profit_threshold: Decimal,
    pub loss_threshold: Decimal,
    pub is_static_intervals: bool,
    pub audit_log: Option<PathBuf>,
}

pub fn run(args: RandomArgs) -> Result<()> {
    let partial = PartialStockState {
        brokerage_trading_cost_per_share: Some(args.brokerage_trading_cost_per_share),
        shares_per_interval: Some(args.shares_per_interval),
        target_position: Some(args.target_position),
        space_between_intervals: Some(args.space_between_intervals),
        interval_profit: Some(args.interval_profit),
        num_contracts: None,
        initial_price: Some(args.initial_price),
        profit_threshold: Some(args.profit_threshold),
        loss_threshold: Some(args.loss_threshold),
        is_static_intervals: Some(args.is_static_intervals),
    };

    let mut state = gh_state::build_stock_state(
        &partial,
        &args.brokerage_id,
        &args.date,
        &args.ticker,
        args.initial_price,
    )
    .context("invalid random-walk configuration")?;

    let mut source = RandomWalkSource::with_defaults(args.seed, args.initial_price);

    let mut writer = match &args.audit_log {
        Some(path) => Some(AuditWriter::new(path).with_context(|| {
            format!("opening audit log {}", path.display())
        })?),
        None => None,
    };

    let mode = Mode::Live(LiveThresholds {
        profit: args.profit_threshold,
        loss: Some(args.loss_threshold),
    });

    gh_driver::run(&mut state, &mut source, mode, writer.as_mut(), None)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("ticker={}", state.ticker);
    println!("position={}", state.position);
    println!("exitPnL%={}", state.exit_pnl_as_percentage);
    println!(
        "realizedPnL%={}",
        state
            .realized_pnl_as_percentage
            .map(|d| d.to_string())
            .unwrap_or_else(|| "n/a".to_string())
    );

    Ok(())
}
