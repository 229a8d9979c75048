mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gh")]
#[command(about = "Grid-hedging stop-loss arbitrage simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a directory of per-security-day historical files (§6).
    Run {
        /// Directory containing one `.json` file per security.
        #[arg(long)]
        dir: PathBuf,

        /// Trading date shared by every file in `--dir`.
        #[arg(long)]
        date: String,

        /// Brokerage identifier recorded on every built `StockState`.
        #[arg(long, default_value = "ALPACA")]
        brokerage_id: String,
    },

    /// Run one synthetic ticker against a deterministic random walk.
    Random {
        #[arg(long, default_value = "DEBUG")]
        ticker: String,

        #[arg(long, default_value = "2024-01-02")]
        date: String,

        #[arg(long, default_value = "ALPACA")]
        brokerage_id: String,

        /// Seed for the deterministic random walk.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long, default_value = "100.00")]
        initial_price: String,

        #[arg(long, default_value_t = 100)]
        shares_per_interval: i64,

        #[arg(long, default_value_t = 500)]
        target_position: i64,

        #[arg(long, default_value = "0.05")]
        space_between_intervals: String,

        #[arg(long, default_value = "0.03")]
        interval_profit: String,

        #[arg(long, default_value = "0.005")]
        brokerage_trading_cost_per_share: String,

        #[arg(long, default_value = "0.005")]
        profit_threshold: String,

        #[arg(long, default_value = "-0.5")]
        loss_threshold: String,

        #[arg(long, default_value_t = false)]
        is_static_intervals: bool,

        /// Optional path to append a JSON-Lines trading log to.
        #[arg(long)]
        audit_log: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    commands::init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Run {
            dir,
            date,
            brokerage_id,
        } => commands::run::run(commands::run::RunArgs {
            dir,
            date,
            brokerage_id,
        }),

        Commands::Random {
            ticker,
            date,
            brokerage_id,
            seed,
            initial_price,
            shares_per_interval,
            target_position,
            space_between_intervals,
            interval_profit,
            brokerage_trading_cost_per_share,
            profit_threshold,
            loss_threshold,
            is_static_intervals,
            audit_log,
        } => commands::random::run(commands::random::RandomArgs {
            ticker,
            date,
            brokerage_id,
            seed,
            initial_price: parse_decimal(&initial_price)?,
            shares_per_interval,
            target_position,
            space_between_intervals: parse_decimal(&space_between_intervals)?,
            interval_profit: parse_decimal(&interval_profit)?,
            brokerage_trading_cost_per_share: parse_decimal(&brokerage_trading_cost_per_share)?,
            profit_threshold: parse_decimal(&profit_threshold)?,
            loss_threshold: parse_decimal(&loss_threshold)?,
            is_static_intervals,
            audit_log,
        }),
    }
}

fn parse_decimal(raw: &str) -> Result<gh_decimal::Decimal> {
    gh_decimal::Decimal::parse_str(raw)
        .map_err(|e| anyhow::anyhow!("invalid decimal {raw:?}: {e}"))
}
