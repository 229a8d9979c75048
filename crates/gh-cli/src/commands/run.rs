//! `gh run`: replay a directory of per-security-day historical files
//! (§6) through the batch driver and print the aggregate result.
//!
//! Each file in `--dir` is both the historical quote tape
//! ([`gh_source::HistoricalSource`]'s `"snapshots"` array) and that
//! security's `PartialStockState` configuration — [`gh_config`]
//! ignores the quote keys, [`gh_source`] ignores the config keys, so
//! one file covers both without either crate knowing about the other.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gh_batch::{BatchReport, DateBatch, SecurityTask};
use gh_driver::Mode;
use gh_source::HistoricalSource;

pub struct RunArgs {
    pub dir: PathBuf,
    pub date: String,
    pub brokerage_id: String,
}

pub fn run(args: RunArgs) -> Result<()> {
    let files = historical_files(&args.dir)
        .with_context(|| format!("listing {}", args.dir.display()))?;

    if files.is_empty() {
        anyhow::bail!("no .json files found in {}", args.dir.display());
    }

    let mut tasks = Vec::with_capacity(files.len());
    for path in files {
        match build_task(&path, &args.date, &args.brokerage_id) {
            Ok(task) => tasks.push(task),
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "skipping security-day file");
            }
        }
    }

    if tasks.is_empty() {
        anyhow::bail!("every historical file in {} failed to load", args.dir.display());
    }

    let report = gh_batch::run_batch(vec![vec![DateBatch {
        date: args.date.clone(),
        tasks,
    }]]);

    print_report(&report);

    Ok(())
}

fn build_task(path: &Path, date: &str, brokerage_id: &str) -> Result<SecurityTask> {
    let source = HistoricalSource::load(path)
        .with_context(|| format!("loading historical quotes from {}", path.display()))?;
    let initial_ask = source
        .first_ask()
        .with_context(|| format!("{} has no snapshots", path.display()))?;

    let ticker = source
        .ticker()
        .map(str::to_string)
        .unwrap_or_else(|| file_stem(path));

    let partial = gh_config::load_json(path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    let state = gh_state::build_stock_state(&partial, brokerage_id, date, &ticker, initial_ask)
        .with_context(|| format!("{} has an invalid configuration", path.display()))?;

    Ok(SecurityTask {
        ticker,
        date: date.to_string(),
        state,
        source: Box::new(source),
        mode: Mode::Historical,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

fn historical_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    files.sort();
    Ok(files)
}

fn print_report(report: &BatchReport) {
    if gh_config::print_pnl_values_enabled() {
        for line in &report.pnl_lines {
            match line.realized_pnl_as_percentage {
                Some(realized) => println!(
                    "{} {} exitPnL%={} realizedPnL%={}",
                    line.ticker, line.date, line.exit_pnl_as_percentage, realized
                ),
                None => println!(
                    "{} {} exitPnL%={}",
                    line.ticker, line.date, line.exit_pnl_as_percentage
                ),
            }
        }
    }

    println!("num_stocks={}", report.num_stocks);
    println!("num_profitable={}", report.num_profitable);
    println!("num_failures={}", report.failures.len());
    for failure in &report.failures {
        println!("failed ticker={} date={} error={}", failure.ticker, failure.date, failure.error);
    }
}
