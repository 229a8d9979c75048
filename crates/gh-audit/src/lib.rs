//! Optional, append-only trading log (Design Notes "Trading logs"):
//! one JSON Lines record per execution the reconciliation engine
//! books. Not required for correctness — spec.md explicitly calls
//! this optional external telemetry — so every call site takes an
//! `Option<&mut AuditWriter>` and omitting it costs nothing.
//!
//! Unlike the teacher's `mqk-audit`, this log carries no hash chain:
//! spec.md doesn't call for tamper-evidence on a record that exists
//! purely for human debugging of a single simulation run.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use gh_decimal::Decimal;
use gh_pnl::Side;
use serde::{Deserialize, Serialize};

/// One executed reconciliation: a BUY or SELL that moved `position`,
/// recorded after the engine has already applied it to `StockState`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradingLogEntry {
    pub brokerage_id: String,
    pub ticker: String,
    pub date: String,
    pub timestamp: String,
    pub side: String,
    pub quantity: i64,
    pub fill_price: Decimal,
    pub position_after: i64,
    pub net_position_value_after: Decimal,
}

impl TradingLogEntry {
    pub fn new(
        brokerage_id: impl Into<String>,
        ticker: impl Into<String>,
        date: impl Into<String>,
        timestamp: impl Into<String>,
        side: Side,
        quantity: i64,
        fill_price: Decimal,
        position_after: i64,
        net_position_value_after: Decimal,
    ) -> Self {
        TradingLogEntry {
            brokerage_id: brokerage_id.into(),
            ticker: ticker.into(),
            date: date.into(),
            timestamp: timestamp.into(),
            side: side.to_string(),
            quantity,
            fill_price,
            position_after,
            net_position_value_after,
        }
    }
}

/// An I/O failure writing an entry. This is telemetry, not control
/// flow — callers should log and continue, never abort a run over it.
#[derive(Debug)]
pub struct AuditWriteError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl fmt::Display for AuditWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "writing trading log {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for AuditWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Append-only JSON Lines writer for [`TradingLogEntry`] records.
pub struct AuditWriter {
    path: PathBuf,
}

impl AuditWriter {
    /// Opens (creating parent directories as needed) a trading log at
    /// `path`. Entries are always appended, never truncated.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, AuditWriteError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| AuditWriteError {
                path: path.clone(),
                source,
            })?;
        }
        Ok(AuditWriter { path })
    }

    /// Append one entry as a single JSON line.
    pub fn append(&mut self, entry: &TradingLogEntry) -> Result<(), AuditWriteError> {
        let line = serde_json::to_string(entry).expect("TradingLogEntry serialization must not fail");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| AuditWriteError {
                path: self.path.clone(),
                source,
            })?;

        writeln!(file, "{line}").map_err(|source| AuditWriteError {
            path: self.path.clone(),
            source,
        })
    }
}
