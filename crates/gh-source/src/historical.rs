use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use gh_decimal::Decimal;
use gh_state::{Snapshot, StockState};
use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::source::SnapshotSource;

/// A malformed or unreadable historical file (§7 "I/O errors" at the
/// `SnapshotSource` boundary). Construction-time only; `HistoricalSource`
/// itself never fails once built.
#[derive(Debug)]
pub enum HistoricalFileError {
    Io { path: PathBuf, source: std::io::Error },
    InvalidJson { path: PathBuf, reason: String },
    MissingSnapshots { path: PathBuf },
}

impl fmt::Display for HistoricalFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoricalFileError::Io { path, source } => {
                write!(f, "reading {}: {source}", path.display())
            }
            HistoricalFileError::InvalidJson { path, reason } => {
                write!(f, "parsing {}: {reason}", path.display())
            }
            HistoricalFileError::MissingSnapshots { path } => {
                write!(f, "{}: missing or non-array \"snapshots\" key", path.display())
            }
        }
    }
}

impl std::error::Error for HistoricalFileError {}

/// Historical replay (§6): a preloaded, per-security vector of
/// snapshots advanced by a cursor, backed by one file on disk in the
/// format spec.md §6 describes:
///
/// ```json
/// {"snapshots": [{"ask": 10.05, "bid": 10.04, "timestamp": "..."}],
///  "ticker": "ACME", "raw_time_steps": [...]}
/// ```
///
/// `next`/`is_exhausted` walk the preloaded vector; `release` writes
/// the milestone/PnL well-known keys spec.md §6 names back into the
/// original JSON document and persists it to `path`. Each instance
/// owns exactly one security's file — no cache is shared across
/// instances, matching the "explicit collaborator" resolution in
/// SPEC_FULL.md's Design Notes.
pub struct HistoricalSource {
    path: PathBuf,
    document: Value,
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl HistoricalSource {
    /// Load and parse a historical file from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HistoricalFileError> {
        let path = path.as_ref().to_path_buf();
        let raw = fs::read_to_string(&path).map_err(|source| HistoricalFileError::Io {
            path: path.clone(),
            source,
        })?;
        Self::parse(path, &raw)
    }

    /// Parse an already-read historical document. Exposed separately
    /// from [`HistoricalSource::load`] so tests and in-memory callers
    /// don't need a real file on disk.
    pub fn parse(path: PathBuf, raw: &str) -> Result<Self, HistoricalFileError> {
        let document: Value =
            serde_json::from_str(raw).map_err(|e| HistoricalFileError::InvalidJson {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let snapshots_value = document
            .get("snapshots")
            .and_then(Value::as_array)
            .ok_or_else(|| HistoricalFileError::MissingSnapshots { path: path.clone() })?;

        let mut snapshots = Vec::with_capacity(snapshots_value.len());
        for entry in snapshots_value {
            let ask = entry
                .get("ask")
                .and_then(Value::as_f64)
                .ok_or_else(|| HistoricalFileError::InvalidJson {
                    path: path.clone(),
                    reason: "snapshot missing numeric \"ask\"".to_string(),
                })?;
            let bid = entry
                .get("bid")
                .and_then(Value::as_f64)
                .ok_or_else(|| HistoricalFileError::InvalidJson {
                    path: path.clone(),
                    reason: "snapshot missing numeric \"bid\"".to_string(),
                })?;
            let timestamp = entry
                .get("timestamp")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            snapshots.push(Snapshot::new(
                Decimal::parse_str(&format!("{ask}")).map_err(|e| HistoricalFileError::InvalidJson {
                    path: path.clone(),
                    reason: e.to_string(),
                })?,
                Decimal::parse_str(&format!("{bid}")).map_err(|e| HistoricalFileError::InvalidJson {
                    path: path.clone(),
                    reason: e.to_string(),
                })?,
                timestamp,
            ));
        }

        Ok(HistoricalSource {
            path,
            document,
            snapshots,
            cursor: 0,
        })
    }

    /// Number of snapshots remaining, including the one `next` would
    /// hand out right now.
    pub fn remaining(&self) -> usize {
        self.snapshots.len().saturating_sub(self.cursor)
    }

    /// The ask price of the first snapshot in the file, if any — the
    /// `initial_ask_price` a caller needs before it can build the
    /// `StockState` this source will drive (§4.2 ladder construction
    /// centers on the first observed price).
    pub fn first_ask(&self) -> Option<Decimal> {
        self.snapshots.first().map(|s| s.ask)
    }

    /// The `"ticker"` field of the document, if present.
    pub fn ticker(&self) -> Option<&str> {
        self.document.get("ticker").and_then(Value::as_str)
    }

    fn write_well_known_keys(&mut self, state: &StockState) {
        let obj = match self.document.as_object_mut() {
            Some(obj) => obj,
            None => return,
        };

        put_decimal(
            obj,
            "max_moving_profit_as_percentage",
            state.max_moving_profit_as_percentage,
        );
        put_decimal(
            obj,
            "max_moving_loss_as_percentage",
            state.max_moving_loss_as_percentage,
        );

        for milestone in &state.milestones {
            let t = milestone.threshold;
            obj.insert(
                format!("reached_{t}_percentage_profit"),
                Value::Bool(milestone.reached),
            );
            obj.insert(
                format!("max_loss_when_reached_{t}_percentage_profit"),
                Value::String(milestone.max_loss_when_reached.to_string()),
            );
        }

        if let Some(realized) = state.realized_pnl_as_percentage {
            put_decimal(obj, "realized_pnl_as_percentage", realized);
        }
    }
}

fn put_decimal(obj: &mut Map<String, Value>, key: &str, value: Decimal) {
    obj.insert(key.to_string(), Value::String(value.to_string()));
}

impl SnapshotSource for HistoricalSource {
    fn next(&mut self, _state: &StockState) -> Result<Snapshot, SourceError> {
        match self.snapshots.get(self.cursor) {
            Some(snapshot) => {
                self.cursor += 1;
                Ok(*snapshot)
            }
            None => Err(SourceError::Exhausted),
        }
    }

    fn is_exhausted(&self, _state: &StockState) -> bool {
        self.cursor >= self.snapshots.len()
    }

    /// Write the milestone/PnL well-known keys back into the document
    /// and persist it to `path`. A write failure here is a best-effort
    /// side channel (§7 telemetry), not a fatal error for the caller,
    /// so it is logged by the driver rather than propagated.
    fn release(&mut self, state: &StockState) {
        self.write_well_known_keys(state);
        if let Ok(serialized) = serde_json::to_string_pretty(&self.document) {
            let _ = fs::write(&self.path, serialized);
        }
    }
}
