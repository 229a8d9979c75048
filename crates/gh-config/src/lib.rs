//! Configuration loading (§6, §7): builds a [`gh_state::StockState`]
//! from a JSON or layered-YAML `PartialStockState` document, plus the
//! environment-variable overrides (`HISTORICAL_PROFIT_THRESHOLD`,
//! `PRINT_PNL_VALUES`) the ambient CLI layer reads at startup.
//!
//! Modeled on `mqk-config`'s layered-YAML loader; unlike that crate,
//! nothing here computes a config fingerprint — there is no downstream
//! consumer (no hash-chained audit log) that needs one.

mod env;
mod error;
mod layered;

pub use env::{
    default_historical_profit_threshold, historical_profit_threshold_from_env,
    print_pnl_values_enabled,
};
pub use error::ConfigError;
pub use layered::{load_json, load_layered_yaml};

use std::path::Path;

use gh_decimal::Decimal;
use gh_state::{build_stock_state, PartialStockState, StockState};

/// Load a `PartialStockState` from `path` (JSON or YAML, by
/// extension) and build a [`StockState`] from it in one step.
///
/// `initial_ask_price` is the first ask seen for this security-day,
/// used as `StockState::initial_price` unless the document already
/// names one explicitly.
pub fn load_stock_state(
    path: impl AsRef<Path>,
    brokerage_id: impl Into<String>,
    date: impl Into<String>,
    ticker: impl Into<String>,
    initial_ask_price: Decimal,
) -> Result<StockState, ConfigError> {
    let partial = load_partial(path.as_ref())?;
    build_stock_state(&partial, brokerage_id, date, ticker, initial_ask_price)
        .map_err(ConfigError::from)
}

fn load_partial(path: &Path) -> Result<PartialStockState, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => load_layered_yaml(&[path]),
        _ => load_json(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_decimal::decimal;
    use std::io::Write;

    #[test]
    fn loads_stock_state_from_json_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{
                "shares_per_interval": 100,
                "target_position": 500,
                "space_between_intervals": "0.05",
                "interval_profit": "0.03",
                "brokerage_trading_cost_per_share": "0.005",
                "profit_threshold": "0.01",
                "loss_threshold": "-0.5",
                "is_static_intervals": true
            }}"#
        )
        .unwrap();

        let state =
            load_stock_state(file.path(), "ALPACA", "2024-01-02", "ACME", decimal!("10")).unwrap();
        assert_eq!(state.shares_per_interval, 100);
        assert_eq!(state.initial_price, decimal!("10"));
    }

    #[test]
    fn missing_required_key_surfaces_as_state_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"shares_per_interval": 100}}"#).unwrap();

        let err =
            load_stock_state(file.path(), "ALPACA", "2024-01-02", "ACME", decimal!("10"))
                .unwrap_err();
        assert!(matches!(err, ConfigError::State(_)));
    }
}
