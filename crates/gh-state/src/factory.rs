use gh_decimal::Decimal;

use crate::error::ConfigError;
use crate::milestone::fresh_milestones;
use crate::types::{PartialStockState, StockState};

fn require<T: Clone>(
    field: &Option<T>,
    key: &'static str,
) -> Result<T, ConfigError> {
    field
        .clone()
        .ok_or(ConfigError::MissingRequiredKey { key })
}

/// Build a fresh `StockState` from a `PartialStockState`, a per-run
/// `date`/`brokerage_id`/`ticker`, and the first ask price seen for
/// this security-day (used as `initial_price` unless the partial state
/// already names one).
///
/// Builds the interval ladder, zero-initializes every running field,
/// and starts the milestone watermarks unreached.
pub fn build_stock_state(
    partial: &PartialStockState,
    brokerage_id: impl Into<String>,
    date: impl Into<String>,
    ticker: impl Into<String>,
    initial_ask_price: Decimal,
) -> Result<StockState, ConfigError> {
    let shares_per_interval = require(&partial.shares_per_interval, "sharesPerInterval")?;
    if shares_per_interval <= 0 {
        return Err(ConfigError::InvalidValue {
            key: "sharesPerInterval",
            reason: "must be positive".to_string(),
        });
    }

    let target_position = require(&partial.target_position, "targetPosition")?;
    if target_position <= 0 {
        return Err(ConfigError::InvalidValue {
            key: "targetPosition",
            reason: "must be positive".to_string(),
        });
    }

    let space_between_intervals = require(
        &partial.space_between_intervals,
        "spaceBetweenIntervals",
    )?;
    let interval_profit = require(&partial.interval_profit, "intervalProfit")?;
    if interval_profit >= space_between_intervals {
        return Err(ConfigError::InvalidValue {
            key: "intervalProfit",
            reason: "must be strictly less than spaceBetweenIntervals".to_string(),
        });
    }

    let brokerage_trading_cost_per_share = require(
        &partial.brokerage_trading_cost_per_share,
        "brokerageTradingCostPerShare",
    )?;
    let profit_threshold = require(&partial.profit_threshold, "profitThreshold")?;
    let loss_threshold = require(&partial.loss_threshold, "lossThreshold")?;

    let initial_price = partial.initial_price.unwrap_or(initial_ask_price);
    let is_static_intervals = partial.is_static_intervals.unwrap_or(false);

    let intervals = gh_ladder::build_ladder(
        initial_price,
        shares_per_interval,
        target_position,
        space_between_intervals,
        interval_profit,
    );

    Ok(StockState {
        brokerage_id: brokerage_id.into(),
        date: date.into(),
        ticker: ticker.into(),
        shares_per_interval,
        target_position,
        space_between_intervals,
        interval_profit,
        brokerage_trading_cost_per_share,
        initial_price,
        is_static_intervals,
        profit_threshold,
        loss_threshold,
        num_contracts: partial.num_contracts,

        position: 0,
        intervals,
        last_ask: None,
        last_bid: None,
        net_position_value: Decimal::ZERO,
        realized_pnl_as_percentage: None,
        exit_pnl_as_percentage: Decimal::ZERO,
        max_moving_profit_as_percentage: Decimal::ZERO,
        max_moving_loss_as_percentage: Decimal::ZERO,
        milestones: fresh_milestones(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_decimal::decimal;

    fn valid_partial() -> PartialStockState {
        PartialStockState {
            brokerage_trading_cost_per_share: Some(decimal!("0.005")),
            shares_per_interval: Some(100),
            target_position: Some(500),
            space_between_intervals: Some(decimal!("0.05")),
            interval_profit: Some(decimal!("0.03")),
            num_contracts: None,
            initial_price: None,
            profit_threshold: Some(decimal!("0.5")),
            loss_threshold: Some(decimal!("-0.5")),
            is_static_intervals: Some(true),
        }
    }

    #[test]
    fn builds_ladder_and_zeroes_running_fields() {
        let partial = valid_partial();
        let state = build_stock_state(&partial, "ALPACA", "2024-01-02", "ACME", decimal!("10"))
            .expect("valid config must build");

        assert_eq!(state.position, 0);
        assert_eq!(state.net_position_value, Decimal::ZERO);
        assert!(state.realized_pnl_as_percentage.is_none());
        assert_eq!(state.intervals.len(), 12);
        assert_eq!(state.milestones.len(), 8);
        assert!(state.milestones.iter().all(|m| !m.reached));
    }

    #[test]
    fn missing_required_key_is_rejected() {
        let mut partial = valid_partial();
        partial.shares_per_interval = None;
        let err = build_stock_state(&partial, "ALPACA", "2024-01-02", "ACME", decimal!("10"))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingRequiredKey {
                key: "sharesPerInterval"
            }
        );
    }

    #[test]
    fn interval_profit_must_be_less_than_spacing() {
        let mut partial = valid_partial();
        partial.interval_profit = Some(decimal!("0.10"));
        let err = build_stock_state(&partial, "ALPACA", "2024-01-02", "ACME", decimal!("10"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "intervalProfit", .. }));
    }

    #[test]
    fn initial_price_defaults_to_first_ask() {
        let partial = valid_partial();
        let state = build_stock_state(&partial, "ALPACA", "2024-01-02", "ACME", decimal!("12.75"))
            .unwrap();
        assert_eq!(state.initial_price, decimal!("12.75"));
    }
}
