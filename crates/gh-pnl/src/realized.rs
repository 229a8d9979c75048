use std::fmt;

use gh_state::StockState;

use crate::net_position::pnl_denominator;

/// Attempting to finalize realized PnL while a position is still open.
/// This can only happen from a caller bug — the driver loop must drive
/// `position` back to zero (closing out at the last quote) before
/// finalizing. Callers should treat this as a fatal, unrecoverable
/// condition, not a retryable error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RealizedPnlError {
    pub position: i64,
}

impl fmt::Display for RealizedPnlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot finalize realized PnL: position is {}, expected 0",
            self.position
        )
    }
}

impl std::error::Error for RealizedPnlError {}

/// Finalize `realized_pnl_as_percentage` from the final
/// `net_position_value`. Only valid once the engine has driven
/// `position` back to zero.
pub fn finalize_realized_pnl(state: &mut StockState) -> Result<(), RealizedPnlError> {
    if state.position != 0 {
        return Err(RealizedPnlError {
            position: state.position,
        });
    }

    let denominator = pnl_denominator(state);
    let pct = (state.net_position_value / denominator).mul_i64(100);
    state.realized_pnl_as_percentage = Some(pct);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_decimal::decimal;
    use gh_state::{build_stock_state, PartialStockState};

    fn fresh_state() -> StockState {
        let partial = PartialStockState {
            brokerage_trading_cost_per_share: Some(decimal!("0.005")),
            shares_per_interval: Some(100),
            target_position: Some(500),
            space_between_intervals: Some(decimal!("0.05")),
            interval_profit: Some(decimal!("0.03")),
            num_contracts: None,
            initial_price: Some(decimal!("10")),
            profit_threshold: Some(decimal!("0.5")),
            loss_threshold: Some(decimal!("-0.5")),
            is_static_intervals: Some(true),
        };
        build_stock_state(&partial, "ALPACA", "2024-01-02", "ACME", decimal!("10")).unwrap()
    }

    #[test]
    fn rejects_nonzero_position() {
        let mut state = fresh_state();
        state.position = 100;
        let err = finalize_realized_pnl(&mut state).unwrap_err();
        assert_eq!(err.position, 100);
        assert!(state.realized_pnl_as_percentage.is_none());
    }

    #[test]
    fn round_trip_locks_expected_percentage() {
        let mut state = fresh_state();
        state.net_position_value = decimal!("2.00"); // s*p - 2*s*c round trip
        finalize_realized_pnl(&mut state).unwrap();
        // 2.00 / 6000 * 100 = 0.0333...
        let pct = state.realized_pnl_as_percentage.unwrap();
        assert!(pct.to_f64_lossy() > 0.0333 && pct.to_f64_lossy() < 0.0334);
    }
}
