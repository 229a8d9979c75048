//! The interval ladder: an ordered grid of asymmetric buy/sell price
//! intervals straddling a security's initial price.
//!
//! A ladder is built once, at [`StockState`](../gh_state/struct.StockState.html)
//! construction time, from five scalar inputs (`initial_price`,
//! `shares_per_interval`, `target_position`, `space_between_intervals`,
//! `interval_profit`) and is then mutated in place by the reconciliation
//! engine (`gh-reconcile`) as quotes arrive. This crate owns only the data
//! structure and its construction (§4.2); crossing detection and execution
//! selection live in `gh-reconcile`.

mod build;
mod types;

pub use build::build_ladder;
pub use types::{HalfOrder, Interval, IntervalKind, Ladder};

/// Violations of the per-interval / per-ladder invariants in spec §8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LadderInvariantViolation {
    /// Neither or both of `BUY.active`/`SELL.active` held for an interval.
    NotExactlyOneSideActive { index: usize },
    /// A half-order had `crossed = true` while `active = false`.
    CrossedWithoutActive { index: usize, side: Side },
    /// `SELL.price - BUY.price != intervalProfit` for an interval.
    ProfitSpreadMismatch {
        index: usize,
        expected: gh_decimal::Decimal,
        actual: gh_decimal::Decimal,
    },
    /// `positionLimit` was not strictly decreasing along the ladder.
    PositionLimitNotDecreasing { index: usize },
}

/// Which half-order a violation concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for LadderInvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LadderInvariantViolation::NotExactlyOneSideActive { index } => {
                write!(f, "interval {index}: exactly one of BUY/SELL must be active")
            }
            LadderInvariantViolation::CrossedWithoutActive { index, side } => {
                write!(f, "interval {index}: {side:?} is crossed but not active")
            }
            LadderInvariantViolation::ProfitSpreadMismatch {
                index,
                expected,
                actual,
            } => write!(
                f,
                "interval {index}: SELL - BUY = {actual}, expected intervalProfit = {expected}"
            ),
            LadderInvariantViolation::PositionLimitNotDecreasing { index } => {
                write!(f, "interval {index}: positionLimit is not strictly less than the previous interval's")
            }
        }
    }
}

impl std::error::Error for LadderInvariantViolation {}

/// Check every per-interval and ladder-wide invariant in spec §8.
///
/// Intended for tests and debug assertions in `gh-reconcile`, not for
/// production hot-path validation (it walks the whole ladder).
pub fn check_invariants(
    ladder: &Ladder,
    interval_profit: gh_decimal::Decimal,
) -> Result<(), LadderInvariantViolation> {
    let mut prev_limit: Option<i64> = None;

    for (index, interval) in ladder.intervals.iter().enumerate() {
        if interval.buy.active == interval.sell.active {
            return Err(LadderInvariantViolation::NotExactlyOneSideActive { index });
        }
        if interval.buy.crossed && !interval.buy.active {
            return Err(LadderInvariantViolation::CrossedWithoutActive {
                index,
                side: Side::Buy,
            });
        }
        if interval.sell.crossed && !interval.sell.active {
            return Err(LadderInvariantViolation::CrossedWithoutActive {
                index,
                side: Side::Sell,
            });
        }

        let spread = interval.sell.price - interval.buy.price;
        if spread != interval_profit {
            return Err(LadderInvariantViolation::ProfitSpreadMismatch {
                index,
                expected: interval_profit,
                actual: spread,
            });
        }

        if let Some(prev) = prev_limit {
            if interval.position_limit >= prev {
                return Err(LadderInvariantViolation::PositionLimitNotDecreasing { index });
            }
        }
        prev_limit = Some(interval.position_limit);
    }

    Ok(())
}
