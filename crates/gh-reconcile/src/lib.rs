//! The reconciliation engine: `reconcile(state, snapshot)` is the one
//! pure step function this whole simulator turns on. It mutates a
//! single `StockState` in place against one incoming quote, running
//! crossing detection, execution selection, half-order flips, the
//! drift correction for non-static ladders, and the PnL update, in
//! that order, every tick.

mod crossing;
mod drift;
mod flip;
mod selection;
mod skip_fill;

use gh_decimal::Decimal;
use gh_pnl::Side;
use gh_state::{Snapshot, StockState};

/// Run one reconciliation step: feed `snapshot` into `state`, mutating
/// it in place, and return the snapshot unchanged (callers that want
/// to persist it alongside the post-reconcile state can do so without
/// holding onto their own copy).
///
/// Steps, in order (mirrors §4.3):
/// 0. snapshot-change bookkeeping and exit-PnL recompute
/// 1. wide-spread guard
/// 2. crossing detection
/// 3. buy-side execution selection
/// 4. sell-side execution selection (only if buy-side is empty)
/// 5. skip-filling (static ladder only)
/// 6. flip executed half-orders
/// 7. drift correction (non-static ladder only)
/// 8. position/PnL update, then a second crossing-detection pass
/// 9. return the snapshot
pub fn reconcile(state: &mut StockState, snapshot: Snapshot) -> Snapshot {
    // Step 0.
    let snapshot_changed = state.last_ask != Some(snapshot.ask) || state.last_bid != Some(snapshot.bid);
    if snapshot_changed {
        state.last_ask = Some(snapshot.ask);
        state.last_bid = Some(snapshot.bid);
        gh_pnl::recompute_exit_pnl(state);
    }

    // Step 1.
    if crossing::is_wide_spread(snapshot.ask, snapshot.bid, state.space_between_intervals) {
        return snapshot;
    }

    run_crossing_and_execution(state, snapshot.ask, snapshot.bid);

    snapshot
}

fn run_crossing_and_execution(state: &mut StockState, ask: Decimal, bid: Decimal) {
    // Step 2.
    crossing::check_crossings(&mut state.intervals, ask, bid);

    // Step 3.
    let mut buys = selection::select_buys(&state.intervals, ask, state.position, state.shares_per_interval);

    // Step 4.
    let mut sells = if buys.is_empty() {
        selection::select_sells(&state.intervals, bid, state.position, state.shares_per_interval)
    } else {
        Vec::new()
    };

    // Step 5.
    if state.is_static_intervals {
        if !buys.is_empty() {
            skip_fill::add_skipped_buys(&state.intervals, &mut buys);
        }
        if !sells.is_empty() {
            skip_fill::add_skipped_sells(&state.intervals, &mut sells);
        }
    }

    // Step 6.
    if !buys.is_empty() {
        flip::flip_buys(&mut state.intervals, &buys);
    }
    if !sells.is_empty() {
        flip::flip_sells(&mut state.intervals, &sells);
    }

    // Step 7.
    if !state.is_static_intervals {
        if !buys.is_empty() {
            drift::correct_bad_buy(&mut state.intervals, &buys, state.space_between_intervals);
        }
        if !sells.is_empty() {
            drift::correct_bad_sell(&mut state.intervals, &sells, state.space_between_intervals);
        }
    }

    // Step 8.
    if !buys.is_empty() {
        let new_position = state.position + state.shares_per_interval * buys.len() as i64;
        gh_pnl::apply_execution(state, Side::Buy, new_position, ask);
        crossing::check_crossings(&mut state.intervals, ask, bid);
    } else if !sells.is_empty() {
        let new_position = state.position - state.shares_per_interval * sells.len() as i64;
        gh_pnl::apply_execution(state, Side::Sell, new_position, bid);
        crossing::check_crossings(&mut state.intervals, ask, bid);
    }
    // Step 9: caller returns the snapshot.
}

#[cfg(test)]
mod tests {
    use super::*;
    use gh_decimal::decimal;
    use gh_ladder::check_invariants;
    use gh_state::{build_stock_state, PartialStockState};

    fn state_with(is_static: bool) -> StockState {
        let partial = PartialStockState {
            brokerage_trading_cost_per_share: Some(decimal!("0")),
            shares_per_interval: Some(100),
            target_position: Some(500),
            space_between_intervals: Some(decimal!("0.05")),
            interval_profit: Some(decimal!("0.03")),
            num_contracts: None,
            initial_price: Some(decimal!("10")),
            profit_threshold: Some(decimal!("0.5")),
            loss_threshold: Some(decimal!("-0.5")),
            is_static_intervals: Some(is_static),
        };
        build_stock_state(&partial, "ALPACA", "2024-01-02", "ACME", decimal!("10")).unwrap()
    }

    fn snap(ask: &str, bid: &str) -> Snapshot {
        Snapshot::new(decimal!(ask), decimal!(bid), "t".to_string())
    }

    #[test]
    fn scenario_2_single_tick_no_crossed_level_executes_nothing() {
        let mut state = state_with(true);
        reconcile(&mut state, snap("10.01", "10.01"));
        assert_eq!(state.position, 0);
    }

    #[test]
    fn scenario_3_static_ladder_crosses_innermost_long() {
        let mut state = state_with(true);
        reconcile(&mut state, snap("10.00", "9.99"));
        reconcile(&mut state, snap("10.06", "10.05"));
        assert_eq!(state.position, 100);
    }

    #[test]
    fn scenario_5_wide_spread_guard_trades_nothing() {
        let mut state = state_with(true);
        reconcile(&mut state, snap("10.50", "10.00"));
        assert_eq!(state.position, 0);
        assert_eq!(state.last_ask, Some(decimal!("10.50")));
        assert_eq!(state.last_bid, Some(decimal!("10.00")));
    }

    #[test]
    fn invariants_hold_after_a_fill() {
        let mut state = state_with(true);
        reconcile(&mut state, snap("10.00", "9.99"));
        reconcile(&mut state, snap("10.06", "10.05"));
        check_invariants(&state.intervals, state.interval_profit).unwrap();
    }

    #[test]
    fn idempotent_under_repeated_identical_snapshot() {
        let mut state = state_with(true);
        reconcile(&mut state, snap("10.06", "10.05"));
        let after_first = state.clone();
        reconcile(&mut state, snap("10.06", "10.05"));
        assert_eq!(state, after_first);
    }

    #[test]
    fn round_trip_locks_interval_profit_net_of_commission() {
        // Non-static: a static ladder's skip-fill (Step 5) would sweep
        // rung 4's still-open SELL into the same batch as rung 5's,
        // closing the whole position instead of isolating one round trip.
        let mut state = state_with(false);
        state.brokerage_trading_cost_per_share = decimal!("0.005");

        // Fires the innermost LONG BUY (rung 5, position_limit 100).
        reconcile(&mut state, snap("10.02", "10.01"));
        assert_eq!(state.position, 100);

        // `select_sells` only fires a rung once position strictly
        // exceeds that rung's own position_limit (§4.3 Step 4), so
        // rung 5's SELL can never close a position sitting exactly at
        // its own limit. Buy the next rung down (limit 200) to push
        // past it; this tick's crossing detection also arms rung 5's
        // SELL (bid 10.06 > 10.05).
        reconcile(&mut state, snap("10.07", "10.06"));
        assert_eq!(state.position, 200);

        // Rung 5's SELL now fires (200 > 100), locking its round trip;
        // rung 4's BUY stays open since 100 is not greater than 200.
        reconcile(&mut state, snap("10.06", "10.05"));
        assert_eq!(state.position, 100);

        let open_leg_cost = decimal!("10.07").mul_i64(100) + decimal!("0.005").mul_i64(100);
        let round_trip_locked = decimal!("0.03").mul_i64(100) - decimal!("0.005").mul_i64(200);
        let expected = round_trip_locked - open_leg_cost;
        assert_eq!(state.net_position_value, expected);
    }

    #[test]
    fn drift_correction_shifts_prices_on_nonstatic_ladder() {
        let mut state = state_with(false);
        // Simulate a rung left armed-to-buy below the innermost LONG rung
        // (as a prior SELL round trip would leave it), so firing the
        // innermost LONG BUY trips Step 7's correction.
        state.intervals.intervals[6].sell.active = false;
        state.intervals.intervals[6].sell.crossed = false;
        state.intervals.intervals[6].buy.active = true;
        state.intervals.intervals[6].buy.crossed = false;

        let before_top_sell = state.intervals.intervals[0].sell.price;

        reconcile(&mut state, snap("10.02", "10.01"));

        let after_top_sell = state.intervals.intervals[0].sell.price;
        assert_eq!(after_top_sell, before_top_sell + decimal!("0.05"));
        // The fired rung (index 5) was flipped back to an armed BUY.
        assert!(state.intervals.intervals[5].buy.active);
        // The neighbor (index 6) now carries the armed SELL.
        assert!(state.intervals.intervals[6].sell.active);
    }
}
