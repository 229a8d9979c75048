use gh_decimal::{decimal, Decimal};
use gh_ladder::check_invariants;
use gh_reconcile::reconcile;
use gh_state::{build_stock_state, PartialStockState, Snapshot, StockState};

fn state_with(is_static: bool, cost_per_share: Decimal) -> StockState {
    let partial = PartialStockState {
        brokerage_trading_cost_per_share: Some(cost_per_share),
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
fn scenario_wide_spread_guard_skips_trading_but_records_quote() {
    let mut state = state_with(true, Decimal::ZERO);
    reconcile(&mut state, snap("10.50", "10.00"));
    assert_eq!(state.position, 0);
    assert_eq!(state.last_ask, Some(decimal!("10.50")));
    assert_eq!(state.last_bid, Some(decimal!("10.00")));
}

#[test]
fn scenario_static_ladder_fires_innermost_long_buy() {
    let mut state = state_with(true, Decimal::ZERO);
    reconcile(&mut state, snap("10.00", "9.99"));
    reconcile(&mut state, snap("10.06", "10.05"));
    assert_eq!(state.position, 100);
    check_invariants(&state.intervals, state.interval_profit).unwrap();
}

#[test]
fn scenario_round_trip_locks_profit_net_of_commission() {
    // Non-static: a static ladder's skip-fill (Step 5) would sweep
    // rung 4's still-open SELL into the same batch as rung 5's,
    // closing the whole position instead of isolating one round trip.
    let mut state = state_with(false, decimal!("0.005"));

    // Fires the innermost LONG BUY (rung 5, position_limit 100).
    reconcile(&mut state, snap("10.02", "10.01"));
    assert_eq!(state.position, 100);

    // `select_sells` only fires a rung once position strictly exceeds
    // that rung's own position_limit (§4.3 Step 4): rung 5's SELL can
    // never close a position sitting exactly at its own limit. Buy the
    // next rung down (limit 200) to push past it; this tick's crossing
    // detection also arms rung 5's SELL (bid 10.06 > 10.05).
    reconcile(&mut state, snap("10.07", "10.06"));
    assert_eq!(state.position, 200, "a deeper rung must fire first");

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
fn scenario_drift_correction_shifts_whole_ladder_on_edge_fire() {
    let mut state = state_with(false, Decimal::ZERO);
    state.intervals.intervals[6].sell.active = false;
    state.intervals.intervals[6].sell.crossed = false;
    state.intervals.intervals[6].buy.active = true;
    state.intervals.intervals[6].buy.crossed = false;

    let before = state.intervals.intervals[0].sell.price;
    reconcile(&mut state, snap("10.02", "10.01"));
    let after = state.intervals.intervals[0].sell.price;

    assert_eq!(after, before + decimal!("0.05"));
    check_invariants(&state.intervals, state.interval_profit).unwrap();
}

#[test]
fn scenario_idempotence_under_repeated_identical_snapshot() {
    let mut state = state_with(true, decimal!("0.005"));
    reconcile(&mut state, snap("10.06", "10.05"));
    let after_first = state.clone();
    reconcile(&mut state, snap("10.06", "10.05"));
    assert_eq!(state, after_first);
}
