use gh_decimal::Decimal;
use gh_state::StockState;

use crate::side::Side;

/// Denominator shared by exit-PnL and realized-PnL percentage
/// calculations: the notional value of the ladder's nominal target
/// plus one guard interval, priced at `initial_price`.
pub(crate) fn pnl_denominator(state: &StockState) -> Decimal {
    state
        .initial_price
        .mul_i64(state.target_position + state.shares_per_interval)
}

/// Book an execution of `quantity = |new_position - state.position|`
/// shares at `fill_price`, on `side`, updating `net_position_value` and
/// `position` in place.
///
/// A BUY spends cash (`net_position_value` decreases by the order
/// value plus commission); a SELL receives cash net of commission.
/// Commission is always a cost, regardless of side.
pub fn apply_execution(state: &mut StockState, side: Side, new_position: i64, fill_price: Decimal) {
    let quantity = (new_position - state.position).unsigned_abs() as i64;
    let commission_costs = state.brokerage_trading_cost_per_share.mul_i64(quantity);
    let order_value = fill_price.mul_i64(quantity);

    let change = match side {
        Side::Buy => -commission_costs - order_value,
        Side::Sell => -commission_costs + order_value,
    };

    state.net_position_value += change;
    state.position = new_position;
}
