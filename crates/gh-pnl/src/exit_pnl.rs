use gh_decimal::Decimal;
use gh_state::StockState;

use crate::net_position::pnl_denominator;
use crate::side::Side;

/// What `net_position_value` would become if the current position were
/// closed out right now at `fill_price`, without mutating `state`.
fn hypothetical_close_out_value(state: &StockState, side: Side, fill_price: Decimal) -> Decimal {
    let quantity = state.position.unsigned_abs() as i64;
    let commission_costs = state.brokerage_trading_cost_per_share.mul_i64(quantity);
    let order_value = fill_price.mul_i64(quantity);

    let change = match side {
        Side::Buy => -commission_costs - order_value,
        Side::Sell => -commission_costs + order_value,
    };

    state.net_position_value + change
}

/// Recompute `exit_pnl_as_percentage`, the moving profit/loss
/// watermarks, and the milestone ladder after a snapshot change.
///
/// A flat position (`position == 0`) leaves `exit_pnl_as_percentage`
/// at its last computed value — there is nothing open to mark.
/// Otherwise this prices a hypothetical close-out at the current quote
/// (BUY at `last_ask` to cover a short, SELL at `last_bid` to close a
/// long) and expresses it as a percentage of the ladder's notional.
pub fn recompute_exit_pnl(state: &mut StockState) {
    if state.position == 0 {
        return;
    }

    let (side, price) = if state.position < 0 {
        (Side::Buy, state.last_ask)
    } else {
        (Side::Sell, state.last_bid)
    };
    let Some(price) = price else {
        return;
    };

    let hypothetical = hypothetical_close_out_value(state, side, price);
    let denominator = pnl_denominator(state);
    let exit_pnl = (hypothetical / denominator).mul_i64(100);

    state.exit_pnl_as_percentage = exit_pnl;
    state.max_moving_profit_as_percentage = state.max_moving_profit_as_percentage.max(exit_pnl);
    state.max_moving_loss_as_percentage = state.max_moving_loss_as_percentage.min(exit_pnl);

    for milestone in state.milestones.iter_mut() {
        if !milestone.reached && exit_pnl >= milestone.threshold {
            milestone.reached = true;
            milestone.max_loss_when_reached = state.max_moving_loss_as_percentage;
        }
    }
}
