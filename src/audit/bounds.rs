use crate::market::Market;
use crate::rounding::Allocation;

/// Tolerance for guarantee checks, absorbing float accumulation error.
const SLACK: f64 = 1e-9;

/// Revenue of an allocation under the market's bids, with each agent's
/// payment capped at its budget.
///
/// Recomputes from the bid graph rather than trusting stored payments, so
/// it cross-checks solver output, where the cap reproduces the marginal
/// discount exactly, as well as assignments produced elsewhere.
pub fn revenue(market: &Market, allocation: &Allocation) -> f64 {
    let mut total = 0.0;
    for agent in 0..market.num_agents() {
        let consumed: f64 = allocation
            .items_of(agent)
            .iter()
            .filter_map(|&item| market.bid(agent, item))
            .sum();
        total += consumed.min(market.budget(agent));
    }
    total
}

/// The approximation factor promised for a market with bid-to-budget ratio
/// `beta`, solved at accuracy `epsilon`.
pub fn guarantee(beta: f64, epsilon: f64) -> f64 {
    (1.0 - beta / 4.0) * (1.0 - epsilon)
}

/// Whether `achieved` lives up to the guarantee against a known `optimum`.
pub fn meets_guarantee(achieved: f64, optimum: f64, beta: f64, epsilon: f64) -> bool {
    achieved + SLACK >= guarantee(beta, epsilon) * optimum
}

/// Exact optimum by enumeration, with payments capped at budgets.
///
/// Walks every way of giving each item to one of its bidders or nobody, so
/// the cost is exponential in the number of items. Meant for validating
/// solver output on the small markets used in tests.
pub fn exhaustive_optimum(market: &Market) -> f64 {
    let mut consumption = vec![0.0f64; market.num_agents()];
    descend(market, 0, &mut consumption)
}

fn descend(market: &Market, item: usize, consumption: &mut [f64]) -> f64 {
    if item == market.num_items() {
        let mut total = 0.0;
        for agent in 0..market.num_agents() {
            total += consumption[agent].min(market.budget(agent));
        }
        return total;
    }

    let mut best = descend(market, item + 1, consumption);
    for pos in 0..market.bids_for_item(item).len() {
        let bid = market.bids_for_item(item)[pos];
        consumption[bid.agent] += bid.value;
        best = best.max(descend(market, item + 1, consumption));
        consumption[bid.agent] -= bid.value;
    }
    best
}
