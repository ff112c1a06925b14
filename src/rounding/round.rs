use super::Allocation;
use crate::market::Market;
use crate::solver::TentativeAllocation;

/// Turns a tentative assignment into a budget-feasible [`Allocation`].
///
/// Per agent, items are shed cheapest-first (ties by lowest item id) while
/// the remainder still covers the whole budget. If what remains then sticks
/// out past the budget, the cheapest survivor is discounted down to the
/// leftover budget: the agent pays exactly its budget, and no item pays
/// more than its face value. Dropped items end up unassigned rather than
/// reassigned; the phase engine, not the rounding, is responsible for
/// finding items a better home. Payments are face values scaled by the
/// assigned fraction, before the discount.
pub fn round(market: &Market, tentative: &TentativeAllocation) -> Allocation {
    let num_agents = market.num_agents();
    let num_items = market.num_items();
    let mut owner: Vec<Option<usize>> = vec![None; num_items];
    let mut payment = vec![0.0f64; num_agents];

    let mut by_agent: Vec<Vec<(usize, f64)>> = vec![Vec::new(); num_agents];
    for (item, entry) in tentative.iter_assigned() {
        if let Some(value) = market.bid(entry.agent, item) {
            by_agent[entry.agent].push((item, value * entry.fraction));
        }
    }

    for (agent, kept) in by_agent.iter_mut().enumerate() {
        let budget = market.budget(agent);
        let mut total: f64 = kept.iter().map(|&(_, value)| value).sum();

        // Shed items whose removal still leaves the budget covered.
        while let Some(pos) = cheapest(kept) {
            if total - kept[pos].1 < budget {
                break;
            }
            total -= kept[pos].1;
            kept.remove(pos);
        }

        let discounted = if total > budget { cheapest(kept) } else { None };

        let mut paid = 0.0;
        for (pos, &(item, value)) in kept.iter().enumerate() {
            owner[item] = Some(agent);
            paid += if discounted == Some(pos) {
                budget - (total - value)
            } else {
                value
            };
        }
        // A discount lands the total exactly on the budget; the clamp keeps
        // float rounding from overshooting it by an ulp.
        payment[agent] = paid.min(budget);
    }

    Allocation::new(owner, payment)
}

/// Position of the cheapest kept item, ties by lowest item id.
fn cheapest(kept: &[(usize, f64)]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (pos, &(_, value)) in kept.iter().enumerate() {
        let better = match best {
            None => true,
            // Strict comparison keeps the earliest position, and entries
            // stay sorted by item id.
            Some((_, best_value)) => value < best_value,
        };
        if better {
            best = Some((pos, value));
        }
    }
    best.map(|(pos, _)| pos)
}
