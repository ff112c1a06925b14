use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::dual::DualState;
use crate::error::Result;
use crate::market::Market;
use crate::rounding::{round, Allocation};

use super::config::SolveConfig;
use super::tentative::TentativeAllocation;
use super::types::SolveResult;

/// Primal-dual phase engine.
///
/// A run is a sequence of phases. Each phase auctions the free items in
/// decreasing order of their best bid, item by item: the agent with the
/// highest discounted bid takes the item outright while it sits under its
/// load cap; an overloaded winner may push out one cheaper item to get back
/// under the cap, and otherwise gets its multiplier raised so the item can
/// find a different home later. Commits may overshoot the cap by the one
/// bid that tipped it over, so a phase ends with a sweep that raises every
/// agent still overloaded. Raised agents return all their items to the pool
/// at the start of the next phase; everyone else keeps theirs. The run ends
/// at the first phase that changes nothing, or at the phase cap.
///
/// Every phase ends with a budget-enforcing rounding of the current
/// assignment, and the best rounded allocation across the whole run is what
/// the caller gets back. The result therefore never gets worse by letting
/// the duals keep moving.
pub struct Solver;

impl Solver {
    pub fn run(market: &Market, config: &SolveConfig) -> Result<SolveResult> {
        Self::run_with_cancel(market, config, None)
    }

    /// Like [`run`](Self::run), but checks `cancel` between phases and stops
    /// early once the flag is set, returning the best allocation found so
    /// far with `cancelled` marked.
    pub fn run_with_cancel(
        market: &Market,
        config: &SolveConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveResult> {
        config.validate()?;

        let num_agents = market.num_agents();
        let num_items = market.num_items();
        let epsilon = config.epsilon;
        let beta = config
            .beta_override
            .unwrap_or_else(|| market.max_bid_ratio());
        let phase_cap = config.phase_cap(num_agents);
        let explicit_cap = config.max_phases > 0;

        let mut dual = DualState::new(num_agents, num_items, epsilon, beta);
        let mut tentative = TentativeAllocation::new(num_agents, num_items);
        // Nominal value held per agent, recomputed at every phase start.
        let mut consumption = vec![0.0f64; num_agents];
        // Agents raised in the previous phase; their items go back to the pool.
        let mut raised = vec![false; num_agents];

        let mut best = Allocation::empty(num_agents, num_items);
        let mut best_revenue = 0.0f64;
        let mut revenue_history = Vec::new();
        let mut phases = 0;
        let mut charged = 0;
        let mut converged = false;
        let mut cancelled = false;

        // An explicit max_phases bounds every phase. The derived cap counts
        // only phases that moved a multiplier; swap-only phases strictly grow
        // the value held, so they terminate on their own.
        loop {
            let capped = if explicit_cap {
                phases >= phase_cap
            } else {
                charged >= phase_cap
            };
            if capped {
                break;
            }
            if let Some(flag) = &cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            phases += 1;

            for agent in 0..num_agents {
                if raised[agent] {
                    for item in tentative.release_all_of(agent) {
                        dual.release(item);
                    }
                }
            }

            for agent in 0..num_agents {
                consumption[agent] = tentative
                    .held(agent)
                    .iter()
                    .filter_map(|&item| market.bid(agent, item))
                    .sum();
            }

            dual.begin_phase();
            for item in 0..num_items {
                if tentative.is_assigned(item) {
                    dual.freeze(item);
                }
            }
            raised.fill(false);

            let mut free: Vec<usize> = (0..num_items)
                .filter(|&item| {
                    !tentative.is_assigned(item) && !market.bids_for_item(item).is_empty()
                })
                .collect();
            free.sort_by(|&a, &b| {
                market
                    .max_item_bid(b)
                    .total_cmp(&market.max_item_bid(a))
                    .then(a.cmp(&b))
            });

            let mut dual_changed = false;
            let mut swapped = false;

            for &item in &free {
                let Some((winner, value, eff)) = pick_winner(market, &dual, &consumption, item)
                else {
                    continue;
                };

                if !dual.is_tight(winner, consumption[winner], market.budget(winner)) {
                    tentative.assign(item, winner, 1.0);
                    consumption[winner] += value;
                    dual.commit_price(item, eff);
                    continue;
                }

                match find_release(market, &dual, &tentative, consumption[winner], winner, eff) {
                    Some((victim, victim_value)) => {
                        tentative.release(victim);
                        dual.release(victim);
                        consumption[winner] -= victim_value;
                        swapped = true;

                        tentative.assign(item, winner, 1.0);
                        consumption[winner] += value;
                        dual.commit_price(item, eff);
                    }
                    None => {
                        if raised[winner] {
                            continue;
                        }
                        let increment = dual.next_increment(winner);
                        if increment > 0.0 {
                            dual.raise(winner, increment);
                            raised[winner] = true;
                            dual_changed = true;

                            #[cfg(feature = "trace")]
                            tracing::trace!(
                                target: "solver",
                                agent = winner,
                                alpha = dual.alpha(winner),
                                item,
                                "multiplier raised"
                            );
                        }
                    }
                }
            }

            // One more raise for agents that ended the phase over their cap,
            // so the next phase returns their items to the pool and
            // re-auctions them under the wider discount.
            for agent in 0..num_agents {
                if raised[agent] {
                    continue;
                }
                if dual.is_tight(agent, consumption[agent], market.budget(agent)) {
                    let increment = dual.next_increment(agent);
                    if increment > 0.0 {
                        dual.raise(agent, increment);
                        raised[agent] = true;
                        dual_changed = true;

                        #[cfg(feature = "trace")]
                        tracing::trace!(
                            target: "solver",
                            agent,
                            alpha = dual.alpha(agent),
                            "multiplier raised on overload"
                        );
                    }
                }
            }

            let rounded = round(market, &tentative);
            let revenue = rounded.revenue();
            if revenue > best_revenue {
                best = rounded;
                best_revenue = revenue;
            }
            revenue_history.push(best_revenue);

            #[cfg(feature = "trace")]
            tracing::debug!(
                target: "solver",
                phase = phases,
                revenue,
                best = best_revenue,
                assigned = tentative.assigned_count(),
                raised = dual_changed,
                "phase complete"
            );

            if !dual_changed && !swapped {
                converged = true;
                break;
            }
            if dual_changed {
                charged += 1;
            }
        }

        #[cfg(feature = "trace")]
        {
            if !converged && !cancelled {
                tracing::warn!(
                    target: "solver",
                    phases,
                    best = best_revenue,
                    "phase cap reached before fixed point"
                );
            }
        }

        Ok(SolveResult {
            allocation: best,
            revenue: best_revenue,
            converged,
            cancelled,
            phases,
            beta,
            guarantee: (1.0 - beta / 4.0) * (1.0 - epsilon),
            dual_bound: dual.dual_value(market),
            revenue_history,
        })
    }
}

/// Picks the agent that takes `item` this phase: the highest effective bid
/// among agents under their load cap, ties by lowest agent id. When every
/// bidder is overloaded the best overall bidder is charged with the item
/// anyway, so the failure path can raise its multiplier.
fn pick_winner(
    market: &Market,
    dual: &DualState,
    consumption: &[f64],
    item: usize,
) -> Option<(usize, f64, f64)> {
    let mut eligible: Option<(usize, f64, f64)> = None;
    let mut overall: Option<(usize, f64, f64)> = None;

    for bid in market.bids_for_item(item) {
        let eff = dual.effective_bid(bid.value, bid.agent);
        if beats(overall, bid.agent, eff) {
            overall = Some((bid.agent, bid.value, eff));
        }
        if !dual.is_tight(bid.agent, consumption[bid.agent], market.budget(bid.agent))
            && beats(eligible, bid.agent, eff)
        {
            eligible = Some((bid.agent, bid.value, eff));
        }
    }

    eligible.or(overall)
}

fn beats(current: Option<(usize, f64, f64)>, agent: usize, eff: f64) -> bool {
    match current {
        None => true,
        Some((cur_agent, _, cur_eff)) => eff > cur_eff || (eff == cur_eff && agent < cur_agent),
    }
}

/// Looks for a single held item whose release brings `winner` back under its
/// load cap. Among candidates the cheapest wins, ties by lowest item id. The
/// swap only goes through if the incoming effective bid strictly beats the
/// outgoing one, so a phase can never trade sideways forever.
fn find_release(
    market: &Market,
    dual: &DualState,
    tentative: &TentativeAllocation,
    consumption: f64,
    winner: usize,
    eff: f64,
) -> Option<(usize, f64)> {
    let budget = market.budget(winner);
    let mut choice: Option<(usize, f64)> = None;

    for &held in tentative.held(winner) {
        let held_value = match market.bid(winner, held) {
            Some(v) => v,
            None => continue,
        };
        if dual.is_tight(winner, consumption - held_value, budget) {
            continue;
        }
        let replace = match choice {
            None => true,
            Some((cur_item, cur_value)) => {
                held_value < cur_value || (held_value == cur_value && held < cur_item)
            }
        };
        if replace {
            choice = Some((held, held_value));
        }
    }

    let (victim, victim_value) = choice?;
    if eff > dual.effective_bid(victim_value, winner) {
        Some((victim, victim_value))
    } else {
        None
    }
}
