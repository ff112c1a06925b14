use std::collections::HashSet;

use super::types::{AgentBid, ItemBid};
use super::Market;
use crate::error::{Result, ValidationError};

/// Incremental construction of a [`Market`].
///
/// Agents and items are identified by dense ids assigned in declaration
/// order. All input is checked in [`build`](Self::build); the `with_*`
/// methods never fail.
///
/// # Examples
///
/// ```
/// use budgeted_alloc::market::Market;
///
/// let market = Market::builder()
///     .with_agents(&[300.0, 400.0]) // budgets, one agent each
///     .with_items(2)
///     .with_bid(0, 0, 100.0)
///     .with_bid(1, 1, 200.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarketBuilder {
    budgets: Vec<f64>,
    num_items: usize,
    bids: Vec<(usize, usize, f64)>,
}

impl MarketBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one agent with the given budget and returns its id implicitly
    /// (agents are numbered in declaration order, starting at zero).
    pub fn with_agent(mut self, budget: f64) -> Self {
        self.budgets.push(budget);
        self
    }

    /// Adds one agent per entry of `budgets`.
    pub fn with_agents(mut self, budgets: &[f64]) -> Self {
        self.budgets.extend_from_slice(budgets);
        self
    }

    /// Declares the number of items. Items carry no data of their own, so a
    /// count is all that is needed; ids run from zero to `count - 1`.
    pub fn with_items(mut self, count: usize) -> Self {
        self.num_items = count;
        self
    }

    /// Declares the bid of `agent` on `item`.
    pub fn with_bid(mut self, agent: usize, item: usize, value: f64) -> Self {
        self.bids.push((agent, item, value));
        self
    }

    /// Validates the declared input and assembles the market.
    ///
    /// Bids larger than their agent's budget pass validation but are then
    /// dropped: such an agent could never pay the bid in full, and keeping it
    /// would let a single oversized bid dominate the bid-to-budget ratio the
    /// solver's guarantee depends on.
    pub fn build(self) -> Result<Market> {
        let num_agents = self.budgets.len();

        for (agent, &budget) in self.budgets.iter().enumerate() {
            if !budget.is_finite() || budget <= 0.0 {
                return Err(ValidationError::BadBudget { agent, budget });
            }
        }

        let mut seen = HashSet::with_capacity(self.bids.len());
        for &(agent, item, value) in &self.bids {
            if agent >= num_agents {
                return Err(ValidationError::UnknownAgent { agent, num_agents });
            }
            if item >= self.num_items {
                return Err(ValidationError::UnknownItem {
                    item,
                    num_items: self.num_items,
                });
            }
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::BadBid { agent, item, value });
            }
            if !seen.insert((agent, item)) {
                return Err(ValidationError::DuplicateBid { agent, item });
            }
        }

        let mut by_item: Vec<Vec<ItemBid>> = vec![Vec::new(); self.num_items];
        let mut by_agent: Vec<Vec<AgentBid>> = vec![Vec::new(); num_agents];
        let mut beta = 0.0f64;
        let mut num_bids = 0;

        for &(agent, item, value) in &self.bids {
            if value > self.budgets[agent] {
                #[cfg(feature = "trace")]
                tracing::debug!(
                    target: "market",
                    agent,
                    item,
                    value,
                    budget = self.budgets[agent],
                    "dropping bid above budget"
                );
                continue;
            }
            by_item[item].push(ItemBid { agent, value });
            by_agent[agent].push(AgentBid { item, value });
            beta = beta.max(value / self.budgets[agent]);
            num_bids += 1;
        }

        for bids in &mut by_item {
            bids.sort_by(|a, b| {
                b.value
                    .total_cmp(&a.value)
                    .then(a.agent.cmp(&b.agent))
            });
        }
        for bids in &mut by_agent {
            bids.sort_by_key(|b| b.item);
        }

        Ok(Market::from_parts(
            self.budgets,
            self.num_items,
            by_item,
            by_agent,
            beta,
            num_bids,
        ))
    }
}
