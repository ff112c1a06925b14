use super::types::{AgentBid, ItemBid};
use super::MarketBuilder;

/// Immutable bid graph over a set of agents and items.
///
/// A market holds one budget per agent and at most one positive bid per
/// (agent, item) pair. Both sides of the graph are kept indexed: per item the
/// bids sorted by decreasing value, per agent the bids sorted by item id.
/// Construction goes through [`MarketBuilder`], which validates the input and
/// silently drops bids no agent could ever pay in full.
#[derive(Debug, Clone)]
pub struct Market {
    budgets: Vec<f64>,
    num_items: usize,
    by_item: Vec<Vec<ItemBid>>,
    by_agent: Vec<Vec<AgentBid>>,
    beta: f64,
    num_bids: usize,
}

impl Market {
    /// Starts an empty builder.
    pub fn builder() -> MarketBuilder {
        MarketBuilder::new()
    }

    pub(super) fn from_parts(
        budgets: Vec<f64>,
        num_items: usize,
        by_item: Vec<Vec<ItemBid>>,
        by_agent: Vec<Vec<AgentBid>>,
        beta: f64,
        num_bids: usize,
    ) -> Self {
        Self {
            budgets,
            num_items,
            by_item,
            by_agent,
            beta,
            num_bids,
        }
    }

    pub fn num_agents(&self) -> usize {
        self.budgets.len()
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }

    /// Number of bids that survived validation and pruning.
    pub fn num_bids(&self) -> usize {
        self.num_bids
    }

    /// True when the market carries no bids at all.
    pub fn is_empty(&self) -> bool {
        self.num_bids == 0
    }

    pub fn budget(&self, agent: usize) -> f64 {
        self.budgets[agent]
    }

    pub fn total_budget(&self) -> f64 {
        self.budgets.iter().sum()
    }

    /// The bid of `agent` on `item`, if one was declared and kept.
    pub fn bid(&self, agent: usize, item: usize) -> Option<f64> {
        let bids = &self.by_agent[agent];
        bids.binary_search_by_key(&item, |b| b.item)
            .ok()
            .map(|pos| bids[pos].value)
    }

    /// Bids on `item`, sorted by decreasing value, ties by ascending agent id.
    pub fn bids_for_item(&self, item: usize) -> &[ItemBid] {
        &self.by_item[item]
    }

    /// Bids of `agent`, sorted by ascending item id.
    pub fn bids_of_agent(&self, agent: usize) -> &[AgentBid] {
        &self.by_agent[agent]
    }

    /// Largest bid on `item`, or zero when nobody bids on it.
    pub fn max_item_bid(&self, item: usize) -> f64 {
        self.by_item[item].first().map_or(0.0, |b| b.value)
    }

    /// The ratio `beta`: the largest kept bid relative to its agent's budget.
    ///
    /// Zero for a market without bids. Always at most one, since bids above
    /// the agent's budget are dropped during construction.
    pub fn max_bid_ratio(&self) -> f64 {
        self.beta
    }
}
