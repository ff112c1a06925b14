/// A bid seen from the item's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBid {
    /// Id of the bidding agent.
    pub agent: usize,
    /// Face value of the bid.
    pub value: f64,
}

/// A bid seen from the agent's side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentBid {
    /// Id of the item the bid is for.
    pub item: usize,
    /// Face value of the bid.
    pub value: f64,
}
