//! Error types shared across the crate.

use thiserror::Error;

/// Rejection reasons for market construction and solver configuration.
///
/// Everything here is a caller mistake. The solver itself never fails once
/// its inputs passed validation; slow convergence is reported through
/// [`SolveResult::converged`](crate::solver::SolveResult), not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Agent budgets must be finite and strictly positive.
    #[error("agent {agent} has non-positive budget {budget}")]
    BadBudget { agent: usize, budget: f64 },

    /// Bid values must be finite and strictly positive.
    #[error("bid of agent {agent} on item {item} has non-positive value {value}")]
    BadBid { agent: usize, item: usize, value: f64 },

    /// Each (agent, item) pair may carry at most one bid.
    #[error("duplicate bid of agent {agent} on item {item}")]
    DuplicateBid { agent: usize, item: usize },

    /// A bid referenced an agent id outside the declared range.
    #[error("unknown agent {agent} (market has {num_agents} agents)")]
    UnknownAgent { agent: usize, num_agents: usize },

    /// A bid referenced an item id outside the declared range.
    #[error("unknown item {item} (market has {num_items} items)")]
    UnknownItem { item: usize, num_items: usize },

    /// The accuracy parameter must lie strictly between 0 and 1.
    #[error("epsilon {epsilon} is outside the open interval (0, 1)")]
    BadEpsilon { epsilon: f64 },

    /// An explicit bid-to-budget ratio override must lie in `(0, 1]`.
    #[error("beta override {beta} is outside the half-open interval (0, 1]")]
    BadBetaOverride { beta: f64 },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
