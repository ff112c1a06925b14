//! Input model: agents with budgets, items, and a sparse bid graph.
//!
//! The market is the validated, immutable input of the solver. Agents and
//! items use dense `usize` ids; every query the solver makes during a run
//! resolves through precomputed per-item and per-agent views, so no hashing
//! or input reordering can leak into the result.

mod builder;
mod market;
mod types;

pub use builder::MarketBuilder;
pub use market::Market;
pub use types::{AgentBid, ItemBid};
