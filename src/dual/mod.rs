//! Dual variables: per-agent bid multipliers and per-item prices.
//!
//! The solver searches the dual space rather than the allocation space.
//! Agents loaded past their overload allowance get their bids discounted,
//! and the discounted comparison is what decides every assignment. See
//! [`DualState`] for the update rules.

mod state;

pub use state::DualState;
