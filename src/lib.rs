//! Primal-dual approximation solver for Maximum Budgeted Allocation.
//!
//! Agents place bids on items and carry hard budgets; payments for assigned
//! items never exceed the bid, and an agent never pays more than its budget
//! in total. Finding the revenue-maximizing assignment is NP-hard, so this
//! crate implements a combinatorial primal-dual scheme that guarantees a
//! `(1 - beta/4) * (1 - epsilon)` fraction of the optimum, where `beta` is
//! the largest bid-to-budget ratio and `epsilon` a caller-chosen accuracy.
//!
//! The crate is organized along the stages of a run:
//!
//! - **market**: validated input: budgets, items, and the bid graph.
//! - **dual**: per-agent bid multipliers and per-item prices, the state the
//!   search actually moves through.
//! - **solver**: the phase engine that auctions items under discounted bids
//!   and raises multipliers on overloaded agents.
//! - **rounding**: budget enforcement turning the engine's tentative
//!   assignment into a feasible allocation.
//! - **audit**: guarantee checks and a brute-force optimum for small
//!   markets.
//!
//! Runs are fully deterministic. All ids are dense `usize` indices, every
//! tie in the algorithm breaks by ascending id, and no randomness or hash
//! iteration is involved anywhere in a decision.

pub mod audit;
pub mod dual;
pub mod error;
pub mod market;
pub mod rounding;
pub mod solver;
