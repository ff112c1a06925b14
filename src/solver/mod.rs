//! The primal-dual phase engine and its configuration.
//!
//! The solver approximates the Maximum Budgeted Allocation problem with a
//! guarantee of `(1 - beta/4) * (1 - epsilon)`, where `beta` is the largest
//! bid-to-budget ratio in the market and `epsilon` the configured accuracy.
//! Runs are deterministic: the same market and config always produce the
//! same allocation, phase count, and history.
//!
//! ## References
//!
//! - Chakrabarty, Goel (2010). "On the Approximability of Budgeted
//!   Allocations and Improved Lower Bounds for Submodular Welfare
//!   Maximization and GAP". SIAM Journal on Computing 39(6).
//! - Vazirani (2001). "Approximation Algorithms", the primal-dual schema
//!   chapters.

mod config;
mod runner;
mod tentative;
mod types;

pub use config::SolveConfig;
pub use runner::Solver;
pub use tentative::{TentativeAllocation, TentativeEntry};
pub use types::SolveResult;
