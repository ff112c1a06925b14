//! Budget enforcement: from a tentative assignment to a feasible allocation.
//!
//! The phase engine reasons in discounted values and may leave an agent
//! holding more face value than its budget covers. Rounding restores the
//! hard constraint by dropping surplus items the agent can shed for free
//! and discounting the marginal one, so an overfilled agent ends up paying
//! exactly its budget.

mod allocation;
mod round;

pub use allocation::Allocation;
pub use round::round;
