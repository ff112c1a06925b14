use crate::rounding::Allocation;

/// Outcome of a solver run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    /// Best budget-feasible allocation observed across all phases.
    pub allocation: Allocation,
    /// Revenue of that allocation.
    pub revenue: f64,
    /// True when the run reached a phase that changed nothing, meaning the
    /// duals are at a fixed point. False when the phase cap or a
    /// cancellation cut the run short; the result is still valid, it just
    /// reflects the best phase seen rather than a settled state.
    pub converged: bool,
    /// True when a cancellation flag stopped the run.
    pub cancelled: bool,
    /// Number of phases executed.
    pub phases: usize,
    /// Bid-to-budget ratio the guarantee was computed with. Taken from the
    /// market unless the config overrode it.
    pub beta: f64,
    /// The fraction of the optimum the returned revenue is guaranteed to
    /// reach: `(1 - beta / 4) * (1 - epsilon)`.
    pub guarantee: f64,
    /// Weak-duality upper bound on the optimum, evaluated at the final
    /// duals. Any allocation, fractional ones included, is worth at most
    /// this.
    pub dual_bound: f64,
    /// Best revenue seen after each phase. Never decreasing.
    pub revenue_history: Vec<f64>,
}
