use crate::dual::DualState;
use crate::error::{Result, ValidationError};

/// Parameters of a solver run.
///
/// # Examples
///
/// ```
/// use budgeted_alloc::solver::SolveConfig;
///
/// let config = SolveConfig::new(0.1) // guarantee within 10% of the bound
///     .with_beta_override(0.5)
///     .with_max_phases(500);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveConfig {
    /// Accuracy parameter, strictly between 0 and 1. Smaller values tighten
    /// the guarantee and lengthen the multiplier ladder, so runs take more
    /// phases to settle.
    pub epsilon: f64,
    /// Replaces the bid-to-budget ratio the run works with, in `(0, 1]`.
    /// The ratio sets both the reported guarantee and the overload allowance
    /// agents get during a run. Useful when the caller knows a tighter ratio
    /// than the market's observed maximum, for instance across a family of
    /// related markets.
    pub beta_override: Option<f64>,
    /// Hard cap on the total number of phases. Zero means derive a budget
    /// from the market size and the ladder length; the derived budget is
    /// only charged by phases that raise a multiplier, so it never cuts a
    /// run short.
    pub max_phases: usize,
}

impl SolveConfig {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            beta_override: None,
            max_phases: 0,
        }
    }

    pub fn with_beta_override(mut self, beta: f64) -> Self {
        self.beta_override = Some(beta);
        self
    }

    pub fn with_max_phases(mut self, phases: usize) -> Self {
        self.max_phases = phases;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 || self.epsilon >= 1.0 {
            return Err(ValidationError::BadEpsilon {
                epsilon: self.epsilon,
            });
        }
        if let Some(beta) = self.beta_override {
            if !beta.is_finite() || beta <= 0.0 || beta > 1.0 {
                return Err(ValidationError::BadBetaOverride { beta });
            }
        }
        Ok(())
    }

    /// The phase budget for a market with `num_agents` agents: the explicit
    /// cap if one was set, otherwise one charged phase per possible raise
    /// plus the quiet phase that confirms the fixed point.
    pub(crate) fn phase_cap(&self, num_agents: usize) -> usize {
        if self.max_phases > 0 {
            self.max_phases
        } else {
            num_agents * DualState::ladder_len(self.epsilon) + 1
        }
    }
}
