use crate::market::Market;

/// A budget-feasible assignment of items to agents.
///
/// This is the caller-facing form of a solution: every item has at most one
/// owner and every agent's payments fit its budget. The face values of what
/// an agent holds may exceed the budget; rounding then discounts the
/// marginal item so the payments still fit. Produced by
/// [`round`](super::round), never constructed by hand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    owner: Vec<Option<usize>>,
    payment: Vec<f64>,
    revenue: f64,
}

impl Allocation {
    /// An allocation with nothing assigned.
    pub fn empty(num_agents: usize, num_items: usize) -> Self {
        Self {
            owner: vec![None; num_items],
            payment: vec![0.0; num_agents],
            revenue: 0.0,
        }
    }

    pub(crate) fn new(owner: Vec<Option<usize>>, payment: Vec<f64>) -> Self {
        let revenue = payment.iter().sum();
        Self {
            owner,
            payment,
            revenue,
        }
    }

    pub fn num_agents(&self) -> usize {
        self.payment.len()
    }

    pub fn num_items(&self) -> usize {
        self.owner.len()
    }

    /// The agent `item` is assigned to, if any.
    pub fn owner(&self, item: usize) -> Option<usize> {
        self.owner[item]
    }

    /// What `agent` pays in total.
    pub fn payment(&self, agent: usize) -> f64 {
        self.payment[agent]
    }

    /// Total payment collected over all agents.
    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    /// Items assigned to `agent`, in ascending item order.
    pub fn items_of(&self, agent: usize) -> Vec<usize> {
        self.owner
            .iter()
            .enumerate()
            .filter_map(|(item, &o)| (o == Some(agent)).then_some(item))
            .collect()
    }

    pub fn assigned_count(&self) -> usize {
        self.owner.iter().filter(|o| o.is_some()).count()
    }

    /// Checks that every agent pays at most its budget in total. Holds for
    /// everything the solver returns; exposed so callers can audit results
    /// they stored or transformed.
    pub fn is_budget_feasible(&self, market: &Market) -> bool {
        (0..self.num_agents()).all(|agent| self.payment[agent] <= market.budget(agent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_allocation() {
        let allocation = Allocation::empty(2, 3);
        assert_eq!(allocation.num_agents(), 2);
        assert_eq!(allocation.num_items(), 3);
        assert_eq!(allocation.assigned_count(), 0);
        assert_eq!(allocation.revenue(), 0.0);
        assert_eq!(allocation.owner(1), None);
        assert!(allocation.items_of(0).is_empty());
    }

    #[test]
    fn test_accessors_follow_ownership() {
        let allocation = Allocation::new(vec![Some(1), None, Some(1), Some(0)], vec![2.0, 7.0]);
        assert_eq!(allocation.owner(0), Some(1));
        assert_eq!(allocation.items_of(1), vec![0, 2]);
        assert_eq!(allocation.items_of(0), vec![3]);
        assert_eq!(allocation.assigned_count(), 3);
        assert_eq!(allocation.payment(1), 7.0);
        assert_eq!(allocation.revenue(), 9.0);
    }

    #[test]
    fn test_budget_feasibility_check() {
        let market = Market::builder()
            .with_agent(5.0)
            .with_items(2)
            .with_bid(0, 0, 3.0)
            .with_bid(0, 1, 3.0)
            .build()
            .unwrap();

        let fits = Allocation::new(vec![Some(0), None], vec![3.0]);
        assert!(fits.is_budget_feasible(&market));

        // A payment total of 6 breaks the budget of 5.
        let breaks = Allocation::new(vec![Some(0), Some(0)], vec![6.0]);
        assert!(!breaks.is_budget_feasible(&market));
    }
}
