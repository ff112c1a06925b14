use crate::market::Market;

fn alpha_cap(epsilon: f64) -> f64 {
    1.0 / (epsilon * epsilon) - 1.0
}

/// Dual variables of a solver run.
///
/// Each agent carries a multiplier `alpha` that discounts every bid it makes:
/// the effective bid is `value / (1 + alpha)`. Raising `alpha` makes an
/// overloaded agent less attractive, which is the only mechanism by which
/// items move between agents across phases. Each item carries a price, the
/// effective bid it was last committed at, frozen for the rest of the phase.
///
/// Overload is judged against a cap on nominal consumption that widens as
/// the multiplier grows: agent `i` is tight once it holds more than
/// `1 + beta * (1 + alpha_i) / (4 - beta)` times its budget, where `beta` is
/// the market's bid-to-budget ratio. Holding above budget is allowed up to
/// that cap; rounding later settles every agent's payment at its budget.
///
/// Multipliers grow along a geometric ladder: the first raise goes to
/// `epsilon`, every later one multiplies by `1 + epsilon`, and the ladder is
/// clamped once the discount factor falls below `epsilon^2`. The clamp bounds
/// the number of distinct multiplier values, and through it the number of
/// phases a run can spend raising them.
#[derive(Debug, Clone)]
pub struct DualState {
    alpha: Vec<f64>,
    item_price: Vec<f64>,
    frozen: Vec<bool>,
    epsilon: f64,
    beta: f64,
    alpha_cap: f64,
}

impl DualState {
    pub fn new(num_agents: usize, num_items: usize, epsilon: f64, beta: f64) -> Self {
        Self {
            alpha: vec![0.0; num_agents],
            item_price: vec![0.0; num_items],
            frozen: vec![false; num_items],
            epsilon,
            beta,
            alpha_cap: alpha_cap(epsilon),
        }
    }

    /// Number of raises it takes one agent to walk the full ladder.
    pub fn ladder_len(epsilon: f64) -> usize {
        let cap = alpha_cap(epsilon);
        let mut alpha = 0.0;
        let mut steps = 0;
        while alpha < cap {
            alpha = if alpha == 0.0 {
                epsilon.min(cap)
            } else {
                (alpha * (1.0 + epsilon)).min(cap)
            };
            steps += 1;
        }
        steps
    }

    pub fn alpha(&self, agent: usize) -> f64 {
        self.alpha[agent]
    }

    /// True once `agent` has exhausted its ladder.
    pub fn at_cap(&self, agent: usize) -> bool {
        self.alpha[agent] >= self.alpha_cap
    }

    /// The increment the next raise of `agent` would apply. Zero at the cap.
    pub fn next_increment(&self, agent: usize) -> f64 {
        let alpha = self.alpha[agent];
        if alpha >= self.alpha_cap {
            return 0.0;
        }
        let next = if alpha == 0.0 {
            self.epsilon.min(self.alpha_cap)
        } else {
            (alpha * (1.0 + self.epsilon)).min(self.alpha_cap)
        };
        next - alpha
    }

    /// Raises the multiplier of `agent`, clamping at the ladder cap.
    pub fn raise(&mut self, agent: usize, increment: f64) {
        debug_assert!(increment >= 0.0);
        self.alpha[agent] = (self.alpha[agent] + increment).min(self.alpha_cap);
    }

    /// The bid of `agent` discounted by its current multiplier.
    pub fn effective_bid(&self, value: f64, agent: usize) -> f64 {
        value / (1.0 + self.alpha[agent])
    }

    /// Consumption `agent` may hold, as a multiple of its budget, before it
    /// counts as overloaded. Grows with the agent's multiplier.
    pub fn load_cap(&self, agent: usize) -> f64 {
        1.0 + self.beta * (1.0 + self.alpha[agent]) / (4.0 - self.beta)
    }

    /// True once the nominal value held by `agent` exceeds its load cap.
    pub fn is_tight(&self, agent: usize, consumption: f64, budget: f64) -> bool {
        consumption > self.load_cap(agent) * budget
    }

    pub fn item_price(&self, item: usize) -> f64 {
        self.item_price[item]
    }

    pub fn is_frozen(&self, item: usize) -> bool {
        self.frozen[item]
    }

    /// Opens a new phase by thawing every item. Prices survive; items that
    /// stay assigned are expected to be re-frozen by the caller before
    /// processing starts.
    pub fn begin_phase(&mut self) {
        self.frozen.fill(false);
    }

    /// Marks an item's price as fixed for the remainder of the phase.
    pub fn freeze(&mut self, item: usize) {
        self.frozen[item] = true;
    }

    /// Prices an item at the effective bid it was committed at and freezes it.
    pub fn commit_price(&mut self, item: usize, price: f64) {
        debug_assert!(!self.frozen[item]);
        self.item_price[item] = price;
        self.frozen[item] = true;
    }

    /// Clears an item's price when its assignment is withdrawn.
    pub fn release(&mut self, item: usize) {
        self.item_price[item] = 0.0;
        self.frozen[item] = false;
    }

    /// Value of the dual solution: by weak duality an upper bound on the
    /// value of any allocation, fractional ones included.
    ///
    /// An agent with multiplier `alpha` contributes `alpha / (1 + alpha)` of
    /// its budget; every item contributes the best effective bid on it.
    pub fn dual_value(&self, market: &Market) -> f64 {
        let mut total = 0.0;
        for agent in 0..market.num_agents() {
            let alpha = self.alpha[agent];
            total += market.budget(agent) * alpha / (1.0 + alpha);
        }
        for item in 0..market.num_items() {
            let best = market
                .bids_for_item(item)
                .iter()
                .map(|b| self.effective_bid(b.value, b.agent))
                .fold(0.0f64, f64::max);
            total += best;
        }
        total
    }
}
