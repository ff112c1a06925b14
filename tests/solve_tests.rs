//! End-to-end solve scenarios.
//!
//! Cases are data: each builds a market and names the revenue the solver
//! must reach. The harness then checks every result against the same
//! yardsticks: budget feasibility, the brute-force optimum, the advertised
//! guarantee, and the weak-duality bound.

use budgeted_alloc::audit;
use budgeted_alloc::market::Market;
use budgeted_alloc::solver::{SolveConfig, Solver};

const TOL: f64 = 1e-9;
const EPSILON: f64 = 0.1;

struct TestCase {
    name: &'static str,
    /// Builds the market and returns it with the expected revenue.
    build: fn() -> (Market, f64),
}

fn solve_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "two_agents_disjoint_preferences",
            build: || {
                // Each agent has plenty of budget; items simply go to the
                // highest bidder.
                let market = Market::builder()
                    .with_agents(&[100.0, 100.0])
                    .with_items(2)
                    .with_bid(0, 0, 5.0)
                    .with_bid(0, 1, 6.0)
                    .with_bid(1, 0, 7.0)
                    .with_bid(1, 1, 4.0)
                    .build()
                    .unwrap();
                (market, 13.0)
            },
        },
        TestCase {
            name: "single_agent_budget_binds",
            build: || {
                // Two items worth 4 against a budget of 5: both are kept
                // and the budget caps what the agent pays.
                let market = Market::builder()
                    .with_agent(5.0)
                    .with_items(2)
                    .with_bid(0, 0, 4.0)
                    .with_bid(0, 1, 4.0)
                    .build()
                    .unwrap();
                (market, 5.0)
            },
        },
        TestCase {
            name: "capped_payment_realizes_full_budget",
            build: || {
                // Two bids of 6 against a budget of 10. Either item alone
                // leaves revenue short of the guarantee; carrying both with
                // one discounted fills the budget exactly.
                let market = Market::builder()
                    .with_agent(10.0)
                    .with_items(2)
                    .with_bid(0, 0, 6.0)
                    .with_bid(0, 1, 6.0)
                    .build()
                    .unwrap();
                (market, 10.0)
            },
        },
        TestCase {
            name: "contested_item_redistributes",
            build: || {
                // Agent 0 cannot afford both items, so the raise mechanism
                // must hand item 0 to agent 1.
                let market = Market::builder()
                    .with_agents(&[2.0, 2.0])
                    .with_items(2)
                    .with_bid(0, 0, 2.0)
                    .with_bid(0, 1, 2.0)
                    .with_bid(1, 0, 2.0)
                    .build()
                    .unwrap();
                (market, 4.0)
            },
        },
        TestCase {
            name: "canonical_two_agent_market",
            build: || {
                let market = Market::builder()
                    .with_agents(&[300.0, 400.0])
                    .with_items(3)
                    .with_bid(0, 0, 100.0)
                    .with_bid(0, 1, 150.0)
                    .with_bid(1, 1, 150.0)
                    .with_bid(1, 2, 400.0)
                    .build()
                    .unwrap();
                (market, 650.0)
            },
        },
        TestCase {
            name: "rich_bidder_saturates_cheap_rival_cleans_up",
            build: || {
                // Agent 0 bids its whole budget on each of four items and
                // ends up carrying two of them for the price of one; agent 1
                // picks up the remainder.
                let market = Market::builder()
                    .with_agents(&[10.0, 100.0])
                    .with_items(4)
                    .with_bid(0, 0, 10.0)
                    .with_bid(0, 1, 10.0)
                    .with_bid(0, 2, 10.0)
                    .with_bid(0, 3, 10.0)
                    .with_bid(1, 1, 1.0)
                    .with_bid(1, 2, 1.0)
                    .with_bid(1, 3, 1.0)
                    .build()
                    .unwrap();
                (market, 12.0)
            },
        },
        TestCase {
            name: "overbudget_bid_is_ignored",
            build: || {
                // The 50 from agent 0 can never be paid and must not shadow
                // the honest 30 from agent 1.
                let market = Market::builder()
                    .with_agents(&[10.0, 100.0])
                    .with_items(1)
                    .with_bid(0, 0, 50.0)
                    .with_bid(1, 0, 30.0)
                    .build()
                    .unwrap();
                (market, 30.0)
            },
        },
        TestCase {
            name: "competing_budgets_cap_payments",
            build: || {
                let market = Market::builder()
                    .with_agents(&[5.0, 8.0])
                    .with_items(3)
                    .with_bid(0, 0, 4.0)
                    .with_bid(0, 1, 4.0)
                    .with_bid(1, 1, 3.0)
                    .with_bid(1, 2, 6.0)
                    .build()
                    .unwrap();
                (market, 12.0)
            },
        },
        TestCase {
            name: "no_bids_no_revenue",
            build: || {
                let market = Market::builder()
                    .with_agents(&[5.0, 5.0])
                    .with_items(2)
                    .build()
                    .unwrap();
                (market, 0.0)
            },
        },
        TestCase {
            name: "unbid_item_is_left_out",
            build: || {
                let market = Market::builder()
                    .with_agent(10.0)
                    .with_items(3)
                    .with_bid(0, 0, 2.0)
                    .with_bid(0, 2, 3.0)
                    .build()
                    .unwrap();
                (market, 5.0)
            },
        },
    ]
}

#[test]
fn test_solve_cases_reach_expected_revenue() {
    for case in solve_cases() {
        let (market, expected) = (case.build)();
        let result = Solver::run(&market, &SolveConfig::new(EPSILON)).unwrap();
        assert!(
            (result.revenue - expected).abs() < TOL,
            "{}: revenue {} instead of {}",
            case.name,
            result.revenue,
            expected
        );
    }
}

#[test]
fn test_solve_cases_stay_budget_feasible() {
    for case in solve_cases() {
        let (market, _) = (case.build)();
        let result = Solver::run(&market, &SolveConfig::new(EPSILON)).unwrap();
        assert!(
            result.allocation.is_budget_feasible(&market),
            "{}: infeasible allocation",
            case.name
        );
        for agent in 0..market.num_agents() {
            assert!(
                result.allocation.payment(agent) <= market.budget(agent) + TOL,
                "{}: agent {} pays over budget",
                case.name,
                agent
            );
        }
    }
}

#[test]
fn test_solve_cases_meet_guarantee_against_optimum() {
    for case in solve_cases() {
        let (market, _) = (case.build)();
        let config = SolveConfig::new(EPSILON);
        let result = Solver::run(&market, &config).unwrap();
        let optimum = audit::exhaustive_optimum(&market);
        assert!(
            audit::meets_guarantee(result.revenue, optimum, result.beta, config.epsilon),
            "{}: revenue {} misses guarantee {} of optimum {}",
            case.name,
            result.revenue,
            audit::guarantee(result.beta, config.epsilon),
            optimum
        );
        assert!(
            result.dual_bound + TOL >= result.revenue,
            "{}: dual bound {} below revenue {}",
            case.name,
            result.dual_bound,
            result.revenue
        );
    }
}

#[test]
fn test_equal_bids_prefer_lower_agent_id() {
    let market = Market::builder()
        .with_agents(&[10.0, 10.0])
        .with_items(1)
        .with_bid(0, 0, 5.0)
        .with_bid(1, 0, 5.0)
        .build()
        .unwrap();

    let result = Solver::run(&market, &SolveConfig::new(EPSILON)).unwrap();
    assert_eq!(result.allocation.owner(0), Some(0));
    assert!((result.revenue - 5.0).abs() < TOL);
}

#[test]
fn test_equal_max_bids_process_lower_item_first() {
    // All three items carry the same top bid, so they are auctioned by
    // ascending id and the third one finds the agent already over its cap.
    let market = Market::builder()
        .with_agent(10.0)
        .with_items(3)
        .with_bid(0, 0, 9.0)
        .with_bid(0, 1, 9.0)
        .with_bid(0, 2, 9.0)
        .build()
        .unwrap();

    let config = SolveConfig::new(EPSILON).with_max_phases(1);
    let result = Solver::run(&market, &config).unwrap();
    assert_eq!(result.allocation.owner(0), Some(0));
    assert_eq!(result.allocation.owner(1), Some(0));
    assert_eq!(result.allocation.owner(2), None);
    assert!((result.revenue - 10.0).abs() < TOL);
}

#[test]
fn test_tighter_epsilon_does_not_hurt_uncontended_markets() {
    let (market, expected) = (solve_cases()[0].build)();
    let loose = Solver::run(&market, &SolveConfig::new(0.3)).unwrap();
    let tight = Solver::run(&market, &SolveConfig::new(0.05)).unwrap();
    assert!((loose.revenue - expected).abs() < TOL);
    assert!(tight.revenue + TOL >= loose.revenue);
}

#[test]
fn test_guarantee_tightens_with_epsilon_and_beta() {
    let g_loose = audit::guarantee(1.0, 0.3);
    let g_mid = audit::guarantee(1.0, 0.1);
    let g_small_beta = audit::guarantee(0.1, 0.1);
    assert!(g_loose < g_mid);
    assert!(g_mid < g_small_beta);
}
