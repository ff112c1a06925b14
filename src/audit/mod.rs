//! Solution quality checks: revenue accounting, the approximation
//! guarantee, and a brute-force optimum for small markets.

mod bounds;

pub use bounds::{exhaustive_optimum, guarantee, meets_guarantee, revenue};
