//! Arithmetic queries for the on-page calculator
//!
//! Operands are drawn from a seedable RNG so a failing run can be replayed
//! with `SEARCH_PROBE_SEED`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Binary operator understood by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }
}

/// `"<lhs> <op> <rhs>"` with its locally computed answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathQuery {
    pub lhs: u32,
    pub rhs: u32,
    pub op: Operator,
}

impl MathQuery {
    #[must_use]
    pub fn new(lhs: u32, op: Operator, rhs: u32) -> Self {
        Self { lhs, rhs, op }
    }

    /// Text typed into the search input
    #[must_use]
    pub fn query_text(&self) -> String {
        self.to_string()
    }

    /// Value the calculator should display
    ///
    /// Non-finite for a zero divisor.
    #[must_use]
    pub fn expected(&self) -> f64 {
        self.op.apply(f64::from(self.lhs), f64::from(self.rhs))
    }
}

impl fmt::Display for MathQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// Seeded source of random operands in `[0, bound)`
///
/// The divisor of a division is drawn from `[1, bound)` so the expected value
/// stays finite.
#[derive(Debug, Clone)]
pub struct OperandSource {
    rng: StdRng,
    seed: u64,
    bound: u32,
}

impl OperandSource {
    /// Source seeded with `seed`, or with a fresh random seed when `None`
    ///
    /// The seed in use is logged either way.
    #[must_use]
    pub fn new(seed: Option<u64>, bound: u32) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        info!("Arithmetic operands seeded with {} (bound {})", seed, bound);
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            bound: bound.max(1),
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a query for `op`
    pub fn next_query(&mut self, op: Operator) -> MathQuery {
        let lhs = self.rng.random_range(0..self.bound);
        let rhs = if op == Operator::Divide && self.bound > 1 {
            self.rng.random_range(1..self.bound)
        } else {
            self.rng.random_range(0..self.bound)
        };
        MathQuery::new(lhs, op, rhs)
    }
}
