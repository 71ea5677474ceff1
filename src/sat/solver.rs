#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver interface, its verdicts and run statistics.

use crate::sat::assignment::Assignment;

/// The result of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// A satisfying assignment was found.
    Satisfiable(Assignment),
    /// The try/flip budget (or the deadline) ran out before a satisfying
    /// assignment was found. This is not a proof of unsatisfiability: local
    /// search is incomplete and the formula may well be satisfiable.
    Exhausted,
}

impl Verdict {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }

    /// The witness, if one was found.
    #[must_use]
    pub const fn model(&self) -> Option<&Assignment> {
        match self {
            Self::Satisfiable(a) => Some(a),
            Self::Exhausted => None,
        }
    }

    /// The SAT-competition status line.
    ///
    /// An exhausted search is reported as `s UNSATISFIABLE` for compatibility
    /// with tools that only understand the two competition tokens.
    #[must_use]
    pub const fn status_line(&self) -> &'static str {
        match self {
            Self::Satisfiable(_) => "s SATISFIABLE",
            Self::Exhausted => "s UNSATISFIABLE",
        }
    }
}

/// Counters collected over one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Seed the random number generator was started from.
    pub seed: u64,
    /// Tries started.
    pub tries: usize,
    /// Flips applied across all tries.
    pub flips: usize,
    pub random_walk_moves: usize,
    pub greedy_moves: usize,
    /// Whether the deadline stopped the search.
    pub timed_out: bool,
}

/// A solver that owns its formula and can be run once.
pub trait Solver {
    /// Runs the search to a verdict.
    fn solve(&mut self) -> Verdict;

    /// Statistics from the most recent call to [`Solver::solve`].
    fn stats(&self) -> SolutionStats;
}
