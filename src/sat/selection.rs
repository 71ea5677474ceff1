#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Picks the violated clause that the next flip will repair.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use fastrand::Rng;

/// Chooses one violated clause uniformly at random.
///
/// Every call makes one full pass over the formula. The buffer of violated
/// clause indices is kept between calls to avoid reallocating on each flip.
#[derive(Debug, Clone, Default)]
pub struct UnsatisfiedClauseSelector {
    unsatisfied: Vec<usize>,
}

impl UnsatisfiedClauseSelector {
    #[must_use]
    pub fn new(num_clauses: usize) -> Self {
        Self {
            unsatisfied: Vec::with_capacity(num_clauses),
        }
    }

    /// Returns the index of a violated clause, each violated clause being
    /// equally likely, or `None` when `assignment` satisfies the whole formula.
    pub fn pick(&mut self, cnf: &Cnf, assignment: &Assignment, rng: &mut Rng) -> Option<usize> {
        self.collect(cnf, assignment);

        match self.unsatisfied.len() {
            0 => None,
            n => Some(self.unsatisfied[rng.usize(..n)]),
        }
    }

    /// Number of violated clauses found by the most recent pass.
    #[must_use]
    pub fn last_count(&self) -> usize {
        self.unsatisfied.len()
    }

    fn collect(&mut self, cnf: &Cnf, assignment: &Assignment) {
        self.unsatisfied.clear();
        self.unsatisfied.extend(
            cnf.iter()
                .enumerate()
                .filter(|(_, c)| !c.is_satisfied(assignment))
                .map(|(i, _)| i),
        );
    }
}

/// Counts the clauses violated by `assignment`.
#[must_use]
pub fn count_unsatisfied(cnf: &Cnf, assignment: &Assignment) -> usize {
    cnf.iter().filter(|c| !c.is_satisfied(assignment)).count()
}
