#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Chooses which variable of a violated clause to flip.
//!
//! This is the WalkSAT/SKC rule. With probability `noise` the move is a random
//! walk: any variable of the clause, uniformly. Otherwise the move is greedy:
//! the variable whose flip breaks the fewest currently satisfied clauses.
//!
//! Random-walk moves sample a literal position of the clause. Clauses never
//! hold the same literal twice, and a violated clause cannot hold both
//! polarities of a variable (one of them would be true), so on a violated
//! clause this is uniform over its distinct variables.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Variable;
use fastrand::Rng;

/// How a flip was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    RandomWalk,
    Greedy,
}

/// The outcome of one heuristic decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipChoice {
    pub variable: Variable,
    pub kind: MoveKind,
    /// Break-count of `variable`; only computed for greedy moves.
    pub break_count: Option<usize>,
}

/// Whether flipping `var` would turn `clause` from satisfied to violated.
///
/// That happens exactly when every true literal of the clause belongs to `var`
/// and none of its false literals does (those become true after the flip).
fn breaks(clause: &Clause, assignment: &Assignment, var: Variable) -> bool {
    let mut satisfied = false;
    for &lit in clause.iter() {
        let value = assignment.literal_value(lit);
        if lit.variable() == var {
            if !value {
                return false;
            }
            satisfied = true;
        } else if value {
            return false;
        }
    }
    satisfied
}

/// Number of clauses, other than the clause at `clause_idx`, that are satisfied
/// now and would be violated after flipping `var`.
///
/// Only clauses mentioning `var` can break, so only those are scanned. The
/// excluded clause is identified by index, so a textually identical clause
/// elsewhere in the formula is still counted.
#[must_use]
pub fn break_count(cnf: &Cnf, assignment: &Assignment, var: Variable, clause_idx: usize) -> usize {
    cnf.occurrences(var)
        .iter()
        .filter(|&&idx| idx != clause_idx && breaks(&cnf[idx], assignment, var))
        .count()
}

/// The noise-driven WalkSAT flip heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipHeuristic {
    noise: f64,
}

impl FlipHeuristic {
    #[must_use]
    pub const fn new(noise: f64) -> Self {
        Self { noise }
    }

    /// Picks the variable to flip in the violated clause at `clause_idx`.
    ///
    /// One uniform draw `r` in `[0, 1)` decides the policy: `r < noise` takes a
    /// random-walk move, anything else a greedy move. Greedy ties go to the
    /// variable that comes first in the clause.
    ///
    /// # Panics
    ///
    /// If the clause is empty. A validated [`Cnf`] never contains one.
    pub fn pick(
        &self,
        cnf: &Cnf,
        assignment: &Assignment,
        clause_idx: usize,
        rng: &mut Rng,
    ) -> FlipChoice {
        let clause = &cnf[clause_idx];

        if rng.f64() < self.noise {
            let lit = clause[rng.usize(..clause.len())];
            return FlipChoice {
                variable: lit.variable(),
                kind: MoveKind::RandomWalk,
                break_count: None,
            };
        }

        let mut best: Option<(Variable, usize)> = None;
        for var in clause.variables() {
            let count = break_count(cnf, assignment, var, clause_idx);
            if best.is_none_or(|(_, b)| count < b) {
                best = Some((var, count));
            }
            if count == 0 {
                // Nothing later in the clause can beat a zero.
                break;
            }
        }

        let (variable, count) = best.expect("validated clauses are never empty");
        FlipChoice {
            variable,
            kind: MoveKind::Greedy,
            break_count: Some(count),
        }
    }
}
