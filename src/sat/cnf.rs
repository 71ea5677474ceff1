#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The CNF model: a validated, immutable list of clauses over `num_vars` variables.
//!
//! Construction is the only place a formula is checked. Once a `Cnf` exists
//! every literal is nonzero, every clause is nonempty and every variable lies
//! in `[1, num_vars]`, so the search never has to bounds-check.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::clause::Clause;
use crate::sat::error::CnfError;
use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// The largest variable of a formula over `num_vars` variables.
///
/// Literals are signed `i32`s, so no formula may declare more than
/// `i32::MAX` variables.
///
/// # Errors
///
/// [`CnfError::TooManyVariables`] if `num_vars` exceeds `i32::MAX`.
pub fn max_variable(num_vars: usize) -> Result<Variable, CnfError> {
    i32::try_from(num_vars)
        .map(i32::unsigned_abs)
        .map_err(|_| CnfError::TooManyVariables { num_vars })
}

/// A formula in conjunctive normal form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    /// Number of variables; valid variables are `1..=num_vars`.
    pub num_vars: usize,
    /// Clauses in input order.
    pub clauses: Vec<Clause>,
    /// For each variable, the indices of the clauses that mention it (ascending, no repeats).
    occurrences: Vec<SmallVec<[usize; 6]>>,
}

impl Cnf {
    /// Builds and validates a formula from DIMACS-style signed integers.
    ///
    /// # Errors
    ///
    /// - [`CnfError::TooManyVariables`] if `num_vars` exceeds `i32::MAX`.
    ///   Nothing is allocated in that case.
    /// - [`CnfError::InvalidLiteral`] if a literal is `0`.
    /// - [`CnfError::EmptyClause`] if a clause has no literals.
    /// - [`CnfError::VariableOutOfRange`] if a literal's variable exceeds `num_vars`.
    pub fn new<I, J>(num_vars: usize, clauses: I) -> Result<Self, CnfError>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = i32>,
    {
        max_variable(num_vars)?;

        let clauses = clauses
            .into_iter()
            .enumerate()
            .map(|(idx, raw)| -> Result<Clause, CnfError> {
                let literals: Vec<Literal> = raw
                    .into_iter()
                    .map(Literal::try_from)
                    .collect::<Result<_, _>>()?;

                if literals.is_empty() {
                    return Err(CnfError::EmptyClause { clause: idx });
                }

                if let Some(lit) = literals
                    .iter()
                    .find(|l| l.variable() as usize > num_vars)
                {
                    return Err(CnfError::VariableOutOfRange {
                        clause: idx,
                        literal: lit.to_i32(),
                        num_vars,
                    });
                }

                Ok(Clause::new(literals))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_validated(num_vars, clauses))
    }

    /// Builds a formula whose variable count is the largest variable mentioned.
    ///
    /// # Errors
    ///
    /// See [`Cnf::new`]. A literal of `i32::MIN` implies more variables than
    /// can be represented and is reported as [`CnfError::TooManyVariables`].
    pub fn from_clauses(clauses: Vec<Vec<i32>>) -> Result<Self, CnfError> {
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|l| l.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);

        Self::new(num_vars, clauses)
    }

    fn from_validated(num_vars: usize, clauses: Vec<Clause>) -> Self {
        let mut occurrences = vec![SmallVec::new(); num_vars + 1];
        for (idx, clause) in clauses.iter().enumerate() {
            for var in clause.variables() {
                let occ: &mut SmallVec<[usize; 6]> = &mut occurrences[var as usize];
                if occ.last() != Some(&idx) {
                    occ.push(idx);
                }
            }
        }

        Self {
            num_vars,
            clauses,
            occurrences,
        }
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Total number of literals across all clauses.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Indices of the clauses that mention `var`.
    #[must_use]
    pub fn occurrences(&self, var: Variable) -> &[usize] {
        &self.occurrences[var as usize]
    }

    /// Whether every clause is satisfied by `assignment`.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Checks a DIMACS model against the formula. Variables missing from the
    /// model count as `false`.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        let mut assignment = Assignment::new(self.num_vars);
        for &lit in solutions.iter() {
            let var = lit.unsigned_abs() as usize;
            if var == 0 || var > self.num_vars {
                return false;
            }
            if lit > 0 {
                assignment.set(lit.unsigned_abs(), true);
            }
        }
        self.is_satisfied_by(&assignment)
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl Display for Cnf {
    /// Writes the formula in DIMACS format.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{} 0", clause.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_clause_order() {
        let cnf = Cnf::new(3, vec![vec![1, -2], vec![3], vec![-1, 2, -3]]).unwrap();
        assert_eq!(cnf.num_clauses(), 3);
        assert_eq!(cnf.num_literals(), 6);
        assert_eq!(cnf[1][0], Literal::new(3, true));
    }

    #[test]
    fn test_rejects_empty_clause() {
        let err = Cnf::new(2, vec![vec![1], vec![]]).unwrap_err();
        assert_eq!(err, CnfError::EmptyClause { clause: 1 });
    }

    #[test]
    fn test_rejects_out_of_range_variable() {
        let err = Cnf::new(2, vec![vec![1, -3]]).unwrap_err();
        assert_eq!(
            err,
            CnfError::VariableOutOfRange {
                clause: 0,
                literal: -3,
                num_vars: 2
            }
        );
    }

    #[test]
    fn test_rejects_zero_literal() {
        let err = Cnf::new(2, vec![vec![1, 0, 2]]).unwrap_err();
        assert_eq!(err, CnfError::InvalidLiteral { literal: 0 });
    }

    #[test]
    fn test_rejects_unrepresentable_variable_count() {
        for num_vars in [i32::MAX as usize + 1, usize::MAX] {
            let err = Cnf::new(num_vars, vec![vec![1]]).unwrap_err();
            assert_eq!(err, CnfError::TooManyVariables { num_vars });
        }
        assert_eq!(max_variable(i32::MAX as usize), Ok(Variable::MAX >> 1));
        assert_eq!(max_variable(0), Ok(0));
    }

    #[test]
    fn test_from_clauses_infers_variables() {
        let cnf = Cnf::from_clauses(vec![vec![1, -5], vec![2]]).unwrap();
        assert_eq!(cnf.num_vars, 5);
    }

    #[test]
    fn test_occurrences_list_each_clause_once() {
        let cnf = Cnf::new(3, vec![vec![1, -1, 2], vec![2, 3], vec![-1]]).unwrap();
        assert_eq!(cnf.occurrences(1), &[0, 2]);
        assert_eq!(cnf.occurrences(2), &[0, 1]);
        assert_eq!(cnf.occurrences(3), &[1]);
    }

    #[test]
    fn test_verify() {
        let cnf = Cnf::new(2, vec![vec![1, 2], vec![-1, -2]]).unwrap();
        assert!(cnf.verify(&Solutions(vec![1, -2])));
        assert!(!cnf.verify(&Solutions(vec![1, 2])));
        assert!(!cnf.verify(&Solutions(vec![1, 7])));
    }

    #[test]
    fn test_display_is_dimacs() {
        let cnf = Cnf::new(3, vec![vec![1, -2], vec![3]]).unwrap();
        assert_eq!(cnf.to_string(), "p cnf 3 2\n1 -2 0\n3 0\n");
    }
}
