#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Random k-SAT instances for testing and benchmarking.
//!
//! Every clause draws `k` distinct variables uniformly and gives each a random
//! polarity. Planted instances additionally hide an assignment and repair any
//! clause it would violate, so they are satisfiable by construction.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::{Cnf, max_variable};
use crate::sat::error::CnfError;
use crate::sat::literal::{Literal, Variable};
use fastrand::Rng;
use smallvec::SmallVec;

fn random_clause(max_var: Variable, k: usize, rng: &mut Rng) -> SmallVec<[Literal; 8]> {
    let k = k.min(max_var as usize);
    let mut vars: SmallVec<[Variable; 8]> = SmallVec::with_capacity(k);

    while vars.len() < k {
        let var = rng.u32(1..=max_var);
        if !vars.contains(&var) {
            vars.push(var);
        }
    }

    vars.into_iter()
        .map(|v| Literal::new(v, rng.bool()))
        .collect()
}

/// A uniform random k-SAT formula.
///
/// `k` is capped at `num_vars`.
///
/// # Errors
///
/// - [`CnfError::TooManyVariables`] if `num_vars` exceeds `i32::MAX`.
/// - [`CnfError::EmptyClause`] if clauses are requested but `num_vars` or `k` is zero.
pub fn random_k_sat(
    num_vars: usize,
    num_clauses: usize,
    k: usize,
    rng: &mut Rng,
) -> Result<Cnf, CnfError> {
    let max_var = max_variable(num_vars)?;
    let clauses = (0..num_clauses).map(|_| {
        random_clause(max_var, k, rng)
            .into_iter()
            .map(Literal::to_i32)
            .collect::<Vec<_>>()
    });

    Cnf::new(num_vars, clauses.collect::<Vec<_>>())
}

/// A random k-SAT formula satisfied by the returned hidden assignment.
///
/// # Errors
///
/// See [`random_k_sat`].
pub fn planted_k_sat(
    num_vars: usize,
    num_clauses: usize,
    k: usize,
    rng: &mut Rng,
) -> Result<(Cnf, Assignment), CnfError> {
    let max_var = max_variable(num_vars)?;
    let hidden = Assignment::random(num_vars, rng);

    let clauses = (0..num_clauses)
        .map(|_| {
            let mut clause = random_clause(max_var, k, rng);
            if !clause.is_empty() && !clause.iter().any(|&l| hidden.literal_value(l)) {
                let i = rng.usize(..clause.len());
                clause[i] = clause[i].negated();
            }
            clause.into_iter().map(Literal::to_i32).collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    Ok((Cnf::new(num_vars, clauses)?, hidden))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_k_sat_shape() {
        let cnf = random_k_sat(10, 42, 3, &mut Rng::with_seed(1)).unwrap();
        assert_eq!(cnf.num_vars, 10);
        assert_eq!(cnf.num_clauses(), 42);
        for clause in cnf.iter() {
            assert_eq!(clause.len(), 3);
            let mut vars: Vec<_> = clause.variables().collect();
            vars.sort_unstable();
            vars.dedup();
            assert_eq!(vars.len(), 3);
            assert!(vars.iter().all(|&v| (1..=10).contains(&v)));
        }
    }

    #[test]
    fn test_k_is_capped() {
        let cnf = random_k_sat(2, 5, 3, &mut Rng::with_seed(4)).unwrap();
        assert!(cnf.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_planted_is_satisfied_by_hidden_assignment() {
        let mut rng = Rng::with_seed(8);
        let (cnf, hidden) = planted_k_sat(50, 400, 3, &mut rng).unwrap();
        assert!(cnf.is_satisfied_by(&hidden));
    }

    #[test]
    fn test_unrepresentable_variable_count_is_an_error() {
        let num_vars = 3_000_000_000;
        let mut rng = Rng::with_seed(0);
        assert_eq!(
            random_k_sat(num_vars, 0, 3, &mut rng),
            Err(CnfError::TooManyVariables { num_vars })
        );
        assert_eq!(
            planted_k_sat(num_vars, 10, 3, &mut rng).map(|_| ()),
            Err(CnfError::TooManyVariables { num_vars })
        );
    }

    #[test]
    fn test_no_variables_with_clauses_is_an_error() {
        assert!(random_k_sat(0, 1, 3, &mut Rng::with_seed(0)).is_err());
        assert!(random_k_sat(0, 0, 3, &mut Rng::with_seed(0)).is_ok());
    }
}
