//! This crate provides a WalkSAT stochastic local search solver for Boolean
//! satisfiability problems in conjunctive normal form.
//!
//! The solver is incomplete: it either finds a satisfying assignment or gives
//! up once its try/flip budget is spent, which says nothing about whether the
//! formula is actually unsatisfiable.
//!
//! ```
//! use walksat::sat::cnf::Cnf;
//! use walksat::sat::configs::SolverConfig;
//! use walksat::sat::solver::Solver;
//! use walksat::sat::walksat::WalkSat;
//!
//! let cnf = Cnf::from_clauses(vec![vec![1, 2], vec![-1, -2]]).unwrap();
//! let mut solver = WalkSat::new(cnf, SolverConfig::default().with_seed(1)).unwrap();
//! let verdict = solver.solve();
//! assert!(verdict.is_sat());
//! ```

/// The `sat` module implements the CNF model, the local search and DIMACS input.
pub mod sat;
