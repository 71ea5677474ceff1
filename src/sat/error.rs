#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error types for formula construction, DIMACS input and solver configuration.
//!
//! Structural problems with a formula are reported as [`CnfError`] before any
//! search starts. Problems reading or parsing an input source are reported as
//! [`DimacsError`] and never reach the solver.

use std::io;
use thiserror::Error;

/// A formula that violates the structural invariants of a CNF model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CnfError {
    #[error("literal {literal} is not a valid nonzero literal")]
    InvalidLiteral { literal: i32 },

    #[error("{num_vars} variables cannot be represented; the limit is {}", i32::MAX)]
    TooManyVariables { num_vars: usize },

    #[error("clause {clause} is empty")]
    EmptyClause { clause: usize },

    #[error("clause {clause} mentions literal {literal}, but the formula only has {num_vars} variables")]
    VariableOutOfRange {
        clause: usize,
        literal: i32,
        num_vars: usize,
    },
}

/// The input source could not be turned into a formula.
#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("missing `p cnf <variables> <clauses>` problem line")]
    MissingHeader,

    #[error("line {line}: invalid problem line `{text}`")]
    InvalidHeader { line: usize, text: String },

    #[error("line {line}: failed to parse literal `{token}`")]
    InvalidLiteral { line: usize, token: String },

    #[error("more clauses than specified (expected {expected})")]
    TooManyClauses { expected: usize },

    #[error("fewer clauses than specified (expected {expected}, found {found})")]
    TooFewClauses { expected: usize, found: usize },

    #[error(transparent)]
    Cnf(#[from] CnfError),
}

/// A solver configuration that cannot be run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    #[error("noise must be a probability in [0, 1], got {0}")]
    InvalidNoise(f64),
}
