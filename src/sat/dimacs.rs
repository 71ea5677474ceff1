#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF (Conjunctive Normal Form) file format.
//!
//! The DIMACS CNF format is a standard text-based format for representing
//! boolean satisfiability problems. The format includes:
//! - Comment lines starting with 'c'.
//! - A problem line `p cnf <num_variables> <num_clauses>`, which must come
//!   before the first clause.
//! - Clauses: whitespace-separated nonzero integers (positive for the variable,
//!   negative for its negation), each clause terminated by a `0`. A clause may
//!   span several lines and a line may hold several clauses.
//! - An optional '%' line to indicate end-of-data (often used in competitions).
//!
//! The declared clause count is enforced and every variable must lie within the
//! declared variable count. A `0` with no literals before it is an empty clause
//! and is rejected. Literals left without a terminating `0` at end of input
//! form a final clause.

use crate::sat::cnf::Cnf;
use crate::sat::error::DimacsError;
use std::io::{self, BufRead};
use std::mem;
use std::path::Path;

fn parse_header(line: usize, text: &str) -> Result<(usize, usize), DimacsError> {
    let invalid = || DimacsError::InvalidHeader {
        line,
        text: text.to_string(),
    };

    let mut parts = text.split_whitespace();
    if parts.next() != Some("p") || parts.next() != Some("cnf") {
        return Err(invalid());
    }

    let num_vars = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(invalid)?;
    let num_clauses = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(invalid)?;

    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok((num_vars, num_clauses))
}

fn parse_literal(line: usize, token: &str) -> Result<i32, DimacsError> {
    token.parse::<i32>().map_err(|_| DimacsError::InvalidLiteral {
        line,
        token: token.to_string(),
    })
}

/// Parses DIMACS formatted data from a `BufRead` source into a [`Cnf`].
///
/// # Errors
///
/// - [`DimacsError::Io`] if reading fails.
/// - [`DimacsError::MissingHeader`] if a clause appears before the problem
///   line, or there is no problem line at all.
/// - [`DimacsError::InvalidHeader`] / [`DimacsError::InvalidLiteral`] on
///   malformed lines.
/// - [`DimacsError::TooManyClauses`] / [`DimacsError::TooFewClauses`] if the
///   clause count differs from the problem line.
/// - [`DimacsError::Cnf`] if the clauses break the formula invariants.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, DimacsError> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut current: Vec<i32> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let text = line.trim();

        if text.is_empty() || text.starts_with('c') {
            continue;
        }
        if text.starts_with('%') {
            break;
        }
        if text.starts_with('p') {
            if header.is_some() {
                return Err(DimacsError::InvalidHeader {
                    line: line_no,
                    text: text.to_string(),
                });
            }
            header = Some(parse_header(line_no, text)?);
            continue;
        }

        let Some((_, expected)) = header else {
            return Err(DimacsError::MissingHeader);
        };

        for token in text.split_whitespace() {
            let value = parse_literal(line_no, token)?;
            if clauses.len() >= expected {
                return Err(DimacsError::TooManyClauses { expected });
            }
            if value == 0 {
                clauses.push(mem::take(&mut current));
            } else {
                current.push(value);
            }
        }
    }

    let Some((num_vars, expected)) = header else {
        return Err(DimacsError::MissingHeader);
    };

    if !current.is_empty() {
        clauses.push(current);
    }

    if clauses.len() != expected {
        return Err(DimacsError::TooFewClauses {
            expected,
            found: clauses.len(),
        });
    }

    Ok(Cnf::new(num_vars, clauses)?)
}

/// Parses DIMACS text held in memory.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_dimacs_str(input: &str) -> Result<Cnf, DimacsError> {
    parse_dimacs(input.as_bytes())
}

/// Parses a DIMACS CNF file specified by its path.
///
/// # Errors
///
/// [`DimacsError::Io`] if the file cannot be opened, otherwise see [`parse_dimacs`].
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> Result<Cnf, DimacsError> {
    let file = std::fs::File::open(file_path)?;
    parse_dimacs(io::BufReader::new(file))
}

/// Parses headerless clause text: literals separated by whitespace, each
/// clause ended by a `0` or by the end of its line. A `0` in the middle of a
/// line starts a new clause there, as in [`parse_dimacs`]. Comment and problem
/// lines are skipped, as are blank lines.
///
/// # Errors
///
/// [`DimacsError::InvalidLiteral`] if a token is not an integer.
pub fn parse_textual_cnf(input: &str) -> Result<Vec<Vec<i32>>, DimacsError> {
    let mut clauses = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let text = line.trim();
        if text.is_empty() || text.starts_with('c') || text.starts_with('p') {
            continue;
        }

        let mut current = Vec::new();
        for token in text.split_whitespace() {
            match parse_literal(idx + 1, token)? {
                0 => clauses.push(mem::take(&mut current)),
                lit => current.push(lit),
            }
        }
        if !current.is_empty() {
            clauses.push(current);
        }
    }

    Ok(clauses)
}
