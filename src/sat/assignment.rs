#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The truth assignment mutated by local search.
//!
//! Unlike a partial assignment in a backtracking solver, every variable always
//! has a value here: the search starts from a random total assignment and only
//! ever flips single variables.

use crate::sat::literal::{Literal, Variable};
use bit_vec::BitVec;
use core::ops::Index;
use fastrand::Rng;
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// A total assignment over variables `1..=num_vars`.
///
/// Slot 0 is allocated but never read so that variables index directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(BitVec);

impl Assignment {
    /// Creates an assignment with every variable set to `false`.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(BitVec::from_elem(num_vars + 1, false))
    }

    /// Creates an assignment where every variable is drawn independently and uniformly.
    #[must_use]
    pub fn random(num_vars: usize, rng: &mut Rng) -> Self {
        let mut assignment = Self::new(num_vars);
        assignment.randomise(rng);
        assignment
    }

    /// Redraws every variable independently and uniformly.
    pub fn randomise(&mut self, rng: &mut Rng) {
        for i in 1..self.0.len() {
            self.0.set(i, rng.bool());
        }
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    #[must_use]
    pub fn value(&self, var: Variable) -> bool {
        self[var]
    }

    pub fn set(&mut self, var: Variable, value: bool) {
        self.0.set(var as usize, value);
    }

    /// Toggles the value of `var`.
    pub fn flip(&mut self, var: Variable) {
        let i = var as usize;
        let value = self.0[i];
        self.0.set(i, !value);
    }

    /// Whether `lit` is true under this assignment.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> bool {
        self[lit.variable()] == lit.polarity()
    }

    /// The assignment as one signed literal per variable, in variable order.
    ///
    /// # Panics
    ///
    /// If the assignment covers more than `i32::MAX` variables. Assignments
    /// sized from a [`Cnf`](crate::sat::cnf::Cnf) never do.
    #[must_use]
    pub fn to_solutions(&self) -> Solutions {
        Solutions(
            (1..)
                .zip(self.0.iter().skip(1))
                .map(|(var, value)| Literal::new(var, value).to_i32())
                .collect(),
        )
    }
}

impl Index<Variable> for Assignment {
    type Output = bool;

    fn index(&self, var: Variable) -> &Self::Output {
        &self.0[var as usize]
    }
}

/// A model in DIMACS form: one signed literal per variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions(pub Vec<i32>);

impl Solutions {
    pub fn iter(&self) -> impl Iterator<Item = &i32> {
        self.0.iter()
    }
}

impl Display for Solutions {
    /// Renders the competition `v` line, terminated by `0`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return write!(f, "v 0");
        }
        write!(f, "v {} 0", self.0.iter().join(" "))
    }
}
