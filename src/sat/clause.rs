#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clauses and the clause evaluator.

use crate::sat::assignment::Assignment;
use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// A disjunction of literals with an explicit length.
///
/// Literal order is kept as given. Repeated copies of the same literal are
/// dropped on construction (the first occurrence stays), so every literal
/// position names a distinct literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; 8]>,
}

impl Clause {
    #[must_use]
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut seen = FxHashSet::default();
        let literals = literals.into_iter().filter(|l| seen.insert(*l)).collect();
        Self { literals }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Variables of the clause in literal order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.literals.iter().map(|l| l.variable())
    }

    /// Whether at least one literal is true under `assignment`.
    ///
    /// Scans in storage order and stops at the first true literal.
    #[must_use]
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.literals.iter().any(|&l| assignment.literal_value(l))
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl AsRef<[Literal]> for Clause {
    fn as_ref(&self) -> &[Literal] {
        &self.literals
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter)
    }
}
