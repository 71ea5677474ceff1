#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Signed literals over 1-based variables.
//!
//! A literal is stored the way DIMACS writes it: the magnitude is the variable
//! index and the sign is the polarity. Zero is never a valid literal.

use crate::sat::error::CnfError;
use core::ops::{Neg, Not};
use std::fmt::{Display, Formatter};

/// A 1-based variable index.
pub type Variable = u32;

/// A nonzero signed literal. Positive literals are satisfied when their
/// variable is `true`, negative literals when it is `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// Builds a literal from a variable and a polarity (`true` = positive).
    ///
    /// # Panics
    ///
    /// If `var` is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        assert!(var != 0, "variable 0 is not a valid variable");
        let var = i32::try_from(var).expect("literal variable overflowed");

        if polarity { Self(var) } else { Self(-var) }
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.is_positive()
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Literal {
    type Error = CnfError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if value == 0 || value == i32::MIN {
            Err(CnfError::InvalidLiteral { literal: value })
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Literal> for i32 {
    fn from(lit: Literal) -> Self {
        lit.0
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_parts() {
        let lit = Literal::new(3, false);
        assert_eq!(lit.variable(), 3);
        assert!(!lit.polarity());
        assert_eq!(lit.to_i32(), -3);
    }

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::new(1, false).negated(), Literal::new(1, true));
        assert_eq!(-Literal::new(1, true), Literal::new(1, false));
        assert_eq!(!Literal::new(2, true), Literal::new(2, false));
    }

    #[test]
    fn test_zero_is_rejected() {
        assert!(Literal::try_from(0).is_err());
        assert_eq!(Literal::try_from(-4).map(Literal::variable), Ok(4));
    }
}
