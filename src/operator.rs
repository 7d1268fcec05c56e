use crate::errors::ParseError;
use crate::operator::Operator::{Addition, Division, Multiplication, Subtraction};
use std::fmt;
use std::str::FromStr;

/// The arithmetic operator joining the operands of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operator {
    /// The single-character form used in equations.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Addition => '+',
            Subtraction => '-',
            Multiplication => '*',
            Division => '/',
        }
    }

    #[must_use]
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Addition),
            '-' => Some(Subtraction),
            '*' => Some(Multiplication),
            '/' => Some(Division),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Addition => "addition",
            Subtraction => "subtraction",
            Multiplication => "multiplication",
            Division => "division",
        }
    }

    /// The operator this one is solved through.
    ///
    /// Subtraction is solved as addition and division as multiplication;
    /// the two base operators map to themselves.
    #[must_use]
    pub fn base(self) -> Self {
        match self {
            Addition | Subtraction => Addition,
            Multiplication | Division => Multiplication,
        }
    }

    #[must_use]
    pub fn is_base(self) -> bool {
        self.base() == self
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Operator::from_symbol(c),
            _ => None,
        }
        .ok_or_else(|| ParseError::InvalidOperator { op: s.to_string() })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
