//! The normalized puzzle model.
//!
//! A [`Puzzle`] is built once from a result word, an operator and two or more
//! operand words, and never changes afterwards. Subtraction and division
//! puzzles are not searched directly: [`Puzzle::reduce`] builds the equivalent
//! addition or multiplication puzzle instead.

use std::fmt;

use crate::assignment::Assignment;
use crate::errors::ParseError;
use crate::operator::Operator;
use crate::solver::{decode, SolverError};
use crate::symbol::{Symbol, MAX_SYMBOLS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    result: Vec<char>,
    operands: Vec<Vec<char>>,
    operator: Operator,
    /// Distinct symbols of all words, sorted
    symbols: Vec<char>,
    max_operand_len: usize,
}

/// Normalize a raw word to uppercase symbols.
fn normalize_word(raw: &str) -> Result<Vec<char>, Box<ParseError>> {
    let word = raw.trim();
    if word.is_empty() {
        return Err(Box::new(ParseError::EmptyWord));
    }

    word.chars()
        .map(|c| {
            c.to_symbol().ok_or_else(|| {
                Box::new(ParseError::InvalidSymbol { word: word.to_string(), invalid_char: c })
            })
        })
        .collect()
}

impl Puzzle {
    /// Build a puzzle from raw words.
    ///
    /// Letters are normalized to uppercase and surrounding whitespace is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::EmptyWord` or `ParseError::InvalidSymbol` for a
    /// malformed word and `ParseError::TooFewOperands` when fewer than two
    /// operands are given.
    pub fn new<S: AsRef<str>>(
        result: &str,
        operator: Operator,
        operands: &[S],
    ) -> Result<Self, Box<ParseError>> {
        if operands.len() < 2 {
            return Err(Box::new(ParseError::TooFewOperands { count: operands.len() }));
        }

        let result = normalize_word(result)?;
        let operands = operands
            .iter()
            .map(|w| normalize_word(w.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_parts(result, operator, operands))
    }

    fn from_parts(result: Vec<char>, operator: Operator, operands: Vec<Vec<char>>) -> Self {
        debug_assert!(!operands.is_empty(), "a puzzle needs operands");
        debug_assert!(
            result.iter().chain(operands.iter().flatten()).all(Symbol::is_symbol),
            "words must be normalized before building a puzzle"
        );

        let mut symbols: Vec<char> = result.iter().chain(operands.iter().flatten()).copied().collect();
        symbols.sort_unstable();
        symbols.dedup();

        let max_operand_len = operands.iter().map(Vec::len).max().unwrap_or(0);

        Self { result, operands, operator, symbols, max_operand_len }
    }

    #[must_use]
    pub fn result(&self) -> &[char] {
        &self.result
    }

    #[must_use]
    pub fn operands(&self) -> &[Vec<char>] {
        &self.operands
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The distinct symbols of the puzzle in alphabetical order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    #[must_use]
    pub fn max_operand_len(&self) -> usize {
        self.max_operand_len
    }

    /// Rewrite subtraction as addition and division as multiplication.
    ///
    /// `minuend - subtrahend = difference` becomes
    /// `difference + subtrahend = minuend`, and
    /// `dividend / divisor = quotient` becomes `quotient * divisor = dividend`.
    /// Addition and multiplication puzzles come back unchanged. The symbol set
    /// is the same either way, so an assignment solving the reduced puzzle
    /// solves this one.
    #[must_use]
    pub fn reduce(&self) -> Puzzle {
        if self.operator.is_base() {
            return self.clone();
        }

        let mut operands = self.operands.clone();
        let result = std::mem::replace(&mut operands[0], self.result.clone());
        Self::from_parts(result, self.operator.base(), operands)
    }

    /// Structural checks that must pass before any search.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::TooManySymbols` when there are more distinct
    /// symbols than digits, and `SolverError::LengthMismatch` when the result
    /// length cannot match the operands under this operator. Subtraction and
    /// division are checked on their reduced form.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.symbols.len() > MAX_SYMBOLS {
            return Err(SolverError::TooManySymbols { count: self.symbols.len() });
        }

        let result_len = self.result.len();
        match self.operator {
            Operator::Addition => {
                let max = self.max_operand_len;
                if result_len != max && result_len != max + 1 {
                    return Err(SolverError::LengthMismatch {
                        operator: self.operator,
                        result_len,
                        expected: format!("{max} or {}", max + 1),
                    });
                }
            }
            Operator::Multiplication => {
                // no operand starts with 0, so the product has exactly this many digits
                let total: usize = self.operands.iter().map(Vec::len).sum();
                if result_len != total {
                    return Err(SolverError::LengthMismatch {
                        operator: self.operator,
                        result_len,
                        expected: total.to_string(),
                    });
                }
            }
            Operator::Subtraction | Operator::Division => self.reduce().validate()?,
        }

        Ok(())
    }

    /// Check a complete assignment against this puzzle.
    ///
    /// The assignment must cover every symbol, give no multi-digit word a
    /// leading zero, and make the equation hold under the original operator.
    /// Arithmetic that overflows `u128` counts as unsatisfied.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        if !assignment.contains_all_symbols(&self.symbols) {
            return false;
        }

        let words = || std::iter::once(&self.result).chain(self.operands.iter());
        let leading_zero = words().any(|w| w.len() > 1 && assignment.get(w[0]) == Some(0));
        if leading_zero {
            return false;
        }

        let Some(result) = decode(&self.result, assignment) else {
            return false;
        };
        let Some(values) = self
            .operands
            .iter()
            .map(|w| decode(w, assignment))
            .collect::<Option<Vec<u128>>>()
        else {
            return false;
        };

        let sum = |xs: &[u128]| xs.iter().try_fold(0u128, |acc, &x| acc.checked_add(x));
        let product = |xs: &[u128]| xs.iter().try_fold(1u128, |acc, &x| acc.checked_mul(x));

        let holds = match self.operator {
            Operator::Addition => sum(&values).map(|s| s == result),
            Operator::Multiplication => product(&values).map(|p| p == result),
            Operator::Subtraction => sum(&values[1..])
                .and_then(|s| s.checked_add(result))
                .map(|total| total == values[0]),
            Operator::Division => product(&values[1..])
                .and_then(|p| p.checked_mul(result))
                .map(|total| total == values[0]),
        };

        holds.unwrap_or(false)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands: Vec<String> = self.operands.iter().map(|w| w.iter().collect()).collect();
        let result: String = self.result.iter().collect();
        let separator = format!(" {} ", self.operator);
        write!(f, "{} = {result}", operands.join(separator.as_str()))
    }
}
