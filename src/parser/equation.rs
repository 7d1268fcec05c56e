use crate::errors::ParseError;
use crate::operator::Operator;
use crate::puzzle::Puzzle;
use nom::{
    bytes::complete::is_not,
    character::complete::{char, multispace0, one_of},
    combinator::{cut, map_opt},
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult,
    Parser,
};
use std::iter;
use std::str::FromStr;

/// Parser result type: input, output, with our custom `ParseError`
pub type PResult<'a, O> = IResult<&'a str, O, Box<ParseError>>;

/// Characters that end a word. Anything else is taken into the word and
/// checked later, so `AB1` is reported as a bad letter rather than a syntax error.
const WORD_TERMINATORS: &str = "+-*/= \t\r\n";
const OPERATOR_CHARS: &str = "+-*/";

/// The left-hand side of an equation: the first operand and every
/// `(operator, operand)` pair after it.
type Lhs<'a> = (&'a str, Vec<(Operator, &'a str)>);

impl FromStr for Puzzle {
    type Err = Box<ParseError>;

    /// Parse an equation such as `SEND + MORE = MONEY`.
    ///
    /// Words are case-insensitive and whitespace around tokens is ignored.
    /// All operands must be joined by the same operator.
    fn from_str(raw_equation: &str) -> Result<Self, Self::Err> {
        let input = raw_equation.trim();
        if input.is_empty() {
            return Err(Box::new(ParseError::EmptyInput));
        }
        let invalid = |reason: String| Box::new(ParseError::InvalidInput { str: input.to_string(), reason });

        let (rest, (first, tail)) = match lhs(input) {
            Ok(parsed) => parsed,
            Err(nom::Err::Failure(e)) => return Err(e),
            // nothing word-like before the first operator or '='
            Err(_) => return Err(Box::new(ParseError::EmptyWord)),
        };

        let (rest, result) = match result_word(rest) {
            Ok(parsed) => parsed,
            Err(nom::Err::Failure(e)) => return Err(e),
            Err(_) => return Err(unexpected_token(rest).unwrap_or_else(invalid)),
        };

        if !rest.is_empty() {
            let reason = if rest.starts_with('=') {
                "more than one '='".to_string()
            } else {
                format!("unexpected input after the result: '{rest}'")
            };
            return Err(invalid(reason));
        }

        let Some(&(operator, _)) = tail.first() else {
            return Err(Box::new(ParseError::TooFewOperands { count: 1 }));
        };
        if let Some(&(found, _)) = tail.iter().find(|(op, _)| *op != operator) {
            return Err(Box::new(ParseError::MixedOperators {
                expected: operator.symbol(),
                found: found.symbol(),
            }));
        }

        let operands: Vec<&str> = iter::once(first).chain(tail.iter().map(|&(_, w)| w)).collect();
        Puzzle::new(result, operator, operands.as_slice())
    }
}

/// Explain why `rest` does not start with `=`.
///
/// Returns `Err(reason)` for the generic malformed-input case.
fn unexpected_token(rest: &str) -> Result<Box<ParseError>, String> {
    let Some(token) = rest.split_whitespace().next() else {
        return Err("missing '=' and result word".to_string());
    };

    if token.chars().any(char::is_alphanumeric) {
        Err(format!("expected an operator or '=' before '{token}'"))
    } else {
        Ok(Box::new(ParseError::InvalidOperator { op: token.to_string() }))
    }
}

// === Token parsers ===

fn word(input: &'_ str) -> PResult<'_, &'_ str> {
    delimited(multispace0, is_not(WORD_TERMINATORS), multispace0).parse(input)
}

/// A word that must be present, e.g. after an operator or `=`.
fn required_word(input: &'_ str) -> PResult<'_, &'_ str> {
    cut(word)
        .parse(input)
        .map_err(|e| e.map(|_| Box::new(ParseError::EmptyWord)))
}

fn operator(input: &'_ str) -> PResult<'_, Operator> {
    map_opt(one_of(OPERATOR_CHARS), Operator::from_symbol).parse(input)
}

fn lhs(input: &'_ str) -> PResult<'_, Lhs<'_>> {
    pair(word, many0(pair(operator, required_word))).parse(input)
}

fn result_word(input: &'_ str) -> PResult<'_, &'_ str> {
    preceded(char('='), required_word).parse(input)
}
