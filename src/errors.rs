//! Error types for reading puzzles, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E008) for documentation lookup:
//!
//! - E001: `EmptyInput` (Empty equation string)
//! - E002: `InvalidInput` (Equation does not match the expected shape)
//! - E003: `MixedOperators` (More than one operator in an equation)
//! - E004: `EmptyWord` (A word with no letters)
//! - E005: `InvalidSymbol` (Non-letter character in a word)
//! - E006: `TooFewOperands` (Fewer than two operands)
//! - E007: `InvalidOperator` (Unknown operator)
//! - E008: `NomError` (Low-level nom parser error)
//!
//! # Examples
//!
//! ```
//! use alphametic::errors::ParseError;
//! use alphametic::puzzle::Puzzle;
//!
//! match "SEND + MORE - TEA = MONEY".parse::<Puzzle>() {
//!     Err(e) => {
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!         assert!(matches!(*e, ParseError::MixedOperators { .. }));
//!     }
//!     Ok(_) => unreachable!("mixed operators are rejected"),
//! }
//! ```

use nom::error::{ErrorKind, ParseError as NomParseError};

/// Custom error type for puzzle parsing and construction
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Empty equation string")]
    EmptyInput,

    #[error("Invalid equation \"{str}\": {reason}")]
    InvalidInput { str: String, reason: String },

    #[error("Mixed operators '{expected}' and '{found}' in one equation")]
    MixedOperators { expected: char, found: char },

    #[error("Equation contains an empty word")]
    EmptyWord,

    #[error("Word \"{word}\" contains invalid character '{invalid_char}' (only letters A-Z allowed)")]
    InvalidSymbol { word: String, invalid_char: char },

    #[error("Equation has {count} operand(s); at least two are required")]
    TooFewOperands { count: usize },

    #[error("Invalid operator '{op}' (expected: +, -, *, /)")]
    InvalidOperator { op: String },

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl<'a> NomParseError<&'a str> for Box<ParseError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(ParseError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        // usually just return the existing error unchanged
        other
    }
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::EmptyInput => "E001",
            ParseError::InvalidInput { .. } => "E002",
            ParseError::MixedOperators { .. } => "E003",
            ParseError::EmptyWord => "E004",
            ParseError::InvalidSymbol { .. } => "E005",
            ParseError::TooFewOperands { .. } => "E006",
            ParseError::InvalidOperator { .. } => "E007",
            ParseError::NomError(_) => "E008",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::EmptyInput => "Empty equation string",
            ParseError::InvalidInput { .. } => "Equation does not match the expected shape",
            ParseError::MixedOperators { .. } => "More than one operator in an equation",
            ParseError::EmptyWord => "A word with no letters",
            ParseError::InvalidSymbol { .. } => "Non-letter character in a word",
            ParseError::TooFewOperands { .. } => "Fewer than two operands",
            ParseError::InvalidOperator { .. } => "Unknown operator",
            ParseError::NomError(_) => "Low-level parser error",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::EmptyInput => "The equation string was empty or contained only whitespace.",
            ParseError::InvalidInput { .. } => "An equation is two or more words joined by one operator, followed by `=` and a result word, e.g. `SEND + MORE = MONEY`.",
            ParseError::MixedOperators { .. } => "All operands must be joined by the same operator. Expressions such as `A + B - C = D` are not supported.",
            ParseError::EmptyWord => "Every operand and the result must contain at least one letter.",
            ParseError::InvalidSymbol { .. } => "Words may only contain the letters A-Z (case-insensitive). Digits and punctuation cannot stand for a digit.",
            ParseError::TooFewOperands { .. } => "An equation needs at least two operands on the left-hand side of `=`.",
            ParseError::InvalidOperator { .. } => "Only `+`, `-`, `*` and `/` are recognized operators.",
            ParseError::NomError(_) => "The low-level parser failed. This is usually wrapped by a more specific error.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::EmptyInput => Some("Example: 'SEND + MORE = MONEY'"),
            ParseError::InvalidInput { .. } => Some("Expected format: WORD op WORD [op WORD ...] = WORD (e.g., 'TO + GO = OUT')"),
            ParseError::MixedOperators { .. } => Some("Use a single operator throughout, e.g., 'A + B + C = D'"),
            ParseError::InvalidSymbol { .. } => Some("Only letters A-Z are allowed in words"),
            ParseError::TooFewOperands { .. } => Some("Add a second operand, e.g., 'AB + BA = CC'"),
            ParseError::InvalidOperator { .. } => Some("Use one of '+', '-', '*', '/'"),
            _ => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
