//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ParseError` and `SolverError` implementations via their
//! `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use std::fmt::Write;

use alphametic::errors::ParseError;
use alphametic::solver::SolverError;
use alphametic::Operator;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($doc:expr, $errors:expr) => {
        for error in $errors {
            writeln!($doc, "### {}: {}\n", error.code(), error.description())?;
            writeln!($doc, "**Details:** {}\n", error.details())?;

            if let Some(help_text) = error.help() {
                writeln!($doc, "**How to fix:**")?;
                writeln!($doc, "```")?;
                writeln!($doc, "{}", help_text)?;
                writeln!($doc, "```\n")?;
            }

            writeln!($doc, "**Example error message:**")?;
            writeln!($doc, "```")?;
            writeln!($doc, "{}", error)?;
            writeln!($doc, "```\n")?;

            writeln!($doc, "**Detailed format:**")?;
            writeln!($doc, "```")?;
            writeln!($doc, "{}", error.display_detailed())?;
            writeln!($doc, "```\n")?;

            writeln!($doc, "---\n")?;
        }
    };
}

/// Helper to create all `ParseError` variants for documentation
fn all_parse_error_variants() -> Vec<ParseError> {
    vec![
        ParseError::EmptyInput,
        ParseError::InvalidInput { str: "SEND + MORE".to_string(), reason: "missing '=' and result word".to_string() },
        ParseError::MixedOperators { expected: '+', found: '-' },
        ParseError::EmptyWord,
        ParseError::InvalidSymbol { word: "AB1".to_string(), invalid_char: '1' },
        ParseError::TooFewOperands { count: 1 },
        ParseError::InvalidOperator { op: "%".to_string() },
        // NomError--use a common error kind
        ParseError::NomError(nom::error::ErrorKind::IsNot),
    ]
}

/// Helper to create all `SolverError` variants for documentation
fn all_solver_error_variants() -> Vec<SolverError> {
    vec![
        SolverError::ParseFailure(Box::new(ParseError::EmptyInput)),
        SolverError::TooManySymbols { count: 11 },
        SolverError::LengthMismatch {
            operator: Operator::Addition,
            result_len: 7,
            expected: "4 or 5".to_string(),
        },
    ]
}

fn render_docs() -> Result<String, std::fmt::Error> {
    let mut doc = String::new();

    writeln!(doc, "# Error Code Reference\n")?;
    writeln!(doc, "**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n")?;

    writeln!(doc, "## Table of Contents\n")?;
    writeln!(doc, "- [Solver Errors (S001–S003)](#solver-errors)")?;
    writeln!(doc, "- [Parse Errors (E001–E008)](#parse-errors)")?;
    writeln!(doc, "- [How to Use Error Codes](#how-to-use-error-codes)\n")?;

    writeln!(doc, "## Solver Errors\n")?;
    writeln!(doc, "Top-level errors from the solver. These wrap lower-level parse errors or reject a puzzle before the search starts.\n")?;
    generate_error_docs!(doc, all_solver_error_variants());

    writeln!(doc, "## Parse Errors\n")?;
    writeln!(doc, "Errors that occur when reading an equation string.\n")?;
    generate_error_docs!(doc, all_parse_error_variants());

    writeln!(doc, "\n## How to Use Error Codes\n")?;
    writeln!(doc, "When you see an error like:\n")?;
    writeln!(doc, "```")?;
    writeln!(doc, "{}", ParseError::EmptyInput.display_detailed())?;
    writeln!(doc, "```\n")?;
    writeln!(doc, "1. Note the error code (e.g., `E001`)")?;
    writeln!(doc, "2. Look it up in this document for detailed explanation")?;
    writeln!(doc, "3. Follow the suggested resolution steps\n")?;

    writeln!(doc, "A puzzle that parses and validates but has no assignment is not an error; the CLI prints")?;
    writeln!(doc, "`There is no solution for this alphametic.` instead.")?;

    Ok(doc)
}

fn main() -> Result<(), std::fmt::Error> {
    print!("{}", render_docs()?);
    Ok(())
}
