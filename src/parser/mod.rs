//! Parsing of equation strings into [`Puzzle`](crate::puzzle::Puzzle) values.
//!
//! The grammar is `WORD (OP WORD)+ = WORD`, with a single operator from
//! `+ - * /` used throughout. Parsing is done through `FromStr`, so
//! `"SEND + MORE = MONEY".parse::<Puzzle>()` is the usual entry point.

mod equation;

pub use equation::PResult;
