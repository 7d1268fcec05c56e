// Reusable library API: visible to both CLI and WASM builds
pub mod assignment;
pub mod errors;
pub mod log;
pub mod operator;
pub mod parser;
pub mod puzzle;
pub mod puzzle_list;
pub mod solver;
mod symbol;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use assignment::Assignment;
pub use operator::Operator;
pub use puzzle::Puzzle;
pub use solver::{decode, solve, solve_equation, SolveResult, SolveStatus, SolverError};
pub use symbol::MAX_SYMBOLS;
