use crate::log::init_logger;
use crate::puzzle_list::PuzzleList;
use crate::solver::{solution_to_string, solve_equation, SolverError};
use wasm_bindgen::prelude::*;

use serde_wasm_bindgen::to_value;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E001", "S002")
    code: String,
    /// Display message
    message: String,
    /// Short description of error type
    description: String,
    /// Detailed explanation
    details: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<SolverError> for WasmError {
    fn from(e: SolverError) -> Self {
        // For ParseFailure, extract the nested ParseError details
        match &e {
            SolverError::ParseFailure(pe) => WasmError {
                code: pe.code().to_string(),
                message: pe.to_string(),
                description: pe.description().to_string(),
                details: pe.details().to_string(),
                help: pe.help().map(str::to_string),
            },
            _ => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                description: e.description().to_string(),
                details: e.details().to_string(),
                help: e.help().map(str::to_string),
            },
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);

        if !e.details.is_empty() {
            msg.push_str(&format!("\n\n{}", e.details));
        }

        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }

        js_sys::Error::new(&msg).into()
    }
}

fn serialization_error(code: &str, what: &str, e: &serde_wasm_bindgen::Error) -> JsValue {
    WasmError {
        code: code.to_string(),
        message: format!("serialization failed: {e}"),
        description: format!("Failed to serialize {what}"),
        details: format!("The {what} could not be converted to JavaScript format."),
        help: Some("This is an internal error. Please report this issue.".to_string()),
    }
    .into()
}

/// Initialize logging with the specified debug setting.
///
/// This function must be called from JavaScript after the WASM module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);

    log::info!("WASM module initialized");
}

#[derive(serde::Serialize)]
struct WasmSolveResult {
    solved: bool,
    /// `[symbol, digit]` pairs in alphabetical order; empty without a solution
    assignment: Vec<(String, u8)>,
    /// The equation with every word decoded, e.g. `9567 + 1085 = 10652`
    #[serde(skip_serializing_if = "Option::is_none")]
    decoded: Option<String>,
    /// The normalized equation that was solved
    equation: String,
    nodes_visited: u64,
}

/// JS entry: (input: string) -> `{ solved, assignment, decoded?, equation, nodes_visited }`
#[wasm_bindgen]
pub fn solve_alphametic_wasm(input: &str) -> Result<JsValue, JsValue> {
    let result = solve_equation(input).map_err(WasmError::from)?;

    let assignment = result.assignment();
    let wasm_result = WasmSolveResult {
        solved: assignment.is_some(),
        assignment: assignment
            .map(|a| a.iter().map(|(symbol, digit)| (symbol.to_string(), digit)).collect())
            .unwrap_or_default(),
        decoded: assignment.and_then(|a| solution_to_string(&result.puzzle, a)),
        equation: result.puzzle.to_string(),
        nodes_visited: result.nodes_visited,
    };

    to_value(&wasm_result).map_err(|e| serialization_error("WASM002", "solver result", &e))
}

/// Parse a newline-separated list of equations.
///
/// Returns the normalized form of every well-formed equation as a string
/// array; malformed lines are skipped (and logged).
#[wasm_bindgen]
pub fn parse_puzzle_list(text: &str) -> Result<JsValue, JsValue> {
    let list = PuzzleList::parse_from_str(text);
    let equations: Vec<String> = list
        .entries
        .iter()
        .filter_map(|entry| match &entry.puzzle {
            Ok(puzzle) => Some(puzzle.to_string()),
            Err(e) => {
                log::warn!("skipping line {}: {e}", entry.line);
                None
            }
        })
        .collect();

    to_value(&equations).map_err(|e| serialization_error("WASM003", "puzzle list", &e))
}

/// Generate a debug report for troubleshooting.
///
/// The report includes the error message, the input equation, and
/// environment information, formatted for pasting into an issue.
#[wasm_bindgen]
pub fn get_debug_info(input_equation: &str, error_message: &str) -> String {
    use std::fmt::Write;
    let mut report = String::new();

    // NB: writing to a String never fails (infallible operation)
    // we use `let _ =` to explicitly ignore the Result without panicking
    let _ = writeln!(&mut report, "=== ALPHAMETIC DEBUG REPORT ===");
    let _ = writeln!(&mut report, "Version: {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH"));
    let _ = writeln!(&mut report, "Generated: {}", js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_else(|| "unknown".to_string()));
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Error");
    let _ = writeln!(&mut report, "{error_message}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Input");
    let _ = writeln!(&mut report, "Equation: {input_equation}");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Environment");
    if let Some(window) = web_sys::window() {
        if let Ok(user_agent) = window.navigator().user_agent() {
            let _ = writeln!(&mut report, "User Agent: {user_agent}");
        }
        let _ = writeln!(&mut report, "Location: {}", window.location().href().unwrap_or_else(|_| "unknown".to_string()));
    }
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "## Instructions");
    let _ = writeln!(&mut report, "Please copy this entire report and paste it when reporting the issue.");
    let _ = writeln!(&mut report);

    let _ = writeln!(&mut report, "=== END DEBUG REPORT ===");

    report
}
