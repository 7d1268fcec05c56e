use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use alphametic::puzzle_list::PuzzleList;
use alphametic::solver::{self, SolveResult, SolverError};
use alphametic::{Assignment, Puzzle};

const PROMPT: &str = "Enter an alphametic:";
const SOLUTION_HEADER: &str = "The following assignment solves the alphametic:";
const NO_SOLUTION: &str = "There is no solution for this alphametic.";
const SEPARATOR: &str = "--------------";
const QUIT_COMMANDS: [&str; 2] = ["quit", "exit"];

/// Alphametic (cryptarithm) solver
///
/// Without arguments, reads equations interactively from stdin.
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// The equation to solve (e.g., "SEND + MORE = MONEY")
    equation: Option<String>,

    /// Solve every equation in this file (one per line, '#' starts a comment)
    #[arg(short = 'f', long, conflicts_with = "equation")]
    puzzle_file: Option<PathBuf>,
}

/// Entry point of the alphametic CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("ALPHAMETIC_DEBUG").is_ok();
    alphametic::log::init_logger(debug_enabled);

    log::debug!("Starting alphametic solver {} ({})", env!("CARGO_PKG_VERSION"), env!("GIT_HASH_FULL"));

    if let Err(e) = try_main() {
        // Print the error message to stderr, with detailed formatting if it's a SolverError
        if let Some(solver_err) = e.downcast_ref::<SolverError>() {
            eprintln!("Error: {}", solver_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the CLI.
///
/// Runs one of three modes:
/// 1. A single equation given on the command line.
/// 2. Every equation in a puzzle file.
/// 3. An interactive prompt loop on stdin.
///
/// Returns `Ok(())` on success or an error (e.g., malformed equation,
/// missing puzzle file) which bubbles up to [`main`].
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match (cli.equation, cli.puzzle_file) {
        (Some(equation), _) => solve_one(&equation, &mut out)?,
        (None, Some(path)) => solve_file(&path, &mut out)?,
        (None, None) => interactive(io::stdin().lock(), &mut out)?,
    }

    Ok(())
}

fn solve_one(equation: &str, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let t_solve = Instant::now();
    let result = solver::solve_equation(equation)?;
    let solve_secs = t_solve.elapsed().as_secs_f64();

    print_outcome(&result, out)?;
    eprintln!("Solved in {:.3}s ({} nodes).", solve_secs, result.nodes_visited);

    Ok(())
}

fn solve_file(path: &Path, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let t_load = Instant::now();
    let list = PuzzleList::load_from_path(path)?;
    eprintln!("Loaded {} equations in {:.3}s.", list.len(), t_load.elapsed().as_secs_f64());

    let mut num_failed = 0;
    for entry in &list.entries {
        writeln!(out, "{}", entry.text)?;

        let puzzle = match &entry.puzzle {
            Ok(puzzle) => puzzle,
            Err(e) => {
                num_failed += 1;
                eprintln!("line {}: {}", entry.line, e.display_detailed());
                continue;
            }
        };

        let t_solve = Instant::now();
        match solver::solve(puzzle) {
            Ok(assignment) => print_assignment(puzzle, assignment.as_ref(), out)?,
            Err(e) => {
                num_failed += 1;
                eprintln!("line {}: {}", entry.line, e.display_detailed());
                continue;
            }
        }
        log::debug!("line {} solved in {:.3}s", entry.line, t_solve.elapsed().as_secs_f64());
        writeln!(out)?;
    }

    if num_failed > 0 {
        eprintln!("⚠️  {num_failed} of {} equations could not be solved", list.len());
    }

    Ok(())
}

/// Prompt for equations until EOF or a quit command.
///
/// Errors are reported and the loop continues.
fn interactive(input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    let mut lines = input.lines();

    loop {
        writeln!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let equation = line.trim();
        if QUIT_COMMANDS.iter().any(|q| equation.eq_ignore_ascii_case(q)) {
            break;
        }
        if equation.is_empty() {
            continue;
        }

        match solver::solve_equation(equation) {
            Ok(result) => print_outcome(&result, out)?,
            Err(e) => writeln!(out, "Error: {}", e.display_detailed())?,
        }
        writeln!(out, "{SEPARATOR}")?;
    }

    Ok(())
}

fn print_outcome(result: &SolveResult, out: &mut impl Write) -> io::Result<()> {
    print_assignment(&result.puzzle, result.assignment(), out)
}

/// Print the assignment and decoded equation, or the no-solution message.
fn print_assignment(puzzle: &Puzzle, assignment: Option<&Assignment>, out: &mut impl Write) -> io::Result<()> {
    let Some(assignment) = assignment else {
        return writeln!(out, "{NO_SOLUTION}");
    };

    writeln!(out, "{SOLUTION_HEADER}")?;
    for line in solver::assignment_lines(assignment) {
        writeln!(out, "{line}")?;
    }
    if let Some(decoded) = solver::solution_to_string(puzzle, assignment) {
        writeln!(out, "{decoded}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_interactive(input: &str) -> String {
        let mut out = Vec::new();
        interactive(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_outcome_solved() {
        let result = solver::solve_equation("SEND + MORE = MONEY").unwrap();
        let mut out = Vec::new();
        print_outcome(&result, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], SOLUTION_HEADER);
        assert_eq!(lines[1], "D -> 7");
        assert_eq!(lines[9], "9567 + 1085 = 10652");
    }

    #[test]
    fn test_print_outcome_no_solution() {
        let result = solver::solve_equation("AA + BB = CCC").unwrap();
        let mut out = Vec::new();
        print_outcome(&result, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), format!("{NO_SOLUTION}\n"));
    }

    #[test]
    fn test_interactive_stops_at_quit() {
        let text = run_interactive("A + A = B\nquit\nSEND + MORE = MONEY\n");

        assert_eq!(text.matches(PROMPT).count(), 2);
        assert!(text.contains("1 + 1 = 2"));
        assert!(!text.contains("10652"));
        assert_eq!(text.matches(SEPARATOR).count(), 1);
    }

    #[test]
    fn test_interactive_stops_at_eof() {
        let text = run_interactive("AA + BB = CCC");

        assert!(text.contains(NO_SOLUTION));
        assert_eq!(text.matches(PROMPT).count(), 2);
    }

    #[test]
    fn test_interactive_reports_errors_and_continues() {
        let text = run_interactive("A + B - C = D\n\nEXIT\n");

        assert!(text.contains("E003"));
        assert_eq!(text.matches(PROMPT).count(), 3);
    }

    #[test]
    fn test_cli_parses_modes() {
        let cli = Cli::try_parse_from(["alphametic", "A + A = B"]).unwrap();
        assert_eq!(cli.equation.as_deref(), Some("A + A = B"));

        let cli = Cli::try_parse_from(["alphametic", "-f", "puzzles.txt"]).unwrap();
        assert_eq!(cli.puzzle_file, Some(PathBuf::from("puzzles.txt")));

        assert!(Cli::try_parse_from(["alphametic", "A + A = B", "-f", "puzzles.txt"]).is_err());
    }
}
