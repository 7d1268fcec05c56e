//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of well-known alphametics on *your* machine.
//! - Runs each equation several times and reports the median with the node count.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print the decoded solutions:    `cargo run --bin bench_local --release -- -p`
//! - Extra equations from a file:    `cargo run --bin bench_local --release -- -f puzzles.txt`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Use the same machine and `--release` for more comparable numbers.
//! - I/O (printing) is kept outside the timed section.
//! - One warm-up run per equation is done (not included in timing).

use clap::Parser;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::Instant;
use alphametic::puzzle_list::PuzzleList;
use alphametic::solver;

/// Simple local benchmark runner: time several alphametics.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of repeats per equation (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print the decoded solution of each equation
    #[arg(short = 'p', long = "print")]
    print_solutions: bool,

    /// Also time every equation in this file
    #[arg(short = 'f', long)]
    puzzle_file: Option<PathBuf>,
}

/// A benchmark case: the equation to time.
#[derive(Clone)]
struct Case {
    equation: String,
}

impl Case {
    fn new(equation: &str) -> Self {
        Case { equation: equation.to_string() }
    }
}

/// Edit/add new equations here. The summary will display the equation text as the "name".
fn get_cases() -> Vec<Case> {
    vec![
        Case::new("SEND + MORE = MONEY"),
        Case::new("TWO + TWO = FOUR"),
        Case::new("CROSS + ROADS = DANGER"),
        Case::new("DONALD + GERALD = ROBERT"),
        Case::new("BASE + BALL = GAMES"),
        Case::new("COCA + COLA = OASIS"),
        Case::new("FORTY + TEN + TEN = SIXTY"),
        Case::new("MONEY - MORE = SEND"),
        Case::new("AB * CD = EFGH"),
        Case::new("ABC * DE = FGHIJ"),
        // no solution: the whole space is explored
        Case::new("AA + BB = CCC"),
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const MAX_EQUATION_LEN: usize = 40;

/// One row in the benchmark summary: (equation, median seconds, solved,
/// nodes visited).
type SummaryRow = (String, f64, bool, u64);

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let mut cases = get_cases();
    if let Some(path) = &cli.puzzle_file {
        let list = PuzzleList::load_from_path(path)?;
        cases.extend(list.puzzles().map(|p| Case::new(&p.to_string())));
    }

    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        let equation = case.equation.as_str();
        eprintln!("\n[{:02}] {}", idx + 1, equation);

        // One *warm-up* execution per equation; its timing is ignored.
        let warmup = match solver::solve_equation(equation) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("  ✗ Warm-up failed: {}", e.display_detailed());
                continue;
            }
        };

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last = warmup;

        for rep in 0..cli.num_repeats {
            // Keep only the *core* operation inside the timed region.
            let t_solve = Instant::now();
            let result = match solver::solve_equation(black_box(equation)) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("  ✗ Run {}/{} failed: {}", rep + 1, cli.num_repeats, e);
                    continue;
                }
            };
            let solve_secs = t_solve.elapsed().as_secs_f64();

            times.push(solve_secs);
            last = black_box(result);

            eprintln!("  run {:>2}/{:>2}: {:.3}s ({} nodes)", rep + 1, cli.num_repeats, solve_secs, last.nodes_visited);
        }

        let med = median(times);
        let solved = last.assignment().is_some();

        if cli.print_solutions {
            match last.assignment().and_then(|a| solver::solution_to_string(&last.puzzle, a)) {
                Some(decoded) => println!("{equation}  =>  {decoded}"),
                None => println!("{equation}  =>  no solution"),
            }
        }

        summary.push((equation.to_string(), med, solved, last.nodes_visited));
    }

    // Compact summary at the end for a quick scan across all equations.
    eprintln!("\n==== Summary ====");
    for line in summary_lines(&summary) {
        eprintln!("{line}");
    }

    Ok(())
}

/// Header, rule, and one row per equation of the summary table.
fn summary_lines(summary: &[SummaryRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(summary.len() + 2);
    lines.push(format!(
        "{:<MAX_EQUATION_LEN$} | {:>10} | {:>6} | {:>12}",
        "equation", "median (s)", "solved", "nodes"
    ));
    lines.push(format!("{:-<MAX_EQUATION_LEN$}-+-{:-<10}-+-{:-<6}-+-{:-<12}", "", "", "", ""));
    for (equation, med, solved, nodes) in summary {
        let display = truncate_for_display(equation, MAX_EQUATION_LEN);
        let solved_str = if *solved { "yes" } else { "no" };
        lines.push(format!("{display:<MAX_EQUATION_LEN$} | {med:>10.3} | {solved_str:>6} | {nodes:>12}"));
    }
    lines
}

/// Trim very long equations for readability in the summary.
fn truncate_for_display(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        // "- 1" for the "…"
        format!("{}…", s.chars().take(max_len - 1).collect::<String>())
    } else {
        s.to_string()
    }
}
