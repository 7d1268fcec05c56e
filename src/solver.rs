//! The backtracking search that assigns digits to the symbols of a puzzle.
//!
//! # Error Handling
//!
//! The solver uses [`SolverError`] with three variants:
//!
//! - S001: `ParseFailure` (Equation parsing failed (wraps [`ParseError`]))
//! - S002: `TooManySymbols` (More distinct letters than digits)
//! - S003: `LengthMismatch` (Result length impossible for the operands)
//!
//! Each error has a `code()`, optional `help()`, and `display_detailed()` method.
//! A puzzle without a solution is not an error: [`solve`] returns `Ok(None)`.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use alphametic::solver;
//!
//! let result = solver::solve_equation("SEND + MORE = MONEY")?;
//! let assignment = result.assignment().expect("SEND + MORE = MONEY has a solution");
//!
//! assert_eq!(Some(9567), solver::decode(&['S', 'E', 'N', 'D'], assignment));
//! println!("{}", solver::solution_to_string(&result.puzzle, assignment).unwrap());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Handling Errors with Detailed Messages
//!
//! ```
//! use alphametic::solver::{self, SolverError};
//!
//! match solver::solve_equation("AB + CD = EFGHI") {
//!     Ok(result) => println!("Solved: {}", result.puzzle),
//!     Err(e) => {
//!         // Show detailed error with code and help
//!         eprintln!("{}", e.display_detailed());
//!         assert!(matches!(e, SolverError::LengthMismatch { .. }));
//!     }
//! }
//! ```

use crate::assignment::Assignment;
use crate::errors::ParseError;
use crate::operator::Operator;
use crate::puzzle::Puzzle;
use crate::symbol::{Symbol, DIGITS, LEADING_DIGITS};
use log::{debug, info, warn};

/// Outcome of a search that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// A complete assignment satisfying the puzzle.
    Solved(Assignment),

    /// The search space was exhausted without finding an assignment.
    NoSolution,
}

/// Result of [`solve_equation`].
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The parsed puzzle, as written (before any reduction).
    pub puzzle: Puzzle,
    /// Whether an assignment was found.
    pub status: SolveStatus,
    /// Number of search nodes visited
    pub nodes_visited: u64,
}

impl SolveResult {
    /// The solving assignment, if one was found.
    #[must_use]
    pub fn assignment(&self) -> Option<&Assignment> {
        match &self.status {
            SolveStatus::Solved(assignment) => Some(assignment),
            SolveStatus::NoSolution => None,
        }
    }
}

/// Unified error type for the solver pipeline.
///
/// Every variant is raised before the search starts; the search itself never
/// fails, it only finds or does not find an assignment.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// Failure during parsing of the equation string into a `Puzzle`.
    ///
    /// These originate from the parser (`ParseError`), which we box to keep the
    /// error type size stable.
    #[error("parse failure: {0}")]
    ParseFailure(#[from] Box<ParseError>),

    /// More distinct letters than there are digits.
    #[error("too many letters: {count} distinct letters but only 10 digits")]
    TooManySymbols { count: usize },

    /// The result cannot have this many letters under the operator.
    #[error("the result has too few or too many letters: {result_len} letters, but {} of these operands needs {expected}", .operator.name())]
    LengthMismatch {
        operator: Operator,
        result_len: usize,
        expected: String,
    },
}

impl SolverError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "S001",
            SolverError::TooManySymbols { .. } => "S002",
            SolverError::LengthMismatch { .. } => "S003",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "Equation parsing failed",
            SolverError::TooManySymbols { .. } => "More distinct letters than digits",
            SolverError::LengthMismatch { .. } => "Result length impossible for the operands",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            SolverError::ParseFailure(_) => "The input equation could not be parsed. This wraps an underlying ParseError (see Parse Errors section for specific error codes).",
            SolverError::TooManySymbols { .. } => "Each letter stands for a different digit, so a puzzle can use at most 10 distinct letters. The puzzle is rejected before any search.",
            SolverError::LengthMismatch { .. } => "For addition the result has as many letters as the longest operand, or one more. For multiplication it has exactly as many letters as all operands together. Subtraction and division are checked as the equivalent addition and multiplication.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            SolverError::TooManySymbols { .. } => Some("Use at most 10 distinct letters across all words"),
            SolverError::LengthMismatch { .. } => Some("Check the word lengths. Example: 'SEND + MORE = MONEY' (4, 4 -> 5) or 'AB * C = DEF' (2 + 1 -> 3)"),
            SolverError::ParseFailure(_) => None, // ParseError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            SolverError::ParseFailure(pe) => {
                // delegate to ParseError's detailed display
                format!("{}\n  caused by: {}", self.code(), pe.display_detailed())
            }
            _ => {
                crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
            }
        }
    }
}

/// Read `word` as a base-10 number under `assignment`.
///
/// Returns `None` if a symbol of the word is unassigned (or not a symbol at
/// all) or the value does not fit in a `u128`.
#[must_use]
pub fn decode(word: &[char], assignment: &Assignment) -> Option<u128> {
    word.iter().try_fold(0u128, |acc, &symbol| {
        if !symbol.is_symbol() {
            return None;
        }
        let digit = assignment.get(symbol)?;
        acc.checked_mul(10)?.checked_add(u128::from(digit))
    })
}

/// Render the decoded equation, e.g. `9567 + 1085 = 10652`.
///
/// Returns `None` if any word cannot be decoded.
#[must_use]
pub fn solution_to_string(puzzle: &Puzzle, assignment: &Assignment) -> Option<String> {
    let operands = puzzle
        .operands()
        .iter()
        .map(|w| decode(w, assignment).map(|v| v.to_string()))
        .collect::<Option<Vec<_>>>()?;
    let result = decode(puzzle.result(), assignment)?;
    let separator = format!(" {} ", puzzle.operator());

    Some(format!("{} = {result}", operands.join(separator.as_str())))
}

/// One `X -> d` line per assigned symbol, in alphabetical order.
#[must_use]
pub fn assignment_lines(assignment: &Assignment) -> Vec<String> {
    assignment.iter().map(|(symbol, digit)| format!("{symbol} -> {digit}")).collect()
}

/// Symbol of `word` in decimal `column`, counting from the least-significant end.
fn symbol_at(word: &[char], column: usize) -> Option<char> {
    word.len().checked_sub(column + 1).map(|i| word[i])
}

/// State of one depth-first search over an addition or multiplication puzzle.
///
/// The search walks the decimal columns from the right. Within a column it
/// first picks digits for the operand symbols (one operand per recursion
/// level), then checks or assigns the result symbol against the digit the
/// operator produces, threading the carry to the next column.
///
/// Every speculative assignment is recorded on `trail`; a failing branch rolls
/// the trail back to the mark it took, so the assignment is restored exactly.
struct Search<'a> {
    puzzle: &'a Puzzle,
    assignment: Assignment,
    /// Symbols assigned during the search, most recent last
    trail: Vec<char>,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(puzzle: &'a Puzzle, seed: Assignment) -> Self {
        debug_assert!(
            puzzle.operator().is_base(),
            "only addition and multiplication puzzles are searched"
        );
        Self {
            puzzle,
            assignment: seed,
            trail: Vec::with_capacity(puzzle.symbols().len()),
            nodes: 0,
        }
    }

    fn run(&mut self) -> bool {
        self.search(0, 0, 0)
    }

    fn mark(&self) -> usize {
        self.trail.len()
    }

    fn rollback(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some(symbol) = self.trail.pop() {
                self.assignment.unassign(symbol);
            }
        }
    }

    fn try_assign(&mut self, symbol: char, digit: u8) -> bool {
        let assigned = self.assignment.assign(symbol, digit);
        if assigned {
            self.trail.push(symbol);
        }
        assigned
    }

    fn is_complete(&self) -> bool {
        self.assignment.len() == self.puzzle.symbols().len()
    }

    /// Digit of `word` in `column`; 0 where the word has no such column.
    fn digit_at(&self, word: &[char], column: usize) -> u64 {
        symbol_at(word, column).map_or(0, |symbol| {
            let digit = self.assignment.get(symbol);
            debug_assert!(digit.is_some(), "operand symbol '{symbol}' read before assignment");
            digit.map_or(0, u64::from)
        })
    }

    fn search(&mut self, column: usize, operand: usize, carry: u64) -> bool {
        self.nodes += 1;

        if column >= self.puzzle.max_operand_len() {
            return self.finish(carry);
        }

        if operand < self.puzzle.operands().len() {
            self.assign_operand(column, operand, carry)
        } else {
            self.verify_result(column, carry)
        }
    }

    /// Pick a digit for the symbol of `operand` in `column`, then move on to
    /// the next operand.
    fn assign_operand(&mut self, column: usize, operand: usize, carry: u64) -> bool {
        let puzzle = self.puzzle;
        let word = &puzzle.operands()[operand];

        let Some(symbol) = symbol_at(word, column) else {
            // this operand has no digit in this column
            return self.search(column, operand + 1, carry);
        };
        let leading = column + 1 == word.len();

        match self.assignment.get(symbol) {
            Some(0) if leading => false,
            Some(_) => self.search(column, operand + 1, carry),
            None => {
                let candidates = if leading { LEADING_DIGITS } else { DIGITS };
                for digit in candidates {
                    let mark = self.mark();
                    if !self.try_assign(symbol, digit) {
                        continue;
                    }
                    if self.search(column, operand + 1, carry) {
                        return true;
                    }
                    self.rollback(mark);
                }
                false
            }
        }
    }

    /// All operand digits of `column` are known: the result digit follows.
    fn verify_result(&mut self, column: usize, carry: u64) -> bool {
        let Some((expected, carry)) = self.combine(column, carry) else {
            return false;
        };

        let mark = self.mark();
        if self.place_result_digit(column, expected) && self.search(column + 1, 0, carry) {
            return true;
        }
        self.rollback(mark);
        false
    }

    /// Check the result symbol in `column` against `expected`, assigning it if
    /// it is still free. A multi-digit result may not start with 0.
    fn place_result_digit(&mut self, column: usize, expected: u8) -> bool {
        let result = self.puzzle.result();
        let Some(symbol) = symbol_at(result, column) else {
            return false;
        };
        if expected == 0 && result.len() > 1 && column + 1 == result.len() {
            return false;
        }

        match self.assignment.get(symbol) {
            Some(digit) => digit == expected,
            None => self.try_assign(symbol, expected),
        }
    }

    /// Every operand column is done.
    fn finish(&mut self, carry: u64) -> bool {
        if self.puzzle.result().len() > self.puzzle.max_operand_len() {
            self.tail_check(carry)
        } else {
            // no column left to absorb a carry
            self.is_complete() && carry == 0
        }
    }

    /// Resolve the result columns beyond the longest operand.
    fn tail_check(&mut self, carry: u64) -> bool {
        let mark = self.mark();
        let mut carry = carry;

        for column in self.puzzle.max_operand_len()..self.puzzle.result().len() {
            let placed = match self.combine(column, carry) {
                Some((expected, next)) => {
                    carry = next;
                    self.place_result_digit(column, expected)
                }
                None => false,
            };
            if !placed {
                self.rollback(mark);
                return false;
            }
        }

        if self.is_complete() && carry == 0 {
            return true;
        }
        self.rollback(mark);
        false
    }

    /// Expected result digit of `column` and the carry into the next column.
    ///
    /// `None` when the column sum overflows a `u64`, which fails the branch.
    fn combine(&self, column: usize, carry: u64) -> Option<(u8, u64)> {
        let column_sum = match self.puzzle.operator() {
            Operator::Addition | Operator::Subtraction => self
                .puzzle
                .operands()
                .iter()
                .try_fold(0u64, |sum, word| sum.checked_add(self.digit_at(word, column)))?,
            Operator::Multiplication | Operator::Division => self.convolution(column, 0)?,
        };
        let total = column_sum.checked_add(carry)?;

        // total % 10 < 10, so the cast is lossless
        Some(((total % 10) as u8, total / 10))
    }

    /// Coefficient of `10^column` in the product of the operands from
    /// `operand` onwards, before carries.
    ///
    /// This is the schoolbook multiplication column sum, taken one operand at
    /// a time: digit `i` of this operand times the coefficient of
    /// `10^(column - i)` in the product of the remaining operands.
    ///
    /// `None` on `u64` overflow.
    fn convolution(&self, column: usize, operand: usize) -> Option<u64> {
        let operands = self.puzzle.operands();
        let word = &operands[operand];

        if operand + 1 == operands.len() {
            return Some(self.digit_at(word, column));
        }

        (0..word.len().min(column + 1)).try_fold(0u64, |sum, i| {
            let term = self.digit_at(word, i).checked_mul(self.convolution(column - i, operand + 1)?)?;
            sum.checked_add(term)
        })
    }
}

/// Search result with the work it took.
struct SearchOutcome {
    assignment: Option<Assignment>,
    nodes_visited: u64,
}

fn run_search(puzzle: &Puzzle) -> Result<SearchOutcome, SolverError> {
    puzzle.validate()?;

    if !puzzle.operator().is_base() {
        let reduced = puzzle.reduce();
        debug!("solving {puzzle} as {reduced}");
        return run_search(&reduced);
    }

    let mut seed = Assignment::default();
    let result = puzzle.result();
    if puzzle.operator() == Operator::Addition && result.len() == puzzle.max_operand_len() + 1 {
        // the extra leading digit is the final carry
        if puzzle.operands().len() > 2 {
            warn!(
                "leading letter '{}' fixed to 1; with {} operands a larger final carry is not explored",
                result[0],
                puzzle.operands().len()
            );
        }
        let seeded = seed.assign(result[0], 1);
        debug_assert!(seeded, "seeding '{}' into an empty assignment cannot fail", result[0]);
    }

    let mut search = Search::new(puzzle, seed);
    let found = search.run();
    debug!("search over {puzzle} visited {} nodes (solved: {found})", search.nodes);

    let nodes_visited = search.nodes;
    let assignment = found.then_some(search.assignment);
    debug_assert!(
        assignment.as_ref().map_or(true, |a| puzzle.is_satisfied_by(a)),
        "search returned an assignment that does not satisfy {puzzle}"
    );

    Ok(SearchOutcome { assignment, nodes_visited })
}

/// Find an assignment solving `puzzle`.
///
/// Subtraction and division puzzles are rewritten with [`Puzzle::reduce`]
/// and solved as addition and multiplication; the assignment is valid for
/// the original puzzle since both share their symbols.
///
/// # Errors
///
/// Returns `SolverError::TooManySymbols` or `SolverError::LengthMismatch`
/// when the puzzle fails validation. No search is attempted in that case.
pub fn solve(puzzle: &Puzzle) -> Result<Option<Assignment>, SolverError> {
    run_search(puzzle).map(|outcome| outcome.assignment)
}

/// Parse an equation string and solve it.
///
/// # Errors
///
/// Returns `SolverError::ParseFailure` for input that is not a well-formed
/// equation, and the validation errors of [`solve`].
pub fn solve_equation(input: &str) -> Result<SolveResult, SolverError> {
    // Precondition: validate input at API boundary
    if input.trim().is_empty() {
        return Err(SolverError::ParseFailure(Box::new(ParseError::EmptyInput)));
    }

    let puzzle = input.parse::<Puzzle>()?;
    debug!("parsed {input:?} as {puzzle}");

    let outcome = run_search(&puzzle)?;
    let status = match outcome.assignment {
        Some(assignment) => {
            info!("{puzzle}: solved {assignment}");
            SolveStatus::Solved(assignment)
        }
        None => {
            info!("{puzzle}: no solution");
            SolveStatus::NoSolution
        }
    };

    Ok(SolveResult { puzzle, status, nodes_visited: outcome.nodes_visited })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle(result: &str, operator: Operator, operands: &[&str]) -> Puzzle {
        Puzzle::new(result, operator, operands).unwrap()
    }

    fn word(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn assignment_of(pairs: &[(char, u8)]) -> Assignment {
        let mut a = Assignment::default();
        for &(symbol, digit) in pairs {
            assert!(a.assign(symbol, digit));
        }
        a
    }

    #[test]
    fn test_send_more_money() {
        let p = puzzle("MONEY", Operator::Addition, &["SEND", "MORE"]);
        let a = solve(&p).unwrap().expect("SEND + MORE = MONEY has a solution");

        assert_eq!(Some(9567), decode(&word("SEND"), &a));
        assert_eq!(Some(1085), decode(&word("MORE"), &a));
        assert_eq!(Some(10652), decode(&word("MONEY"), &a));
        assert!(p.is_satisfied_by(&a));
    }

    #[test]
    fn test_two_two_four() {
        // 734 + 734 = 1468 is the first solution in ascending digit order
        let p = puzzle("FOUR", Operator::Addition, &["TWO", "TWO"]);
        let a = solve(&p).unwrap().expect("TWO + TWO = FOUR has a solution");

        assert_eq!(a.get('F'), Some(1));
        assert!(p.is_satisfied_by(&a));
        let two = decode(&word("TWO"), &a).unwrap();
        assert_eq!(decode(&word("FOUR"), &a), Some(2 * two));
    }

    #[test]
    fn test_no_solution() {
        // 11 * (A + B) = 111 * C has no digit solution
        let p = puzzle("CCC", Operator::Addition, &["AA", "BB"]);
        assert_eq!(None, solve(&p).unwrap());

        // A + A = A forces A = 0, which a leading letter cannot be
        let p = puzzle("A", Operator::Addition, &["A", "A"]);
        assert_eq!(None, solve(&p).unwrap());
    }

    #[test]
    fn test_a_plus_a_equals_b() {
        let p = puzzle("B", Operator::Addition, &["A", "A"]);
        assert_eq!(p.symbols(), &['A', 'B']);

        let a = solve(&p).unwrap().unwrap();
        let (x, y) = (a.get('A').unwrap(), a.get('B').unwrap());
        assert_ne!(x, 0);
        assert_ne!(x, y);
        assert_eq!(2 * x, y);
        // ascending enumeration finds 1 + 1 = 2 first
        assert_eq!((x, y), (1, 2));
    }

    #[test]
    fn test_multiplication_length_rule() {
        // structurally valid (2 + 1 = 3 letters) but 11A+B times C never equals 100A+10B+C
        let p = puzzle("ABC", Operator::Multiplication, &["AB", "C"]);
        assert!(p.validate().is_ok());
        assert_eq!(None, solve(&p).unwrap());

        let p = puzzle("ABCD", Operator::Multiplication, &["AB", "C"]);
        assert!(matches!(solve(&p), Err(SolverError::LengthMismatch { operator: Operator::Multiplication, .. })));
    }

    #[test]
    fn test_small_multiplications() {
        for (result, operands) in [("CD", vec!["A", "B"]), ("DEF", vec!["AB", "C"]), ("EFGH", vec!["AB", "CD"])] {
            let p = puzzle(result, Operator::Multiplication, &operands);
            let a = solve(&p).unwrap().unwrap_or_else(|| panic!("{p} should be solvable"));
            assert!(p.is_satisfied_by(&a), "{p} solved by {a}");

            let product: u128 = operands.iter().map(|w| decode(&word(w), &a).unwrap()).product();
            assert_eq!(Some(product), decode(&word(result), &a));
        }
    }

    #[test]
    fn test_three_factor_multiplication() {
        let p = puzzle("DEF", Operator::Multiplication, &["A", "B", "C"]);
        let a = solve(&p).unwrap().expect("A * B * C = DEF has a solution");
        assert!(p.is_satisfied_by(&a));
    }

    #[test]
    fn test_subtraction_delegates_to_addition() {
        let p = puzzle("C", Operator::Subtraction, &["A", "B"]);
        let a = solve(&p).unwrap().unwrap();
        let reduced = solve(&p.reduce()).unwrap().unwrap();

        assert_eq!(a, reduced);
        assert!(p.is_satisfied_by(&a));
        assert!(p.reduce().is_satisfied_by(&a));
        let (x, y, z) = (a.get('A').unwrap(), a.get('B').unwrap(), a.get('C').unwrap());
        assert_eq!(x - y, z);
    }

    #[test]
    fn test_division_delegates_to_multiplication() {
        let p = puzzle("AB", Operator::Division, &["DEF", "C"]);
        let a = solve(&p).unwrap().unwrap();

        assert!(p.is_satisfied_by(&a));
        let dividend = decode(&word("DEF"), &a).unwrap();
        let divisor = decode(&word("C"), &a).unwrap();
        assert_eq!(Some(dividend / divisor), decode(&word("AB"), &a));
        assert_eq!(0, dividend % divisor);
    }

    #[test]
    fn test_too_many_symbols_for_every_operator() {
        for operator in [Operator::Addition, Operator::Subtraction, Operator::Multiplication, Operator::Division] {
            let p = puzzle("ABCDEFGHIJK", operator, &["ABCDE", "FGHIJK"]);
            assert!(
                matches!(solve(&p), Err(SolverError::TooManySymbols { count: 11 })),
                "{operator} should be rejected"
            );
        }
    }

    #[test]
    fn test_addition_length_mismatch() {
        let p = puzzle("ABCDEF", Operator::Addition, &["ABCD", "EF"]);
        assert!(matches!(solve(&p), Err(SolverError::LengthMismatch { result_len: 6, .. })));

        let p = puzzle("AB", Operator::Addition, &["ABC", "C"]);
        assert!(matches!(solve(&p), Err(SolverError::LengthMismatch { result_len: 2, .. })));
    }

    #[test]
    fn test_decode() {
        let a = assignment_of(&[('A', 1), ('B', 0), ('C', 7)]);
        assert_eq!(Some(107), decode(&word("ABC"), &a));
        assert_eq!(Some(71), decode(&word("CA"), &a));
        assert_eq!(Some(0), decode(&word("B"), &a));
        assert_eq!(None, decode(&word("AD"), &a));
        assert_eq!(None, decode(&word("a"), &a));
        assert_eq!(Some(0), decode(&[], &a));
    }

    #[test]
    fn test_decode_overflow() {
        let a = assignment_of(&[('A', 9)]);
        assert_eq!(None, decode(&word(&"A".repeat(60)), &a));
        assert_eq!(Some(99_999_999_999_999_999_999), decode(&word(&"A".repeat(20)), &a));
    }

    #[test]
    fn test_solution_to_string_and_lines() {
        let p = puzzle("MONEY", Operator::Addition, &["SEND", "MORE"]);
        let a = solve(&p).unwrap().unwrap();

        assert_eq!(Some("9567 + 1085 = 10652".to_string()), solution_to_string(&p, &a));
        assert_eq!(
            vec!["D -> 7", "E -> 5", "M -> 1", "N -> 6", "O -> 0", "R -> 8", "S -> 9", "Y -> 2"],
            assignment_lines(&a)
        );
        assert_eq!(None, solution_to_string(&p, &Assignment::default()));
    }

    #[test]
    fn test_convolution_two_operands() {
        // 12 * 34 = 408: column sums 8, 10, 3
        let p = puzzle("EFGH", Operator::Multiplication, &["AB", "CD"]);
        let a = assignment_of(&[('A', 1), ('B', 2), ('C', 3), ('D', 4)]);
        let search = Search::new(&p, a);

        assert_eq!(Some(8), search.convolution(0, 0));
        assert_eq!(Some(10), search.convolution(1, 0));
        assert_eq!(Some(3), search.convolution(2, 0));
        assert_eq!(Some(0), search.convolution(3, 0));

        assert_eq!(Some((8, 0)), search.combine(0, 0));
        assert_eq!(Some((0, 1)), search.combine(1, 0));
        assert_eq!(Some((4, 0)), search.combine(2, 1));
    }

    #[test]
    fn test_convolution_three_operands() {
        // 2 * 3 * 4 = 24, all in column 0 before carrying
        let p = puzzle("DEF", Operator::Multiplication, &["A", "B", "C"]);
        let a = assignment_of(&[('A', 2), ('B', 3), ('C', 4)]);
        let search = Search::new(&p, a);

        assert_eq!(Some(24), search.convolution(0, 0));
        assert_eq!(Some(0), search.convolution(1, 0));
        assert_eq!(Some((4, 2)), search.combine(0, 0));
    }

    #[test]
    fn test_addition_combine_skips_short_operands() {
        let p = puzzle("DEF", Operator::Addition, &["AB", "C"]);
        let a = assignment_of(&[('A', 9), ('B', 8), ('C', 7)]);
        let search = Search::new(&p, a);

        assert_eq!(Some((5, 1)), search.combine(0, 0));
        assert_eq!(Some((0, 1)), search.combine(1, 1));
        assert_eq!(Some((1, 0)), search.combine(2, 1));
    }

    #[test]
    fn test_convolution_overflow_fails_the_column() {
        // 9^21 does not fit in a u64
        let p = puzzle(&"B".repeat(21), Operator::Multiplication, &["A"; 21]);
        let search = Search::new(&p, assignment_of(&[('A', 9)]));

        assert_eq!(None, search.convolution(0, 0));
        assert_eq!(None, search.combine(0, 0));
    }

    #[test]
    fn test_overflowing_product_has_no_solution() {
        let p = puzzle(&"B".repeat(21), Operator::Multiplication, &["A"; 21]);
        assert!(p.validate().is_ok());

        // every A in 1..=8 gives a last digit equal to A itself; 9 overflows
        assert_eq!(None, solve(&p).unwrap());
    }

    #[test]
    fn test_validation_failure_runs_no_search() {
        let cases = [
            puzzle("KABCDE", Operator::Addition, &["ABCDE", "FGHIJ"]),
            puzzle("FGHIJ", Operator::Subtraction, &["KABCDE", "ABCDE"]),
        ];

        for p in &cases {
            // an outcome, and so a node count, only exists once a search has run
            match run_search(p) {
                Err(SolverError::TooManySymbols { count: 11 }) => {}
                Err(other) => panic!("{p}: expected TooManySymbols, got {other:?}"),
                Ok(outcome) => panic!("{p}: searched {} nodes", outcome.nodes_visited),
            }
        }

        let valid = puzzle("MONEY", Operator::Addition, &["SEND", "MORE"]);
        assert!(run_search(&valid).unwrap().nodes_visited > 0);
    }

    #[test]
    fn test_tail_check_failure_restores_assignment() {
        // 12 * 38 = 456: E takes 4, then D would have to be a leading 0
        let p = puzzle("DEFG", Operator::Multiplication, &["AB", "CH"]);
        let before = assignment_of(&[('A', 1), ('B', 2), ('C', 3), ('H', 8), ('G', 6), ('F', 5)]);
        let mut search = Search::new(&p, before.clone());

        // carry out of column 1 is 1
        assert!(!search.tail_check(1));
        assert_eq!(before, search.assignment);
        assert!(search.trail.is_empty());
    }

    #[test]
    fn test_failed_search_leaves_seed_only() {
        let p = puzzle("CCC", Operator::Addition, &["AA", "BB"]);
        let mut search = Search::new(&p, assignment_of(&[('C', 1)]));

        assert!(!search.run());
        assert_eq!(assignment_of(&[('C', 1)]), search.assignment);
        assert!(search.trail.is_empty());
        assert!(search.nodes > 0);
    }

    #[test]
    fn test_leading_zero_never_assigned() {
        let p = puzzle("CDE", Operator::Addition, &["AB", "BA"]);
        let a = solve(&p).unwrap().expect("AB + BA = CDE has a solution");
        for w in ["AB", "BA", "CDE"] {
            assert_ne!(Some(0), a.get(w.chars().next().unwrap()));
        }
        assert!(p.is_satisfied_by(&a));
    }

    mod error_tests {
        use super::*;

        /// Test that all `SolverError` variants have valid error codes
        #[test]
        fn test_error_codes_are_valid() {
            let parse_err = SolverError::ParseFailure(Box::new(ParseError::EmptyInput));
            assert_eq!(parse_err.code(), "S001");

            let too_many = SolverError::TooManySymbols { count: 11 };
            assert_eq!(too_many.code(), "S002");

            let mismatch = SolverError::LengthMismatch {
                operator: Operator::Addition,
                result_len: 7,
                expected: "4 or 5".to_string(),
            };
            assert_eq!(mismatch.code(), "S003");
        }

        /// Test that error help messages are helpful and non-empty
        #[test]
        fn test_error_help_messages_are_helpful() {
            let help = SolverError::TooManySymbols { count: 11 }.help();
            assert!(help.is_some_and(|h| h.contains("10")));

            let mismatch = SolverError::LengthMismatch {
                operator: Operator::Multiplication,
                result_len: 2,
                expected: "3".to_string(),
            };
            assert!(mismatch.help().is_some_and(|h| h.len() > 20));
        }

        #[test]
        fn test_length_mismatch_message() {
            let err = SolverError::LengthMismatch {
                operator: Operator::Addition,
                result_len: 7,
                expected: "4 or 5".to_string(),
            };
            let msg = err.to_string();
            assert!(msg.contains("too few or too many letters"));
            assert!(msg.contains('7'));
            assert!(msg.contains("4 or 5"));
        }

        /// Test that `display_detailed` includes error code and help
        #[test]
        fn test_display_detailed_format() {
            let detailed = SolverError::TooManySymbols { count: 12 }.display_detailed();
            assert!(detailed.contains("S002"));
            assert!(detailed.contains("12 distinct letters"));
            assert!(detailed.contains("at most 10"));
        }

        /// Test that `ParseFailure` error chains are properly constructed
        #[test]
        fn test_parse_failure_error_chain() {
            match solve_equation("SEND + = MONEY") {
                Err(err @ SolverError::ParseFailure(_)) => {
                    let detailed = err.display_detailed();
                    assert!(detailed.contains("S001"));
                    assert!(detailed.contains("caused by"));
                    assert!(detailed.contains("E0"), "Should contain ParseError code (E0xx)");
                }
                other => panic!("Expected ParseFailure error, got {other:?}"),
            }
        }

        /// Test that empty input returns appropriate error
        #[test]
        fn test_empty_input_error() {
            for input in ["", "   "] {
                match solve_equation(input) {
                    Err(SolverError::ParseFailure(parse_err)) => {
                        assert!(matches!(*parse_err, ParseError::EmptyInput));
                    }
                    other => panic!("Expected ParseFailure with EmptyInput, got {other:?}"),
                }
            }
        }

        /// Test that error display is consistent with debug
        #[test]
        fn test_error_display_consistency() {
            let err = SolverError::TooManySymbols { count: 11 };
            assert!(format!("{:?}", err).contains("TooManySymbols"));
            assert!(!err.to_string().contains("TooManySymbols"));
        }
    }

    mod solve_equation_tests {
        use super::*;

        #[test]
        fn test_solve_equation_solved() {
            let result = solve_equation("send + more = money").unwrap();
            assert_eq!(result.puzzle.to_string(), "SEND + MORE = MONEY");
            let a = result.assignment().unwrap();
            assert_eq!(Some("9567 + 1085 = 10652".to_string()), solution_to_string(&result.puzzle, a));
            assert!(result.nodes_visited > 0);
        }

        #[test]
        fn test_solve_equation_no_solution() {
            let result = solve_equation("AA + BB = CCC").unwrap();
            assert_eq!(result.status, SolveStatus::NoSolution);
            assert!(result.assignment().is_none());
        }

        #[test]
        fn test_solve_equation_keeps_original_operator() {
            let result = solve_equation("A - B = C").unwrap();
            assert_eq!(result.puzzle.operator(), Operator::Subtraction);
            let a = result.assignment().unwrap();
            assert_eq!(Some(format!("{} - {} = {}", a.get('A').unwrap(), a.get('B').unwrap(), a.get('C').unwrap())),
                solution_to_string(&result.puzzle, a));
        }

        #[test]
        fn test_solve_equation_validation_error() {
            let err = solve_equation("ABCDE + FGHIJ = KLMNOP").unwrap_err();
            assert!(matches!(err, SolverError::TooManySymbols { count: 16 }));
        }
    }
}
