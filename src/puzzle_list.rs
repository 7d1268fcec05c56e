//! `puzzle_list`: read a batch of equations, one per line.
//!
//! The list can come from a file or from an in-memory string (the latter is what
//! WebAssembly builds use, since direct file I/O isn't allowed there).
//!
//! The parsing logic:
//! - Each non-blank line holds one equation, e.g. `SEND + MORE = MONEY`.
//! - Lines starting with `#` are comments and are skipped.
//! - Every other line is parsed into a [`Puzzle`]; a line that fails to parse is
//!   kept as an error together with its line number, so one bad line does not
//!   hide the rest of the batch.

use crate::errors::ParseError;
use crate::puzzle::Puzzle;

/// Marks a comment line.
const COMMENT_PREFIX: char = '#';

/// One equation line of a puzzle list.
#[derive(Debug)]
pub struct PuzzleEntry {
    /// 1-based line number in the source text
    pub line: usize,
    /// The trimmed equation text
    pub text: String,
    pub puzzle: Result<Puzzle, Box<ParseError>>,
}

/// A parsed list of equations, in source order.
#[derive(Debug, Default)]
pub struct PuzzleList {
    pub entries: Vec<PuzzleEntry>,
}

impl PuzzleList {
    /// Parse a puzzle list from an in-memory string.
    ///
    /// This is **WASM-safe** because it doesn't touch the filesystem.
    #[must_use]
    pub fn parse_from_str(contents: &str) -> PuzzleList {
        let entries = contents
            .lines()
            .enumerate()
            .filter_map(|(i, raw_line)| {
                let line = raw_line.trim();
                if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                    return None;
                }

                Some(PuzzleEntry {
                    line: i + 1,
                    text: line.to_string(),
                    puzzle: line.parse(),
                })
            })
            .collect();

        PuzzleList { entries }
    }

    /// Native-only convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<PuzzleList> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read puzzle list from '{}': {}", path_ref.display(), e)
            )
        })?;

        Ok(Self::parse_from_str(&data))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The successfully parsed puzzles, skipping lines with errors.
    pub fn puzzles(&self) -> impl Iterator<Item = &Puzzle> + '_ {
        self.entries.iter().filter_map(|entry| entry.puzzle.as_ref().ok())
    }
}
