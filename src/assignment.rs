use std::fmt;
use std::fmt::{Display, Formatter};

use crate::symbol::{ALPHABET_SIZE, NUM_DIGITS};

/// `Assignment` maps a symbol (`'A'..='Z'`) to the digit it stands for.
///
/// The mapping is always injective: a reverse index from digit to symbol is
/// kept alongside the forward slots, and [`Assignment::assign`] refuses a
/// digit that another symbol already holds.
///
/// Uses array-based storage instead of `HashMap` since symbols are limited to 'A'-'Z'.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    /// index 0-25 for 'A'-'Z'
    digits: [Option<u8>; ALPHABET_SIZE],
    /// index 0-9 for the digits, holding the symbol that owns each
    owners: [Option<char>; NUM_DIGITS],
    len: usize,
}

/// Convert a symbol to an array index
/// 'A' -> 0, 'B' -> 1, ..., 'Z' -> 25
///
/// # Panics
/// This function panics if `c` is not in 'A'..='Z'.
/// `Puzzle` construction normalizes and validates every symbol, so anything
/// else reaching this point is a programming error, not invalid user input.
#[inline]
fn symbol_to_index(c: char) -> usize {
    match c {
        'A'..='Z' => (c as u8 - b'A') as usize,
        _ => panic!("Invalid symbol: '{c}' (puzzle construction should have validated this)"),
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter()
            .map(|(k, v)| format!("{k}→{v}"))
            .collect();
        write!(f, "[{}]", pairs.join(", "))
    }
}

impl Assignment {
    /// The digit assigned to `symbol`, if any.
    ///
    /// Anything outside `'A'..='Z'` is never assigned, so it gives `None`.
    #[must_use]
    pub fn get(&self, symbol: char) -> Option<u8> {
        if !symbol.is_ascii_uppercase() {
            return None;
        }
        self.digits[symbol_to_index(symbol)]
    }

    /// The symbol holding `digit`, if any.
    #[must_use]
    pub fn owner_of(&self, digit: u8) -> Option<char> {
        self.owners.get(usize::from(digit)).copied().flatten()
    }

    #[must_use]
    pub fn is_digit_used(&self, digit: u8) -> bool {
        self.owner_of(digit).is_some()
    }

    /// Number of assigned symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Assign `digit` to an unassigned `symbol`.
    ///
    /// Returns `false` (and changes nothing) if the symbol is already assigned,
    /// the digit is out of range, or another symbol holds the digit.
    pub(crate) fn assign(&mut self, symbol: char, digit: u8) -> bool {
        let i = symbol_to_index(symbol);
        let d = usize::from(digit);
        if d >= NUM_DIGITS || self.digits[i].is_some() || self.owners[d].is_some() {
            return false;
        }
        self.digits[i] = Some(digit);
        self.owners[d] = Some(symbol);
        self.len += 1;
        true
    }

    /// Remove the assignment of `symbol`, returning the digit it held.
    pub(crate) fn unassign(&mut self, symbol: char) -> Option<u8> {
        let i = symbol_to_index(symbol);
        let digit = self.digits[i].take()?;
        self.owners[usize::from(digit)] = None;
        self.len -= 1;
        Some(digit)
    }

    /// Iterate over the assignments in alphabetical symbol order
    /// (returns owned char since we compute it from index)
    pub fn iter(&self) -> impl Iterator<Item = (char, u8)> + '_ {
        self.digits.iter().enumerate().filter_map(|(i, opt)| {
            opt.map(|digit| {
                // i < 26, so the cast cannot truncate
                ((b'A' + i as u8) as char, digit)
            })
        })
    }

    #[must_use]
    pub fn contains_all_symbols(&self, symbols: &[char]) -> bool {
        symbols.iter().all(|&symbol| self.get(symbol).is_some())
    }
}
