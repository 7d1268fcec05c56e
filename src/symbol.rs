use std::ops::RangeInclusive;

// Symbol and digit constants
pub(crate) const ALPHABET_SIZE: usize = 26;
#[cfg(test)]
pub(crate) const UPPERCASE_ALPHABET: RangeInclusive<char> = 'A'..='Z';

pub(crate) const NUM_DIGITS: usize = 10;
pub(crate) const DIGITS: RangeInclusive<u8> = 0..=9;
/// Nonzero digits, the candidates for a symbol in a word's leading position.
pub(crate) const LEADING_DIGITS: RangeInclusive<u8> = 1..=9;

/// Most distinct symbols a puzzle can have: one per decimal digit.
pub const MAX_SYMBOLS: usize = NUM_DIGITS;

pub(crate) trait Symbol {
    fn is_symbol(&self) -> bool;
    fn to_symbol(&self) -> Option<char>;
}

impl Symbol for char {
    fn is_symbol(&self) -> bool {
        self.is_ascii_uppercase()
    }

    /// Normalize a letter to its symbol form (uppercase); `None` for non-letters.
    fn to_symbol(&self) -> Option<char> {
        self.is_ascii_alphabetic().then(|| self.to_ascii_uppercase())
    }
}
