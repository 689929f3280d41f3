// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Accepted symbol alphabet.
//!
//! The instrument emits digits `1`-`9` and letters `A`-`I`. Everything else
//! on the wire is noise and is dropped wherever filtering happens. Letters are
//! case-insensitive and always normalized to uppercase.

use std::fmt;

/// One accepted symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

impl Symbol {
    /// All symbols, digits first
    pub const ALL: [Symbol; 18] = [
        Symbol::One,
        Symbol::Two,
        Symbol::Three,
        Symbol::Four,
        Symbol::Five,
        Symbol::Six,
        Symbol::Seven,
        Symbol::Eight,
        Symbol::Nine,
        Symbol::A,
        Symbol::B,
        Symbol::C,
        Symbol::D,
        Symbol::E,
        Symbol::F,
        Symbol::G,
        Symbol::H,
        Symbol::I,
    ];

    /// Parse a character, folding lowercase letters to uppercase.
    ///
    /// Returns `None` for anything outside the alphabet, including `'0'`.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '1' => Some(Symbol::One),
            '2' => Some(Symbol::Two),
            '3' => Some(Symbol::Three),
            '4' => Some(Symbol::Four),
            '5' => Some(Symbol::Five),
            '6' => Some(Symbol::Six),
            '7' => Some(Symbol::Seven),
            '8' => Some(Symbol::Eight),
            '9' => Some(Symbol::Nine),
            'A' => Some(Symbol::A),
            'B' => Some(Symbol::B),
            'C' => Some(Symbol::C),
            'D' => Some(Symbol::D),
            'E' => Some(Symbol::E),
            'F' => Some(Symbol::F),
            'G' => Some(Symbol::G),
            'H' => Some(Symbol::H),
            'I' => Some(Symbol::I),
            _ => None,
        }
    }

    /// Decode a single raw byte from the wire.
    ///
    /// Bytes that are not a complete single-byte UTF-8 sequence are ignored.
    pub fn from_byte(byte: u8) -> Option<Self> {
        if byte.is_ascii() {
            Self::from_char(byte as char)
        } else {
            None
        }
    }

    /// Canonical (uppercase) character for this symbol
    pub fn as_char(self) -> char {
        match self {
            Symbol::One => '1',
            Symbol::Two => '2',
            Symbol::Three => '3',
            Symbol::Four => '4',
            Symbol::Five => '5',
            Symbol::Six => '6',
            Symbol::Seven => '7',
            Symbol::Eight => '8',
            Symbol::Nine => '9',
            Symbol::A => 'A',
            Symbol::B => 'B',
            Symbol::C => 'C',
            Symbol::D => 'D',
            Symbol::E => 'E',
            Symbol::F => 'F',
            Symbol::G => 'G',
            Symbol::H => 'H',
            Symbol::I => 'I',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Check whether a character belongs to the accepted alphabet
pub fn is_accepted(c: char) -> bool {
    Symbol::from_char(c).is_some()
}

/// Keep only accepted symbols, in order
pub fn filter(input: &str) -> Vec<Symbol> {
    input.chars().filter_map(Symbol::from_char).collect()
}

/// Keep only accepted symbols from raw bytes, in order
pub fn filter_bytes(input: &[u8]) -> Vec<Symbol> {
    input.iter().copied().filter_map(Symbol::from_byte).collect()
}

/// Render symbols back to their normalized string form
pub fn to_string(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.as_char()).collect()
}

/// Filter and normalize in one step.
///
/// `normalize(&normalize(s)) == normalize(s)` for every input.
pub fn normalize(input: &str) -> String {
    to_string(&filter(input))
}
