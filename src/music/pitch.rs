// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Symbol-to-pitch table.
//!
//! Digits cover the upper register (D5 to B5), letters extend it down
//! towards D4. The table is fixed and exhaustive over the alphabet.

use super::alphabet::Symbol;

/// MIDI note number type (0-127)
pub type MidiNote = u8;

/// The full table, in `Symbol::ALL` order
pub const PITCH_TABLE: [(Symbol, MidiNote); 18] = [
    (Symbol::One, 83),   // B5
    (Symbol::Two, 82),   // A#5
    (Symbol::Three, 81), // A5
    (Symbol::Four, 79),  // G5
    (Symbol::Five, 78),  // F#5
    (Symbol::Six, 77),   // F5
    (Symbol::Seven, 76), // E5
    (Symbol::Eight, 74), // D5
    (Symbol::Nine, 75),  // D#5
    (Symbol::A, 72),     // C5
    (Symbol::B, 71),     // B4
    (Symbol::C, 70),     // A#4
    (Symbol::D, 69),     // A4
    (Symbol::E, 67),     // G4
    (Symbol::F, 66),     // F#4
    (Symbol::G, 65),     // F4
    (Symbol::H, 64),     // E4
    (Symbol::I, 62),     // D4
];

impl Symbol {
    /// MIDI note number for this symbol
    pub fn pitch(self) -> MidiNote {
        // PITCH_TABLE is laid out in declaration order
        PITCH_TABLE[self as usize].1
    }
}

/// Map a sequence of symbols to note numbers
pub fn pitches(symbols: &[Symbol]) -> Vec<MidiNote> {
    symbols.iter().map(|s| s.pitch()).collect()
}
