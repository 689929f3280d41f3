// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Symbol alphabet and pitch mapping.
//!
//! This module owns the single validation utility shared by the serial
//! collector and the MIDI encoder, plus the fixed symbol-to-pitch table.

pub mod alphabet;
pub mod pitch;

pub use alphabet::{filter, filter_bytes, is_accepted, normalize, Symbol};
pub use pitch::{pitches, MidiNote, PITCH_TABLE};
