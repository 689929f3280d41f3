// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melody export.
//!
//! This module provides:
//! - Note layout from an accepted symbol sequence
//! - Standard MIDI file encoding (format 0) via `midly`
//! - Single-step file writes

pub mod export;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use export::{
    validate_tempo, MelodyExporter, MelodyNote, DEFAULT_INSTRUMENT, DEFAULT_TEMPO,
    DEFAULT_TRACK_NAME, MAX_NOTES, NOTE_BEATS, NOTE_TICKS, NOTE_VELOCITY, PPQN,
};

/// Errors raised while turning symbols into a MIDI file
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing in the input survived filtering
    #[error("no valid characters (1-9, A-I) found in the input")]
    EmptyInput,
    /// Tempo cannot be expressed as a MIDI tempo meta-event
    #[error("invalid tempo {0} BPM")]
    InvalidTempo(u32),
    /// More notes than fit on a 32-bit tick timeline
    #[error("too many notes ({0}); at most {max} fit in one file", max = export::MAX_NOTES)]
    TooLong(usize),
    /// Instrument outside the General MIDI program range
    #[error("invalid instrument {0} (expected 0-127)")]
    InvalidInstrument(u8),
    /// The encoder rejected the file
    #[error("failed to encode MIDI: {0}")]
    Encode(String),
    /// The file could not be written
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// True when the failure means "no data", as opposed to a real fault
    pub fn is_empty_input(&self) -> bool {
        matches!(self, ExportError::EmptyInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exporter_creation() {
        let exporter = MelodyExporter::new();
        assert_eq!(exporter.tempo(), DEFAULT_TEMPO);
        assert_eq!(exporter.instrument(), DEFAULT_INSTRUMENT);
    }

    #[test]
    fn test_empty_input_is_distinct() {
        assert!(ExportError::EmptyInput.is_empty_input());
        assert!(!ExportError::InvalidTempo(0).is_empty_input());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExportError::InvalidInstrument(200).to_string(),
            "invalid instrument 200 (expected 0-127)"
        );
        assert!(ExportError::EmptyInput.to_string().contains("1-9, A-I"));
        assert!(ExportError::TooLong(MAX_NOTES + 1)
            .to_string()
            .contains(&MAX_NOTES.to_string()));
    }
}
