// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standard MIDI file export.
//!
//! Lays out one fixed-length note per accepted symbol and writes the result
//! as a single-track (format 0) MIDI file.

use std::fs;
use std::path::Path;

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use tracing::{debug, info};

use super::ExportError;
use crate::music::{filter, MidiNote, Symbol};

/// Ticks per quarter note
pub const PPQN: u16 = 960;

/// Length of every note in beats
pub const NOTE_BEATS: f64 = 0.5;

/// Length of every note in ticks
pub const NOTE_TICKS: u32 = PPQN as u32 / 2;

/// Note-on velocity for every note
pub const NOTE_VELOCITY: u8 = 100;

/// Default tempo in BPM
pub const DEFAULT_TEMPO: u32 = 120;

/// Default General MIDI program (flute)
pub const DEFAULT_INSTRUMENT: u8 = 73;

/// Default track name meta-event text
pub const DEFAULT_TRACK_NAME: &str = "Melody from Serial Characters";

const CHANNEL: u8 = 0;

/// Largest value a tempo meta-event can carry
const MAX_MICROS_PER_BEAT: u32 = 0x00FF_FFFF;

/// Most notes a single file can hold before the end tick leaves `u32`
pub const MAX_NOTES: usize = (u32::MAX / NOTE_TICKS) as usize;

/// Check a tempo and return its microseconds per quarter note.
///
/// The tempo meta-event holds 24 bits, so anything under 4 BPM is rejected.
pub fn validate_tempo(bpm: u32) -> Result<u32, ExportError> {
    if bpm == 0 {
        return Err(ExportError::InvalidTempo(bpm));
    }
    let micros = 60_000_000 / bpm;
    if micros == 0 || micros > MAX_MICROS_PER_BEAT {
        return Err(ExportError::InvalidTempo(bpm));
    }
    Ok(micros)
}

/// A note laid out on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MelodyNote {
    /// Source symbol
    pub symbol: Symbol,
    /// Note number (0-127)
    pub pitch: MidiNote,
    /// Start tick
    pub start_tick: u32,
    /// Duration in ticks
    pub duration: u32,
    /// Velocity (1-127)
    pub velocity: u8,
}

impl MelodyNote {
    /// End tick
    pub fn end_tick(&self) -> u32 {
        self.start_tick + self.duration
    }

    /// Start position in beats
    pub fn start_beat(&self) -> f64 {
        self.start_tick as f64 / PPQN as f64
    }

    /// Duration in beats
    pub fn duration_beats(&self) -> f64 {
        self.duration as f64 / PPQN as f64
    }
}

/// MIDI file exporter for symbol melodies
#[derive(Debug, Clone)]
pub struct MelodyExporter {
    /// Tempo in BPM
    tempo: u32,
    /// General MIDI program
    instrument: u8,
    /// Track name meta-event text
    track_name: String,
}

impl MelodyExporter {
    /// Create a new exporter with the default tempo and instrument
    pub fn new() -> Self {
        Self {
            tempo: DEFAULT_TEMPO,
            instrument: DEFAULT_INSTRUMENT,
            track_name: DEFAULT_TRACK_NAME.to_string(),
        }
    }

    /// Set tempo in BPM
    pub fn with_tempo(mut self, bpm: u32) -> Self {
        self.tempo = bpm;
        self
    }

    /// Set the General MIDI program
    pub fn with_instrument(mut self, program: u8) -> Self {
        self.instrument = program;
        self
    }

    /// Set the track name
    pub fn with_track_name(mut self, name: impl Into<String>) -> Self {
        self.track_name = name.into();
        self
    }

    /// Get tempo
    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Get instrument
    pub fn instrument(&self) -> u8 {
        self.instrument
    }

    /// Get track name
    pub fn track_name(&self) -> &str {
        &self.track_name
    }

    fn program(&self) -> Result<u7, ExportError> {
        if self.instrument > 127 {
            return Err(ExportError::InvalidInstrument(self.instrument));
        }
        Ok(u7::new(self.instrument))
    }

    /// Lay out one note per symbol, back to back from tick 0.
    ///
    /// Fails with `ExportError::TooLong` past `MAX_NOTES`.
    pub fn build_notes(symbols: &[Symbol]) -> Result<Vec<MelodyNote>, ExportError> {
        if symbols.len() > MAX_NOTES {
            return Err(ExportError::TooLong(symbols.len()));
        }
        symbols
            .iter()
            .enumerate()
            .map(|(i, &symbol)| -> Result<MelodyNote, ExportError> {
                let start_tick = u32::try_from(i)
                    .ok()
                    .and_then(|i| i.checked_mul(NOTE_TICKS))
                    .filter(|start| start.checked_add(NOTE_TICKS).is_some())
                    .ok_or(ExportError::TooLong(symbols.len()))?;
                Ok(MelodyNote {
                    symbol,
                    pitch: symbol.pitch(),
                    start_tick,
                    duration: NOTE_TICKS,
                    velocity: NOTE_VELOCITY,
                })
            })
            .collect()
    }

    /// Build the in-memory file for a set of notes
    fn build_smf(&self, notes: &[MelodyNote]) -> Result<Smf<'_>, ExportError> {
        let micros = validate_tempo(self.tempo)?;
        let program = self.program()?;
        let channel = u4::new(CHANNEL);

        let mut events: Vec<(u32, TrackEventKind<'_>)> = Vec::with_capacity(notes.len() * 2 + 4);
        events.push((0, TrackEventKind::Meta(MetaMessage::TrackName(self.track_name.as_bytes()))));
        events.push((0, TrackEventKind::Meta(MetaMessage::Tempo(u24::new(micros)))));
        events.push((
            0,
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::ProgramChange { program },
            },
        ));

        // Each note-off lands on the same tick as the next note-on and comes first
        for note in notes {
            events.push((
                note.start_tick,
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn {
                        key: u7::new(note.pitch),
                        vel: u7::new(note.velocity),
                    },
                },
            ));
            events.push((
                note.end_tick(),
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOff {
                        key: u7::new(note.pitch),
                        vel: u7::new(0),
                    },
                },
            ));
        }

        let mut track = Vec::with_capacity(events.len() + 1);
        let mut last_tick = 0u32;
        for (tick, kind) in events {
            track.push(TrackEvent {
                delta: u28::new(tick - last_tick),
                kind,
            });
            last_tick = tick;
        }
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });

        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(PPQN)),
        ));
        smf.tracks.push(track);
        Ok(smf)
    }

    /// Filter the input and encode it to MIDI bytes.
    ///
    /// Returns the accepted symbols alongside the encoded file.
    pub fn to_bytes(&self, input: &str) -> Result<(Vec<Symbol>, Vec<u8>), ExportError> {
        let symbols = filter(input);
        if symbols.is_empty() {
            return Err(ExportError::EmptyInput);
        }

        let notes = Self::build_notes(&symbols)?;
        let smf = self.build_smf(&notes)?;

        let mut bytes = Vec::new();
        smf.write(&mut bytes)
            .map_err(|e| ExportError::Encode(e.to_string()))?;

        debug!(
            notes = notes.len(),
            bytes = bytes.len(),
            tempo = self.tempo,
            instrument = self.instrument,
            "encoded melody"
        );
        Ok((symbols, bytes))
    }

    /// Filter the input, encode it and write the file in one step.
    ///
    /// Nothing is created on disk unless the whole file encoded successfully.
    pub fn export<P: AsRef<Path>>(&self, input: &str, path: P) -> Result<Vec<Symbol>, ExportError> {
        let path = path.as_ref();
        let (symbols, bytes) = self.to_bytes(input)?;

        fs::write(path, &bytes).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), notes = symbols.len(), "MIDI file written");
        Ok(symbols)
    }
}

impl Default for MelodyExporter {
    fn default() -> Self {
        Self::new()
    }
}
