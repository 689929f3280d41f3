// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for serial-melody
//!
//! These tests drive a whole capture session against in-memory byte sources
//! and check the MIDI file that lands on disk.

use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use midly::{MetaMessage, MidiMessage, Smf, TrackEventKind};

use serial_melody::music::{filter, normalize};
use serial_melody::recording::{NOTE_TICKS, PPQN};
use serial_melody::serial::SilentProgress;
use serial_melody::ui::FixedPath;
use serial_melody::{ByteSource, CollectError, MelodyExporter, Outcome, Session, Settings};

/// Byte source replaying a fixed stream, then timing out or failing
struct ReplaySource {
    bytes: VecDeque<u8>,
    fail_when_drained: bool,
}

impl ReplaySource {
    fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
            fail_when_drained: false,
        }
    }

    fn disconnecting(bytes: &[u8]) -> Self {
        Self {
            fail_when_drained: true,
            ..Self::new(bytes)
        }
    }
}

impl ByteSource for ReplaySource {
    fn clear_input(&mut self) -> Result<(), CollectError> {
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, CollectError> {
        if let Some(byte) = self.bytes.pop_front() {
            return Ok(Some(byte));
        }
        if self.fail_when_drained {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device disconnected").into());
        }
        thread::sleep(Duration::from_millis(1));
        Ok(None)
    }
}

fn settings(duration: u64) -> Settings {
    Settings {
        duration,
        open_folder: false,
        ..Settings::default()
    }
}

/// (start tick, key) of every note-on in the first track
fn note_ons(path: &Path) -> Vec<(u32, u8)> {
    let bytes = fs::read(path).unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    assert_eq!(smf.tracks.len(), 1);

    let mut tick = 0u32;
    let mut notes = Vec::new();
    for event in &smf.tracks[0] {
        tick += event.delta.as_int();
        if let TrackEventKind::Midi {
            message: MidiMessage::NoteOn { key, vel },
            ..
        } = event.kind
        {
            assert_eq!(vel.as_int(), 100);
            notes.push((tick, key.as_int()));
        }
    }
    notes
}

/// Test the whole path from serial bytes to a MIDI file
#[test]
fn test_serial_capture_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.mid");

    let session = Session::new(settings(1));
    let outcome = session
        .run_with_source(
            ReplaySource::new(b"xyz1\r\n2\r\n3\r\n"),
            &mut SilentProgress,
            &mut FixedPath(path.clone()),
        )
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Saved {
            path: path.clone(),
            notes: 3
        }
    );

    let notes = note_ons(&path);
    assert_eq!(notes, vec![(0, 83), (NOTE_TICKS, 82), (2 * NOTE_TICKS, 81)]);

    let beats: Vec<f64> = notes.iter().map(|(t, _)| *t as f64 / PPQN as f64).collect();
    assert_eq!(beats, vec![0.0, 0.5, 1.0]);
}

/// Test that a silent device produces no file
#[test]
fn test_silent_device_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("silent.mid");

    let outcome = Session::new(settings(1))
        .run_with_source(
            ReplaySource::new(b"xyz\r\n000"),
            &mut SilentProgress,
            &mut FixedPath(path.clone()),
        )
        .unwrap();

    assert_eq!(outcome, Outcome::NoData);
    assert!(!path.exists());
}

/// Test that a mid-read disconnect discards everything
#[test]
fn test_disconnect_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.mid");

    let outcome = Session::new(settings(30))
        .run_with_source(
            ReplaySource::disconnecting(b"123ABC"),
            &mut SilentProgress,
            &mut FixedPath(path.clone()),
        )
        .unwrap();

    assert!(matches!(outcome, Outcome::TransportFailed(ref msg) if msg.contains("disconnected")));
    assert!(!outcome.is_saved());
    assert!(!path.exists());
}

/// Test the encoder directly on raw strings
#[test]
fn test_encoder_scenarios() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = MelodyExporter::new();

    let mixed = dir.path().join("mixed.mid");
    let symbols = exporter.export("aBcD", &mixed).unwrap();
    assert_eq!(symbols.len(), 4);
    let keys: Vec<u8> = note_ons(&mixed).into_iter().map(|(_, k)| k).collect();
    assert_eq!(keys, vec![72, 71, 70, 69]);

    for input in ["", "xyz"] {
        let empty = dir.path().join("empty.mid");
        let err = exporter.export(input, &empty).unwrap_err();
        assert!(err.is_empty_input());
        assert!(!empty.exists());
    }
}

/// Test that the file carries the expected header events
#[test]
fn test_file_meta_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meta.mid");

    MelodyExporter::new()
        .with_tempo(100)
        .with_instrument(73)
        .export("9", &path)
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    let smf = Smf::parse(&bytes).unwrap();
    let kinds: Vec<TrackEventKind> = smf.tracks[0].iter().map(|e| e.kind).collect();

    assert!(matches!(kinds[0], TrackEventKind::Meta(MetaMessage::TrackName(_))));
    // 100 BPM = 600000 microseconds per beat
    assert!(matches!(kinds[1], TrackEventKind::Meta(MetaMessage::Tempo(t)) if t.as_int() == 600_000));
    assert!(matches!(
        kinds[2],
        TrackEventKind::Midi {
            message: MidiMessage::ProgramChange { program },
            ..
        } if program.as_int() == 73
    ));
}

/// Test that note count always equals filtered length
#[test]
fn test_note_count_matches_filtered_length() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = [
        "hello123world",
        "123456789ABCDEFGHIabcdefghi",
        "0000000001",
        "\u{2460}\u{00B2}I",
    ];

    for (i, input) in inputs.iter().enumerate() {
        let path = dir.path().join(format!("count{}.mid", i));
        MelodyExporter::new().export(input, &path).unwrap();
        assert_eq!(note_ons(&path).len(), filter(input).len(), "input {:?}", input);
    }
}

/// Test that filtering is stable across collector and encoder
#[test]
fn test_double_filtering_is_harmless() {
    let raw = "hello123world";
    let once = normalize(raw);
    assert_eq!(once, "HE123D");
    assert_eq!(normalize(&once), once);
}

/// Test that notes are strictly sequential with no overlap
#[test]
fn test_notes_strictly_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seq.mid");
    MelodyExporter::new().export("1A2B3C4D5E", &path).unwrap();

    let notes = note_ons(&path);
    for pair in notes.windows(2) {
        assert_eq!(pair[1].0 - pair[0].0, NOTE_TICKS);
    }
}
