// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! One read-convert cycle.
//!
//! Collects symbols from the serial port, asks where to save them, writes
//! the MIDI file and optionally reveals it. Transport failures and empty
//! captures are outcomes, not errors: neither produces a file and the
//! process still exits normally.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Settings;
use crate::recording::{ExportError, MelodyExporter};
use crate::serial::{ByteSource, CollectError, Collector, ProgressReporter, SerialPortSource};
use crate::ui::{reveal_folder, FixedPath, SavePrompt, TerminalPrompt};

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// File written
    Saved {
        path: PathBuf,
        /// Number of notes (accepted characters) written
        notes: usize,
    },
    /// Nothing usable was received
    NoData,
    /// The user declined to pick a save location
    Canceled,
    /// The serial port could not be opened or read
    TransportFailed(String),
}

impl Outcome {
    /// True when a file was written
    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved { .. })
    }
}

/// Save prompt for the given settings: the configured path, or the terminal
pub fn save_prompt(settings: &Settings) -> Box<dyn SavePrompt> {
    match &settings.output {
        Some(path) => Box::new(FixedPath(path.clone())),
        None => Box::new(TerminalPrompt::stdio()),
    }
}

/// A configured capture session
#[derive(Debug, Clone)]
pub struct Session {
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Get settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Exporter configured from the settings
    pub fn exporter(&self) -> MelodyExporter {
        MelodyExporter::new()
            .with_tempo(self.settings.tempo)
            .with_instrument(self.settings.instrument)
            .with_track_name(self.settings.track_name.clone())
    }

    /// Open the configured serial port and run the session on it.
    pub fn run<R, P>(&self, reporter: &mut R, prompt: &mut P) -> Result<Outcome>
    where
        R: ProgressReporter + ?Sized,
        P: SavePrompt + ?Sized,
    {
        let source = SerialPortSource::open(
            &self.settings.port,
            self.settings.baud,
            self.settings.read_timeout(),
        );
        match source {
            Ok(source) => self.run_with_source(source, reporter, prompt),
            Err(e) => Ok(transport_failed(e)),
        }
    }

    /// Run the session on an already-open byte source.
    pub fn run_with_source<S, R, P>(
        &self,
        source: S,
        reporter: &mut R,
        prompt: &mut P,
    ) -> Result<Outcome>
    where
        S: ByteSource,
        R: ProgressReporter + ?Sized,
        P: SavePrompt + ?Sized,
    {
        // Reject settings the encoder would refuse before spending the capture
        self.settings.validate()?;

        let collector = Collector::new(self.settings.read_duration());
        let collected = match collector.run(source, reporter) {
            Ok(collected) => collected,
            Err(e) => return Ok(transport_failed(e)),
        };

        if collected.is_empty() {
            info!("no data received from serial port");
            return Ok(Outcome::NoData);
        }

        let path = match prompt.ask().context("Failed to read save location")? {
            Some(path) => path,
            None => {
                info!("save canceled");
                return Ok(Outcome::Canceled);
            }
        };

        let symbols = match self.exporter().export(&collected.as_string(), &path) {
            Ok(symbols) => symbols,
            Err(ExportError::EmptyInput) => return Ok(Outcome::NoData),
            Err(e) => return Err(e).with_context(|| format!("Failed to save {:?}", path)),
        };

        if self.settings.open_folder {
            if let Err(e) = reveal_folder(&path) {
                warn!(error = %e, "could not open folder");
            }
        }

        Ok(Outcome::Saved {
            path,
            notes: symbols.len(),
        })
    }
}

fn transport_failed(e: CollectError) -> Outcome {
    warn!(error = %e, "serial transport failed");
    Outcome::TransportFailed(e.to_string())
}
