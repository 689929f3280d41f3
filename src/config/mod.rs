// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for a capture session.
//!
//! Settings come from built-in defaults, optionally overlaid by a YAML file,
//! and finally by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::recording::{validate_tempo, DEFAULT_INSTRUMENT, DEFAULT_TEMPO, DEFAULT_TRACK_NAME};
use crate::serial::default_port_name;

/// Settings for one read-convert cycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Serial port name
    pub port: String,
    /// Baud rate
    pub baud: u32,
    /// How long to read, in seconds
    pub duration: u64,
    /// Tempo in BPM
    pub tempo: u32,
    /// General MIDI program (73 = flute)
    pub instrument: u8,
    /// Output file; prompt when unset
    pub output: Option<PathBuf>,
    /// Open the containing folder after saving
    pub open_folder: bool,
    /// Longest a single serial read may block, in milliseconds
    pub read_timeout_ms: u64,
    /// Track name written into the file
    pub track_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: default_port_name().to_string(),
            baud: 230_400,
            duration: 30,
            tempo: DEFAULT_TEMPO,
            instrument: DEFAULT_INSTRUMENT,
            output: None,
            open_folder: true,
            read_timeout_ms: 10,
            track_name: DEFAULT_TRACK_NAME.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file; missing keys keep their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Check values that would otherwise fail late
    pub fn validate(&self) -> Result<()> {
        if self.port.trim().is_empty() {
            bail!("Serial port name must not be empty");
        }
        if self.baud == 0 {
            bail!("Baud rate must be greater than 0");
        }
        validate_tempo(self.tempo).context("Tempo cannot be written to a MIDI file")?;
        if self.instrument > 127 {
            bail!("Instrument must be 0-127, got {}", self.instrument);
        }
        if self.read_timeout_ms == 0 {
            bail!("Read timeout must be greater than 0 ms");
        }
        Ok(())
    }

    /// Collection duration
    pub fn read_duration(&self) -> Duration {
        Duration::from_secs(self.duration)
    }

    /// Per-read timeout
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
