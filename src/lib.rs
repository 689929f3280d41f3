// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Serial-to-MIDI melody capture.
//!
//! Reads characters from a serial instrument for a fixed duration, keeps the
//! accepted alphabet (`1`-`9`, `A`-`I`) and writes one note per character to
//! a single-track Standard MIDI File.

pub mod config;
pub mod music;
pub mod recording;
pub mod serial;
pub mod session;
pub mod ui;

pub use config::Settings;
pub use music::Symbol;
pub use recording::{ExportError, MelodyExporter};
pub use serial::{ByteSource, CollectError, Collector};
pub use session::{Outcome, Session};
