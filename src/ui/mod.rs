// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal user interaction.
//!
//! This module provides:
//! - The collection progress bar
//! - Save-path prompting
//! - Revealing the saved file's folder

pub mod progress;
pub mod save;

pub use progress::{render_bar, ProgressBar, DEFAULT_BAR_WIDTH};
pub use save::{reveal_folder, with_midi_extension, FixedPath, SavePrompt, TerminalPrompt};
