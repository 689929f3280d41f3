// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal progress bar for symbol collection.

use std::io::{self, Write};
use std::time::Duration;

use crate::serial::{Progress, ProgressReporter};

/// Default bar width in cells
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Render a single progress line (without carriage return).
///
/// e.g. `[################                        ] 40% (12 characters read)`
pub fn render_bar(progress: &Progress, width: usize) -> String {
    let filled = ((progress.fraction() * width as f64) as usize).min(width);
    format!(
        "[{}{}] {}% ({} characters read)",
        "#".repeat(filled),
        " ".repeat(width - filled),
        progress.percent(),
        progress.accepted
    )
}

/// Progress bar redrawn in place on a terminal
pub struct ProgressBar<W: Write> {
    out: W,
    width: usize,
}

impl ProgressBar<io::Stdout> {
    /// Progress bar on stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout(), DEFAULT_BAR_WIDTH)
    }
}

impl<W: Write> ProgressBar<W> {
    /// Create a progress bar writing to `out`
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width: width.max(1),
        }
    }

    /// Consume the bar and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressReporter for ProgressBar<W> {
    fn start(&mut self, _duration: Duration) {
        let _ = write!(self.out, "[{}] 0%\r", " ".repeat(self.width));
        let _ = self.out.flush();
    }

    fn update(&mut self, progress: &Progress) {
        // Progress output is best-effort
        let _ = write!(self.out, "{}\r", render_bar(progress, self.width));
        let _ = self.out.flush();
    }

    fn finish(&mut self, progress: &Progress) {
        let _ = writeln!(self.out, "{}", render_bar(progress, self.width));
        let _ = self.out.flush();
    }
}
