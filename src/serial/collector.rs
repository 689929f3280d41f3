// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timed symbol collection.
//!
//! Reads from a `ByteSource` for a fixed wall-clock duration, keeping only
//! bytes in the accepted alphabet. Reads block for the source's short
//! timeout instead of spinning on "bytes available", so per-character
//! granularity is kept without burning a core.

use std::time::{Duration, Instant};

use tracing::{debug, error, info, trace};

use super::{ByteSource, CollectError};
use crate::music::{alphabet, Symbol};

/// Snapshot of a running collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Time since collection started
    pub elapsed: Duration,
    /// Total collection time
    pub duration: Duration,
    /// Accepted characters so far
    pub accepted: usize,
}

impl Progress {
    /// Fraction of the duration elapsed (0.0 - 1.0)
    pub fn fraction(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Whole percent of the duration elapsed (0 - 100)
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0) as u32
    }
}

/// Receives progress updates from the collector.
pub trait ProgressReporter {
    /// Called once the port is ready, before the first read.
    fn start(&mut self, _duration: Duration) {}

    /// Called once per update interval while collecting.
    fn update(&mut self, progress: &Progress);

    /// Called once after the full duration has elapsed.
    fn finish(&mut self, progress: &Progress);
}

/// Reporter that discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn update(&mut self, _progress: &Progress) {}

    fn finish(&mut self, _progress: &Progress) {}
}

/// Result of a completed collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    /// Accepted symbols in arrival order
    pub symbols: Vec<Symbol>,
    /// Every byte read, accepted or not
    pub bytes_read: usize,
}

impl Collected {
    /// True when nothing was accepted
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of accepted characters
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Accepted symbols as a normalized string
    pub fn as_string(&self) -> String {
        alphabet::to_string(&self.symbols)
    }
}

/// Timed collector
#[derive(Debug, Clone)]
pub struct Collector {
    /// How long to read for
    duration: Duration,
    /// How often to report progress
    update_interval: Duration,
}

impl Collector {
    /// Create a collector that reads for `duration`, reporting once a second
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            update_interval: Duration::from_secs(1),
        }
    }

    /// Change the progress cadence
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Collect symbols until the duration has elapsed.
    ///
    /// The source is consumed and dropped before this returns, on success and
    /// on error alike. A transport error aborts immediately and anything
    /// collected so far is discarded.
    pub fn run<S, R>(&self, mut source: S, reporter: &mut R) -> Result<Collected, CollectError>
    where
        S: ByteSource,
        R: ProgressReporter + ?Sized,
    {
        source.clear_input()?;

        info!(duration_secs = self.duration.as_secs_f64(), "collecting symbols");
        reporter.start(self.duration);

        let mut collected = Collected::default();
        let start = Instant::now();
        let mut next_update = start + self.update_interval;

        while start.elapsed() < self.duration {
            let now = Instant::now();
            if now >= next_update {
                let progress = Progress {
                    elapsed: now - start,
                    duration: self.duration,
                    accepted: collected.len(),
                };
                debug!(
                    percent = progress.percent(),
                    accepted = progress.accepted,
                    "collection progress"
                );
                reporter.update(&progress);
                next_update = now + self.update_interval;
            }

            let byte = match source.read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => continue,
                Err(e) => {
                    error!(
                        error = %e,
                        discarded = collected.len(),
                        "serial read failed, discarding collected symbols"
                    );
                    return Err(e);
                }
            };

            collected.bytes_read += 1;
            if let Some(symbol) = Symbol::from_byte(byte) {
                trace!(%symbol, "accepted");
                collected.symbols.push(symbol);
            }
        }

        reporter.finish(&Progress {
            elapsed: self.duration,
            duration: self.duration,
            accepted: collected.len(),
        });

        info!(
            accepted = collected.len(),
            bytes_read = collected.bytes_read,
            "collection complete"
        );
        Ok(collected)
    }
}
