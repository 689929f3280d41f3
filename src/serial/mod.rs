// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Serial input layer.
//!
//! This module provides a trait-based abstraction over the byte stream coming
//! from the instrument, so the collector can run against a real serial port
//! or an in-memory source interchangeably.

pub mod collector;
pub mod port;

use std::io;

use thiserror::Error;

pub use collector::{Collected, Collector, Progress, ProgressReporter, SilentProgress};
pub use port::{default_port_name, list_ports, print_ports, PortEntry, SerialPortSource};

/// Errors raised by the serial transport.
///
/// Both variants mean the same thing to the user: the device could not be
/// read and no file will be produced.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Port missing, busy, or permission denied
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },
    /// Read failure or disconnect after the port was opened
    #[error("serial transport error: {0}")]
    Transport(#[from] io::Error),
}

/// Trait for byte sources the collector can read from.
pub trait ByteSource {
    /// Discard anything already buffered by the driver.
    fn clear_input(&mut self) -> Result<(), CollectError>;

    /// Read the next byte.
    ///
    /// Blocks for at most the source's read timeout.
    ///
    /// # Returns
    /// * `Ok(Some(byte))` when a byte arrived
    /// * `Ok(None)` when the timeout elapsed with nothing to read
    /// * `Err` on a transport failure
    fn read_byte(&mut self) -> Result<Option<u8>, CollectError>;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn clear_input(&mut self) -> Result<(), CollectError> {
        (**self).clear_input()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, CollectError> {
        (**self).read_byte()
    }
}
