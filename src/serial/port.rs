// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Serial port backend.
//!
//! Implements `ByteSource` on top of the `serialport` crate. The port is
//! released when the source is dropped.

use std::io::{self, Read};
use std::time::Duration;

use serialport::{ClearBuffer, SerialPort, SerialPortType};
use tracing::{debug, info};

use super::{ByteSource, CollectError};

/// Serial port opened for reading symbols.
pub struct SerialPortSource {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialPortSource {
    /// Open a serial port.
    ///
    /// # Arguments
    /// * `name` - Port name (e.g. `COM10`, `/dev/ttyACM0`)
    /// * `baud_rate` - Line speed
    /// * `read_timeout` - Longest a single read may block
    ///
    /// # Returns
    /// * `Ok(SerialPortSource)` on success
    /// * `Err(CollectError::Open)` if the device is absent or busy
    pub fn open(name: &str, baud_rate: u32, read_timeout: Duration) -> Result<Self, CollectError> {
        let port = serialport::new(name, baud_rate)
            .timeout(read_timeout)
            .open()
            .map_err(|source| CollectError::Open {
                port: name.to_string(),
                source,
            })?;

        info!(port = name, baud_rate, "serial port opened");
        Ok(Self {
            port,
            name: name.to_string(),
        })
    }
}

impl ByteSource for SerialPortSource {
    fn clear_input(&mut self) -> Result<(), CollectError> {
        self.port
            .clear(ClearBuffer::Input)
            .map_err(|e| CollectError::Transport(e.into()))
    }

    fn read_byte(&mut self) -> Result<Option<u8>, CollectError> {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(CollectError::Transport(e)),
        }
    }
}

impl Drop for SerialPortSource {
    fn drop(&mut self) {
        info!(port = %self.name, "serial port closed");
    }
}

/// A serial port reported by the OS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortEntry {
    /// Name to pass to `--port`
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Platform default port name
pub fn default_port_name() -> &'static str {
    if cfg!(windows) {
        "COM10"
    } else if cfg!(target_os = "macos") {
        "/dev/tty.usbmodem1101"
    } else {
        "/dev/ttyACM0"
    }
}

fn describe(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => {
            let product = usb.product.as_deref().unwrap_or("USB device");
            match usb.manufacturer.as_deref() {
                Some(maker) => format!("{} ({}) [{:04x}:{:04x}]", product, maker, usb.vid, usb.pid),
                None => format!("{} [{:04x}:{:04x}]", product, usb.vid, usb.pid),
            }
        }
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "Unknown".to_string(),
    }
}

/// List all serial ports the OS reports.
pub fn list_ports() -> io::Result<Vec<PortEntry>> {
    let ports = serialport::available_ports().map_err(io::Error::from)?;
    debug!(count = ports.len(), "enumerated serial ports");
    Ok(ports
        .into_iter()
        .map(|p| PortEntry {
            description: describe(&p.port_type),
            name: p.port_name,
        })
        .collect())
}

/// Print all available serial ports to stdout.
pub fn print_ports() -> io::Result<()> {
    let ports = list_ports()?;
    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {}: {}", port.name, port.description);
        }
    }
    Ok(())
}
