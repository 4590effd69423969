//! Capability traits for device access.
//!
//! These are the three seams the rest of the crate depends on: opening a
//! serial device, writing a digital pin, and reading an analog channel.
//! Concrete drivers (and test mocks) implement them; the bot runtime only
//! ever sees trait objects.

use crate::error::Result;

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PinLevel {
    Low = 0,
    High = 1,
}

impl PinLevel {
    /// The opposite level.
    pub fn toggled(self) -> Self {
        match self {
            PinLevel::Low => PinLevel::High,
            PinLevel::High => PinLevel::Low,
        }
    }
}

/// A digital output pin.
pub trait DigitalPin: Send {
    /// Drive the pin to the given level.
    fn write(&mut self, level: PinLevel) -> Result<()>;
}

/// An analog input channel.
pub trait AnalogPin: Send {
    /// Read the most recent value reported for this channel.
    fn read(&mut self) -> Result<f64>;
}

/// A board-specific protocol adaptor wrapping an open connection.
///
/// Handing out a pin configures it on the board; the returned handles stay
/// valid for the adaptor's lifetime and may be moved to other tasks.
pub trait DeviceAdaptor: Send {
    /// Configure `pin` as a digital output and return a handle to it.
    fn digital_pin(&mut self, pin: u8) -> Result<Box<dyn DigitalPin>>;

    /// Enable reporting for analog `channel` and return a handle to it.
    fn analog_pin(&mut self, channel: u8) -> Result<Box<dyn AnalogPin>>;

    /// Start the adaptor. Called once before any timer work begins.
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Stop the adaptor. Best-effort; called once on shutdown.
    fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Opens a serial device and wraps it in a protocol adaptor.
pub trait SerialConnector {
    /// Open `device` at `baud` and return the adaptor for it.
    fn open(&self, device: &str, baud: u32) -> Result<Box<dyn DeviceAdaptor>>;
}
