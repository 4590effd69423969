//! Hardware device abstractions.
//!
//! The bot runtime never talks to a concrete driver directly: all device
//! I/O goes through the narrow capability traits in [`traits`]. The
//! [`firmata`] module provides the serial-backed implementation used by the
//! binaries, and [`mock`] provides a scripted implementation for tests.

pub mod firmata;
pub mod mock;
pub mod traits;

// Re-export commonly used items
pub use firmata::{FirmataAdaptor, FirmataConnector};
pub use mock::{MockAdaptor, MockConnector};
pub use traits::{AnalogPin, DeviceAdaptor, DigitalPin, PinLevel, SerialConnector};
