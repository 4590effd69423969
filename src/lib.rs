//! # luxstream - Serial Light-Sensor Streaming
//!
//! A small crate for streaming analog light-sensor readings from a
//! Firmata-speaking microcontroller (e.g. an Arduino) over a serial port.
//! Readings flow through a bounded channel to an in-process consumer:
//! either a console printer or a live SVG chart pushed to browsers over a
//! WebSocket.
//!
//! ## Features
//!
//! - **Two run modes**: a bare LED blinker and a sensor mode that adds a
//!   500 ms analog poll on top of the LED heartbeat
//! - **Best-effort delivery**: readings are dropped, never queued, when no
//!   consumer is draining the channel
//! - **Live web chart**: a sliding window of recent samples rendered to SVG
//!   and streamed to clients via WebSocket
//! - **Pluggable hardware**: the serial adaptor sits behind narrow traits,
//!   with a mock implementation for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use luxstream::{Bot, BotConfig, FirmataConnector, Mode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BotConfig::new(Mode::Sensor);
//!     let mut bot = Bot::new(config, &FirmataConnector)?;
//!     let mut data = bot.take_data()?;
//!     bot.start()?;
//!
//!     while let Some(reading) = data.recv().await {
//!         println!("raw={:8.3} {}", reading.value, reading.time);
//!     }
//!     Ok(())
//! }
//! ```

use std::time::Duration;

pub mod bot;
pub mod console;
pub mod device;
pub mod error;
pub mod reading;
pub mod web;

// Re-export public API
pub use bot::{Bot, BotConfig, Mode};
pub use device::{
    firmata::FirmataConnector,
    traits::{AnalogPin, DeviceAdaptor, DigitalPin, PinLevel, SerialConnector},
};
pub use error::{BotError, Result};
pub use reading::Reading;
pub use web::{start_web_server, WebConfig};

/// The default serial device path.
pub const DEFAULT_DEVICE: &str = "/dev/ttyACM0";

/// The default serial baud rate.
pub const DEFAULT_BAUD: u32 = 57600;

/// The default web server listen address.
pub const DEFAULT_WEB_ADDR: &str = ":8080";

/// Digital pin driving the LED.
pub const LED_PIN: u8 = 13;

/// Analog channel the light sensor is wired to.
pub const SENSOR_CHANNEL: u8 = 1;

/// Interval between LED toggles.
pub const LED_INTERVAL: Duration = Duration::from_secs(1);

/// Interval between analog sensor polls.
pub const SENSOR_INTERVAL: Duration = Duration::from_millis(500);

/// Capacity of the web consumer's sliding sample window.
pub const WINDOW_CAPACITY: usize = 1024;
