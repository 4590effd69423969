//! Serial-backed device adaptor speaking a minimal Firmata subset.
//!
//! Only the messages the bot needs are implemented: pin mode setup, digital
//! pin writes, and analog reporting. Everything else arriving on the wire is
//! skipped. The full protocol belongs to the board's firmware, not to this
//! crate.

use crate::device::traits::{AnalogPin, DeviceAdaptor, DigitalPin, PinLevel, SerialConnector};
use crate::error::{BotError, Result};
use serialport::SerialPort;
use std::io::{Read, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

const SET_PIN_MODE: u8 = 0xF4;
const SET_DIGITAL_PIN_VALUE: u8 = 0xF5;
const REPORT_ANALOG: u8 = 0xC0;
const ANALOG_MESSAGE: u8 = 0xE0;
const PIN_MODE_OUTPUT: u8 = 0x01;

/// Read timeout on the serial port. Polls must never stall a timer tick for
/// long when the board goes quiet.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

const ANALOG_CHANNELS: usize = 16;

/// Shared state for one open serial connection.
struct Connection {
    port: Box<dyn SerialPort>,
    /// Latest value seen per analog channel.
    analog: [Option<u16>; ANALOG_CHANNELS],
    /// Unparsed bytes carried over between reads.
    pending: Vec<u8>,
}

impl Connection {
    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        Ok(())
    }

    /// Drain whatever the board has sent and fold analog frames into
    /// `analog`.
    fn pump(&mut self) -> Result<()> {
        let available = self
            .port
            .bytes_to_read()
            .map_err(|e| BotError::device(format!("serial read failed: {e}")))?
            as usize;

        if available > 0 {
            let mut buf = vec![0u8; available];
            self.port.read_exact(&mut buf)?;
            self.pending.extend_from_slice(&buf);
        }

        fold_analog_frames(&mut self.pending, &mut self.analog);
        Ok(())
    }
}

/// Scan `pending` for analog messages, recording each channel's latest
/// value. Consumed and unrecognized bytes are removed; an incomplete frame
/// at the tail is kept for the next pump.
fn fold_analog_frames(pending: &mut Vec<u8>, analog: &mut [Option<u16>; ANALOG_CHANNELS]) {
    let mut i = 0;
    while i < pending.len() {
        let byte = pending[i];
        if byte & 0xF0 == ANALOG_MESSAGE {
            if i + 2 >= pending.len() {
                break; // incomplete frame, wait for more bytes
            }
            let lsb = pending[i + 1] as u16;
            let msb = pending[i + 2] as u16;
            if lsb < 0x80 && msb < 0x80 {
                let channel = (byte & 0x0F) as usize;
                analog[channel] = Some(lsb | (msb << 7));
                i += 3;
                continue;
            }
        }
        i += 1;
    }
    pending.drain(..i);
}

type SharedConnection = Arc<Mutex<Connection>>;

fn lock(conn: &SharedConnection) -> Result<std::sync::MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| BotError::device("serial connection poisoned"))
}

/// Firmata protocol adaptor over an open serial port.
pub struct FirmataAdaptor {
    conn: SharedConnection,
}

impl FirmataAdaptor {
    /// Open `device` at `baud` and wrap it.
    pub fn open(device: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(device, baud)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|e| BotError::port_open(device, e))?;

        debug!("opened serial port {:?} at {} baud", device, baud);

        Ok(Self {
            conn: Arc::new(Mutex::new(Connection {
                port,
                analog: [None; ANALOG_CHANNELS],
                pending: Vec::new(),
            })),
        })
    }
}

impl DeviceAdaptor for FirmataAdaptor {
    fn digital_pin(&mut self, pin: u8) -> Result<Box<dyn DigitalPin>> {
        lock(&self.conn)?.send(&[SET_PIN_MODE, pin, PIN_MODE_OUTPUT])?;
        Ok(Box::new(FirmataDigitalPin {
            pin,
            conn: Arc::clone(&self.conn),
        }))
    }

    fn analog_pin(&mut self, channel: u8) -> Result<Box<dyn AnalogPin>> {
        if channel as usize >= ANALOG_CHANNELS {
            return Err(BotError::config(format!(
                "analog channel out of range: {channel}"
            )));
        }
        lock(&self.conn)?.send(&[REPORT_ANALOG | (channel & 0x0F), 1])?;
        Ok(Box::new(FirmataAnalogPin {
            channel,
            conn: Arc::clone(&self.conn),
        }))
    }
}

struct FirmataDigitalPin {
    pin: u8,
    conn: SharedConnection,
}

impl DigitalPin for FirmataDigitalPin {
    fn write(&mut self, level: PinLevel) -> Result<()> {
        lock(&self.conn)?.send(&[SET_DIGITAL_PIN_VALUE, self.pin, level as u8])
    }
}

struct FirmataAnalogPin {
    channel: u8,
    conn: SharedConnection,
}

impl AnalogPin for FirmataAnalogPin {
    fn read(&mut self) -> Result<f64> {
        let mut conn = lock(&self.conn)?;
        conn.pump()?;
        conn.analog[self.channel as usize]
            .map(f64::from)
            .ok_or_else(|| {
                BotError::device(format!(
                    "no sample received yet on analog channel {}",
                    self.channel
                ))
            })
    }
}

/// [`SerialConnector`] producing [`FirmataAdaptor`]s. This is the connector
/// the binaries inject.
pub struct FirmataConnector;

impl SerialConnector for FirmataConnector {
    fn open(&self, device: &str, baud: u32) -> Result<Box<dyn DeviceAdaptor>> {
        Ok(Box::new(FirmataAdaptor::open(device, baud)?))
    }
}
