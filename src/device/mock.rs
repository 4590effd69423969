//! Scripted mock devices for tests.
//!
//! [`MockAdaptor`] hands out pins backed by shared in-memory state: analog
//! reads pop scripted values and digital writes are recorded for later
//! inspection.

use crate::device::traits::{AnalogPin, DeviceAdaptor, DigitalPin, PinLevel, SerialConnector};
use crate::error::{BotError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockState {
    values: VecDeque<f64>,
    last_value: Option<f64>,
    writes: Vec<(u8, PinLevel)>,
    started: bool,
    stopped: bool,
}

/// A device adaptor backed by scripted values instead of hardware.
#[derive(Clone, Default)]
pub struct MockAdaptor {
    state: Arc<Mutex<MockState>>,
}

impl MockAdaptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose analog pin will report the given values in order. Once
    /// exhausted, the pin keeps reporting the last value (so no further
    /// change events fire).
    pub fn with_values(values: impl IntoIterator<Item = f64>) -> Self {
        let adaptor = Self::new();
        {
            let mut state = adaptor.state.lock().unwrap();
            state.values = values.into_iter().collect();
        }
        adaptor
    }

    /// Queue another analog value.
    pub fn push_value(&self, value: f64) {
        self.state.lock().unwrap().values.push_back(value);
    }

    /// All digital writes observed so far, as (pin, level) pairs.
    pub fn digital_writes(&self) -> Vec<(u8, PinLevel)> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn is_started(&self) -> bool {
        self.state.lock().unwrap().started
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().unwrap().stopped
    }
}

impl DeviceAdaptor for MockAdaptor {
    fn digital_pin(&mut self, pin: u8) -> Result<Box<dyn DigitalPin>> {
        Ok(Box::new(MockDigitalPin {
            pin,
            state: Arc::clone(&self.state),
        }))
    }

    fn analog_pin(&mut self, _channel: u8) -> Result<Box<dyn AnalogPin>> {
        Ok(Box::new(MockAnalogPin {
            state: Arc::clone(&self.state),
        }))
    }

    fn start(&mut self) -> Result<()> {
        self.state.lock().unwrap().started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.state.lock().unwrap().stopped = true;
        Ok(())
    }
}

struct MockDigitalPin {
    pin: u8,
    state: Arc<Mutex<MockState>>,
}

impl DigitalPin for MockDigitalPin {
    fn write(&mut self, level: PinLevel) -> Result<()> {
        self.state.lock().unwrap().writes.push((self.pin, level));
        Ok(())
    }
}

struct MockAnalogPin {
    state: Arc<Mutex<MockState>>,
}

impl AnalogPin for MockAnalogPin {
    fn read(&mut self) -> Result<f64> {
        let mut state = self.state.lock().unwrap();
        if let Some(value) = state.values.pop_front() {
            state.last_value = Some(value);
            return Ok(value);
        }
        state
            .last_value
            .ok_or_else(|| BotError::device("no scripted sample available"))
    }
}

/// A [`SerialConnector`] that records open calls and hands out a
/// [`MockAdaptor`], or fails the way a missing serial device would.
#[derive(Clone, Default)]
pub struct MockConnector {
    fail: bool,
    adaptor: MockAdaptor,
    opened: Arc<Mutex<Option<(String, u32)>>>,
}

impl MockConnector {
    /// A connector that opens the given adaptor.
    pub fn new(adaptor: MockAdaptor) -> Self {
        Self {
            fail: false,
            adaptor,
            opened: Arc::new(Mutex::new(None)),
        }
    }

    /// A connector whose open always fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// The (device, baud) pair of the last successful open, if any.
    pub fn opened_with(&self) -> Option<(String, u32)> {
        self.opened.lock().unwrap().clone()
    }
}

impl SerialConnector for MockConnector {
    fn open(&self, device: &str, baud: u32) -> Result<Box<dyn DeviceAdaptor>> {
        if self.fail {
            return Err(BotError::port_open(
                device,
                serialport::Error::new(serialport::ErrorKind::NoDevice, "mock open failure"),
            ));
        }
        *self.opened.lock().unwrap() = Some((device.to_string(), baud));
        Ok(Box::new(self.adaptor.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_values_in_order() {
        let mut adaptor = MockAdaptor::with_values([10.0, 20.0]);
        let mut pin = adaptor.analog_pin(1).unwrap();
        assert_eq!(pin.read().unwrap(), 10.0);
        assert_eq!(pin.read().unwrap(), 20.0);
        // exhausted: keeps reporting the last value
        assert_eq!(pin.read().unwrap(), 20.0);
    }

    #[test]
    fn test_empty_script_errors() {
        let mut adaptor = MockAdaptor::new();
        let mut pin = adaptor.analog_pin(1).unwrap();
        assert!(pin.read().is_err());
    }

    #[test]
    fn test_digital_writes_recorded() {
        let mut adaptor = MockAdaptor::new();
        let mut pin = adaptor.digital_pin(13).unwrap();
        pin.write(PinLevel::High).unwrap();
        pin.write(PinLevel::Low).unwrap();
        assert_eq!(
            adaptor.digital_writes(),
            vec![(13, PinLevel::High), (13, PinLevel::Low)]
        );
    }

    #[test]
    fn test_failing_connector() {
        let connector = MockConnector::failing();
        assert!(connector.open("/dev/ttyACM0", 57600).is_err());
    }
}
