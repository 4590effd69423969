//! The bot runtime: device wiring, timer tasks, and the outbound channel.

use crate::device::traits::{AnalogPin, DeviceAdaptor, DigitalPin, PinLevel, SerialConnector};
use crate::error::{BotError, Result};
use crate::reading::Reading;
use crate::{DEFAULT_BAUD, DEFAULT_DEVICE, LED_INTERVAL, LED_PIN, SENSOR_CHANNEL, SENSOR_INTERVAL};
use std::fmt;
use std::str::FromStr;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{info, warn};

/// Which behavior the bot wires up. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Toggle the LED on a fixed interval; no sensor wiring.
    Led,
    /// LED heartbeat plus the analog sensor poll.
    Sensor,
}

impl FromStr for Mode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "led" => Ok(Mode::Led),
            "sensor" => Ok(Mode::Sensor),
            other => Err(BotError::config(format!(
                "invalid mode (got={other:?}, want=\"led\"|\"sensor\")"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Led => write!(f, "led"),
            Mode::Sensor => write!(f, "sensor"),
        }
    }
}

/// Bot construction parameters.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Run mode
    pub mode: Mode,
    /// Serial device path; empty means the platform default
    pub device: String,
    /// Baud rate; zero means the default (57600)
    pub baud: u32,
}

impl BotConfig {
    /// A config for `mode` with device and baud left to their defaults.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            device: String::new(),
            baud: 0,
        }
    }

    /// Set the serial device path.
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Set the baud rate.
    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    /// Apply the defaulting rules: empty device becomes
    /// [`DEFAULT_DEVICE`], zero baud becomes [`DEFAULT_BAUD`].
    pub fn resolve(mut self) -> Self {
        if self.device.is_empty() {
            self.device = DEFAULT_DEVICE.to_string();
        }
        if self.baud == 0 {
            self.baud = DEFAULT_BAUD;
        }
        self
    }
}

/// A managed unit composing the LED and sensor drivers over one serial
/// connection.
///
/// Sensor readings are offered to the outbound channel with a non-blocking
/// send: when no consumer is draining, a reading is dropped, never queued.
pub struct Bot {
    mode: Mode,
    adaptor: Box<dyn DeviceAdaptor>,
    led: Option<Box<dyn DigitalPin>>,
    sensor: Option<Box<dyn AnalogPin>>,
    data_tx: mpsc::Sender<Reading>,
    data_rx: Option<mpsc::Receiver<Reading>>,
    tasks: Vec<JoinHandle<()>>,
}

impl fmt::Debug for Bot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bot")
            .field("mode", &self.mode)
            .field("led", &self.led.is_some())
            .field("sensor", &self.sensor.is_some())
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

impl Bot {
    /// Open the configured serial device through `connector` and wire up
    /// the pins for `config.mode`.
    pub fn new(config: BotConfig, connector: &dyn SerialConnector) -> Result<Self> {
        let config = config.resolve();
        info!("device: {:?} baud: {}", config.device, config.baud);
        let adaptor = connector.open(&config.device, config.baud)?;
        Self::with_adaptor(config.mode, adaptor)
    }

    /// Wire up pins on an already-open adaptor. This is the injection seam
    /// tests use with a mock adaptor.
    pub fn with_adaptor(mode: Mode, mut adaptor: Box<dyn DeviceAdaptor>) -> Result<Self> {
        let led = Some(adaptor.digital_pin(LED_PIN)?);
        let sensor = match mode {
            Mode::Sensor => Some(adaptor.analog_pin(SENSOR_CHANNEL)?),
            Mode::Led => None,
        };
        let (data_tx, data_rx) = mpsc::channel(1);
        Ok(Self {
            mode,
            adaptor,
            led,
            sensor,
            data_tx,
            data_rx: Some(data_rx),
            tasks: Vec::new(),
        })
    }

    /// The bot's run mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Take the receiving end of the outbound reading channel. Can only be
    /// taken once.
    pub fn take_data(&mut self) -> Result<mpsc::Receiver<Reading>> {
        self.data_rx
            .take()
            .ok_or_else(|| BotError::config("data channel already taken"))
    }

    /// Start the adaptor and spawn the timer tasks.
    ///
    /// The first error reported by the device layer is surfaced; spawning
    /// itself cannot fail.
    pub fn start(&mut self) -> Result<()> {
        self.adaptor.start()?;

        if let Some(mut led) = self.led.take() {
            self.tasks.push(tokio::spawn(async move {
                let mut ticker = time::interval(LED_INTERVAL);
                let mut level = PinLevel::Low;
                loop {
                    ticker.tick().await;
                    level = level.toggled();
                    if let Err(e) = led.write(level) {
                        warn!("error toggling led: {}", e);
                    }
                }
            }));
        }

        if let Some(mut sensor) = self.sensor.take() {
            let tx = self.data_tx.clone();
            self.tasks.push(tokio::spawn(async move {
                let mut ticker = time::interval(SENSOR_INTERVAL);
                let mut last = None;
                loop {
                    ticker.tick().await;
                    match sensor.read() {
                        Ok(value) => {
                            if last != Some(value) {
                                last = Some(value);
                                // Best-effort handoff: drop the reading when
                                // nobody is draining the channel.
                                let _ = tx.try_send(Reading::now(value));
                            }
                        }
                        // Sensor errors never stop the runtime.
                        Err(e) => warn!("sensor error: {}", e),
                    }
                }
            }));
        }

        Ok(())
    }

    /// Stop the timer tasks and the adaptor. Best-effort: in-flight timer
    /// callbacks are not guaranteed to have quiesced on return. The first
    /// device error is surfaced.
    pub fn stop(&mut self) -> Result<()> {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.adaptor.stop()
    }
}
