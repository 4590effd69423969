//! Error handling for the luxstream crate.

/// A specialized `Result` type for luxstream operations.
pub type Result<T> = std::result::Result<T, BotError>;

/// The main error type for luxstream operations.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The serial device could not be opened
    #[error("failed to open serial port {device:?}: {source}")]
    PortOpen {
        device: String,
        #[source]
        source: serialport::Error,
    },

    /// A device operation failed
    #[error("device error: {0}")]
    Device(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Web server error
    #[error("web server error: {0}")]
    WebServer(String),

    /// Chart rendering failed
    #[error("chart rendering error: {0}")]
    Render(String),
}

impl BotError {
    /// Create a new port-open error
    pub fn port_open(device: impl Into<String>, source: serialport::Error) -> Self {
        Self::PortOpen {
            device: device.into(),
            source,
        }
    }

    /// Create a new device error
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new web server error
    pub fn web_server(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Create a new chart rendering error
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}
