//! luxstream - console consumer binary.
//!
//! Streams light-sensor readings from the serial device and prints each one
//! to stdout.

use clap::Parser;
use luxstream::{console, Bot, BotConfig, FirmataConnector, Mode, DEFAULT_BAUD, DEFAULT_DEVICE};
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "luxstream")]
#[command(about = "Stream analog light-sensor readings to the console")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Bot mode
    #[arg(long, value_enum, default_value_t = Mode::Led)]
    mode: Mode,

    /// Serial device path
    #[arg(long, default_value = DEFAULT_DEVICE)]
    device: String,

    /// Baud rate
    #[arg(long, default_value_t = DEFAULT_BAUD)]
    baud: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = BotConfig::new(cli.mode)
        .with_device(cli.device)
        .with_baud(cli.baud);

    let mut bot = match Bot::new(config, &FirmataConnector) {
        Ok(bot) => bot,
        Err(e) => {
            error!("error creating bot: {}", e);
            std::process::exit(1);
        }
    };

    let data = match bot.take_data() {
        Ok(data) => data,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    tokio::spawn(console::run(data));

    if let Err(e) = bot.start() {
        error!("error starting bot: {}", e);
        std::process::exit(1);
    }

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    if let Err(e) = bot.stop() {
        error!("error stopping bot: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::TRACE
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["luxstream"]).unwrap();
        assert_eq!(cli.mode, Mode::Led);
        assert_eq!(cli.device, DEFAULT_DEVICE);
        assert_eq!(cli.baud, DEFAULT_BAUD);
    }

    #[test]
    fn test_cli_sensor_mode() {
        let cli = Cli::try_parse_from(["luxstream", "--mode", "sensor", "--baud", "9600"]).unwrap();
        assert_eq!(cli.mode, Mode::Sensor);
        assert_eq!(cli.baud, 9600);
    }

    #[test]
    fn test_cli_rejects_invalid_mode() {
        // an unknown mode dies at parse time, before any device I/O
        assert!(Cli::try_parse_from(["luxstream", "--mode", "blink"]).is_err());
    }
}
