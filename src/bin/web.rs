//! luxstream-web - web plotting binary.
//!
//! Streams light-sensor readings into a live SVG chart served over a
//! WebSocket at `/data`, with a static plot page at `/`.

use clap::Parser;
use luxstream::{
    start_web_server, Bot, BotConfig, FirmataConnector, Mode, WebConfig, DEFAULT_BAUD,
    DEFAULT_DEVICE, DEFAULT_WEB_ADDR,
};
use tracing::{error, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "luxstream-web")]
#[command(about = "Stream analog light-sensor readings to a live web chart")]
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

    /// address:port of the web server
    #[arg(long, default_value = DEFAULT_WEB_ADDR)]
    addr: String,

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

    let web_config = match WebConfig::from_addr(&cli.addr) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

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

    if let Err(e) = bot.start() {
        error!("error starting bot: {}", e);
        std::process::exit(1);
    }

    let result = start_web_server(web_config, data).await;
    let _ = bot.stop();
    if let Err(e) = result {
        error!("{}", e);
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
        let cli = Cli::try_parse_from(["luxstream-web"]).unwrap();
        assert_eq!(cli.mode, Mode::Led);
        assert_eq!(cli.addr, DEFAULT_WEB_ADDR);
    }

    #[test]
    fn test_cli_custom_addr() {
        let cli = Cli::try_parse_from(["luxstream-web", "--addr", "0.0.0.0:9090"]).unwrap();
        assert_eq!(cli.addr, "0.0.0.0:9090");
    }
}
