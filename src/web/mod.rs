//! Web consumer: sliding sample window, SVG chart rendering, and the
//! WebSocket push transport.

pub mod chart;
pub mod config;
pub mod handlers;
pub mod router;
pub mod websocket;
pub mod window;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::{create_app, AppState};
pub use window::SlidingWindow;

use crate::error::{BotError, Result};
use crate::reading::Reading;
use crate::WINDOW_CAPACITY;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};

/// A rendered chart, JSON-encoded for WebSocket clients as
/// `{ "plot": "<svg ...>" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPayload {
    /// SVG markup of the current chart
    pub plot: String,
}

/// Start the web server: spawns the chart pipeline over `readings` and
/// serves the plot page plus the `/data` WebSocket until the listener
/// fails.
pub async fn start_web_server(config: WebConfig, readings: mpsc::Receiver<Reading>) -> Result<()> {
    let (chart_tx, chart_rx) = mpsc::channel(1);
    let state = AppState::new(chart_rx);
    let app = create_app(state);

    let _chart_task = tokio::spawn(run_chart_pipeline(readings, chart_tx));

    let addr = config.bind_address();
    info!("please connect to: http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BotError::web_server(format!("failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| BotError::web_server(format!("server error: {e}")))?;

    Ok(())
}

/// Fold readings into the sliding window, render a chart per reading, and
/// publish it on the single-slot chart channel.
///
/// The channel holds one payload; once that slot is full the send blocks
/// until the WebSocket handler drains it, so chart production runs at most
/// one payload ahead of the client. A failed render is fatal: a malformed
/// chart state is unrecoverable here.
pub async fn run_chart_pipeline(
    readings: mpsc::Receiver<Reading>,
    charts: mpsc::Sender<ChartPayload>,
) {
    let mut readings = ReceiverStream::new(readings);
    let mut window = SlidingWindow::new(WINDOW_CAPACITY);

    while let Some(reading) = readings.next().await {
        window.push(reading.unix_seconds(), reading.value);
        let svg = match chart::render(window.points()) {
            Ok(svg) => svg,
            Err(e) => {
                error!("error rendering chart: {}", e);
                std::process::exit(1);
            }
        };
        if charts.send(ChartPayload { plot: svg }).await.is_err() {
            // handler side is gone; nothing left to publish to
            break;
        }
    }
}
