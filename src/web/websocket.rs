//! WebSocket handler streaming rendered charts to browser clients.

use crate::web::router::AppState;
use crate::web::ChartPayload;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use tracing::{error, info, warn};
use uuid::Uuid;

/// WebSocket upgrade handler for `/data`.
pub async fn data_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drain the shared chart channel into one client connection.
///
/// The channel receiver lives behind a mutex in app state: whichever client
/// holds the lock gets the payloads. A send failure ends this client's loop
/// and releases the channel for the next one.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();
    info!("websocket client connected: {}", client_id);

    let mut charts = state.charts.lock().await;
    while let Some(payload) = charts.recv().await {
        match serde_json::to_string(&payload) {
            Ok(json) => {
                if let Err(e) = socket.send(Message::Text(json)).await {
                    warn!("error sending data to client {}: {}", client_id, e);
                    break;
                }
            }
            Err(e) => {
                error!("failed to serialize chart payload: {}", e);
            }
        }
    }

    info!("websocket client disconnected: {}", client_id);
}
