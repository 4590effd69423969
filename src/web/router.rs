//! Web application router and middleware setup.

use crate::web::{handlers, websocket, ChartPayload};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared state for the web handlers: the receiving end of the chart
/// channel, guarded so one client at a time drains it.
#[derive(Clone)]
pub struct AppState {
    pub charts: Arc<Mutex<mpsc::Receiver<ChartPayload>>>,
}

impl AppState {
    pub fn new(charts: mpsc::Receiver<ChartPayload>) -> Self {
        Self {
            charts: Arc::new(Mutex::new(charts)),
        }
    }
}

/// Create the axum application with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/data", get(websocket::data_handler))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app() {
        let (_tx, rx) = mpsc::channel(1);
        let _app = create_app(AppState::new(rx));
    }
}
