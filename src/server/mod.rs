pub mod protocol;
pub mod state_stream;

use crate::config::Config;
use crate::simulation::SimulationState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State as AxumState, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use protocol::{ClientMessage, ServerMessage};
use state_stream::StateStream;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration};
use tower_http::services::ServeDir;

#[derive(Clone)]
struct AppState {
    stream: StateStream,
    config: Config,
}

/// Serves the spectator WebSocket on `/ws` and a renderer from `./static`.
pub async fn run_server(
    config: Config,
    state: Arc<RwLock<SimulationState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.server.address, config.server.port);
    let app_state = AppState {
        stream: StateStream::new(state),
        config,
    };

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .nest_service("/", ServeDir::new("static"))
        .with_state(app_state);

    log::info!("HTTP server with WebSocket listening on: {}", addr);
    log::info!("Static files served from: ./static/");
    log::info!("WebSocket endpoint: ws://{}/ws", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    AxumState(state): AxumState<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_websocket(socket, state))
}

async fn handle_websocket(socket: WebSocket, app_state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let rate = app_state.config.server.update_rate_hz.max(1);
    let mut update_interval = interval(Duration::from_millis(1000 / rate));

    loop {
        let reply = tokio::select! {
            _ = update_interval.tick() => app_state.stream.update().await,

            Some(msg) = receiver.next() => match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(request) => app_state.stream.respond(request).await,
                    Err(e) => ServerMessage::error(format!("bad request: {}", e)),
                },
                Ok(Message::Close(_)) => {
                    log::info!("Client requested close");
                    break;
                }
                Err(e) => {
                    log::error!("WebSocket error: {}", e);
                    break;
                }
                _ => continue,
            },

            else => break,
        };

        match serde_json::to_string(&reply) {
            Ok(json) => {
                if sender.send(Message::Text(json)).await.is_err() {
                    log::info!("Client disconnected");
                    break;
                }
            }
            Err(e) => log::error!("Failed to encode reply: {}", e),
        }
    }

    log::info!("WebSocket connection closed");
}
