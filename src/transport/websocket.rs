//! WebSocket transport
//!
//! Accepts TCP/WebSocket connections and answers every JSON request frame with
//! exactly one JSON reply frame. Each connection runs on its own task and
//! writes its reply before reading the next request, so a slow reader is
//! throttled by its own socket. No store lock is held across a socket write.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio_tungstenite::accept_async;
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::config::{Settings, TopicSettings};
use crate::store::TopicStore;
use crate::transport::handler::handle_text;
use crate::utils::error::ServerError;

/// Binds to the configured address and serves until the listener fails.
pub async fn start_websocket_server(
    settings: Settings,
    store: Arc<TopicStore>,
) -> Result<(), ServerError> {
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("WebSocket server listening on ws://{}", listener.local_addr()?);

    serve(listener, store, settings.topics).await
}

/// Serves connections from an already bound listener.
pub async fn serve(
    listener: TcpListener,
    store: Arc<TopicStore>,
    limits: TopicSettings,
) -> Result<(), ServerError> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                // per-connection failures (e.g. fd exhaustion) should not stop the server
                warn!("Failed to accept connection: {}", e);
                continue;
            }
        };

        let store = store.clone();
        let limits = limits.clone();
        spawn(async move {
            handle_connection(stream, peer, store, limits).await;
        });
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    store: Arc<TopicStore>,
    limits: TopicSettings,
) {
    let mut ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake error from {}: {}", peer, e);
            return;
        }
    };

    debug!("{} connected", peer);

    while let Some(frame) = ws_stream.next().await {
        let msg = match frame {
            Ok(msg) => msg,
            Err(e) => {
                debug!("Connection error from {}: {}", peer, e);
                break;
            }
        };

        match msg {
            WsMessage::Text(text) => {
                let reply = handle_text(&store, &limits, text.as_str());
                let json = match serde_json::to_string(&reply) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize reply: {}", e);
                        continue;
                    }
                };
                // the next frame is only read once this reply is written, so a
                // client that stops reading stops being served
                if let Err(e) = ws_stream.send(WsMessage::text(json)).await {
                    warn!("Failed to send reply to {}: {}", peer, e);
                    break;
                }
            }
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    let _ = ws_stream.close(None).await;

    debug!("{} disconnected", peer);
}
