//! WebSocket server implementation.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::config::{EVICTION_INTERVAL, ServerConfig};
use crate::engine::SessionRegistry;
use crate::error::QuizError;
use crate::protocol::{ErrorKind, ServerMessage};

use super::connection::Connection;

/// Run the quiz server until interrupted.
pub async fn run(config: ServerConfig) -> Result<(), QuizError> {
    config.validate()?;

    let deck = config.build_deck()?;
    let composition = deck.composition();
    info!(questions = deck.len(), shuffle = ?config.shuffle, "loaded deck");
    for (category, count) in &composition.by_category {
        debug!(category = category.label(), count, "deck composition");
    }
    for (difficulty, count) in &composition.by_difficulty {
        debug!(difficulty = difficulty.label(), count, "deck composition");
    }

    let registry = Arc::new(SessionRegistry::new(
        Arc::new(deck),
        config.shuffle,
        config.session_ttl,
    ));

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "server listening");

    serve(listener, registry).await
}

/// Accept connections on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, registry: Arc<SessionRegistry>) -> Result<(), QuizError> {
    let evictor = tokio::spawn(evict_idle_sessions(Arc::clone(&registry)));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, addr)) => {
                    let registry = Arc::clone(&registry);
                    tokio::spawn(handle_connection(stream, addr, registry));
                }
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                }
            },
            _ = &mut shutdown => {
                info!("shutting down");
                break;
            }
        }
    }

    evictor.abort();
    Ok(())
}

async fn evict_idle_sessions(registry: Arc<SessionRegistry>) {
    let mut ticker = tokio::time::interval(EVICTION_INTERVAL);
    loop {
        ticker.tick().await;
        let evicted = registry.evict_idle(Instant::now());
        if evicted > 0 {
            info!(evicted, active = registry.len(), "evicted idle sessions");
        }
    }
}

/// Serve one WebSocket client: one reply per request, in order.
async fn handle_connection(stream: TcpStream, addr: SocketAddr, registry: Arc<SessionRegistry>) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!(peer = %addr, error = %e, "websocket handshake failed");
            return;
        }
    };
    debug!(peer = %addr, "connection opened");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let mut connection = Connection::new(registry);

    while let Some(msg) = ws_receiver.next().await {
        let reply = match msg {
            Ok(Message::Text(text)) => connection.handle_text(&text),
            Ok(Message::Binary(_)) => {
                ServerMessage::error(ErrorKind::BadRequest, "expected a text frame")
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => continue,
            Err(e) => {
                debug!(peer = %addr, error = %e, "connection error");
                break;
            }
        };

        let json = match serde_json::to_string(&reply) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to encode reply");
                break;
            }
        };

        if ws_sender.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }

    // The session outlives the socket so the player can resume it.
    debug!(peer = %addr, session = ?connection.session_id(), "connection closed");
}
