pub mod events;
pub mod registry;
pub mod session;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{Sink, SinkExt, StreamExt};
use std::sync::Arc;

use crate::error::RegistryError;
use crate::state::AppState;
use registry::Registry;
use session::Occupant;

pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.registry))
}

/// Drive one client from upgrade to close: seat it in a room, relay what it
/// sends, and unseat it once the socket stops yielding messages.
pub async fn handle_socket(socket: WebSocket, registry: Arc<Registry>) {
    let (mut ws_sink, mut ws_stream) = socket.split();

    let (occupant, mut rx) = Occupant::new();
    let connection_id = occupant.connection_id;
    let tag = occupant.tag.clone();
    tracing::info!(%connection_id, %tag, "websocket connection established");

    let room_id = match registry.join(occupant) {
        Ok((room_id, count)) => {
            tracing::info!(%connection_id, room_id = %room_id, count, "joined room");
            room_id
        }
        Err(e) => {
            match &e {
                RegistryError::RoomFull { room_id } => {
                    tracing::info!(%connection_id, room_id = %room_id, "room full, turning client away");
                }
                RegistryError::CapacityExceeded { .. } => {
                    tracing::error!(%connection_id, room_id = e.room_id(), "join dropped: {e}");
                }
            }
            reject(&mut ws_sink).await;
            return;
        }
    };

    loop {
        tokio::select! {
            // Lines pushed by the registry for this client
            Some(line) = rx.recv() => {
                if let Err(e) = ws_sink.send(Message::Text(line.into())).await {
                    tracing::debug!(%connection_id, "write failed: {e}");
                    break;
                }
            }
            // Incoming messages
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        relay(&registry, &room_id, &tag, text.as_str());
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        relay(&registry, &room_id, &tag, &String::from_utf8_lossy(&bytes));
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        tracing::debug!(%connection_id, "read failed: {e}");
                        break;
                    }
                    // Pings are answered by axum itself
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    let remaining = registry.remove_occupant(&room_id, connection_id);
    tracing::info!(%connection_id, room_id = %room_id, ?remaining, "connection closed");
    let _ = ws_sink.close().await;
}

/// Tell a client it could not be seated, then close. Best effort: the
/// client may already be gone.
async fn reject<S>(sink: &mut S)
where
    S: Sink<Message> + Unpin,
{
    let _ = sink
        .send(Message::Text(events::ROOM_FULL_NOTICE.into()))
        .await;
    let _ = sink.close().await;
}

/// Hand one inbound message to the registry. Payloads stay out of the logs.
fn relay(registry: &Registry, room_id: &str, tag: &str, payload: &str) {
    let delivered = registry.broadcast(room_id, tag, payload);
    tracing::trace!(room_id, tag, len = payload.len(), delivered, "relayed message");
}
