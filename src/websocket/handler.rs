//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and runs one dashboard session per
//! connection. The session's filter selection lives in the receive task and
//! is dropped with the connection.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::ConnectionHub;
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::reactive::Runtime;
use crate::recompute::FilterSelection;

/// WebSocket upgrade handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.ws_hub);
    let runtime = Arc::clone(&state.runtime);
    ws.on_upgrade(move |socket| handle_socket(socket, hub, runtime))
}

fn encode(message: &ServerMessage) -> Option<Message> {
    match serde_json::to_string(message) {
        Ok(text) => Some(Message::Text(text)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            None
        }
    }
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, hub: Arc<ConnectionHub>, runtime: Arc<Runtime>) {
    let (mut sender, mut receiver) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connection_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Failed to register WebSocket connection");
            let error_msg = ServerMessage::Error {
                message: e.to_string(),
            };
            if let Some(msg) = encode(&error_msg) {
                let _ = sender.send(msg).await;
            }
            return;
        }
    };

    let connected_msg = ServerMessage::Connected {
        connection_id: connection_id.clone(),
    };
    let sent = match encode(&connected_msg) {
        Some(msg) => sender.send(msg).await.is_ok(),
        None => false,
    };
    if !sent {
        tracing::error!(connection_id = %connection_id, "Failed to send connected message");
        hub.unregister(&connection_id).await;
        return;
    }

    let conn_id_for_send = connection_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Some(frame) = encode(&msg) else {
                continue;
            };
            if sender.send(frame).await.is_err() {
                tracing::debug!(
                    connection_id = %conn_id_for_send,
                    "WebSocket send failed, closing connection"
                );
                break;
            }
        }
    });

    let hub_for_recv = Arc::clone(&hub);
    let conn_id_for_recv = connection_id.clone();

    // Task to receive control changes and answer with recomputed outputs
    let mut recv_task = tokio::spawn(async move {
        let mut session = Session::new(runtime);

        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !session
                        .handle_ws_message(&hub_for_recv, &conn_id_for_recv, msg)
                        .await
                    {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %conn_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    hub.unregister(&connection_id).await;
}

/// One page's view of the dashboard
struct Session {
    runtime: Arc<Runtime>,
    selection: FilterSelection,
}

impl Session {
    fn new(runtime: Arc<Runtime>) -> Self {
        let selection = runtime.initial_selection();
        Self { runtime, selection }
    }

    /// Handle a received WebSocket frame
    ///
    /// Returns false if the connection should be closed.
    async fn handle_ws_message(
        &mut self,
        hub: &ConnectionHub,
        connection_id: &str,
        message: Message,
    ) -> bool {
        match message {
            Message::Text(text) => {
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        let replies = self.handle_client_message(client_msg);
                        let _ = hub.send_all(connection_id, replies).await;
                    }
                    Err(e) => {
                        tracing::debug!(
                            connection_id = %connection_id,
                            error = %e,
                            text = %text,
                            "Invalid client message"
                        );
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = hub.send_to(connection_id, error_msg).await;
                    }
                }
                true
            }
            Message::Binary(_) => {
                let error_msg = ServerMessage::Error {
                    message: "Binary messages not supported".to_string(),
                };
                let _ = hub.send_to(connection_id, error_msg).await;
                true
            }
            Message::Ping(_) | Message::Pong(_) => true,
            Message::Close(_) => {
                tracing::debug!(connection_id = %connection_id, "Client requested close");
                false
            }
        }
    }

    /// Apply a parsed client message and produce the replies, in order
    fn handle_client_message(&mut self, message: ClientMessage) -> Vec<ServerMessage> {
        match message {
            ClientMessage::SetControl { control, value } => {
                match self.runtime.apply(&mut self.selection, control, value) {
                    Ok(updates) => updates.into_iter().map(ServerMessage::from).collect(),
                    Err(e) => {
                        tracing::debug!(control = %control, error = %e, "Rejected control change");
                        vec![ServerMessage::Error {
                            message: e.to_string(),
                        }]
                    }
                }
            }
            ClientMessage::Reset => {
                self.selection = self.runtime.initial_selection();
                self.runtime
                    .render_all(&self.selection)
                    .into_iter()
                    .map(ServerMessage::from)
                    .collect()
            }
            ClientMessage::Ping => vec![ServerMessage::Pong],
        }
    }
}
