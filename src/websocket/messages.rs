//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between the
//! dashboard page and the server.

use crate::reactive::{ControlId, ControlValue, OutputId, OutputUpdate, OutputValue};
use serde::{Deserialize, Serialize};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A control on the page changed value
    SetControl {
        control: ControlId,
        value: ControlValue,
    },
    /// Return every control to its initial value
    Reset,
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// Replace one output slot's content
    Output {
        output: OutputId,
        value: OutputValue,
    },
    /// Pong response to ping
    Pong,
    /// Error message; the connection stays open
    Error {
        /// Error description
        message: String,
    },
}

impl From<OutputUpdate> for ServerMessage {
    fn from(update: OutputUpdate) -> Self {
        ServerMessage::Output {
            output: update.output,
            value: update.value,
        }
    }
}
