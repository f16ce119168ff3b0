//! WebSocket Dashboard Sessions
//!
//! Stateful alternative to the `/api/v1/update` round-trip: the page sends
//! each control change and receives only the outputs that depend on it.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Tracks active connections and routes messages
//! - **Handler**: Handles WebSocket upgrade and runs the session
//! - **Messages**: Defines client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8050/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'set_control', control: 'rating_dropdown', value: ['E', 'T']}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'output') console.log(msg.output, msg.value);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};
