//! The `transport` module handles network communication with clients over
//! WebSockets: it defines the JSON protocol and the server that maps
//! protocol messages onto feed and broadcaster operations.

pub mod message;
pub mod websocket;

pub use message::{ClientMessage, ServerMessage};
pub use websocket::start_websocket_server;

#[cfg(test)]
mod tests;
