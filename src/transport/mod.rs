//! The `transport` module is responsible for handling network communication
//! with clients via WebSockets.
//!
//! It defines the JSON protocol spoken between clients and the server,
//! validates requests, and forwards them to the topic store.

pub mod handler;
pub mod message;
pub mod websocket;

#[cfg(test)]
mod tests;
