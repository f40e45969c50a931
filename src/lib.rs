//! # VoteTopic
//!
//! `votetopic` keeps named topics in memory, lets clients upvote and downvote
//! them, and serves rankings of the most voted topics. Clients talk to it over
//! WebSockets using a small JSON protocol.
//!
//! ## Core Modules
//!
//! - `store`: the concurrent in-memory topic registry with vote counters and rankings.
//! - `transport`: the WebSocket server and the request/response protocol.
//! - `config`: loading settings from files and the environment.
//! - `utils`: error types and logging setup.

pub mod config;
pub mod store;
pub mod transport;
pub mod utils;
