//! The `error` module defines the error types used within the `votetopic` application.
//!
//! Lookup misses are not errors at the store level: the store reports them as
//! `Option`/`bool` results and the request layer turns them into
//! [`RequestError::NotFound`].

use thiserror::Error;

/// Errors produced by the topic store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The entropy source could not produce a fresh identifier.
    #[error("failed to generate topic identifier: {0}")]
    IdentifierGeneration(String),
}

/// Errors produced while serving a single client request.
///
/// Each variant is reported back to the client as an `error` message; none of
/// them terminates the connection.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("topic name must not be empty")]
    EmptyName,

    #[error("topic name exceeds {max} characters")]
    NameTooLong { max: usize },

    #[error("invalid topic id")]
    InvalidId,

    #[error("topic not found")]
    NotFound,

    #[error("malformed request")]
    Malformed,

    #[error("internal error")]
    Internal(#[from] StoreError),
}

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
