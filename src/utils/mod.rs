//! The `utils` module provides the pieces shared across the `votetopic`
//! application: error types and logging setup.

pub mod error;
pub mod logging;
