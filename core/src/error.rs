//! Error types for the connection client.
//!
//! # Design
//! "No network" is deliberately *not* an error: operations return `Ok(None)`
//! for it, so `ClientError` only covers outcomes where a request was
//! actually attempted. Transport failures carry the underlying stack's
//! message as a string, keeping the seam free of concrete I/O error types.

use std::fmt;

use crate::transport::Method;

/// Errors returned by `ServerClient` operations.
#[derive(Debug)]
pub enum ClientError {
    /// The method is a reserved variant (PUT/DELETE) with no connection
    /// setup defined for it.
    UnsupportedMethod(Method),

    /// The underlying transport failed to connect, write, or read.
    Transport(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::UnsupportedMethod(method) => {
                write!(f, "method {method} is not supported")
            }
            ClientError::Transport(msg) => write!(f, "transport failure: {msg}"),
        }
    }
}

impl std::error::Error for ClientError {}
