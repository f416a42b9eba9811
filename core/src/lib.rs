//! Synchronous HTTP connection client for talking to a remote server.
//!
//! # Overview
//! Given a base endpoint and optional query parameters, `ServerClient`
//! assembles the final URL, percent-encodes the query string, opens a
//! per-method configured connection through an injected [`Transport`], and
//! drains the textual response. Network reachability is an injected
//! capability ([`NetworkCheck`]); when it reports offline, operations return
//! `Ok(None)` instead of attempting the network.
//!
//! # Design
//! - The core owns no sockets: a connection open is described as a plain
//!   [`ConnectionRequest`] value and executed by the host-supplied
//!   transport, so the pipeline stays deterministic and testable.
//! - A [`Connection`] is single-use; draining consumes it, which guarantees
//!   it is closed on every path.
//! - Configuration (request properties, connect timeout) is set up front via
//!   `&mut self` and only read during calls.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{build_query, ServerClient, DEFAULT_CONNECT_TIMEOUT};
pub use error::ClientError;
pub use transport::{Connection, ConnectionRequest, Method, NetworkCheck, Transport};
