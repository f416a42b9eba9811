//! Transport seam types for the connection pipeline.
//!
//! # Design
//! The core never touches a socket. `ServerClient` builds a
//! `ConnectionRequest` value describing one fully configured connection open
//! and hands it to an injected [`Transport`], which returns a single-use
//! [`Connection`] handle backed by whatever HTTP stack the host provides.
//! Network reachability is likewise injected through [`NetworkCheck`], since
//! how to answer "are we online?" is platform-specific.
//!
//! Keeping the request as plain data makes the core deterministic and lets
//! tests substitute an in-memory transport.

use std::fmt;
use std::time::Duration;

use crate::error::ClientError;

/// HTTP method for an outgoing connection.
///
/// `Put` and `Delete` are reserved: the client rejects them with
/// [`ClientError::UnsupportedMethod`] instead of opening anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One connection open described as plain data.
///
/// Built by `ServerClient` with the final URL (query already appended for
/// GET), the percent-encoded request-property pairs, and the per-method
/// configuration flags. A transport translates this into whatever its HTTP
/// stack needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRequest {
    /// Final URL, scheme-normalized, query string included where applicable.
    pub url: String,
    /// Method override, or `None` for a plain open with no method-specific
    /// setup (the cached-connection path).
    pub method: Option<Method>,
    /// Percent-encoded header name/value pairs. Empty when the client has no
    /// request properties configured.
    pub headers: Vec<(String, String)>,
    /// Connect-establishment timeout. `None` means the transport's own
    /// default applies (the plain-fetch path requests no override).
    pub connect_timeout: Option<Duration>,
    /// The connection must accept a request body after opening.
    pub expects_body: bool,
    /// Response caching may be enabled for this connection.
    pub use_caches: bool,
}

/// Network-availability check supplied by the embedding environment.
///
/// Invoked fresh before every network operation; the core never caches the
/// answer. When it reports `false`, request-issuing operations return
/// `Ok(None)` without touching the transport.
pub trait NetworkCheck {
    fn is_network_available(&self) -> bool;
}

/// Factory turning a [`ConnectionRequest`] into a live [`Connection`].
///
/// Implemented over the host's HTTP stack. The core calls `open` once per
/// round trip; connections are never pooled or reused.
pub trait Transport {
    type Conn: Connection;

    fn open(&self, request: &ConnectionRequest) -> Result<Self::Conn, ClientError>;
}

/// A single-use handle for one HTTP request/response exchange.
///
/// Dropping the handle closes it. The draining side of the client consumes
/// the handle by value, so a connection is closed on every path once a drain
/// has been attempted.
pub trait Connection {
    /// Write the request body. Only meaningful when the connection was
    /// opened with `expects_body` set.
    fn write_body(&mut self, body: &[u8]) -> Result<(), ClientError>;

    /// Read the next response line, without its terminator. Returns
    /// `Ok(None)` once the stream is exhausted.
    fn read_line(&mut self) -> Result<Option<String>, ClientError>;
}
