//! Connection client: URL assembly, query encoding, per-method
//! configuration, and response draining.
//!
//! # Design
//! `ServerClient` owns the long-lived configuration (base URL, request
//! properties, connect timeout) and two injected capabilities: a
//! [`Transport`] that opens connections over the host's HTTP stack and a
//! [`NetworkCheck`] that answers whether the network is reachable at all.
//! Every operation that would touch the network consults the check first and
//! returns `Ok(None)` when offline — a sentinel, not an error.
//!
//! # Error policy per path
//! The original design swallows failures on exactly one path, and that
//! asymmetry is preserved here on purpose:
//!
//! | path                        | transport failure        |
//! |-----------------------------|--------------------------|
//! | connection open (any method)| propagates               |
//! | POST body write             | logged via `log::warn!`, swallowed |
//! | response draining           | propagates               |
//! | plain `fetch`               | propagates               |

use std::collections::BTreeMap;
use std::time::Duration;

use log::warn;

use crate::error::ClientError;
use crate::transport::{Connection, ConnectionRequest, Method, NetworkCheck, Transport};

/// Default connect-establishment timeout (2.5 s).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(2500);

/// Build a percent-encoded query string from a parameter mapping.
///
/// `None` in, `None` out: "no query at all" stays distinct from an empty
/// mapping, which yields `Some("")`. Keys and values are encoded
/// independently as UTF-8 and joined as `key=value` pairs with `&`, in the
/// mapping's iteration order, no trailing separator. Encoding valid UTF-8
/// cannot fail, so this is infallible.
pub fn build_query(params: Option<&BTreeMap<String, String>>) -> Option<String> {
    let params = params?;
    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    Some(query)
}

/// Synchronous, blocking client for one remote HTTP endpoint.
///
/// Configuration is set up front through `&mut self` setters and read on
/// every connection open; the borrow checker enforces the
/// configure-before-use discipline during concurrent use.
#[derive(Debug)]
pub struct ServerClient<T, N> {
    base_url: String,
    request_properties: BTreeMap<String, String>,
    connect_timeout: Duration,
    transport: T,
    network: N,
}

impl<T, N> ServerClient<T, N>
where
    T: Transport,
    N: NetworkCheck,
{
    pub fn new(base_url: &str, transport: T, network: N) -> Self {
        Self {
            base_url: base_url.to_string(),
            request_properties: BTreeMap::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            transport,
            network,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add a header attached to every subsequently opened connection. Both
    /// name and value are percent-encoded at attachment time.
    pub fn set_request_property(&mut self, name: &str, value: &str) {
        self.request_properties.insert(name.to_string(), value.to_string());
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Change the connect timeout. Applies at connection-open time only;
    /// there is no read timeout.
    pub fn set_connect_timeout(&mut self, timeout: Duration) {
        self.connect_timeout = timeout;
    }

    /// Open a GET connection to the base URL with no query string.
    pub fn open_connection(&self) -> Result<Option<T::Conn>, ClientError> {
        self.open_connection_to(Method::Get, &self.base_url, None)
    }

    /// Open a GET connection to the base URL with the given parameters.
    pub fn open_connection_with(
        &self,
        params: &BTreeMap<String, String>,
    ) -> Result<Option<T::Conn>, ClientError> {
        let query = build_query(Some(params));
        self.open_connection_to(Method::Get, &self.base_url, query.as_deref())
    }

    /// Open a connection to the base URL with the given method and optional
    /// parameters.
    pub fn open_connection_for(
        &self,
        method: Method,
        params: Option<&BTreeMap<String, String>>,
    ) -> Result<Option<T::Conn>, ClientError> {
        let query = build_query(params);
        self.open_connection_to(method, &self.base_url, query.as_deref())
    }

    /// Open a configured connection: the full dispatch.
    ///
    /// Returns `Ok(None)` without touching the transport when the network
    /// check reports offline. The URL is scheme-normalized first. GET gets
    /// the query appended after `?`; POST sends the query as the request
    /// body, and a failed body write is logged and swallowed — the
    /// connection is still returned. PUT and DELETE are reserved and
    /// rejected with [`ClientError::UnsupportedMethod`].
    pub fn open_connection_to(
        &self,
        method: Method,
        url: &str,
        query: Option<&str>,
    ) -> Result<Option<T::Conn>, ClientError> {
        if !self.network.is_network_available() {
            return Ok(None);
        }

        let url = normalize_url(url);
        match method {
            Method::Get => {
                let request = ConnectionRequest {
                    url: format!("{url}?{}", query.unwrap_or("")),
                    method: Some(Method::Get),
                    headers: self.encoded_properties(),
                    connect_timeout: Some(self.connect_timeout),
                    expects_body: false,
                    use_caches: false,
                };
                Ok(Some(self.transport.open(&request)?))
            }
            Method::Post => {
                let request = ConnectionRequest {
                    url,
                    method: Some(Method::Post),
                    headers: self.encoded_properties(),
                    connect_timeout: Some(self.connect_timeout),
                    expects_body: true,
                    use_caches: false,
                };
                let mut conn = self.transport.open(&request)?;
                // Deliberately swallowed: callers must be prepared for a
                // connection whose body write failed.
                if let Err(err) = conn.write_body(query.unwrap_or("").as_bytes()) {
                    warn!("request body write failed: {err}");
                }
                Ok(Some(conn))
            }
            Method::Put | Method::Delete => Err(ClientError::UnsupportedMethod(method)),
        }
    }

    /// Open a connection with no method-specific setup: unmodified URL,
    /// response caching enabled, request properties and connect timeout
    /// applied, no query and no body.
    pub fn open_raw_connection(&self, url: &str) -> Result<Option<T::Conn>, ClientError> {
        if !self.network.is_network_available() {
            return Ok(None);
        }

        let request = ConnectionRequest {
            url: normalize_url(url),
            method: None,
            headers: self.encoded_properties(),
            connect_timeout: Some(self.connect_timeout),
            expects_body: false,
            use_caches: true,
        };
        Ok(Some(self.transport.open(&request)?))
    }

    /// Drain a connection's response into a string.
    ///
    /// Lines are concatenated with no separator — original newlines are
    /// discarded, so callers relying on line structure must not use this.
    /// The connection is consumed and therefore closed on every path,
    /// success or failure. `None` in, `Ok(None)` out.
    pub fn get_response(&self, conn: Option<T::Conn>) -> Result<Option<String>, ClientError> {
        let Some(mut conn) = conn else {
            return Ok(None);
        };

        let mut response = String::new();
        while let Some(line) = conn.read_line()? {
            response.push_str(&line);
        }
        Ok(Some(response))
    }

    /// Fetch a URL as text with a plain GET: no query, no request
    /// properties, no timeout override. Transport failures propagate;
    /// `Ok(None)` only when the network check reports offline.
    pub fn fetch(&self, url: &str) -> Result<Option<String>, ClientError> {
        if !self.network.is_network_available() {
            return Ok(None);
        }

        let request = ConnectionRequest {
            url: url.to_string(),
            method: Some(Method::Get),
            headers: Vec::new(),
            connect_timeout: None,
            expects_body: false,
            use_caches: false,
        };
        let mut conn = self.transport.open(&request)?;
        let mut response = String::new();
        while let Some(line) = conn.read_line()? {
            response.push_str(&line);
        }
        Ok(Some(response))
    }

    /// Percent-encode the configured request properties for attachment.
    /// Empty when none are configured, so attachment is skipped entirely.
    fn encoded_properties(&self) -> Vec<(String, String)> {
        self.request_properties
            .iter()
            .map(|(name, value)| {
                (
                    urlencoding::encode(name).into_owned(),
                    urlencoding::encode(value).into_owned(),
                )
            })
            .collect()
    }
}

/// Prefix `http://` when the URL carries neither an `http` nor an `https`
/// scheme already.
fn normalize_url(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}
