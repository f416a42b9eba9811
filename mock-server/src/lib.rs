//! Mock HTTP server exercising the connection client's surface.
//!
//! Each route targets one client behavior: `/ping` for the plain fetch,
//! `/echo` for query-string encoding (parameters come back decoded),
//! `/submit` for the POST body path, `/headers/{name}` for request-property
//! attachment, and `/lines` for multi-line response draining.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;

pub fn app() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/echo", get(echo))
        .route("/submit", post(submit))
        .route("/headers/{name}", get(header_value))
        .route("/lines", get(lines))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn ping() -> &'static str {
    "pong"
}

/// Echo the received query parameters back as a JSON object. Axum decodes
/// percent-encoding on the way in, so the response shows the original text.
async fn echo(Query(params): Query<HashMap<String, String>>) -> Json<HashMap<String, String>> {
    Json(params)
}

/// Echo the raw request body back verbatim.
async fn submit(body: String) -> String {
    body
}

/// Return the value of the named request header, 404 when absent.
async fn header_value(
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<String, StatusCode> {
    headers
        .get(name.as_str())
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .ok_or(StatusCode::NOT_FOUND)
}

/// A fixed multi-line body; the client is expected to drop the newlines
/// while draining.
async fn lines() -> &'static str {
    "line one\nsecond line\n"
}
