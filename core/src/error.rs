//! Error taxonomy for the client.
//!
//! # Design
//! One closed enum covers every way a request can fail, in classification
//! order: the two build-time failures (`InvalidEndpoint`, `RequestBuild`)
//! are detected before the transport is ever contacted; the rest only after
//! the transport call resolves. `Transport`, `EmptyBody` and `Decode` carry
//! the HTTP status code when a response was received, so callers can
//! distinguish "the server rejected it" from "it never got there". `Decode`
//! keeps the raw body bytes for inspection of the unparseable payload.
//!
//! Nothing in the core logs-and-swallows or panics; every failure reaches
//! the caller as exactly one of these variants.

use bytes::Bytes;
use thiserror::Error;

/// Boxed error used where the failure source is externally owned (transport
/// engines, decoders).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by [`Client`](crate::client::Client) operations and by
/// [`RequestConfig::build`](crate::config::RequestConfig::build).
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint path does not resolve to a valid URL against the
    /// client's base URL. The transport is never contacted.
    #[error("invalid endpoint path {path:?}")]
    InvalidEndpoint {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The request body could not be encoded. The transport is never
    /// contacted.
    #[error("failed to encode request body")]
    RequestBuild {
        #[source]
        source: serde_json::Error,
    },

    /// The transport call failed: connection, protocol, or timeout. A
    /// status code is present when a response had already been received
    /// (for example a body cut short), absent when the request never
    /// reached a server.
    #[error("transport error ({})", display_status(.status))]
    Transport {
        status: Option<u16>,
        #[source]
        source: BoxError,
    },

    /// The transport succeeded but the response carried zero body bytes
    /// where the operation required one.
    #[error("response body was empty ({})", display_status(.status))]
    EmptyBody { status: Option<u16> },

    /// The response body did not decode into the expected shape. `body`
    /// holds the raw bytes exactly as received.
    #[error("failed to decode {} response bytes ({})", .body.len(), display_status(.status))]
    Decode {
        body: Bytes,
        status: Option<u16>,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// The HTTP status code attached to this failure, when the request got
    /// far enough for one to exist.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::InvalidEndpoint { .. } | Error::RequestBuild { .. } => None,
            Error::Transport { status, .. }
            | Error::EmptyBody { status }
            | Error::Decode { status, .. } => *status,
        }
    }
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status".to_string(),
    }
}
