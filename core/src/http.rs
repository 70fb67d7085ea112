//! Wire-level request and response types.
//!
//! # Design
//! These types describe one HTTP exchange as plain data. `RequestConfig`
//! produces a `TransportRequest`, a [`Transport`](crate::transport::Transport)
//! implementation executes it, and the client classifies the resulting
//! `TransportResponse` or `TransportFailure`. Everything here is owned data
//! (`String`, `Bytes`, `Vec`) so values can be moved freely across tasks and
//! into stub transports in tests.
//!
//! The core never looks at a transport outcome beyond the
//! (status, body | failure) triple exposed here.

use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::error::BoxError;

/// HTTP request method.
///
/// The closed set of verbs from RFC 9110. Serialized to its uppercase wire
/// form by [`HttpMethod::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl HttpMethod {
    /// The uppercase wire form of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache directive carried verbatim on the transport request.
///
/// The core implements no cache of its own; the policy is advice to the
/// transport. [`ReqwestTransport`](crate::transport::ReqwestTransport) maps
/// the bypass variants to `Cache-Control` request headers so intermediaries
/// honor them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Standard HTTP caching semantics; no extra directive is sent.
    ProtocolDefault,
    /// Skip any locally cached response and go to the network.
    #[default]
    IgnoreLocalCache,
    /// Skip local caches and ask intermediaries to revalidate as well.
    IgnoreAllCaches,
    /// Answer from cache when the transport holds one; network on a miss.
    PreferCache,
}

/// A fully-resolved request, ready for a transport to execute.
///
/// Produced by [`RequestConfig::build`](crate::config::RequestConfig::build).
/// Headers are sorted by name, so building the same descriptor twice yields
/// structurally equal requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: Url,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
    pub cache_policy: CachePolicy,
    pub timeout: Duration,
}

/// The successful outcome of a transport call.
///
/// An empty `body` means the response carried zero payload bytes; the client
/// decides per operation whether that is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

/// The failed outcome of a transport call.
///
/// `status` is present when an HTTP response was received before the failure
/// (for example a connection dropped mid-body) and absent for pure
/// connection-level failures, so callers can tell "the server rejected it"
/// from "it never got there".
#[derive(Debug)]
pub struct TransportFailure {
    pub status: Option<u16>,
    pub source: BoxError,
}

impl TransportFailure {
    /// A failure with no HTTP response behind it.
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            status: None,
            source: source.into(),
        }
    }

    /// A failure that happened after a status line was received.
    pub fn with_status(status: u16, source: impl Into<BoxError>) -> Self {
        Self {
            status: Some(status),
            source: source.into(),
        }
    }
}
