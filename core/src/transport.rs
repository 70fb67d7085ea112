//! Request execution.
//!
//! # Design
//! A [`Transport`] does exactly one thing: execute an already-built
//! [`TransportRequest`] and report the status and bytes that came back,
//! or the failure that prevented them. Everything above it (building,
//! classification, decoding) lives in the client, so a transport swap
//! never changes error semantics. [`ReqwestTransport`] is the default
//! and the only file in the crate that knows about `reqwest`.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use crate::http::{CachePolicy, HttpMethod, TransportFailure, TransportRequest, TransportResponse};

/// Executes built requests against the network (or anything pretending
/// to be one).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest)
        -> Result<TransportResponse, TransportFailure>;
}

/// The default transport, backed by a [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        ReqwestTransport {
            inner: reqwest::Client::new(),
        }
    }

    /// Wrap an existing `reqwest::Client`, keeping its pool and TLS
    /// configuration.
    pub fn with_client(inner: reqwest::Client) -> Self {
        ReqwestTransport { inner }
    }

    /// A process-wide shared instance, so clients created ad hoc still
    /// reuse one connection pool.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<ReqwestTransport>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(ReqwestTransport::new()))
            .clone()
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        ReqwestTransport::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportFailure> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self
            .inner
            .request(reqwest_method(request.method), request.url)
            .timeout(request.timeout);
        if let Some(directive) = cache_control(request.cache_policy) {
            builder = builder.header(reqwest::header::CACHE_CONTROL, directive);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|err| match err.status() {
            Some(code) => TransportFailure::with_status(code.as_u16(), err),
            None => TransportFailure::new(err),
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| TransportFailure::with_status(status, err))?;
        Ok(TransportResponse { status, body })
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
        HttpMethod::Trace => reqwest::Method::TRACE,
        HttpMethod::Connect => reqwest::Method::CONNECT,
    }
}

/// Cache policies become request directives where HTTP has one.
/// `PreferCache` has no origin-facing equivalent, so it stays advisory.
fn cache_control(policy: CachePolicy) -> Option<&'static str> {
    match policy {
        CachePolicy::ProtocolDefault | CachePolicy::PreferCache => None,
        CachePolicy::IgnoreLocalCache => Some("no-cache"),
        CachePolicy::IgnoreAllCaches => Some("no-cache, no-store"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_map_to_their_reqwest_equivalents() {
        let pairs = [
            (HttpMethod::Get, reqwest::Method::GET),
            (HttpMethod::Post, reqwest::Method::POST),
            (HttpMethod::Put, reqwest::Method::PUT),
            (HttpMethod::Delete, reqwest::Method::DELETE),
            (HttpMethod::Patch, reqwest::Method::PATCH),
            (HttpMethod::Head, reqwest::Method::HEAD),
            (HttpMethod::Options, reqwest::Method::OPTIONS),
            (HttpMethod::Trace, reqwest::Method::TRACE),
            (HttpMethod::Connect, reqwest::Method::CONNECT),
        ];
        for (method, expected) in pairs {
            assert_eq!(reqwest_method(method), expected);
        }
    }

    #[test]
    fn cache_policies_map_to_cache_control() {
        assert_eq!(cache_control(CachePolicy::ProtocolDefault), None);
        assert_eq!(cache_control(CachePolicy::IgnoreLocalCache), Some("no-cache"));
        assert_eq!(
            cache_control(CachePolicy::IgnoreAllCaches),
            Some("no-cache, no-store")
        );
        assert_eq!(cache_control(CachePolicy::PreferCache), None);
    }

    #[test]
    fn shared_hands_out_one_instance() {
        let a = ReqwestTransport::shared();
        let b = ReqwestTransport::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
