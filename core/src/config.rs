//! Request descriptors.
//!
//! # Design
//! A [`RequestConfig`] is a plain value describing one request: endpoint
//! path, method, body, headers, cache policy, timeout. It does nothing on
//! its own; [`build`](RequestConfig::build) resolves it against a base URL
//! into a [`TransportRequest`]. Building is pure and repeatable, so the
//! same descriptor can be built and sent any number of times.
//!
//! Header values are optional: a `None` value keeps the name in the
//! descriptor but leaves the header out of the built request entirely.

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use url::Url;

use crate::body::RequestBody;
use crate::error::Error;
use crate::http::{CachePolicy, HttpMethod, TransportRequest};

/// Timeout applied to requests that never set one explicitly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A description of a single HTTP request, relative to some base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    path: String,
    method: HttpMethod,
    body: RequestBody,
    headers: BTreeMap<String, Option<String>>,
    cache_policy: CachePolicy,
    timeout: Duration,
}

impl RequestConfig {
    /// A descriptor for `path` with the default settings: `GET`, no body,
    /// no headers, [`CachePolicy::IgnoreLocalCache`], 60 second timeout.
    ///
    /// `path` is resolved against the client's base URL per RFC 3986, so
    /// relative paths extend the base, a leading `/` starts from the host
    /// root, and query strings are preserved.
    pub fn new(path: impl Into<String>) -> Self {
        RequestConfig {
            path: path.into(),
            method: HttpMethod::default(),
            body: RequestBody::default(),
            headers: BTreeMap::new(),
            cache_policy: CachePolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Set a header. Setting the same name again replaces the value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), Some(value.into()));
        self
    }

    /// Record a header name with no value, which keeps it out of the built
    /// request. Useful for blanking a header a shared config set earlier.
    pub fn omit_header(mut self, name: impl Into<String>) -> Self {
        self.headers.insert(name.into(), None);
        self
    }

    /// Merge a batch of header entries into the descriptor.
    pub fn headers<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Option<String>)>,
    {
        self.headers.extend(entries);
        self
    }

    pub fn cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the descriptor against `base` into a ready-to-send request.
    ///
    /// The endpoint path is resolved first, then the body is encoded, so a
    /// bad path is reported as [`Error::InvalidEndpoint`] even when the
    /// body would also have failed.
    pub fn build(&self, base: &Url) -> Result<TransportRequest, Error> {
        let url = self.endpoint_url(base)?;
        let body = self
            .body
            .encode()
            .map_err(|source| Error::RequestBuild { source })?;
        Ok(TransportRequest {
            url,
            method: self.method,
            headers: self.header_list(),
            body,
            cache_policy: self.cache_policy,
            timeout: self.timeout,
        })
    }

    /// Like [`build`](Self::build), but the given bytes become the body and
    /// the configured body is ignored, encoding and all.
    pub(crate) fn build_with_entity(
        &self,
        base: &Url,
        entity: Bytes,
    ) -> Result<TransportRequest, Error> {
        let url = self.endpoint_url(base)?;
        Ok(TransportRequest {
            url,
            method: self.method,
            headers: self.header_list(),
            body: Some(entity),
            cache_policy: self.cache_policy,
            timeout: self.timeout,
        })
    }

    fn endpoint_url(&self, base: &Url) -> Result<Url, Error> {
        base.join(&self.path).map_err(|source| Error::InvalidEndpoint {
            path: self.path.clone(),
            source,
        })
    }

    /// Headers that made it into the request, sorted by name. `None`
    /// values are dropped here.
    fn header_list(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.clone(), v.clone())))
            .collect()
    }
}
