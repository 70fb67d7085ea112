//! The client: build, send, classify, decode.
//!
//! # Design
//! `Client` holds a base URL, a transport, and a decoder, and carries no
//! mutable state between calls. Every operation funnels through one
//! private `dispatch` step that builds the request, enforces the timeout,
//! and sends it; the public operations differ only in what they demand of
//! the response body. Classification order is fixed: build failures never
//! reach the transport, transport failures trump body handling, and an
//! empty body is reported before decoding is attempted.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::RequestConfig;
use crate::decode::{Decoder, JsonDecoder};
use crate::error::Error;
use crate::http::TransportResponse;
use crate::transport::{ReqwestTransport, Transport};

/// An HTTP client bound to one base URL.
///
/// Cloning is cheap and clones share the transport and decoder. The
/// default configuration sends real requests through a process-wide
/// [`ReqwestTransport`] and decodes responses as JSON.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn Decoder>,
}

impl Client {
    /// A client with the default transport and decoder.
    pub fn new(base_url: Url) -> Self {
        Client {
            base_url,
            transport: default_transport(),
            decoder: default_decoder(),
        }
    }

    /// A client sending through the given transport, with the default
    /// decoder.
    pub fn with_transport(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Client {
            base_url,
            transport,
            decoder: default_decoder(),
        }
    }

    pub fn builder(base_url: Url) -> ClientBuilder {
        ClientBuilder {
            base_url,
            transport: None,
            decoder: None,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send the request and decode the response body into `T`.
    ///
    /// A response with zero body bytes is [`Error::EmptyBody`]; bytes the
    /// decoder or the typed conversion cannot handle are returned inside
    /// [`Error::Decode`] for inspection.
    pub async fn request<T: DeserializeOwned>(&self, config: RequestConfig) -> Result<T, Error> {
        let response = self.dispatch(&config, None).await?;
        let body = require_body(&response)?;
        self.decode_typed(body, response.status)
    }

    /// Send the request and ignore whatever body comes back. The response
    /// only has to arrive; zero body bytes are fine here.
    pub async fn execute(&self, config: RequestConfig) -> Result<(), Error> {
        self.dispatch(&config, None).await?;
        Ok(())
    }

    /// Send the request and hand back the raw body bytes, undecoded.
    pub async fn request_bytes(&self, config: RequestConfig) -> Result<Bytes, Error> {
        let response = self.dispatch(&config, None).await?;
        require_body(&response)
    }

    /// Send `payload` as the request body, ignoring the body configured on
    /// the descriptor. Nothing is decoded; the caller gets the response
    /// as-is.
    pub async fn upload(
        &self,
        config: RequestConfig,
        payload: impl Into<Bytes>,
    ) -> Result<TransportResponse, Error> {
        self.dispatch(&config, Some(payload.into())).await
    }

    /// Build, send, classify. Each call is one transport round-trip; the
    /// timeout covers the whole of it, whether or not the transport
    /// honors the per-request deadline itself.
    async fn dispatch(
        &self,
        config: &RequestConfig,
        entity: Option<Bytes>,
    ) -> Result<TransportResponse, Error> {
        let request = match entity {
            Some(bytes) => config.build_with_entity(&self.base_url, bytes)?,
            None => config.build(&self.base_url)?,
        };
        let deadline = request.timeout;

        let outcome = tokio::time::timeout(deadline, self.transport.send(request))
            .await
            .map_err(|elapsed| Error::Transport {
                status: None,
                source: elapsed.into(),
            })?;
        let response = outcome.map_err(|failure| Error::Transport {
            status: failure.status,
            source: failure.source,
        })?;

        tracing::debug!(status = response.status, bytes = response.body.len(), "response received");
        Ok(response)
    }

    fn decode_typed<T: DeserializeOwned>(&self, body: Bytes, status: u16) -> Result<T, Error> {
        let value = self.decoder.decode(&body).map_err(|source| Error::Decode {
            body: body.clone(),
            status: Some(status),
            source,
        })?;
        serde_json::from_value(value).map_err(|source| Error::Decode {
            body,
            status: Some(status),
            source: source.into(),
        })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Builds a [`Client`] with a swapped-in transport or decoder.
pub struct ClientBuilder {
    base_url: Url,
    transport: Option<Arc<dyn Transport>>,
    decoder: Option<Arc<dyn Decoder>>,
}

impl ClientBuilder {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn decoder(mut self, decoder: Arc<dyn Decoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    pub fn build(self) -> Client {
        Client {
            base_url: self.base_url,
            transport: self.transport.unwrap_or_else(default_transport),
            decoder: self.decoder.unwrap_or_else(default_decoder),
        }
    }
}

fn default_transport() -> Arc<dyn Transport> {
    ReqwestTransport::shared()
}

fn default_decoder() -> Arc<dyn Decoder> {
    Arc::new(JsonDecoder)
}

/// A body is required: zero bytes means [`Error::EmptyBody`], with the
/// status attached so callers can tell a bare 200 from a bare 404.
fn require_body(response: &TransportResponse) -> Result<Bytes, Error> {
    if response.body.is_empty() {
        return Err(Error::EmptyBody {
            status: Some(response.status),
        });
    }
    Ok(response.body.clone())
}
