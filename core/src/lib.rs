//! Minimal async HTTP client with pluggable transport and decoding.
//!
//! # Overview
//! A [`RequestConfig`] describes one request relative to a base URL; a
//! [`Client`] builds it, sends it, and classifies whatever happens into a
//! single [`Result`]. Four call shapes cover the usual needs: decode the
//! body into a type, fire-and-acknowledge, fetch raw bytes, or push bytes
//! up without body serialization.
//!
//! # Design
//! - `RequestConfig` is a plain value. Building it against a base URL is
//!   pure, so descriptors can be stored, cloned, and replayed.
//! - All I/O goes through the [`Transport`] trait; [`ReqwestTransport`] is
//!   the default and the only module touching the network stack. Tests swap
//!   in stubs.
//! - Decoding is split behind [`Decoder`] so wire format and target type
//!   vary independently.
//! - Every failure is one [`Error`] variant, and each response-side variant
//!   carries the HTTP status it was observed with.
//!
//! ```no_run
//! use courier::{Client, RequestConfig};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Todo {
//!     id: u64,
//!     title: String,
//!     completed: bool,
//! }
//!
//! # async fn run() -> Result<(), courier::Error> {
//! let client = Client::new("https://jsonplaceholder.typicode.com/".parse().unwrap());
//! let todo: Todo = client.request(RequestConfig::new("todos/1")).await?;
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod http;
pub mod transport;

pub use body::RequestBody;
pub use client::{Client, ClientBuilder};
pub use config::{RequestConfig, DEFAULT_TIMEOUT};
pub use decode::{Decoder, JsonDecoder};
pub use error::{BoxError, Error};
pub use http::{
    CachePolicy, HttpMethod, TransportFailure, TransportRequest, TransportResponse,
};
pub use transport::{ReqwestTransport, Transport};

pub use url::Url;
