//! Request body variants and their encoding.
//!
//! # Design
//! A body is one of three things: nothing, a JSON object assembled from
//! key-value parameters, or raw bytes used verbatim. Encoding happens at
//! build time, inside [`RequestConfig::build`](crate::config::RequestConfig::build),
//! so a payload that cannot be encoded fails the call before the transport
//! is ever contacted.

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// The payload of a request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No payload bytes.
    #[default]
    Empty,
    /// Key-value parameters, encoded as a JSON object at build time.
    Params(Map<String, Value>),
    /// Bytes passed through unchanged, including the no-bytes case.
    Raw(Option<Bytes>),
}

impl RequestBody {
    /// Build a `Params` body from any serializable value.
    ///
    /// The value must serialize to a JSON object; anything else (a bare
    /// number, an array, a value whose `Serialize` impl fails) is reported
    /// as [`Error::RequestBuild`].
    pub fn params<T: Serialize>(payload: &T) -> Result<Self, Error> {
        let value =
            serde_json::to_value(payload).map_err(|source| Error::RequestBuild { source })?;
        match value {
            Value::Object(map) => Ok(RequestBody::Params(map)),
            _ => Err(Error::RequestBuild {
                source: serde::ser::Error::custom("request parameters must be a JSON object"),
            }),
        }
    }

    /// Encode the body into transport bytes. `Empty` and `Raw(None)` encode
    /// to no bytes at all.
    pub(crate) fn encode(&self) -> Result<Option<Bytes>, serde_json::Error> {
        match self {
            RequestBody::Empty => Ok(None),
            RequestBody::Params(map) => serde_json::to_vec(map).map(|raw| Some(Bytes::from(raw))),
            RequestBody::Raw(bytes) => Ok(bytes.clone()),
        }
    }
}
