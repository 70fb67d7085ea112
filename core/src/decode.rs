//! Response body decoding.
//!
//! # Design
//! Decoding happens in two phases so the trait stays object-safe: a
//! [`Decoder`] turns raw bytes into a [`serde_json::Value`], and the
//! client converts that value into whatever type the caller asked for.
//! Swapping the decoder changes how bytes become structured data without
//! touching the typed conversion.

use serde_json::Value;

use crate::error::BoxError;

/// Turns raw response bytes into structured data.
pub trait Decoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Value, BoxError>;
}

/// The default decoder: plain `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Value, BoxError> {
        serde_json::from_slice(bytes).map_err(Into::into)
    }
}
