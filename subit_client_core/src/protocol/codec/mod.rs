//! XML-RPC encoding and decoding
//!
//! This module handles the conversion between typed values and the XML
//! documents exchanged with the service.

mod decoder;
mod encoder;
mod value;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use value::Value;

use crate::protocol::error::Result;
use bytes::Bytes;
use log::{debug, trace};

/// Codec for encoding calls and decoding responses
pub struct Codec {
    encoder: Encoder,
    decoder: Decoder,
}

impl Codec {
    /// Create a new codec instance
    pub fn new() -> Self {
        Self {
            encoder: Encoder::new(),
            decoder: Decoder::new(),
        }
    }

    /// Encode a method call into a request body
    pub fn encode_call(&mut self, method: &str, params: &[Value]) -> Result<Bytes> {
        debug!("Codec encoding call to {method}");
        self.encoder.encode_call(method, params)
    }

    /// Decode a response body into its return value
    pub fn decode_response(&self, body: &str) -> Result<Value> {
        debug!("Codec decoding {} bytes", body.len());
        let value = self.decoder.decode_response(body)?;
        trace!("Decoded value: {value:?}");
        Ok(value)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}
