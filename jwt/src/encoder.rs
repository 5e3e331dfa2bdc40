//! Segment encoders
//!
//! Every token segment passes through an [`Encoder`]. Implementations must be
//! injective and must never emit the `.` segment delimiter.

use crate::error::{JwtError, JwtResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use std::fmt::Debug;
use std::sync::Arc;

/// Reversible bytes <-> token-safe string mapping.
pub trait Encoder: Send + Sync + Debug {
    /// Encode raw bytes into a delimiter-free string.
    fn encode(&self, input: &[u8]) -> String;

    /// Decode a string produced by [`Encoder::encode`].
    ///
    /// # Errors
    /// Returns [`JwtError::Decode`] for input outside the encoder's alphabet.
    fn decode(&self, input: &str) -> JwtResult<Vec<u8>>;
}

impl<T: Encoder + ?Sized> Encoder for Arc<T> {
    fn encode(&self, input: &[u8]) -> String {
        (**self).encode(input)
    }

    fn decode(&self, input: &str) -> JwtResult<Vec<u8>> {
        (**self).decode(input)
    }
}

impl<T: Encoder + ?Sized> Encoder for Box<T> {
    fn encode(&self, input: &[u8]) -> String {
        (**self).encode(input)
    }

    fn decode(&self, input: &str) -> JwtResult<Vec<u8>> {
        (**self).decode(input)
    }
}

/// Base64 URL-safe encoding without padding (RFC 7515). The default encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Base64UrlEncoder;

impl Encoder for Base64UrlEncoder {
    #[inline]
    fn encode(&self, input: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(input)
    }

    // The engine rejects padding and non-canonical trailing bits.
    #[inline]
    fn decode(&self, input: &str) -> JwtResult<Vec<u8>> {
        URL_SAFE_NO_PAD
            .decode(input)
            .map_err(|e| JwtError::decode(e.to_string()))
    }
}

/// Lowercase hexadecimal encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexEncoder;

impl Encoder for HexEncoder {
    fn encode(&self, input: &[u8]) -> String {
        hex::encode(input)
    }

    fn decode(&self, input: &str) -> JwtResult<Vec<u8>> {
        // Uppercase digits would give a second spelling of the same bytes.
        if input.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(JwtError::decode("uppercase hex digit"));
        }
        hex::decode(input).map_err(|e| JwtError::decode(e.to_string()))
    }
}

/// Shared handle to the default encoder.
#[must_use]
pub fn default_encoder() -> Arc<dyn Encoder> {
    Arc::new(Base64UrlEncoder)
}
