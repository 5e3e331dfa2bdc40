//! Token error types

use thiserror::Error;

/// Token operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Token error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Structurally malformed token (segment count, size, non-object JSON)
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A segment could not be decoded by the encoder
    #[error("Invalid token encoding: {0}")]
    Decode(String),

    /// Recomputed signature does not match the token's signature
    #[error("Invalid signature")]
    InvalidSignature,

    /// Header or payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Key material rejected by the signing primitive
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl JwtError {
    /// Create an invalid token error
    #[inline]
    #[must_use]
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        JwtError::InvalidToken(msg.into())
    }

    /// Create a decode error
    #[inline]
    #[must_use]
    pub fn decode(msg: impl Into<String>) -> Self {
        JwtError::Decode(msg.into())
    }

    /// Create an invalid signature error
    #[inline]
    #[must_use]
    pub fn invalid_signature() -> Self {
        JwtError::InvalidSignature
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        JwtError::Serialization(msg.into())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        JwtError::InvalidKey(msg.into())
    }

    /// True for structural failures, including segments the encoder rejects.
    #[must_use]
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, JwtError::InvalidToken(_) | JwtError::Decode(_))
    }

    /// True when the token was well formed but its signature did not verify.
    #[must_use]
    pub fn is_signature_mismatch(&self) -> bool {
        matches!(self, JwtError::InvalidSignature)
    }
}

impl From<serde_json::Error> for JwtError {
    fn from(err: serde_json::Error) -> Self {
        JwtError::Serialization(err.to_string())
    }
}
