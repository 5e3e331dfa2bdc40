//! Token codec: build and verify
//!
//! Verification fails closed. The segment count and size are checked before
//! any cryptographic work, the signature is checked before any header or
//! payload bytes are decoded, and callers only ever see a fully verified
//! [`Token`] or an error.

use crate::config::CodecConfig;
use crate::encoder::{Encoder, default_encoder};
use crate::encrypter::{Encrypter, Secret, format_encrypter};
use crate::error::{JwtError, JwtResult};
use crate::token::{Header, Payload, Token, TokenBuilder};
use std::sync::Arc;
use tracing::debug;

/// Segment delimiter of the wire format.
pub const DELIMITER: char = '.';

/// Token codec.
///
/// Holds only configuration, so one codec can be shared between threads
/// building or verifying unrelated tokens.
#[derive(Clone, Debug, Default)]
pub struct Jwt {
    config: CodecConfig,
}

impl Jwt {
    /// Create a codec with the given configuration.
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Codec compatible with tokens from older deployments.
    #[must_use]
    pub fn legacy() -> Self {
        Self::new(CodecConfig::legacy())
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Start a builder carrying the default header, signed with `secret`.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] if the secret cannot seed the
    /// configured algorithm.
    pub fn builder(&self, secret: impl Into<Secret>) -> JwtResult<TokenBuilder> {
        let encrypter = self.signing_encrypter(secret.into())?;
        let mut builder = TokenBuilder::new(encrypter, default_encoder());
        builder
            .set_headers(self.config.default_headers())
            .set_json_format(self.config.json_format);
        Ok(builder)
    }

    // Only the signing path warns about short secrets.
    fn signing_encrypter(&self, secret: Secret) -> JwtResult<Arc<dyn Encrypter>> {
        secret.warn_if_short(self.config.algorithm);
        format_encrypter(secret, self.config.algorithm)
    }

    /// Assemble a token from caller headers (merged over the defaults, caller
    /// wins), a payload and a secret. `encoder` defaults to base64url.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] if the secret cannot seed the
    /// configured algorithm.
    pub fn build(
        &self,
        headers: Header,
        payload: Payload,
        secret: impl Into<Secret>,
        encoder: Option<Arc<dyn Encoder>>,
    ) -> JwtResult<Token> {
        let mut merged = self.config.default_headers();
        for (key, value) in headers {
            merged.insert(key, value);
        }

        let encrypter = self.signing_encrypter(secret.into())?;
        let encoder = encoder.unwrap_or_else(default_encoder);
        Ok(Token::from_parts(
            merged,
            payload,
            encoder,
            encrypter,
            self.config.json_format,
        ))
    }

    /// Verify a wire-form token and reconstruct it.
    ///
    /// The signature is recomputed over the literal `header.payload`
    /// substring of `token`.
    ///
    /// # Errors
    /// - [`JwtError::InvalidToken`] for oversized input, a segment count other
    ///   than three, or a header/payload the configured JSON format cannot
    ///   read as a map
    /// - [`JwtError::Decode`] if a segment is outside the encoder's alphabet
    /// - [`JwtError::InvalidSignature`] if the signature does not match
    pub fn decrypt(
        &self,
        token: &str,
        secret: impl Into<Secret>,
        encoder: Option<Arc<dyn Encoder>>,
    ) -> JwtResult<Token> {
        if token.len() > self.config.max_token_length {
            debug!(
                len = token.len(),
                max = self.config.max_token_length,
                "Rejected oversized token"
            );
            return Err(JwtError::invalid_token("token exceeds maximum length"));
        }

        let segments: Vec<&str> = token.split(DELIMITER).collect();
        let &[header_segment, payload_segment, signature_segment] = segments.as_slice() else {
            debug!(segments = segments.len(), "Rejected token with wrong segment count");
            return Err(JwtError::invalid_token(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        let encrypter = format_encrypter(secret, self.config.algorithm)?;
        let encoder = encoder.unwrap_or_else(default_encoder);

        let signature_string = &token[..header_segment.len() + 1 + payload_segment.len()];
        let candidate = encoder.decode(signature_segment).map_err(|e| {
            debug!("Rejected token with undecodable signature segment");
            e
        })?;

        if !encrypter.check(signature_string, &candidate) {
            debug!(algorithm = %encrypter.algorithm(), "Rejected token signature");
            return Err(JwtError::invalid_signature());
        }

        let headers = self.decode_map(encoder.as_ref(), header_segment, "header")?;
        let payload = self.decode_map(encoder.as_ref(), payload_segment, "payload")?;

        debug!(algorithm = %encrypter.algorithm(), "Token verified");
        Ok(Token::from_parts(
            headers,
            payload,
            encoder,
            encrypter,
            self.config.json_format,
        ))
    }

    fn decode_map(&self, encoder: &dyn Encoder, segment: &str, what: &str) -> JwtResult<Header> {
        let bytes = encoder.decode(segment)?;
        self.config
            .json_format
            .from_slice(&bytes, what)
            .map_err(|e| {
                debug!(segment = what, "Rejected segment that is not a JSON map");
                e
            })
    }
}

/// Build a token with the default codec.
///
/// # Errors
/// See [`Jwt::build`].
pub fn build(
    headers: Header,
    payload: Payload,
    secret: impl Into<Secret>,
    encoder: Option<Arc<dyn Encoder>>,
) -> JwtResult<Token> {
    Jwt::default().build(headers, payload, secret, encoder)
}

/// Verify a token with the default codec.
///
/// # Errors
/// See [`Jwt::decrypt`].
pub fn decrypt(
    token: &str,
    secret: impl Into<Secret>,
    encoder: Option<Arc<dyn Encoder>>,
) -> JwtResult<Token> {
    Jwt::default().decrypt(token, secret, encoder)
}
