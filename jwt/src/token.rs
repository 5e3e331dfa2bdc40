//! Tokens and the builder that produces them

use crate::encoder::Encoder;
use crate::encrypter::{Encrypter, Secret};
use crate::error::{JwtError, JwtResult};
use crate::json::JsonFormat;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Token header: insertion-ordered JSON object.
pub type Header = Map<String, Value>;

/// Token payload (claims): insertion-ordered JSON object.
pub type Payload = Map<String, Value>;

/// A token's contents together with the strategies that sign and encode it.
///
/// Tokens are immutable; use [`Token::into_builder`] to derive a modified one.
#[derive(Clone, Debug)]
pub struct Token {
    headers: Header,
    payload: Payload,
    encoder: Arc<dyn Encoder>,
    encrypter: Arc<dyn Encrypter>,
    json_format: JsonFormat,
}

impl Token {
    pub(crate) fn from_parts(
        headers: Header,
        payload: Payload,
        encoder: Arc<dyn Encoder>,
        encrypter: Arc<dyn Encrypter>,
        json_format: JsonFormat,
    ) -> Self {
        Self {
            headers,
            payload,
            encoder,
            encrypter,
            json_format,
        }
    }

    /// Verify `token` with the default codec and encoder.
    ///
    /// # Errors
    /// See [`crate::Jwt::decrypt`].
    pub fn decrypt(token: &str, secret: impl Into<Secret>) -> JwtResult<Self> {
        crate::Jwt::default().decrypt(token, secret, None)
    }

    /// Header entries.
    #[must_use]
    pub fn headers(&self) -> &Header {
        &self.headers
    }

    /// Payload entries.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Look up one header entry.
    #[must_use]
    pub fn header_value(&self, key: &str) -> Option<&Value> {
        self.headers.get(key)
    }

    /// Look up one claim.
    #[must_use]
    pub fn claim(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Deserialize the payload into a typed claims struct.
    ///
    /// # Errors
    /// Returns [`JwtError::Serialization`] if the payload does not fit `T`.
    pub fn claims_as<T: DeserializeOwned>(&self) -> JwtResult<T> {
        Ok(serde_json::from_value(Value::Object(self.payload.clone()))?)
    }

    /// Encoder used for every segment.
    #[must_use]
    pub fn encoder(&self) -> &Arc<dyn Encoder> {
        &self.encoder
    }

    /// Encrypter used to sign (or that verified) this token.
    #[must_use]
    pub fn encrypter(&self) -> &Arc<dyn Encrypter> {
        &self.encrypter
    }

    /// JSON text format of the header and payload segments.
    #[must_use]
    pub fn json_format(&self) -> JsonFormat {
        self.json_format
    }

    /// The signing input: `encode(json(header)) "." encode(json(payload))`.
    ///
    /// # Errors
    /// Returns [`JwtError::Serialization`] if a map cannot be serialized.
    pub fn signature_string(&self) -> JwtResult<String> {
        let headers = self.json_format.to_vec(&self.headers)?;
        let payload = self.json_format.to_vec(&self.payload)?;
        Ok(format!(
            "{}.{}",
            self.encoder.encode(&headers),
            self.encoder.encode(&payload)
        ))
    }

    /// Serialize and sign into the three-segment wire form.
    ///
    /// Deterministic: unchanged contents always give the same string.
    ///
    /// # Errors
    /// Returns [`JwtError::Serialization`] or a signing error.
    pub fn token(&self) -> JwtResult<String> {
        let signature_string = self.signature_string()?;
        let signature = self
            .encoder
            .encode(&self.encrypter.signature(&signature_string)?);

        debug!(
            algorithm = %self.encrypter.algorithm(),
            signing_input_len = signature_string.len(),
            "Token signed"
        );
        Ok(format!("{signature_string}.{signature}"))
    }

    /// Reopen this token for modification.
    #[must_use]
    pub fn into_builder(self) -> TokenBuilder {
        TokenBuilder {
            headers: self.headers,
            payload: self.payload,
            encoder: self.encoder,
            encrypter: self.encrypter,
            json_format: self.json_format,
        }
    }

    /// Copy this token into a new builder.
    #[must_use]
    pub fn to_builder(&self) -> TokenBuilder {
        self.clone().into_builder()
    }
}

/// Exclusively owned, mutable token under construction.
///
/// [`crate::Jwt::builder`] seeds the default `alg` header; [`TokenBuilder::new`]
/// starts from an empty header.
#[derive(Clone, Debug)]
pub struct TokenBuilder {
    headers: Header,
    payload: Payload,
    encoder: Arc<dyn Encoder>,
    encrypter: Arc<dyn Encrypter>,
    json_format: JsonFormat,
}

impl TokenBuilder {
    /// Start an empty token signed by `encrypter` and encoded by `encoder`.
    #[must_use]
    pub fn new(encrypter: Arc<dyn Encrypter>, encoder: Arc<dyn Encoder>) -> Self {
        Self {
            headers: Header::new(),
            payload: Payload::new(),
            encoder,
            encrypter,
            json_format: JsonFormat::default(),
        }
    }

    /// Current header entries.
    #[must_use]
    pub fn headers(&self) -> &Header {
        &self.headers
    }

    /// Current payload entries.
    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Replace the whole header.
    pub fn set_headers(&mut self, headers: Header) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Replace the whole payload.
    pub fn set_payload(&mut self, payload: Payload) -> &mut Self {
        self.payload = payload;
        self
    }

    /// Replace the encoder.
    pub fn set_encoder(&mut self, encoder: Arc<dyn Encoder>) -> &mut Self {
        self.encoder = encoder;
        self
    }

    /// Replace the encrypter.
    pub fn set_encrypter(&mut self, encrypter: Arc<dyn Encrypter>) -> &mut Self {
        self.encrypter = encrypter;
        self
    }

    /// Replace the JSON text format.
    pub fn set_json_format(&mut self, json_format: JsonFormat) -> &mut Self {
        self.json_format = json_format;
        self
    }

    /// Insert or overwrite one header entry.
    pub fn header(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Insert or overwrite one claim.
    pub fn claim(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Replace the payload with a serialized claims struct.
    ///
    /// # Errors
    /// Returns [`JwtError::Serialization`] if `claims` does not serialize to a
    /// JSON object.
    pub fn with_claims<T: Serialize>(&mut self, claims: &T) -> JwtResult<&mut Self> {
        match serde_json::to_value(claims)? {
            Value::Object(payload) => {
                self.payload = payload;
                Ok(self)
            }
            _ => Err(JwtError::serialization("claims must serialize to a JSON object")),
        }
    }

    /// Freeze into an immutable [`Token`].
    #[must_use]
    pub fn finish(&self) -> Token {
        Token::from_parts(
            self.headers.clone(),
            self.payload.clone(),
            Arc::clone(&self.encoder),
            Arc::clone(&self.encrypter),
            self.json_format,
        )
    }
}
