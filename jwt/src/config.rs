//! Codec configuration

use crate::encrypter::Algorithm;
use crate::json::JsonFormat;
use crate::token::Header;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header tag used by tokens from older deployments.
pub const LEGACY_HEADER_ALG: &str = "jwt";

fn default_max_token_length() -> usize {
    64 * 1024 // 64 KiB
}

/// Settings shared by every token a [`crate::Jwt`] codec builds or verifies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Algorithm a raw secret resolves to.
    pub algorithm: Algorithm,
    /// Value of the informational `alg` header; `None` uses the algorithm tag.
    pub header_alg: Option<String>,
    /// Tokens longer than this are rejected before parsing.
    #[serde(default = "default_max_token_length")]
    pub max_token_length: usize,
    /// JSON text written for (and read from) header and payload segments.
    pub json_format: JsonFormat,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            header_alg: None,
            max_token_length: default_max_token_length(),
            json_format: JsonFormat::default(),
        }
    }
}

impl CodecConfig {
    /// Settings that reproduce tokens from older deployments byte for byte:
    /// MD5 signatures, `{"alg":"jwt"}` headers and PHP-style JSON text.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            algorithm: Algorithm::LegacyMd5,
            header_alg: Some(LEGACY_HEADER_ALG.to_string()),
            json_format: JsonFormat::Php,
            ..Self::default()
        }
    }

    /// Set the algorithm used for raw secrets.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the informational `alg` header value.
    #[must_use]
    pub fn with_header_alg(mut self, alg: impl Into<String>) -> Self {
        self.header_alg = Some(alg.into());
        self
    }

    /// Set the maximum accepted token length in bytes.
    #[must_use]
    pub fn with_max_token_length(mut self, max: usize) -> Self {
        self.max_token_length = max;
        self
    }

    /// Set the JSON text format of header and payload segments.
    #[must_use]
    pub fn with_json_format(mut self, json_format: JsonFormat) -> Self {
        self.json_format = json_format;
        self
    }

    /// The `alg` header value this configuration writes.
    #[must_use]
    pub fn header_alg(&self) -> &str {
        self.header_alg
            .as_deref()
            .unwrap_or_else(|| self.algorithm.as_str())
    }

    /// Header every built token starts from.
    #[must_use]
    pub fn default_headers(&self) -> Header {
        let mut headers = Header::new();
        headers.insert("alg".to_string(), Value::from(self.header_alg()));
        headers
    }
}
