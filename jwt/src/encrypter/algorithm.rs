//! Algorithm tags used to turn raw secrets into encrypters

use super::{Encrypter, HmacEncrypter, Md5Encrypter};
use crate::error::{JwtError, JwtResult};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Signature algorithm selected for raw secrets.
///
/// The tag is never read back from a token header to pick a verifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// `md5(input || secret)` as lowercase hex. Broken; kept for tokens
    /// minted by older deployments.
    #[serde(rename = "md5")]
    LegacyMd5,
    /// HMAC-SHA256
    #[default]
    #[serde(rename = "HS256")]
    Hs256,
    /// HMAC-SHA384
    #[serde(rename = "HS384")]
    Hs384,
    /// HMAC-SHA512
    #[serde(rename = "HS512")]
    Hs512,
}

impl Algorithm {
    /// Tag string for this algorithm.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Algorithm::LegacyMd5 => "md5",
            Algorithm::Hs256 => "HS256",
            Algorithm::Hs384 => "HS384",
            Algorithm::Hs512 => "HS512",
        }
    }

    /// Recommended minimum secret length in bytes.
    #[must_use]
    pub const fn recommended_key_size(self) -> usize {
        match self {
            Algorithm::LegacyMd5 => 16,
            Algorithm::Hs256 => 32, // 256 bits minimum
            Algorithm::Hs384 => 48, // 384 bits minimum
            Algorithm::Hs512 => 64, // 512 bits minimum
        }
    }

    /// Signature length in bytes.
    #[must_use]
    pub const fn signature_len(self) -> usize {
        match self {
            Algorithm::LegacyMd5 => 32,
            Algorithm::Hs256 => 32,
            Algorithm::Hs384 => 48,
            Algorithm::Hs512 => 64,
        }
    }

    /// Build this algorithm's encrypter seeded with `secret`.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] if the primitive rejects the key.
    pub fn encrypter(self, secret: &[u8]) -> JwtResult<Arc<dyn Encrypter>> {
        let encrypter: Arc<dyn Encrypter> = match self {
            Algorithm::LegacyMd5 => Arc::new(Md5Encrypter::new(secret)),
            Algorithm::Hs256 => Arc::new(HmacEncrypter::<Sha256>::new(secret)?),
            Algorithm::Hs384 => Arc::new(HmacEncrypter::<Sha384>::new(secret)?),
            Algorithm::Hs512 => Arc::new(HmacEncrypter::<Sha512>::new(secret)?),
        };
        Ok(encrypter)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md5" => Ok(Algorithm::LegacyMd5),
            "HS256" => Ok(Algorithm::Hs256),
            "HS384" => Ok(Algorithm::Hs384),
            "HS512" => Ok(Algorithm::Hs512),
            other => Err(JwtError::invalid_key(format!("unsupported algorithm: {other}"))),
        }
    }
}
