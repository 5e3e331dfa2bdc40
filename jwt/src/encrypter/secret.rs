//! Secret normalization

use super::{Algorithm, Encrypter, HmacDigest, HmacEncrypter, Md5Encrypter};
use crate::error::JwtResult;
use std::fmt;
use std::sync::Arc;
use tracing::warn;
use zeroize::Zeroizing;

/// Either raw shared-secret bytes or an already constructed encrypter.
#[derive(Clone)]
pub enum Secret {
    /// Raw secret, turned into the default algorithm's encrypter.
    Raw(Zeroizing<Vec<u8>>),
    /// Encrypter used as is.
    Prebuilt(Arc<dyn Encrypter>),
}

impl Secret {
    /// Wrap a concrete encrypter.
    #[must_use]
    pub fn prebuilt(encrypter: impl Encrypter + 'static) -> Self {
        Secret::Prebuilt(Arc::new(encrypter))
    }

    /// Warn when a raw secret is shorter than `algorithm` recommends.
    pub(crate) fn warn_if_short(&self, algorithm: Algorithm) {
        if let Secret::Raw(bytes) = self {
            if bytes.len() < algorithm.recommended_key_size() {
                warn!(
                    algorithm = %algorithm,
                    key_len = bytes.len(),
                    recommended = algorithm.recommended_key_size(),
                    "Secret is shorter than recommended"
                );
            }
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Secret::Raw(bytes) => f
                .debug_struct("Raw")
                .field("len", &bytes.len())
                .finish_non_exhaustive(),
            Secret::Prebuilt(encrypter) => f.debug_tuple("Prebuilt").field(encrypter).finish(),
        }
    }
}

impl From<&str> for Secret {
    fn from(secret: &str) -> Self {
        Secret::Raw(Zeroizing::new(secret.as_bytes().to_vec()))
    }
}

impl From<String> for Secret {
    fn from(secret: String) -> Self {
        Secret::Raw(Zeroizing::new(secret.into_bytes()))
    }
}

impl From<&String> for Secret {
    fn from(secret: &String) -> Self {
        Secret::from(secret.as_str())
    }
}

impl From<&[u8]> for Secret {
    fn from(secret: &[u8]) -> Self {
        Secret::Raw(Zeroizing::new(secret.to_vec()))
    }
}

impl<const N: usize> From<&[u8; N]> for Secret {
    fn from(secret: &[u8; N]) -> Self {
        Secret::Raw(Zeroizing::new(secret.to_vec()))
    }
}

impl From<Vec<u8>> for Secret {
    fn from(secret: Vec<u8>) -> Self {
        Secret::Raw(Zeroizing::new(secret))
    }
}

impl From<Arc<dyn Encrypter>> for Secret {
    fn from(encrypter: Arc<dyn Encrypter>) -> Self {
        Secret::Prebuilt(encrypter)
    }
}

impl<T: Encrypter + 'static> From<Arc<T>> for Secret {
    fn from(encrypter: Arc<T>) -> Self {
        Secret::Prebuilt(encrypter)
    }
}

impl<D: HmacDigest> From<HmacEncrypter<D>> for Secret {
    fn from(encrypter: HmacEncrypter<D>) -> Self {
        Secret::prebuilt(encrypter)
    }
}

impl From<Md5Encrypter> for Secret {
    fn from(encrypter: Md5Encrypter) -> Self {
        Secret::prebuilt(encrypter)
    }
}

/// Resolve a secret into a concrete encrypter.
///
/// Prebuilt encrypters are returned unchanged; raw secrets seed `default`.
/// Nothing is logged here, since verification resolves a secret per token;
/// [`crate::Jwt`] reports short secrets when it signs.
///
/// # Errors
/// Returns [`crate::JwtError::InvalidKey`] if the default algorithm rejects the key.
pub fn format_encrypter(
    secret: impl Into<Secret>,
    default: Algorithm,
) -> JwtResult<Arc<dyn Encrypter>> {
    match secret.into() {
        Secret::Prebuilt(encrypter) => Ok(encrypter),
        Secret::Raw(bytes) => default.encrypter(&bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encrypter::HmacSha512Encrypter;

    #[test]
    fn raw_secret_uses_the_default_algorithm() -> JwtResult<()> {
        let encrypter = format_encrypter("secret", Algorithm::Hs384)?;
        assert_eq!(encrypter.algorithm(), Algorithm::Hs384);
        Ok(())
    }

    #[test]
    fn prebuilt_encrypter_is_returned_unchanged() -> JwtResult<()> {
        let prebuilt: Arc<dyn Encrypter> = Arc::new(Md5Encrypter::new(b"secret"));
        let resolved = format_encrypter(Arc::clone(&prebuilt), Algorithm::Hs256)?;
        assert!(Arc::ptr_eq(&prebuilt, &resolved));
        assert_eq!(resolved.algorithm(), Algorithm::LegacyMd5);
        Ok(())
    }

    #[test]
    fn concrete_arc_is_kept_as_prebuilt() -> JwtResult<()> {
        let concrete = Arc::new(HmacSha512Encrypter::new(b"secret")?);
        let secret = Secret::from(Arc::clone(&concrete));
        assert!(matches!(secret, Secret::Prebuilt(_)));

        let resolved = format_encrypter(secret, Algorithm::LegacyMd5)?;
        assert_eq!(resolved.algorithm(), Algorithm::Hs512);
        assert_eq!(resolved.signature("a.b")?, concrete.signature("a.b")?);
        Ok(())
    }

    #[test]
    fn byte_and_string_secrets_sign_identically() -> JwtResult<()> {
        let from_str = format_encrypter("secret", Algorithm::Hs256)?;
        let from_bytes = format_encrypter(b"secret", Algorithm::Hs256)?;
        let from_vec = format_encrypter(b"secret".to_vec(), Algorithm::Hs256)?;
        let expected = from_str.signature("a.b")?;
        assert_eq!(from_bytes.signature("a.b")?, expected);
        assert_eq!(from_vec.signature("a.b")?, expected);
        Ok(())
    }

    #[test]
    fn debug_output_hides_raw_bytes() {
        let rendered = format!("{:?}", Secret::from("hunter2"));
        assert!(rendered.contains("len"));
        assert!(!rendered.contains("hunter2"));
    }
}
