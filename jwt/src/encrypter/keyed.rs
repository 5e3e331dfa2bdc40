//! HMAC-based encrypters (HS256, HS384, HS512)

use super::{Algorithm, Encrypter};
use crate::error::{JwtError, JwtResult};
use digest::Digest;
use digest::core_api::BlockSizeUser;
use hmac::{Mac, SimpleHmac};
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;
use std::marker::PhantomData;
use zeroize::Zeroizing;

/// Digest usable as the hash inside [`HmacEncrypter`].
pub trait HmacDigest: Digest + BlockSizeUser + Clone + Send + Sync + 'static {
    /// Algorithm tag for HMAC over this digest.
    const ALGORITHM: Algorithm;
}

impl HmacDigest for Sha256 {
    const ALGORITHM: Algorithm = Algorithm::Hs256;
}

impl HmacDigest for Sha384 {
    const ALGORITHM: Algorithm = Algorithm::Hs384;
}

impl HmacDigest for Sha512 {
    const ALGORITHM: Algorithm = Algorithm::Hs512;
}

/// HMAC-SHA256 encrypter, the default for raw secrets.
pub type HmacSha256Encrypter = HmacEncrypter<Sha256>;
/// HMAC-SHA384 encrypter.
pub type HmacSha384Encrypter = HmacEncrypter<Sha384>;
/// HMAC-SHA512 encrypter.
pub type HmacSha512Encrypter = HmacEncrypter<Sha512>;

/// HMAC encrypter over digest `D`, keyed by a shared secret.
pub struct HmacEncrypter<D> {
    secret: Zeroizing<Vec<u8>>,
    _digest: PhantomData<fn() -> D>,
}

impl<D: HmacDigest> HmacEncrypter<D> {
    /// Create an encrypter holding a copy of `secret`.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidKey`] if HMAC rejects the key.
    pub fn new(secret: &[u8]) -> JwtResult<Self> {
        // Surface key errors here rather than on every signature.
        Self::keyed(secret)?;
        Ok(Self {
            secret: Zeroizing::new(secret.to_vec()),
            _digest: PhantomData,
        })
    }

    fn keyed(secret: &[u8]) -> JwtResult<SimpleHmac<D>> {
        SimpleHmac::<D>::new_from_slice(secret)
            .map_err(|_| JwtError::invalid_key(format!("Invalid {} key", D::ALGORITHM)))
    }
}

impl<D: HmacDigest> Encrypter for HmacEncrypter<D> {
    fn algorithm(&self) -> Algorithm {
        D::ALGORITHM
    }

    #[inline]
    fn signature(&self, input: &str) -> JwtResult<Vec<u8>> {
        let mut mac = Self::keyed(&self.secret)?;
        mac.update(input.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

impl<D> Clone for HmacEncrypter<D> {
    fn clone(&self) -> Self {
        Self {
            secret: self.secret.clone(),
            _digest: PhantomData,
        }
    }
}

impl<D: HmacDigest> fmt::Debug for HmacEncrypter<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacEncrypter")
            .field("algorithm", &D::ALGORITHM)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn hs256_known_answer() -> JwtResult<()> {
        let encrypter = HmacSha256Encrypter::new(b"key")?;
        assert_eq!(
            encrypter.signature(FOX)?,
            hex!("f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8")
        );
        Ok(())
    }

    #[test]
    fn hs512_known_answer() -> JwtResult<()> {
        let encrypter = HmacSha512Encrypter::new(b"key")?;
        assert_eq!(
            encrypter.signature(FOX)?,
            hex!(
                "b42af09057bac1e2d41708e48a902e09b5ff7f12ab428a4fe86653c73dd248fb"
                "82f948a549f7b791a5b41915ee4d1ec3935357e4e2317250d0372afa2ebeeb3a"
            )
        );
        Ok(())
    }

    #[test]
    fn check_accepts_only_the_exact_signature() -> JwtResult<()> {
        let encrypter = HmacSha256Encrypter::new(b"secret")?;
        let mut signature = encrypter.signature("header.payload")?;
        assert!(encrypter.check("header.payload", &signature));
        assert!(!encrypter.check("header.payloaD", &signature));
        assert!(!encrypter.check("header.payload", &signature[..31]));

        signature[31] ^= 0x01;
        assert!(!encrypter.check("header.payload", &signature));
        Ok(())
    }

    #[test]
    fn different_secrets_give_different_signatures() -> JwtResult<()> {
        let a = HmacSha256Encrypter::new(b"secret")?.signature("x.y")?;
        let b = HmacSha256Encrypter::new(b"secreT")?.signature("x.y")?;
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    fn debug_output_hides_the_secret() -> JwtResult<()> {
        let encrypter = HmacSha384Encrypter::new(b"hunter2")?;
        let rendered = format!("{encrypter:?}");
        assert!(rendered.contains("Hs384"));
        assert!(!rendered.contains("hunter2"));
        Ok(())
    }
}
