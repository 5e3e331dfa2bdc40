//! Legacy MD5 encrypter
//!
//! Signs with `hex(md5(input || secret))`. This is a secret-suffix hash, not
//! an HMAC, and MD5 is broken. It only exists so tokens issued by older
//! deployments can still be produced and verified; use [`super::HmacEncrypter`]
//! for anything new.

use super::{Algorithm, Encrypter};
use crate::error::JwtResult;
use md5::{Digest, Md5};
use std::fmt;
use zeroize::Zeroizing;

/// Legacy `md5(input || secret)` encrypter.
#[derive(Clone)]
pub struct Md5Encrypter {
    secret: Zeroizing<Vec<u8>>,
}

impl Md5Encrypter {
    /// Create an encrypter holding a copy of `secret`.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: Zeroizing::new(secret.to_vec()),
        }
    }
}

impl Encrypter for Md5Encrypter {
    fn algorithm(&self) -> Algorithm {
        Algorithm::LegacyMd5
    }

    fn signature(&self, input: &str) -> JwtResult<Vec<u8>> {
        let mut hasher = Md5::new();
        hasher.update(input.as_bytes());
        hasher.update(self.secret.as_slice());
        // Older tokens carry the hex digest text, not the raw digest.
        Ok(hex::encode(hasher.finalize()).into_bytes())
    }
}

impl fmt::Debug for Md5Encrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5Encrypter").finish_non_exhaustive()
    }
}
