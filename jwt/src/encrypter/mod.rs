//! Signature strategies
//!
//! An [`Encrypter`] signs the `header.payload` signing input and checks
//! candidate signatures against it. Raw secrets are turned into an encrypter
//! by [`format_encrypter`] using an [`Algorithm`].

mod algorithm;
mod keyed;
mod legacy;
mod secret;

pub use algorithm::Algorithm;
pub use keyed::{
    HmacDigest, HmacEncrypter, HmacSha256Encrypter, HmacSha384Encrypter, HmacSha512Encrypter,
};
pub use legacy::Md5Encrypter;
pub use secret::{Secret, format_encrypter};

use crate::error::JwtResult;
use std::fmt::Debug;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Signing and verification strategy keyed by a secret.
///
/// Implementations must be deterministic: the same input under the same
/// secret always yields the same signature.
pub trait Encrypter: Send + Sync + Debug {
    /// Algorithm implemented by this encrypter.
    fn algorithm(&self) -> Algorithm;

    /// Compute the signature over `input`.
    ///
    /// # Errors
    /// Returns [`crate::JwtError::InvalidKey`] if the primitive rejects the key.
    fn signature(&self, input: &str) -> JwtResult<Vec<u8>>;

    /// Check `candidate` against the recomputed signature of `input`.
    ///
    /// Bytes are compared in constant time over the full length; only the
    /// (public) length may short-circuit. Signing failures count as a mismatch.
    fn check(&self, input: &str, candidate: &[u8]) -> bool {
        match self.signature(input) {
            Ok(expected) => constant_time_eq(&expected, candidate),
            Err(_) => false,
        }
    }
}

impl<T: Encrypter + ?Sized> Encrypter for Arc<T> {
    fn algorithm(&self) -> Algorithm {
        (**self).algorithm()
    }

    fn signature(&self, input: &str) -> JwtResult<Vec<u8>> {
        (**self).signature(input)
    }

    fn check(&self, input: &str, candidate: &[u8]) -> bool {
        (**self).check(input, candidate)
    }
}

impl<T: Encrypter + ?Sized> Encrypter for Box<T> {
    fn algorithm(&self) -> Algorithm {
        (**self).algorithm()
    }

    fn signature(&self, input: &str) -> JwtResult<Vec<u8>> {
        (**self).signature(input)
    }

    fn check(&self, input: &str, candidate: &[u8]) -> bool {
        (**self).check(input, candidate)
    }
}

/// Constant-time comparison for cryptographic security
#[inline]
pub(crate) fn constant_time_eq(expected: &[u8], candidate: &[u8]) -> bool {
    expected.ct_eq(candidate).into()
}
