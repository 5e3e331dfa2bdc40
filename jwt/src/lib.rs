//! Compact signed tokens with pluggable encoders and signature strategies
//!
//! A token is three `.`-separated segments:
//! `encode(json(header)) . encode(json(payload)) . encode(signature)`.
//! The signature covers the literal `header.payload` text.
//!
//! - [`Encoder`] maps segment bytes to a token-safe string ([`Base64UrlEncoder`] by default)
//! - [`Encrypter`] signs and checks signatures (HMAC-SHA256 by default)
//! - [`Jwt`] builds [`Token`]s and verifies wire strings, failing closed
//!
//! The header's `alg` entry is informational only. Verification always uses
//! the encrypter the caller supplies.
//!
//! ```no_run
//! use serde_json::{Map, json};
//!
//! # fn main() -> simple_jwt::JwtResult<()> {
//! let mut payload = Map::new();
//! payload.insert("sub".to_string(), json!("42"));
//!
//! let wire = simple_jwt::build(Map::new(), payload, "secret", None)?.token()?;
//! let token = simple_jwt::decrypt(&wire, "secret", None)?;
//! assert_eq!(token.claim("sub"), Some(&json!("42")));
//! # Ok(())
//! # }
//! ```

mod codec;
mod config;
pub mod encoder;
pub mod encrypter;
mod error;
mod json;
mod token;

pub use codec::{DELIMITER, Jwt, build, decrypt};
pub use config::{CodecConfig, LEGACY_HEADER_ALG};
pub use encoder::{Base64UrlEncoder, Encoder, HexEncoder};
pub use encrypter::{
    Algorithm, Encrypter, HmacEncrypter, HmacSha256Encrypter, HmacSha384Encrypter,
    HmacSha512Encrypter, Md5Encrypter, Secret, format_encrypter,
};
pub use error::*;
pub use json::JsonFormat;
pub use token::{Header, Payload, Token, TokenBuilder};
