//! JSON text for header and payload segments
//!
//! The signature covers the encoded JSON text, so the exact bytes matter.
//! [`JsonFormat::Php`] writes what PHP's `json_encode` writes for decoded
//! associative arrays, which is what older deployments signed.

use crate::error::{JwtError, JwtResult};
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::{Map, Value};
use std::io;

/// How header and payload maps are written and read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonFormat {
    /// Compact serde_json output.
    #[default]
    Standard,
    /// PHP `json_encode` output: `/` escaped as `\/`, non-ASCII as lowercase
    /// `\uXXXX`, and maps with keys `"0".."n-1"` (including empty maps)
    /// written as lists. Top-level lists read back as index-keyed maps.
    Php,
}

impl JsonFormat {
    /// Serialize a header or payload map.
    ///
    /// # Errors
    /// Returns [`JwtError::Serialization`] if the map cannot be written.
    pub fn to_vec(self, map: &Map<String, Value>) -> JwtResult<Vec<u8>> {
        match self {
            JsonFormat::Standard => Ok(serde_json::to_vec(map)?),
            JsonFormat::Php => {
                let value = php_array(Value::Object(map.clone()));
                let mut out = Vec::new();
                let mut serializer = serde_json::Serializer::with_formatter(&mut out, PhpFormatter);
                value.serialize(&mut serializer)?;
                Ok(out)
            }
        }
    }

    /// Parse a verified segment into a map.
    ///
    /// # Errors
    /// Returns [`JwtError::InvalidToken`] for invalid JSON or a value this
    /// format cannot read as a map.
    pub fn from_slice(self, bytes: &[u8], what: &str) -> JwtResult<Map<String, Value>> {
        let value = serde_json::from_slice::<Value>(bytes)
            .map_err(|e| JwtError::invalid_token(format!("{what} is not valid JSON: {e}")))?;
        match (self, value) {
            (_, Value::Object(map)) => Ok(map),
            (JsonFormat::Php, Value::Array(items)) => Ok(items
                .into_iter()
                .enumerate()
                .map(|(index, item)| (index.to_string(), item))
                .collect()),
            _ => Err(JwtError::invalid_token(format!("{what} is not a JSON object"))),
        }
    }
}

// PHP arrays with keys 0..n-1 in order are lists.
fn php_array(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let is_list = map
                .keys()
                .enumerate()
                .all(|(index, key)| *key == index.to_string());
            if is_list {
                Value::Array(map.into_iter().map(|(_, item)| php_array(item)).collect())
            } else {
                Value::Object(
                    map.into_iter()
                        .map(|(key, item)| (key, php_array(item)))
                        .collect(),
                )
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(php_array).collect()),
        other => other,
    }
}

/// Compact output with PHP's default string escaping.
struct PhpFormatter;

impl Formatter for PhpFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if ch != '/' && ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            if ch == '/' {
                writer.write_all(b"\\/")?;
            } else {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
