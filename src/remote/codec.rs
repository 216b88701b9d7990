use crate::error::{CatalogError, CatalogResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Encode text for the contents API. The UTF-8 bytes are encoded, so
/// multi-byte characters survive the round trip.
pub fn to_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode a contents API payload. GitHub wraps the payload every 60
/// characters, so all ASCII whitespace is dropped before decoding.
pub fn from_base64(path: &str, encoded: &str) -> CatalogResult<String> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|err| CatalogError::corrupt(path, format!("invalid base64: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| CatalogError::corrupt(path, format!("content is not UTF-8: {err}")))
}
