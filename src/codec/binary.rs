//! Base64 transport for byte blobs.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::LoadError;

/// Decodes base64 scalar text. ASCII whitespace is ignored, since the
/// text engine may deliver the scalar folded over several lines.
pub fn decode(text: &str, tag: &str) -> Result<Vec<u8>, LoadError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| LoadError::MalformedScalar {
            tag: tag.to_string(),
            detail: e.to_string(),
        })
}

pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
