use crate::extraction::error::ExtractionError;

/// Strict UTF-8 decode of a plain-text upload.
pub(crate) fn decode_plain_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| ExtractionError::DecodeError(e.to_string()))
}
