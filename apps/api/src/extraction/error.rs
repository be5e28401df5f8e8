use thiserror::Error;

/// Why extraction produced less than the document holds.
///
/// None of these abort the pipeline: the outcome still carries a (possibly
/// empty) text and the caller decides whether to continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Unreadable file: {0}")]
    UnreadableFile(String),

    #[error("OCR is not available on this host")]
    OcrUnavailable,

    #[error("Text is not valid UTF-8: {0}")]
    DecodeError(String),
}

impl ExtractionError {
    /// Stable machine-readable code used in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionError::UnreadableFile(_) => "UNREADABLE_FILE",
            ExtractionError::OcrUnavailable => "OCR_UNAVAILABLE",
            ExtractionError::DecodeError(_) => "DECODE_ERROR",
        }
    }
}

/// Failures inside the OCR pass. Never surfaced to callers: any of these
/// means "OCR produced nothing" and the primary text is kept.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Failed to reopen PDF for OCR: {0}")]
    Reopen(String),

    #[error("Failed to render page {page}: {message}")]
    Render { page: u32, message: String },

    #[error("Text recognition failed: {0}")]
    Recognize(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
