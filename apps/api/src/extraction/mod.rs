//! Document Text Extractor: PDF / DOCX / plain text bytes to a text string.
//!
//! Extraction never fails outright. Every outcome carries a text (possibly
//! empty) and, when something went wrong, an [`ExtractionError`] kind so the
//! caller can decide whether to continue.

pub mod docx;
pub mod error;
pub mod ocr;
pub mod pdf;
pub mod text;

#[cfg(test)]
pub mod fixtures;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use error::ExtractionError;
pub use ocr::{OcrBackend, TesseractCli};

/// Default minimum length (in characters, after trimming) a PDF text layer
/// must reach before it is trusted without OCR.
pub const DEFAULT_OCR_MIN_TEXT_CHARS: usize = 50;
/// Default rasterization zoom relative to the 72 dpi PDF base.
pub const DEFAULT_OCR_ZOOM: f32 = 2.0;
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Infers the format from a file name extension, case-insensitively.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        extension.parse().ok()
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            other => Err(format!("Unsupported document format: {other}")),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        };
        f.write_str(name)
    }
}

/// Tunables for the OCR escalation decision and the OCR pass itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionConfig {
    /// A PDF whose trimmed text layer has strictly fewer characters than this
    /// is treated as image-based.
    pub ocr_min_text_chars: usize,
    /// Linear zoom applied when rasterizing a page for OCR.
    pub ocr_zoom: f32,
    /// Tesseract language code.
    pub ocr_language: String,
    /// Upper bound on pages visited by the OCR pass; `None` visits all pages.
    pub ocr_max_pages: Option<usize>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ocr_min_text_chars: DEFAULT_OCR_MIN_TEXT_CHARS,
            ocr_zoom: DEFAULT_OCR_ZOOM,
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            ocr_max_pages: None,
        }
    }
}

/// Result of one extraction: text plus an optional degradation signal.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub format: DocumentFormat,
    pub text: String,
    pub error: Option<ExtractionError>,
    /// True when the returned text came from the OCR pass.
    pub ocr_used: bool,
}

impl ExtractionOutcome {
    fn extracted(format: DocumentFormat, text: String) -> Self {
        Self {
            format,
            text,
            error: None,
            ocr_used: false,
        }
    }

    fn failed(format: DocumentFormat, error: ExtractionError) -> Self {
        Self {
            format,
            text: String::new(),
            error: Some(error),
            ocr_used: false,
        }
    }

    /// True when nothing but whitespace was extracted.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Whether a PDF text layer is too sparse to trust. Strict: exactly
/// `min_chars` characters is enough.
pub fn needs_ocr(text: &str, min_chars: usize) -> bool {
    text.trim().chars().count() < min_chars
}

/// Converts raw document bytes to text, escalating sparse PDFs to OCR.
pub struct DocumentTextExtractor {
    config: ExtractionConfig,
    ocr: Arc<dyn OcrBackend>,
}

impl DocumentTextExtractor {
    pub fn new(config: ExtractionConfig, ocr: Arc<dyn OcrBackend>) -> Self {
        Self { config, ocr }
    }

    pub fn ocr_available(&self) -> bool {
        self.ocr.is_available()
    }

    /// Blocking. Runs the format-specific decoder and, for PDFs, the OCR
    /// escalation decision.
    pub fn extract(&self, bytes: &[u8], format: DocumentFormat) -> ExtractionOutcome {
        let outcome = match format {
            DocumentFormat::Pdf => match pdf::extract_text_layer(bytes) {
                Ok(text) => self.escalate_if_sparse(bytes, text),
                Err(e) => ExtractionOutcome::failed(format, e),
            },
            DocumentFormat::Docx => match docx::extract_docx_text(bytes) {
                Ok(text) => ExtractionOutcome::extracted(format, text),
                Err(e) => ExtractionOutcome::failed(format, e),
            },
            DocumentFormat::Txt => match text::decode_plain_text(bytes) {
                Ok(text) => ExtractionOutcome::extracted(format, text),
                Err(e) => ExtractionOutcome::failed(format, e),
            },
        };

        match &outcome.error {
            Some(e) => info!("Extracted {} chars from {} ({})", outcome.char_count(), format, e),
            None => debug!("Extracted {} chars from {}", outcome.char_count(), format),
        }
        outcome
    }

    /// Decides whether a PDF's primary text is too sparse and, if so, whether
    /// OCR can replace it. OCR output replaces the primary text wholesale.
    fn escalate_if_sparse(&self, bytes: &[u8], primary: String) -> ExtractionOutcome {
        let format = DocumentFormat::Pdf;
        if !needs_ocr(&primary, self.config.ocr_min_text_chars) {
            return ExtractionOutcome::extracted(format, primary);
        }

        if !self.ocr.is_available() {
            debug!("PDF text layer is sparse but OCR is unavailable; keeping primary text");
            return ExtractionOutcome {
                format,
                text: primary,
                error: Some(ExtractionError::OcrUnavailable),
                ocr_used: false,
            };
        }

        info!(
            "PDF text layer has {} chars (< {}), escalating to OCR",
            primary.trim().chars().count(),
            self.config.ocr_min_text_chars
        );
        match ocr::try_ocr(bytes, &self.config, self.ocr.as_ref()) {
            Some(text) => ExtractionOutcome {
                format,
                text,
                error: None,
                ocr_used: true,
            },
            None => ExtractionOutcome::extracted(format, primary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fixtures::{docx_with_paragraphs, pdf_with_pages, ScriptedOcr};

    const TEXT_LAYER: &str = "Senior Python developer with Rust, Docker and Kubernetes experience";

    fn extractor(ocr: ScriptedOcr) -> (DocumentTextExtractor, Arc<ScriptedOcr>) {
        let ocr = Arc::new(ocr);
        let extractor = DocumentTextExtractor::new(ExtractionConfig::default(), ocr.clone());
        (extractor, ocr)
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(DocumentFormat::from_file_name("resume.PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_file_name("jd.v2.docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_file_name("notes.txt"), Some(DocumentFormat::Txt));
        assert_eq!(DocumentFormat::from_file_name("photo.png"), None);
        assert_eq!(DocumentFormat::from_file_name("README"), None);
    }

    #[test]
    fn test_format_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&DocumentFormat::Docx).unwrap(), r#""docx""#);
        let parsed: DocumentFormat = serde_json::from_str(r#""pdf""#).unwrap();
        assert_eq!(parsed, DocumentFormat::Pdf);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let exactly_fifty = "a".repeat(50);
        let forty_nine = "a".repeat(49);
        assert!(!needs_ocr(&exactly_fifty, 50));
        assert!(needs_ocr(&forty_nine, 50));
        assert!(needs_ocr(&format!("   {forty_nine}\n\n"), 50));
    }

    #[test]
    fn test_text_at_threshold_skips_ocr() {
        let (extractor, ocr) = extractor(ScriptedOcr::recognizing("ocr text"));
        let primary = "x".repeat(DEFAULT_OCR_MIN_TEXT_CHARS);

        let outcome = extractor.escalate_if_sparse(&pdf_with_pages(&[""]), primary.clone());

        assert_eq!(outcome.text, primary);
        assert!(!outcome.ocr_used);
        assert!(ocr.rendered_pages().is_empty());
    }

    #[test]
    fn test_sparse_text_is_replaced_by_ocr() {
        let (extractor, _) = extractor(ScriptedOcr::recognizing("Terraform and Azure"));

        let outcome = extractor.escalate_if_sparse(&pdf_with_pages(&[""]), "Page 1".to_string());

        assert_eq!(outcome.text, "Terraform and Azure\n");
        assert!(outcome.ocr_used);
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_failed_ocr_keeps_primary_text() {
        let (extractor, _) = extractor(ScriptedOcr::failing_render());

        let outcome = extractor.escalate_if_sparse(&pdf_with_pages(&[""]), "Page 1".to_string());

        assert_eq!(outcome.text, "Page 1");
        assert!(!outcome.ocr_used);
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_text_layer_pdf_is_not_escalated() {
        let (extractor, ocr) = extractor(ScriptedOcr::recognizing("ocr text"));

        let outcome = extractor.extract(&pdf_with_pages(&[TEXT_LAYER]), DocumentFormat::Pdf);

        assert!(outcome.text.contains("Python developer"));
        assert!(!outcome.ocr_used);
        assert_eq!(outcome.error, None);
        assert!(ocr.rendered_pages().is_empty());
    }

    #[test]
    fn test_image_only_pdf_without_ocr_returns_empty_text() {
        let (extractor, _) = extractor(ScriptedOcr::unavailable());

        let outcome = extractor.extract(&pdf_with_pages(&["", ""]), DocumentFormat::Pdf);

        assert_eq!(outcome.text.trim(), "");
        assert!(!outcome.ocr_used);
        assert_eq!(outcome.error, Some(ExtractionError::OcrUnavailable));
    }

    #[test]
    fn test_image_only_pdf_with_ocr_uses_recognized_text() {
        let (extractor, ocr) = extractor(ScriptedOcr::recognizing("Machine learning with PyTorch"));

        let outcome = extractor.extract(&pdf_with_pages(&["", ""]), DocumentFormat::Pdf);

        assert_eq!(
            outcome.text,
            "Machine learning with PyTorch\nMachine learning with PyTorch\n"
        );
        assert!(outcome.ocr_used);
        assert_eq!(ocr.rendered_pages(), vec![1, 2]);
    }

    #[test]
    fn test_garbage_pdf_is_unreadable() {
        let (extractor, _) = extractor(ScriptedOcr::recognizing("ocr text"));

        let outcome = extractor.extract(b"definitely not a pdf", DocumentFormat::Pdf);

        assert_eq!(outcome.text, "");
        assert!(matches!(outcome.error, Some(ExtractionError::UnreadableFile(_))));
    }

    #[test]
    fn test_docx_extraction() {
        let (extractor, _) = extractor(ScriptedOcr::unavailable());
        let bytes = docx_with_paragraphs(&["Backend Engineer", "Go, gRPC, PostgreSQL"]);

        let outcome = extractor.extract(&bytes, DocumentFormat::Docx);

        assert_eq!(outcome.text, "Backend Engineer\nGo, gRPC, PostgreSQL\n");
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_invalid_utf8_text_is_decode_error() {
        let (extractor, _) = extractor(ScriptedOcr::unavailable());

        let outcome = extractor.extract(&[0xc3, 0x28], DocumentFormat::Txt);

        assert_eq!(outcome.text, "");
        assert_eq!(outcome.error.as_ref().map(ExtractionError::code), Some("DECODE_ERROR"));
    }
}
