//! OCR escalation for image-only PDFs.
//!
//! The escalation pass re-opens the PDF with `lopdf`, retries direct text per
//! page, and only rasterizes + recognizes pages that still have no text.
//! Rendering and recognition sit behind [`OcrBackend`]; the production
//! backend shells out to poppler's `pdftoppm` and `tesseract`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::extraction::error::OcrError;
use crate::extraction::ExtractionConfig;

/// Base resolution of PDF user space; zoom 2.0 renders at 144 dpi.
const PDF_BASE_DPI: f32 = 72.0;

/// Rasterization and text recognition. Implementations block; call them
/// from a blocking context.
pub trait OcrBackend: Send + Sync {
    /// Whether the tools this backend needs are present. Checked once per
    /// extraction call.
    fn is_available(&self) -> bool;

    /// Renders page `page` (1-based) of `pdf` into an image under `workdir`
    /// and returns the image path.
    fn rasterize_page(
        &self,
        pdf: &Path,
        page: u32,
        zoom: f32,
        workdir: &Path,
    ) -> Result<PathBuf, OcrError>;

    fn recognize(&self, image: &Path, language: &str) -> Result<String, OcrError>;
}

/// `pdftoppm` + `tesseract` command-line backend.
#[derive(Debug, Default, Clone)]
pub struct TesseractCli;

impl TesseractCli {
    pub fn new() -> Self {
        Self
    }
}

impl OcrBackend for TesseractCli {
    fn is_available(&self) -> bool {
        let pdftoppm = which::which("pdftoppm").is_ok();
        let tesseract = which::which("tesseract").is_ok();

        if !pdftoppm {
            debug!("pdftoppm not found - install poppler-utils for OCR support");
        }
        if !tesseract {
            debug!("tesseract not found - install tesseract-ocr for OCR support");
        }

        pdftoppm && tesseract
    }

    fn rasterize_page(
        &self,
        pdf: &Path,
        page: u32,
        zoom: f32,
        workdir: &Path,
    ) -> Result<PathBuf, OcrError> {
        let dpi = (PDF_BASE_DPI * zoom).round().max(1.0) as u32;
        let prefix = workdir.join(format!("page-{page}"));

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-f")
            .arg(page.to_string())
            .arg("-l")
            .arg(page.to_string())
            .arg("-singlefile")
            .arg(pdf)
            .arg(&prefix)
            .output()
            .map_err(|e| OcrError::Render {
                page,
                message: format!("failed to run pdftoppm: {e}"),
            })?;

        if !output.status.success() {
            return Err(OcrError::Render {
                page,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(prefix.with_extension("png"))
    }

    fn recognize(&self, image: &Path, language: &str) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .map_err(|e| OcrError::Recognize(format!("failed to run tesseract: {e}")))?;

        if !output.status.success() {
            return Err(OcrError::Recognize(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Runs the OCR pass over every page (up to `ocr_max_pages`).
///
/// Pages whose direct text is non-empty use it as-is; the rest are rendered
/// at `ocr_zoom` and recognized. Non-empty page results are concatenated,
/// each followed by a newline. The temporary directory holding the PDF copy
/// and page images is removed when this function returns, on every path.
pub(crate) fn run_ocr_pass(
    bytes: &[u8],
    config: &ExtractionConfig,
    backend: &dyn OcrBackend,
) -> Result<String, OcrError> {
    let document =
        lopdf::Document::load_mem(bytes).map_err(|e| OcrError::Reopen(e.to_string()))?;

    let workdir = tempfile::tempdir()?;
    let pdf_path = workdir.path().join("source.pdf");
    std::fs::write(&pdf_path, bytes)?;

    let page_limit = config.ocr_max_pages.unwrap_or(usize::MAX);
    let mut text = String::new();
    let mut rendered = 0usize;

    for (page_number, _) in document.get_pages().into_iter().take(page_limit) {
        let direct = document.extract_text(&[page_number]).unwrap_or_default();

        let page_text = if direct.trim().is_empty() {
            rendered += 1;
            let image =
                backend.rasterize_page(&pdf_path, page_number, config.ocr_zoom, workdir.path())?;
            backend.recognize(&image, &config.ocr_language)?
        } else {
            direct
        };

        if !page_text.trim().is_empty() {
            text.push_str(&page_text);
            text.push('\n');
        }
    }

    info!(
        "OCR pass finished: {} pages rendered, {} chars recovered",
        rendered,
        text.trim().chars().count()
    );
    Ok(text)
}

/// Runs [`run_ocr_pass`] and folds every failure into `None`.
pub(crate) fn try_ocr(
    bytes: &[u8],
    config: &ExtractionConfig,
    backend: &dyn OcrBackend,
) -> Option<String> {
    match run_ocr_pass(bytes, config, backend) {
        Ok(text) if !text.trim().is_empty() => Some(text),
        Ok(_) => None,
        Err(e) => {
            warn!("OCR pass abandoned: {e}");
            None
        }
    }
}
