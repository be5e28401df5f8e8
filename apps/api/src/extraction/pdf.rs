use std::panic;

use crate::extraction::error::ExtractionError;

/// Primary text-layer extraction. Non-empty pages are concatenated, each
/// followed by a newline.
///
/// `pdf-extract` can panic on malformed input; a panic is reported as an
/// unreadable file like any other decoder failure.
pub(crate) fn extract_text_layer(bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractionError::UnreadableFile("PDF decoder panicked".to_string()))?
        .map_err(|e| ExtractionError::UnreadableFile(format!("PDF parse failed: {e}")))?;

    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    let mut text = String::new();
    for page in pages.into_iter().filter(|page| !page.is_empty()) {
        text.push_str(&page);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::fixtures::pdf_with_pages;

    #[test]
    fn test_join_pages_skips_empty_pages() {
        let pages = vec!["Angular".to_string(), String::new(), "Svelte".to_string()];
        assert_eq!(join_pages(pages), "Angular\nSvelte\n");
    }

    #[test]
    fn test_multi_page_text_layer_in_order() {
        let pdf = pdf_with_pages(&["Kotlin developer", "Swift developer"]);
        let text = extract_text_layer(&pdf).unwrap();

        let kotlin = text.find("Kotlin").unwrap();
        let swift = text.find("Swift").unwrap();
        assert!(kotlin < swift);
    }

    #[test]
    fn test_truncated_pdf_is_unreadable() {
        let pdf = pdf_with_pages(&["Ruby on Rails"]);
        let result = extract_text_layer(&pdf[..pdf.len() / 3]);
        assert!(matches!(result, Err(ExtractionError::UnreadableFile(_))));
    }
}
