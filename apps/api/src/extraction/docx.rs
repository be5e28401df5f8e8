use docx_rs::{read_docx, DocumentChild, ParagraphChild, Run, RunChild};

use crate::extraction::error::ExtractionError;

/// Body paragraphs in document order, each followed by a newline.
///
/// Empty paragraphs still contribute their line break. Tables, headers and
/// footers are not part of the body paragraph list and are skipped.
pub(crate) fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = read_docx(bytes)
        .map_err(|e| ExtractionError::UnreadableFile(format!("DOCX parse failed: {e}")))?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            push_paragraph_children(&paragraph.children, &mut text);
            text.push('\n');
        }
    }
    Ok(text)
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
