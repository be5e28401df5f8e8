//! In-memory document builders and a scripted OCR backend for tests.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use docx_rs::{Docx, Paragraph, Run};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::extraction::error::OcrError;
use crate::extraction::ocr::OcrBackend;

/// Builds a PDF with one page per entry. An empty entry yields a page with
/// no text layer at all, like a scanned page.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let operations = if text.is_empty() {
            vec![]
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Builds a DOCX whose body is exactly these paragraphs. An empty entry
/// becomes a paragraph with no runs.
pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        let paragraph = if text.is_empty() {
            Paragraph::new()
        } else {
            Paragraph::new().add_run(Run::new().add_text(*text))
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

enum Script {
    Recognize(String),
    FailRender,
}

/// OCR backend that records what it was asked to do and answers from a script.
pub struct ScriptedOcr {
    available: bool,
    script: Script,
    calls: Mutex<Vec<(u32, f32)>>,
    workdirs: Mutex<Vec<PathBuf>>,
}

impl ScriptedOcr {
    pub fn recognizing(text: &str) -> Self {
        Self {
            available: true,
            script: Script::Recognize(text.to_string()),
            calls: Mutex::new(Vec::new()),
            workdirs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_render() -> Self {
        Self {
            available: true,
            script: Script::FailRender,
            calls: Mutex::new(Vec::new()),
            workdirs: Mutex::new(Vec::new()),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::recognizing("should never be used")
        }
    }

    pub fn rendered_pages(&self) -> Vec<u32> {
        self.calls.lock().unwrap().iter().map(|(page, _)| *page).collect()
    }

    pub fn zooms(&self) -> Vec<f32> {
        self.calls.lock().unwrap().iter().map(|(_, zoom)| *zoom).collect()
    }

    /// Working directories handed to `rasterize_page`, in call order.
    pub fn workdirs(&self) -> Vec<PathBuf> {
        self.workdirs.lock().unwrap().clone()
    }
}

impl OcrBackend for ScriptedOcr {
    fn is_available(&self) -> bool {
        self.available
    }

    fn rasterize_page(
        &self,
        _pdf: &Path,
        page: u32,
        zoom: f32,
        workdir: &Path,
    ) -> Result<PathBuf, OcrError> {
        self.calls.lock().unwrap().push((page, zoom));
        self.workdirs.lock().unwrap().push(workdir.to_path_buf());
        match &self.script {
            Script::FailRender => Err(OcrError::Render {
                page,
                message: "renderer crashed".to_string(),
            }),
            Script::Recognize(_) => Ok(workdir.join(format!("page-{page}.png"))),
        }
    }

    fn recognize(&self, _image: &Path, _language: &str) -> Result<String, OcrError> {
        match &self.script {
            Script::Recognize(text) => Ok(text.clone()),
            Script::FailRender => Err(OcrError::Recognize("no image".to_string())),
        }
    }
}
