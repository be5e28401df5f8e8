use std::collections::HashMap;

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::pipeline::{build_report, AnalysisReport, DocumentAnalysis};
use crate::errors::AppError;
use crate::extraction::{DocumentFormat, ExtractionOutcome};
use crate::skills::dictionary::SkillDictionary;
use crate::skills::gap::{analyze_gap, GapResult};
use crate::skills::matcher::{extract_skills, SkillMap};
use crate::state::AppState;

/// One uploaded file part.
struct Upload {
    file_name: Option<String>,
    data: Bytes,
}

/// Multipart form split into file parts and plain text fields.
#[derive(Default)]
struct UploadForm {
    files: HashMap<String, Upload>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let data = field.bytes().await.map_err(multipart_error)?;
                    form.files.insert(
                        name,
                        Upload {
                            file_name: Some(file_name),
                            data,
                        },
                    );
                }
                None => {
                    let value = field.text().await.map_err(multipart_error)?;
                    form.fields.insert(name, value);
                }
            }
        }
        Ok(form)
    }

    fn take_file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

/// An explicit `format` wins over the file name extension.
fn resolve_format(upload: &Upload, explicit: Option<&str>) -> Result<DocumentFormat, AppError> {
    if let Some(format) = explicit.filter(|f| !f.trim().is_empty()) {
        return format.parse().map_err(AppError::Validation);
    }
    upload
        .file_name
        .as_deref()
        .and_then(DocumentFormat::from_file_name)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Unsupported file type '{}'; expected pdf, docx or txt",
                upload.file_name.as_deref().unwrap_or_default()
            ))
        })
}

/// Runs the blocking extractor off the async runtime. PDFs hold an OCR
/// permit for the duration since they may rasterize and recognize pages.
async fn extract_upload(
    state: &AppState,
    upload: Upload,
    format: DocumentFormat,
) -> Result<ExtractionOutcome, AppError> {
    let _permit = match format {
        DocumentFormat::Pdf => Some(
            state
                .ocr_permits
                .clone()
                .acquire_owned()
                .await
                .context("OCR permit pool closed")?,
        ),
        _ => None,
    };

    let extractor = state.extractor.clone();
    let outcome = tokio::task::spawn_blocking(move || extractor.extract(&upload.data, format))
        .await
        .context("Extraction task failed")?;
    Ok(outcome)
}

#[derive(Debug, Serialize)]
pub struct ExtractionErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub format: DocumentFormat,
    pub text: String,
    pub char_count: usize,
    pub ocr_used: bool,
    pub error: Option<ExtractionErrorBody>,
}

impl From<ExtractionOutcome> for ExtractResponse {
    fn from(outcome: ExtractionOutcome) -> Self {
        Self {
            char_count: outcome.char_count(),
            error: outcome.error.map(|e| ExtractionErrorBody {
                code: e.code(),
                message: e.to_string(),
            }),
            format: outcome.format,
            text: outcome.text,
            ocr_used: outcome.ocr_used,
        }
    }
}

/// POST /api/v1/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let upload = form
        .take_file("file")
        .ok_or_else(|| AppError::Validation("Missing 'file' upload".to_string()))?;
    let format = resolve_format(&upload, form.fields.get("format").map(String::as_str))?;

    let outcome = extract_upload(&state, upload, format).await?;
    Ok(Json(ExtractResponse::from(outcome)))
}

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    pub text: String,
}

/// POST /api/v1/skills
pub async fn handle_skills(
    State(state): State<AppState>,
    Json(req): Json<SkillsRequest>,
) -> Json<SkillMap> {
    Json(extract_skills(&req.text, &state.dictionary))
}

#[derive(Debug, Deserialize)]
pub struct GapRequest {
    pub resume: SkillMap,
    pub job: SkillMap,
}

/// POST /api/v1/gap
///
/// Skill maps that break the matcher's output shape (empty categories,
/// zero counts, non-lowercase names) are a 400, like any malformed body.
pub async fn handle_gap(
    payload: Result<Json<GapRequest>, JsonRejection>,
) -> Result<Json<GapResult>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(Json(analyze_gap(&req.resume, &req.job)))
}

/// GET /api/v1/dictionary
pub async fn handle_dictionary(State(state): State<AppState>) -> Json<SkillDictionary> {
    Json(state.dictionary.as_ref().clone())
}

/// Rejects a document that yielded no text, naming the extraction error if any.
fn require_text(label: &str, outcome: &ExtractionOutcome) -> Result<(), AppError> {
    if !outcome.is_blank() {
        return Ok(());
    }
    let reason = outcome
        .error
        .as_ref()
        .map(|e| format!(" ({}: {e})", e.code()))
        .unwrap_or_default();
    Err(AppError::UnprocessableEntity(format!(
        "No text could be extracted from the {label}{reason}"
    )))
}

/// POST /api/v1/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut form = UploadForm::read(multipart).await?;

    let resume_upload = form
        .take_file("resume")
        .ok_or_else(|| AppError::Validation("Missing 'resume' upload".to_string()))?;
    let resume_format = resolve_format(
        &resume_upload,
        form.fields.get("resume_format").map(String::as_str),
    )?;

    // Validate the job side before spending time on extraction.
    let job_upload = form.take_file("job");
    let job_format = job_upload
        .as_ref()
        .map(|upload| resolve_format(upload, form.fields.get("job_format").map(String::as_str)))
        .transpose()?;
    if job_upload.is_none() && !form.fields.contains_key("job_text") {
        return Err(AppError::Validation(
            "Provide either a 'job' upload or a 'job_text' field".to_string(),
        ));
    }

    let resume_outcome = extract_upload(&state, resume_upload, resume_format).await?;
    require_text("resume", &resume_outcome)?;
    let resume = DocumentAnalysis::from_outcome(&resume_outcome, &state.dictionary);

    let (job_text, job) = match (job_upload, job_format) {
        (Some(upload), Some(format)) => {
            let outcome = extract_upload(&state, upload, format).await?;
            require_text("job description", &outcome)?;
            let analysis = DocumentAnalysis::from_outcome(&outcome, &state.dictionary);
            (outcome.text, analysis)
        }
        _ => {
            let text = form.fields.remove("job_text").unwrap_or_default();
            if text.trim().is_empty() {
                return Err(AppError::UnprocessableEntity(
                    "The job description text is empty".to_string(),
                ));
            }
            let analysis = DocumentAnalysis::from_text(&text, &state.dictionary);
            (text, analysis)
        }
    };

    let report = build_report(&job_text, resume, job);
    info!(
        "Analyzed resume against '{}': {:.1}% match ({} missing)",
        report.job_title, report.gap.match_percentage, report.summary.missing
    );
    Ok(Json(report))
}
