// Analysis module: turns extracted documents into a gap report.
//
// Sub-modules:
//   job_title: heading heuristic for the job title
//   report: match tier, summary counts and learning plan
//   pipeline: DocumentAnalysis and AnalysisReport assembly
//   handlers: Axum route handlers for extraction, skills, gap and analysis

pub mod handlers;
pub mod job_title;
pub mod pipeline;
pub mod report;
