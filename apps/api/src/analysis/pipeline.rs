//! Resume-vs-job analysis over already extracted text.

use serde::{Deserialize, Serialize};

use crate::analysis::job_title::extract_job_title;
use crate::analysis::report::{build_learning_plan, GapSummary, LearningPlan, MatchTier};
use crate::extraction::ExtractionOutcome;
use crate::skills::dictionary::SkillDictionary;
use crate::skills::gap::{analyze_gap, GapResult};
use crate::skills::matcher::{extract_skills, SkillMap};

/// What one side of the comparison yielded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub skills: SkillMap,
    pub char_count: usize,
    pub ocr_used: bool,
    /// Extraction error code (e.g. `OCR_UNAVAILABLE`) when extraction degraded.
    pub extraction_error: Option<String>,
}

impl DocumentAnalysis {
    pub fn from_outcome(outcome: &ExtractionOutcome, dictionary: &SkillDictionary) -> Self {
        Self {
            skills: extract_skills(&outcome.text, dictionary),
            char_count: outcome.char_count(),
            ocr_used: outcome.ocr_used,
            extraction_error: outcome.error.as_ref().map(|e| e.code().to_string()),
        }
    }

    /// For job descriptions pasted as text rather than uploaded.
    pub fn from_text(text: &str, dictionary: &SkillDictionary) -> Self {
        Self {
            skills: extract_skills(text, dictionary),
            char_count: text.chars().count(),
            ocr_used: false,
            extraction_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub job_title: String,
    pub resume: DocumentAnalysis,
    pub job: DocumentAnalysis,
    pub gap: GapResult,
    pub summary: GapSummary,
    pub tier: MatchTier,
    pub feedback: String,
    pub recommendation: LearningPlan,
}

/// Assembles the full report from both sides. `job_text` is only used for
/// title detection; skills come from the analyses.
pub fn build_report(
    job_text: &str,
    resume: DocumentAnalysis,
    job: DocumentAnalysis,
) -> AnalysisReport {
    let gap = analyze_gap(&resume.skills, &job.skills);
    let tier = MatchTier::from_percentage(gap.match_percentage);

    AnalysisReport {
        job_title: extract_job_title(job_text),
        summary: GapSummary::from(&gap),
        feedback: tier.feedback().to_string(),
        recommendation: build_learning_plan(&gap),
        tier,
        gap,
        resume,
        job,
    }
}
