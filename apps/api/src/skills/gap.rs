//! Gap Analyzer: set comparison of a resume skill profile against a job profile.
//!
//! Category information is dropped here: a skill found under `soft_skills` in
//! one document and under `methodologies` in the other is the same name.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::skills::matcher::SkillMap;

/// Matching / missing / additional skill names plus the coverage percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapResult {
    /// In both the resume and the job description.
    pub matching: BTreeSet<String>,
    /// Required by the job, absent from the resume.
    pub missing: BTreeSet<String>,
    /// On the resume, not asked for by the job.
    pub additional: BTreeSet<String>,
    /// `100 × |matching| / |job skills|`, or exactly 0 when the job lists no skills.
    pub match_percentage: f64,
}

/// Compares two skill maps. Pure and infallible.
pub fn analyze_gap(resume: &SkillMap, job: &SkillMap) -> GapResult {
    let resume_set = resume.skill_names();
    let job_set = job.skill_names();

    let matching: BTreeSet<String> = resume_set.intersection(&job_set).cloned().collect();
    let missing: BTreeSet<String> = job_set.difference(&resume_set).cloned().collect();
    let additional: BTreeSet<String> = resume_set.difference(&job_set).cloned().collect();

    let match_percentage = if job_set.is_empty() {
        0.0
    } else {
        matching.len() as f64 / job_set.len() as f64 * 100.0
    };

    GapResult {
        matching,
        missing,
        additional,
        match_percentage,
    }
}
