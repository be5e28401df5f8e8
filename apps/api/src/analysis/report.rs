//! Report data derived from a gap result: match tier, counts and learning plan.
//!
//! Rendering (charts, Word documents) is left to the consumer; this module
//! only produces the values they display.

use serde::{Deserialize, Serialize};

use crate::skills::gap::GapResult;

/// Maximum number of missing skills that get learning resources.
pub const MAX_PRIORITY_SKILLS: usize = 6;

const LEARNING_PATH: &[&str] = &[
    "Week 1-2: Focus on the top 2 priority skills",
    "Week 3-4: Learn the next 2-3 skills",
    "Week 5-6: Build projects incorporating new skills",
    "Week 7-8: Refine and add to your resume/portfolio",
];

/// Coarse band of the match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Excellent, // ≥ 80
    Good,      // 60 – 79.x
    Moderate,  // 40 – 59.x
    Low,       // < 40
}

impl MatchTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            MatchTier::Excellent
        } else if percentage >= 60.0 {
            MatchTier::Good
        } else if percentage >= 40.0 {
            MatchTier::Moderate
        } else {
            MatchTier::Low
        }
    }

    pub fn feedback(self) -> &'static str {
        match self {
            MatchTier::Excellent => "Excellent match! You're well-qualified for this role.",
            MatchTier::Good => {
                "Good match! Consider learning a few more skills to strengthen your application."
            }
            MatchTier::Moderate => "Moderate match. Upskilling in missing areas is recommended.",
            MatchTier::Low => {
                "Significant gap detected. Focus on building the core required skills."
            }
        }
    }
}

/// Sizes of the three gap sets, for dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapSummary {
    pub matching: usize,
    pub missing: usize,
    pub additional: usize,
}

impl From<&GapResult> for GapSummary {
    fn from(gap: &GapResult) -> Self {
        Self {
            matching: gap.matching.len(),
            missing: gap.missing.len(),
            additional: gap.additional.len(),
        }
    }
}

/// Where to go to learn one missing skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResources {
    pub skill: String,
    pub online_courses: String,
    pub documentation: String,
    pub practice: String,
    pub communities: String,
}

impl LearningResources {
    pub fn for_skill(skill: &str) -> Self {
        Self {
            skill: skill.to_string(),
            online_courses: format!("Search for '{skill}' courses on Coursera, Udemy, or edX"),
            documentation: format!("Official {skill} documentation and tutorials"),
            practice: format!("LeetCode, HackerRank, or project-based learning for {skill}"),
            communities: format!("Join {skill} communities on Reddit, Stack Overflow, or Discord"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPlan {
    pub priority_skills: Vec<LearningResources>,
    /// Week-by-week steps; empty when nothing is missing.
    pub learning_path: Vec<String>,
    pub message: String,
}

/// Picks up to [`MAX_PRIORITY_SKILLS`] missing skills (in sorted order) and
/// attaches resources and the 8-week path.
pub fn build_learning_plan(gap: &GapResult) -> LearningPlan {
    if gap.missing.is_empty() {
        return LearningPlan {
            priority_skills: vec![],
            learning_path: vec![],
            message: "You have all required skills! Consider deepening your expertise in your strongest areas.".to_string(),
        };
    }

    let priority_skills: Vec<LearningResources> = gap
        .missing
        .iter()
        .take(MAX_PRIORITY_SKILLS)
        .map(|skill| LearningResources::for_skill(skill))
        .collect();

    let names: Vec<&str> = priority_skills.iter().map(|r| r.skill.as_str()).collect();
    LearningPlan {
        message: format!("Priority skills to learn: {}.", names.join(", ")),
        priority_skills,
        learning_path: LEARNING_PATH.iter().map(|step| step.to_string()).collect(),
    }
}
