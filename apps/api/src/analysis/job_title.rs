//! Job title detection: a heading heuristic over the top of a job description.

pub const DEFAULT_JOB_TITLE: &str = "Job Position";

const TITLE_SCAN_LINES: usize = 10;
const MAX_TITLE_CHARS: usize = 100;

const TITLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "analyst",
    "designer",
    "architect",
    "specialist",
    "consultant",
    "lead",
    "senior",
    "junior",
];

/// Returns the first of the first ten lines that is non-blank, shorter than
/// 100 characters and mentions a role keyword; otherwise [`DEFAULT_JOB_TITLE`].
pub fn extract_job_title(job_text: &str) -> String {
    job_text
        .split('\n')
        .take(TITLE_SCAN_LINES)
        .map(str::trim)
        .find(|line| {
            if line.is_empty() || line.chars().count() >= MAX_TITLE_CHARS {
                return false;
            }
            let lower = line.to_lowercase();
            TITLE_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_JOB_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_on_first_line() {
        let jd = "Senior Backend Engineer\nWe are hiring...";
        assert_eq!(extract_job_title(jd), "Senior Backend Engineer");
    }

    #[test]
    fn test_skips_lines_without_role_keywords() {
        let jd = "\n  Acme Corp  \nAbout us\n  Data Analyst (Remote)  \nRequirements";
        assert_eq!(extract_job_title(jd), "Data Analyst (Remote)");
    }

    #[test]
    fn test_long_lines_are_not_titles() {
        let long = format!("Developer {}", "x".repeat(120));
        assert_eq!(extract_job_title(&long), DEFAULT_JOB_TITLE);
    }

    #[test]
    fn test_only_first_ten_lines_are_scanned() {
        let jd = format!("{}Platform Architect", "filler\n".repeat(10));
        assert_eq!(extract_job_title(&jd), DEFAULT_JOB_TITLE);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(extract_job_title("UX DESIGNER"), "UX DESIGNER");
    }

    #[test]
    fn test_empty_text_falls_back() {
        assert_eq!(extract_job_title(""), DEFAULT_JOB_TITLE);
    }
}
