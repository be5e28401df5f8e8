use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::extraction::{
    ExtractionConfig, DEFAULT_OCR_LANGUAGE, DEFAULT_OCR_MIN_TEXT_CHARS, DEFAULT_OCR_ZOOM,
};

/// Application configuration loaded from environment variables.
/// Every variable is optional; a value that fails to parse aborts startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON skill dictionary; the bundled dictionary is used when unset.
    pub skill_dictionary_path: Option<PathBuf>,
    pub ocr_min_text_chars: usize,
    pub ocr_zoom: f32,
    pub ocr_language: String,
    pub ocr_max_pages: Option<usize>,
    /// Concurrent PDF extractions allowed (each may run OCR).
    pub ocr_max_concurrency: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            skill_dictionary_path: None,
            ocr_min_text_chars: DEFAULT_OCR_MIN_TEXT_CHARS,
            ocr_zoom: DEFAULT_OCR_ZOOM,
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            ocr_max_pages: None,
            ocr_max_concurrency: 2,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: parse_env("PORT")?.unwrap_or(defaults.port),
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            skill_dictionary_path: std::env::var("SKILL_DICTIONARY_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            ocr_min_text_chars: parse_env("OCR_MIN_TEXT_CHARS")?
                .unwrap_or(defaults.ocr_min_text_chars),
            ocr_zoom: parse_env("OCR_ZOOM")?.unwrap_or(defaults.ocr_zoom),
            ocr_language: std::env::var("OCR_LANGUAGE").unwrap_or(defaults.ocr_language),
            ocr_max_pages: parse_env("OCR_MAX_PAGES")?,
            ocr_max_concurrency: parse_env("OCR_MAX_CONCURRENCY")?
                .unwrap_or(defaults.ocr_max_concurrency),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.ocr_zoom.is_finite() && self.ocr_zoom > 0.0,
            "OCR_ZOOM must be a positive number, got {}",
            self.ocr_zoom
        );
        anyhow::ensure!(
            self.ocr_max_concurrency > 0,
            "OCR_MAX_CONCURRENCY must be at least 1"
        );
        Ok(())
    }

    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            ocr_min_text_chars: self.ocr_min_text_chars,
            ocr_zoom: self.ocr_zoom,
            ocr_language: self.ocr_language.clone(),
            ocr_max_pages: self.ocr_max_pages,
        }
    }
}

/// Reads and parses an optional variable. Unset means `None`; set but
/// unparseable is an error naming the variable.
fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_extraction_defaults() {
        let extraction = Config::default().extraction_config();
        assert_eq!(extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_parse_env_unset_is_none() {
        let value: Option<u16> = parse_env("SKILLGAP_TEST_UNSET_VARIABLE").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_parse_env_reports_bad_value() {
        std::env::set_var("SKILLGAP_TEST_BAD_PORT", "eighty");
        let result: Result<Option<u16>> = parse_env("SKILLGAP_TEST_BAD_PORT");
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("SKILLGAP_TEST_BAD_PORT"));
        std::env::remove_var("SKILLGAP_TEST_BAD_PORT");
    }

    #[test]
    fn test_parse_env_reads_float() {
        std::env::set_var("SKILLGAP_TEST_ZOOM", " 3.0 ");
        let value: Option<f32> = parse_env("SKILLGAP_TEST_ZOOM").unwrap();
        assert_eq!(value, Some(3.0));
        std::env::remove_var("SKILLGAP_TEST_ZOOM");
    }

    #[test]
    fn test_non_positive_zoom_is_rejected() {
        let config = Config {
            ocr_zoom: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
