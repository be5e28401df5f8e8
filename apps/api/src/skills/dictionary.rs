//! Skill Dictionary: the categorized phrase list every analysis matches against.
//!
//! Loaded once at startup (bundled JSON or `SKILL_DICTIONARY_PATH`) and shared
//! read-only as `Arc<SkillDictionary>`. Swapping the dictionary never requires
//! a code change.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::skills::tokenizer::tokenize;

const BUILTIN_DICTIONARY: &str = include_str!("default_skills.json");

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to read skill dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid skill dictionary JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Skill dictionary contains no skills")]
    Empty,
}

/// Category name → ordered list of lowercase skill phrases.
///
/// Phrases may contain spaces (`machine learning`) or symbols (`c++`,
/// `node.js`). The same phrase may be listed under several categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>")]
pub struct SkillDictionary {
    #[serde(flatten)]
    categories: BTreeMap<String, Vec<String>>,
}

impl SkillDictionary {
    /// Builds a dictionary, normalizing every phrase (trim + lowercase).
    /// Blank phrases and repeats within a category are dropped; first position wins.
    pub fn new(raw: BTreeMap<String, Vec<String>>) -> Self {
        let categories = raw
            .into_iter()
            .map(|(category, phrases)| {
                let mut normalized: Vec<String> = Vec::with_capacity(phrases.len());
                for phrase in phrases {
                    let phrase = phrase.trim().to_lowercase();
                    if !phrase.is_empty() && !normalized.contains(&phrase) {
                        normalized.push(phrase);
                    }
                }
                (category.trim().to_string(), normalized)
            })
            .filter(|(category, phrases)| !category.is_empty() && !phrases.is_empty())
            .collect();

        Self { categories }
    }

    /// The dictionary bundled with the service.
    pub fn builtin() -> Result<Self, DictionaryError> {
        Self::from_json(BUILTIN_DICTIONARY)
    }

    /// Parses a JSON object of the form `{"category": ["phrase", ...]}`.
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let dictionary: SkillDictionary = serde_json::from_str(json)?;
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty);
        }
        Ok(dictionary)
    }

    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let json = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Iterates categories in name order, each with its phrases in dictionary order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(category, phrases)| (category.as_str(), phrases.as_slice()))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Total number of phrase entries, counting cross-category repeats separately.
    pub fn skill_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Phrases the tokenizer can never emit as a candidate, so they never
    /// match: single letters, digits inside a word, `-` or `/` separators.
    pub fn unmatchable_phrases(&self) -> BTreeSet<&str> {
        self.categories
            .values()
            .flatten()
            .filter(|phrase| !tokenize(phrase).iter().any(|candidate| candidate == *phrase))
            .map(String::as_str)
            .collect()
    }
}

impl From<BTreeMap<String, Vec<String>>> for SkillDictionary {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        Self::new(raw)
    }
}
