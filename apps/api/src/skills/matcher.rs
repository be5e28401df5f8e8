//! Skill Matcher: exact-phrase matching of n-gram candidates against the dictionary.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::skills::dictionary::SkillDictionary;
use crate::skills::tokenizer::tokenize;

/// One dictionary skill found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillOccurrence {
    pub skill: String,
    /// Number of candidates equal to `skill`; always ≥ 1.
    pub count: u32,
}

/// Why a caller-supplied skill map was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillMapError {
    #[error("Category '{0}' has no skills; omit empty categories")]
    EmptyCategory(String),

    #[error("Skill '{skill}' in '{category}' has count 0; counts start at 1")]
    ZeroCount { category: String, skill: String },

    #[error("Skill '{skill}' in '{category}' is not a trimmed lowercase name")]
    NotNormalized { category: String, skill: String },
}

/// Category → skills found in one document.
///
/// Sparse: a category with no matches is absent, which callers read as
/// "zero skills found" rather than an error. Deserialization enforces the
/// same shape `match_skills` produces: no empty categories, counts ≥ 1,
/// trimmed lowercase skill names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<SkillOccurrence>>")]
pub struct SkillMap(BTreeMap<String, Vec<SkillOccurrence>>);

impl SkillMap {
    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<&[SkillOccurrence]> {
        self.0.get(category).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[SkillOccurrence])> {
        self.0
            .iter()
            .map(|(category, skills)| (category.as_str(), skills.as_slice()))
    }

    /// Every distinct skill name across all categories.
    pub fn skill_names(&self) -> BTreeSet<String> {
        self.0
            .values()
            .flatten()
            .map(|occurrence| occurrence.skill.clone())
            .collect()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeMap<String, Vec<SkillOccurrence>>> for SkillMap {
    type Error = SkillMapError;

    fn try_from(map: BTreeMap<String, Vec<SkillOccurrence>>) -> Result<Self, Self::Error> {
        for (category, occurrences) in &map {
            if occurrences.is_empty() {
                return Err(SkillMapError::EmptyCategory(category.clone()));
            }
            for occurrence in occurrences {
                let skill = &occurrence.skill;
                if skill.is_empty() || *skill != skill.trim().to_lowercase() {
                    return Err(SkillMapError::NotNormalized {
                        category: category.clone(),
                        skill: skill.clone(),
                    });
                }
                if occurrence.count == 0 {
                    return Err(SkillMapError::ZeroCount {
                        category: category.clone(),
                        skill: skill.clone(),
                    });
                }
            }
        }
        Ok(Self(map))
    }
}

/// Counts, for every dictionary phrase, how many candidates equal it exactly.
///
/// No substring, prefix or fuzzy matching: `node.js` matches only the
/// candidate `node.js`. Skills keep dictionary order inside their category.
pub fn match_skills(candidates: &[String], dictionary: &SkillDictionary) -> SkillMap {
    let mut counts: HashMap<String, u32> = HashMap::with_capacity(candidates.len());
    for candidate in candidates {
        *counts.entry(candidate.to_lowercase()).or_default() += 1;
    }

    let mut found = BTreeMap::new();
    for (category, phrases) in dictionary.categories() {
        let occurrences: Vec<SkillOccurrence> = phrases
            .iter()
            .filter_map(|phrase| {
                counts.get(phrase).map(|&count| SkillOccurrence {
                    skill: phrase.clone(),
                    count,
                })
            })
            .collect();

        if !occurrences.is_empty() {
            found.insert(category.to_string(), occurrences);
        }
    }

    SkillMap(found)
}

/// Tokenizes `text` and matches the candidates in one step.
pub fn extract_skills(text: &str, dictionary: &SkillDictionary) -> SkillMap {
    match_skills(&tokenize(text), dictionary)
}
