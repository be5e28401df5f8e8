// Skill extraction core: dictionary, n-gram tokenizer, exact-phrase matcher and gap analysis.
// Every function here is pure; the dictionary is the only shared value and is read-only.

pub mod dictionary;
pub mod gap;
pub mod matcher;
pub mod tokenizer;
