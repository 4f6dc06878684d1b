//! Key-Term Extraction
//!
//! Turns a free-form query into the short list of content words that drive
//! per-term matching. Question phrasings contribute their object word first,
//! then the remaining words survive stop-word and length filtering.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Question openers whose first capture is the word the user is actually
/// asking about.
static QUESTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"how do i (\w+)",
        r"how to (\w+)",
        r"what is (\w+)",
        r"where is (\w+)",
        r"can i (\w+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Filler words that never make useful search terms on their own.
static STOP_WORDS: [&str; 13] = [
    "how", "do", "i", "the", "a", "an", "to", "is", "can", "what", "where", "when", "why",
];

/// Extracts the key terms of `query`, first occurrence wins.
///
/// Pattern captures come before leftover words so that "how do i set up
/// billing" yields `["set", "billing"]` rather than the other way round.
pub fn extract_key_terms(query: &str) -> Vec<String> {
    let normalized = query.to_lowercase();
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    for pattern in QUESTION_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(&normalized)
            && let Some(term) = captures.get(1)
        {
            let term = term.as_str();
            if seen.insert(term.to_string()) {
                terms.push(term.to_string());
            }
        }
    }

    for word in normalized.split_whitespace() {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        if word.len() > 2 && !STOP_WORDS.contains(&word) && seen.insert(word.to_string()) {
            terms.push(word.to_string());
        }
    }

    terms
}
