use ahash::AHashMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MIN_WORDS: usize = 5;
pub const DEFAULT_MAX_WORDS: usize = 20;

static RE_LETTER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Za-z\s]+\b").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructurePhrase {
    pub phrase: String,
    pub words: usize,
    pub count: usize,
}

/// Letters-and-whitespace runs of `min_words..=max_words` words in one
/// description, in order of appearance.
pub fn extract_phrases(description: &str, min_words: usize, max_words: usize) -> Vec<&str> {
    RE_LETTER_RUN
        .find_iter(description)
        .map(|m| m.as_str())
        .filter(|run| {
            let words = run.split_whitespace().count();
            words >= min_words && words <= max_words
        })
        .collect()
}

pub fn count_structures<S: AsRef<str>>(cleaned: &[S]) -> BTreeMap<String, usize> {
    count_structures_bounded(cleaned, DEFAULT_MIN_WORDS, DEFAULT_MAX_WORDS)
}

pub fn count_structures_bounded<S: AsRef<str>>(
    cleaned: &[S],
    min_words: usize,
    max_words: usize,
) -> BTreeMap<String, usize> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for d in cleaned {
        for phrase in extract_phrases(d.as_ref(), min_words, max_words) {
            *counts.entry(phrase).or_insert(0) += 1;
        }
    }
    counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

pub fn merge_counts(into: &mut BTreeMap<String, usize>, other: &BTreeMap<String, usize>) {
    for (phrase, count) in other {
        *into.entry(phrase.clone()).or_insert(0) += count;
    }
}

/// Most frequent first; ties broken by phrase so the order is stable.
pub fn ranked(counts: &BTreeMap<String, usize>) -> Vec<StructurePhrase> {
    counts
        .iter()
        .sorted_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)))
        .map(|(phrase, count)| StructurePhrase {
            phrase: phrase.clone(),
            words: phrase.split_whitespace().count(),
            count: *count,
        })
        .collect()
}
