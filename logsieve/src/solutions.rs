use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

/// Longest piece of an error phrase sent in one request.
pub const CHUNK_CHARS: usize = 100;

// Sanitized descriptions have their colons turned into spaces, so either
// separator may follow the keyword.
static RE_ERROR_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\berror[: \t].*|exception[: \t].*").unwrap());

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("summarizer unavailable: {0}")]
    Unavailable(String),
    #[error("summarizer rejected prompt: {0}")]
    Rejected(String),
}

/// Text-generation capability. Callers construct one client and pass it in.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, prompt: &str) -> Result<String, SummarizeError>;
}

pub fn extract_error_phrases(text: &str) -> Vec<&str> {
    RE_ERROR_PHRASE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Split on char boundaries into pieces of at most `size` chars.
pub fn split_chunks(s: &str, size: usize) -> Vec<&str> {
    if size == 0 || s.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut start = 0usize;
    for (n, (idx, _)) in s.char_indices().enumerate() {
        if n > 0 && n % size == 0 {
            out.push(&s[start..idx]);
            start = idx;
        }
    }
    out.push(&s[start..]);
    out
}

/// Ask `summarizer` for a suggestion on every error phrase chunk found in the
/// cleaned descriptions. Failed chunks are logged and left out.
pub fn generate_solutions<S: AsRef<str>>(
    cleaned: &[S],
    summarizer: &dyn Summarizer,
) -> BTreeMap<String, String> {
    let mut solutions = BTreeMap::new();
    for text in cleaned {
        for phrase in extract_error_phrases(text.as_ref()) {
            for chunk in split_chunks(phrase, CHUNK_CHARS) {
                if solutions.contains_key(chunk) {
                    continue;
                }
                match summarizer.summarize(chunk) {
                    Ok(answer) => {
                        solutions.insert(chunk.to_string(), answer);
                    }
                    Err(e) => tracing::warn!(error = %e, chunk, "summarizer failed; skipping chunk"),
                }
            }
        }
    }
    solutions
}
