use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());
static SENTENCE_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Comparison form of a text: trimmed, lowercased, whitespace runs collapsed
/// to a single space.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Unique lowercase word tokens. A word is a maximal run of alphanumeric or
/// underscore characters.
pub fn word_set(text: &str) -> HashSet<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Sentence byte ranges over `text`. A sentence ends after `.`, `!` or `?`
/// followed by whitespace; ranges are trimmed and empty ones are dropped.
pub fn split_sentences(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END_RE.find_iter(text) {
        // terminator is one ASCII byte
        push_trimmed(text, start..m.start() + 1, &mut ranges);
        start = m.end();
    }
    push_trimmed(text, start..text.len(), &mut ranges);

    ranges
}

fn push_trimmed(text: &str, range: Range<usize>, out: &mut Vec<Range<usize>>) {
    let segment = &text[range.clone()];
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return;
    }
    let lead = segment.len() - segment.trim_start().len();
    let start = range.start + lead;
    out.push(start..start + trimmed.len());
}
