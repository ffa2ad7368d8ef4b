use std::collections::HashMap;

use super::normalize::{normalize, split_sentences, word_set};
use super::Threshold;

/// Answer sentences shorter than this (in characters) never count towards
/// the verbatim fraction.
pub const MIN_SENTENCE_CHARS: usize = 10;

/// An answer/summary pair prepared once for every heuristic.
#[derive(Debug, Clone)]
pub struct Prepared<'a> {
    /// Trimmed answer in its original casing.
    pub answer: &'a str,
    pub answer_norm: String,
    pub summary_norm: String,
}

impl<'a> Prepared<'a> {
    /// `None` when either side is empty after trimming.
    pub fn new(answer: &'a str, summary: &str) -> Option<Self> {
        let answer = answer.trim();
        if answer.is_empty() || summary.trim().is_empty() {
            return None;
        }
        Some(Self {
            answer,
            answer_norm: normalize(answer),
            summary_norm: normalize(summary),
        })
    }
}

/// The whole answer appears verbatim inside the summary.
pub fn exact_containment(input: &Prepared<'_>, _threshold: Threshold) -> bool {
    input.summary_norm.contains(&input.answer_norm)
}

/// Share of the answer's unique words that also occur in the summary.
pub fn word_overlap(input: &Prepared<'_>, threshold: Threshold) -> bool {
    let answer_words = word_set(&input.answer_norm);
    if answer_words.is_empty() {
        return false;
    }
    let summary_words = word_set(&input.summary_norm);
    let shared = answer_words.intersection(&summary_words).count();
    shared as f64 / answer_words.len() as f64 >= threshold.value()
}

/// Character-multiset similarity of the whole answer against the whole summary.
pub fn fuzzy_ratio(input: &Prepared<'_>, threshold: Threshold) -> bool {
    quick_ratio(&input.answer_norm, &input.summary_norm) >= threshold.value()
}

/// Fraction of answer characters covered by answer sentences found verbatim
/// in the summary.
pub fn sentence_verbatim(input: &Prepared<'_>, threshold: Threshold) -> bool {
    let total_chars = input.answer.chars().count();
    if total_chars == 0 {
        return false;
    }

    let matched_chars: usize = split_sentences(input.answer)
        .into_iter()
        .map(|range| &input.answer[range])
        .filter(|sentence| sentence.chars().count() >= MIN_SENTENCE_CHARS)
        .filter(|sentence| input.summary_norm.contains(&normalize(sentence)))
        .map(|sentence| sentence.chars().count())
        .sum();

    matched_chars as f64 / total_chars as f64 >= threshold.value()
}

/// Upper bound on the matching-block similarity of two strings:
/// `2 * M / (|a| + |b|)` where `M` counts characters the two share as
/// multisets. Order-insensitive and linear in the input lengths.
pub fn quick_ratio(a: &str, b: &str) -> f64 {
    let mut available: HashMap<char, usize> = HashMap::new();
    let mut b_len = 0;
    for c in b.chars() {
        *available.entry(c).or_insert(0) += 1;
        b_len += 1;
    }

    let mut a_len = 0;
    let mut matches = 0;
    for c in a.chars() {
        a_len += 1;
        if let Some(count) = available.get_mut(&c) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }

    let total = a_len + b_len;
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}
