use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use similar::TextDiff;
use tracing::debug;

use super::normalize::{normalize, split_sentences};
use super::Threshold;
use crate::errors::QuizError;

const HTML_OPEN: &str = r#"<span style="color:red;font-weight:bold">"#;
const HTML_CLOSE: &str = "</span>";

/// Delimiter convention used to mark copied spans.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// Red bold `<span>` for HTML-capable renderers.
    #[default]
    Html,
    /// `**bold**` pairs.
    Markdown,
    /// Red bold terminal escape codes.
    Ansi,
    Custom { open: String, close: String },
}

impl Marker {
    pub fn wrap(&self, text: &str) -> String {
        match self {
            Marker::Html => format!("{}{}{}", HTML_OPEN, text, HTML_CLOSE),
            Marker::Markdown => format!("**{}**", text),
            Marker::Ansi => console::style(text).red().bold().force_styling(true).to_string(),
            Marker::Custom { open, close } => format!("{}{}{}", open, text, close),
        }
    }
}

impl FromStr for Marker {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Marker::Html),
            "markdown" | "md" => Ok(Marker::Markdown),
            "ansi" | "terminal" => Ok(Marker::Ansi),
            other => Err(QuizError::Config(format!(
                "Unknown highlight marker '{}': expected html, markdown or ansi",
                other
            ))),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Html => write!(f, "html"),
            Marker::Markdown => write!(f, "markdown"),
            Marker::Ansi => write!(f, "ansi"),
            Marker::Custom { open, close } => write!(f, "custom({}…{})", open, close),
        }
    }
}

/// Byte ranges of `answer` that reproduce a summary sentence.
///
/// A summary sentence qualifies when its character-diff ratio against the
/// whole answer reaches `threshold`, or when the answer contains it outright
/// (both compared case-insensitively). Every occurrence of a qualifying
/// sentence is then located in the original answer ignoring case and
/// whitespace differences. The returned ranges are sorted and disjoint.
pub fn copied_spans(answer: &str, summary: &str, threshold: Threshold) -> Vec<Range<usize>> {
    if answer.trim().is_empty() || summary.trim().is_empty() {
        return Vec::new();
    }

    let answer_lower = answer.to_lowercase();
    let answer_norm = normalize(answer);
    let mut spans = Vec::new();

    for range in split_sentences(summary) {
        let sentence = &summary[range];
        let contained = answer_norm.contains(&normalize(sentence));
        if !contained {
            let ratio = char_ratio(&sentence.to_lowercase(), &answer_lower);
            if ratio < threshold.value() {
                continue;
            }
        }

        let Some(pattern) = sentence_pattern(sentence) else {
            continue;
        };
        let before = spans.len();
        spans.extend(pattern.find_iter(answer).map(|m| m.range()));
        debug!(
            sentence = %sentence,
            contained,
            occurrences = spans.len() - before,
            "Summary sentence qualifies for highlighting"
        );
    }

    merge_spans(spans)
}

/// Answer text with every copied span wrapped once in `marker`. Returns the
/// answer unchanged when nothing qualifies.
pub fn highlight_copied(answer: &str, summary: &str, threshold: Threshold, marker: &Marker) -> String {
    let spans = copied_spans(answer, summary, threshold);
    if spans.is_empty() {
        return answer.to_string();
    }

    let mut out = String::with_capacity(answer.len() + spans.len() * 48);
    let mut cursor = 0;
    for span in spans {
        out.push_str(&answer[cursor..span.start]);
        out.push_str(&marker.wrap(&answer[span.clone()]));
        cursor = span.end;
    }
    out.push_str(&answer[cursor..]);
    out
}

/// Similarity of two strings from a character-level diff, in [0, 1].
pub fn char_ratio(a: &str, b: &str) -> f64 {
    TextDiff::from_chars(a, b).ratio() as f64
}

/// Case-insensitive pattern for a sentence that tolerates any whitespace run
/// between its words.
fn sentence_pattern(sentence: &str) -> Option<Regex> {
    let words: Vec<String> = sentence.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    match RegexBuilder::new(&words.join(r"\s+")).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            debug!(error = %e, "Skipping sentence that does not compile to a pattern");
            None
        }
    }
}

fn merge_spans(mut spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
    spans.sort_by_key(|r| (r.start, r.end));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(v: f64) -> Threshold {
        Threshold::new(v).unwrap()
    }

    #[test]
    fn test_unchanged_when_nothing_matches() {
        let answer = "Photosynthesis turns light into sugar.";
        let summary = "The French revolution began in 1789. Kings were deposed.";
        assert_eq!(highlight_copied(answer, summary, t(0.9), &Marker::Html), answer);
    }

    #[test]
    fn test_unchanged_for_blank_inputs() {
        assert_eq!(highlight_copied("", "Some summary.", t(0.9), &Marker::Html), "");
        assert_eq!(highlight_copied("My answer.", "   ", t(0.9), &Marker::Html), "My answer.");
    }

    #[test]
    fn test_wraps_contained_sentence() {
        let answer = "I think It has some sentences. Mostly.";
        let summary = "This is a sample summary. It has some sentences.";
        assert_eq!(
            highlight_copied(answer, summary, t(0.9), &Marker::Markdown),
            "I think **It has some sentences.** Mostly."
        );
    }

    #[test]
    fn test_case_difference_still_highlighted_in_original_case() {
        let answer = "IT HAS SOME SENTENCES.";
        let summary = "It has some sentences.";
        assert_eq!(
            highlight_copied(answer, summary, t(0.9), &Marker::Markdown),
            "**IT HAS SOME SENTENCES.**"
        );
    }

    #[test]
    fn test_whitespace_difference_preserved() {
        let answer = "It  has\nsome sentences.";
        let summary = "It has some sentences.";
        assert_eq!(
            highlight_copied(answer, summary, t(0.9), &Marker::Markdown),
            "**It  has\nsome sentences.**"
        );
    }

    #[test]
    fn test_overlapping_sentences_wrapped_once() {
        // "fox jumps." sits inside "The quick fox jumps."
        let summary = "The quick fox jumps. fox jumps.";
        let answer = "The quick fox jumps.";
        assert_eq!(
            highlight_copied(answer, summary, t(0.9), &Marker::Custom { open: "[".into(), close: "]".into() }),
            "[The quick fox jumps.]"
        );
    }

    #[test]
    fn test_every_occurrence_wrapped() {
        let summary = "Water boils at 100C.";
        let answer = "Water boils at 100C. Again: water boils at 100C.";
        let spans = copied_spans(answer, summary, t(0.9));
        assert_eq!(spans.len(), 2);
        assert_eq!(&answer[spans[0].clone()], "Water boils at 100C.");
        assert_eq!(&answer[spans[1].clone()], "water boils at 100C.");
    }

    #[test]
    fn test_similar_but_not_contained_sentence_not_found_verbatim() {
        // qualifies by ratio but has no literal occurrence to wrap
        let summary = "Water boils at 100C.";
        let answer = "Water boils at 100 C.";
        assert!(char_ratio(&summary.to_lowercase(), &answer.to_lowercase()) >= 0.9);
        assert_eq!(highlight_copied(answer, summary, t(0.9), &Marker::Html), answer);
    }

    #[test]
    fn test_html_marker() {
        assert_eq!(
            Marker::Html.wrap("x"),
            r#"<span style="color:red;font-weight:bold">x</span>"#
        );
    }

    #[test]
    fn test_ansi_marker_keeps_text() {
        let wrapped = Marker::Ansi.wrap("copied");
        assert!(wrapped.contains("copied"));
        assert!(wrapped.starts_with('\u{1b}'));
    }

    #[test]
    fn test_marker_from_str() {
        assert_eq!("HTML".parse::<Marker>().unwrap(), Marker::Html);
        assert_eq!("md".parse::<Marker>().unwrap(), Marker::Markdown);
        assert_eq!("ansi".parse::<Marker>().unwrap(), Marker::Ansi);
        assert!(matches!("bbcode".parse::<Marker>(), Err(QuizError::Config(_))));
    }

    #[test]
    fn test_merge_spans() {
        assert_eq!(merge_spans(vec![5..9, 0..3, 2..4, 9..10]), vec![0..4, 5..10]);
        assert!(merge_spans(vec![]).is_empty());
    }

    #[test]
    fn test_char_ratio_identity() {
        assert_eq!(char_ratio("same text", "same text"), 1.0);
    }
}
