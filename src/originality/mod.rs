//! Local check for answers that were lifted from the summary they answer.
//!
//! Detection runs a fixed ensemble of independent heuristics and flags the
//! answer as soon as one of them fires. Comparison happens on a
//! case-insensitive, whitespace-collapsed form of both texts; highlighting
//! always reports spans of the original answer.

pub mod heuristics;
pub mod highlight;
pub mod normalize;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::QuizError;
use heuristics::Prepared;

pub use highlight::{copied_spans, highlight_copied, Marker};

/// Fraction in (0, 1] used by the detector and the highlighter.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    pub const COPY_DEFAULT: Threshold = Threshold(0.8);
    pub const HIGHLIGHT_DEFAULT: Threshold = Threshold(0.9);

    /// Rejects NaN and anything outside (0, 1]. A zero threshold would flag
    /// every non-empty answer.
    pub fn new(value: f64) -> Result<Self, QuizError> {
        if value.is_nan() || value <= 0.0 || value > 1.0 {
            return Err(QuizError::Config(format!(
                "Threshold must be in (0, 1], got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::COPY_DEFAULT
    }
}

impl TryFrom<f64> for Threshold {
    type Error = QuizError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(t: Threshold) -> f64 {
        t.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The heuristic that flagged an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    ExactContainment,
    WordOverlap,
    FuzzyRatio,
    SentenceVerbatim,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::ExactContainment => "exact_containment",
            Signal::WordOverlap => "word_overlap",
            Signal::FuzzyRatio => "fuzzy_ratio",
            Signal::SentenceVerbatim => "sentence_verbatim",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Signal::ExactContainment => "the whole answer appears in the summary",
            Signal::WordOverlap => "most of the answer's words come from the summary",
            Signal::FuzzyRatio => "the answer's characters closely mirror the summary",
            Signal::SentenceVerbatim => "most of the answer is summary sentences copied verbatim",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Heuristic = fn(&Prepared<'_>, Threshold) -> bool;

/// Evaluation order; cheaper and more certain checks first.
const ENSEMBLE: [(Signal, Heuristic); 4] = [
    (Signal::ExactContainment, heuristics::exact_containment),
    (Signal::WordOverlap, heuristics::word_overlap),
    (Signal::FuzzyRatio, heuristics::fuzzy_ratio),
    (Signal::SentenceVerbatim, heuristics::sentence_verbatim),
];

/// First heuristic that flags `answer` as copied from `summary`, if any.
/// Empty or whitespace-only inputs never match.
pub fn detect(answer: &str, summary: &str, threshold: Threshold) -> Option<Signal> {
    let input = Prepared::new(answer, summary)?;
    let signal = ENSEMBLE
        .iter()
        .find(|(_, heuristic)| heuristic(&input, threshold))
        .map(|(signal, _)| *signal);

    debug!(
        threshold = threshold.value(),
        answer_chars = input.answer.chars().count(),
        signal = signal.map(|s| s.as_str()).unwrap_or("none"),
        "Originality check"
    );
    signal
}

pub fn is_copied(answer: &str, summary: &str, threshold: Threshold) -> bool {
    detect(answer, summary, threshold).is_some()
}

/// Detector settings: separate thresholds for flagging and highlighting,
/// plus the marker used in highlighted output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    #[serde(default = "default_copy_threshold")]
    pub copy_threshold: Threshold,
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: Threshold,
    #[serde(default)]
    pub marker: Marker,
}

fn default_copy_threshold() -> Threshold {
    Threshold::COPY_DEFAULT
}

fn default_highlight_threshold() -> Threshold {
    Threshold::HIGHLIGHT_DEFAULT
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            copy_threshold: Threshold::COPY_DEFAULT,
            highlight_threshold: Threshold::HIGHLIGHT_DEFAULT,
            marker: Marker::default(),
        }
    }
}

impl DetectorConfig {
    pub fn detect(&self, answer: &str, summary: &str) -> Option<Signal> {
        detect(answer, summary, self.copy_threshold)
    }

    pub fn highlight(&self, answer: &str, summary: &str) -> String {
        highlight_copied(answer, summary, self.highlight_threshold, &self.marker)
    }
}
