use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::grading::Grade;

static SCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)").unwrap());
static STATED_GRADE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:The grade is|Grade:)\s*(\d+)").unwrap());

/// First `N/M` pair in grader feedback.
pub fn extract_score(feedback: &str) -> Option<(u32, u32)> {
    let caps = SCORE_RE.captures(feedback)?;
    let got = caps[1].parse().ok()?;
    let of = caps[2].parse().ok()?;
    Some((got, of))
}

/// Points stated as "Grade: N" or "The grade is N", the phrasing of the
/// all-or-nothing prompts.
pub fn extract_stated_grade(feedback: &str) -> Option<u32> {
    STATED_GRADE_RE.captures(feedback)?[1].parse().ok()
}

pub fn letter_grade(percentage: f64) -> char {
    match percentage {
        p if p >= 90.0 => 'A',
        p if p >= 80.0 => 'B',
        p if p >= 70.0 => 'C',
        p if p >= 60.0 => 'D',
        _ => 'F',
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizTally {
    pub total_score: u32,
    pub total_possible: u32,
    pub percentage: f64,
    pub letter: char,
    pub copied_answers: usize,
}

impl QuizTally {
    /// Feedback without a parsable score counts as zero points.
    pub fn from_grades(grades: &[Grade]) -> Self {
        let total_score = grades.iter().filter_map(|g| g.score).sum();
        let total_possible = grades.iter().map(|g| g.max_points).sum();
        let percentage = if total_possible > 0 {
            total_score as f64 / total_possible as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total_score,
            total_possible,
            percentage,
            letter: letter_grade(percentage),
            copied_answers: grades.iter().filter(|g| g.is_copied()).count(),
        }
    }
}
