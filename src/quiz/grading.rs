use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{with_retry, QuizError, RetryConfig};
use crate::llm::{CompletionOptions, LLMProvider};
use crate::originality::{DetectorConfig, Signal};
use super::questions::QuestionType;
use super::scoring::{extract_score, extract_stated_grade};

const GRADER_SYSTEM: &str = "You are a grading assistant.";
const GRADE_OPTIONS: CompletionOptions = CompletionOptions::new(200, 0.7);

static OUT_OF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*out of\s*(\d+)").unwrap());

/// Why an answer was zeroed without being sent for grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyFinding {
    pub signal: Signal,
    /// The answer with copied spans marked.
    pub highlighted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub question: String,
    pub answer: String,
    pub max_points: u32,
    pub feedback: String,
    /// Points parsed from the feedback, capped at `max_points`.
    pub score: Option<u32>,
    pub copied: Option<CopyFinding>,
}

impl Grade {
    pub fn is_copied(&self) -> bool {
        self.copied.is_some()
    }
}

/// Everything needed to grade one quiz: the provider, the summary answers
/// are checked against and the detector settings.
pub struct Grader<'a> {
    pub provider: &'a dyn LLMProvider,
    pub retry: RetryConfig,
    pub detector: DetectorConfig,
    pub summary: &'a str,
}

impl Grader<'_> {
    pub async fn grade(
        &self,
        question: &str,
        answer: &str,
        max_points: u32,
        question_type: &QuestionType,
    ) -> Result<Grade, QuizError> {
        grade_answer(
            self.provider,
            &self.retry,
            &self.detector,
            question,
            answer,
            self.summary,
            max_points,
            question_type,
        )
        .await
    }
}

/// Grade one answer. Short answers are first checked against the summary;
/// a copied answer scores zero and is never sent to the provider.
#[allow(clippy::too_many_arguments)]
pub async fn grade_answer(
    provider: &dyn LLMProvider,
    retry: &RetryConfig,
    detector: &DetectorConfig,
    question: &str,
    answer: &str,
    summary: &str,
    max_points: u32,
    question_type: &QuestionType,
) -> Result<Grade, QuizError> {
    if *question_type == QuestionType::ShortAnswer {
        if let Some(signal) = detector.detect(answer, summary) {
            warn!(signal = %signal, "Answer appears copied from the summary, awarding zero");
            return Ok(Grade {
                question: question.to_string(),
                answer: answer.to_string(),
                max_points,
                feedback: copied_feedback(max_points),
                score: Some(0),
                copied: Some(CopyFinding {
                    signal,
                    highlighted: detector.highlight(answer, summary),
                }),
            });
        }
    }

    let prompt = grading_prompt(question, answer, max_points, question_type);
    let resp = with_retry("grade_answer", retry, || {
        provider.complete(&prompt, Some(GRADER_SYSTEM), &GRADE_OPTIONS)
    })
    .await?;

    let feedback = normalize_feedback(resp.content.trim());
    let score = score_from_feedback(&feedback, question_type).map(|got| got.min(max_points));
    info!(max_points, score = ?score, "Answer graded");

    Ok(Grade {
        question: question.to_string(),
        answer: answer.to_string(),
        max_points,
        feedback,
        score,
        copied: None,
    })
}

/// All-or-nothing questions are graded with "Grade: N"; a fraction later in
/// the feedback may belong to the explanation, so the stated grade wins.
fn score_from_feedback(feedback: &str, question_type: &QuestionType) -> Option<u32> {
    let fraction = || extract_score(feedback).map(|(got, _)| got);
    match question_type {
        QuestionType::MultipleChoice | QuestionType::TrueFalse => {
            extract_stated_grade(feedback).or_else(fraction)
        }
        _ => fraction(),
    }
}

pub fn copied_feedback(max_points: u32) -> String {
    format!(
        "Grade: 0/{}\n\n\
         Your answer appears to be copied from the summary. \
         Therefore, you have been awarded a 0 for this question.\n\n",
        max_points
    )
}

fn grading_prompt(question: &str, answer: &str, max_points: u32, question_type: &QuestionType) -> String {
    match question_type {
        QuestionType::ShortAnswer => format!(
            "Question: {}\nUser Answer: {}\n\
             Grade the answer out of {} points and provide feedback with an example answer.",
            question, answer, max_points
        ),
        QuestionType::MultipleChoice => format!(
            "Question: {}\nUser Selected Answer: {}\n\
             Give a grade of {} if the answer is correct, otherwise give a grade of 0 \
             and provide feedback with the correct answer.",
            question, answer, max_points
        ),
        QuestionType::TrueFalse => format!(
            "Statement: {}\nUser Answer: {}\n\
             Give a grade of {} if the answer is correct (true/false), otherwise give a grade of 0 \
             and provide feedback with the correct answer.",
            question, answer, max_points
        ),
        QuestionType::Other(_) => format!(
            "Question: {}\nUser Answer: {}\n\
             Grade the answer out of {} points and provide feedback.",
            question, answer, max_points
        ),
    }
}

/// Rewrite "7 out of 10" as "7/10" so scores can be parsed uniformly.
pub fn normalize_feedback(text: &str) -> String {
    OUT_OF_RE.replace_all(text, "$1/$2").into_owned()
}
