use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{with_retry, QuizError, RetryConfig};
use crate::llm::{CompletionOptions, LLMProvider};

const ASSISTANT_SYSTEM: &str = "You are a helpful assistant.";
const SUMMARY_OPTIONS: CompletionOptions = CompletionOptions::new(500, 0.7);
const QUESTION_OPTIONS: CompletionOptions = CompletionOptions::new(500, 0.7);

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:q(?:uestion)?\s*)?\d+\s*[.):\-]\s*").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    #[default]
    ShortAnswer,
    MultipleChoice,
    TrueFalse,
    Other(String),
}

impl QuestionType {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::ShortAnswer => "short answer",
            QuestionType::MultipleChoice => "multiple choice",
            QuestionType::TrueFalse => "true/false",
            QuestionType::Other(s) => s,
        }
    }
}

impl From<&str> for QuestionType {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "short answer" | "short-answer" | "short" => QuestionType::ShortAnswer,
            "multiple choice" | "multiple-choice" | "mc" => QuestionType::MultipleChoice,
            "true/false" | "true or false" | "tf" => QuestionType::TrueFalse,
            other => QuestionType::Other(other.to_string()),
        }
    }
}

impl From<String> for QuestionType {
    fn from(s: String) -> Self {
        QuestionType::from(s.as_str())
    }
}

impl From<QuestionType> for String {
    fn from(t: QuestionType) -> String {
        t.as_str().to_string()
    }
}

impl FromStr for QuestionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(QuestionType::from(s))
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    pub num_questions: u32,
    pub points_per_question: u32,
    pub question_type: QuestionType,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            num_questions: 5,
            points_per_question: 10,
            question_type: QuestionType::ShortAnswer,
        }
    }
}

impl QuizSettings {
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.num_questions == 0 || self.points_per_question == 0 {
            return Err(QuizError::Config(
                "Question count and points per question must be positive integers".into(),
            ));
        }
        Ok(())
    }
}

pub async fn summarize_text(
    provider: &dyn LLMProvider,
    retry: &RetryConfig,
    text: &str,
) -> Result<String, QuizError> {
    if text.trim().is_empty() {
        return Err(QuizError::InvalidInput("No text to summarize".into()));
    }
    let prompt = format!("Please summarize the following content: {}", text);
    let resp = with_retry("summarize", retry, || {
        provider.complete(&prompt, Some(ASSISTANT_SYSTEM), &SUMMARY_OPTIONS)
    })
    .await?;

    info!(
        model = %resp.model,
        input_chars = text.len(),
        summary_chars = resp.content.len(),
        output_tokens = ?resp.output_tokens,
        "Summary generated"
    );
    Ok(resp.content.trim().to_string())
}

/// One summary per section, in order.
pub async fn summarize_sections(
    provider: &dyn LLMProvider,
    retry: &RetryConfig,
    sections: &[String],
) -> Result<Vec<String>, QuizError> {
    let mut summaries = Vec::with_capacity(sections.len());
    for (idx, section) in sections.iter().enumerate() {
        info!(section = idx + 1, total = sections.len(), "Summarizing section");
        summaries.push(summarize_text(provider, retry, section).await?);
    }
    Ok(summaries)
}

/// Ask for review questions about `summary`; returns the raw reply text.
pub async fn generate_questions(
    provider: &dyn LLMProvider,
    retry: &RetryConfig,
    summary: &str,
    settings: &QuizSettings,
) -> Result<String, QuizError> {
    settings.validate()?;
    let prompt = format!(
        "Based on the following summary, generate {} {} questions for review: {}, \
         with each question worth {} points. Number each question and start it on a new line.",
        settings.num_questions,
        settings.question_type.as_str().to_lowercase(),
        summary,
        settings.points_per_question
    );
    let resp = with_retry("generate_questions", retry, || {
        provider.complete(&prompt, Some(ASSISTANT_SYSTEM), &QUESTION_OPTIONS)
    })
    .await?;
    Ok(resp.content.trim().to_string())
}

/// Split a question list into individual questions.
///
/// Lines that start with a number (`1.`, `2)`, `Q3:`) open a new question and
/// lose their numbering; other lines (answer options, wrapped text) attach to
/// the question above them. Without any numbered line every non-empty line is
/// its own question.
pub fn parse_questions(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if !lines.iter().any(|l| NUMBERED_RE.is_match(l)) {
        return lines.into_iter().map(str::to_string).collect();
    }

    let mut questions: Vec<String> = Vec::new();
    for line in lines {
        if let Some(m) = NUMBERED_RE.find(line) {
            questions.push(line[m.end()..].to_string());
        } else if let Some(current) = questions.last_mut() {
            current.push('\n');
            current.push_str(line);
        }
        // preamble before the first numbered line is dropped
    }
    questions.retain(|q| !q.trim().is_empty());
    questions
}
