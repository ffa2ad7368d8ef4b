//! Summarize, ask, grade, tally.

pub mod grading;
pub mod questions;
pub mod scoring;

pub use grading::{grade_answer, normalize_feedback, CopyFinding, Grade, Grader};
pub use questions::{
    generate_questions, parse_questions, summarize_sections, summarize_text, QuestionType,
    QuizSettings,
};
pub use scoring::{extract_score, extract_stated_grade, letter_grade, QuizTally};

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::errors::QuizError;
    use crate::llm::{CompletionOptions, LLMProvider, LLMResponse};

    /// Provider that replays canned replies and records every prompt.
    pub struct StubProvider {
        replies: Mutex<VecDeque<Result<String, QuizError>>>,
        pub calls: Mutex<Vec<(String, Option<String>, CompletionOptions)>>,
    }

    impl StubProvider {
        pub fn new(replies: Vec<Result<String, QuizError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(reply: &str) -> Self {
            Self::new(vec![Ok(reply.to_string())])
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LLMProvider for StubProvider {
        async fn complete(
            &self,
            prompt: &str,
            system: Option<&str>,
            options: &CompletionOptions,
        ) -> Result<LLMResponse, QuizError> {
            self.calls.lock().unwrap().push((
                prompt.to_string(),
                system.map(str::to_string),
                *options,
            ));
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(QuizError::Internal("no stub reply left".into())))?;
            Ok(LLMResponse {
                content: reply,
                input_tokens: None,
                output_tokens: None,
                model: "stub".into(),
            })
        }

        fn provider_name(&self) -> &str { "stub" }
        fn model_name(&self) -> &str { "stub" }
    }
}
