use async_trait::async_trait;
use crate::errors::QuizError;
use super::types::{CompletionOptions, LLMResponse};

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Free-form chat completion with an optional system message
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: &CompletionOptions,
    ) -> Result<LLMResponse, QuizError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
