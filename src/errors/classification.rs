use super::types::QuizError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl QuizError {
    /// Classify this error to determine its type and whether a remote call
    /// that produced it is worth repeating.
    pub fn classify(&self) -> ErrorClassification {
        let (error_type, retryable) = match self {
            // Transient remote failures
            QuizError::RateLimit(_) => ("RateLimitError", true),
            QuizError::Billing(_) => ("BillingError", true),
            QuizError::Network(_) => ("NetworkError", true),
            QuizError::Timeout(_) => ("TimeoutError", true),
            QuizError::LLMApi(_) => ("LLMApiError", true),

            // Caller or environment problems, repeating will not help
            QuizError::Authentication(_) => ("AuthenticationError", false),
            QuizError::Config(_) => ("ConfigError", false),
            QuizError::Pdf(_) => ("PdfError", false),
            QuizError::InvalidInput(_) => ("InvalidInputError", false),
            QuizError::Json(_) => ("JsonError", false),
            QuizError::Yaml(_) => ("YamlError", false),

            QuizError::Io(_) => ("IoError", true),
            QuizError::Internal(_) => ("InternalError", true),
        };
        ErrorClassification { error_type, retryable }
    }
}
