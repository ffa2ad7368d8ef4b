use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Billing/quota error: {0}")]
    Billing(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl QuizError {
    /// Process exit code used by the binary for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            QuizError::Config(_) => 2,
            QuizError::Authentication(_) => 4,
            QuizError::Pdf(_) | QuizError::InvalidInput(_) => 5,
            _ => 1,
        }
    }
}
