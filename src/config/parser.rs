use std::path::Path;
use tracing::{debug, warn};

use crate::errors::QuizError;
use crate::llm::router::SUPPORTED_PROVIDERS;
use super::types::QuizConfig;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<QuizConfig, QuizError> {
    if !path.exists() {
        return Err(QuizError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(QuizError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: QuizConfig = serde_yaml::from_str(&content)
        .map_err(|e| QuizError::Config(format!("Invalid config {}: {}", path.display(), e)))?;

    validate_config(&config)?;
    debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

/// Semantic checks that the type system does not already enforce.
pub fn validate_config(config: &QuizConfig) -> Result<(), QuizError> {
    if let Some(llm) = &config.llm {
        if !SUPPORTED_PROVIDERS.contains(&llm.provider.as_str()) {
            return Err(QuizError::Config(format!(
                "Unknown LLM provider '{}': expected one of {}",
                llm.provider,
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }
        if llm.timeout_secs == Some(0) {
            return Err(QuizError::Config("llm.timeout_secs must be positive".into()));
        }
        if llm.provider == "local" && llm.base_url.is_none() {
            warn!("Local provider configured without base_url, using the default endpoint");
        }
    }

    if let Some(quiz) = &config.quiz {
        quiz.validate()?;
    }

    if let Some(pdf) = &config.pdf {
        if pdf.max_pages == Some(0) {
            return Err(QuizError::Config("pdf.max_pages must be positive".into()));
        }
    }

    if let Some(detector) = &config.detector {
        if detector.highlight_threshold < detector.copy_threshold {
            warn!(
                copy = detector.copy_threshold.value(),
                highlight = detector.highlight_threshold.value(),
                "Highlight threshold is looser than the copy threshold"
            );
        }
    }

    Ok(())
}
