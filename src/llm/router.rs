use std::time::Duration;

use crate::config::{resolve_credential, LlmConfig};
use crate::errors::QuizError;
use super::openai::{OpenAIProvider, OPENAI_BASE_URL};
use super::provider::LLMProvider;

pub const SUPPORTED_PROVIDERS: &[&str] = &["openai", "local"];
pub const LOCAL_BASE_URL: &str = "http://localhost:11434/v1";

pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LLMProvider>, QuizError> {
    let api_key = config
        .api_key
        .as_deref()
        .map(resolve_credential)
        .unwrap_or_default();
    let model = config.model.as_deref();

    let provider = match config.provider.as_str() {
        "openai" => {
            if api_key.is_empty() || api_key.starts_with('$') {
                return Err(QuizError::Config(
                    "OpenAI API key not found. Pass --api-key, set llm.api_key, or export OPENAI_API_KEY.".into(),
                ));
            }
            let base_url = config.base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
            OpenAIProvider::with_base_url(&api_key, model, base_url)
        }
        "local" => {
            let base_url = config.base_url.as_deref().unwrap_or(LOCAL_BASE_URL);
            OpenAIProvider::with_base_url(&api_key, model, base_url)
        }
        other => return Err(QuizError::Config(format!("Unknown LLM provider: {}", other))),
    };

    let provider = match config.timeout_secs {
        Some(secs) => provider.with_timeout(Duration::from_secs(secs))?,
        None => provider,
    };
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_requires_key() {
        let config = LlmConfig::default();
        assert!(matches!(create_provider(&config), Err(QuizError::Config(_))));
    }

    #[test]
    fn test_unresolved_env_reference_is_missing_key() {
        let config = LlmConfig {
            api_key: Some("$PDFQUIZ_ROUTER_UNSET_KEY".into()),
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn test_openai_with_key() {
        let config = LlmConfig { api_key: Some("sk-test".into()), ..Default::default() };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.model_name(), "gpt-4");
    }

    #[test]
    fn test_local_needs_no_key() {
        let config = LlmConfig {
            provider: "local".into(),
            model: Some("llama3".into()),
            timeout_secs: Some(30),
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), "openai_compatible");
        assert_eq!(provider.model_name(), "llama3");
    }

    #[test]
    fn test_unknown_provider() {
        let config = LlmConfig { provider: "telegraph".into(), ..Default::default() };
        assert!(matches!(create_provider(&config), Err(QuizError::Config(_))));
    }
}
