use std::path::{Path, PathBuf};

use pdfquiz::config::{self, LlmConfig, QuizConfig};
use pdfquiz::errors::{QuizError, RetryConfig};
use pdfquiz::extract;
use pdfquiz::llm::{self, LLMProvider};
use tracing::{debug, info};

use crate::cli::commands::LlmArgs;

pub async fn load_config(path: Option<&str>) -> Result<QuizConfig, QuizError> {
    match path {
        Some(p) => config::parse_config(&PathBuf::from(p)).await,
        None => Ok(QuizConfig::default()),
    }
}

/// Merge CLI flags over the file configuration. The environment is consulted
/// for the API key only when neither supplies one.
pub fn build_llm_config(args: &LlmArgs, file_config: &QuizConfig) -> LlmConfig {
    let mut llm = file_config.llm();
    if let Some(provider) = &args.provider {
        llm.provider = provider.clone();
    }
    if args.model.is_some() {
        llm.model = args.model.clone();
    }
    if args.base_url.is_some() {
        llm.base_url = args.base_url.clone();
    }
    llm.api_key = args.api_key.clone()
        .or(llm.api_key)
        .or_else(|| std::env::var("OPENAI_API_KEY").ok());
    llm
}

pub struct Session {
    pub config: QuizConfig,
    pub provider: Box<dyn LLMProvider>,
    pub retry: RetryConfig,
}

impl Session {
    pub async fn open(args: &LlmArgs) -> Result<Self, QuizError> {
        let config = load_config(args.config.as_deref()).await?;
        let llm_config = build_llm_config(args, &config);
        let provider = llm::create_provider(&llm_config)?;
        let retry = llm_config
            .max_retries
            .map(|max_retries| RetryConfig { max_retries })
            .unwrap_or_default();
        debug!(provider = provider.provider_name(), model = provider.model_name(), "LLM provider ready");
        Ok(Self { config, provider, retry })
    }

    /// Extract and clean the text of a PDF within the configured page limit.
    pub fn read_pdf(&self, path: &Path) -> Result<String, QuizError> {
        let raw = self.read_pdf_raw(path)?;
        Ok(extract::clean_text(&raw))
    }

    pub fn read_pdf_raw(&self, path: &Path) -> Result<String, QuizError> {
        let pages = extract::ensure_page_limit(path, self.config.max_pages())?;
        info!(path = %path.display(), pages, "Reading PDF");
        extract::extract_text_from_pdf(path)
    }
}

pub fn read_text_arg(inline: Option<&str>, file: Option<&str>, what: &str) -> Result<String, QuizError> {
    match (inline, file) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => Err(QuizError::InvalidInput(format!("No {} given", what))),
    }
}
