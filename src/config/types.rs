use serde::{Deserialize, Serialize};

use crate::extract::pdf::DEFAULT_MAX_PAGES;
use crate::originality::DetectorConfig;
use crate::quiz::QuizSettings;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct QuizConfig {
    pub llm: Option<LlmConfig>,
    pub detector: Option<DetectorConfig>,
    pub quiz: Option<QuizSettings>,
    pub pdf: Option<PdfConfig>,
}

impl QuizConfig {
    pub fn llm(&self) -> LlmConfig {
        self.llm.clone().unwrap_or_default()
    }

    pub fn detector(&self) -> DetectorConfig {
        self.detector.clone().unwrap_or_default()
    }

    pub fn quiz(&self) -> QuizSettings {
        self.quiz.clone().unwrap_or_default()
    }

    pub fn max_pages(&self) -> usize {
        self.pdf.as_ref().and_then(|p| p.max_pages).unwrap_or(DEFAULT_MAX_PAGES)
    }
}

/// Connection settings for the remote completion service. Credentials live
/// here and are handed to the client explicitly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

fn default_provider() -> String {
    "openai".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            model: None,
            base_url: None,
            timeout_secs: None,
            max_retries: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PdfConfig {
    pub max_pages: Option<usize>,
}
