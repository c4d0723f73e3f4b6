//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

const DEFAULT_HUGGINGFACE_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Default target language → Hugging Face model mapping.
/// All of these models translate from English only.
const DEFAULT_HUGGINGFACE_MODELS: &[(&str, &str)] = &[
    ("French", "Helsinki-NLP/opus-mt-en-fr"),
    ("Spanish", "Helsinki-NLP/opus-mt-en-es"),
    ("Japanese", "Helsinki-NLP/opus-mt-en-jap"),
    ("German", "Helsinki-NLP/opus-mt-en-de"),
    ("Italian", "Helsinki-NLP/opus-mt-en-it"),
    ("Portuguese", "Helsinki-NLP/opus-mt-en-pt"),
];

/// Configuration for the translation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Credential for the free Hugging Face inference API
    pub huggingface_api_key: Option<String>,
    /// Credential for the paid OpenAI API
    pub openai_api_key: Option<String>,
    pub huggingface_endpoint: String,
    pub openai_endpoint: String,
    pub openai_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
    /// Target language display name → model id
    pub huggingface_models: BTreeMap<String, String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            huggingface_api_key: None,
            openai_api_key: None,
            huggingface_endpoint: DEFAULT_HUGGINGFACE_ENDPOINT.to_string(),
            openai_endpoint: DEFAULT_OPENAI_ENDPOINT.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: 150,
            temperature: 0.1,
            timeout_ms: 30000,
            huggingface_models: default_huggingface_models(),
        }
    }
}

fn default_huggingface_models() -> BTreeMap<String, String> {
    DEFAULT_HUGGINGFACE_MODELS
        .iter()
        .map(|(language, model)| (language.to_string(), model.to_string()))
        .collect()
}

/// Trim a value, treating blank ones as absent
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Read an environment variable, treating blank values as absent
fn env_non_empty(key: &str) -> Option<String> {
    non_blank(std::env::var(key).ok().as_deref())
}

impl TranslatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Both credentials are optional; a missing one only narrows the
    /// fallback chain.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let huggingface_endpoint = env_non_empty("HUGGINGFACE_ENDPOINT")
            .unwrap_or(defaults.huggingface_endpoint);

        let openai_endpoint =
            env_non_empty("OPENAI_ENDPOINT").unwrap_or(defaults.openai_endpoint);

        let openai_model = env_non_empty("OPENAI_MODEL").unwrap_or(defaults.openai_model);

        let max_tokens = env_non_empty("OPENAI_MAX_TOKENS")
            .unwrap_or_else(|| "150".to_string())
            .parse::<u32>()?;

        let temperature = env_non_empty("OPENAI_TEMPERATURE")
            .unwrap_or_else(|| "0.1".to_string())
            .parse::<f32>()?;

        let timeout_ms = env_non_empty("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|| "30000".to_string())
            .parse::<u64>()?;

        Ok(Self {
            huggingface_api_key: env_non_empty("HUGGINGFACE_API_KEY"),
            openai_api_key: env_non_empty("OPENAI_API_KEY"),
            huggingface_endpoint,
            openai_endpoint,
            openai_model,
            max_tokens,
            temperature,
            timeout_ms,
            huggingface_models: defaults.huggingface_models,
        })
    }

    /// Load from the environment and validate
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)?;
        config.normalize_credentials();
        Ok(config)
    }

    /// Trim both credentials; a blank one becomes absent
    pub fn normalize_credentials(&mut self) {
        self.huggingface_api_key = non_blank(self.huggingface_api_key.as_deref());
        self.openai_api_key = non_blank(self.openai_api_key.as_deref());
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.huggingface_endpoint.is_empty() {
            return Err(anyhow::anyhow!("Hugging Face endpoint is required"));
        }

        if self.openai_endpoint.is_empty() {
            return Err(anyhow::anyhow!("OpenAI endpoint is required"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if self.max_tokens == 0 {
            return Err(anyhow::anyhow!("max_tokens must be greater than 0"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(anyhow::anyhow!("temperature must be between 0 and 2"));
        }

        Ok(())
    }

    /// True when neither provider has a credential
    pub fn is_demo_mode(&self) -> bool {
        self.huggingface_api_key.is_none() && self.openai_api_key.is_none()
    }

    /// Log which providers are available at startup
    pub fn log_summary(&self) {
        info!(
            "Hugging Face: {}, OpenAI: {} ({})",
            if self.huggingface_api_key.is_some() { "configured" } else { "not configured" },
            if self.openai_api_key.is_some() { "configured" } else { "not configured" },
            self.openai_model
        );

        if self.is_demo_mode() {
            info!("No provider credentials found, running in demo mode");
        }
    }
}
