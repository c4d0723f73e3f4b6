//! OpenAI chat-completions client (secondary, paid provider)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{http_client, TranslationProvider};
use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{TranslationRequest, TranslationResult};
use crate::core::once::OnceClient;

const SYSTEM_PROMPT: &str = "You are a professional translator. Provide accurate translations without any additional commentary or explanation.";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<PromptMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct PromptMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// HTTP client plus credential, built once on first use
#[derive(Debug)]
struct ChatClient {
    http: reqwest::Client,
    api_key: String,
}

/// Translator backed by an OpenAI chat model
#[derive(Debug)]
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    client: OnceClient<ChatClient>,
}

impl OpenAiProvider {
    pub const NAME: &'static str = "openai";

    /// Create the provider. The credential is checked and the HTTP client
    /// built lazily, on the first translation.
    pub fn new(config: &TranslatorConfig) -> Self {
        let api_key = config.openai_api_key.clone();
        let timeout_ms = config.timeout_ms;

        let client = OnceClient::new(move || {
            let api_key = api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| TranslationError::ProviderUnavailable {
                    provider: Self::NAME,
                    message: "OpenAI API key is not configured. Please add OPENAI_API_KEY to your environment variables.".to_string(),
                })?;

            let http = http_client(timeout_ms).map_err(|e| TranslationError::ProviderUnavailable {
                provider: Self::NAME,
                message: e.to_string(),
            })?;

            debug!("OpenAI client initialized");
            Ok(ChatClient {
                http,
                api_key: api_key.to_string(),
            })
        });

        Self {
            endpoint: config.openai_endpoint.clone(),
            model: config.openai_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client,
        }
    }

    /// Whether the lazy client has been built (or failed to build)
    pub fn is_initialized(&self) -> bool {
        self.client.is_initialized()
    }
}

/// Instruction sent as the user message
pub(crate) fn build_prompt(request: &TranslationRequest) -> String {
    if request.is_auto_source() {
        format!(
            "Translate the following text to {}. Only return the translation, no explanation: \"{}\"",
            request.target_lang, request.text
        )
    } else {
        format!(
            "Translate the following text from {} to {}. Only return the translation, no explanation: \"{}\"",
            request.source_lang, request.target_lang, request.text
        )
    }
}

#[async_trait]
impl TranslationProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let client = self.client.get()?;

        let prompt = build_prompt(request);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                PromptMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                PromptMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = client
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", client.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::RequestFailed {
                provider: Self::NAME,
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(TranslationError::RequestFailed {
                provider: Self::NAME,
                status: Some(status.as_u16()),
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| TranslationError::MalformedResponse {
                    provider: Self::NAME,
                    message: e.to_string(),
                })?;

        // An empty reply echoes the input rather than failing
        let translated = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| request.text.clone());

        Ok(TranslationResult::new(
            translated,
            request.source_label(),
            request.target_lang.clone(),
        ))
    }
}
