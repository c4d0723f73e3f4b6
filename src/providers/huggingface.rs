//! Hugging Face inference API client (primary, cost-free provider)

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use super::{http_client, TranslationProvider};
use crate::core::config::{non_blank, TranslatorConfig};
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{TranslationRequest, TranslationResult};

/// The opus-mt models only translate out of English
const SOURCE_LABEL: &str = "English";

/// Translator backed by per-language Hugging Face models
#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    models: BTreeMap<String, String>,
}

impl HuggingFaceProvider {
    pub const NAME: &'static str = "huggingface";

    pub fn new(config: &TranslatorConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: http_client(config.timeout_ms)?,
            endpoint: config.huggingface_endpoint.trim_end_matches('/').to_string(),
            api_key: non_blank(config.huggingface_api_key.as_deref()),
            models: config.huggingface_models.clone(),
        })
    }

    fn model_for(&self, target_lang: &str) -> Result<&str> {
        self.models
            .get(target_lang)
            .map(String::as_str)
            .ok_or_else(|| TranslationError::UnsupportedLanguage {
                provider: Self::NAME,
                language: target_lang.to_string(),
            })
    }
}

/// Pull the translated text out of either reply shape:
/// `[{"translation_text": ...}]` or `{"translation_text": ...}`
pub(crate) fn extract_translation(reply: &Value) -> Option<&str> {
    let candidate = match reply {
        Value::Array(items) => items.first()?,
        other => other,
    };

    candidate
        .get("translation_text")?
        .as_str()
        .filter(|text| !text.is_empty())
}

#[async_trait]
impl TranslationProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TranslationError::ProviderUnavailable {
                provider: Self::NAME,
                message: "Hugging Face API key not found".to_string(),
            })?;

        let model = self.model_for(&request.target_lang)?;
        let url = format!("{}/{}", self.endpoint, model);
        debug!("Sending {} chars to {}", request.text.len(), url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&serde_json::json!({ "inputs": request.text }))
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

        let reply: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse {
                provider: Self::NAME,
                message: e.to_string(),
            })?;

        let translated = extract_translation(&reply).ok_or_else(|| {
            TranslationError::MalformedResponse {
                provider: Self::NAME,
                message: "Unexpected response format".to_string(),
            }
        })?;

        Ok(TranslationResult::new(
            translated,
            SOURCE_LABEL,
            request.target_lang.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::test_support::spawn_mock;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    fn provider(base: &str, api_key: Option<&str>) -> HuggingFaceProvider {
        let config = TranslatorConfig {
            huggingface_api_key: api_key.map(str::to_string),
            huggingface_endpoint: format!("{}/models", base),
            timeout_ms: 5000,
            ..Default::default()
        };
        HuggingFaceProvider::new(&config).unwrap()
    }

    /// Mock that answers with a fixed status and body for every model
    async fn fixed_reply(status: StatusCode, body: &'static str) -> String {
        let router = Router::new().route(
            "/models/:org/:model",
            post(move || async move { (status, body) }),
        );
        spawn_mock(router).await
    }

    #[test]
    fn test_extract_list_shape() {
        let reply = json!([{ "translation_text": "Bonjour" }]);
        assert_eq!(extract_translation(&reply), Some("Bonjour"));
    }

    #[test]
    fn test_extract_object_shape() {
        let reply = json!({ "translation_text": "Hola" });
        assert_eq!(extract_translation(&reply), Some("Hola"));
    }

    #[test]
    fn test_extract_rejects_unknown_shapes() {
        assert_eq!(extract_translation(&json!([])), None);
        assert_eq!(extract_translation(&json!({ "generated_text": "Hola" })), None);
        assert_eq!(extract_translation(&json!([{ "translation_text": "" }])), None);
        assert_eq!(extract_translation(&json!("Hola")), None);
    }

    #[tokio::test]
    async fn test_translate_sends_model_and_credential() {
        let router = Router::new().route(
            "/models/:org/:model",
            post(
                |Path((org, model)): Path<(String, String)>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| async move {
                    let authorized = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        == Some("Bearer hf_test");
                    if !authorized {
                        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "bad key" })));
                    }
                    let text = format!("{}/{}:{}", org, model, body["inputs"].as_str().unwrap_or(""));
                    (StatusCode::OK, Json(json!([{ "translation_text": text }])))
                },
            ),
        );
        let base = spawn_mock(router).await;

        let result = provider(&base, Some("hf_test"))
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
            .unwrap();

        assert_eq!(result.translated_text, "Helsinki-NLP/opus-mt-en-fr:Hello");
        assert_eq!(result.source_lang, "English");
        assert_eq!(result.target_lang, "French");
    }

    #[tokio::test]
    async fn test_translate_object_reply() {
        let base = fixed_reply(StatusCode::OK, r#"{"translation_text": "Hallo"}"#).await;

        let result = provider(&base, Some("hf_test"))
            .translate(&TranslationRequest::new("Hello", "German"))
            .await
            .unwrap();

        assert_eq!(result.translated_text, "Hallo");
    }

    #[tokio::test]
    async fn test_server_error_is_request_failed() {
        let base = fixed_reply(StatusCode::INTERNAL_SERVER_ERROR, "model crashed").await;

        let err = provider(&base, Some("hf_test"))
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TranslationError::RequestFailed {
                provider: "huggingface",
                status: Some(500),
                message: "model crashed".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_unrecognized_reply_is_malformed() {
        let base = fixed_reply(StatusCode::OK, r#"[{"generated_text": "Bonjour"}]"#).await;
        let err = provider(&base, Some("hf_test"))
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
            .unwrap_err();
        assert!(err.is_malformed());

        let base = fixed_reply(StatusCode::OK, "not json").await;
        let err = provider(&base, Some("hf_test"))
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_unsupported_language() {
        let provider = provider("http://127.0.0.1:9", Some("hf_test"));

        let err = provider
            .translate(&TranslationRequest::new("Hello", "Korean"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TranslationError::UnsupportedLanguage {
                provider: "huggingface",
                language: "Korean".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let provider = provider("http://127.0.0.1:9", None);
        assert!(!provider.is_configured());

        let err = provider
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_blank_credential_is_not_configured() {
        let provider = provider("http://127.0.0.1:9", Some("   "));
        assert!(!provider.is_configured());

        let err = provider
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_slow_reply_times_out() {
        let router = Router::new().route(
            "/models/:org/:model",
            post(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Json(json!([{ "translation_text": "too late" }]))
            }),
        );
        let base = spawn_mock(router).await;
        let config = TranslatorConfig {
            huggingface_api_key: Some("hf_test".to_string()),
            huggingface_endpoint: format!("{}/models", base),
            timeout_ms: 200,
            ..Default::default()
        };

        let started = std::time::Instant::now();
        let err = HuggingFaceProvider::new(&config)
            .unwrap()
            .translate(&TranslationRequest::new("Hello", "French"))
            .await
            .unwrap_err();

        assert!(started.elapsed() < std::time::Duration::from_secs(2));
        assert!(matches!(
            err,
            TranslationError::RequestFailed { status: None, .. }
        ));
    }
}
