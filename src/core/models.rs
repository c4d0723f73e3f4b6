//! Core data models for translation

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Source language value meaning "let the provider figure it out"
pub const AUTO_DETECT: &str = "auto";

/// Source label reported when the source language was not given explicitly
pub const AUTO_DETECTED_LABEL: &str = "auto-detected";

/// Translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Target language display name, e.g. "French"
    pub target_lang: String,
    /// Source language display name, or [`AUTO_DETECT`]
    pub source_lang: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target_lang: target_lang.into(),
            source_lang: AUTO_DETECT.to_string(),
        }
    }

    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = source_lang.into();
        self
    }

    /// Whether the source language is left to auto-detection
    pub fn is_auto_source(&self) -> bool {
        self.source_lang == AUTO_DETECT
    }

    /// Label to report as the source language for providers that detect it
    pub fn source_label(&self) -> &str {
        if self.is_auto_source() {
            AUTO_DETECTED_LABEL
        } else {
            &self.source_lang
        }
    }
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TranslationResult {
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationResult {
    pub fn new(
        translated_text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            translated_text: translated_text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_to_auto_source() {
        let request = TranslationRequest::new("Hello", "French");
        assert!(request.is_auto_source());
        assert_eq!(request.source_label(), AUTO_DETECTED_LABEL);
    }

    #[test]
    fn test_explicit_source_label() {
        let request = TranslationRequest::new("Hola", "French").with_source_lang("Spanish");
        assert!(!request.is_auto_source());
        assert_eq!(request.source_label(), "Spanish");
    }
}
