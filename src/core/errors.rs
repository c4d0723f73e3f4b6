//! Custom error types for translation operations

use thiserror::Error;

/// Errors raised by a single translation provider.
///
/// None of these reach the end user: the resolver absorbs every variant and
/// moves on to the next step of the fallback chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// Credential missing or client could not be initialized
    #[error("{provider} unavailable: {message}")]
    ProviderUnavailable {
        provider: &'static str,
        message: String,
    },

    /// No model configured for the requested target language
    #[error("{provider} does not support translation to {language}")]
    UnsupportedLanguage {
        provider: &'static str,
        language: String,
    },

    /// Transport failure or non-success HTTP status
    #[error("{provider} request failed{}: {message}", status_suffix(.status))]
    RequestFailed {
        provider: &'static str,
        status: Option<u16>,
        message: String,
    },

    /// Reply did not have a recognizable shape
    #[error("{provider} returned a malformed response: {message}")]
    MalformedResponse {
        provider: &'static str,
        message: String,
    },
}

impl TranslationError {
    /// Name of the provider that produced this error.
    pub fn provider(&self) -> &'static str {
        match self {
            TranslationError::ProviderUnavailable { provider, .. }
            | TranslationError::UnsupportedLanguage { provider, .. }
            | TranslationError::RequestFailed { provider, .. }
            | TranslationError::MalformedResponse { provider, .. } => *provider,
        }
    }

    /// Credential absence; a normal condition in demo mode.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TranslationError::ProviderUnavailable { .. })
    }

    /// The provider answered, but with data we could not use.
    pub fn is_malformed(&self) -> bool {
        matches!(self, TranslationError::MalformedResponse { .. })
    }

    /// Rate limit or exhausted quota on the provider side.
    pub fn is_quota(&self) -> bool {
        match self {
            TranslationError::RequestFailed { status, message, .. } => {
                *status == Some(429) || message.to_lowercase().contains("quota")
            }
            _ => false,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
