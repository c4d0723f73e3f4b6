//! Remote translation providers
//!
//! Each provider wraps one remote API and normalizes its reply into a
//! [`TranslationResult`]. The resolver walks them in priority order.

pub mod huggingface;
pub mod openai;

use async_trait::async_trait;

use crate::core::errors::Result;
use crate::core::models::{TranslationRequest, TranslationResult};

pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;

/// A single "translate attempt" strategy in the fallback chain
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short name used in logs and attempt reports
    fn name(&self) -> &'static str;

    /// Whether the resolver should attempt this provider at all.
    ///
    /// Providers that check their credential lazily keep the default and
    /// report `ProviderUnavailable` from [`translate`](Self::translate).
    fn is_configured(&self) -> bool {
        true
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult>;
}

/// Build the shared HTTP client with a bounded request timeout
pub(crate) fn http_client(timeout_ms: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(timeout_ms))
        .pool_idle_timeout(Some(std::time::Duration::from_secs(30)))
        .build()
}
