//! Translation resolver: ordered provider fallback ending in the phrase dictionary

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::TranslatorConfig;
use crate::core::dictionary::PhraseDictionary;
use crate::core::errors::TranslationError;
use crate::core::models::{TranslationRequest, TranslationResult};
use crate::providers::{HuggingFaceProvider, OpenAiProvider, TranslationProvider};

/// What happened when the resolver reached one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Not configured, never called
    Skipped,
    Failed(TranslationError),
    Succeeded,
}

/// One step of the fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAttempt {
    pub provider: &'static str,
    pub outcome: AttemptOutcome,
}

/// Which step produced the final result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsweredBy {
    Provider(&'static str),
    Dictionary,
}

/// Full report of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub result: TranslationResult,
    pub answered_by: AnsweredBy,
    pub attempts: Vec<ProviderAttempt>,
}

impl Resolution {
    /// Provider errors absorbed along the way
    pub fn failures(&self) -> impl Iterator<Item = &TranslationError> {
        self.attempts.iter().filter_map(|a| match &a.outcome {
            AttemptOutcome::Failed(e) => Some(e),
            _ => None,
        })
    }

    /// The dictionary answered because no provider had a credential
    pub fn is_demo_mode(&self) -> bool {
        self.answered_by == AnsweredBy::Dictionary
            && self.attempts.iter().all(|a| match &a.outcome {
                AttemptOutcome::Skipped => true,
                AttemptOutcome::Failed(e) => e.is_unavailable(),
                AttemptOutcome::Succeeded => false,
            })
    }
}

/// Tries each provider once, in order, and falls back to the dictionary.
///
/// [`resolve`](Self::resolve) is total: provider errors are logged and
/// absorbed, never returned.
#[derive(Clone)]
pub struct TranslationResolver {
    providers: Vec<Arc<dyn TranslationProvider>>,
    dictionary: Arc<PhraseDictionary>,
}

impl std::fmt::Debug for TranslationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("TranslationResolver")
            .field("providers", &names)
            .finish()
    }
}

impl TranslationResolver {
    /// Create a resolver over an explicit provider chain
    pub fn new(
        providers: Vec<Arc<dyn TranslationProvider>>,
        dictionary: Arc<PhraseDictionary>,
    ) -> Self {
        Self {
            providers,
            dictionary,
        }
    }

    /// Standard chain: Hugging Face, then OpenAI, then the dictionary
    pub fn from_config(config: &TranslatorConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let providers: Vec<Arc<dyn TranslationProvider>> = vec![
            Arc::new(HuggingFaceProvider::new(config)?),
            Arc::new(OpenAiProvider::new(config)),
        ];

        Ok(Self::new(providers, Arc::new(PhraseDictionary::builtin())))
    }

    /// Provider names in the order they are tried
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Translate, always producing a result
    pub async fn resolve(&self, request: &TranslationRequest) -> TranslationResult {
        self.resolve_detailed(request).await.result
    }

    /// Translate and report every step taken
    pub async fn resolve_detailed(&self, request: &TranslationRequest) -> Resolution {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let name = provider.name();

            if !provider.is_configured() {
                debug!("{} not configured, skipping", name);
                attempts.push(ProviderAttempt {
                    provider: name,
                    outcome: AttemptOutcome::Skipped,
                });
                continue;
            }

            match provider.translate(request).await {
                Ok(result) => {
                    debug!("{} translated to {}", name, request.target_lang);
                    attempts.push(ProviderAttempt {
                        provider: name,
                        outcome: AttemptOutcome::Succeeded,
                    });
                    return Resolution {
                        result,
                        answered_by: AnsweredBy::Provider(name),
                        attempts,
                    };
                }
                Err(e) => {
                    log_failure(&e);
                    attempts.push(ProviderAttempt {
                        provider: name,
                        outcome: AttemptOutcome::Failed(e),
                    });
                }
            }
        }

        info!("All providers unavailable, using demo dictionary");
        Resolution {
            result: self.dictionary.translate(&request.text, &request.target_lang),
            answered_by: AnsweredBy::Dictionary,
            attempts,
        }
    }
}

fn log_failure(error: &TranslationError) {
    match error {
        TranslationError::ProviderUnavailable { .. } => {
            info!("{}, trying next provider", error)
        }
        TranslationError::MalformedResponse { .. } => {
            warn!("Provider returned malformed data: {}, trying next provider", error)
        }
        TranslationError::UnsupportedLanguage { .. } | TranslationError::RequestFailed { .. } => {
            warn!("Provider unreachable or misconfigured: {}, trying next provider", error)
        }
    }
}
