//! Chat session: message history, language selection and the in-flight guard

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::core::catalog::{LanguageCatalog, DEFAULT_LANGUAGE};
use crate::core::models::TranslationRequest;
use crate::core::resolver::{Resolution, TranslationResolver};

/// First bot message of every session
pub const GREETING: &str =
    "Select the language you want me to translate into, type your text and hit send!";

/// Session misuse; the chat stays usable after any of these
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Nothing to translate")]
    EmptyInput,

    #[error("A translation is already in progress")]
    Busy,

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),
}

/// One chat bubble
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub is_user: bool,
    /// Language code of a translation reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[schema(value_type = String)]
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Advisory shown next to a reply; never fatal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    /// Pick the notice for a resolution, if any.
    ///
    /// Demo mode gets an informational hint. Quota problems stay silent.
    /// Any other provider failure becomes a warning.
    pub fn for_resolution(resolution: &Resolution) -> Option<Self> {
        if resolution.is_demo_mode() {
            return Some(Self {
                level: NoticeLevel::Info,
                title: "Demo Mode".to_string(),
                description: "Add OPENAI_API_KEY or HUGGINGFACE_API_KEY to your environment for real AI translations. Using demo responses for now.".to_string(),
            });
        }

        resolution
            .failures()
            .find(|e| !e.is_unavailable() && !e.is_quota())
            .map(|e| Self {
                level: NoticeLevel::Warning,
                title: "Translation Error".to_string(),
                description: e.to_string(),
            })
    }
}

/// Result of one accepted submission
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Exchange {
    pub user: ChatMessage,
    pub reply: ChatMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

fn new_message(
    next_id: &AtomicU64,
    text: &str,
    is_user: bool,
    language: Option<String>,
) -> ChatMessage {
    ChatMessage {
        id: next_id.fetch_add(1, Ordering::Relaxed),
        text: text.to_string(),
        is_user,
        language,
        sent_at: Utc::now(),
    }
}

/// Clears the in-flight flag when dropped
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A single conversation with the translator
#[derive(Debug)]
pub struct ChatSession {
    resolver: Arc<TranslationResolver>,
    catalog: Arc<LanguageCatalog>,
    messages: Mutex<Vec<ChatMessage>>,
    selected_language: RwLock<String>,
    translating: AtomicBool,
    next_id: AtomicU64,
}

impl ChatSession {
    pub fn new(resolver: Arc<TranslationResolver>, catalog: Arc<LanguageCatalog>) -> Self {
        let next_id = AtomicU64::new(1);
        let greeting = new_message(&next_id, GREETING, false, None);

        Self {
            resolver,
            catalog,
            messages: Mutex::new(vec![greeting]),
            selected_language: RwLock::new(DEFAULT_LANGUAGE.to_string()),
            translating: AtomicBool::new(false),
            next_id,
        }
    }

    /// Switch the target language
    pub async fn select_language(&self, code: &str) -> Result<(), ChatError> {
        if !self.catalog.contains(code) {
            return Err(ChatError::UnknownLanguage(code.to_string()));
        }

        *self.selected_language.write().await = code.to_string();
        info!("Target language set to {}", code);
        Ok(())
    }

    pub async fn selected_language(&self) -> String {
        self.selected_language.read().await.clone()
    }

    /// Whether a submission is waiting on the resolver
    pub fn is_translating(&self) -> bool {
        self.translating.load(Ordering::Acquire)
    }

    /// Snapshot of the message history
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().await.clone()
    }

    /// Translate `text` into the selected language and record both bubbles.
    ///
    /// Blank input and submissions made while another one is in flight are
    /// rejected without touching the history.
    pub async fn submit(&self, text: &str) -> Result<Exchange, ChatError> {
        if text.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let _in_flight = InFlight::acquire(&self.translating).ok_or(ChatError::Busy)?;

        let code = self.selected_language().await;
        let target = self
            .catalog
            .display_name(&code)
            .map(str::to_string)
            .unwrap_or_else(|| code.clone());

        let user = new_message(&self.next_id, text, true, None);
        self.messages.lock().await.push(user.clone());
        debug!("Translating message {} into {}", user.id, target);

        let resolution = self
            .resolver
            .resolve_detailed(&TranslationRequest::new(text, target))
            .await;
        let notice = Notice::for_resolution(&resolution);

        let reply = new_message(
            &self.next_id,
            &resolution.result.translated_text,
            false,
            Some(code),
        );
        self.messages.lock().await.push(reply.clone());

        Ok(Exchange {
            user,
            reply,
            notice,
        })
    }
}
