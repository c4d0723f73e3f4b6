//! PollyGlot - chat translator library
//!
//! Sends text through an ordered chain of remote translation providers
//! (Hugging Face, then OpenAI) and falls back to a built-in phrase
//! dictionary when none of them can answer. Exposed as an HTTP API, an
//! interactive terminal chat and a one-shot CLI.

#![forbid(unsafe_code)]

pub mod chat;
pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

// Re-export key types for convenience
pub use chat::{ChatError, ChatSession, Exchange, Notice};
pub use self::core::{
    catalog::{Language, LanguageCatalog},
    config::TranslatorConfig,
    dictionary::PhraseDictionary,
    errors::TranslationError,
    models::{TranslationRequest, TranslationResult},
    resolver::{AnsweredBy, Resolution, TranslationResolver},
};
pub use providers::{HuggingFaceProvider, OpenAiProvider, TranslationProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
