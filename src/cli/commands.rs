//! CLI command definitions and handlers

use clap::Subcommand;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::chat::{ChatError, ChatSession, NoticeLevel};
use crate::core::catalog::{LanguageCatalog, DEFAULT_LANGUAGE};
use crate::core::config::TranslatorConfig;
use crate::core::models::{TranslationRequest, AUTO_DETECT};
use crate::core::resolver::TranslationResolver;

/// Commands for PollyGlot
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a single piece of text
    Translate {
        /// Text to translate
        text: String,

        /// Target language code or name (default: fr)
        #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
        target_lang: String,

        /// Source language (auto-detect if not specified)
        #[arg(long, default_value = AUTO_DETECT)]
        source_lang: String,
    },

    /// Start an interactive chat session
    Chat {
        /// Initial target language code (default: fr)
        #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
        target_lang: String,
    },

    /// Start HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Enable debug mode
        #[arg(long)]
        debug: bool,
    },

    /// List supported languages
    Languages,
}

/// Handle one-shot translation command
pub async fn handle_translate(
    config: TranslatorConfig,
    text: String,
    target_lang: String,
    source_lang: String,
) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to translate");
    }

    let catalog = LanguageCatalog::builtin();
    let resolver = TranslationResolver::from_config(&config)?;

    let source_lang = if source_lang == AUTO_DETECT {
        source_lang
    } else {
        catalog.resolve_name(&source_lang)
    };
    let request = TranslationRequest::new(text, catalog.resolve_name(&target_lang))
        .with_source_lang(source_lang);

    info!("Translating into {}", request.target_lang);
    let result = resolver.resolve(&request).await;

    println!("{}", result.translated_text);

    Ok(())
}

/// Handle interactive chat command
pub async fn handle_chat(config: TranslatorConfig, target_lang: String) -> anyhow::Result<()> {
    let catalog = Arc::new(LanguageCatalog::builtin());
    let resolver = Arc::new(TranslationResolver::from_config(&config)?);
    let session = ChatSession::new(resolver, catalog.clone());

    session.select_language(&target_lang).await?;

    for message in session.messages().await {
        println!("🦜 {}", message.text);
    }
    println!("   Commands: /lang <code>, /languages, /history, /quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim_end();

        if let Some(command) = input.strip_prefix('/') {
            let mut parts = command.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("quit") | Some("exit"), _) => break,
                (Some("lang"), Some(code)) => match session.select_language(code).await {
                    Ok(()) => println!("🌐 Translating into {}", catalog.resolve_name(code)),
                    Err(e) => eprintln!("⚠️  {}", e),
                },
                (Some("languages"), _) => print_languages(&catalog),
                (Some("history"), _) => {
                    for message in session.messages().await {
                        let who = if message.is_user { "you" } else { "🦜" };
                        println!("[{}] {} {}", message.sent_at.format("%H:%M:%S"), who, message.text);
                    }
                }
                _ => eprintln!("⚠️  Unknown command: /{}", command),
            }
            continue;
        }

        match session.submit(input).await {
            Ok(exchange) => {
                println!("🦜 {}", exchange.reply.text);
                if let Some(notice) = exchange.notice {
                    let icon = match notice.level {
                        NoticeLevel::Info => "ℹ️ ",
                        NoticeLevel::Warning => "⚠️ ",
                    };
                    eprintln!("{} {}: {}", icon, notice.title, notice.description);
                }
            }
            // Blank lines are simply ignored
            Err(ChatError::EmptyInput) => {}
            Err(e) => eprintln!("⚠️  {}", e),
        }
    }

    Ok(())
}

/// Handle server command
pub async fn handle_server(
    config: TranslatorConfig,
    host: String,
    port: u16,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("📊 API Documentation: http://{}:{}/api-docs/openapi.json", host, port);

    run_server(host, port, config).await?;

    Ok(())
}

/// Handle languages command
pub fn handle_languages() -> anyhow::Result<()> {
    print_languages(&LanguageCatalog::builtin());
    Ok(())
}

fn print_languages(catalog: &LanguageCatalog) {
    for language in catalog.all() {
        let marker = if language.offered { "*" } else { " " };
        println!("{} {}  {}", marker, language.code, language.name);
    }
}
