//! Main entry point for the PollyGlot CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pollyglot::cli::commands::{self, Commands};
use pollyglot::TranslatorConfig;

/// PollyGlot - perfect translation every time
#[derive(Parser, Debug)]
#[command(name = "pollyglot", version, about, long_about = None)]
struct Args {
    /// Hugging Face API key (optional, defaults to HUGGINGFACE_API_KEY env var)
    #[arg(long)]
    huggingface_api_key: Option<String>,

    /// OpenAI API key (optional, defaults to OPENAI_API_KEY env var)
    #[arg(long)]
    openai_api_key: Option<String>,

    /// Load configuration from a JSON file instead of the environment
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Args {
    /// Build the configuration, applying CLI overrides last
    fn load_config(&self) -> anyhow::Result<TranslatorConfig> {
        let mut config = match &self.config {
            Some(path) => TranslatorConfig::from_file(path)?,
            None => TranslatorConfig::load()?,
        };

        if let Some(key) = &self.huggingface_api_key {
            config.huggingface_api_key = Some(key.clone());
        }

        if let Some(key) = &self.openai_api_key {
            config.openai_api_key = Some(key.clone());
        }

        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }

        config.normalize_credentials();
        config.validate()?;
        config.log_summary();
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let debug = args.verbose || matches!(args.command, Some(Commands::Server { debug: true, .. }));
    let log_level = if debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.load_config()?;

    // Execute command
    match args.command {
        Some(Commands::Translate {
            text,
            target_lang,
            source_lang,
        }) => {
            commands::handle_translate(config, text, target_lang, source_lang).await?;
        }
        Some(Commands::Chat { target_lang }) => {
            commands::handle_chat(config, target_lang).await?;
        }
        Some(Commands::Server { host, port, .. }) => {
            commands::handle_server(config, host, port).await?;
        }
        Some(Commands::Languages) => {
            commands::handle_languages()?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
