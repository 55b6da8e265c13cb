//! Main entry point for Healthcare Translator

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use healthcare_translator::cli::commands::{self, Cli, Commands};
use healthcare_translator::core::config::{self, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging before config so its warnings are emitted
    let log_level = if cli.debug() {
        "debug"
    } else {
        config::log_directive(&std::env::var("LOG_LEVEL").unwrap_or_default())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("healthcare_translator={log_level},tower_http={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    info!("Loaded {} configuration", config.environment);

    // Execute command
    match cli.command {
        Some(Commands::Server(args)) => {
            commands::handle_server(config, args).await?;
        }
        Some(Commands::Translate {
            text,
            source_lang,
            target_lang,
        }) => {
            commands::handle_translate(config, text, source_lang, target_lang).await?;
        }
        Some(Commands::Speak {
            text,
            language,
            output,
        }) => {
            commands::handle_speak(config, text, language, output).await?;
        }
        Some(Commands::Voices) => {
            commands::handle_voices();
        }
        None => {
            commands::handle_server(config, cli.server).await?;
        }
    }

    Ok(())
}
