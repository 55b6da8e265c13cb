//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::core::config::AppConfig;
use crate::core::voices::VoiceMap;
use crate::server::{run_server, AppState};

/// Healthcare Translator - medical translation and speech backend
#[derive(Parser, Debug)]
#[command(name = "healthcare-translator", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server options used when no subcommand is given
    #[command(flatten)]
    pub server: ServerArgs,

    /// Command to run; defaults to the server
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Whether any flag asked for debug logging
    pub fn debug(&self) -> bool {
        self.verbose
            || self.server.debug
            || matches!(&self.command, Some(Commands::Server(args)) if args.debug)
    }
}

/// HTTP server options
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ServerArgs {
    /// Bind address
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Commands for Healthcare Translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server(ServerArgs),

    /// Translate text once and print the result
    Translate {
        /// Text to translate
        #[arg(long)]
        text: String,

        /// Source language code
        #[arg(short, long, default_value = "en")]
        source_lang: String,

        /// Target language code
        #[arg(short, long)]
        target_lang: String,
    },

    /// Synthesize speech into an mp3 file
    Speak {
        /// Text to read aloud
        #[arg(long)]
        text: String,

        /// Language code used to pick the voice
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Output mp3 path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List the language to voice mapping
    Voices,
}

/// Handle server command
pub async fn handle_server(config: AppConfig, args: ServerArgs) -> anyhow::Result<()> {
    let ServerArgs { host, port, .. } = args;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("📄 OpenAPI document: http://{}:{}/api-docs/openapi.json", host, port);

    run_server(config, host, port).await?;

    Ok(())
}

/// Handle one-shot translation command
pub async fn handle_translate(
    config: AppConfig,
    text: String,
    source_lang: String,
    target_lang: String,
) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;

    let translated = state
        .translator
        .translate(&text, &source_lang, &target_lang)
        .await?;

    println!("{}", translated);
    Ok(())
}

/// Handle speech synthesis command
pub async fn handle_speak(
    config: AppConfig,
    text: String,
    language: String,
    output: PathBuf,
) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;

    let audio = state.speech.synthesize_audio(&text, &language).await?;
    tokio::fs::write(&output, &audio).await?;

    info!("Wrote {} bytes of audio", audio.len());
    println!("✅ Saved {} ({})", output.display(), state.speech.voices().voice_for(&language));
    Ok(())
}

/// Handle voice listing command
pub fn handle_voices() {
    let voices = VoiceMap::builtin();
    for (language, voice) in voices.iter() {
        println!("{:<4} {}", language, voice);
    }
    println!("default: {}", voices.default_voice());
}
