//! tts - text-to-speech and voice cloning from the command line.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ConfigureCommand, GenerateCommand, UpdateCommand, VoiceCommand};

/// tts - text-to-speech and voice cloning from the command line.
///
/// Converts text files to speech with a Fish Audio voice model and creates
/// voice models from a directory of audio samples.
///
///   - generate: synthesize speech from .txt files
///   - voice: upload samples to create a voice model, list your models
///   - configure: API key and defaults
///   - update: check for a newer release
///
/// Configuration is stored in ~/.config/tts/config.toml.
#[derive(Parser)]
#[command(name = "tts")]
#[command(about = "Fish Audio text-to-speech CLI")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.config/tts/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Read FISH_API_KEY from this env file instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert text files to speech
    Generate(GenerateCommand),
    /// Manage API key and defaults
    Configure(ConfigureCommand),
    /// Create and list voice models
    Voice(VoiceCommand),
    /// Check for a newer release
    Update(UpdateCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Generate(cmd) => cmd.run(&cli).await,
        Commands::Configure(cmd) => cmd.run(&cli).await,
        Commands::Voice(cmd) => cmd.run(&cli).await,
        Commands::Update(cmd) => cmd.run(&cli).await,
    }
}
