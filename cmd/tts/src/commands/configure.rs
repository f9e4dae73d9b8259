//! Configuration commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use ttskit_cli::credentials::{
    self, CredentialError, KeyChain, KeyringSource, StoredIn, credentials_path, mask_api_key,
};
use ttskit_fishaudio::AudioFormat;

use super::{get_config, output_result, print_info, print_success, print_verbose};
use crate::Cli;

/// Manage API key and defaults.
///
/// Configuration is stored in ~/.config/tts/config.toml. The API key goes to
/// the OS keyring, or to ~/.config/tts/credentials when no keyring is
/// available.
#[derive(Args)]
pub struct ConfigureCommand {
    #[command(subcommand)]
    command: ConfigureSubcommand,
}

#[derive(Subcommand)]
enum ConfigureSubcommand {
    /// Save your Fish Audio API key (get one at https://fish.audio)
    #[command(name = "api-key")]
    ApiKey {
        /// API key
        key: String,
    },
    /// Remove the saved API key
    #[command(name = "forget-api-key")]
    ForgetApiKey,
    /// Set the default voice model ID
    Voice {
        /// Voice model ID
        id: String,
    },
    /// Set the default output directory
    #[command(name = "output-dir")]
    OutputDir {
        /// Directory path
        dir: String,
    },
    /// Set the default audio format (mp3, wav, pcm)
    Format {
        /// Audio format
        format: AudioFormat,
    },
    /// Set the default speech speed (0.5 to 2.0)
    Speed {
        /// Speed multiplier
        speed: f32,
    },
    /// Show the current configuration
    Show,
    /// Restore the default configuration
    Reset,
}

#[derive(Serialize)]
struct ShowResult {
    config_file: String,
    default_voice: Option<String>,
    output_dir: String,
    format: AudioFormat,
    speed: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    api_key: Option<String>,
    api_key_source: Option<String>,
}

impl ConfigureCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            ConfigureSubcommand::ApiKey { key } => {
                let file = credentials_path().ok_or(CredentialError::NoConfigDir)?;
                match credentials::store_api_key(key, &KeyringSource::default(), &file)? {
                    StoredIn::Keyring => print_success("API key saved to the system keyring"),
                    StoredIn::File(path) => {
                        print_success(&format!("API key saved to {}", path.display()))
                    }
                }
                print_info("You can now use tts commands without setting FISH_API_KEY.");
                Ok(())
            }

            ConfigureSubcommand::ForgetApiKey => {
                let file = credentials_path().ok_or(CredentialError::NoConfigDir)?;
                if credentials::forget_api_key(&KeyringSource::default(), &file)? {
                    print_success("Saved API key removed");
                } else {
                    print_info("No saved API key found");
                }
                Ok(())
            }

            ConfigureSubcommand::Voice { id } => {
                let mut cfg = get_config(cli)?;
                cfg.update(|c| c.default_voice = Some(id.trim().to_string()))?;
                print_success(&format!("Default voice set to {}", id.trim()));
                Ok(())
            }

            ConfigureSubcommand::OutputDir { dir } => {
                let mut cfg = get_config(cli)?;
                cfg.update(|c| c.output_dir = dir.clone())?;
                print_success(&format!("Output directory set to {}", dir));
                Ok(())
            }

            ConfigureSubcommand::Format { format } => {
                let mut cfg = get_config(cli)?;
                cfg.update(|c| c.format = *format)?;
                print_success(&format!("Format set to {}", format));
                Ok(())
            }

            ConfigureSubcommand::Speed { speed } => {
                let mut cfg = get_config(cli)?;
                cfg.update(|c| c.speed = *speed)?;
                print_success(&format!("Speed set to {}", speed));
                Ok(())
            }

            ConfigureSubcommand::Show => {
                let cfg = get_config(cli)?;
                let chain = KeyChain::standard(cli.env_file.as_deref().map(std::path::Path::new));
                print_verbose(cli, &format!("API key sources: {}", chain.names().join(" > ")));
                let key = match chain.resolve() {
                    Ok(key) => key,
                    Err(e) => {
                        tracing::warn!(error = %e, "could not resolve API key");
                        None
                    }
                };

                let result = ShowResult {
                    config_file: cfg.path().display().to_string(),
                    default_voice: cfg.default_voice.clone(),
                    output_dir: cfg.output_dir.clone(),
                    format: cfg.format,
                    speed: cfg.speed,
                    base_url: cfg.base_url.clone(),
                    api_key: key.as_ref().map(|k| mask_api_key(&k.value)),
                    api_key_source: key.map(|k| k.source),
                };
                output_result(&result, cli.json)
            }

            ConfigureSubcommand::Reset => {
                let mut cfg = get_config(cli)?;
                cfg.reset()?;
                print_success(&format!("Configuration reset: {}", cfg.path().display()));
                Ok(())
            }
        }
    }
}
