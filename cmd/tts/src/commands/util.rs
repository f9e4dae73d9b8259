//! Utility functions for CLI commands.

use std::path::Path;

use ttskit_cli::config::{Config, load_config};
use ttskit_cli::credentials::{KeyChain, ResolvedKey};
use ttskit_fishaudio::Client;

use crate::Cli;

pub use ttskit_cli::output::{format_bytes, output_result, print_error, print_info, print_success};

/// Gets the configuration.
pub fn get_config(cli: &Cli) -> anyhow::Result<Config> {
    load_config(cli.config.as_deref())
}

/// Resolves the API key through the standard source chain.
pub fn get_api_key(cli: &Cli) -> anyhow::Result<ResolvedKey> {
    let chain = KeyChain::standard(cli.env_file.as_deref().map(Path::new));
    Ok(chain.require()?)
}

/// Prints verbose output if enabled.
pub fn print_verbose(cli: &Cli, msg: &str) {
    ttskit_cli::output::print_verbose(cli.verbose, msg);
}

/// Creates a Fish Audio client from the resolved key and config.
pub fn create_client(cli: &Cli, cfg: &Config) -> anyhow::Result<Client> {
    let key = get_api_key(cli)?;
    print_verbose(cli, &format!("Using API key from {}", key.source));

    let mut builder = Client::builder(key.value);
    if let Some(url) = cfg.base_url.as_deref().filter(|u| !u.is_empty()) {
        print_verbose(cli, &format!("Base URL: {}", url));
        builder = builder.base_url(url);
    }
    Ok(builder.build()?)
}
