//! Release check command.

use clap::Args;
use serde::Serialize;

use ttskit_cli::release::{self, GITHUB_API_URL, RELEASE_REPO};

use super::{output_result, print_info, print_success, print_verbose};
use crate::Cli;

/// Version of this binary.
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check for a newer release.
///
/// Reports the latest published version and, when it is newer, where to
/// download the binary for this platform.
#[derive(Args)]
pub struct UpdateCommand {}

#[derive(Serialize)]
struct UpdateResult {
    current: String,
    latest: String,
    update_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_url: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    release_url: String,
}

impl UpdateCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        print_verbose(cli, &format!("Checking {} for releases", RELEASE_REPO));
        let latest = release::latest_release(GITHUB_API_URL, RELEASE_REPO)
            .await
            .map_err(|e| anyhow::anyhow!("could not check for updates: {}", e))?;

        print_verbose(cli, &format!("Latest release parts: {:?}", latest.version()));
        let update_available = release::is_newer(&latest.tag_name, CURRENT_VERSION);
        let download_url = update_available.then(|| {
            release::asset_url(RELEASE_REPO, &latest.tag_name, &release::platform_binary())
        });

        if update_available {
            print_info(&format!(
                "New version available: {} (current: {})",
                latest.tag_name, CURRENT_VERSION
            ));
        } else {
            print_success(&format!("Already up to date ({})", CURRENT_VERSION));
        }

        output_result(
            &UpdateResult {
                current: CURRENT_VERSION.to_string(),
                latest: latest.tag_name.clone(),
                update_available,
                download_url,
                release_url: latest.html_url,
            },
            cli.json,
        )
    }
}
