//! Release lookup for the `update` command.
//!
//! Only checks for a newer release; downloading and replacing the binary is
//! left to the user.

use std::cmp::Ordering;

use serde::Deserialize;

/// Repository the `tts` binary is released from.
pub const RELEASE_REPO: &str = "guillempuche/text-to-speech";
/// GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = "tts-cli";

/// A published release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release tag, e.g. `v2026.1.15`.
    pub tag_name: String,
    /// Release page.
    #[serde(default)]
    pub html_url: String,
}

impl Release {
    /// Version parts of the tag.
    pub fn version(&self) -> Vec<u64> {
        parse_version(&self.tag_name)
    }
}

/// Fetches the latest release of `repo` from `api_base`.
pub async fn latest_release(api_base: &str, repo: &str) -> anyhow::Result<Release> {
    let url = format!("{}/repos/{}/releases/latest", api_base.trim_end_matches('/'), repo);
    tracing::debug!(url = %url, "fetching latest release");

    let resp = reqwest::Client::new()
        .get(&url)
        .header("Accept", "application/vnd.github.v3+json")
        .header("User-Agent", USER_AGENT)
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("release lookup failed: HTTP {}", status.as_u16());
    }
    Ok(resp.json().await?)
}

/// Parses a dotted version such as `v2026.1.15` into comparable parts.
///
/// A leading `v` is dropped; parts that are not numbers count as 0.
pub fn parse_version(version: &str) -> Vec<u64> {
    version
        .trim()
        .trim_start_matches('v')
        .split('.')
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}

/// Compares two version strings part by part.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    parse_version(a).cmp(&parse_version(b))
}

/// Reports whether `latest` is newer than `current`.
pub fn is_newer(latest: &str, current: &str) -> bool {
    compare_versions(latest, current) == Ordering::Greater
}

/// Release asset name for the given OS and architecture.
pub fn binary_name(os: &str, arch: &str) -> String {
    match os {
        "macos" if arch == "aarch64" || arch == "arm64" => "tts-macos-arm64".to_string(),
        "macos" => "tts-macos-x64".to_string(),
        "linux" => "tts-linux-x64".to_string(),
        "windows" => "tts-windows-x64.exe".to_string(),
        _ => format!("tts-{}-{}", os, arch),
    }
}

/// Release asset name for the running platform.
pub fn platform_binary() -> String {
    binary_name(std::env::consts::OS, std::env::consts::ARCH)
}

/// Download URL of a release asset.
pub fn asset_url(repo: &str, tag: &str, name: &str) -> String {
    format!("https://github.com/{}/releases/download/{}/{}", repo, tag, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("v2026.1.15"), vec![2026, 1, 15]);
        assert_eq!(parse_version("0.1.0"), vec![0, 1, 0]);
        assert_eq!(parse_version("v1.x.3"), vec![1, 0, 3]);
    }

    #[test]
    fn test_is_newer() {
        assert!(is_newer("v2026.2.1", "2026.1.15"));
        assert!(is_newer("v1.0.1", "v1.0"));
        assert!(!is_newer("v1.0.0", "1.0.0"));
        assert!(!is_newer("v0.9", "0.10"));
    }

    #[test]
    fn test_binary_name() {
        assert_eq!(binary_name("macos", "aarch64"), "tts-macos-arm64");
        assert_eq!(binary_name("macos", "x86_64"), "tts-macos-x64");
        assert_eq!(binary_name("linux", "x86_64"), "tts-linux-x64");
        assert_eq!(binary_name("windows", "x86_64"), "tts-windows-x64.exe");
        assert_eq!(binary_name("freebsd", "x86_64"), "tts-freebsd-x86_64");
    }

    #[test]
    fn test_asset_url() {
        assert_eq!(
            asset_url("owner/repo", "v1.2.3", "tts-linux-x64"),
            "https://github.com/owner/repo/releases/download/v1.2.3/tts-linux-x64"
        );
    }

    #[tokio::test]
    async fn test_latest_release() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/repos/owner/repo/releases/latest")
                    .header("user-agent", "tts-cli");
                then.status(200).json_body(serde_json::json!({
                    "tag_name": "v2026.3.1",
                    "html_url": "https://github.com/owner/repo/releases/tag/v2026.3.1",
                    "assets": []
                }));
            })
            .await;

        let release = latest_release(&server.base_url(), "owner/repo").await.unwrap();
        assert_eq!(release.tag_name, "v2026.3.1");
        assert_eq!(release.version(), vec![2026, 3, 1]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_latest_release_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/repos/owner/repo/releases/latest");
                then.status(404).body("Not Found");
            })
            .await;

        let err = latest_release(&server.base_url(), "owner/repo").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
