//! API key discovery and storage.
//!
//! The key is looked up through an ordered chain of [`KeySource`]s and the
//! first non-empty value wins:
//!
//! 1. the `FISH_API_KEY` environment variable
//! 2. the OS keyring (service `tts-cli`, user `api-key`)
//! 3. the credentials file (~/.config/tts/credentials)
//! 4. a dotenv file (`./.env`, or the file passed with `--env-file`)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::config::default_config_dir;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FISH_API_KEY";
/// Keyring service name.
pub const KEYRING_SERVICE: &str = "tts-cli";
/// Keyring user name.
pub const KEYRING_USER: &str = "api-key";
/// Credentials filename inside the config directory.
pub const CREDENTIALS_FILE: &str = "credentials";
/// Dotenv file read from the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Error type for credential operations.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error(
        "FISH_API_KEY not set.\n\nSet it via:\n  1. Run: tts configure api-key <your-api-key>\n  2. Or set environment variable: export FISH_API_KEY=<key>\n  3. Or create .env file with: FISH_API_KEY=<key>\n\nGet your API key at: https://fish.audio"
    )]
    Missing,
    #[error("API key cannot be empty")]
    Empty,
    #[error("env file not found: {0}")]
    EnvFileNotFound(PathBuf),
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("cannot determine config directory")]
    NoConfigDir,
}

/// Result type alias for credential operations.
pub type Result<T> = std::result::Result<T, CredentialError>;

/// One place an API key may come from.
pub trait KeySource {
    /// Short name shown to the user.
    fn name(&self) -> &str;

    /// Returns the key if this source has one.
    fn try_get(&self) -> Result<Option<String>>;
}

/// An API key together with the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub value: String,
    pub source: String,
}

/// Ordered list of key sources.
pub struct KeyChain {
    sources: Vec<Box<dyn KeySource>>,
}

impl KeyChain {
    /// Creates a chain from sources in priority order.
    pub fn new(sources: Vec<Box<dyn KeySource>>) -> Self {
        Self { sources }
    }

    /// The standard chain: env, keyring, credentials file, dotenv.
    ///
    /// `env_file` replaces the implicit `./.env` and must exist.
    pub fn standard(env_file: Option<&Path>) -> Self {
        let mut sources: Vec<Box<dyn KeySource>> = vec![
            Box::new(EnvSource::new(API_KEY_ENV)),
            Box::new(KeyringSource::default()),
        ];
        if let Some(path) = credentials_path() {
            sources.push(Box::new(DotenvSource::optional("credentials file", path)));
        }
        sources.push(Box::new(match env_file {
            Some(path) => DotenvSource::required(".env file", path),
            None => DotenvSource::optional(".env file", DEFAULT_ENV_FILE),
        }));
        Self { sources }
    }

    /// Returns the source names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Queries sources in order and stops at the first hit.
    pub fn resolve(&self) -> Result<Option<ResolvedKey>> {
        for source in &self.sources {
            if let Some(value) = source.try_get()? {
                let value = value.trim();
                if value.is_empty() {
                    continue;
                }
                tracing::debug!(source = source.name(), "found API key");
                return Ok(Some(ResolvedKey {
                    value: value.to_string(),
                    source: source.name().to_string(),
                }));
            }
        }
        Ok(None)
    }

    /// Like [`resolve`](Self::resolve), but a missing key is an error.
    pub fn require(&self) -> Result<ResolvedKey> {
        self.resolve()?.ok_or(CredentialError::Missing)
    }
}

// ==================== Sources ====================

/// Reads the key from an environment variable.
pub struct EnvSource {
    var: String,
}

impl EnvSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl KeySource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn try_get(&self) -> Result<Option<String>> {
        Ok(std::env::var(&self.var).ok())
    }
}

/// Reads the key from the OS keyring.
///
/// Keyring failures (no backend, locked store) are logged and treated as
/// an absent key so the chain can continue.
pub struct KeyringSource {
    service: String,
    user: String,
}

impl Default for KeyringSource {
    fn default() -> Self {
        Self::new(KEYRING_SERVICE, KEYRING_USER)
    }
}

impl KeyringSource {
    pub fn new(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(&self) -> keyring::Result<keyring::Entry> {
        keyring::Entry::new(&self.service, &self.user)
    }

    /// Stores the key. Returns false if the keyring is unavailable.
    pub fn set(&self, key: &str) -> bool {
        match self.entry().and_then(|e| e.set_password(key)) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "keyring unavailable");
                false
            }
        }
    }

    /// Deletes the key. Returns true if a key was removed.
    pub fn delete(&self) -> bool {
        match self.entry().and_then(|e| e.delete_credential()) {
            Ok(()) => true,
            Err(keyring::Error::NoEntry) => false,
            Err(e) => {
                tracing::debug!(error = %e, "keyring unavailable");
                false
            }
        }
    }
}

impl KeySource for KeyringSource {
    fn name(&self) -> &str {
        "keyring"
    }

    fn try_get(&self) -> Result<Option<String>> {
        match self.entry().and_then(|e| e.get_password()) {
            Ok(key) => Ok(Some(key)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "could not read API key from keyring");
                Ok(None)
            }
        }
    }
}

/// Reads `FISH_API_KEY=...` from a dotenv-style file.
pub struct DotenvSource {
    name: String,
    path: PathBuf,
    required: bool,
}

impl DotenvSource {
    /// A file that is skipped when absent.
    pub fn optional(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            required: false,
        }
    }

    /// A file that must exist.
    pub fn required(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            required: true,
        }
    }
}

impl KeySource for DotenvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_get(&self) -> Result<Option<String>> {
        if !self.path.is_file() {
            if self.required {
                return Err(CredentialError::EnvFileNotFound(self.path.clone()));
            }
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| CredentialError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(lookup_env(&content, API_KEY_ENV))
    }
}

// ==================== Dotenv ====================

/// Parses `KEY=VALUE` lines.
///
/// Blank lines, `#` comments and lines without `=` are skipped. Keys and
/// values are trimmed and one layer of surrounding quotes is removed.
pub fn parse_env(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), unquote(v.trim()).to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

/// Returns the first value for `key`, if any.
pub fn lookup_env(content: &str, key: &str) -> Option<String> {
    parse_env(content)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

// ==================== Storage ====================

/// Returns the credentials file path (~/.config/tts/credentials).
pub fn credentials_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join(CREDENTIALS_FILE))
}

/// Where a stored key ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredIn {
    Keyring,
    File(PathBuf),
}

/// Stores the key in the keyring, or in `file` when the keyring is unavailable.
pub fn store_api_key(key: &str, keyring: &KeyringSource, file: &Path) -> Result<StoredIn> {
    let key = key.trim();
    if key.is_empty() {
        return Err(CredentialError::Empty);
    }
    if keyring.set(key) {
        return Ok(StoredIn::Keyring);
    }
    write_credentials_file(file, key)?;
    Ok(StoredIn::File(file.to_path_buf()))
}

/// Writes the credentials file, readable only by the owner on Unix.
pub fn write_credentials_file(path: &Path, key: &str) -> Result<()> {
    let write_err = |source| CredentialError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(write_err)?;

    // An existing file keeps its old mode on open; tighten it before writing.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(write_err)?;
    }
    writeln!(file, "{}={}", API_KEY_ENV, key).map_err(write_err)?;
    Ok(())
}

/// Removes the key from the keyring and the credentials file.
///
/// Returns true if anything was removed.
pub fn forget_api_key(keyring: &KeyringSource, file: &Path) -> Result<bool> {
    let mut removed = keyring.delete();
    match fs::remove_file(file) {
        Ok(()) => removed = true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(CredentialError::Write {
                path: file.to_path_buf(),
                source,
            })
        }
    }
    Ok(removed)
}

/// Masks an API key for display.
///
/// Keys of 8 characters or fewer are fully masked; longer keys keep the
/// first and last 4 characters.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}
