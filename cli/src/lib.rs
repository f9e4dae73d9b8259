//! CLI support library for the `tts` command.
//!
//! Holds everything the binary needs besides the provider client: the TOML
//! config store, the API-key source chain, batch input expansion, the
//! release check and output helpers.

pub mod config;
pub mod credentials;
pub mod inputs;
pub mod output;
pub mod release;

pub use config::{Config, load_config, validate_speed};
pub use credentials::{CredentialError, KeyChain, KeySource, ResolvedKey, mask_api_key};
pub use inputs::{InputError, expand_text_inputs};
pub use output::{OutputFormat, format_bytes, output_result, print_error, print_info, print_success, print_verbose};
pub use release::{Release, latest_release, platform_binary};
