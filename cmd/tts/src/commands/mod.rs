//! CLI commands module.

mod configure;
mod generate;
mod update;
mod util;
mod voice;

pub use configure::ConfigureCommand;
pub use generate::GenerateCommand;
pub use update::UpdateCommand;
pub use voice::VoiceCommand;

// Re-export utils for use in commands
pub(crate) use util::*;
