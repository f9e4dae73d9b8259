//! Output utilities for the `tts` CLI.

use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// YAML format (default).
    #[default]
    Yaml,
    /// JSON format.
    Json,
}

impl OutputFormat {
    /// Picks JSON when `as_json` is set, YAML otherwise.
    pub fn from_flag(as_json: bool) -> Self {
        if as_json { Self::Json } else { Self::Yaml }
    }

    /// Renders a value in this format.
    pub fn render<T: Serialize>(self, value: &T) -> anyhow::Result<String> {
        Ok(match self {
            Self::Yaml => serde_yaml::to_string(value)?,
            Self::Json => {
                let mut s = serde_json::to_string_pretty(value)?;
                s.push('\n');
                s
            }
        })
    }
}

/// Prints a result to stdout as YAML, or JSON when `as_json` is set.
pub fn output_result<T: Serialize>(result: &T, as_json: bool) -> anyhow::Result<()> {
    print!("{}", OutputFormat::from_flag(as_json).render(result)?);
    Ok(())
}

/// Prints verbose output if enabled.
pub fn print_verbose(enabled: bool, msg: &str) {
    if enabled {
        eprintln!("[verbose] {}", msg);
    }
}

/// Prints success message.
pub fn print_success(msg: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", msg);
}

/// Prints error message.
pub fn print_error(msg: &str) {
    eprintln!("\x1b[31m✗\x1b[0m {}", msg);
}

/// Prints info message.
pub fn print_info(msg: &str) {
    eprintln!("\x1b[34mℹ\x1b[0m {}", msg);
}

/// Formats bytes to human readable string.
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: &'static str,
        total: u32,
    }

    #[test]
    fn test_render_yaml_and_json() {
        let row = Row { id: "abc", total: 2 };

        let yaml = OutputFormat::Yaml.render(&row).unwrap();
        assert_eq!(yaml, "id: abc\ntotal: 2\n");

        let json = OutputFormat::from_flag(true).render(&row).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["id"], "abc");
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.00 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024 / 2), "1.50 MB");
    }
}
