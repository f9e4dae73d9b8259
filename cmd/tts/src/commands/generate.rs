//! Speech generation command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Args;

use ttskit_cli::{expand_text_inputs, validate_speed};
use ttskit_fishaudio::{AudioFormat, Client, TtsRequest};

use super::{create_client, format_bytes, get_config, print_error, print_success, print_verbose};
use crate::Cli;

/// Convert text files to speech.
///
/// Each input is a .txt file, a directory of .txt files, or a glob pattern.
/// Audio is written to <output-dir>/<stem>.<format>.
#[derive(Args)]
pub struct GenerateCommand {
    /// Text files, directories or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Voice model ID (default: configured voice)
    #[arg(long, alias = "reference-id")]
    voice: Option<String>,

    /// Output audio format: mp3, wav or pcm (default: configured format)
    #[arg(long)]
    format: Option<AudioFormat>,

    /// Speech speed, 0.5 to 2.0 (default: configured speed)
    #[arg(long)]
    speed: Option<f32>,

    /// Output directory (default: configured directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl GenerateCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;

        let voice = self
            .voice
            .clone()
            .or_else(|| cfg.default_voice.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no voice given. Use --voice or set a default with 'tts configure voice <id>'"
                )
            })?;
        let format = self.format.unwrap_or(cfg.format);
        let speed = self.speed.unwrap_or(cfg.speed);
        validate_speed(speed)?;
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.output_dir));

        let files = expand_text_inputs(&self.inputs)?;
        let jobs = plan_outputs(&files, &output_dir, format)?;
        let client = create_client(cli, &cfg)?;
        std::fs::create_dir_all(&output_dir)?;

        eprintln!("Found {} text file(s)", files.len());
        print_verbose(cli, &format!("Voice: {}", voice));
        print_verbose(cli, &format!("Format: {}, Speed: {}", format, speed));
        print_verbose(cli, &format!("Output: {}", output_dir.display()));

        let mut failed = 0usize;
        let mut written = 0usize;
        for (path, out_path) in &jobs {
            let name = display_name(path);
            let text = match std::fs::read_to_string(path) {
                Ok(t) => t,
                Err(e) => {
                    print_error(&format!("Error reading {}: {}", name, e));
                    failed += 1;
                    continue;
                }
            };
            let text = text.trim();
            if text.is_empty() {
                eprintln!("  Skipping {}: empty file", name);
                continue;
            }

            eprintln!("  {} -> {}", name, display_name(out_path));

            let req = TtsRequest::new(text, voice.as_str()).format(format).speed(speed);
            match synthesize(&client, &req, out_path).await {
                Ok(size) => {
                    written += 1;
                    print_verbose(cli, &format!("Wrote {} ({})", out_path.display(), format_bytes(size)));
                }
                Err(e) => {
                    print_error(&format!("Error generating {}: {}", name, e));
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            anyhow::bail!("{} of {} file(s) failed", failed, files.len());
        }
        print_success(&format!(
            "Generated {} audio file(s) in {}",
            written,
            output_dir.display()
        ));
        Ok(())
    }
}

async fn synthesize(client: &Client, req: &TtsRequest, out_path: &Path) -> anyhow::Result<usize> {
    let audio = client.tts().convert(req).await?;
    std::fs::write(out_path, &audio)?;
    Ok(audio.len())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Output file for a text input: `<dir>/<stem>.<ext>`.
fn output_path(dir: &Path, input: &Path, format: AudioFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.join(format!("{}.{}", stem, format.extension()))
}

/// Pairs each input with its output file.
///
/// Fails when two inputs would write the same output file.
fn plan_outputs(
    files: &[PathBuf],
    dir: &Path,
    format: AudioFormat,
) -> anyhow::Result<Vec<(PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();
    let mut jobs = Vec::with_capacity(files.len());
    for input in files {
        let out = output_path(dir, input, format);
        if let Some(first) = claimed.insert(out.clone(), input) {
            anyhow::bail!(
                "{} and {} would both write {}; rename one or generate them separately",
                first.display(),
                input.display(),
                out.display()
            );
        }
        jobs.push((input.clone(), out));
    }
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let out = output_path(Path::new("out"), Path::new("texts/en_1.txt"), AudioFormat::Wav);
        assert_eq!(out, PathBuf::from("out/en_1.wav"));
    }

    #[test]
    fn test_plan_outputs() {
        let files = vec![PathBuf::from("d1/a.txt"), PathBuf::from("d1/b.txt")];
        let jobs = plan_outputs(&files, Path::new("out"), AudioFormat::Mp3).unwrap();
        assert_eq!(
            jobs,
            vec![
                (PathBuf::from("d1/a.txt"), PathBuf::from("out/a.mp3")),
                (PathBuf::from("d1/b.txt"), PathBuf::from("out/b.mp3")),
            ]
        );
    }

    #[test]
    fn test_plan_outputs_rejects_same_stem() {
        let files = vec![PathBuf::from("d1/x.txt"), PathBuf::from("d2/x.txt")];
        let err = plan_outputs(&files, Path::new("out"), AudioFormat::Wav).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("d1/x.txt"));
        assert!(msg.contains("d2/x.txt"));
        assert!(msg.contains("x.wav"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("a/b/intro.txt")), "intro.txt");
    }
}
