//! Voice model commands.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;

use ttskit_fishaudio::{CreateModelRequest, ListModelsQuery, Visibility, VoiceFile};
use ttskit_samples::{Resolver, SampleSet};

use super::{create_client, format_bytes, get_config, output_result, print_success, print_verbose};
use crate::Cli;

/// Page size used when listing models.
const LIST_PAGE_SIZE: u32 = 100;

/// Voice model service.
///
/// Upload a directory of audio samples to create a voice model, or list the
/// models on your account.
#[derive(Args)]
pub struct VoiceCommand {
    #[command(subcommand)]
    command: VoiceSubcommand,
}

#[derive(Subcommand)]
enum VoiceSubcommand {
    /// Create a voice model from a directory of audio samples
    ///
    /// A transcript is a .txt file with the same stem as its audio file
    /// (en_1.wav + en_1.txt). Provide transcripts for all samples or none.
    Upload {
        /// Directory containing audio samples
        directory: PathBuf,
        /// Name for the voice model
        #[arg(long)]
        title: String,
        /// Description for the voice model
        #[arg(long, default_value = "")]
        description: String,
        /// Enable audio quality enhancement
        #[arg(long)]
        enhance: bool,
        /// Voice model visibility: private, public or unlist
        #[arg(long, default_value = "private")]
        visibility: Visibility,
        /// Tag for the voice model (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List your voice models
    #[command(alias = "list-models")]
    List,
}

#[derive(Serialize)]
struct UploadResult<'a> {
    id: &'a str,
    title: &'a str,
    samples: usize,
    transcripts: bool,
}

impl VoiceCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            VoiceSubcommand::Upload {
                directory,
                title,
                description,
                enhance,
                visibility,
                tags,
            } => {
                let req = CreateModelRequest {
                    description: description.clone(),
                    visibility: *visibility,
                    enhance_audio_quality: *enhance,
                    tags: tags.clone(),
                    ..CreateModelRequest::new(title.as_str())
                };
                self.upload(cli, directory, req).await
            }
            VoiceSubcommand::List => self.list(cli).await,
        }
    }

    async fn upload(&self, cli: &Cli, directory: &Path, mut req: CreateModelRequest) -> anyhow::Result<()> {
        if req.title.trim().is_empty() {
            anyhow::bail!("title cannot be empty");
        }

        // Resolve before touching the network so pairing errors surface first.
        let resolver = Resolver::new();
        print_verbose(cli, &format!("Audio extensions: {}", resolver.audio_extensions().join(", ")));
        let set = resolver.resolve(directory)?;
        eprintln!("Found {} audio file(s) in {}", set.len(), directory.display());

        let voices = prepare_upload(&set, &mut req)?;
        for (sample, voice) in set.samples.iter().zip(&voices) {
            match &sample.transcript {
                Some(_) => eprintln!("  {} -> {}.txt", voice.filename, sample.stem),
                None => eprintln!("  {}", voice.filename),
            }
            print_verbose(cli, &format!("{}: {}", voice.filename, format_bytes(voice.data.len())));
        }

        let cfg = get_config(cli)?;
        let client = create_client(cli, &cfg)?;

        eprintln!("Creating voice model: {}", req.title);
        print_verbose(cli, &format!("Visibility: {}", req.visibility));
        if req.enhance_audio_quality {
            print_verbose(cli, "Audio enhancement: enabled");
        }

        let model = client.model().create(&req, voices).await?;
        print_success(&format!("Voice model created: {}", model.id));

        output_result(
            &UploadResult {
                id: &model.id,
                title: &req.title,
                samples: set.len(),
                transcripts: set.has_transcripts,
            },
            cli.json,
        )
    }

    async fn list(&self, cli: &Cli) -> anyhow::Result<()> {
        let cfg = get_config(cli)?;
        let client = create_client(cli, &cfg)?;

        let query = ListModelsQuery {
            page_size: LIST_PAGE_SIZE,
            ..Default::default()
        };
        let list = client.model().list(&query).await?;

        if list.items.is_empty() {
            print_success("No voice models found");
        } else {
            print_success(&format!("Found {} voice model(s)", list.total));
        }
        output_result(&list, cli.json)
    }
}

/// Reads every sample's audio and attaches the transcripts to `req`.
///
/// Fails on an unreadable or empty audio file, before anything is sent.
fn prepare_upload(set: &SampleSet, req: &mut CreateModelRequest) -> anyhow::Result<Vec<VoiceFile>> {
    let mut voices = Vec::with_capacity(set.len());
    for sample in &set.samples {
        let data = std::fs::read(&sample.audio)
            .map_err(|e| anyhow::anyhow!("could not read {}: {}", sample.audio.display(), e))?;
        if data.is_empty() {
            anyhow::bail!("{} is empty", sample.audio.display());
        }

        let filename = sample
            .audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| sample.stem.clone());
        voices.push(VoiceFile::new(filename, data));
    }

    req.texts = set
        .transcripts()
        .map(|texts| texts.into_iter().map(str::to_string).collect())
        .unwrap_or_default();
    Ok(voices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_upload_pairs_transcripts_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en_2.wav"), b"RIFF-2").unwrap();
        fs::write(dir.path().join("en_1.wav"), b"RIFF-1").unwrap();
        fs::write(dir.path().join("en_1.txt"), "First line\n").unwrap();
        fs::write(dir.path().join("en_2.txt"), "Second line").unwrap();

        let set = ttskit_samples::resolve(dir.path()).unwrap();
        let mut req = CreateModelRequest::new("Narrator");
        let voices = prepare_upload(&set, &mut req).unwrap();

        let names: Vec<&str> = voices.iter().map(|v| v.filename.as_str()).collect();
        assert_eq!(names, vec!["en_1.wav", "en_2.wav"]);
        assert_eq!(voices[0].data, b"RIFF-1");
        assert_eq!(req.texts, vec!["First line", "Second line"]);
    }

    #[test]
    fn test_prepare_upload_without_transcripts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mp3"), b"ID3").unwrap();

        let set = ttskit_samples::resolve(dir.path()).unwrap();
        let mut req = CreateModelRequest::new("Narrator");
        let voices = prepare_upload(&set, &mut req).unwrap();

        assert_eq!(voices.len(), 1);
        assert!(req.texts.is_empty());
    }

    #[test]
    fn test_prepare_upload_rejects_empty_audio() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en_1.wav"), b"RIFF").unwrap();
        fs::write(dir.path().join("en_2.wav"), b"").unwrap();

        let set = ttskit_samples::resolve(dir.path()).unwrap();
        let mut req = CreateModelRequest::new("Narrator");
        let err = prepare_upload(&set, &mut req).unwrap_err();

        assert!(err.to_string().contains("en_2.wav"));
        assert!(err.to_string().contains("is empty"));
        assert!(req.texts.is_empty());
    }
}
