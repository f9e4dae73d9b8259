//! Directory scanning and transcript pairing.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};

/// Audio extensions accepted by default (lowercase, without the dot).
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg", "m4a"];

/// Extension of transcript companion files.
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// One audio clip plus its optional transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Filename without extension; the join key with the transcript.
    pub stem: String,

    /// Path to the audio file.
    pub audio: PathBuf,

    /// Trimmed transcript text, `None` when the set is untranscribed.
    pub transcript: Option<String>,
}

/// A validated, upload-ready set of samples from one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    /// True only when every sample carries a non-empty transcript.
    pub has_transcripts: bool,

    /// Samples ordered by stem.
    pub samples: Vec<Sample>,
}

impl SampleSet {
    /// Number of samples in the set.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the set holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the transcripts in sample order, or `None` when untranscribed.
    pub fn transcripts(&self) -> Option<Vec<&str>> {
        if !self.has_transcripts {
            return None;
        }
        self.samples
            .iter()
            .map(|s| s.transcript.as_deref())
            .collect()
    }
}

/// Resolves sample directories against an audio extension allow-list.
#[derive(Debug, Clone)]
pub struct Resolver {
    audio_extensions: Vec<String>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::with_extensions(DEFAULT_AUDIO_EXTENSIONS.iter().copied())
    }
}

impl Resolver {
    /// Creates a resolver with the default audio allow-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver accepting the given audio extensions.
    ///
    /// Extensions are matched case-insensitively; a leading dot is ignored.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let audio_extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { audio_extensions }
    }

    /// Returns the accepted audio extensions.
    pub fn audio_extensions(&self) -> &[String] {
        &self.audio_extensions
    }

    fn is_audio(&self, ext: &str) -> bool {
        self.audio_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Scans `dir` and returns its validated sample set.
    ///
    /// Only regular files directly inside `dir` are considered. Transcripts
    /// without a matching audio file are ignored, and a transcript that is
    /// blank after trimming counts as missing.
    pub fn resolve(&self, dir: impl AsRef<Path>) -> Result<SampleSet> {
        let dir = dir.as_ref();
        let files = list_files(dir)?;

        let mut audio: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        let mut texts: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();

        for path in files {
            let (Some(stem), Some(ext)) = (file_stem(&path), extension(&path)) else {
                continue;
            };
            if ext.eq_ignore_ascii_case(TRANSCRIPT_EXTENSION) {
                texts.entry(stem).or_default().push(path);
            } else if self.is_audio(&ext) {
                audio.entry(stem).or_default().push(path);
            }
        }

        if audio.is_empty() {
            return Err(Error::EmptySet {
                path: dir.to_path_buf(),
            });
        }

        let mut pairs = Vec::with_capacity(audio.len());
        for (stem, mut paths) in audio {
            if paths.len() > 1 {
                paths.sort();
                return Err(Error::DuplicateStem { stem, files: paths });
            }
            let audio_path = paths.remove(0);
            let transcript = match texts.remove(&stem) {
                Some(mut txts) if txts.len() > 1 => {
                    txts.sort();
                    return Err(Error::DuplicateStem { stem, files: txts });
                }
                Some(txts) => read_transcript(&txts[0])?,
                None => None,
            };
            pairs.push((stem, audio_path, transcript));
        }

        let missing: Vec<String> = pairs
            .iter()
            .filter(|(_, _, t)| t.is_none())
            .map(|(stem, _, _)| stem.clone())
            .collect();

        let has_transcripts = missing.is_empty();
        if !has_transcripts && missing.len() < pairs.len() {
            return Err(Error::PartialTranscript { stems: missing });
        }

        tracing::debug!(
            dir = %dir.display(),
            samples = pairs.len(),
            has_transcripts,
            "resolved sample set"
        );

        // BTreeMap iteration already yields stems in ascending order.
        let samples = pairs
            .into_iter()
            .map(|(stem, audio, transcript)| Sample {
                stem,
                audio,
                transcript,
            })
            .collect();

        Ok(SampleSet {
            has_transcripts,
            samples,
        })
    }
}

/// Resolves `dir` with the default audio allow-list.
pub fn resolve(dir: impl AsRef<Path>) -> Result<SampleSet> {
    Resolver::default().resolve(dir)
}

fn not_found(dir: &Path, err: &io::Error) -> Error {
    Error::NotFound {
        path: dir.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Lists regular files directly inside `dir`, following symlinks.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(dir).map_err(|e| not_found(dir, &e))?;
    if !meta.is_dir() {
        return Err(Error::NotFound {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|e| not_found(dir, &e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| not_found(dir, &e))?.path();
        match fs::metadata(&path) {
            Ok(m) if m.is_file() => files.push(path),
            Ok(_) => {}
            // Dangling symlinks and races with deletion are skipped.
            Err(e) => tracing::debug!(path = %path.display(), error = %e, "skipping entry"),
        }
    }
    Ok(files)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

fn extension(path: &Path) -> Option<String> {
    path.extension().map(|s| s.to_string_lossy().into_owned())
}

/// Reads a transcript, returning `None` when it is blank.
fn read_transcript(path: &Path) -> Result<Option<String>> {
    let bytes = fs::read(path).map_err(|e| Error::Validation {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let text = String::from_utf8(bytes).map_err(|e| Error::Validation {
        path: path.to_path_buf(),
        reason: format!("not valid UTF-8: {}", e.utf8_error()),
    })?;

    let trimmed = text.trim();
    if trimmed.is_empty() {
        tracing::debug!(path = %path.display(), "blank transcript treated as missing");
        return Ok(None);
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_extensions_normalizes() {
        let r = Resolver::with_extensions([".WAV", "mp3", ""]);
        assert_eq!(r.audio_extensions(), &["wav".to_string(), "mp3".to_string()]);
        assert!(r.is_audio("Wav"));
        assert!(!r.is_audio("flac"));
    }

    #[test]
    fn test_default_extensions() {
        let r = Resolver::new();
        for ext in DEFAULT_AUDIO_EXTENSIONS {
            assert!(r.is_audio(ext));
        }
        assert!(!r.is_audio("txt"));
    }

    #[test]
    fn test_transcripts_accessor() {
        let set = SampleSet {
            has_transcripts: true,
            samples: vec![Sample {
                stem: "a".to_string(),
                audio: PathBuf::from("a.wav"),
                transcript: Some("hi".to_string()),
            }],
        };
        assert_eq!(set.transcripts(), Some(vec!["hi"]));

        let untranscribed = SampleSet {
            has_transcripts: false,
            ..set
        };
        assert_eq!(untranscribed.transcripts(), None);
    }
}
