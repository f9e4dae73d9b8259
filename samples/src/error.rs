//! Error types for sample set resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for resolver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sample set resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// The sample directory is missing, unreadable or not a directory.
    #[error("sample directory not found: {path}: {reason}")]
    NotFound { path: PathBuf, reason: String },

    /// The directory holds no recognized audio files.
    #[error("no audio files found in {path}")]
    EmptySet { path: PathBuf },

    /// Some, but not all, audio files have a transcript.
    #[error(
        "some samples have transcripts and some don't; provide transcripts for all files or none (missing: {})",
        .stems.join(", ")
    )]
    PartialTranscript { stems: Vec<String> },

    /// Two audio files, or two transcripts, share a stem and cannot be paired.
    #[error("files share the stem '{stem}': {}", display_paths(.files))]
    DuplicateStem { stem: String, files: Vec<PathBuf> },

    /// A transcript file could not be read or decoded.
    #[error("invalid transcript {path}: {reason}")]
    Validation { path: PathBuf, reason: String },
}

impl Error {
    /// Returns the stems lacking a transcript, for partial coverage errors.
    pub fn missing_stems(&self) -> Option<&[String]> {
        match self {
            Error::PartialTranscript { stems } => Some(stems),
            _ => None,
        }
    }
}

fn display_paths(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
