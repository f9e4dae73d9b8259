//! Common types for the Fish Audio API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ==================== Audio Format ====================

/// Audio encoding format of synthesized speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MP3 format.
    #[default]
    Mp3,
    /// WAV format.
    Wav,
    /// Raw PCM format.
    Pcm,
}

impl AudioFormat {
    /// All supported formats.
    pub const ALL: [AudioFormat; 3] = [AudioFormat::Mp3, AudioFormat::Wav, AudioFormat::Pcm];

    /// Returns the wire name, which is also the file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Pcm => "pcm",
        }
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mp3" => Ok(AudioFormat::Mp3),
            "wav" => Ok(AudioFormat::Wav),
            "pcm" => Ok(AudioFormat::Pcm),
            other => Err(format!("invalid format: {} (expected mp3, wav or pcm)", other)),
        }
    }
}

// ==================== Visibility ====================

/// Visibility of a voice model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only visible to the owner.
    #[default]
    Private,
    /// Listed publicly.
    Public,
    /// Reachable by id but not listed.
    Unlist,
}

impl Visibility {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
            Visibility::Unlist => "unlist",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "private" => Ok(Visibility::Private),
            "public" => Ok(Visibility::Public),
            "unlist" => Ok(Visibility::Unlist),
            other => Err(format!(
                "invalid visibility: {} (expected private, public or unlist)",
                other
            )),
        }
    }
}

// ==================== Train Mode ====================

/// Voice model training mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainMode {
    /// Instant cloning from the uploaded samples.
    #[default]
    Fast,
}

impl TrainMode {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainMode::Fast => "fast",
        }
    }
}

// ==================== Latency ====================

/// Synthesis latency/quality trade-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Latency {
    /// Best quality.
    #[default]
    Normal,
    /// Lower latency.
    Balanced,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_format_parse() {
        assert_eq!("MP3".parse::<AudioFormat>().unwrap(), AudioFormat::Mp3);
        assert_eq!("pcm".parse::<AudioFormat>().unwrap(), AudioFormat::Pcm);
        assert!("ogg".parse::<AudioFormat>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&AudioFormat::Wav).unwrap(), "\"wav\"");
        assert_eq!(serde_json::to_string(&Visibility::Unlist).unwrap(), "\"unlist\"");
        assert_eq!(serde_json::to_string(&Latency::Balanced).unwrap(), "\"balanced\"");
    }
}
