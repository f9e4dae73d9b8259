//! Fish Audio API client.
//!
//! Wraps the endpoints a command-line TTS tool needs: speech synthesis from
//! a voice model, voice model creation from audio samples, and listing the
//! caller's own models.

mod client;
mod error;
pub mod http;
mod model;
mod tts;
mod types;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES};
pub use error::{Error, Result};
pub use model::{CreateModelRequest, ListModelsQuery, ModelInfo, ModelList, ModelService, VoiceFile};
pub use tts::{Prosody, TtsRequest, TtsService};
pub use types::{AudioFormat, Latency, TrainMode, Visibility};
