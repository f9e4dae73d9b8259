//! Speech synthesis service.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use super::{
    error::{Error, Result},
    http::{header, HttpClient},
    types::{AudioFormat, Latency},
};

/// Speech synthesis service.
pub struct TtsService {
    http: Arc<HttpClient>,
}

impl TtsService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Converts text to speech and returns the encoded audio.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run(client: ttskit_fishaudio::Client) -> ttskit_fishaudio::Result<()> {
    /// use ttskit_fishaudio::{AudioFormat, TtsRequest};
    ///
    /// let req = TtsRequest::new("Hello there", "my-voice-model")
    ///     .format(AudioFormat::Wav)
    ///     .speed(1.2);
    /// let audio = client.tts().convert(&req).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn convert(&self, request: &TtsRequest) -> Result<Vec<u8>> {
        if request.text.trim().is_empty() {
            return Err(Error::Other("text must be non-empty".to_string()));
        }

        let headers = match request.model.as_deref() {
            Some(model) if !model.is_empty() => header("model", model)?,
            _ => HeaderMap::new(),
        };

        let audio = self.http.request_bytes("/v1/tts", request, &headers).await?;
        if audio.is_empty() {
            return Err(Error::Other("empty audio response".to_string()));
        }
        Ok(audio)
    }
}

// ==================== Request/Response Types ====================

/// Request for speech synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TtsRequest {
    /// Text to synthesize.
    pub text: String,

    /// Voice model to speak with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,

    /// Output audio format.
    pub format: AudioFormat,

    /// Speed and volume adjustments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prosody: Option<Prosody>,

    /// Normalize numbers and punctuation before synthesis.
    pub normalize: bool,

    /// Latency mode.
    pub latency: Latency,

    /// Backend model, sent as the `model` header.
    #[serde(skip)]
    pub model: Option<String>,
}

impl TtsRequest {
    /// Creates a request for `text` spoken by the `reference_id` voice model.
    pub fn new(text: impl Into<String>, reference_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reference_id: Some(reference_id.into()),
            normalize: true,
            ..Default::default()
        }
    }

    /// Sets the output format.
    pub fn format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the speaking speed; 1.0 is normal.
    pub fn speed(mut self, speed: f32) -> Self {
        self.prosody.get_or_insert_with(Prosody::default).speed = speed;
        self
    }

    /// Sets the backend model header.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Prosody settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prosody {
    /// Speaking speed multiplier.
    pub speed: f32,

    /// Volume adjustment in dB.
    pub volume: f32,
}

impl Default for Prosody {
    fn default() -> Self {
        Self {
            speed: 1.0,
            volume: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let req = TtsRequest::new("Hi", "voice-1").format(AudioFormat::Wav).speed(1.5).model("s1");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["text"], "Hi");
        assert_eq!(json["reference_id"], "voice-1");
        assert_eq!(json["format"], "wav");
        assert_eq!(json["prosody"]["speed"], 1.5);
        assert_eq!(json["normalize"], true);
        assert!(json.get("model").is_none());
    }

    #[test]
    fn test_no_prosody_by_default() {
        let json = serde_json::to_value(TtsRequest::new("Hi", "v")).unwrap();
        assert!(json.get("prosody").is_none());
    }
}
