//! Voice model service.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::{
    error::{Error, Result},
    http::HttpClient,
    types::{TrainMode, Visibility},
};

/// Voice model service.
pub struct ModelService {
    http: Arc<HttpClient>,
}

impl ModelService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Creates a voice model from audio samples.
    ///
    /// When `request.texts` is non-empty it must hold exactly one transcript
    /// per voice file, in the same order.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn run(client: ttskit_fishaudio::Client) -> ttskit_fishaudio::Result<()> {
    /// use ttskit_fishaudio::{CreateModelRequest, VoiceFile};
    ///
    /// let voices = vec![VoiceFile::new("en_1.wav", std::fs::read("en_1.wav")?)];
    /// let req = CreateModelRequest::new("My voice");
    /// let model = client.model().create(&req, voices).await?;
    /// println!("created {}", model.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(&self, request: &CreateModelRequest, voices: Vec<VoiceFile>) -> Result<ModelInfo> {
        if request.title.trim().is_empty() {
            return Err(Error::Config("title must be non-empty".to_string()));
        }
        if voices.is_empty() {
            return Err(Error::Config("at least one voice sample is required".to_string()));
        }
        if !request.texts.is_empty() && request.texts.len() != voices.len() {
            return Err(Error::Config(format!(
                "got {} transcripts for {} voice samples",
                request.texts.len(),
                voices.len()
            )));
        }

        let mut form = Form::new()
            .text("type", "tts")
            .text("train_mode", request.train_mode.as_str())
            .text("title", request.title.clone())
            .text("description", request.description.clone())
            .text("visibility", request.visibility.as_str())
            .text("enhance_audio_quality", request.enhance_audio_quality.to_string());

        for voice in voices {
            form = form.part("voices", Part::bytes(voice.data).file_name(voice.filename));
        }
        for text in &request.texts {
            form = form.text("texts", text.clone());
        }
        for tag in &request.tags {
            form = form.text("tags", tag.clone());
        }

        self.http.upload("/model", form).await
    }

    /// Lists voice models.
    pub async fn list(&self, query: &ListModelsQuery) -> Result<ModelList> {
        let mut params = vec![
            ("self", query.self_only.to_string()),
            ("page_size", query.page_size.to_string()),
            ("page_number", query.page_number.to_string()),
        ];
        if let Some(title) = &query.title {
            params.push(("title", title.clone()));
        }

        self.http.request::<(), _>("GET", "/model", &params, None).await
    }
}

// ==================== Request/Response Types ====================

/// An audio sample to upload.
#[derive(Debug, Clone)]
pub struct VoiceFile {
    /// Filename reported to the server.
    pub filename: String,

    /// Raw audio bytes.
    pub data: Vec<u8>,
}

impl VoiceFile {
    /// Creates a voice file.
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }
}

/// Request for voice model creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateModelRequest {
    /// Model name.
    pub title: String,

    /// Model description.
    #[serde(default)]
    pub description: String,

    /// Model visibility.
    #[serde(default)]
    pub visibility: Visibility,

    /// Training mode.
    #[serde(default)]
    pub train_mode: TrainMode,

    /// Ask the server to clean up the samples.
    #[serde(default)]
    pub enhance_audio_quality: bool,

    /// One transcript per voice sample, or empty.
    #[serde(default)]
    pub texts: Vec<String>,

    /// Model tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateModelRequest {
    /// Creates a private model request with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Query for listing voice models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListModelsQuery {
    /// Only list models owned by the caller.
    pub self_only: bool,

    /// Page size.
    pub page_size: u32,

    /// 1-based page number.
    pub page_number: u32,

    /// Title filter.
    pub title: Option<String>,
}

impl Default for ListModelsQuery {
    fn default() -> Self {
        Self {
            self_only: true,
            page_size: 10,
            page_number: 1,
            title: None,
        }
    }
}

/// A voice model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier, used as `reference_id` for synthesis.
    #[serde(alias = "_id")]
    pub id: String,

    /// Model name.
    #[serde(default)]
    pub title: String,

    /// Model description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Model visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    /// Detected languages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,

    /// Model tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Training state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A page of voice models.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelList {
    /// Total number of matching models.
    #[serde(default)]
    pub total: u64,

    /// Models on this page.
    #[serde(default)]
    pub items: Vec<ModelInfo>,
}
