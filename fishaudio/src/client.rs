//! Fish Audio API client.

use std::sync::Arc;

use super::{
    error::{Error, Result},
    http::HttpClient,
    model::ModelService,
    tts::TtsService,
};

/// Default Fish Audio API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.fish.audio";

/// Default maximum number of retries.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Fish Audio API client.
///
/// # Example
///
/// ```rust,no_run
/// use ttskit_fishaudio::{Client, TtsRequest};
///
/// # async fn run() -> ttskit_fishaudio::Result<()> {
/// let client = Client::new("your-api-key")?;
/// let audio = client.tts().convert(&TtsRequest::new("Hello", "voice-id")).await?;
/// std::fs::write("hello.mp3", audio)?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    http: Arc<HttpClient>,
    base_url: String,
}

impl Client {
    /// Creates a new client with the default base URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the speech synthesis service.
    pub fn tts(&self) -> TtsService {
        TtsService::new(self.http.clone())
    }

    /// Returns the voice model service.
    pub fn model(&self) -> ModelService {
        ModelService::new(self.http.clone())
    }
}

/// Builder for creating a Fish Audio API client.
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    max_retries: u32,
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Sets a custom base URL for the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the maximum number of retries for transient errors.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(Error::Config("api_key must be non-empty".to_string()));
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        let http = HttpClient::new(base_url.clone(), api_key.to_string(), self.max_retries)?;

        Ok(Client {
            http: Arc::new(http),
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(Client::new("  "), Err(Error::Config(_))));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = Client::builder("key")
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
