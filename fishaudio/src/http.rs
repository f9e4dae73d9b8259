//! HTTP client implementation for the Fish Audio API.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    multipart, Client as ReqwestClient, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::error::{Error, Result};

const USER_AGENT_VALUE: &str = concat!("ttskit-fishaudio-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Fish Audio API.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
    max_retries: u32,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new(base_url: String, api_key: String, max_retries: u32) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
            max_retries,
        })
    }

    /// Makes a JSON request with retry support.
    pub async fn request<T, R>(
        &self,
        method: &str,
        path: &str,
        query: &[(&str, String)],
        body: Option<&T>,
    ) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.with_retry(path, move || async move {
            let response = self
                .build(method, path, query, body, &HeaderMap::new())?
                .send()
                .await?;
            let body = check_status(response).await?;
            serde_json::from_slice(&body).map_err(Error::from)
        })
        .await
    }

    /// Makes a JSON request whose response body is raw bytes, with retry support.
    pub async fn request_bytes<T>(
        &self,
        path: &str,
        body: &T,
        extra_headers: &HeaderMap,
    ) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        self.with_retry(path, move || async move {
            let response = self
                .build("POST", path, &[], Some(body), extra_headers)?
                .send()
                .await?;
            let body = check_status(response).await?;
            Ok(body.to_vec())
        })
        .await
    }

    /// Posts a multipart form. Uploads are not retried since the form is consumed.
    pub async fn upload<R>(&self, path: &str, form: multipart::Form) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "uploading multipart form");

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header()?);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .multipart(form)
            .send()
            .await?;

        let body = check_status(response).await?;
        serde_json::from_slice(&body).map_err(Error::from)
    }

    async fn with_retry<F, Fut, R>(&self, path: &str, mut attempt_fn: F) -> Result<R>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<R>>,
    {
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let backoff = Duration::from_secs(1 << (attempt - 1).min(5));
                tracing::debug!(path, attempt, ?backoff, "retrying request");
                tokio::time::sleep(backoff).await;
            }

            match attempt_fn().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() => {
                    tracing::debug!(path, error = %e, "retryable error");
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| Error::Other("max retries exceeded".to_string())))
    }

    fn build<T>(
        &self,
        method: &str,
        path: &str,
        query: &[(&str, String)],
        body: Option<&T>,
        extra_headers: &HeaderMap,
    ) -> Result<RequestBuilder>
    where
        T: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method, %url, "sending request");

        let mut request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "DELETE" => self.client.delete(&url),
            _ => return Err(Error::Other(format!("unsupported method: {}", method))),
        };

        let mut headers = self.default_headers()?;
        headers.extend(extra_headers.clone());
        request = request.headers(headers);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request)
    }

    fn auth_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| Error::Config(format!("invalid api key: {}", e)))
    }

    /// Returns default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header()?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }
}

/// Builds a single-entry header map, e.g. for the TTS `model` header.
pub(crate) fn header(name: &'static str, value: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(value)
        .map_err(|e| Error::Other(format!("invalid {} header: {}", name, e)))?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(headers)
}

/// Returns the body of a successful response, or the API error it carries.
async fn check_status(response: Response) -> Result<Bytes> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(parse_error(&body, status.as_u16()));
    }
    Ok(body)
}

/// Error body shapes returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Parses an error response body.
pub(crate) fn parse_error(body: &[u8], status: u16) -> Error {
    if let Ok(err) = serde_json::from_slice::<ErrorBody>(body) {
        if let Some(message) = err.message.filter(|m| !m.is_empty()) {
            return Error::api(status, message);
        }
        match err.detail {
            Some(serde_json::Value::String(s)) => return Error::api(status, s),
            Some(other) if !other.is_null() => return Error::api(status, other.to_string()),
            _ => {}
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        Error::api(status, format!("http status {}", status))
    } else {
        Error::api(status, text)
    }
}
