//! HTTP seam between the story client and the Gemini REST API.
//!
//! [`GeminiStoryClient`](crate::GeminiStoryClient) never builds requests
//! against the network directly. It asks a [`TransportFactory`] for a
//! [`GeminiTransport`] bound to the resolved API key on every call, which
//! lets tests substitute a scripted transport.

use crate::gemini::protocol::{
    GenerateContentRequest, GenerateContentResponse, PredictLongRunningRequest, VideoOperation,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use storyloom_config::GeminiSettings;
use storyloom_core::MediaBlob;
use storyloom_error::{GeminiError, GeminiErrorKind, HttpError, StoryloomResult};
use tracing::{debug, instrument};

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_VIDEO_MIME: &str = "video/mp4";

/// Authenticated calls against the Gemini REST API.
#[async_trait]
pub trait GeminiTransport: Send + Sync {
    /// POST `models/{model}:generateContent`.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> StoryloomResult<GenerateContentResponse>;

    /// POST `models/{model}:predictLongRunning`.
    async fn start_video_generation(
        &self,
        model: &str,
        request: &PredictLongRunningRequest,
    ) -> StoryloomResult<VideoOperation>;

    /// GET the current state of a long-running operation.
    async fn poll_video_operation(&self, operation_name: &str) -> StoryloomResult<VideoOperation>;

    /// GET an asset by absolute URL.
    async fn download(&self, url: &str) -> StoryloomResult<MediaBlob>;
}

/// Produces a transport bound to one API key.
pub trait TransportFactory: Send + Sync {
    /// Create a transport authenticated with `api_key`.
    fn connect(&self, api_key: &str) -> StoryloomResult<Arc<dyn GeminiTransport>>;
}

/// `reqwest`-backed Gemini transport.
#[derive(Clone)]
pub struct GeminiRestTransport {
    client: Client,
    api_key: String,
    api_base: String,
}

impl fmt::Debug for GeminiRestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiRestTransport")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiRestTransport {
    /// Create a transport with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::ClientCreation`] if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> StoryloomResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string()))
        })?;
        Ok(Self::with_client(client, api_key, api_base))
    }

    /// Create a transport around an existing HTTP client.
    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.api_base, model, method)
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> StoryloomResult<R>
    where
        B: serde::Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        debug!(url = %url, "Sending Gemini API request");
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;
        Self::read_json(response).await
    }

    async fn read_json<R: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> StoryloomResult<R> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        if !status.is_success() {
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: Self::error_message(&body),
            })
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
            .into()
        })
    }

    /// Prefer the structured `{"error": {...}}` body; fall back to the raw text.
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => match parsed.error.status {
                Some(status) => format!("{}: {}", status, parsed.error.message),
                None => parsed.error.message,
            },
            Err(_) => body.trim().to_string(),
        }
    }
}

#[async_trait]
impl GeminiTransport for GeminiRestTransport {
    #[instrument(skip(self, request), fields(contents = request.contents.len()))]
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> StoryloomResult<GenerateContentResponse> {
        let url = self.model_url(model, "generateContent");
        self.post_json(&url, request).await
    }

    #[instrument(skip(self, request))]
    async fn start_video_generation(
        &self,
        model: &str,
        request: &PredictLongRunningRequest,
    ) -> StoryloomResult<VideoOperation> {
        let url = self.model_url(model, "predictLongRunning");
        self.post_json(&url, request).await
    }

    #[instrument(skip(self))]
    async fn poll_video_operation(&self, operation_name: &str) -> StoryloomResult<VideoOperation> {
        let url = format!("{}/{}", self.api_base, operation_name.trim_start_matches('/'));
        debug!(url = %url, "Polling video operation");
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;
        Self::read_json(response).await
    }

    /// The URL carries the API key in its query, so it is dropped from every error.
    #[instrument(skip_all)]
    async fn download(&self, url: &str) -> StoryloomResult<MediaBlob> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::with_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Download failed"),
            )
            .into());
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_VIDEO_MIME)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read body: {}", e.without_url())))?;

        debug!(size = bytes.len(), mime_type = %mime_type, "Downloaded asset");
        Ok(MediaBlob::new(mime_type, bytes.to_vec()))
    }
}

/// Builds a [`GeminiRestTransport`] per call, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct RestTransportFactory {
    client: Client,
    api_base: String,
}

impl RestTransportFactory {
    /// Create a factory from the `[gemini]` settings.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiErrorKind::ClientCreation`] if the HTTP client cannot be built.
    pub fn new(settings: &GeminiSettings) -> StoryloomResult<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        Ok(Self {
            client,
            api_base: settings.api_base.clone(),
        })
    }
}

impl TransportFactory for RestTransportFactory {
    fn connect(&self, api_key: &str) -> StoryloomResult<Arc<dyn GeminiTransport>> {
        Ok(Arc::new(GeminiRestTransport::with_client(
            self.client.clone(),
            api_key,
            self.api_base.clone(),
        )))
    }
}
