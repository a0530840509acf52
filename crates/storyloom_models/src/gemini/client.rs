//! Gemini story client.
//!
//! [`GeminiStoryClient`] implements every Storyloom generator over the Gemini
//! REST API:
//! - story scripts via `generateContent` with a JSON response schema
//! - scene images via `generateContent` on an image model
//! - scene videos via `predictLongRunning`, polled until done, then downloaded
//! - narration via `generateContent` on a speech model
//!
//! # Credentials
//!
//! The API key is resolved on every call, before any transport is created.
//! With no key available each operation fails with a missing-credential
//! error and the network is never touched.
//!
//! # Example
//!
//! ```no_run
//! use storyloom_core::StoryMode;
//! use storyloom_interface::StoryGenerator;
//! use storyloom_models::GeminiStoryClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiStoryClient::new()?;
//! let story = client
//!     .generate_story_script("a cat who wants to fly", StoryMode::Short)
//!     .await?;
//! assert_eq!(story.scenes().len(), 6);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use storyloom_config::StoryloomConfig;
use storyloom_core::{MediaBlob, StoryData, StoryMode, Voice};
use storyloom_error::{
    GeminiError, GeminiErrorKind, PaidFeature, StoryloomError, StoryloomErrorKind,
    StoryloomResult,
};
use storyloom_interface::{
    GeneratorMetadata, SceneImages, SceneNarration, SceneVideos, StoryGenerator,
};

use crate::CredentialResolver;
use crate::gemini::protocol::{
    GenerateContentRequest, GenerationConfig, ImageConfig, PredictLongRunningRequest,
    SpeechConfig, VideoInstance, VideoParameters,
};
use crate::gemini::script::{ScriptPlan, parse_story_script, story_response_schema};
use crate::gemini::transport::{GeminiTransport, RestTransportFactory, TransportFactory};

const DEFAULT_IMAGE_MIME: &str = "image/png";
const DEFAULT_AUDIO_MIME: &str = "audio/L16;codec=pcm;rate=24000";

/// Story, image, video and narration generator backed by Gemini.
#[derive(Clone)]
pub struct GeminiStoryClient {
    config: StoryloomConfig,
    credentials: CredentialResolver,
    transports: Arc<dyn TransportFactory>,
}

impl std::fmt::Debug for GeminiStoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiStoryClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl GeminiStoryClient {
    /// Create a client from the layered configuration files.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the HTTP
    /// client cannot be built. A missing API key is only reported when a
    /// generation call is made.
    #[instrument(name = "gemini_story_client_new")]
    pub fn new() -> StoryloomResult<Self> {
        Self::from_config(StoryloomConfig::load()?)
    }

    /// Create a client from an explicit configuration.
    ///
    /// Credentials come from the configured environment variables and the
    /// configured credential file.
    #[instrument(name = "gemini_story_client_from_config", skip(config))]
    pub fn from_config(config: StoryloomConfig) -> StoryloomResult<Self> {
        let transports = Arc::new(RestTransportFactory::new(&config.gemini)?);
        let credentials = CredentialResolver::from_config(&config);
        Ok(Self::with_parts(config, credentials, transports))
    }

    /// Assemble a client from its parts.
    ///
    /// This is the injection point for custom credential sources and
    /// transports.
    pub fn with_parts(
        config: StoryloomConfig,
        credentials: CredentialResolver,
        transports: Arc<dyn TransportFactory>,
    ) -> Self {
        Self {
            config,
            credentials,
            transports,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &StoryloomConfig {
        &self.config
    }

    /// Credential resolver consulted on every call.
    pub fn credentials(&self) -> &CredentialResolver {
        &self.credentials
    }

    /// Resolve the API key, then open a transport bound to it.
    fn connect(&self) -> StoryloomResult<(String, Arc<dyn GeminiTransport>)> {
        let api_key = self.credentials.resolve()?;
        let transport = self.transports.connect(&api_key)?;
        Ok((api_key, transport))
    }

    async fn image_inner(&self, prompt: &str) -> StoryloomResult<String> {
        let (_, transport) = self.connect()?;

        let request = GenerateContentRequest::from_text(
            prompt,
            GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: self.config.image.aspect_ratio.clone(),
                    image_size: self.config.image.image_size.clone(),
                }),
                ..Default::default()
            },
        );

        debug!(model = %self.config.gemini.image_model, "Requesting scene image");
        let response = transport
            .generate_content(&self.config.gemini.image_model, &request)
            .await?;

        let inline = response
            .first_inline_data()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::EmptyResponse("image".to_string())))?;

        let uri = format!(
            "data:{};base64,{}",
            inline.mime_type_or(DEFAULT_IMAGE_MIME),
            inline.data
        );
        info!(bytes = inline.data.len(), "Generated scene image");
        Ok(uri)
    }

    async fn video_inner(&self, prompt: &str) -> StoryloomResult<MediaBlob> {
        let (api_key, transport) = self.connect()?;
        let settings = &self.config.video;

        let request = PredictLongRunningRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
            }],
            parameters: VideoParameters {
                sample_count: settings.number_of_videos,
                resolution: settings.resolution.clone(),
                aspect_ratio: settings.aspect_ratio.clone(),
            },
        };

        debug!(model = %self.config.gemini.video_model, "Submitting video job");
        let mut operation = transport
            .start_video_generation(&self.config.gemini.video_model, &request)
            .await?;
        let operation_name = operation.name.clone();
        debug!(operation = %operation_name, done = operation.done, "Submitted video job");

        if !operation.done && operation_name.is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MalformedResponse(
                "video operation has no name".to_string(),
            ))
            .into());
        }

        let started = tokio::time::Instant::now();
        let max_wait = settings.max_wait();
        let mut polls: u32 = 0;

        while !operation.done {
            if let Some(limit) = max_wait {
                if started.elapsed() >= limit {
                    warn!(polls, "Video operation exceeded maximum wait");
                    return Err(GeminiError::new(GeminiErrorKind::PollTimeout {
                        waited_secs: started.elapsed().as_secs(),
                    })
                    .into());
                }
            }

            tokio::time::sleep(settings.poll_interval()).await;
            operation = transport.poll_video_operation(&operation_name).await?;
            polls += 1;
            debug!(polls, done = operation.done, "Polled video operation");
        }

        if let Some(status) = &operation.error {
            return Err(GeminiError::new(GeminiErrorKind::OperationFailed(format!(
                "{} (code {})",
                status.message, status.code
            )))
            .into());
        }

        let uri = operation
            .video_uri()
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::VideoUriMissing))?;
        let url = append_api_key(uri, &api_key)?;

        let video = transport.download(&url).await.map_err(|e| {
            StoryloomError::from(GeminiError::new(GeminiErrorKind::VideoDownload(
                error_payload(&e).replace(api_key.as_str(), "[redacted]"),
            )))
        })?;

        info!(polls, bytes = video.len(), "Generated scene video");
        Ok(video)
    }
}

/// Add `key=<api_key>` to a download URI, keeping its existing query.
fn append_api_key(uri: &str, api_key: &str) -> StoryloomResult<String> {
    let mut url = reqwest::Url::parse(uri).map_err(|e| {
        GeminiError::new(GeminiErrorKind::VideoDownload(format!(
            "Invalid video URI: {}",
            e
        )))
    })?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url.into())
}

/// The message carried by an error, without its source location.
fn error_payload(err: &StoryloomError) -> String {
    match err.kind() {
        StoryloomErrorKind::Http(e) => e.message.clone(),
        StoryloomErrorKind::Gemini(e) => e.kind.to_string(),
        _ => err.to_string(),
    }
}

/// Collapse any 403 signature into the feature's billing message.
fn remap_forbidden(err: StoryloomError, feature: PaidFeature) -> StoryloomError {
    if err.signals_forbidden() {
        warn!(feature = ?feature, error = %err, "Paid feature denied");
        GeminiError::new(GeminiErrorKind::PermissionDenied(feature)).into()
    } else {
        err
    }
}

#[async_trait]
impl StoryGenerator for GeminiStoryClient {
    #[instrument(skip(self))]
    async fn generate_story_script(
        &self,
        topic: &str,
        mode: StoryMode,
    ) -> StoryloomResult<StoryData> {
        let plan = ScriptPlan::for_mode(mode);
        let (_, transport) = self.connect()?;

        let request = GenerateContentRequest::from_text(
            plan.prompt(topic),
            GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(story_response_schema()),
                ..Default::default()
            },
        );

        debug!(model = %self.config.gemini.script_model, scenes = plan.scene_count(), "Requesting story script");
        let response = transport
            .generate_content(&self.config.gemini.script_model, &request)
            .await?;

        let text = response.text().ok_or_else(|| {
            GeminiError::new(GeminiErrorKind::EmptyResponse("story script".to_string()))
        })?;
        let script = parse_story_script(&text, &plan)?;

        let drifted = script.scenes_missing_character();
        if !drifted.is_empty() {
            warn!(scenes = ?drifted, "Image prompts omit the character description");
        }

        let story = StoryData::stamp(
            script,
            mode,
            uuid::Uuid::new_v4().to_string(),
            chrono::Utc::now().timestamp_millis(),
        );
        info!(id = %story.id, scenes = story.scenes().len(), "Generated story script");
        Ok(story)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn metadata(&self) -> GeneratorMetadata {
        GeneratorMetadata {
            provider: self.provider_name().to_string(),
            script_model: self.config.gemini.script_model.clone(),
            image_model: self.config.gemini.image_model.clone(),
            video_model: self.config.gemini.video_model.clone(),
            speech_model: self.config.gemini.speech_model.clone(),
            aspect_ratio: self.config.image.aspect_ratio.clone(),
            video_resolution: self.config.video.resolution.clone(),
        }
    }
}

#[async_trait]
impl SceneImages for GeminiStoryClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate_scene_image(&self, prompt: &str) -> StoryloomResult<String> {
        self.image_inner(prompt)
            .await
            .map_err(|e| remap_forbidden(e, PaidFeature::ImageGeneration))
    }

    fn image_aspect_ratio(&self) -> &str {
        &self.config.image.aspect_ratio
    }
}

#[async_trait]
impl SceneVideos for GeminiStoryClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate_scene_video(&self, prompt: &str) -> StoryloomResult<MediaBlob> {
        self.video_inner(prompt)
            .await
            .map_err(|e| remap_forbidden(e, PaidFeature::VideoGeneration))
    }
}

#[async_trait]
impl SceneNarration for GeminiStoryClient {
    #[instrument(skip(self, text), fields(voice = %voice, text_len = text.len()))]
    async fn generate_scene_audio(&self, text: &str, voice: Voice) -> StoryloomResult<MediaBlob> {
        let (_, transport) = self.connect()?;

        let request = GenerateContentRequest::from_text(
            text,
            GenerationConfig {
                response_modalities: Some(vec!["AUDIO".to_string()]),
                speech_config: Some(SpeechConfig::prebuilt(voice.name())),
                ..Default::default()
            },
        );

        debug!(model = %self.config.gemini.speech_model, "Requesting scene audio");
        let response = transport
            .generate_content(&self.config.gemini.speech_model, &request)
            .await?;

        let inline = response
            .first_parts()
            .first()
            .and_then(|part| part.inline_data.as_ref())
            .filter(|inline| !inline.data.is_empty())
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::EmptyResponse("audio".to_string())))?;

        let audio = MediaBlob::from_base64(inline.mime_type_or(DEFAULT_AUDIO_MIME), &inline.data)
            .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;

        info!(bytes = audio.len(), "Generated scene audio");
        Ok(audio)
    }

    fn default_voice(&self) -> Voice {
        self.config.speech.default_voice
    }
}
