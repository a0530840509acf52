//! Gemini generators for Storyloom.
//!
//! This crate turns a topic into a story package by calling the Gemini REST
//! API: a structured story script, then per-scene images or video clips and
//! narration audio. Each operation is an independent async call; callers
//! sequence them per scene.
//!
//! # Example
//!
//! ```no_run
//! use storyloom_core::{StoryMode, Voice, VoiceGender, VoiceTone};
//! use storyloom_interface::{SceneImages, SceneNarration, StoryGenerator};
//! use storyloom_models::GeminiStoryClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiStoryClient::new()?;
//! let story = client.generate_story_script("a brave little turtle", StoryMode::Short).await?;
//!
//! let voice = Voice::select(VoiceGender::Female, VoiceTone::Soft);
//! for scene in story.scenes() {
//!     let image = client.generate_scene_image(&scene.image_prompt).await?;
//!     let audio = client.generate_scene_audio(&scene.story_text, voice).await?;
//!     println!("scene {}: {} image chars, {} audio bytes", scene.scene_number, image.len(), audio.len());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credential;
mod gemini;

pub use credential::{
    CredentialResolver, CredentialSource, EnvLookup, FileCredentialStore, MemoryCredentialStore,
};
pub use gemini::{
    Candidate, Content, GeminiRestTransport, GeminiStoryClient, GeminiTransport,
    GenerateContentRequest, GenerateContentResponse, GenerateVideoResponse, GeneratedSample,
    GenerationConfig, ImageConfig, InlineData, OperationStatus, Part, PredictLongRunningRequest,
    PrebuiltVoiceConfig, RestTransportFactory, ScriptPlan, SpeechConfig, TransportFactory,
    VideoFile, VideoInstance, VideoOperation, VideoOperationResponse, VideoParameters,
    VoiceConfig, parse_story_script, story_response_schema,
};
