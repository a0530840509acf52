//! Google Gemini backend.
//!
//! - [`GeminiStoryClient`] - the story, image, video and narration generator
//! - [`GeminiTransport`] / [`TransportFactory`] - the HTTP seam, with the
//!   `reqwest` implementation [`GeminiRestTransport`]
//! - [`ScriptPlan`] - per-mode prompt parameters and response validation
//! - `protocol` - REST wire types

mod client;
mod protocol;
mod script;
mod transport;

pub use client::GeminiStoryClient;
pub use protocol::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerateVideoResponse,
    GeneratedSample, GenerationConfig, ImageConfig, InlineData, OperationStatus, Part,
    PredictLongRunningRequest, PrebuiltVoiceConfig, SpeechConfig, VideoFile, VideoInstance,
    VideoOperation, VideoOperationResponse, VideoParameters, VoiceConfig,
};
pub use script::{ScriptPlan, parse_story_script, story_response_schema};
pub use transport::{GeminiRestTransport, GeminiTransport, RestTransportFactory, TransportFactory};
