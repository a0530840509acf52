//! Wire types for the Gemini REST API.
//!
//! Only the fields Storyloom reads or sends are modelled; unknown response
//! fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents; Storyloom always sends a single user turn
    pub contents: Vec<Content>,
    /// Output constraints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single-turn request carrying one text part.
    pub fn from_text(text: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::text(text)],
            }],
            generation_config: Some(config),
        }
    }
}

/// A turn in a request or a candidate's content in a response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Author role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One piece of content: text or inline binary data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64 binary payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    /// A text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline data part.
    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: Some(mime_type.into()),
                data: data.into(),
            }),
        }
    }
}

/// Base64-encoded binary payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Standard base64 data
    #[serde(default)]
    pub data: String,
}

impl InlineData {
    /// The reported MIME type, or `fallback` when absent or blank.
    pub fn mime_type_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.mime_type.as_deref() {
            Some(mime) if !mime.trim().is_empty() => mime,
            _ => fallback,
        }
    }
}

/// Output constraints for `generateContent`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Response MIME type, e.g. "application/json"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// OpenAPI-style response schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    /// Requested output modalities, e.g. ["AUDIO"]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    /// Speech synthesis settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_config: Option<SpeechConfig>,
    /// Image generation settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

/// Speech synthesis settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechConfig {
    /// Voice selection
    pub voice_config: VoiceConfig,
}

impl SpeechConfig {
    /// Settings selecting a prebuilt voice by name.
    pub fn prebuilt(voice_name: impl Into<String>) -> Self {
        Self {
            voice_config: VoiceConfig {
                prebuilt_voice_config: PrebuiltVoiceConfig {
                    voice_name: voice_name.into(),
                },
            },
        }
    }
}

/// Voice selection wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// Prebuilt voice
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

/// A prebuilt voice by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    /// Voice identifier, e.g. "Kore"
    pub voice_name: String,
}

/// Image generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    /// Aspect ratio, e.g. "9:16"
    pub aspect_ratio: String,
    /// Output size class, e.g. "1K"
    pub image_size: String,
}

/// Response body of `generateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidates in ranked order
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One response candidate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Parts of the first candidate, empty when there is none.
    pub fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text of the first candidate, `None` when blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_models::{Candidate, Content, GenerateContentResponse, Part};
    ///
    /// let response = GenerateContentResponse {
    ///     candidates: vec![Candidate {
    ///         content: Some(Content {
    ///             role: Some("model".to_string()),
    ///             parts: vec![Part::text("{\"title\":"), Part::text("\"x\"}")],
    ///         }),
    ///         finish_reason: None,
    ///     }],
    /// };
    /// assert_eq!(response.text().as_deref(), Some("{\"title\":\"x\"}"));
    /// assert!(GenerateContentResponse::default().text().is_none());
    /// ```
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }

    /// First part of the first candidate carrying non-empty inline data.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.first_parts()
            .iter()
            .filter_map(|part| part.inline_data.as_ref())
            .find(|inline| !inline.data.is_empty())
    }
}

/// Request body for `models/{model}:predictLongRunning`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictLongRunningRequest {
    /// Prompt instances
    pub instances: Vec<VideoInstance>,
    /// Output parameters
    pub parameters: VideoParameters,
}

/// One video prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInstance {
    /// Text prompt
    pub prompt: String,
}

/// Video output parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    /// Clips to generate
    pub sample_count: u32,
    /// Resolution, e.g. "720p"
    pub resolution: String,
    /// Aspect ratio, e.g. "9:16"
    pub aspect_ratio: String,
}

/// A long-running video operation as returned by submit and poll.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOperation {
    /// Resource name, e.g. "models/veo/operations/abc123"
    #[serde(default)]
    pub name: String,
    /// Whether the job finished
    #[serde(default)]
    pub done: bool,
    /// Failure status, present when the job failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationStatus>,
    /// Result payload, present when the job succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<VideoOperationResponse>,
}

impl VideoOperation {
    /// Download URI of the first generated clip.
    pub fn video_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
    }
}

/// `google.rpc.Status` subset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OperationStatus {
    /// gRPC status code
    #[serde(default)]
    pub code: i32,
    /// Error message
    #[serde(default)]
    pub message: String,
}

/// Result wrapper of a finished video operation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOperationResponse {
    /// Generated clips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

/// Generated clips.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    /// One entry per clip
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

/// One generated clip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeneratedSample {
    /// Clip location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoFile>,
}

/// A generated clip's location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoFile {
    /// Download URI; requires the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}
