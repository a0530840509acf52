//! Generated media types.

use crate::{SoundEffect, StoryData, StoryScene, VisualEffect};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Binary media held in memory with its MIME type.
///
/// Serializes `data` as standard base64.
///
/// # Examples
///
/// ```
/// use storyloom_core::MediaBlob;
///
/// let blob = MediaBlob::from_base64("image/png", "iVBORw0K").unwrap();
/// assert_eq!(blob.len(), 6);
/// assert_eq!(blob.to_data_uri(), "data:image/png;base64,iVBORw0K");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaBlob {
    /// MIME type, e.g. "video/mp4" or "audio/L16;codec=pcm;rate=24000"
    pub mime_type: String,
    /// Raw bytes
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl MediaBlob {
    /// Create a blob from raw bytes.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Decode a blob from standard base64.
    pub fn from_base64(
        mime_type: impl Into<String>,
        encoded: &str,
    ) -> Result<Self, base64::DecodeError> {
        Ok(Self::new(mime_type, STANDARD.decode(encoded)?))
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the blob holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encode as a `data:` URI.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// Assets produced for one scene. Assembled by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSceneMedia {
    /// Scene still, usually a data URI or a file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Scene clip, usually a file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Decoded narration audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<MediaBlob>,
    /// Narration written out as a file, in place of inline `audio`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Thai narration text
    pub text: String,
    /// English narration text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_en: Option<String>,
    /// Visual effect tag copied from the scene
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_effect: Option<VisualEffect>,
    /// Sound effect tag copied from the scene
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_effect: Option<SoundEffect>,
}

impl GeneratedSceneMedia {
    /// Seed the text and effect fields from a scene, with no assets yet.
    pub fn from_scene(scene: &StoryScene) -> Self {
        Self {
            text: scene.story_text.clone(),
            text_en: scene.english_translation.clone(),
            visual_effect: scene.visual_effect,
            sound_effect: scene.sound_effect,
            ..Self::default()
        }
    }
}

/// A story paired with the media produced for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    /// The generated story
    pub story_data: StoryData,
    /// Media per scene, in scene order
    pub media: Vec<GeneratedSceneMedia>,
}
