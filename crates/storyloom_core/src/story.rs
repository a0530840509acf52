//! Story script and scene types.
//!
//! Field names serialize in camelCase; this is the contract consumed by
//! rendering and playback callers.

use crate::{SoundEffect, StoryMode, VisualEffect, VoiceGender, VoiceTone};
use serde::{Deserialize, Serialize};

/// One narrative beat of a story.
///
/// # Examples
///
/// ```
/// use storyloom_core::{StorySceneBuilder, VisualEffect};
///
/// let scene = StorySceneBuilder::default()
///     .scene_number(1u32)
///     .story_text("กาลครั้งหนึ่ง...")
///     .image_prompt("Photorealistic, 8k, cinematic lighting, a girl in a red hoodie")
///     .visual_effect(Some(VisualEffect::Fog))
///     .build()
///     .unwrap();
///
/// assert_eq!(scene.scene_number, 1);
/// assert!(scene.english_translation.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct StoryScene {
    /// 1-based position within the story
    pub scene_number: u32,
    /// Thai narration text
    pub story_text: String,
    /// English translation of the narration, used for subtitles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub english_translation: Option<String>,
    /// Image-generation prompt; embeds the character description
    pub image_prompt: String,
    /// Visual effect tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub visual_effect: Option<VisualEffect>,
    /// Sound effect tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub sound_effect: Option<SoundEffect>,
}

/// The story as returned by the script model, before stamping.
///
/// Required fields are enforced at deserialization; effect tags outside the
/// closed sets are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryScript {
    /// Story title (Thai)
    pub title: String,
    /// Short clickbait phrase for the thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_title: Option<String>,
    /// Prompt for the cover/thumbnail image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_prompt: Option<String>,
    /// Short SEO description
    pub seo_summary: String,
    /// Hashtags
    pub tags: Vec<String>,
    /// Visual description of the main character, repeated in every image prompt
    pub character_description: String,
    /// Overall sentiment label (e.g. "Happy", "Scary")
    pub mood: String,
    /// Ordered scenes
    pub scenes: Vec<StoryScene>,
}

impl StoryScript {
    /// Scene numbers whose image prompt does not contain the character description.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_core::{StoryScene, StoryScript};
    ///
    /// let scene = |n: u32, prompt: &str| StoryScene {
    ///     scene_number: n,
    ///     story_text: String::new(),
    ///     english_translation: None,
    ///     image_prompt: prompt.to_string(),
    ///     visual_effect: None,
    ///     sound_effect: None,
    /// };
    /// let script = StoryScript {
    ///     title: "t".into(),
    ///     cover_title: None,
    ///     cover_image_prompt: None,
    ///     seo_summary: "s".into(),
    ///     tags: vec![],
    ///     character_description: "a red hoodie".into(),
    ///     mood: "Calm".into(),
    ///     scenes: vec![scene(1, "girl in a red hoodie"), scene(2, "empty street")],
    /// };
    /// assert_eq!(script.scenes_missing_character(), vec![2]);
    /// ```
    pub fn scenes_missing_character(&self) -> Vec<u32> {
        let description = self.character_description.trim();
        if description.is_empty() {
            return Vec::new();
        }
        self.scenes
            .iter()
            .filter(|scene| !scene.image_prompt.contains(description))
            .map(|scene| scene.scene_number)
            .collect()
    }
}

/// One generated story: the script stamped with identity and mode.
///
/// Stamping only adds `id`, `createdAt` and `mode`; the script fields are
/// flattened into the same JSON object unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryData {
    /// Unique identifier, used by history lists
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at: i64,
    /// Duration tier the story was generated for
    pub mode: StoryMode,
    /// Script content returned by the model
    #[serde(flatten)]
    pub script: StoryScript,
    /// Rendered cover image, attached by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    /// Render settings chosen by the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<StoryConfig>,
}

impl StoryData {
    /// Stamp a parsed script with an id, creation time and mode.
    pub fn stamp(script: StoryScript, mode: StoryMode, id: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            created_at,
            mode,
            script,
            cover_image_url: None,
            config: None,
        }
    }

    /// The story's scenes in order.
    pub fn scenes(&self) -> &[StoryScene] {
        &self.script.scenes
    }
}

/// Whether scenes are illustrated with stills or generated clips.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaType {
    /// One generated image per scene
    #[default]
    Image,
    /// One generated video clip per scene
    Video,
}

/// Subtitle language.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubtitleLang {
    /// Thai
    #[default]
    Th,
    /// English
    En,
}

/// Render settings a caller attaches to a story.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_builder::Builder,
)]
#[serde(rename_all = "camelCase")]
#[builder(default)]
pub struct StoryConfig {
    /// Duration tier
    pub duration: StoryMode,
    /// Scene media kind
    pub media_type: MediaType,
    /// Narrator gender
    pub voice_gender: VoiceGender,
    /// Narrator tone
    pub voice_tone: VoiceTone,
    /// Whether background music is mixed in
    pub bgm_enabled: bool,
    /// Whether subtitles start visible
    pub default_show_subtitles: bool,
    /// Initial subtitle language
    pub default_subtitle_lang: SubtitleLang,
}
