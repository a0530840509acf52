//! Story duration tiers.

use serde::{Deserialize, Serialize};

/// Duration/format tier of a story. Fixes the number of scenes.
///
/// # Examples
///
/// ```
/// use storyloom_core::{StoryFormat, StoryMode};
///
/// assert_eq!(StoryMode::Short.scene_count(), 6);
/// assert_eq!(StoryMode::MegaLong.scene_count(), 12);
/// assert_eq!(StoryMode::Long.format(), StoryFormat::LongForm);
///
/// let mode: StoryMode = "mega_long".parse().unwrap();
/// assert_eq!(mode, StoryMode::MegaLong);
/// assert_eq!(mode.to_string(), "mega_long");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StoryMode {
    /// Short-form clip, roughly 40-50 seconds
    #[default]
    Short,
    /// Short-form clip, roughly 60-75 seconds
    Medium,
    /// Podcast-style chapters, 3-5 minutes
    Long,
    /// Audiobook-style chapters, around 30 minutes
    MegaLong,
}

impl StoryMode {
    /// Number of scenes (or chapters) a story in this mode must contain.
    pub const fn scene_count(self) -> usize {
        match self {
            StoryMode::Short => 6,
            StoryMode::Medium => 8,
            StoryMode::Long => 4,
            StoryMode::MegaLong => 12,
        }
    }

    /// Narrative format this mode belongs to.
    pub const fn format(self) -> StoryFormat {
        match self {
            StoryMode::Short | StoryMode::Medium => StoryFormat::ShortForm,
            StoryMode::Long | StoryMode::MegaLong => StoryFormat::LongForm,
        }
    }
}

/// Pacing family of a story mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum StoryFormat {
    /// Vertical short video pacing (Shorts/TikTok)
    ShortForm,
    /// Immersive audiobook narration split into chapters
    LongForm,
}
