//! Narrator voice selection.

use serde::{Deserialize, Serialize};

/// Narrator gender.
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
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceGender {
    /// Male narrator
    Male,
    /// Female narrator
    #[default]
    Female,
}

/// Narrator tone.
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
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoiceTone {
    /// Soft, gentle delivery
    #[default]
    Soft,
    /// Upbeat delivery
    Energetic,
    /// Low, resonant delivery
    Deep,
    /// Measured, formal delivery
    Formal,
}

/// Prebuilt speech-synthesis voices.
///
/// # Examples
///
/// ```
/// use storyloom_core::{Voice, VoiceGender, VoiceTone};
///
/// assert_eq!(Voice::select(VoiceGender::Male, VoiceTone::Deep), Voice::Charon);
/// assert_eq!(Voice::select(VoiceGender::Female, VoiceTone::Deep), Voice::Kore);
/// assert_eq!(Voice::Fenrir.to_string(), "Fenrir");
/// assert_eq!(Voice::default(), Voice::Kore);
/// ```
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
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Voice {
    /// Soft female voice; fallback for every female tone except energetic/formal
    #[default]
    Kore,
    /// Bright female voice
    Zephyr,
    /// Male voice for soft and formal tones
    Puck,
    /// Deep male voice
    Charon,
    /// Energetic male voice
    Fenrir,
}

impl Voice {
    /// Map a narrator gender and tone to a prebuilt voice.
    ///
    /// Total over every (gender, tone) pair.
    pub const fn select(gender: VoiceGender, tone: VoiceTone) -> Self {
        match (gender, tone) {
            (VoiceGender::Female, VoiceTone::Energetic | VoiceTone::Formal) => Voice::Zephyr,
            (VoiceGender::Female, _) => Voice::Kore,
            (VoiceGender::Male, VoiceTone::Deep) => Voice::Charon,
            (VoiceGender::Male, VoiceTone::Energetic) => Voice::Fenrir,
            (VoiceGender::Male, _) => Voice::Puck,
        }
    }

    /// Voice identifier as the speech endpoint expects it.
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}
