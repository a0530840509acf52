//! Closed sets of per-scene effect tags.
//!
//! Both enums deserialize strictly: a tag outside the set is a contract
//! violation and fails parsing.

use serde::{Deserialize, Serialize};

/// Visual effect overlaid on a scene.
///
/// # Examples
///
/// ```
/// use storyloom_core::VisualEffect;
/// use strum::IntoEnumIterator;
///
/// assert_eq!(VisualEffect::iter().count(), 9);
/// assert_eq!(VisualEffect::CameraShake.as_ref(), "camera_shake");
/// assert!(serde_json::from_str::<VisualEffect>("\"confetti\"").is_err());
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
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VisualEffect {
    /// No overlay
    #[default]
    None,
    /// Light rain
    Rain,
    /// Storm
    Storm,
    /// Falling snow
    Snow,
    /// Fire and embers
    Fire,
    /// Fog
    Fog,
    /// Magic sparkles
    Sparkles,
    /// Shaking camera, for running or chasing scenes
    CameraShake,
    /// Lightning flashes
    Lightning,
}

/// Ambient sound effect mixed under a scene's narration.
///
/// # Examples
///
/// ```
/// use storyloom_core::SoundEffect;
/// use strum::IntoEnumIterator;
///
/// assert_eq!(SoundEffect::iter().count(), 10);
/// let tag: SoundEffect = serde_json::from_str("\"heavy_rain\"").unwrap();
/// assert_eq!(tag, SoundEffect::HeavyRain);
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
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SoundEffect {
    /// Silence
    #[default]
    None,
    /// Rain
    Rain,
    /// Thunder
    Thunder,
    /// Forest ambience
    Forest,
    /// City ambience
    City,
    /// Crackling fire
    Fire,
    /// Magic chimes
    Magic,
    /// Footsteps
    Footsteps,
    /// Wind
    Wind,
    /// Heavy rain
    HeavyRain,
}
