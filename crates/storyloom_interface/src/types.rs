//! Types shared between backends and callers.

use serde::{Deserialize, Serialize};

/// Models and media parameters a backend is configured with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorMetadata {
    /// Provider name
    pub provider: String,
    /// Text model for scripts
    pub script_model: String,
    /// Image model
    pub image_model: String,
    /// Video model
    pub video_model: String,
    /// Speech model
    pub speech_model: String,
    /// Aspect ratio used for images and video
    pub aspect_ratio: String,
    /// Video resolution
    pub video_resolution: String,
}
