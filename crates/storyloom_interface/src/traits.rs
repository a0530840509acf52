//! Trait definitions for story backends and their media capabilities.

use crate::GeneratorMetadata;
use async_trait::async_trait;
use storyloom_core::{MediaBlob, StoryData, StoryMode, Voice};
use storyloom_error::StoryloomResult;

/// Core trait that every story backend implements.
///
/// Every call resolves its own credential; implementations hold no
/// per-call state.
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Generate a stamped story script for a topic.
    ///
    /// The returned story holds exactly `mode.scene_count()` scenes.
    async fn generate_story_script(&self, topic: &str, mode: StoryMode)
    -> StoryloomResult<StoryData>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Models and parameters this backend is configured with.
    fn metadata(&self) -> GeneratorMetadata;
}

/// Backends that render a still image for a scene.
#[async_trait]
pub trait SceneImages: StoryGenerator {
    /// Generate one image and return it as a `data:` URI.
    async fn generate_scene_image(&self, prompt: &str) -> StoryloomResult<String>;

    /// Aspect ratio requested for every image.
    fn image_aspect_ratio(&self) -> &str {
        "9:16"
    }
}

/// Backends that render a video clip for a scene.
#[async_trait]
pub trait SceneVideos: StoryGenerator {
    /// Submit a video job, wait for it to finish and download the clip.
    async fn generate_scene_video(&self, prompt: &str) -> StoryloomResult<MediaBlob>;

    /// Supported video output formats (MIME types).
    fn supported_video_output_formats(&self) -> &[&'static str] {
        &["video/mp4"]
    }
}

/// Backends that synthesize scene narration.
#[async_trait]
pub trait SceneNarration: StoryGenerator {
    /// Synthesize `text` with a prebuilt voice and return the decoded audio.
    async fn generate_scene_audio(&self, text: &str, voice: Voice) -> StoryloomResult<MediaBlob>;

    /// Voice used when the caller does not pick one.
    fn default_voice(&self) -> Voice {
        Voice::default()
    }
}
