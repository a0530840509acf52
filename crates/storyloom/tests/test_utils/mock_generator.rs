//! Scripted story generator for testing.

use async_trait::async_trait;
use std::sync::Mutex;
use storyloom::{
    GeminiError, GeminiErrorKind, GeneratorMetadata, MediaBlob, SceneImages, SceneNarration,
    SceneVideos, StoryData, StoryGenerator, StoryMode, StoryScript, StoryloomResult, Voice,
};

/// 16-bit PCM as the speech model returns it.
pub const PCM_MIME: &str = "audio/L16;codec=pcm;rate=24000";

/// Every call the generator received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorCall {
    Script { topic: String, mode: StoryMode },
    Image { prompt: String },
    Video { prompt: String },
    Audio { text: String, voice: Voice },
}

/// Mock generator returning fixed media.
///
/// Narration can be made to fail on the n-th call (1-based).
#[derive(Default)]
pub struct MockStoryGenerator {
    script: Option<StoryScript>,
    fail_audio_on: Option<usize>,
    calls: Mutex<Vec<GeneratorCall>>,
}

impl MockStoryGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return this script (re-stamped for the requested mode) instead of the default.
    pub fn with_script(mut self, script: StoryScript) -> Self {
        self.script = Some(script);
        self
    }

    /// Fail the `n`-th narration call.
    pub fn failing_audio_on(mut self, n: usize) -> Self {
        self.fail_audio_on = Some(n);
        self
    }

    /// All calls received so far.
    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: GeneratorCall) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        calls.len()
    }

    fn audio_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, GeneratorCall::Audio { .. }))
            .count()
    }
}

#[async_trait]
impl StoryGenerator for MockStoryGenerator {
    async fn generate_story_script(&self, topic: &str, mode: StoryMode) -> StoryloomResult<StoryData> {
        self.record(GeneratorCall::Script {
            topic: topic.to_string(),
            mode,
        });
        let script = self
            .script
            .clone()
            .unwrap_or_else(|| super::script_for(mode));
        Ok(StoryData::stamp(script, mode, "story-1", 1_700_000_000_000))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn metadata(&self) -> GeneratorMetadata {
        GeneratorMetadata {
            provider: "mock".to_string(),
            script_model: "mock-script".to_string(),
            image_model: "mock-image".to_string(),
            video_model: "mock-video".to_string(),
            speech_model: "mock-speech".to_string(),
            aspect_ratio: "9:16".to_string(),
            video_resolution: "720p".to_string(),
        }
    }
}

#[async_trait]
impl SceneImages for MockStoryGenerator {
    async fn generate_scene_image(&self, prompt: &str) -> StoryloomResult<String> {
        self.record(GeneratorCall::Image {
            prompt: prompt.to_string(),
        });
        Ok("data:image/png;base64,iVBORw0K".to_string())
    }
}

#[async_trait]
impl SceneVideos for MockStoryGenerator {
    async fn generate_scene_video(&self, prompt: &str) -> StoryloomResult<MediaBlob> {
        self.record(GeneratorCall::Video {
            prompt: prompt.to_string(),
        });
        Ok(MediaBlob::new("video/mp4", vec![0, 0, 0, 24]))
    }
}

#[async_trait]
impl SceneNarration for MockStoryGenerator {
    async fn generate_scene_audio(&self, text: &str, voice: Voice) -> StoryloomResult<MediaBlob> {
        self.record(GeneratorCall::Audio {
            text: text.to_string(),
            voice,
        });
        if self.fail_audio_on == Some(self.audio_calls()) {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse("audio".to_string())).into());
        }
        Ok(MediaBlob::new(PCM_MIME, vec![0, 0, 1, 0, 2, 0]))
    }
}
