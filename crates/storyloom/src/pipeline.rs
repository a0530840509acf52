//! End-to-end story production.

use crate::assets::{AssetWriter, decode_data_uri, to_playable_audio};
use storyloom_core::{
    GeneratedSceneMedia, HistoryItem, MediaType, StoryConfig, StoryData, StoryScene, Voice,
};
use storyloom_error::StoryloomResult;
use storyloom_interface::{SceneImages, SceneNarration, SceneVideos};
use tracing::{debug, info, instrument};

/// Manifest file written next to the assets.
pub const MANIFEST_FILE: &str = "story.json";

/// Generates a story and all of its media, writing everything to one
/// directory.
///
/// Steps run strictly in order: script, cover image, then for each scene its
/// image or clip followed by its narration. The first failure aborts the run
/// and no manifest is written.
///
/// # Output Layout
///
/// ```text
/// out/
/// ├── cover.png
/// ├── scene-01.png              (or scene-01.mp4 for video stories)
/// ├── scene-01-narration.wav
/// ├── ...
/// └── story.json                (HistoryItem with file names)
/// ```
pub struct StoryPipeline<'a, G: ?Sized> {
    generator: &'a G,
    writer: AssetWriter,
}

impl<'a, G> StoryPipeline<'a, G>
where
    G: SceneImages + SceneVideos + SceneNarration + ?Sized,
{
    /// Create a pipeline writing through `writer`.
    pub fn new(generator: &'a G, writer: AssetWriter) -> Self {
        Self { generator, writer }
    }

    /// The asset writer.
    pub fn writer(&self) -> &AssetWriter {
        &self.writer
    }

    /// Produce a complete story for `topic` using the render settings in `config`.
    ///
    /// The returned item references assets by file name; `audio` is left
    /// empty in favor of `audio_url`.
    ///
    /// # Errors
    ///
    /// Returns the first generation or storage error encountered.
    #[instrument(skip(self, config), fields(mode = %config.duration, media = %config.media_type))]
    pub async fn run(&self, topic: &str, config: StoryConfig) -> StoryloomResult<HistoryItem> {
        let mut story = self
            .generator
            .generate_story_script(topic, config.duration)
            .await?;
        info!(id = %story.id, title = %story.script.title, "Script ready");

        let voice = Voice::select(config.voice_gender, config.voice_tone);
        debug!(voice = %voice, "Narrator selected");

        story.cover_image_url = Some(self.cover(&story).await?);

        let mut media = Vec::with_capacity(story.scenes().len());
        for (index, scene) in story.scenes().iter().enumerate() {
            let stem = format!("scene-{:02}", index + 1);
            media.push(self.scene(scene, &stem, config.media_type, voice).await?);
            info!(
                scene = index + 1,
                total = story.scenes().len(),
                "Scene ready"
            );
        }

        story.config = Some(config);
        let item = HistoryItem {
            story_data: story,
            media,
        };

        let manifest = self.writer.write_json(MANIFEST_FILE, &item).await?;
        info!(path = %manifest.display(), "Story written");
        Ok(item)
    }

    async fn cover(&self, story: &StoryData) -> StoryloomResult<String> {
        let prompt = story
            .script
            .cover_image_prompt
            .clone()
            .filter(|prompt| !prompt.trim().is_empty())
            .or_else(|| story.scenes().first().map(|scene| scene.image_prompt.clone()))
            .unwrap_or_else(|| story.script.title.clone());

        let uri = self.generator.generate_scene_image(&prompt).await?;
        self.writer.write_blob("cover", &decode_data_uri(&uri)?).await
    }

    async fn scene(
        &self,
        scene: &StoryScene,
        stem: &str,
        media_type: MediaType,
        voice: Voice,
    ) -> StoryloomResult<GeneratedSceneMedia> {
        let mut media = GeneratedSceneMedia::from_scene(scene);

        match media_type {
            MediaType::Image => {
                let uri = self.generator.generate_scene_image(&scene.image_prompt).await?;
                let file = self.writer.write_blob(stem, &decode_data_uri(&uri)?).await?;
                media.image_url = Some(file);
            }
            MediaType::Video => {
                let clip = self.generator.generate_scene_video(&scene.image_prompt).await?;
                let file = self.writer.write_blob(stem, &clip).await?;
                media.video_url = Some(file);
            }
        }

        let narration = self
            .generator
            .generate_scene_audio(&scene.story_text, voice)
            .await?;
        let narration = to_playable_audio(&narration)?;
        let file = self
            .writer
            .write_blob(&format!("{}-narration", stem), &narration)
            .await?;
        media.audio_url = Some(file);

        Ok(media)
    }
}
