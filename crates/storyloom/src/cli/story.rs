//! Full story production handler.

use super::open_client;
use std::path::Path;
use storyloom::{
    AssetWriter, MANIFEST_FILE, MediaType, StoryConfig, StoryMode, StoryPipeline,
    StoryloomConfig, StoryloomResult, VoiceGender, VoiceTone,
};

/// Render settings for a CLI story run.
#[derive(Debug, Clone, Copy)]
pub struct StoryOptions {
    pub mode: StoryMode,
    pub media: MediaType,
    pub gender: VoiceGender,
    pub tone: VoiceTone,
}

/// Generate a complete story into `out_dir`.
pub async fn story(
    config: StoryloomConfig,
    topic: &str,
    options: StoryOptions,
    out_dir: &Path,
) -> StoryloomResult<()> {
    let client = open_client(config)?;
    let writer = AssetWriter::create(out_dir).await?;
    let pipeline = StoryPipeline::new(&client, writer);

    let render = StoryConfig {
        duration: options.mode,
        media_type: options.media,
        voice_gender: options.gender,
        voice_tone: options.tone,
        ..StoryConfig::default()
    };

    println!(
        "Generating a {} story ({} scenes, {} media)...",
        options.mode,
        options.mode.scene_count(),
        options.media
    );
    let item = pipeline.run(topic, render).await?;

    println!("Title: {}", item.story_data.script.title);
    println!("Scenes: {}", item.media.len());
    println!("Manifest: {}", out_dir.join(MANIFEST_FILE).display());
    Ok(())
}
