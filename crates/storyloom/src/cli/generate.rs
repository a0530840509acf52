//! Single-asset generation handlers.

use super::open_client;
use std::path::Path;
use storyloom::{
    AssetWriter, JsonError, SceneImages, SceneNarration, SceneVideos, StoryGenerator,
    StoryMode, StoryloomConfig, StoryloomResult, Voice, VoiceGender, VoiceTone,
    decode_data_uri, to_playable_audio,
};

/// Generate a script and print or save it as JSON.
pub async fn script(
    config: StoryloomConfig,
    topic: &str,
    mode: StoryMode,
    out: Option<&Path>,
) -> StoryloomResult<()> {
    let client = open_client(config)?;
    let story = client.generate_story_script(topic, mode).await?;

    let json =
        serde_json::to_string_pretty(&story).map_err(|e| JsonError::context("story", e))?;
    match out {
        Some(path) => {
            write_file(path, json.as_bytes()).await?;
            println!("Wrote {} ({} scenes)", path.display(), story.scenes().len());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Generate one image and write the decoded bytes.
pub async fn image(config: StoryloomConfig, prompt: &str, out: &Path) -> StoryloomResult<()> {
    let client = open_client(config)?;
    let uri = client.generate_scene_image(prompt).await?;
    let blob = decode_data_uri(&uri)?;

    write_file(out, &blob.data).await?;
    println!("Wrote {} ({}, {} bytes)", out.display(), blob.mime_type, blob.len());
    Ok(())
}

/// Generate one clip and write it.
pub async fn video(config: StoryloomConfig, prompt: &str, out: &Path) -> StoryloomResult<()> {
    let client = open_client(config)?;
    println!("Generating video, this can take several minutes...");
    let clip = client.generate_scene_video(prompt).await?;

    write_file(out, &clip.data).await?;
    println!("Wrote {} ({}, {} bytes)", out.display(), clip.mime_type, clip.len());
    Ok(())
}

/// Synthesize narration and write it as WAV.
pub async fn audio(
    config: StoryloomConfig,
    text: &str,
    voice: Option<Voice>,
    gender: Option<VoiceGender>,
    tone: Option<VoiceTone>,
    out: &Path,
) -> StoryloomResult<()> {
    let client = open_client(config)?;
    let voice = pick_voice(voice, gender, tone, client.default_voice());
    let narration = client.generate_scene_audio(text, voice).await?;
    let narration = to_playable_audio(&narration)?;

    write_file(out, &narration.data).await?;
    println!("Wrote {} (voice {}, {} bytes)", out.display(), voice, narration.len());
    Ok(())
}

/// Print the voice for a gender and tone.
pub fn voice(gender: VoiceGender, tone: VoiceTone) {
    println!("{}", Voice::select(gender, tone));
}

/// An explicit voice wins; otherwise a gender or tone selects one, with the
/// other defaulted; otherwise the configured default applies.
fn pick_voice(
    voice: Option<Voice>,
    gender: Option<VoiceGender>,
    tone: Option<VoiceTone>,
    fallback: Voice,
) -> Voice {
    match (voice, gender, tone) {
        (Some(voice), _, _) => voice,
        (None, None, None) => fallback,
        (None, gender, tone) => Voice::select(gender.unwrap_or_default(), tone.unwrap_or_default()),
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> StoryloomResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    AssetWriter::create(dir).await?.write(&name, bytes).await?;
    Ok(())
}
