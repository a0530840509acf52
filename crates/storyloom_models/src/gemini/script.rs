//! Story script prompts, response schema and response validation.

use serde_json::{Value, json};
use storyloom_core::{SoundEffect, StoryFormat, StoryMode, StoryScript, VisualEffect};
use storyloom_error::{GeminiError, GeminiErrorKind, StoryloomResult};
use strum::IntoEnumIterator;

/// Prompt parameters derived from a [`StoryMode`].
///
/// # Examples
///
/// ```
/// use storyloom_core::StoryMode;
/// use storyloom_models::ScriptPlan;
///
/// let plan = ScriptPlan::for_mode(StoryMode::Medium);
/// assert_eq!(*plan.scene_count(), 8);
/// assert!(plan.prompt("a lost kitten").contains("exactly 8 scenes"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ScriptPlan {
    mode: StoryMode,
    scene_count: usize,
    duration: &'static str,
    length: Option<&'static str>,
}

impl ScriptPlan {
    /// The plan for a mode.
    pub fn for_mode(mode: StoryMode) -> Self {
        let (duration, length) = match mode {
            StoryMode::Short => ("Total video length should be approx 40-50 seconds.", None),
            StoryMode::Medium => ("Total video length should be approx 60-75 seconds.", None),
            StoryMode::Long => (
                "Target Duration: 3-5 Minutes Podcast Style.",
                Some(
                    "Long and detailed. Each chapter must be 100-150 words. \
                     It should take 45-60 seconds to read each scene.",
                ),
            ),
            StoryMode::MegaLong => (
                "Target Duration: 30 Minutes Audiobook Style.",
                Some(
                    "EXTREMELY LONG. Each chapter must be 300-400 words. \
                     It should take 2-3 minutes to read each scene.",
                ),
            ),
        };

        Self {
            mode,
            scene_count: mode.scene_count(),
            duration,
            length,
        }
    }

    /// Render the prompt for `topic`.
    pub fn prompt(&self, topic: &str) -> String {
        match self.mode.format() {
            StoryFormat::ShortForm => self.short_form_prompt(topic),
            StoryFormat::LongForm => self.long_form_prompt(topic),
        }
    }

    fn short_form_prompt(&self, topic: &str) -> String {
        let n = self.scene_count;
        format!(
            r#"Create a viral short story in Thai for YouTube Shorts/TikTok about: "{topic}".

Requirements:
1. **Duration:** {duration} Create exactly {n} scenes.
2. **Structure:** The story MUST be complete with a clear beginning, middle, and a satisfying ending within exactly {n} scenes.
3. **Visual Style:** Define a "Photorealistic, Cinematic, 8K resolution, Pixar-style 3D render but realistic lighting" style.
4. **Character Consistency:** Define a main character with consistent features (e.g., "A cute little girl with a red hoodie and big brown eyes"). **YOU MUST INCLUDE THIS EXACT DESCRIPTION IN EVERY SINGLE 'imagePrompt'**.
5. **Audio/Mood:** Analyze the story's overall sentiment. Is it Happy, Sad, Exciting, Scary, or Calm?
6. **Language:** The 'storyText' MUST be in Thai. You MUST also provide an 'englishTranslation' for subtitles.
7. **FX Analysis:**
   - 'visualEffect': Choose from [{visual}]. 'camera_shake' for running/chasing scenes.
   - 'soundEffect': Choose from [{sound}].
8. **SEO & Cover:**
   - Generate a standard "Title" in Thai.
   - Generate a **"Cover Title"**: A very short, punchy, CLICKBAIT phrase (2-5 words) in Thai for the thumbnail (e.g., "จุดจบสายแข็ง", "ผีบังตา", "อย่ามองกลับหลัง").
   - Generate a **"Cover Image Prompt"**: A highly detailed, dramatic image prompt for the video cover/thumbnail. High contrast, expressive, YouTube Thumbnail style collage.
   - Generate a compelling Description and 10 trending Hashtags.
9. **Scenes:**
   - Create exactly {n} scenes.
   - 'storyText': Thai narration (keep it concise, ~8-10 seconds reading time per scene).
   - 'englishTranslation': Accurate English translation of the storyText.
   - 'imagePrompt': Detailed English prompt. START with: "Photorealistic, 8k, cinematic lighting...". **INCLUDE THE CHARACTER DESCRIPTION**.

Output JSON format."#,
            duration = self.duration,
            visual = visual_effect_names().join(", "),
            sound = sound_effect_names().join(", "),
        )
    }

    fn long_form_prompt(&self, topic: &str) -> String {
        let n = self.scene_count;
        format!(
            r#"Create a detailed, immersive "Audiobook" style story in Thai about: "{topic}".

Requirements:
1. **Format:** This is a Long Form story. {duration} Focus on deep narration, beautiful language, and immersive storytelling.
2. **Structure:** Divide the story into exactly {n} Chapters (Scenes).
3. **Length:** {length}
4. **Cover:** Generate a "Cover Title" (Short clickbait in Thai) and "Cover Image Prompt" (YouTube Thumbnail style).
5. **Character:** Define a main character with consistent features. Include this exact description in every 'imagePrompt'.
6. **Language:** The 'storyText' MUST be in Thai. You MUST also provide an 'englishTranslation' for subtitles.
7. **FX Analysis:** Choose 'visualEffect' from [{visual}] and 'soundEffect' from [{sound}].
8. **Mood:** Analyze the sentiment (Happy, Sad, Exciting, Scary, or Calm).
9. **SEO:** Title, Description, 10 Hashtags.

Output JSON format with properties: title, coverTitle, coverImagePrompt, seoSummary, tags, characterDescription, mood, scenes."#,
            duration = self.duration,
            length = self.length.unwrap_or_default(),
            visual = visual_effect_names().join(", "),
            sound = sound_effect_names().join(", "),
        )
    }
}

fn visual_effect_names() -> Vec<&'static str> {
    VisualEffect::iter().map(|effect| effect.into()).collect()
}

fn sound_effect_names() -> Vec<&'static str> {
    SoundEffect::iter().map(|effect| effect.into()).collect()
}

/// Response schema sent with every script request.
///
/// Effect enums are generated from the closed sets so the schema and the
/// parser cannot drift apart.
pub fn story_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "Title in Thai" },
            "coverTitle": { "type": "STRING", "description": "Short catchy cover text (2-5 words) in Thai" },
            "coverImagePrompt": { "type": "STRING", "description": "Cinematic cover image prompt" },
            "seoSummary": { "type": "STRING", "description": "Description" },
            "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "characterDescription": { "type": "STRING" },
            "mood": { "type": "STRING" },
            "scenes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "sceneNumber": { "type": "INTEGER" },
                        "storyText": { "type": "STRING" },
                        "englishTranslation": { "type": "STRING" },
                        "imagePrompt": { "type": "STRING" },
                        "visualEffect": { "type": "STRING", "enum": visual_effect_names() },
                        "soundEffect": { "type": "STRING", "enum": sound_effect_names() },
                    },
                    "required": ["sceneNumber", "storyText", "imagePrompt"],
                },
            },
        },
        "required": [
            "title",
            "seoSummary",
            "tags",
            "characterDescription",
            "mood",
            "scenes",
        ],
    })
}

/// Parse and validate a script response against `plan`.
///
/// # Errors
///
/// - [`GeminiErrorKind::MalformedResponse`] for invalid JSON, missing
///   required fields, effect tags outside the closed sets, or scenes not
///   numbered `1..=n` in order
/// - [`GeminiErrorKind::SceneCountMismatch`] when the scene count differs
///   from the plan
pub fn parse_story_script(text: &str, plan: &ScriptPlan) -> StoryloomResult<StoryScript> {
    let script: StoryScript = serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
            "story script: {}",
            e
        )))
    })?;

    if script.scenes.len() != plan.scene_count {
        return Err(GeminiError::new(GeminiErrorKind::SceneCountMismatch {
            expected: plan.scene_count,
            actual: script.scenes.len(),
        })
        .into());
    }

    for (index, scene) in script.scenes.iter().enumerate() {
        let expected = index + 1;
        if scene.scene_number as usize != expected {
            return Err(GeminiError::new(GeminiErrorKind::MalformedResponse(format!(
                "story script: scene {} has sceneNumber {}",
                expected, scene.scene_number
            )))
            .into());
        }
    }

    Ok(script)
}

/// JSON mode should return bare JSON; tolerate a markdown fence anyway.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
