//! Test utilities for the story pipeline.

#![allow(dead_code)]

pub mod mock_generator;

#[allow(unused_imports)]
pub use mock_generator::{GeneratorCall, MockStoryGenerator};

use storyloom::{StoryData, StoryMode, StoryScene, StorySceneBuilder, StoryScript};

pub const CHARACTER: &str = "a small grey rabbit with a blue scarf";

/// A script with exactly `mode.scene_count()` scenes.
pub fn script_for(mode: StoryMode) -> StoryScript {
    let scenes: Vec<StoryScene> = (1..=mode.scene_count() as u32)
        .map(|n| {
            StorySceneBuilder::default()
                .scene_number(n)
                .story_text(format!("ฉากที่ {}", n))
                .english_translation(Some(format!("Scene {}", n)))
                .image_prompt(format!("Photorealistic, {}, scene {}", CHARACTER, n))
                .build()
                .expect("scene builds")
        })
        .collect();

    StoryScript {
        title: "กระต่ายน้อยผจญภัย".to_string(),
        cover_title: Some("ผ้าพันคอสีฟ้า".to_string()),
        cover_image_prompt: Some("Thumbnail collage of a rabbit".to_string()),
        seo_summary: "A rabbit goes on an adventure".to_string(),
        tags: vec!["#story".to_string()],
        character_description: CHARACTER.to_string(),
        mood: "Adventure".to_string(),
        scenes,
    }
}

/// A stamped story for `mode`.
pub fn story_for(mode: StoryMode) -> StoryData {
    StoryData::stamp(script_for(mode), mode, "story-1", 1_700_000_000_000)
}
