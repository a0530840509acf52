//! Core data types for the Storyloom story generation library.
//!
//! This crate defines the JSON contract shared between the generators and any
//! rendering or playback caller: stories, scenes, effect tags, generated media,
//! and the voice selection policy.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod effects;
mod media;
mod mode;
mod story;
mod telemetry;
mod voice;

pub use effects::{SoundEffect, VisualEffect};
pub use media::{GeneratedSceneMedia, HistoryItem, MediaBlob};
pub use mode::{StoryFormat, StoryMode};
pub use story::{
    MediaType, StoryConfig, StoryConfigBuilder, StoryData, StoryScene, StorySceneBuilder,
    StoryScript, SubtitleLang,
};
pub use telemetry::init_telemetry;
pub use voice::{Voice, VoiceGender, VoiceTone};
