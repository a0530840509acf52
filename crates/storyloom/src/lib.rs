//! Storyloom - Gemini-backed story generation
//!
//! Storyloom turns a topic into a narrated, illustrated short story: a
//! structured Thai script with English subtitles, a cover image, one image or
//! video clip per scene, and synthesized narration.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use storyloom::{GeminiStoryClient, StoryGenerator, StoryMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiStoryClient::new()?;
//!     let story = client
//!         .generate_story_script("a lost kitten finds its way home", StoryMode::Short)
//!         .await?;
//!     println!("{}", story.script.title);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `storyloom_core` - Story, scene, media and voice types
//! - `storyloom_error` - Error types
//! - `storyloom_config` - Layered TOML configuration
//! - `storyloom_interface` - Generator and credential store traits
//! - `storyloom_models` - Gemini client, transport and credential resolution
//!
//! This crate re-exports everything for convenience and adds the
//! [`StoryPipeline`] plus helpers for writing generated assets to disk.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod pipeline;

pub use assets::{AssetWriter, decode_data_uri, file_extension, to_playable_audio};
pub use pipeline::{MANIFEST_FILE, StoryPipeline};

pub use storyloom_config::*;
pub use storyloom_core::*;
pub use storyloom_error::*;
pub use storyloom_interface::*;
pub use storyloom_models::*;
