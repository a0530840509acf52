//! Trait definitions for the Storyloom story generation library.
//!
//! [`StoryGenerator`] is the core trait every backend implements; scene
//! media generation is exposed through capability traits layered on top of
//! it. [`CredentialStore`] abstracts where a persisted API key lives.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credential;
mod traits;
mod types;

pub use credential::CredentialStore;
pub use traits::{SceneImages, SceneNarration, SceneVideos, StoryGenerator};
pub use types::GeneratorMetadata;
