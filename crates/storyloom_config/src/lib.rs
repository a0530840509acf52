//! Configuration for the Storyloom story generation library.
//!
//! Settings are layered with the `config` crate:
//! - Bundled defaults (include_str! from storyloom.toml)
//! - User overrides (~/.config/storyloom/storyloom.toml, then ./storyloom.toml)
//!
//! Keys missing from every layer fall back to the same defaults the bundled
//! file carries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{
    CredentialSettings, GeminiSettings, ImageSettings, SpeechSettings, StoryloomConfig,
    VideoSettings,
};
