//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyloom binary.

mod commands;
mod generate;
mod key;
mod story;

pub use commands::{Cli, Commands};
pub use generate::{audio, image, script, video, voice};
pub use key::handle_key_command;
pub use story::{StoryOptions, story};

use std::path::Path;
use storyloom::{GeminiStoryClient, StoryloomConfig, StoryloomResult};

/// Load configuration from `path`, or from the standard locations.
pub fn load_config(path: Option<&Path>) -> StoryloomResult<StoryloomConfig> {
    match path {
        Some(path) => StoryloomConfig::from_file(path),
        None => StoryloomConfig::load(),
    }
}

/// Client over the REST transport with the configured credential sources.
fn open_client(config: StoryloomConfig) -> StoryloomResult<GeminiStoryClient> {
    GeminiStoryClient::from_config(config)
}
