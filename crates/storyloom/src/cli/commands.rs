//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storyloom::{MediaType, StoryMode, Voice, VoiceGender, VoiceTone};

/// Storyloom - Gemini-backed short story, illustration and narration generator
#[derive(Parser, Debug)]
#[command(name = "storyloom")]
#[command(about = "Generate narrated, illustrated short stories with Gemini", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load configuration from this file only
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a story script as JSON
    Script {
        /// What the story is about
        #[arg(long)]
        topic: String,

        /// Duration tier (short, medium, long, mega_long)
        #[arg(long, default_value = "short")]
        mode: StoryMode,

        /// Write the JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate a single image
    Image {
        /// Image prompt
        #[arg(long)]
        prompt: String,

        /// Output file
        #[arg(long)]
        out: PathBuf,
    },

    /// Generate a single video clip
    Video {
        /// Video prompt
        #[arg(long)]
        prompt: String,

        /// Output file
        #[arg(long)]
        out: PathBuf,
    },

    /// Synthesize narration
    Audio {
        /// Text to speak
        #[arg(long)]
        text: String,

        /// Prebuilt voice (Kore, Zephyr, Puck, Charon, Fenrir)
        #[arg(long, conflicts_with_all = ["gender", "tone"])]
        voice: Option<Voice>,

        /// Narrator gender, used with --tone to pick a voice
        #[arg(long)]
        gender: Option<VoiceGender>,

        /// Narrator tone, used with --gender to pick a voice
        #[arg(long)]
        tone: Option<VoiceTone>,

        /// Output file (WAV)
        #[arg(long)]
        out: PathBuf,
    },

    /// Print the voice chosen for a narrator gender and tone
    Voice {
        /// Narrator gender
        #[arg(long, default_value = "female")]
        gender: VoiceGender,

        /// Narrator tone
        #[arg(long, default_value = "soft")]
        tone: VoiceTone,
    },

    /// Generate a complete story with cover, scene media and narration
    Story {
        /// What the story is about
        #[arg(long)]
        topic: String,

        /// Duration tier (short, medium, long, mega_long)
        #[arg(long, default_value = "short")]
        mode: StoryMode,

        /// Scene media (image or video)
        #[arg(long, default_value = "image")]
        media: MediaType,

        /// Narrator gender
        #[arg(long, default_value = "female")]
        gender: VoiceGender,

        /// Narrator tone
        #[arg(long, default_value = "soft")]
        tone: VoiceTone,

        /// Directory for the assets and story.json
        #[arg(long)]
        out_dir: PathBuf,
    },

    /// Manage the stored API key
    #[command(subcommand)]
    Key(KeyCommands),
}

/// API key subcommands
#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Store an API key in the local credential file
    Set {
        /// The API key
        value: String,
    },

    /// Remove the stored API key
    Clear,

    /// Show which source supplies the API key
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn story_defaults() {
        let cli = Cli::try_parse_from(["storyloom", "story", "--topic", "rain", "--out-dir", "out"])
            .unwrap();
        match cli.command {
            Commands::Story {
                mode,
                media,
                gender,
                tone,
                ..
            } => {
                assert_eq!(mode, StoryMode::Short);
                assert_eq!(media, MediaType::Image);
                assert_eq!(gender, VoiceGender::Female);
                assert_eq!(tone, VoiceTone::Soft);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn mode_accepts_snake_case() {
        let cli = Cli::try_parse_from(["storyloom", "script", "--topic", "t", "--mode", "mega_long"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Script {
                mode: StoryMode::MegaLong,
                ..
            }
        ));
    }

    #[test]
    fn voice_conflicts_with_gender() {
        let result = Cli::try_parse_from([
            "storyloom", "audio", "--text", "hi", "--voice", "Puck", "--gender", "male", "--out",
            "a.wav",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn key_set_takes_value() {
        let cli = Cli::try_parse_from(["storyloom", "-v", "key", "set", "AIza123"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Key(KeyCommands::Set { ref value }) if value == "AIza123"
        ));
    }
}
