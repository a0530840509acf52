//! Storyloom CLI binary.
//!
//! This binary provides command-line access to Storyloom's functionality:
//! - Generate story scripts, images, clips and narration one at a time
//! - Produce a complete story with all of its media into a directory
//! - Manage the locally stored API key

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, StoryOptions, handle_key_command, load_config};

    // Parse command-line arguments
    let cli = Cli::parse();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing; RUST_LOG overrides the default level
    let default_level = if cli.verbose { "debug" } else { "info" };
    storyloom::init_telemetry(default_level)?;

    let config = load_config(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Script { topic, mode, out } => {
            cli::script(config, &topic, mode, out.as_deref()).await?;
        }

        Commands::Image { prompt, out } => {
            cli::image(config, &prompt, &out).await?;
        }

        Commands::Video { prompt, out } => {
            cli::video(config, &prompt, &out).await?;
        }

        Commands::Audio {
            text,
            voice,
            gender,
            tone,
            out,
        } => {
            cli::audio(config, &text, voice, gender, tone, &out).await?;
        }

        Commands::Voice { gender, tone } => {
            cli::voice(gender, tone);
        }

        Commands::Story {
            topic,
            mode,
            media,
            gender,
            tone,
            out_dir,
        } => {
            let options = StoryOptions {
                mode,
                media,
                gender,
                tone,
            };
            cli::story(config, &topic, options, &out_dir).await?;
        }

        Commands::Key(key_cmd) => {
            handle_key_command(&config, key_cmd)?;
        }
    }

    Ok(())
}
