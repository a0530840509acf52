use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use storyloom_core::Voice;
use storyloom_error::{ConfigError, StoryloomError, StoryloomResult};
use tracing::{debug, instrument};

/// Gemini endpoint and model selection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// REST base URL, without a trailing slash
    pub api_base: String,
    /// Text model used for story scripts
    pub script_model: String,
    /// Image model used for scene stills
    pub image_model: String,
    /// Long-running video model
    pub video_model: String,
    /// Speech synthesis model
    pub speech_model: String,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            script_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-3-pro-image-preview".to_string(),
            video_model: "veo-3.1-fast-generate-preview".to_string(),
            speech_model: "gemini-2.5-flash-preview-tts".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl GeminiSettings {
    /// HTTP timeout applied to each request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Image generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageSettings {
    /// Aspect ratio, e.g. "9:16"
    pub aspect_ratio: String,
    /// Output size class, e.g. "1K"
    pub image_size: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: "9:16".to_string(),
            image_size: "1K".to_string(),
        }
    }
}

/// Video generation and polling parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VideoSettings {
    /// Output resolution, e.g. "720p"
    pub resolution: String,
    /// Aspect ratio, e.g. "9:16"
    pub aspect_ratio: String,
    /// Clips requested per job
    pub number_of_videos: u32,
    /// Delay between operation polls, in milliseconds
    pub poll_interval_ms: u64,
    /// Upper bound on total polling time in seconds; 0 waits forever
    pub max_wait_secs: u64,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            resolution: "720p".to_string(),
            aspect_ratio: "9:16".to_string(),
            number_of_videos: 1,
            poll_interval_ms: 5_000,
            max_wait_secs: 900,
        }
    }
}

impl VideoSettings {
    /// Delay between operation polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Maximum polling time, or `None` when unbounded.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyloom_config::VideoSettings;
    ///
    /// let mut video = VideoSettings::default();
    /// assert_eq!(video.max_wait().map(|d| d.as_secs()), Some(900));
    ///
    /// video.max_wait_secs = 0;
    /// assert!(video.max_wait().is_none());
    /// ```
    pub fn max_wait(&self) -> Option<Duration> {
        (self.max_wait_secs > 0).then(|| Duration::from_secs(self.max_wait_secs))
    }
}

/// Speech synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Voice used when a caller does not choose one
    pub default_voice: Voice,
}

/// Where the API key is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialSettings {
    /// Environment variables checked in order
    pub env_vars: Vec<String>,
    /// Key the credential store holds the API key under
    pub store_key: String,
    /// Credential store file; defaults to the user config directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            env_vars: vec!["API_KEY".to_string(), "GEMINI_API_KEY".to_string()],
            store_key: "gemini_api_key".to_string(),
            store_path: None,
        }
    }
}

/// Top-level Storyloom configuration.
///
/// # Example
///
/// ```no_run
/// use storyloom_config::StoryloomConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryloomConfig::load()?;
/// println!("Script model: {}", config.gemini.script_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StoryloomConfig {
    /// Endpoint and models
    pub gemini: GeminiSettings,
    /// Image parameters
    pub image: ImageSettings,
    /// Video parameters
    pub video: VideoSettings,
    /// Speech parameters
    pub speech: SpeechSettings,
    /// Credential lookup
    pub credentials: CredentialSettings,
}

impl StoryloomConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryloomResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Sources in order (later sources override earlier):
    /// 1. Bundled defaults (storyloom.toml shipped with the library)
    /// 2. ~/.config/storyloom/storyloom.toml
    /// 3. ./storyloom.toml
    ///
    /// User files are optional and skipped if not found.
    #[instrument]
    pub fn load() -> StoryloomResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../storyloom.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyloom/storyloom.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyloom").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryloomError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings no request could succeed with.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending key.
    pub fn validate(&self) -> StoryloomResult<()> {
        if self.gemini.api_base.trim().is_empty() {
            return Err(ConfigError::new("gemini.api_base must not be empty").into());
        }
        if self.video.poll_interval_ms == 0 {
            return Err(ConfigError::new("video.poll_interval_ms must be positive").into());
        }
        if self.video.number_of_videos == 0 {
            return Err(ConfigError::new("video.number_of_videos must be positive").into());
        }
        if self.credentials.store_key.trim().is_empty() {
            return Err(ConfigError::new("credentials.store_key must not be empty").into());
        }
        Ok(())
    }

    /// Credential store file, falling back to `<config_dir>/storyloom/credentials.json`.
    pub fn credential_store_path(&self) -> Option<PathBuf> {
        self.credentials
            .store_path
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join("storyloom").join("credentials.json")))
    }
}
