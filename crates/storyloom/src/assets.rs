//! Writing generated media to disk.

use serde::Serialize;
use std::io::Cursor;
use std::num::{NonZeroU16, NonZeroU32};
use std::path::{Path, PathBuf};
use storyloom_core::MediaBlob;
use storyloom_error::{JsonError, StorageError, StorageErrorKind, StoryloomResult};

/// Sample rate the speech model uses when the MIME type omits one.
const DEFAULT_PCM_RATE: u32 = 24_000;

/// Decode a base64 `data:` URI into a blob.
///
/// # Examples
///
/// ```
/// use storyloom::decode_data_uri;
///
/// let blob = decode_data_uri("data:image/png;base64,iVBORw0K").unwrap();
/// assert_eq!(blob.mime_type, "image/png");
/// assert_eq!(blob.len(), 6);
/// ```
///
/// # Errors
///
/// Returns [`StorageErrorKind::InvalidDataUri`] if the URI is not a base64
/// `data:` URI or the payload does not decode.
pub fn decode_data_uri(uri: &str) -> StoryloomResult<MediaBlob> {
    let invalid = |detail: &str| StorageError::new(StorageErrorKind::InvalidDataUri(detail.to_string()));

    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| invalid("missing `data:` prefix"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("missing `,` separator"))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| invalid("payload is not base64"))?;
    let mime_type = if mime_type.is_empty() {
        "application/octet-stream"
    } else {
        mime_type
    };

    MediaBlob::from_base64(mime_type, payload).map_err(|e| invalid(&e.to_string()).into())
}

/// File extension for a MIME type, ignoring parameters.
///
/// Raw PCM maps to `wav` since [`to_playable_audio`] wraps it in a WAV
/// container before it is written.
pub fn file_extension(mime_type: &str) -> &'static str {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/l16" => "wav",
        "audio/mpeg" => "mp3",
        "audio/ogg" => "ogg",
        _ => "bin",
    }
}

/// Wrap raw 16-bit PCM narration in a WAV container.
///
/// The speech model answers with `audio/L16;codec=pcm;rate=24000`: mono,
/// little-endian signed samples. Any other MIME type is returned unchanged.
///
/// # Errors
///
/// Returns [`StorageErrorKind::AudioEncoding`] if `rate` or `channels` is zero
/// or not a number, if the PCM payload does not hold whole frames, or if the
/// WAV writer fails.
pub fn to_playable_audio(blob: &MediaBlob) -> StoryloomResult<MediaBlob> {
    let mut params = blob.mime_type.split(';').map(str::trim);
    let essence = params.next().unwrap_or_default();
    if !essence.eq_ignore_ascii_case("audio/l16") {
        return Ok(blob.clone());
    }

    let encoding_error = |e: &dyn std::fmt::Display| {
        StorageError::new(StorageErrorKind::AudioEncoding(e.to_string()))
    };

    let mut sample_rate = DEFAULT_PCM_RATE;
    let mut channels = 1u16;
    for param in params {
        match param.split_once('=') {
            Some(("rate", value)) => {
                sample_rate = value
                    .parse::<NonZeroU32>()
                    .map_err(|e| encoding_error(&format!("invalid PCM rate {:?}: {}", value, e)))?
                    .get();
            }
            Some(("channels", value)) => {
                channels = value
                    .parse::<NonZeroU16>()
                    .map_err(|e| {
                        encoding_error(&format!("invalid PCM channels {:?}: {}", value, e))
                    })?
                    .get();
            }
            _ => {}
        }
    }

    // hound derives the byte rate as rate * channels * 2 in a u32.
    let frame_bytes = usize::from(channels) * 2;
    if sample_rate.checked_mul(u32::from(channels) * 2).is_none() {
        return Err(encoding_error(&format!(
            "PCM rate {} with {} channels is out of range",
            sample_rate, channels
        ))
        .into());
    }

    if blob.data.len() % frame_bytes != 0 {
        return Err(encoding_error(&format!(
            "PCM payload of {} bytes is not a whole number of {}-byte frames",
            blob.data.len(),
            frame_bytes
        ))
        .into());
    }

    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(blob.data.len() + 44));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(|e| encoding_error(&e))?;
        for sample in blob.data.chunks_exact(2) {
            writer
                .write_sample(i16::from_le_bytes([sample[0], sample[1]]))
                .map_err(|e| encoding_error(&e))?;
        }
        writer.finalize().map_err(|e| encoding_error(&e))?;
    }

    tracing::debug!(sample_rate, channels, bytes = blob.data.len(), "Wrapped PCM in WAV");
    Ok(MediaBlob::new("audio/wav", cursor.into_inner()))
}

/// Writes assets into one output directory.
///
/// File names returned by the write methods are relative to the directory,
/// so a manifest written alongside stays valid when the directory moves.
#[derive(Debug, Clone)]
pub struct AssetWriter {
    dir: PathBuf,
}

impl AssetWriter {
    /// Create the output directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(dir))]
    pub async fn create(dir: impl Into<PathBuf>) -> StoryloomResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;

        tracing::debug!(path = %dir.display(), "Output directory ready");
        Ok(Self { dir })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` to `name` inside the directory.
    #[tracing::instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn write(&self, name: &str, bytes: &[u8]) -> StoryloomResult<PathBuf> {
        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(path)
    }

    /// Write a blob as `{stem}.{ext}` and return the file name.
    pub async fn write_blob(&self, stem: &str, blob: &MediaBlob) -> StoryloomResult<String> {
        let name = format!("{}.{}", stem, file_extension(&blob.mime_type));
        self.write(&name, &blob.data).await?;
        Ok(name)
    }

    /// Write `value` as pretty-printed JSON.
    pub async fn write_json<T: Serialize>(&self, name: &str, value: &T) -> StoryloomResult<PathBuf> {
        let json = serde_json::to_vec_pretty(value).map_err(|e| JsonError::context(name, e))?;
        self.write(name, &json).await
    }
}
