//! Media helpers — MIME guessing and `data:` URLs for multimodal requests.
//!
//! Vision requests embed images as `data:<mime>;base64,<payload>` URLs;
//! this module builds and parses them on top of [`crate::base64`].

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::base64::{decode_base64, encode_base64, Base64Error};

/// Fallback MIME type for unrecognised image files.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a base64 data URL")]
    NotADataUrl,

    #[error("invalid data URL payload: {0}")]
    Payload(#[from] Base64Error),
}

/// Lower-cased file extension, if any.
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// Guess a MIME type from the file extension, falling back to `fallback`.
pub fn guess_mime<'a>(path: &Path, fallback: &'a str) -> &'a str {
    match extension(path).as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg" | "oga" | "opus") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("flac") => "audio/flac",
        Some("webm") => "audio/webm",
        _ => fallback,
    }
}

/// Whether the path looks like an audio file.
pub fn is_audio_path(path: &Path) -> bool {
    matches!(
        extension(path).as_deref(),
        Some("ogg" | "oga" | "opus" | "mp3" | "m4a" | "wav" | "flac" | "aac" | "wma" | "webm")
    )
}

/// Build `data:{mime};base64,{payload}`.
pub fn to_data_url(mime: &str, data: &[u8]) -> String {
    format!("{DATA_URL_PREFIX}{mime}{BASE64_MARKER}{}", encode_base64(data))
}

/// A decoded `data:` URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub data: Vec<u8>,
}

/// Parse a `data:<mime>;base64,<payload>` URL and decode its payload.
///
/// Only the Base64 form is accepted; percent-encoded data URLs are rejected
/// with [`MediaError::NotADataUrl`].
pub fn parse_data_url(url: &str) -> Result<DataUrl, MediaError> {
    let rest = url
        .trim()
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or(MediaError::NotADataUrl)?;
    let (mime, payload) = rest.split_once(BASE64_MARKER).ok_or(MediaError::NotADataUrl)?;
    let data = decode_base64(payload)?;
    Ok(DataUrl {
        mime: mime.to_string(),
        data,
    })
}

/// A file read from disk and Base64-encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFile {
    pub mime: String,
    /// Size of the raw file in bytes.
    pub size: usize,
    pub payload: String,
}

impl EncodedFile {
    pub fn data_url(&self) -> String {
        format!("{DATA_URL_PREFIX}{}{BASE64_MARKER}{}", self.mime, self.payload)
    }
}

/// Read `path` and encode it, guessing the MIME type from its extension.
pub fn encode_file(path: &Path, fallback_mime: &str) -> Result<EncodedFile, MediaError> {
    let data = std::fs::read(path).map_err(|source| MediaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mime = guess_mime(path, fallback_mime).to_string();
    let payload = encode_base64(&data);
    debug!(
        path = %path.display(),
        mime = %mime,
        size = data.len(),
        encoded = payload.len(),
        "encoded file"
    );
    Ok(EncodedFile {
        mime,
        size: data.len(),
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime() {
        let fb = DEFAULT_IMAGE_MIME;
        assert_eq!(guess_mime(Path::new("photo.png"), fb), "image/png");
        assert_eq!(guess_mime(Path::new("photo.PNG"), fb), "image/png");
        assert_eq!(guess_mime(Path::new("photo.jpg"), fb), "image/jpeg");
        assert_eq!(guess_mime(Path::new("photo.gif"), fb), "image/gif");
        assert_eq!(guess_mime(Path::new("photo.webp"), fb), "image/webp");
        assert_eq!(guess_mime(Path::new("clip.mp3"), fb), "audio/mpeg");
        assert_eq!(guess_mime(Path::new("photo.unknown"), fb), "image/jpeg");
        assert_eq!(
            guess_mime(Path::new("noext"), "application/octet-stream"),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_is_audio_path() {
        assert!(is_audio_path(Path::new("voice.OGG")));
        assert!(is_audio_path(Path::new("/tmp/a.m4a")));
        assert!(!is_audio_path(Path::new("image.png")));
        assert!(!is_audio_path(Path::new("mp3")));
    }

    #[test]
    fn test_data_url_round_trip() {
        let url = to_data_url("image/png", b"Man");
        assert_eq!(url, "data:image/png;base64,TWFu");

        let parsed = parse_data_url(&url).unwrap();
        assert_eq!(parsed.mime, "image/png");
        assert_eq!(parsed.data, b"Man");
    }

    #[test]
    fn test_parse_rejects_non_data_url() {
        assert!(matches!(
            parse_data_url("https://example.com/cat.png"),
            Err(MediaError::NotADataUrl)
        ));
        assert!(matches!(
            parse_data_url("data:text/plain,hello"),
            Err(MediaError::NotADataUrl)
        ));
    }

    #[test]
    fn test_parse_bad_payload() {
        let err = parse_data_url("data:image/png;base64,TWF").unwrap_err();
        assert!(matches!(err, MediaError::Payload(Base64Error::InvalidLength(3))));
    }

    #[test]
    fn test_encode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let encoded = encode_file(&path, DEFAULT_IMAGE_MIME).unwrap();
        assert_eq!(encoded.mime, "image/gif");
        assert_eq!(encoded.size, 6);
        assert_eq!(encoded.payload, "R0lGODlh");
        assert_eq!(encoded.data_url(), "data:image/gif;base64,R0lGODlh");
    }

    #[test]
    fn test_encode_missing_file() {
        let err = encode_file(Path::new("/nonexistent/test_image.jpg"), DEFAULT_IMAGE_MIME)
            .unwrap_err();
        assert!(matches!(err, MediaError::Io { .. }));
    }
}
