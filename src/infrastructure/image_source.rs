// src/infrastructure/image_source.rs
//
// Image source resolver: turns an uploaded poster file into the two
// shapes the rest of the system consumes - raw bytes + MIME type for the
// identification oracle, and an embedded data URI for display.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::AppResult;

/// A decoded poster image ready for identification or embedding.
#[derive(Debug, Clone)]
pub struct ImageSource {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageSource {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Reads an image file; MIME type is sniffed from the magic bytes,
    /// with the file extension as fallback.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let bytes = fs::read(path)?;
        let mime_type = sniff_mime(&bytes)
            .unwrap_or_else(|| mime_from_extension(path))
            .to_string();
        Ok(Self { bytes, mime_type })
    }

    /// Embeds the image as a `data:<mime>;base64,<payload>` URI.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Convenience for the upload flow: file straight to data URI.
pub fn read_image_as_data_uri(path: &Path) -> AppResult<String> {
    Ok(ImageSource::from_file(path)?.to_data_uri())
}

/// Magic-byte detection for the formats the poster flow accepts.
fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
