//! Conversion between image files and the base64 payloads the generation
//! endpoints and the views work with.

use crate::types::{ImageFile, MoodBoardItem};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Mood board entries carry no MIME type; they are rendered as PNG.
const BOARD_MIME: &str = "image/png";

/// Build an `ImageFile` from raw bytes. Anything that does not sniff as
/// `image/*` is ignored.
pub fn encode_image(name: &str, bytes: &[u8]) -> Option<ImageFile> {
    let mime_type = sniff_mime(name, bytes)?;
    if !mime_type.starts_with("image/") {
        tracing::debug!(name, %mime_type, "ignoring non-image upload");
        return None;
    }
    Some(ImageFile {
        base64: STANDARD.encode(bytes),
        mime_type,
        name: name.to_string(),
    })
}

pub async fn read_image_file(path: &Path) -> Result<Option<ImageFile>, CodecError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| CodecError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(encode_image(&name, &bytes))
}

/// Magic bytes first, file extension second.
pub fn sniff_mime(name: &str, bytes: &[u8]) -> Option<String> {
    let magic = if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if is_bmp(bytes) {
        Some("image/bmp")
    } else {
        None
    };

    magic
        .map(str::to_string)
        .or_else(|| mime_guess::from_path(name).first().map(|m| m.essence_str().to_string()))
}

/// `BM` alone is too weak: also require a known DIB header size at offset 14.
fn is_bmp(bytes: &[u8]) -> bool {
    if bytes.len() < 18 || !bytes.starts_with(b"BM") {
        return false;
    }
    let dib_size = u32::from_le_bytes([bytes[14], bytes[15], bytes[16], bytes[17]]);
    matches!(dib_size, 12 | 40 | 52 | 56 | 64 | 108 | 124)
}

impl ImageFile {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }

    pub fn decode_payload(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.base64)
    }
}

impl MoodBoardItem {
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", BOARD_MIME, self.image_base64)
    }
}
