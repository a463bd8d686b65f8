//! Company logo input: an image file read fully into memory and kept as a
//! `data:` URI on the quote.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("cannot read logo '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Logo bytes recovered from a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLogo {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DecodedLogo {
    /// File extension matching the MIME type, for writing the image to disk.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" => "jpg",
            "image/gif" => "gif",
            "image/svg+xml" => "svg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

/// Guesses the MIME type from the file extension. Unknown extensions are
/// passed through as `application/octet-stream`; nothing is validated.
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_uri(
    mime: &str,
    bytes: &[u8],
) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decodes a base64 `data:` URI. Anything else (the placeholder reference,
/// malformed input) yields `None`.
pub fn decode_data_uri(uri: &str) -> Option<DecodedLogo> {
    let rest = uri.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some(DecodedLogo {
        mime: mime.to_string(),
        bytes,
    })
}

/// Reads `path` and returns it as a data URI.
pub async fn load_data_uri(path: &Path) -> Result<String, LogoError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| LogoError::Read {
            path: path.display().to_string(),
            source,
        })?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "logo loaded");
    Ok(encode_data_uri(mime_for_path(path), &bytes))
}
