use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::ImageFormat;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Binary image content plus the name it is uploaded under.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    file_name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Guesses the MIME type from the file extension.
    pub fn from_file(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name);
        Self::new(file_name, mime, bytes)
    }

    pub fn jpeg(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(file_name, ImageFormat::Jpeg.to_mime_type(), bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

pub fn mime_for(file_name: &str) -> String {
    ImageFormat::from_path(Path::new(file_name))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_MIME.to_string())
}
