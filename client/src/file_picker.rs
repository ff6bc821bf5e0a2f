use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// A file chosen in the picker, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// Declared media type, `None` when nothing could be determined.
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// What the UI shows about the selection; the bytes stay with the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub media_type: Option<String>,
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.media_type {
            Some(media_type) => write!(f, "{} ({})", self.name, media_type),
            None => write!(f, "{} (unknown type)", self.name),
        }
    }
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.map(str::to_string),
            bytes,
        }
    }

    /// Reads a file from disk. The media type is sniffed from the content,
    /// not from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .with_context(|| format!("{} does not name a file", path.display()))?;

        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;

        log::debug!("Selected {} ({} bytes)", name, bytes.len());

        Ok(Self {
            media_type: sniff_media_type(&bytes).map(str::to_string),
            name,
            bytes,
        })
    }

    /// True when the declared type is `application/pdf` or the name ends
    /// in `.pdf`, ignoring case.
    pub fn is_pdf(&self) -> bool {
        self.media_type.as_deref() == Some(PDF_MEDIA_TYPE)
            || self.name.to_lowercase().ends_with(".pdf")
    }

    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.clone(),
            media_type: self.media_type.clone(),
        }
    }
}

pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(PDF_MAGIC) {
        Some(PDF_MEDIA_TYPE)
    } else {
        None
    }
}
