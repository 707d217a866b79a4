use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{CoordinateInput, ImagePayload, SubmissionMetadata};
use crate::error::{AdvisorError, ValidationError};

/// A selected file that has not been read yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImage {
    name: String,
    path: PathBuf,
}

impl PendingImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<ImagePayload, AdvisorError> {
        let bytes = tokio::fs::read(&self.path).await?;
        debug!("Read {} bytes from {}", bytes.len(), self.name);
        Ok(ImagePayload::from_file(self.name.clone(), bytes))
    }
}

/// A validated multi-image submission.
#[derive(Debug, Clone)]
pub struct UploadBatch {
    pub images: Vec<PendingImage>,
    pub metadata: SubmissionMetadata,
}

/// The upload form: selected files plus the shared location/time fields.
#[derive(Debug, Clone, Default)]
pub struct UploadCollector {
    images: Vec<PendingImage>,
}

impl UploadCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.images = paths.into_iter().map(PendingImage::new).collect();
        self
    }

    pub fn selected(&self) -> &[PendingImage] {
        &self.images
    }

    /// Files are checked before coordinates, then the time field.
    pub fn collect(
        self,
        fields: &CoordinateInput,
        time: &str,
    ) -> Result<UploadBatch, ValidationError> {
        if self.images.is_empty() {
            return Err(ValidationError::NoFilesSelected);
        }
        let metadata = SubmissionMetadata::from_form(fields, time)?;
        Ok(UploadBatch {
            images: self.images,
            metadata,
        })
    }
}
