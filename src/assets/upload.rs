use std::collections::BTreeMap;

use crate::assets::asset::{AssetId, AssetRole};
use crate::assets::blob::Blob;
use crate::foundation::error::{CardError, CardResult};

/// Metadata sent alongside an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadMetadata {
    /// Client-side id of the asset being uploaded.
    pub asset_id: AssetId,
    /// Slot the asset belongs to.
    pub role: AssetRole,
    /// Suggested file name.
    pub file_name: String,
}

/// Result of a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReceipt {
    /// Durable URL for the uploaded bytes.
    pub remote_url: String,
    /// Server-assigned identifier.
    pub asset_id: String,
}

/// External upload collaborator.
///
/// Failures are surfaced to the caller and never touch already-placed canvas elements.
pub trait AssetUploader {
    /// Upload `blob` and return its durable location.
    fn upload(&mut self, blob: &Blob, meta: &UploadMetadata) -> CardResult<UploadReceipt>;
}

/// In-memory uploader for tests and offline use.
#[derive(Debug, Default)]
pub struct InMemoryUploader {
    next: u64,
    fail_next: Option<String>,
    uploads: BTreeMap<String, (UploadMetadata, Blob)>,
}

impl InMemoryUploader {
    /// Create an empty uploader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next upload fail with `reason`.
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }

    /// Stored uploads keyed by remote URL.
    pub fn uploads(&self) -> &BTreeMap<String, (UploadMetadata, Blob)> {
        &self.uploads
    }
}

impl AssetUploader for InMemoryUploader {
    fn upload(&mut self, blob: &Blob, meta: &UploadMetadata) -> CardResult<UploadReceipt> {
        if let Some(reason) = self.fail_next.take() {
            return Err(CardError::upload(reason));
        }
        self.next += 1;
        let remote_url = format!("memory://uploads/{}/{}", meta.role, self.next);
        self.uploads
            .insert(remote_url.clone(), (meta.clone(), blob.clone()));
        Ok(UploadReceipt {
            remote_url,
            asset_id: format!("srv-{}", self.next),
        })
    }
}
