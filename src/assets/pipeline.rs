use std::collections::HashMap;

use crate::{
    assets::asset::{Asset, AssetId, AssetRole, SelectedFile, TestAssets},
    assets::blob::{Blob, is_image_mime},
    assets::decode,
    assets::upload::{AssetUploader, UploadMetadata, UploadReceipt},
    assets::url::{ObjectUrl, ObjectUrlRegistry},
    crop::session::{CropConfig, CropSession},
    document::model::CanvasDocument,
    foundation::core::Size,
    foundation::error::{CardError, CardResult},
    geometry::shape::CropShape,
    geometry::viewport::AspectRatio,
};

/// Looks up the bytes behind an asset id at export time.
pub trait AssetResolver {
    /// Blob for `id`, or `None` when the asset is unknown or already released.
    fn resolve(&self, id: &AssetId) -> Option<Blob>;
}

impl AssetResolver for HashMap<AssetId, Blob> {
    fn resolve(&self, id: &AssetId) -> Option<Blob> {
        self.get(id).cloned()
    }
}

#[derive(Debug)]
struct PendingCrop {
    role: AssetRole,
    source: Asset,
    cropped: Option<Blob>,
}

/// Owns every object URL of a builder session and sequences select → crop → commit.
///
/// Only one crop may be pending at a time; a second `select_file` is rejected until the first is
/// committed or cancelled. Superseded assets have their URL revoked immediately.
#[derive(Debug)]
pub struct AssetPipeline {
    urls: ObjectUrlRegistry,
    session: CropSession,
    pending: Option<PendingCrop>,
    background: Option<Asset>,
    test_assets: TestAssets,
}

impl AssetPipeline {
    /// Empty pipeline whose crop sessions use `crop`.
    pub fn new(crop: CropConfig) -> Self {
        Self {
            urls: ObjectUrlRegistry::new(),
            session: CropSession::new(crop),
            pending: None,
            background: None,
            test_assets: TestAssets::default(),
        }
    }

    /// Accept a picked file for `role` and open a crop session over it.
    ///
    /// Non-image files fail with [`CardError::Validation`] before anything is created. If the
    /// bytes do not decode, the preview URL is revoked and the session closed again.
    pub fn select_file(
        &mut self,
        role: AssetRole,
        file: &SelectedFile,
        shape: CropShape,
        viewport: Size,
    ) -> CardResult<Asset> {
        if !is_image_mime(&file.mime) {
            return Err(CardError::validation(format!(
                "'{}' is not an image ({})",
                file.name, file.mime
            )));
        }
        if let Some(p) = &self.pending {
            return Err(CardError::session_state(format!(
                "a {} crop is already pending",
                p.role
            )));
        }

        let url = self
            .urls
            .create(Blob::new(file.mime.clone(), file.bytes.clone()));
        match self.open_crop(&url, &file.bytes, shape, viewport) {
            Ok((width, height)) => {
                let source = Asset {
                    id: AssetId::generate(),
                    role,
                    local_preview_url: url,
                    remote_url: None,
                    server_id: None,
                    width,
                    height,
                };
                tracing::debug!(%role, file = %file.name, width, height, "file selected");
                self.pending = Some(PendingCrop {
                    role,
                    source: source.clone(),
                    cropped: None,
                });
                Ok(source)
            }
            Err(e) => {
                if let Err(cancel) = self.session.cancel() {
                    tracing::warn!(error = %cancel, "crop session not closed after rejected file");
                }
                self.urls.revoke(&url);
                tracing::warn!(%role, file = %file.name, error = %e, "selected file rejected");
                Err(e)
            }
        }
    }

    fn open_crop(
        &mut self,
        url: &ObjectUrl,
        bytes: &[u8],
        shape: CropShape,
        viewport: Size,
    ) -> CardResult<(u32, u32)> {
        self.session.open(url.as_str(), AspectRatio::Free, shape)?;
        let image = decode::decode_image(bytes)?;
        let dims = (image.width(), image.height());
        self.session.finish_loading(image, viewport)?;
        Ok(dims)
    }

    /// Role of the pending crop, if any.
    pub fn pending_role(&self) -> Option<AssetRole> {
        self.pending.as_ref().map(|p| p.role)
    }

    /// The crop session backing the pending crop.
    pub fn crop_session(&self) -> &CropSession {
        &self.session
    }

    /// Mutable access for pan/zoom/resize gestures.
    pub fn crop_session_mut(&mut self) -> &mut CropSession {
        &mut self.session
    }

    /// Commit the pending crop and route the result by role.
    ///
    /// If rasterization fails the crop stays pending and the session stays open for a retry.
    /// If routing fails the cropped blob is kept on the pending crop, so a retry skips
    /// rasterization and `cancel_crop` still discards it.
    pub fn commit_pending(&mut self, doc: &mut CanvasDocument) -> CardResult<Asset> {
        let pending = self
            .pending
            .as_mut()
            .ok_or_else(|| CardError::session_state("no crop is pending"))?;
        let role = pending.role;
        let blob = match &pending.cropped {
            Some(blob) => blob.clone(),
            None => {
                let blob = self.session.commit()?;
                pending.cropped = Some(blob.clone());
                blob
            }
        };

        let asset = self.commit_crop(role, blob, doc).inspect_err(|e| {
            tracing::warn!(%role, error = %e, "cropped asset not routed; crop stays pending");
        })?;
        if let Some(p) = self.pending.take() {
            self.urls.revoke(&p.source.local_preview_url);
        }
        Ok(asset)
    }

    /// Abandon the pending crop. The document and committed assets are left untouched.
    pub fn cancel_crop(&mut self) -> CardResult<bool> {
        self.session.cancel()?;
        match self.pending.take() {
            Some(p) => {
                self.urls.revoke(&p.source.local_preview_url);
                tracing::debug!(role = %p.role, "crop cancelled");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Store a cropped blob for `role`.
    ///
    /// A background resizes the canvas to the blob's pixel size and replaces the locked
    /// background element. Headshots and logos become test assets and leave `doc` alone.
    pub fn commit_crop(
        &mut self,
        role: AssetRole,
        blob: Blob,
        doc: &mut CanvasDocument,
    ) -> CardResult<Asset> {
        let (width, height) = decode::probe_dimensions(blob.bytes())?;
        let id = AssetId::generate();

        if role == AssetRole::Background {
            doc.set_background(id.clone(), width, height)?;
        }

        let asset = Asset {
            id,
            role,
            local_preview_url: self.urls.create(blob),
            remote_url: None,
            server_id: None,
            width,
            height,
        };
        self.install(asset.clone());
        tracing::info!(%role, id = %asset.id, width, height, "asset committed");
        Ok(asset)
    }

    /// Re-register a background read back from a saved template.
    ///
    /// The document is expected to already reference `id`; only the session-side asset changes.
    pub fn restore_background(
        &mut self,
        id: AssetId,
        blob: Blob,
        remote_url: Option<String>,
    ) -> CardResult<Asset> {
        let (width, height) = decode::probe_dimensions(blob.bytes())?;
        let asset = Asset {
            id,
            role: AssetRole::Background,
            local_preview_url: self.urls.create(blob),
            remote_url,
            server_id: None,
            width,
            height,
        };
        self.install(asset.clone());
        Ok(asset)
    }

    fn install(&mut self, asset: Asset) {
        let slot = match self.test_assets.slot_mut(asset.role) {
            Some(slot) => slot,
            None => &mut self.background,
        };
        if let Some(old) = slot.replace(asset) {
            self.urls.revoke(&old.local_preview_url);
        }
    }

    /// Remove the background from `doc` and release its URL. The canvas keeps its size.
    pub fn remove_background(&mut self, doc: &mut CanvasDocument) -> bool {
        let removed = doc.remove_background();
        self.release_background() || removed
    }

    /// Release the session-side background asset without touching any document.
    pub fn release_background(&mut self) -> bool {
        match self.background.take() {
            Some(old) => {
                self.urls.revoke(&old.local_preview_url);
                true
            }
            None => false,
        }
    }

    /// Upload the current asset for `role` and record its durable location.
    ///
    /// On failure the asset stays local-only and placed elements are untouched.
    #[tracing::instrument(skip(self, uploader))]
    pub fn upload(
        &mut self,
        role: AssetRole,
        uploader: &mut dyn AssetUploader,
    ) -> CardResult<UploadReceipt> {
        let asset = match role {
            AssetRole::Background => self.background.as_ref(),
            _ => self.test_assets.get(role),
        }
        .ok_or_else(|| CardError::missing_asset(format!("no {role} asset to upload")))?;

        let blob = self
            .urls
            .resolve(&asset.local_preview_url)
            .ok_or_else(|| CardError::missing_asset(format!("{role} preview was released")))?;
        let ext = decode::sniff_mime(blob.bytes())
            .and_then(|m| m.strip_prefix("image/"))
            .unwrap_or("bin");
        let meta = UploadMetadata {
            asset_id: asset.id.clone(),
            role,
            file_name: format!("{role}-{}.{ext}", asset.id),
        };

        let receipt = uploader.upload(blob, &meta).inspect_err(|e| {
            tracing::warn!(error = %e, "upload failed; asset stays local");
        })?;

        let slot = match self.test_assets.slot_mut(role) {
            Some(slot) => slot,
            None => &mut self.background,
        };
        if let Some(asset) = slot.as_mut() {
            asset.remote_url = Some(receipt.remote_url.clone());
            asset.server_id = Some(receipt.asset_id.clone());
        }
        tracing::info!(remote = %receipt.remote_url, "asset uploaded");
        Ok(receipt)
    }

    /// Committed background asset.
    pub fn background(&self) -> Option<&Asset> {
        self.background.as_ref()
    }

    /// Headshot/logo assets available for placement.
    pub fn test_assets(&self) -> &TestAssets {
        &self.test_assets
    }

    /// Blob behind a live URL.
    pub fn resolve_url(&self, url: &ObjectUrl) -> Option<&Blob> {
        self.urls.resolve(url)
    }

    /// Number of URLs not yet revoked.
    pub fn live_urls(&self) -> usize {
        self.urls.live_count()
    }

    /// Close any crop, forget every asset and revoke every URL. Returns the number revoked.
    pub fn release_all(&mut self) -> usize {
        if let Err(e) = self.session.cancel() {
            tracing::warn!(error = %e, "crop session not closed on release");
        }
        self.pending = None;
        self.background = None;
        self.test_assets = TestAssets::default();
        let n = self.urls.revoke_all();
        if n > 0 {
            tracing::debug!(released = n, "object urls released");
        }
        n
    }
}

impl AssetResolver for AssetPipeline {
    fn resolve(&self, id: &AssetId) -> Option<Blob> {
        [
            self.background.as_ref(),
            self.test_assets.headshot.as_ref(),
            self.test_assets.logo.as_ref(),
        ]
        .into_iter()
        .flatten()
        .find(|a| &a.id == id)
        .and_then(|a| self.urls.resolve(&a.local_preview_url))
        .cloned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/pipeline.rs"]
mod tests;
