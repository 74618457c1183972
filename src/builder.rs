use crate::{
    assets::asset::{Asset, AssetRole, SelectedFile},
    assets::blob::Blob,
    assets::pipeline::{AssetPipeline, AssetResolver},
    assets::upload::{AssetUploader, UploadReceipt},
    config::BuilderConfig,
    crop::session::CropSession,
    document::element::ElementId,
    document::model::{CanvasDocument, NewElement},
    export::backend::RasterBackend,
    export::png,
    foundation::error::CardResult,
    geometry::shape::CropShape,
    store::backend::TemplateStore,
    store::record::{BackgroundImageRef, TemplateRecord},
    store::slot::TemplateSlot,
};

/// One card-builder session: the document, its assets and the crop dialog.
///
/// Typical flow:
///
/// - [`select_file`](Self::select_file) opens a crop over a picked image
/// - gestures go through [`crop_session_mut`](Self::crop_session_mut)
/// - [`commit_crop`](Self::commit_crop) routes the result to the background or a test asset
/// - [`add_element`](Self::add_element) places placeholders and test assets
/// - [`save`](Self::save) / [`load`](Self::load) / [`export_png`](Self::export_png)
///
/// Object URLs are released on [`teardown`](Self::teardown) and on drop.
#[derive(Debug)]
pub struct CardBuilder {
    config: BuilderConfig,
    document: CanvasDocument,
    pipeline: AssetPipeline,
}

impl CardBuilder {
    /// Start a session with an empty document.
    pub fn new(config: BuilderConfig) -> CardResult<Self> {
        config.validate()?;
        let document = CanvasDocument::with_defaults(&config.document_defaults());
        let pipeline = AssetPipeline::new(config.crop.clone());
        Ok(Self {
            config,
            document,
            pipeline,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// The document being edited.
    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Mutable document access for element moves, resizes and text edits.
    pub fn document_mut(&mut self) -> &mut CanvasDocument {
        &mut self.document
    }

    /// Session assets and URLs.
    pub fn pipeline(&self) -> &AssetPipeline {
        &self.pipeline
    }

    /// Open a crop for `file`. Headshots use the configured shape; other roles crop freely.
    pub fn select_file(&mut self, role: AssetRole, file: &SelectedFile) -> CardResult<Asset> {
        let shape = match role {
            AssetRole::Headshot => self.config.placement.headshot_shape,
            AssetRole::Background | AssetRole::Logo => CropShape::Rectangle,
        };
        self.pipeline
            .select_file(role, file, shape, self.config.crop.viewport())
    }

    /// The crop dialog.
    pub fn crop_session(&self) -> &CropSession {
        self.pipeline.crop_session()
    }

    /// The crop dialog, for gestures and layout callbacks.
    pub fn crop_session_mut(&mut self) -> &mut CropSession {
        self.pipeline.crop_session_mut()
    }

    /// Commit the pending crop.
    pub fn commit_crop(&mut self) -> CardResult<Asset> {
        self.pipeline.commit_pending(&mut self.document)
    }

    /// Store an already-cropped blob for `role` without going through the dialog.
    pub fn commit_blob(&mut self, role: AssetRole, blob: Blob) -> CardResult<Asset> {
        self.pipeline.commit_crop(role, blob, &mut self.document)
    }

    /// Abandon the pending crop.
    pub fn cancel_crop(&mut self) -> CardResult<bool> {
        self.pipeline.cancel_crop()
    }

    /// Place an element centered on the stage.
    pub fn add_element(&mut self, what: NewElement) -> CardResult<ElementId> {
        let center = self.document.canvas().center();
        self.document.add_element(
            what,
            center,
            self.pipeline.test_assets(),
            &self.config.placement,
        )
    }

    /// Drop the background image; the stage keeps its size.
    pub fn remove_background(&mut self) -> bool {
        self.pipeline.remove_background(&mut self.document)
    }

    /// Upload the current asset for `role`.
    pub fn upload(
        &mut self,
        role: AssetRole,
        uploader: &mut dyn AssetUploader,
    ) -> CardResult<UploadReceipt> {
        self.pipeline.upload(role, uploader)
    }

    /// Current document as a persistable record. Test assets are not included.
    pub fn record(&self) -> TemplateRecord {
        let background = self.document.background_asset().map(|id| {
            let asset = self.pipeline.background().filter(|a| &a.id == id);
            BackgroundImageRef {
                asset_id: id.clone(),
                remote_url: asset.and_then(|a| a.remote_url.clone()),
                data_url: self.pipeline.resolve(id).map(|b| b.to_data_url()),
            }
        });
        TemplateRecord::capture(&self.document, background)
    }

    /// Save under `name`.
    pub fn save(&self, store: &mut dyn TemplateStore, name: &str) -> CardResult<()> {
        let record = self.record();
        let mut slot = TemplateSlot::open(store, name)?;
        slot.save(&record)?;
        slot.close();
        Ok(())
    }

    /// Replace the document with the one saved under `name`.
    ///
    /// Returns `false` and changes nothing when no template was saved. A pending crop is
    /// cancelled first. An embedded background image is re-registered so it previews and
    /// exports; if it no longer decodes the layout still loads.
    pub fn load(&mut self, store: &mut dyn TemplateStore, name: &str) -> CardResult<bool> {
        let slot = TemplateSlot::open(store, name)?;
        let Some(record) = slot.load(&self.config.document_defaults())? else {
            slot.close();
            return Ok(false);
        };
        slot.close();

        self.pipeline.cancel_crop()?;
        self.pipeline.release_background();

        let background = record.background_image.clone();
        self.document = record.into_document();

        if let Some(bg) = background
            .filter(|bg| self.document.background_asset() == Some(&bg.asset_id))
            && let Some(data_url) = &bg.data_url
        {
            let restored = Blob::from_data_url(data_url)
                .and_then(|blob| {
                    self.pipeline
                        .restore_background(bg.asset_id.clone(), blob, bg.remote_url.clone())
                });
            if let Err(e) = restored {
                tracing::warn!(error = %e, "saved background could not be restored");
            }
        }
        Ok(true)
    }

    /// Flatten the document into a PNG.
    pub fn export_png(&self, backend: &mut dyn RasterBackend) -> CardResult<Blob> {
        png::export_png(&self.document, &self.pipeline, backend)
    }

    /// Vector form of the document.
    pub fn export_svg(&self) -> CardResult<String> {
        png::export_svg(&self.document, &self.pipeline)
    }

    /// Release every object URL held by the session. Returns the number released.
    pub fn teardown(&mut self) -> usize {
        self.pipeline.release_all()
    }
}

impl Drop for CardBuilder {
    fn drop(&mut self) {
        self.pipeline.release_all();
    }
}

#[cfg(test)]
#[path = "../tests/unit/builder.rs"]
mod tests;
