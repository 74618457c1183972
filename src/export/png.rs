use crate::{
    assets::blob::Blob,
    assets::decode::encode_png,
    assets::pipeline::AssetResolver,
    document::model::CanvasDocument,
    export::backend::RasterBackend,
    export::svg::document_to_svg,
    foundation::core::check_raster_size,
    foundation::error::{CardError, CardResult},
};

/// MIME type of exported cards.
pub const EXPORT_MIME: &str = "image/png";

/// Vector form of the document, as fed to the rasterizer.
pub fn export_svg(doc: &CanvasDocument, resolver: &dyn AssetResolver) -> CardResult<String> {
    document_to_svg(doc, resolver)
}

/// Flatten `doc` into a PNG of exactly `canvas.width × canvas.height`.
///
/// Any failure aborts the export before bytes are produced. A canvas past the raster limits
/// fails with [`CardError::Render`] before the backend runs.
#[tracing::instrument(skip_all, fields(width = doc.canvas().width, height = doc.canvas().height))]
pub fn export_png(
    doc: &CanvasDocument,
    resolver: &dyn AssetResolver,
    backend: &mut dyn RasterBackend,
) -> CardResult<Blob> {
    let canvas = doc.canvas();
    check_raster_size(canvas.width, canvas.height)?;
    let svg = document_to_svg(doc, resolver)?;
    let img = backend.rasterize(&svg, canvas.width, canvas.height)?;
    if img.width() != canvas.width || img.height() != canvas.height {
        return Err(CardError::render(format!(
            "backend produced {}x{}, expected {}x{}",
            img.width(),
            img.height(),
            canvas.width,
            canvas.height
        )));
    }
    let bytes = encode_png(&img)?;
    tracing::info!(len = bytes.len(), "png exported");
    Ok(Blob::new(EXPORT_MIME, bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
