use std::sync::Arc;

use crate::foundation::core::check_raster_size;
use crate::foundation::error::{CardError, CardResult};

/// Turns an SVG document into straight-alpha RGBA pixels of an exact size.
pub trait RasterBackend {
    /// Rasterize `svg` onto a `width × height` bitmap.
    fn rasterize(&mut self, svg: &str, width: u32, height: u32) -> CardResult<image::RgbaImage>;
}

/// CPU rasterizer built on `usvg` + `resvg`.
#[derive(Clone, Debug)]
pub struct ResvgBackend {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for ResvgBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ResvgBackend {
    /// Backend with the system font set loaded.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "export font database loaded");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Backend with an explicit font set, e.g. for reproducible output.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }
}

impl RasterBackend for ResvgBackend {
    fn rasterize(&mut self, svg: &str, width: u32, height: u32) -> CardResult<image::RgbaImage> {
        check_raster_size(width, height)?;
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| CardError::render(format!("parse svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| CardError::render(format!("cannot allocate {width}x{height} bitmap")))?;

        let sx = (width as f32) / tree.size().width();
        let sy = (height as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        let data: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        image::RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| CardError::render("bitmap size mismatch"))
    }
}
