//! Raster export: document → SVG → pixmap → PNG.

/// SVG rasterizers.
pub mod backend;
/// PNG export entry points.
pub mod png;
/// Document to SVG conversion.
pub mod svg;
