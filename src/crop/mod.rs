//! Interactive crop sessions that turn a source image into a fixed-size JPEG.

/// Crop rasterization to JPEG.
pub mod raster;
/// Crop dialog state machine.
pub mod session;
