//! Pure coordinate helpers shared by the crop session and the document model.
//!
//! Three coordinate spaces are involved:
//!
//! - **natural**: pixel space of the decoded source image
//! - **container**: pixel space of the crop viewport the image is displayed in
//! - **crop box**: the crop rectangle, expressed in container space
//!
//! Nothing here allocates or fails on finite input.

/// Crop guide shapes and output sizing.
pub mod shape;
/// Natural/container transforms and crop rectangles.
pub mod viewport;
/// Auto-zoom heuristic.
pub mod zoom;
