//! cardkit is the state and asset core of a promotional card builder.
//!
//! A session lets an organizer:
//!
//! - pick an image and crop it to a fixed-size JPEG ([`CropSession`])
//! - use the result as the card background (resizing the stage) or as a headshot/logo test asset
//! - place text placeholders and test assets on a [`CanvasDocument`]
//! - save and reload the layout through a [`TemplateStore`]
//! - flatten the card into a PNG ([`export_png`])
//!
//! [`CardBuilder`] wires these together.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod assets;
/// Session façade.
pub mod builder;
/// JSON builder configuration.
pub mod config;
pub mod crop;
pub mod document;
pub mod export;
mod foundation;
pub mod geometry;
pub mod store;

pub use crate::foundation::core::{
    Canvas, MAX_RASTER_EDGE, MAX_RASTER_PIXELS, Point, Rect, RgbColor, Size, Vec2,
};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::assets::asset::{Asset, AssetId, AssetRole, SelectedFile, TestAssets};
pub use crate::assets::blob::Blob;
pub use crate::assets::pipeline::{AssetPipeline, AssetResolver};
pub use crate::assets::upload::{AssetUploader, InMemoryUploader, UploadMetadata, UploadReceipt};
pub use crate::assets::url::{ObjectUrl, ObjectUrlRegistry};
pub use crate::builder::CardBuilder;
pub use crate::config::BuilderConfig;
pub use crate::crop::session::{CropConfig, CropHandle, CropSession, CropState};
pub use crate::document::element::{CanvasElement, ElementBody, ElementId, ImageClip, TextKind};
pub use crate::document::model::{CanvasDocument, NewElement};
pub use crate::document::placement::{BoxSize, PlacementConfig};
pub use crate::document::snapshot::{DocumentDefaults, DocumentSnapshot};
pub use crate::export::backend::{RasterBackend, ResvgBackend};
pub use crate::export::png::{export_png, export_svg};
pub use crate::geometry::shape::CropShape;
pub use crate::geometry::viewport::{AspectRatio, PixelRect, ViewTransform};
pub use crate::store::backend::{InMemoryTemplateStore, TemplateStore};
pub use crate::store::file::FileTemplateStore;
pub use crate::store::record::{BackgroundImageRef, TemplateRecord};
pub use crate::store::slot::TemplateSlot;
