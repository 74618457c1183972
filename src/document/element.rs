use crate::assets::asset::{AssetId, AssetRole};
use crate::foundation::core::Rect;

/// Identifier of an element within one document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl ElementId {
    /// Reserved id. Never allocated, and dropped when restoring.
    pub const MAX: Self = Self(u64::MAX);
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "el:{}", self.0)
    }
}

/// Which speaker field a text placeholder stands in for. The text is never bound to data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Speaker name.
    Name,
    /// Speaker title.
    Title,
    /// Speaker company.
    Company,
}

/// Clip applied to an image element when rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageClip {
    /// Full rectangle.
    #[default]
    None,
    /// Ellipse inscribed in the element box.
    Circle,
}

/// Element payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementBody {
    /// Layout guide with literal sample text.
    Text {
        /// Field the placeholder represents.
        kind: TextKind,
        /// Sample text.
        text: String,
    },
    /// Image referencing an asset.
    Image {
        /// Referenced asset.
        asset_ref: AssetId,
        /// Role of the referenced asset.
        role: AssetRole,
        /// Locked elements reject drag/resize; only the background is locked.
        #[serde(default)]
        locked: bool,
        /// Render-time clip.
        #[serde(default)]
        clip: ImageClip,
    },
}

/// A placed element. `w` and `h` are `> 0`; `x`/`y` are unconstrained and may be off-stage.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanvasElement {
    /// Stable id.
    pub id: ElementId,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Width in canvas pixels.
    pub w: f64,
    /// Height in canvas pixels.
    pub h: f64,
    /// Payload.
    #[serde(flatten)]
    pub body: ElementBody,
}

impl CanvasElement {
    /// Bounding box in canvas space.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    /// `true` when the element rejects manipulation. Only the background image is locked.
    pub fn is_locked(&self) -> bool {
        matches!(self.body, ElementBody::Image { locked: true, .. })
    }

    /// Referenced asset for image elements.
    pub fn asset_ref(&self) -> Option<&AssetId> {
        match &self.body {
            ElementBody::Image { asset_ref, .. } => Some(asset_ref),
            ElementBody::Text { .. } => None,
        }
    }

    /// Geometry invariant: finite position, finite positive size.
    pub fn has_valid_geometry(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.w.is_finite()
            && self.h.is_finite()
            && self.w > 0.0
            && self.h > 0.0
    }
}
