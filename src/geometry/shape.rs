use crate::foundation::core::{Point, Rect};
use crate::geometry::viewport::{AspectRatio, PixelRect};

/// Presentation mask drawn over the crop guides.
///
/// The mask never changes the rasterized output, which is always a rectangular JPEG. Circle and
/// square shapes do select a square output size and a 1:1 crop box.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CropShape {
    /// Round guide inscribed in the crop box.
    Circle,
    /// Square guide.
    Square,
    /// Plain rectangle guide.
    #[default]
    Rectangle,
}

impl CropShape {
    /// Whether the crop box is forced to 1:1 and the output is square.
    pub fn is_square(self) -> bool {
        matches!(self, Self::Circle | Self::Square)
    }

    /// Aspect the crop box uses for this shape when the caller passes `requested`.
    pub fn effective_aspect(self, requested: AspectRatio) -> AspectRatio {
        if self.is_square() {
            AspectRatio::SQUARE
        } else {
            requested
        }
    }

    /// Whether container point `p` is inside the visible (unmasked) guide area of `crop`.
    pub fn guide_contains(self, crop: Rect, p: Point) -> bool {
        match self {
            Self::Square | Self::Rectangle => crop.contains(p),
            Self::Circle => {
                let c = crop.center();
                let rx = crop.width() / 2.0;
                let ry = crop.height() / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let dx = (p.x - c.x) / rx;
                let dy = (p.y - c.y) / ry;
                dx * dx + dy * dy <= 1.0
            }
        }
    }
}

/// Output raster size for a crop of `region`.
///
/// Square shapes produce `square_px × square_px`. Other shapes produce `free_width_px` wide with
/// the height following the region's natural proportions (never below 1).
pub fn output_size(
    shape: CropShape,
    region: PixelRect,
    square_px: u32,
    free_width_px: u32,
) -> (u32, u32) {
    if shape.is_square() {
        return (square_px, square_px);
    }
    let h = (f64::from(free_width_px) * f64::from(region.height) / f64::from(region.width))
        .round()
        .max(1.0) as u32;
    (free_width_px, h)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
