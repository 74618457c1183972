use crate::foundation::core::{Point, Rect, Size, Vec2};
use crate::foundation::error::{CardError, CardResult};

/// Mapping between natural image pixels and container pixels.
///
/// `pan` is the container-space position of the image's top-left corner; `zoom` scales natural
/// pixels to container pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    /// Natural-to-container scale factor.
    pub zoom: f64,
    /// Container-space offset of the image origin.
    pub pan: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    /// View with the image centered in `container` at `zoom`.
    pub fn centered(natural: Size, container: Size, zoom: f64) -> Self {
        let pan = Vec2::new(
            (container.width - natural.width * zoom) / 2.0,
            (container.height - natural.height * zoom) / 2.0,
        );
        Self { zoom, pan }
    }

    /// Map a natural-space point into container space.
    pub fn natural_to_container(self, p: Point) -> Point {
        Point::new(p.x * self.zoom, p.y * self.zoom) + self.pan
    }

    /// Map a container-space point into natural space.
    pub fn container_to_natural(self, p: Point) -> Point {
        let q = p - self.pan;
        Point::new(q.x / self.zoom, q.y / self.zoom)
    }

    /// Map a container-space rectangle into natural space.
    pub fn container_rect_to_natural(self, r: Rect) -> Rect {
        Rect::from_points(
            self.container_to_natural(Point::new(r.x0, r.y0)),
            self.container_to_natural(Point::new(r.x1, r.y1)),
        )
    }

    /// Map a natural-space rectangle into container space.
    pub fn natural_rect_to_container(self, r: Rect) -> Rect {
        Rect::from_points(
            self.natural_to_container(Point::new(r.x0, r.y0)),
            self.natural_to_container(Point::new(r.x1, r.y1)),
        )
    }

    /// Change zoom while keeping the natural point under `anchor` fixed on screen.
    pub fn zoomed_about(self, anchor: Point, zoom: f64) -> Self {
        let n = self.container_to_natural(anchor);
        let pan = anchor - Point::new(n.x * zoom, n.y * zoom);
        Self { zoom, pan }
    }
}

/// Integer pixel rectangle in natural image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels (> 0).
    pub width: u32,
    /// Height in pixels (> 0).
    pub height: u32,
}

/// Clamp a natural-space rectangle to the image and snap it outward to whole pixels.
///
/// Returns `None` when nothing of the rectangle overlaps the image.
pub fn clamp_to_pixels(r: Rect, natural: Size) -> Option<PixelRect> {
    let x0 = r.x0.max(0.0).floor();
    let y0 = r.y0.max(0.0).floor();
    let x1 = r.x1.min(natural.width).ceil();
    let y1 = r.y1.min(natural.height).ceil();
    if !(x1 > x0 && y1 > y0) {
        return None;
    }
    Some(PixelRect {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

/// Width:height constraint for the crop rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AspectRatio {
    /// No constraint.
    #[default]
    Free,
    /// Fixed `width / height`.
    Fixed(f64),
}

impl AspectRatio {
    /// 1:1.
    pub const SQUARE: Self = Self::Fixed(1.0);

    /// Interpret a raw ratio. `NaN` means free-form; anything else must be finite and `> 0`.
    pub fn from_f64(ratio: f64) -> CardResult<Self> {
        if ratio.is_nan() {
            return Ok(Self::Free);
        }
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(CardError::validation(
                "aspect ratio must be NaN (free) or finite and > 0",
            ));
        }
        Ok(Self::Fixed(ratio))
    }

    /// Raw ratio, `NaN` when free.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Free => f64::NAN,
            Self::Fixed(r) => r,
        }
    }
}

/// Largest rectangle with `aspect` that fits inside `fraction` of `area`, centered on it.
pub fn centered_crop_rect(area: Rect, aspect: AspectRatio, fraction: f64) -> Rect {
    let max_w = area.width() * fraction;
    let max_h = area.height() * fraction;
    let (w, h) = match aspect {
        AspectRatio::Free => (max_w, max_h),
        AspectRatio::Fixed(r) => {
            if max_w / r <= max_h {
                (max_w, max_w / r)
            } else {
                (max_h * r, max_h)
            }
        }
    };
    Rect::from_center_size(area.center(), Size::new(w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/viewport.rs"]
mod tests;
