use image::DynamicImage;

use crate::{
    assets::blob::Blob,
    crop::raster,
    foundation::core::{Point, Rect, Size, Vec2},
    foundation::error::{CardError, CardResult},
    geometry::shape::{CropShape, output_size},
    geometry::viewport::{
        AspectRatio, PixelRect, ViewTransform, centered_crop_rect, clamp_to_pixels,
    },
    geometry::zoom,
};

/// Tunables for crop sessions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Viewport width assumed until layout reports a measurement.
    pub viewport_width: f64,
    /// Viewport height assumed until layout reports a measurement.
    pub viewport_height: f64,
    /// Edge length of square (circle/square shape) outputs.
    pub square_output_px: u32,
    /// Width of rectangle outputs; height follows the crop proportions.
    pub free_output_width_px: u32,
    /// Lower zoom bound for user zooming.
    pub min_zoom: f64,
    /// Upper zoom bound for user zooming.
    pub max_zoom: f64,
    /// Smallest crop box edge in container pixels.
    pub min_crop_px: f64,
    /// Share of the visible image area the initial crop box covers.
    pub initial_crop_fraction: f64,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            viewport_width: 600.0,
            viewport_height: 400.0,
            square_output_px: 400,
            free_output_width_px: 1200,
            min_zoom: 0.1,
            max_zoom: 10.0,
            min_crop_px: 16.0,
            initial_crop_fraction: 0.8,
        }
    }
}

impl CropConfig {
    /// Default viewport as a size.
    pub fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    /// Check ranges. `min_zoom` must admit the fixed auto-zoom target.
    pub fn validate(&self) -> CardResult<()> {
        if !valid_size(self.viewport()) {
            return Err(CardError::validation(
                "crop viewport must be finite and > 0",
            ));
        }
        if self.square_output_px == 0 || self.free_output_width_px == 0 {
            return Err(CardError::validation("crop output sizes must be > 0"));
        }
        if !(self.min_zoom > 0.0
            && self.min_zoom <= zoom::AUTO_ZOOM_TARGET
            && self.max_zoom.is_finite()
            && self.max_zoom >= 1.0)
        {
            return Err(CardError::validation(format!(
                "crop zoom bounds must satisfy 0 < min_zoom <= {} and finite max_zoom >= 1",
                zoom::AUTO_ZOOM_TARGET
            )));
        }
        if !(self.min_crop_px.is_finite() && self.min_crop_px > 0.0) {
            return Err(CardError::validation("min_crop_px must be finite and > 0"));
        }
        if !(self.initial_crop_fraction > 0.0 && self.initial_crop_fraction <= 1.0) {
            return Err(CardError::validation(
                "initial_crop_fraction must be in (0, 1]",
            ));
        }
        Ok(())
    }
}

/// Lifecycle of a crop dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropState {
    /// No dialog.
    Closed,
    /// Source opened, waiting for the decoded image.
    Loading,
    /// Image shown, waiting for input.
    Ready,
    /// A pan/zoom/resize gesture is in progress.
    Adjusting,
    /// Rasterizing the selection.
    Committing,
}

/// Corner of the crop box being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropHandle {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// One crop invocation: source image, view state, crop box, and the commit step.
///
/// `Closed → Loading → Ready ⇄ Adjusting → Committing → Closed`. A failed commit returns to
/// `Ready` so the caller can retry; cancel closes without producing output.
pub struct CropSession {
    config: CropConfig,
    state: CropState,
    source_url: Option<String>,
    aspect: AspectRatio,
    shape: CropShape,
    image: Option<DynamicImage>,
    natural: Size,
    container: Size,
    view: ViewTransform,
    crop: Rect,
    auto_zoom_checked: bool,
}

impl std::fmt::Debug for CropSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CropSession")
            .field("state", &self.state)
            .field("source_url", &self.source_url)
            .field("aspect", &self.aspect)
            .field("shape", &self.shape)
            .field("natural", &self.natural)
            .field("container", &self.container)
            .field("view", &self.view)
            .field("crop", &self.crop)
            .finish()
    }
}

impl CropSession {
    /// Closed session using `config`.
    pub fn new(config: CropConfig) -> Self {
        Self {
            config,
            state: CropState::Closed,
            source_url: None,
            aspect: AspectRatio::Free,
            shape: CropShape::Rectangle,
            image: None,
            natural: Size::ZERO,
            container: Size::ZERO,
            view: ViewTransform::default(),
            crop: Rect::ZERO,
            auto_zoom_checked: false,
        }
    }

    /// Open the dialog against `source_url`. Circle and square shapes force a 1:1 crop box.
    pub fn open(
        &mut self,
        source_url: impl Into<String>,
        aspect: AspectRatio,
        shape: CropShape,
    ) -> CardResult<()> {
        if self.state != CropState::Closed {
            return Err(CardError::session_state(format!(
                "cannot open a crop session in state {:?}",
                self.state
            )));
        }
        let source_url = source_url.into();
        tracing::debug!(source = %source_url, ?shape, "crop session loading");
        self.reset();
        self.source_url = Some(source_url);
        self.aspect = shape.effective_aspect(aspect);
        self.shape = shape;
        self.state = CropState::Loading;
        Ok(())
    }

    /// Hand the decoded source to the session and show it centered at zoom 1.
    ///
    /// The auto-zoom check is deferred to [`CropSession::layout_settled`].
    pub fn finish_loading(&mut self, image: DynamicImage, container: Size) -> CardResult<()> {
        if self.state != CropState::Loading {
            return Err(CardError::session_state(format!(
                "image delivered in state {:?}",
                self.state
            )));
        }
        if image.width() == 0 || image.height() == 0 {
            return Err(CardError::decode("source image has no pixels"));
        }
        if !valid_size(container) {
            return Err(CardError::validation(
                "crop viewport must be finite and > 0",
            ));
        }

        self.natural = Size::new(f64::from(image.width()), f64::from(image.height()));
        self.container = container;
        self.view = ViewTransform::centered(self.natural, self.container, 1.0);
        self.image = Some(image);
        self.crop = self.initial_crop();
        self.auto_zoom_checked = false;
        self.state = CropState::Ready;
        tracing::debug!(natural = ?self.natural, container = ?self.container, "crop session ready");
        Ok(())
    }

    /// Report the viewport size measured after layout and run the auto-zoom check.
    ///
    /// The check runs once per loaded image; later calls return `Ok(None)`. Returns the zoom
    /// that was applied, if any.
    pub fn layout_settled(&mut self, measured: Size) -> CardResult<Option<f64>> {
        if !matches!(self.state, CropState::Ready | CropState::Adjusting) {
            return Err(CardError::session_state(format!(
                "layout settled in state {:?}",
                self.state
            )));
        }
        if self.auto_zoom_checked {
            return Ok(None);
        }
        self.auto_zoom_checked = true;

        if valid_size(measured) && measured != self.container {
            self.container = measured;
            self.view = ViewTransform::centered(self.natural, self.container, self.view.zoom);
            self.crop = self.initial_crop();
        }

        let applied = zoom::auto_zoom(self.natural, self.container);
        if let Some(z) = applied {
            self.view = ViewTransform::centered(self.natural, self.container, z);
            self.crop = self.initial_crop();
            tracing::debug!(zoom = z, natural = ?self.natural, "auto zoom applied");
        }
        Ok(applied)
    }

    /// Pan the image by `delta` container pixels.
    pub fn pan_by(&mut self, delta: Vec2) -> CardResult<()> {
        self.begin_adjust()?;
        self.view.pan += delta;
        Ok(())
    }

    /// Multiply zoom by `factor`, keeping the point under `anchor` fixed. Clamped to the
    /// configured bounds.
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) -> CardResult<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(CardError::validation("zoom factor must be finite and > 0"));
        }
        self.begin_adjust()?;
        let z = (self.view.zoom * factor).clamp(self.config.min_zoom, self.config.max_zoom);
        self.view = self.view.zoomed_about(anchor, z);
        Ok(())
    }

    /// Set an absolute zoom about the viewport center. Clamped to the configured bounds.
    pub fn set_zoom(&mut self, zoom: f64) -> CardResult<()> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(CardError::validation("zoom must be finite and > 0"));
        }
        self.begin_adjust()?;
        let z = zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        let anchor = Point::new(self.container.width / 2.0, self.container.height / 2.0);
        self.view = self.view.zoomed_about(anchor, z);
        Ok(())
    }

    /// Move the crop box by `delta` container pixels.
    pub fn move_crop(&mut self, delta: Vec2) -> CardResult<()> {
        self.begin_adjust()?;
        self.crop = self.crop + delta;
        Ok(())
    }

    /// Drag one corner of the crop box; the opposite corner stays put.
    ///
    /// With a fixed aspect the height follows the width, so only `delta.x` is used.
    pub fn drag_handle(&mut self, handle: CropHandle, delta: Vec2) -> CardResult<()> {
        self.begin_adjust()?;
        let min = self.config.min_crop_px;
        let r = self.crop;
        let (fixed, sx, sy) = match handle {
            CropHandle::TopLeft => (Point::new(r.x1, r.y1), -1.0, -1.0),
            CropHandle::TopRight => (Point::new(r.x0, r.y1), 1.0, -1.0),
            CropHandle::BottomLeft => (Point::new(r.x1, r.y0), -1.0, 1.0),
            CropHandle::BottomRight => (Point::new(r.x0, r.y0), 1.0, 1.0),
        };

        let mut w = (r.width() + sx * delta.x).max(min);
        let h = match self.aspect {
            AspectRatio::Free => (r.height() + sy * delta.y).max(min),
            AspectRatio::Fixed(a) => {
                let h = w / a;
                if h < min {
                    w = min * a;
                    min
                } else {
                    h
                }
            }
        };

        let x0 = if sx > 0.0 { fixed.x } else { fixed.x - w };
        let y0 = if sy > 0.0 { fixed.y } else { fixed.y - h };
        self.crop = Rect::new(x0, y0, x0 + w, y0 + h);
        Ok(())
    }

    /// Finish the current gesture.
    pub fn end_gesture(&mut self) -> CardResult<()> {
        match self.state {
            CropState::Adjusting => {
                self.state = CropState::Ready;
                Ok(())
            }
            CropState::Ready => Ok(()),
            other => Err(CardError::session_state(format!(
                "no gesture to end in state {other:?}"
            ))),
        }
    }

    /// Crop box mapped to natural pixels and clamped to the image.
    pub fn crop_region_natural(&self) -> Option<PixelRect> {
        self.image.as_ref()?;
        clamp_to_pixels(self.view.container_rect_to_natural(self.crop), self.natural)
    }

    /// Rasterize the selection to JPEG and close.
    ///
    /// On failure the session returns to `Ready` and keeps its state for a retry.
    #[tracing::instrument(skip(self), fields(source = self.source_url.as_deref().unwrap_or("")))]
    pub fn commit(&mut self) -> CardResult<Blob> {
        if !matches!(self.state, CropState::Ready | CropState::Adjusting) {
            return Err(CardError::session_state(format!(
                "cannot commit in state {:?}",
                self.state
            )));
        }
        self.state = CropState::Committing;
        match self.rasterize() {
            Ok(blob) => {
                tracing::info!(len = blob.len(), "crop committed");
                self.reset();
                Ok(blob)
            }
            Err(e) => {
                tracing::warn!(error = %e, "crop commit failed; session stays open");
                self.state = CropState::Ready;
                Err(e)
            }
        }
    }

    /// Close without output. Idempotent when already closed.
    pub fn cancel(&mut self) -> CardResult<()> {
        match self.state {
            CropState::Closed => Ok(()),
            CropState::Committing => Err(CardError::session_state(
                "cannot cancel while committing",
            )),
            _ => {
                tracing::debug!("crop session cancelled");
                self.reset();
                Ok(())
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CropState {
        self.state
    }

    /// `true` unless closed.
    pub fn is_open(&self) -> bool {
        self.state != CropState::Closed
    }

    /// Source being cropped.
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Aspect enforced on the crop box.
    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    /// Guide mask shape.
    pub fn shape(&self) -> CropShape {
        self.shape
    }

    /// Current zoom/pan.
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Crop box in container space.
    pub fn crop_rect(&self) -> Rect {
        self.crop
    }

    /// Natural size of the loaded image (zero before loading).
    pub fn natural_size(&self) -> Size {
        self.natural
    }

    /// Current viewport size.
    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Whether container point `p` falls inside the unmasked guide.
    pub fn guide_contains(&self, p: Point) -> bool {
        self.shape.guide_contains(self.crop, p)
    }

    fn begin_adjust(&mut self) -> CardResult<()> {
        match self.state {
            CropState::Ready | CropState::Adjusting => {
                self.state = CropState::Adjusting;
                Ok(())
            }
            other => Err(CardError::session_state(format!(
                "cannot adjust in state {other:?}"
            ))),
        }
    }

    fn initial_crop(&self) -> Rect {
        let container = Rect::from_origin_size(Point::ORIGIN, self.container);
        let shown = self
            .view
            .natural_rect_to_container(Rect::from_origin_size(Point::ORIGIN, self.natural));
        let visible = container.intersect(shown);
        let area = if visible.area() > 0.0 {
            visible
        } else {
            container
        };
        centered_crop_rect(area, self.aspect, self.config.initial_crop_fraction)
    }

    fn rasterize(&self) -> CardResult<Blob> {
        let image = self
            .image
            .as_ref()
            .ok_or_else(|| CardError::render("no source image loaded"))?;
        let region = self
            .crop_region_natural()
            .ok_or_else(|| CardError::render("crop box does not overlap the image"))?;
        let (w, h) = output_size(
            self.shape,
            region,
            self.config.square_output_px,
            self.config.free_output_width_px,
        );
        raster::rasterize_crop(image, region, w, h)
    }

    fn reset(&mut self) {
        let config = self.config.clone();
        *self = Self::new(config);
    }
}

fn valid_size(s: Size) -> bool {
    s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/crop/session.rs"]
mod tests;
