use crate::{
    assets::asset::{AssetId, AssetRole, TestAssets},
    document::element::{CanvasElement, ElementBody, ElementId, ImageClip, TextKind},
    document::placement::{BoxSize, PlacementConfig},
    document::snapshot::{DocumentDefaults, DocumentSnapshot},
    foundation::core::{Canvas, Point, RgbColor},
    foundation::error::{CardError, CardResult},
    geometry::shape::CropShape,
};

/// Element creation request for [`CanvasDocument::add_element`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NewElement {
    /// Text placeholder of the given kind.
    Text(TextKind),
    /// The current headshot test asset.
    Headshot,
    /// The current logo test asset.
    Logo,
}

/// A card template: stage metadata plus elements in z-order (index 0 is the bottom).
///
/// Invariants:
/// - at most one locked element exists; it is the background image and sits at index 0
/// - every element has finite, positive `w`/`h`
/// - `background_asset` is the asset of the locked element, if any
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasDocument {
    canvas: Canvas,
    background_color: RgbColor,
    background_asset: Option<AssetId>,
    elements: Vec<CanvasElement>,
    next_id: u64,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::with_defaults(&DocumentDefaults::default())
    }
}

impl CanvasDocument {
    /// Empty document.
    pub fn new(canvas: Canvas, background_color: RgbColor) -> Self {
        Self {
            canvas,
            background_color,
            background_asset: None,
            elements: Vec::new(),
            next_id: 1,
        }
    }

    /// Empty document using `defaults`.
    pub fn with_defaults(defaults: &DocumentDefaults) -> Self {
        Self::new(defaults.canvas, defaults.background_color)
    }

    /// Stage size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Stage colour, visible where no background image covers the stage.
    pub fn background_color(&self) -> RgbColor {
        self.background_color
    }

    /// Change the stage colour.
    pub fn set_background_color(&mut self, color: RgbColor) {
        self.background_color = color;
    }

    /// Asset of the background image, if one is set.
    pub fn background_asset(&self) -> Option<&AssetId> {
        self.background_asset.as_ref()
    }

    /// Elements bottom to top.
    pub fn elements(&self) -> &[CanvasElement] {
        &self.elements
    }

    /// Element by id.
    pub fn element(&self, id: ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// The locked background element, if any.
    pub fn background_element(&self) -> Option<&CanvasElement> {
        self.elements.first().filter(|e| e.is_locked())
    }

    /// Place a new element centered on `center`.
    ///
    /// Text kinds get a fixed-size placeholder with sample text. Headshot and logo need a test
    /// asset of the same role in `assets`; without one this fails with
    /// [`CardError::MissingAsset`] and leaves the document untouched.
    pub fn add_element(
        &mut self,
        what: NewElement,
        center: Point,
        assets: &TestAssets,
        placement: &PlacementConfig,
    ) -> CardResult<ElementId> {
        let (size, body) = match what {
            NewElement::Text(kind) => {
                let (size, text) = placement.text(kind);
                (
                    size,
                    ElementBody::Text {
                        kind,
                        text: text.to_string(),
                    },
                )
            }
            NewElement::Headshot => {
                let asset = assets.get(AssetRole::Headshot).ok_or_else(|| {
                    CardError::missing_asset("upload a headshot before placing it")
                })?;
                let clip = if placement.headshot_shape == CropShape::Circle {
                    ImageClip::Circle
                } else {
                    ImageClip::None
                };
                (
                    placement.headshot_box(),
                    image_body(asset.id.clone(), AssetRole::Headshot, clip),
                )
            }
            NewElement::Logo => {
                let asset = assets
                    .get(AssetRole::Logo)
                    .ok_or_else(|| CardError::missing_asset("upload a logo before placing it"))?;
                (
                    placement.logo_box,
                    image_body(asset.id.clone(), AssetRole::Logo, ImageClip::None),
                )
            }
        };

        let id = self.push_centered(size, center, body)?;
        tracing::debug!(%id, ?what, "element added");
        Ok(id)
    }

    /// Replace the background with `asset` and resize the stage to `width × height`.
    pub fn set_background(
        &mut self,
        asset: AssetId,
        width: u32,
        height: u32,
    ) -> CardResult<ElementId> {
        let canvas = Canvas::new(width, height)?;
        let id = self.alloc_id()?;
        if self.background_element().is_some() {
            self.elements.remove(0);
        }

        self.elements.insert(
            0,
            CanvasElement {
                id,
                x: 0.0,
                y: 0.0,
                w: f64::from(width),
                h: f64::from(height),
                body: ElementBody::Image {
                    asset_ref: asset.clone(),
                    role: AssetRole::Background,
                    locked: true,
                    clip: ImageClip::None,
                },
            },
        );
        self.canvas = canvas;
        self.background_asset = Some(asset);
        tracing::debug!(%id, width, height, "background set");
        Ok(id)
    }

    /// Drop the background image. The stage keeps its current size.
    pub fn remove_background(&mut self) -> bool {
        self.background_asset = None;
        if self.background_element().is_some() {
            let removed = self.elements.remove(0);
            tracing::debug!(id = %removed.id, "background removed");
            true
        } else {
            false
        }
    }

    /// Move an unlocked element so its top-left corner is at `(x, y)`.
    pub fn move_element(&mut self, id: ElementId, x: f64, y: f64) -> CardResult<()> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(CardError::validation("element position must be finite"));
        }
        let el = self.unlocked_mut(id)?;
        el.x = x;
        el.y = y;
        Ok(())
    }

    /// Resize an unlocked element, keeping its top-left corner.
    pub fn resize_element(&mut self, id: ElementId, w: f64, h: f64) -> CardResult<()> {
        validate_size(w, h)?;
        let el = self.unlocked_mut(id)?;
        el.w = w;
        el.h = h;
        Ok(())
    }

    /// Replace the sample text of a text placeholder.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> CardResult<()> {
        let el = self.unlocked_mut(id)?;
        match &mut el.body {
            ElementBody::Text { text: t, .. } => {
                *t = text.into();
                Ok(())
            }
            ElementBody::Image { .. } => Err(CardError::validation(format!(
                "element {id} is not a text placeholder"
            ))),
        }
    }

    /// Remove an unlocked element. Use [`CanvasDocument::remove_background`] for the background.
    pub fn remove_element(&mut self, id: ElementId) -> CardResult<CanvasElement> {
        self.unlocked_mut(id)?;
        let idx = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CardError::validation(format!("unknown element {id}")))?;
        Ok(self.elements.remove(idx))
    }

    /// Deep copy of the document.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            canvas: self.canvas,
            background_color: self.background_color,
            background_asset: self.background_asset.clone(),
            elements: self.elements.clone(),
            next_id: self.next_id,
        }
    }

    /// Rebuild a document from a snapshot.
    ///
    /// Snapshots taken from a live document restore exactly. Others are repaired: invalid
    /// elements are dropped, only the first locked element survives and is moved to the bottom,
    /// and `background_asset` follows that element.
    pub fn restore(snapshot: DocumentSnapshot) -> Self {
        let DocumentSnapshot {
            canvas,
            background_color,
            background_asset,
            elements,
            next_id,
        } = snapshot;

        let mut background = None;
        let mut rest = Vec::with_capacity(elements.len());
        for el in elements {
            if el.id == ElementId::MAX {
                tracing::warn!("restore: dropping element with out-of-range id");
                continue;
            }
            if !el.has_valid_geometry() {
                tracing::warn!(id = %el.id, "restore: dropping element with invalid geometry");
                continue;
            }
            if el.is_locked() {
                if background.is_some() {
                    tracing::warn!(id = %el.id, "restore: dropping extra locked element");
                    continue;
                }
                background = Some(el);
            } else {
                rest.push(el);
            }
        }

        let bg_asset = background.as_ref().and_then(|e| e.asset_ref().cloned());
        if bg_asset != background_asset {
            tracing::warn!("restore: background asset did not match background element");
        }

        let mut elements = Vec::with_capacity(rest.len() + 1);
        elements.extend(background);
        elements.extend(rest);

        let min_next = elements
            .iter()
            .map(|e| e.id.0.saturating_add(1))
            .max()
            .unwrap_or(1);
        Self {
            canvas,
            background_color,
            background_asset: bg_asset,
            elements,
            next_id: next_id.max(min_next),
        }
    }

    fn alloc_id(&mut self) -> CardResult<ElementId> {
        let id = ElementId(self.next_id);
        if id == ElementId::MAX {
            return Err(CardError::validation("element ids exhausted"));
        }
        self.next_id += 1;
        Ok(id)
    }

    fn push_centered(
        &mut self,
        size: BoxSize,
        center: Point,
        body: ElementBody,
    ) -> CardResult<ElementId> {
        validate_size(size.w, size.h)?;
        if !(center.x.is_finite() && center.y.is_finite()) {
            return Err(CardError::validation("placement center must be finite"));
        }
        let id = self.alloc_id()?;
        self.elements.push(CanvasElement {
            id,
            x: center.x - size.w / 2.0,
            y: center.y - size.h / 2.0,
            w: size.w,
            h: size.h,
            body,
        });
        Ok(id)
    }

    fn unlocked_mut(&mut self, id: ElementId) -> CardResult<&mut CanvasElement> {
        let el = self
            .elements
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CardError::validation(format!("unknown element {id}")))?;
        if el.is_locked() {
            return Err(CardError::locked(format!(
                "element {id} is the locked background"
            )));
        }
        Ok(el)
    }
}

fn image_body(asset_ref: AssetId, role: AssetRole, clip: ImageClip) -> ElementBody {
    ElementBody::Image {
        asset_ref,
        role,
        locked: false,
        clip,
    }
}

fn validate_size(w: f64, h: f64) -> CardResult<()> {
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(CardError::validation(
            "element width/height must be finite and > 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/document/model.rs"]
mod tests;
