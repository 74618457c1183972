use crate::document::element::TextKind;
use crate::foundation::core::Size;
use crate::foundation::error::{CardError, CardResult};
use crate::geometry::shape::CropShape;

/// Fixed box size in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoxSize {
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl BoxSize {
    /// Construct from width and height.
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    fn validate(self, what: &str) -> CardResult<()> {
        if !(self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0) {
            return Err(CardError::validation(format!(
                "{what} box must be finite and > 0"
            )));
        }
        Ok(())
    }
}

impl From<BoxSize> for Size {
    fn from(b: BoxSize) -> Self {
        Size::new(b.w, b.h)
    }
}

/// Sizes and sample texts used when new elements are placed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Name placeholder box.
    pub name_box: BoxSize,
    /// Title placeholder box.
    pub title_box: BoxSize,
    /// Company placeholder box.
    pub company_box: BoxSize,
    /// Name sample text.
    pub name_text: String,
    /// Title sample text.
    pub title_text: String,
    /// Company sample text.
    pub company_text: String,
    /// Headshot frame shape: circle/square use `headshot_square`, rectangle uses `headshot_wide`.
    pub headshot_shape: CropShape,
    /// Headshot box for circle and square shapes.
    pub headshot_square: BoxSize,
    /// Headshot box for the rectangle shape.
    pub headshot_wide: BoxSize,
    /// Logo box.
    pub logo_box: BoxSize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            name_box: BoxSize::new(500.0, 80.0),
            title_box: BoxSize::new(500.0, 50.0),
            company_box: BoxSize::new(500.0, 50.0),
            name_text: "Speaker Name".to_string(),
            title_text: "Speaker Title".to_string(),
            company_text: "Company".to_string(),
            headshot_shape: CropShape::Circle,
            headshot_square: BoxSize::new(240.0, 240.0),
            headshot_wide: BoxSize::new(320.0, 240.0),
            logo_box: BoxSize::new(240.0, 120.0),
        }
    }
}

impl PlacementConfig {
    /// Box and sample text for a text placeholder.
    pub fn text(&self, kind: TextKind) -> (BoxSize, &str) {
        match kind {
            TextKind::Name => (self.name_box, &self.name_text),
            TextKind::Title => (self.title_box, &self.title_text),
            TextKind::Company => (self.company_box, &self.company_text),
        }
    }

    /// Headshot box for the configured shape.
    pub fn headshot_box(&self) -> BoxSize {
        if self.headshot_shape.is_square() {
            self.headshot_square
        } else {
            self.headshot_wide
        }
    }

    /// Check every box is positive.
    pub fn validate(&self) -> CardResult<()> {
        self.name_box.validate("name")?;
        self.title_box.validate("title")?;
        self.company_box.validate("company")?;
        self.headshot_square.validate("headshot")?;
        self.headshot_wide.validate("headshot")?;
        self.logo_box.validate("logo")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/placement.rs"]
mod tests;
