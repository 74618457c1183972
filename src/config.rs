use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    crop::session::CropConfig,
    document::placement::PlacementConfig,
    document::snapshot::DocumentDefaults,
    foundation::core::{Canvas, RgbColor},
    foundation::error::{CardError, CardResult},
};

/// Builder configuration. Every field is optional in JSON and defaults sensibly.
///
/// ```json
/// {
///   "default_canvas": { "width": 1200, "height": 630 },
///   "default_background_color": "rgb(255, 255, 255)",
///   "crop": { "square_output_px": 400 },
///   "placement": { "headshot_shape": "square" }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Stage size of a fresh document.
    pub default_canvas: Canvas,
    /// Stage colour of a fresh document.
    pub default_background_color: RgbColor,
    /// Crop dialog tunables.
    pub crop: CropConfig,
    /// Element sizes and sample texts.
    pub placement: PlacementConfig,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        let defaults = DocumentDefaults::default();
        Self {
            default_canvas: defaults.canvas,
            default_background_color: defaults.background_color,
            crop: CropConfig::default(),
            placement: PlacementConfig::default(),
        }
    }
}

impl BuilderConfig {
    /// Parse from a JSON reader and validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> CardResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| CardError::validation(format!("parse builder config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse from a JSON file on disk and validate.
    pub fn from_path(path: impl AsRef<Path>) -> CardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardError::validation(format!("open builder config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every section.
    pub fn validate(&self) -> CardResult<()> {
        Canvas::new(self.default_canvas.width, self.default_canvas.height)?;
        self.crop.validate()?;
        self.placement.validate()?;
        Ok(())
    }

    /// Document defaults derived from this configuration.
    pub fn document_defaults(&self) -> DocumentDefaults {
        DocumentDefaults {
            canvas: self.default_canvas,
            background_color: self.default_background_color,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
