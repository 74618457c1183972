use serde_json::Value;

use crate::{
    assets::asset::AssetId,
    document::model::CanvasDocument,
    document::snapshot::{DocumentDefaults, DocumentSnapshot},
    foundation::core::RgbColor,
    foundation::error::{CardError, CardResult},
};

/// Persisted reference to the background image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundImageRef {
    /// Asset the locked background element points at.
    pub asset_id: AssetId,
    /// Durable URL, if the background was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    /// Embedded bytes so a fresh session can show and export the background offline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
}

/// Everything saved under one template name.
///
/// The top-level canvas and colour fields duplicate the snapshot's copy and win when both are
/// present. Headshot/logo test assets are never part of a record.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateRecord {
    /// Stage width.
    pub canvas_width: u32,
    /// Stage height.
    pub canvas_height: u32,
    /// Stage colour.
    pub background_color: RgbColor,
    /// Background image, if one was committed.
    #[serde(default)]
    pub background_image: Option<BackgroundImageRef>,
    /// Full document snapshot.
    pub snapshot: DocumentSnapshot,
}

impl TemplateRecord {
    /// Capture `doc` for saving.
    pub fn capture(doc: &CanvasDocument, background_image: Option<BackgroundImageRef>) -> Self {
        let canvas = doc.canvas();
        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            background_color: doc.background_color(),
            background_image,
            snapshot: doc.snapshot(),
        }
    }

    /// Serialize to JSON.
    pub fn to_value(&self) -> CardResult<Value> {
        serde_json::to_value(self).map_err(|e| CardError::serde(format!("template record: {e}")))
    }

    /// Parse a stored record. Missing or malformed fields fall back to `defaults`; never fails.
    pub fn from_value(v: &Value, defaults: &DocumentDefaults) -> Self {
        let mut snapshot =
            DocumentSnapshot::from_value(v.get("snapshot").unwrap_or(&Value::Null), defaults);

        let width = v.get("canvas_width").and_then(Value::as_u64);
        let height = v.get("canvas_height").and_then(Value::as_u64);
        if let (Some(w), Some(h)) = (width, height) {
            match (u32::try_from(w), u32::try_from(h)) {
                (Ok(w), Ok(h)) if w > 0 && h > 0 => {
                    snapshot.canvas.width = w;
                    snapshot.canvas.height = h;
                }
                _ => tracing::warn!(w, h, "stored canvas size invalid; keeping snapshot size"),
            }
        }

        if let Some(c) = v.get("background_color") {
            match serde_json::from_value::<RgbColor>(c.clone()) {
                Ok(color) => snapshot.background_color = color,
                Err(e) => tracing::warn!(error = %e, "stored background colour invalid"),
            }
        }

        let background_image = match v.get("background_image") {
            None | Some(Value::Null) => None,
            Some(b) => serde_json::from_value::<BackgroundImageRef>(b.clone())
                .inspect_err(|e| tracing::warn!(error = %e, "stored background image invalid"))
                .ok(),
        };

        Self {
            canvas_width: snapshot.canvas.width,
            canvas_height: snapshot.canvas.height,
            background_color: snapshot.background_color,
            background_image,
            snapshot,
        }
    }

    /// Rebuild the document this record describes.
    pub fn into_document(self) -> CanvasDocument {
        CanvasDocument::restore(self.snapshot)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/record.rs"]
mod tests;
