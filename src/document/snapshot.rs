use std::collections::HashSet;

use serde_json::Value;

use crate::assets::asset::AssetId;
use crate::document::element::{CanvasElement, ElementId};
use crate::foundation::core::{Canvas, RgbColor};
use crate::foundation::error::{CardError, CardResult};

/// Stage metadata used when a document is created or a stored value is missing/malformed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentDefaults {
    /// Stage size.
    pub canvas: Canvas,
    /// Stage colour.
    pub background_color: RgbColor,
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1200,
                height: 630,
            },
            background_color: RgbColor::WHITE,
        }
    }
}

/// Deep, order-preserving copy of a document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DocumentSnapshot {
    /// Stage size.
    pub canvas: Canvas,
    /// Stage colour.
    pub background_color: RgbColor,
    /// Asset behind the locked background element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_asset: Option<AssetId>,
    /// Elements bottom to top.
    pub elements: Vec<CanvasElement>,
    /// Next element id to hand out.
    pub next_id: u64,
}

impl DocumentSnapshot {
    /// Serialize to JSON.
    pub fn to_value(&self) -> CardResult<Value> {
        serde_json::to_value(self).map_err(|e| CardError::serde(format!("snapshot: {e}")))
    }

    /// Parse a stored snapshot, falling back to `defaults` field by field.
    ///
    /// Malformed elements (unknown type, missing fields, non-positive size, duplicate or
    /// out-of-range id) are dropped; the rest keep their order. Never fails.
    pub fn from_value(v: &Value, defaults: &DocumentDefaults) -> Self {
        let canvas = parse_canvas(v.get("canvas")).unwrap_or_else(|| {
            if v.get("canvas").is_some() {
                tracing::warn!("snapshot canvas malformed; using default");
            }
            defaults.canvas
        });

        let background_color = v
            .get("background_color")
            .and_then(|c| serde_json::from_value::<RgbColor>(c.clone()).ok())
            .unwrap_or(defaults.background_color);

        let background_asset = v
            .get("background_asset")
            .and_then(Value::as_str)
            .map(AssetId::from_string);

        let mut elements = Vec::new();
        let mut seen = HashSet::new();
        if let Some(items) = v.get("elements").and_then(Value::as_array) {
            for (i, item) in items.iter().enumerate() {
                match serde_json::from_value::<CanvasElement>(item.clone()) {
                    Ok(el) if el.id == ElementId::MAX => {
                        tracing::warn!(index = i, "dropping element with out-of-range id");
                    }
                    Ok(el) if !el.has_valid_geometry() => {
                        tracing::warn!(index = i, id = %el.id, "dropping element with invalid geometry");
                    }
                    Ok(el) if !seen.insert(el.id) => {
                        tracing::warn!(index = i, id = %el.id, "dropping element with duplicate id");
                    }
                    Ok(el) => elements.push(el),
                    Err(e) => {
                        tracing::warn!(index = i, error = %e, "dropping malformed element");
                    }
                }
            }
        }

        let min_next = elements
            .iter()
            .map(|e| e.id.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        let next_id = v
            .get("next_id")
            .and_then(Value::as_u64)
            .unwrap_or(0)
            .max(min_next);

        Self {
            canvas,
            background_color,
            background_asset,
            elements,
            next_id,
        }
    }
}

pub(crate) fn parse_canvas(v: Option<&Value>) -> Option<Canvas> {
    let v = v?;
    let w = u32::try_from(v.get("width")?.as_u64()?).ok()?;
    let h = u32::try_from(v.get("height")?.as_u64()?).ok()?;
    Canvas::new(w, h).ok()
}

#[cfg(test)]
#[path = "../../tests/unit/document/snapshot.rs"]
mod tests;
