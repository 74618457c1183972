use std::fmt::Write as _;

use crate::{
    assets::pipeline::AssetResolver,
    document::element::{CanvasElement, ElementBody, ImageClip},
    document::model::CanvasDocument,
    foundation::error::{CardError, CardResult},
};

const PLACEHOLDER_STROKE: &str = "#8a8a8a";
const PLACEHOLDER_FILL: &str = "#333333";

/// Render `doc` as a standalone SVG scoped to the canvas bounds.
///
/// Images are embedded as data URLs. Image elements whose asset cannot be resolved are skipped
/// with a warning. Text placeholders draw a dashed guide box with their sample text centered.
pub fn document_to_svg(doc: &CanvasDocument, resolver: &dyn AssetResolver) -> CardResult<String> {
    let canvas = doc.canvas();
    let mut out = String::with_capacity(1024);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height,
    );
    let _ = write!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        canvas.width,
        canvas.height,
        doc.background_color().to_hex()
    );

    for el in doc.elements() {
        if !el.has_valid_geometry() {
            return Err(CardError::render(format!(
                "element {} has non-finite geometry",
                el.id
            )));
        }
        match &el.body {
            ElementBody::Image {
                asset_ref, clip, ..
            } => {
                let Some(blob) = resolver.resolve(asset_ref) else {
                    tracing::warn!(id = %el.id, asset = %asset_ref, "export: asset not available; skipping");
                    continue;
                };
                write_image(&mut out, el, &blob.to_data_url(), *clip);
            }
            ElementBody::Text { text, .. } => write_placeholder(&mut out, el, text),
        }
    }

    out.push_str("</svg>");
    Ok(out)
}

fn write_image(out: &mut String, el: &CanvasElement, href: &str, clip: ImageClip) {
    let clip_attr = match clip {
        ImageClip::None => String::new(),
        ImageClip::Circle => {
            let c = el.bounds().center();
            let _ = write!(
                out,
                r#"<defs><clipPath id="clip-{id}"><ellipse cx="{}" cy="{}" rx="{}" ry="{}"/></clipPath></defs>"#,
                c.x,
                c.y,
                el.w / 2.0,
                el.h / 2.0,
                id = el.id.0,
            );
            format!(r#" clip-path="url(#clip-{})""#, el.id.0)
        }
    };
    let _ = write!(
        out,
        r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none" xlink:href="{href}"{clip_attr}/>"#,
        el.x, el.y, el.w, el.h,
    );
}

fn write_placeholder(out: &mut String, el: &CanvasElement, text: &str) {
    let c = el.bounds().center();
    let _ = write!(
        out,
        r#"<g><rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{PLACEHOLDER_STROKE}" stroke-width="2" stroke-dasharray="8 4"/>"#,
        el.x, el.y, el.w, el.h,
    );
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{}" fill="{PLACEHOLDER_FILL}" text-anchor="middle" dominant-baseline="central">{}</text></g>"#,
        c.x,
        c.y,
        (el.h * 0.5).max(1.0),
        escape_xml(text),
    );
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/svg.rs"]
mod tests;
