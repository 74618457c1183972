use std::collections::HashMap;

use super::*;
use crate::assets::asset::{AssetId, TestAssets};
use crate::assets::blob::Blob;
use crate::document::element::TextKind;
use crate::document::model::NewElement;
use crate::document::placement::PlacementConfig;
use crate::foundation::core::{Point, RgbColor};

#[test]
fn empty_document_is_a_filled_stage() {
    let mut doc = CanvasDocument::default();
    doc.set_background_color(RgbColor::new(255, 0, 16));
    let svg = document_to_svg(&doc, &no_assets()).unwrap();
    assert!(svg.contains(r#"width="1200" height="630" viewBox="0 0 1200 630""#));
    assert!(svg.contains(r##"fill="#ff0010""##));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn placeholder_text_is_escaped() {
    let mut doc = CanvasDocument::default();
    let id = doc
        .add_element(
            NewElement::Text(TextKind::Company),
            Point::new(600.0, 315.0),
            &TestAssets::default(),
            &PlacementConfig::default(),
        )
        .unwrap();
    doc.set_text(id, "Tom & <Jerry>").unwrap();
    let svg = document_to_svg(&doc, &no_assets()).unwrap();
    assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
    assert!(svg.contains(r#"x="350" y="290" width="500" height="50""#));
}

#[test]
fn unresolved_images_are_skipped_and_resolved_ones_embedded() {
    let mut doc = CanvasDocument::default();
    doc.set_background(AssetId::from_string("bg"), 100, 50).unwrap();
    let svg = document_to_svg(&doc, &no_assets()).unwrap();
    assert!(!svg.contains("<image"));

    let mut assets = HashMap::new();
    assets.insert(
        AssetId::from_string("bg"),
        Blob::new("image/png", vec![1u8, 2, 3]),
    );
    let svg = document_to_svg(&doc, &assets).unwrap();
    assert!(svg.contains(r#"xlink:href="data:image/png;base64,AQID""#));
    assert!(!svg.contains("clip-path"));
}

#[test]
fn circle_clip_emits_ellipse() {
    let mut doc = CanvasDocument::default();
    let mut urls = crate::assets::url::ObjectUrlRegistry::new();
    let headshot = crate::assets::asset::Asset {
        id: AssetId::from_string("h"),
        role: crate::assets::asset::AssetRole::Headshot,
        local_preview_url: urls.create(Blob::new("image/png", vec![0u8])),
        remote_url: None,
        server_id: None,
        width: 10,
        height: 10,
    };
    let assets = TestAssets {
        headshot: Some(headshot),
        logo: None,
    };
    doc.add_element(
        NewElement::Headshot,
        Point::new(120.0, 120.0),
        &assets,
        &PlacementConfig::default(),
    )
    .unwrap();

    let mut blobs = HashMap::new();
    blobs.insert(AssetId::from_string("h"), Blob::new("image/png", vec![0u8]));
    let svg = document_to_svg(&doc, &blobs).unwrap();
    assert!(svg.contains(r#"<ellipse cx="120" cy="120" rx="120" ry="120"/>"#));
    assert!(svg.contains(r#"clip-path="url(#clip-1)""#));
}

fn no_assets() -> HashMap<AssetId, Blob> {
    HashMap::new()
}
