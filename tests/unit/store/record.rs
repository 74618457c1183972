use serde_json::json;

use super::*;
use crate::assets::asset::TestAssets;
use crate::document::element::TextKind;
use crate::document::model::NewElement;
use crate::document::placement::PlacementConfig;
use crate::foundation::core::Canvas;

fn sample_doc() -> CanvasDocument {
    let mut doc = CanvasDocument::default();
    doc.set_background(AssetId::from_string("bg"), 2000, 1000)
        .unwrap();
    let center = doc.canvas().center();
    doc.add_element(
        NewElement::Text(TextKind::Name),
        center,
        &TestAssets::default(),
        &PlacementConfig::default(),
    )
    .unwrap();
    doc
}

#[test]
fn captured_record_restores_same_document() {
    let doc = sample_doc();
    let bg = BackgroundImageRef {
        asset_id: AssetId::from_string("bg"),
        remote_url: Some("https://cdn.example/bg.jpg".to_string()),
        data_url: None,
    };
    let record = TemplateRecord::capture(&doc, Some(bg.clone()));
    let v = record.to_value().unwrap();
    assert_eq!(v["canvas_width"], 2000);
    assert_eq!(v["background_color"], "rgb(255, 255, 255)");

    let back = TemplateRecord::from_value(&v, &DocumentDefaults::default());
    assert_eq!(back, record);
    assert_eq!(back.background_image, Some(bg));
    assert_eq!(back.into_document(), doc);
}

#[test]
fn garbage_yields_defaults() {
    for v in [Value::Null, json!(42), json!({ "snapshot": "x", "background_image": 3 })] {
        let record = TemplateRecord::from_value(&v, &DocumentDefaults::default());
        assert_eq!((record.canvas_width, record.canvas_height), (1200, 630));
        assert!(record.background_image.is_none());
        let doc = record.into_document();
        assert!(doc.elements().is_empty());
        assert_eq!(doc.canvas(), Canvas::new(1200, 630).unwrap());
    }
}

#[test]
fn top_level_fields_override_snapshot() {
    let mut v = TemplateRecord::capture(&sample_doc(), None).to_value().unwrap();
    v["canvas_width"] = json!(640);
    v["canvas_height"] = json!(360);
    v["background_color"] = json!("#000000");

    let doc = TemplateRecord::from_value(&v, &DocumentDefaults::default()).into_document();
    assert_eq!(doc.canvas(), Canvas::new(640, 360).unwrap());
    assert_eq!(doc.background_color(), RgbColor::new(0, 0, 0));
    assert_eq!(doc.elements().len(), 2);
}

#[test]
fn invalid_top_level_size_keeps_snapshot_size() {
    let mut v = TemplateRecord::capture(&sample_doc(), None).to_value().unwrap();
    v["canvas_width"] = json!(0);
    let record = TemplateRecord::from_value(&v, &DocumentDefaults::default());
    assert_eq!((record.canvas_width, record.canvas_height), (2000, 1000));
}
