use super::*;
use serde_json::json;

#[test]
fn empty_value_yields_defaults() {
    let snap = DocumentSnapshot::from_value(&Value::Null, &DocumentDefaults::default());
    assert_eq!(snap.canvas, Canvas::new(1200, 630).unwrap());
    assert_eq!(snap.background_color, RgbColor::WHITE);
    assert!(snap.elements.is_empty());
    assert!(snap.background_asset.is_none());
}

#[test]
fn malformed_fields_fall_back_individually() {
    let v = json!({
        "canvas": { "width": 0, "height": 10 },
        "background_color": "#102030",
        "elements": "nope",
        "next_id": 3
    });
    let snap = DocumentSnapshot::from_value(&v, &DocumentDefaults::default());
    assert_eq!(snap.canvas, Canvas::new(1200, 630).unwrap());
    assert_eq!(snap.background_color, RgbColor::new(0x10, 0x20, 0x30));
    assert!(snap.elements.is_empty());
    assert_eq!(snap.next_id, 3);
}

#[test]
fn bad_elements_are_dropped_and_order_kept() {
    let v = json!({
        "canvas": { "width": 800, "height": 400 },
        "background_color": "rgb(0, 0, 0)",
        "elements": [
            { "id": 4, "x": 1.0, "y": 2.0, "w": 10.0, "h": 5.0, "type": "text", "kind": "title", "text": "T" },
            { "id": 5, "x": 1.0, "y": 2.0, "w": 0.0, "h": 5.0, "type": "text", "kind": "name", "text": "N" },
            { "id": 6, "x": 1.0, "y": 2.0, "w": 3.0, "h": 5.0, "type": "sticker" },
            { "id": 4, "x": 9.0, "y": 9.0, "w": 3.0, "h": 3.0, "type": "text", "kind": "company", "text": "C" },
            { "id": 2, "x": 0.0, "y": 0.0, "w": 3.0, "h": 3.0, "type": "image", "asset_ref": "a", "role": "logo" }
        ]
    });
    let snap = DocumentSnapshot::from_value(&v, &DocumentDefaults::default());
    let ids: Vec<u64> = snap.elements.iter().map(|e| e.id.0).collect();
    assert_eq!(ids, vec![4, 2]);
    assert_eq!(snap.next_id, 5);
    assert!(!snap.elements[1].is_locked());
}

#[test]
fn serialized_snapshot_parses_back() {
    let snap = DocumentSnapshot {
        canvas: Canvas::new(640, 480).unwrap(),
        background_color: RgbColor::new(1, 2, 3),
        background_asset: Some(AssetId::from_string("bg")),
        elements: Vec::new(),
        next_id: 9,
    };
    let v = snap.to_value().unwrap();
    assert_eq!(v["background_color"], "rgb(1, 2, 3)");
    assert_eq!(
        DocumentSnapshot::from_value(&v, &DocumentDefaults::default()),
        snap
    );
}

#[test]
fn max_ids_do_not_overflow() {
    let v = json!({
        "elements": [
            { "id": u64::MAX, "x": 0.0, "y": 0.0, "w": 10.0, "h": 5.0, "type": "text", "kind": "name", "text": "N" },
            { "id": u64::MAX - 1, "x": 0.0, "y": 0.0, "w": 10.0, "h": 5.0, "type": "text", "kind": "title", "text": "T" }
        ],
        "next_id": u64::MAX
    });
    let snap = DocumentSnapshot::from_value(&v, &DocumentDefaults::default());
    let ids: Vec<u64> = snap.elements.iter().map(|e| e.id.0).collect();
    assert_eq!(ids, vec![u64::MAX - 1]);
    assert_eq!(snap.next_id, u64::MAX);
}
