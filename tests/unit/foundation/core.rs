use super::*;
use serde_json::json;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(2000, 1000).unwrap();
    assert_eq!(c.center(), Point::new(1000.0, 500.0));
    assert_eq!(c.bounds(), Rect::new(0.0, 0.0, 2000.0, 1000.0));
}

#[test]
fn parses_rgb_function_and_hex() {
    assert_eq!(
        RgbColor::parse("rgb(12, 34, 255)").unwrap(),
        RgbColor::new(12, 34, 255)
    );
    assert_eq!(
        RgbColor::parse("  RGB(1,2,3) ").unwrap(),
        RgbColor::new(1, 2, 3)
    );
    assert_eq!(
        RgbColor::parse("#FF8000").unwrap(),
        RgbColor::new(255, 128, 0)
    );
}

#[test]
fn rejects_malformed_colours() {
    assert!(RgbColor::parse("rgb(1, 2)").is_err());
    assert!(RgbColor::parse("rgb(1, 2, 300)").is_err());
    assert!(RgbColor::parse("#fff").is_err());
    assert!(RgbColor::parse("blue").is_err());
}

#[test]
fn serde_uses_css_string_and_accepts_alternates() {
    let c = RgbColor::new(10, 20, 30);
    assert_eq!(serde_json::to_value(c).unwrap(), json!("rgb(10, 20, 30)"));

    let back: RgbColor = serde_json::from_value(json!("rgb(10, 20, 30)")).unwrap();
    assert_eq!(back, c);

    let obj: RgbColor = serde_json::from_value(json!({"r": 10, "g": 20, "b": 30})).unwrap();
    assert_eq!(obj, c);

    let arr: RgbColor = serde_json::from_value(json!([10, 20, 30])).unwrap();
    assert_eq!(arr, c);

    assert_eq!(c.to_hex(), "#0a141e");
}

#[test]
fn raster_size_limits() {
    assert!(check_raster_size(1200, 630).is_ok());
    assert!(check_raster_size(MAX_RASTER_EDGE, 1).is_ok());
    for (w, h) in [
        (0, 10),
        (10, 0),
        (MAX_RASTER_EDGE + 1, 1),
        (1200, 6_000_000),
        (60_000, 60_000),
    ] {
        assert!(
            matches!(check_raster_size(w, h), Err(CardError::Render(_))),
            "{w}x{h}"
        );
    }
}
