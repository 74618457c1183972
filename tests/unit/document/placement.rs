use super::*;

#[test]
fn headshot_box_follows_shape() {
    let mut p = PlacementConfig::default();
    assert_eq!(p.headshot_box(), BoxSize::new(240.0, 240.0));
    p.headshot_shape = CropShape::Square;
    assert_eq!(p.headshot_box(), BoxSize::new(240.0, 240.0));
    p.headshot_shape = CropShape::Rectangle;
    assert_eq!(p.headshot_box(), BoxSize::new(320.0, 240.0));
}

#[test]
fn text_boxes_and_samples() {
    let p = PlacementConfig::default();
    assert_eq!(p.text(TextKind::Name), (BoxSize::new(500.0, 80.0), "Speaker Name"));
    assert_eq!(p.text(TextKind::Title), (BoxSize::new(500.0, 50.0), "Speaker Title"));
    assert_eq!(p.text(TextKind::Company), (BoxSize::new(500.0, 50.0), "Company"));
}

#[test]
fn non_positive_boxes_fail_validation() {
    let p = PlacementConfig {
        logo_box: BoxSize::new(0.0, 10.0),
        ..PlacementConfig::default()
    };
    assert!(p.validate().is_err());
    assert!(PlacementConfig::default().validate().is_ok());
}
