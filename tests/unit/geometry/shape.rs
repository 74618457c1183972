use super::*;

#[test]
fn circle_and_square_force_square_aspect() {
    assert_eq!(
        CropShape::Circle.effective_aspect(AspectRatio::Free),
        AspectRatio::SQUARE
    );
    assert_eq!(
        CropShape::Square.effective_aspect(AspectRatio::Fixed(3.0)),
        AspectRatio::SQUARE
    );
    assert_eq!(
        CropShape::Rectangle.effective_aspect(AspectRatio::Fixed(3.0)),
        AspectRatio::Fixed(3.0)
    );
}

#[test]
fn circle_guide_excludes_corners() {
    let crop = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(CropShape::Circle.guide_contains(crop, Point::new(50.0, 50.0)));
    assert!(!CropShape::Circle.guide_contains(crop, Point::new(2.0, 2.0)));
    assert!(CropShape::Square.guide_contains(crop, Point::new(2.0, 2.0)));
}

#[test]
fn output_size_square_vs_natural_height() {
    let region = PixelRect {
        x: 0,
        y: 0,
        width: 1600,
        height: 900,
    };
    assert_eq!(output_size(CropShape::Circle, region, 400, 1200), (400, 400));
    assert_eq!(
        output_size(CropShape::Rectangle, region, 400, 1200),
        (1200, 675)
    );
}
