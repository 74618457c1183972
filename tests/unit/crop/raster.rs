use super::*;

fn gradient(w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(image::RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    }))
}

#[test]
fn produces_jpeg_of_requested_size() {
    let src = gradient(300, 200);
    let region = PixelRect {
        x: 50,
        y: 20,
        width: 100,
        height: 100,
    };
    let blob = rasterize_crop(&src, region, 64, 64).unwrap();
    assert_eq!(blob.mime(), "image/jpeg");
    assert_eq!(image::guess_format(blob.bytes()).unwrap(), image::ImageFormat::Jpeg);
    let decoded = image::load_from_memory(blob.bytes()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 64));
}

#[test]
fn rejects_zero_output_and_out_of_bounds_region() {
    let src = gradient(10, 10);
    let region = PixelRect {
        x: 0,
        y: 0,
        width: 10,
        height: 10,
    };
    assert!(matches!(
        rasterize_crop(&src, region, 0, 10),
        Err(CardError::Render(_))
    ));

    let oob = PixelRect {
        x: 5,
        y: 5,
        width: 10,
        height: 2,
    };
    assert!(matches!(
        rasterize_crop(&src, oob, 10, 10),
        Err(CardError::Render(_))
    ));
}

#[test]
fn transparent_pixels_flatten_to_white() {
    let rgba = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 0]));
    let rgb = flatten_onto_white(&rgba);
    assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);

    let opaque = image::RgbaImage::from_pixel(1, 1, image::Rgba([10, 20, 30, 255]));
    assert_eq!(flatten_onto_white(&opaque).get_pixel(0, 0).0, [10, 20, 30]);
}

#[test]
fn oversized_output_is_rejected_before_resampling() {
    let src = gradient(1, 5000);
    let region = PixelRect {
        x: 0,
        y: 0,
        width: 1,
        height: 5000,
    };
    assert!(matches!(
        rasterize_crop(&src, region, 1200, 6_000_000),
        Err(CardError::Render(_))
    ));
}
