use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([100, 50, 200, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn probe_reads_header_dimensions() {
    let bytes = png_bytes(37, 11);
    assert_eq!(probe_dimensions(&bytes).unwrap(), (37, 11));
    assert_eq!(sniff_mime(&bytes), Some("image/png"));
}

#[test]
fn decode_failures_are_decode_errors() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, CardError::Decode(_)));
    assert!(err.is_transient());

    let err = probe_dimensions(b"").unwrap_err();
    assert!(matches!(err, CardError::Decode(_)));
}

#[test]
fn encode_png_roundtrips_through_decode() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
    let bytes = encode_png(&img).unwrap();
    let back = decode_image(&bytes).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (3, 2));
    assert_eq!(back.get_pixel(2, 1).0, [1, 2, 3, 255]);
}
