use std::io::Cursor;

use image::{DynamicImage, imageops::FilterType};

use crate::assets::blob::Blob;
use crate::foundation::core::check_raster_size;
use crate::foundation::error::{CardError, CardResult};
use crate::geometry::viewport::PixelRect;

/// JPEG quality used for every committed crop (0.95).
pub const JPEG_QUALITY: u8 = 95;

/// MIME type of committed crops.
pub const CROP_MIME: &str = "image/jpeg";

/// Cut `region` out of `src`, resample to `out_w × out_h` with Lanczos3 and encode as JPEG.
///
/// Transparent source pixels are flattened onto white since JPEG has no alpha channel. Output
/// sizes past [`crate::MAX_RASTER_EDGE`] or [`crate::MAX_RASTER_PIXELS`] fail with
/// [`CardError::Render`] before any resampling.
pub fn rasterize_crop(
    src: &DynamicImage,
    region: PixelRect,
    out_w: u32,
    out_h: u32,
) -> CardResult<Blob> {
    check_raster_size(out_w, out_h)?;
    let (src_w, src_h) = (src.width(), src.height());
    if region.width == 0
        || region.height == 0
        || region.x.saturating_add(region.width) > src_w
        || region.y.saturating_add(region.height) > src_h
    {
        return Err(CardError::render(format!(
            "crop region {region:?} outside source {src_w}x{src_h}"
        )));
    }

    let cropped = src.crop_imm(region.x, region.y, region.width, region.height);
    let resized = cropped.resize_exact(out_w, out_h, FilterType::Lanczos3);
    let rgb = flatten_onto_white(&resized.to_rgba8());

    let mut buf = Vec::new();
    {
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
            Cursor::new(&mut buf),
            JPEG_QUALITY,
        );
        encoder
            .encode_image(&rgb)
            .map_err(|e| CardError::render(format!("encode jpeg: {e}")))?;
    }
    Ok(Blob::new(CROP_MIME, buf))
}

fn flatten_onto_white(rgba: &image::RgbaImage) -> image::RgbImage {
    let (w, h) = rgba.dimensions();
    image::RgbImage::from_fn(w, h, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = u16::from(a);
        let blend = |c: u8| ((u16::from(c) * a + 255 * (255 - a) + 127) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/crop/raster.rs"]
mod tests;
