use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{CardError, CardResult};

/// Decode encoded image bytes (any format the `image` crate recognises).
pub fn decode_image(bytes: &[u8]) -> CardResult<image::DynamicImage> {
    image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| CardError::decode(format!("{e:#}")))
}

/// Read pixel dimensions from the image header without decoding pixel data.
pub fn probe_dimensions(bytes: &[u8]) -> CardResult<(u32, u32)> {
    let (w, h) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("guess image format")
        .and_then(|r| r.into_dimensions().context("read image dimensions"))
        .map_err(|e| CardError::decode(format!("{e:#}")))?;
    if w == 0 || h == 0 {
        return Err(CardError::decode("image has zero width or height"));
    }
    Ok((w, h))
}

/// MIME type sniffed from magic bytes, if the format is recognised.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|f| f.to_mime_type())
}

/// Encode an RGBA8 buffer as PNG.
pub fn encode_png(img: &image::RgbaImage) -> CardResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| CardError::render(format!("encode png: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
