use image::codecs::jpeg::JpegEncoder;

use crate::{
    foundation::error::{CanvasError, CanvasResult},
    render::raster::Raster,
};

/// Extension of every encoded output (without the dot).
pub const OUTPUT_EXTENSION: &str = "jpg";
/// Media type of every encoded output.
pub const OUTPUT_MEDIA_TYPE: &str = "image/jpeg";

/// Map a `(0, 1]` quality factor onto the JPEG codec's 1..=100 scale.
pub fn jpeg_quality(quality: f32) -> CanvasResult<u8> {
    if !quality.is_finite() || quality <= 0.0 || quality > 1.0 {
        return Err(CanvasError::invalid_quality(format!(
            "quality must be in (0, 1], got {quality}"
        )));
    }
    Ok(((quality * 100.0).round() as u8).clamp(1, 100))
}

/// Encode a premultiplied raster as baseline JPEG.
///
/// JPEG has no alpha channel; the premultiplied colour channels are written as-is, which is the
/// raster flattened over black.
pub fn encode_jpeg(raster: &Raster, quality: f32) -> CanvasResult<Vec<u8>> {
    let q = jpeg_quality(quality)?;
    if raster.width == 0 || raster.height == 0 {
        return Err(CanvasError::invalid_dimensions(format!(
            "cannot encode a {}x{} raster",
            raster.width, raster.height
        )));
    }
    if raster.width > u32::from(u16::MAX) || raster.height > u32::from(u16::MAX) {
        return Err(CanvasError::encode(format!(
            "{}x{} exceeds the JPEG size limit",
            raster.width, raster.height
        )));
    }

    let rgb: Vec<u8> = raster
        .data
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, q);
    encoder
        .encode(
            &rgb,
            raster.width,
            raster.height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CanvasError::encode(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
