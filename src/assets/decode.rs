use crate::{
    assets::source::SourceImage,
    foundation::error::{CanvasError, CanvasResult},
    render::raster::Raster,
};

/// Decode a source into a premultiplied raster.
///
/// The format is sniffed from the bytes. A declared media type outside `image/*` is rejected
/// before decoding. Multi-frame formats yield their first frame.
pub fn decode_source(source: &SourceImage) -> CanvasResult<Raster> {
    if let Some(mt) = source.media_type.as_deref()
        && !mt.trim().to_ascii_lowercase().starts_with("image/")
    {
        return Err(CanvasError::decode(format!(
            "'{}' has unsupported media type '{mt}'",
            source.name
        )));
    }
    decode_image(&source.bytes).map_err(|e| match e {
        CanvasError::Decode(msg) => CanvasError::decode(format!("'{}': {msg}", source.name)),
        other => other,
    })
}

pub fn decode_image(bytes: &[u8]) -> CanvasResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| CanvasError::decode(e.to_string()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(CanvasError::invalid_dimensions(format!(
            "decoded image is {width}x{height}"
        )));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    Raster::from_premul(width, height, rgba8_premul)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
