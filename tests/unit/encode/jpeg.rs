use super::*;
use crate::foundation::core::Rgba8Premul;

fn grey(w: u32, h: u32) -> Raster {
    Raster::filled(w, h, Rgba8Premul::from_straight_rgba(128, 128, 128, 255)).unwrap()
}

#[test]
fn quality_maps_onto_codec_scale() {
    assert_eq!(jpeg_quality(1.0).unwrap(), 100);
    assert_eq!(jpeg_quality(0.9).unwrap(), 90);
    assert_eq!(jpeg_quality(0.001).unwrap(), 1);
}

#[test]
fn quality_outside_unit_interval_is_rejected() {
    for q in [0.0, -1.0, 1.5, f32::NAN] {
        assert!(matches!(
            encode_jpeg(&grey(2, 2), q),
            Err(CanvasError::InvalidQuality(_))
        ));
    }
}

#[test]
fn encoded_jpeg_decodes_to_same_size_and_colour() {
    let bytes = encode_jpeg(&grey(33, 17), 0.9).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Jpeg
    );

    let back = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(back.dimensions(), (33, 17));
    let px = back.get_pixel(16, 8);
    for c in 0..3 {
        assert!((i32::from(px[c]) - 128).abs() <= 3, "{px:?}");
    }
}

#[test]
fn lower_quality_does_not_grow_output() {
    let mut data = Vec::new();
    for y in 0..64u32 {
        for x in 0..64u32 {
            data.extend_from_slice(&[(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8, 255]);
        }
    }
    let raster = Raster::from_premul(64, 64, data).unwrap();
    let hi = encode_jpeg(&raster, 1.0).unwrap();
    let lo = encode_jpeg(&raster, 0.2).unwrap();
    assert!(lo.len() < hi.len());
}

#[test]
fn transparent_pixels_flatten_to_black() {
    let raster = Raster::new(8, 8).unwrap();
    let bytes = encode_jpeg(&raster, 1.0).unwrap();
    let back = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert!(back.pixels().all(|p| p.0.iter().all(|&c| c <= 3)));
}
