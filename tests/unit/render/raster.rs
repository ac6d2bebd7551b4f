use super::*;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn solid(w: u32, h: u32, px: [u8; 4]) -> Raster {
    Raster::filled(w, h, Rgba8Premul {
        r: px[0],
        g: px[1],
        b: px[2],
        a: px[3],
    })
    .unwrap()
}

fn near(actual: [u8; 4], expected: [u8; 4], tol: u8) -> bool {
    actual
        .iter()
        .zip(expected)
        .all(|(a, e)| a.abs_diff(e) <= tol)
}

fn px(r: &Raster, x: u32, y: u32) -> [u8; 4] {
    r.pixel(x, y).unwrap()
}

#[test]
fn from_premul_checks_buffer_length() {
    assert!(Raster::from_premul(2, 2, vec![0u8; 15]).is_err());
    let r = Raster::from_premul(2, 2, vec![7u8; 16]).unwrap();
    assert_eq!(r.pixel(1, 1), Some([7, 7, 7, 7]));
}

#[test]
fn pixel_outside_raster_is_none() {
    let r = Raster::new(3, 2).unwrap();
    assert_eq!(r.pixel(2, 1), Some([0; 4]));
    assert_eq!(r.pixel(3, 0), None);
    assert_eq!(r.pixel(0, 2), None);
    assert_eq!(r.pixel(u32::MAX, u32::MAX), None);
}

#[test]
fn draw_image_on_integer_rect_fills_exactly_that_rect() {
    let mut dst = solid(10, 10, BLUE);
    let src = solid(3, 3, RED);
    dst.draw_image(&src, Rect::new(2.0, 2.0, 6.0, 6.0)).unwrap();

    assert!(near(px(&dst, 2, 2), RED, 2));
    assert!(near(px(&dst, 5, 5), RED, 2));
    assert!(near(px(&dst, 1, 2), BLUE, 2));
    assert!(near(px(&dst, 6, 5), BLUE, 2));
}

#[test]
fn draw_image_antialiases_fractional_edges() {
    let mut dst = Raster::new(4, 1).unwrap();
    let src = solid(1, 1, [255, 255, 255, 255]);
    dst.draw_image(&src, Rect::new(0.5, 0.0, 2.0, 1.0)).unwrap();

    let half = px(&dst, 0, 0);
    assert!(half[3] > 96 && half[3] < 160, "{half:?}");
    assert!(near(px(&dst, 1, 0), [255; 4], 2));
    assert_eq!(px(&dst, 2, 0), [0; 4]);
}

#[test]
fn draw_image_crops_overflowing_rect() {
    let mut dst = Raster::new(4, 4).unwrap();
    let src = solid(2, 2, RED);
    dst.draw_image(&src, Rect::new(-10.0, -3.0, 20.0, 9.0)).unwrap();
    assert!(dst.data.chunks_exact(4).all(|p| near([p[0], p[1], p[2], p[3]], RED, 2)));
}

#[test]
fn draw_image_interpolates_between_source_pixels() {
    let src = Raster::from_premul(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
    let mut dst = Raster::new(8, 1).unwrap();
    dst.draw_image(&src, Rect::new(0.0, 0.0, 8.0, 1.0)).unwrap();

    let lum: Vec<u8> = (0..8).map(|x| px(&dst, x, 0)[0]).collect();
    assert!(lum[0] <= 2, "{lum:?}");
    assert!(lum[7] >= 253, "{lum:?}");
    // Bilinear, not nearest: the middle columns land strictly between the two source values.
    assert!(lum[3] > 10 && lum[3] < 245, "{lum:?}");
    assert!(lum[4] > lum[3] && lum[4] < 245, "{lum:?}");
}

#[test]
fn large_downscale_is_prefiltered_and_stays_uniform() {
    let src = solid(400, 300, RED);
    let mut dst = Raster::new(8, 6).unwrap();
    dst.draw_image(&src, Rect::new(0.0, 0.0, 8.0, 6.0)).unwrap();
    assert!(dst.data.chunks_exact(4).all(|p| near([p[0], p[1], p[2], p[3]], RED, 2)));
}

#[test]
fn stroke_rect_is_centred_on_edges_with_square_corners() {
    let mut dst = Raster::new(12, 12).unwrap();
    // Edges at 3 and 9, width 2: band covers [2, 4) and [8, 10) on both axes.
    dst.stroke_rect(Rect::new(3.0, 3.0, 9.0, 9.0), 2.0, Rgb8::WHITE)
        .unwrap();

    for (x, y) in [(2, 6), (3, 6), (8, 6), (9, 6), (6, 2), (6, 9)] {
        assert!(near(px(&dst, x, y), [255; 4], 2), "({x},{y})");
    }
    // Mitered corners are filled to the outer square.
    assert!(near(px(&dst, 2, 2), [255; 4], 2));
    assert!(near(px(&dst, 9, 9), [255; 4], 2));
    // Inside the band and beyond it stay untouched.
    for (x, y) in [(4, 4), (6, 6), (7, 5), (1, 6), (10, 6), (0, 0)] {
        assert_eq!(px(&dst, x, y), [0; 4], "({x},{y})");
    }
}

#[test]
fn stroke_with_zero_width_is_noop() {
    let mut dst = solid(5, 5, BLUE);
    let before = dst.clone();
    dst.stroke_rect(Rect::new(1.0, 1.0, 4.0, 4.0), 0.0, Rgb8::new(255, 0, 0))
        .unwrap();
    assert_eq!(dst, before);
}
