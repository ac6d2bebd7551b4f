use super::*;

const EPS: f64 = 1e-9;

#[test]
fn cover_fit_fills_both_axes_and_centres() {
    let p = cover_fit(Size::new(800.0, 600.0), Size::new(1080.0, 1350.0)).unwrap();
    assert!((p.ratio - 2.25).abs() < EPS);
    assert!((p.rect.width() - 1800.0).abs() < EPS);
    assert!((p.rect.height() - 1350.0).abs() < EPS);
    assert!((p.rect.x0 - -360.0).abs() < EPS);
    assert!(p.rect.y0.abs() < EPS);
}

#[test]
fn contain_fit_matches_portrait_scenario() {
    let canvas = Canvas::new(1080, 1350).unwrap();
    let p = foreground_placement(800, 600, canvas, 0).unwrap();
    assert!((p.rect.width() - 1080.0).abs() < EPS);
    assert!((p.rect.height() - 810.0).abs() < EPS);
    assert!(p.rect.x0.abs() < EPS);
    assert!((p.rect.y0 - 270.0).abs() < EPS);
    assert!((canvas.size().height - p.rect.y1 - 270.0).abs() < EPS);
}

#[test]
fn border_becomes_symmetric_margin() {
    let canvas = Canvas::new(1000, 1000).unwrap();
    let p = foreground_placement(500, 500, canvas, 100).unwrap();
    assert_eq!(p.rect, Rect::new(100.0, 100.0, 900.0, 900.0));

    // Wide source: border binds horizontally, centring is against the full canvas.
    let p = foreground_placement(1600, 400, canvas, 100).unwrap();
    assert!((p.rect.x0 - 100.0).abs() < EPS);
    assert!((p.rect.width() - 800.0).abs() < EPS);
    assert!((p.rect.y0 - 400.0).abs() < EPS);
}

#[test]
fn fit_bounds_hold_over_a_grid_of_sizes() {
    let sizes = [1.0, 3.0, 17.0, 640.0, 1080.0, 1350.0, 4000.0];
    for &sw in &sizes {
        for &sh in &sizes {
            for &tw in &sizes {
                for &th in &sizes {
                    let src = Size::new(sw, sh);
                    let tgt = Size::new(tw, th);

                    let cover = cover_fit(src, tgt).unwrap();
                    assert!(cover.rect.width() >= tw - 1e-6);
                    assert!(cover.rect.height() >= th - 1e-6);
                    assert!(cover.rect.x0 <= 1e-6 && cover.rect.y0 <= 1e-6);

                    let contain = contain_fit(src, tgt, 0.0).unwrap();
                    assert!(contain.rect.width() <= tw + 1e-6);
                    assert!(contain.rect.height() <= th + 1e-6);
                    assert!(contain.rect.x0 >= -1e-6 && contain.rect.y0 >= -1e-6);
                }
            }
        }
    }
}

#[test]
fn non_positive_sizes_are_invalid_dimensions() {
    let bad = [
        Size::new(0.0, 10.0),
        Size::new(10.0, -1.0),
        Size::new(f64::NAN, 10.0),
    ];
    for s in bad {
        assert!(matches!(
            cover_fit(s, Size::new(10.0, 10.0)),
            Err(CanvasError::InvalidDimensions(_))
        ));
        assert!(matches!(
            cover_fit(Size::new(10.0, 10.0), s),
            Err(CanvasError::InvalidDimensions(_))
        ));
        assert!(matches!(
            contain_fit(s, Size::new(10.0, 10.0), 0.0),
            Err(CanvasError::InvalidDimensions(_))
        ));
    }
}

#[test]
fn border_consuming_canvas_is_invalid_dimensions() {
    assert!(matches!(
        contain_fit(Size::new(10.0, 10.0), Size::new(100.0, 40.0), 20.0),
        Err(CanvasError::InvalidDimensions(_))
    ));
    assert!(matches!(
        contain_fit(Size::new(10.0, 10.0), Size::new(100.0, 40.0), -1.0),
        Err(CanvasError::InvalidDimensions(_))
    ));
}
