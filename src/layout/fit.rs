use crate::foundation::{
    core::{Canvas, Point, Rect, Size},
    error::{CanvasError, CanvasResult},
};

/// Placement of a scaled source inside a target box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitPlacement {
    /// Uniform scale applied to the source.
    pub ratio: f64,
    /// Destination rectangle in canvas coordinates (may extend past the canvas for cover-fit).
    pub rect: Rect,
}

impl FitPlacement {
    pub fn size(&self) -> Size {
        self.rect.size()
    }
}

/// Scale-to-fill `target`, centred. One axis may overflow; the canvas bounds crop it.
pub fn cover_fit(source: Size, target: Size) -> CanvasResult<FitPlacement> {
    check_size("source", source)?;
    check_size("target", target)?;

    let ratio = (target.width / source.width).max(target.height / source.height);
    Ok(centred(source, ratio, target))
}

/// Scale-to-fit inside `canvas` shrunk by `border` on every side, centred in the full canvas.
pub fn contain_fit(source: Size, canvas: Size, border: f64) -> CanvasResult<FitPlacement> {
    check_size("source", source)?;
    check_size("canvas", canvas)?;
    if !border.is_finite() || border < 0.0 {
        return Err(CanvasError::invalid_dimensions(format!(
            "border must be >= 0, got {border}"
        )));
    }

    let available = Size::new(canvas.width - border * 2.0, canvas.height - border * 2.0);
    check_size("available box", available)?;

    let ratio = (available.width / source.width).min(available.height / source.height);
    Ok(centred(source, ratio, canvas))
}

/// Cover-fit of `source_w x source_h` onto the whole canvas.
pub fn background_placement(
    source_w: u32,
    source_h: u32,
    canvas: Canvas,
) -> CanvasResult<FitPlacement> {
    cover_fit(
        Size::new(f64::from(source_w), f64::from(source_h)),
        canvas.size(),
    )
}

/// Contain-fit of `source_w x source_h` inside the canvas minus `outer_border`.
pub fn foreground_placement(
    source_w: u32,
    source_h: u32,
    canvas: Canvas,
    outer_border: u32,
) -> CanvasResult<FitPlacement> {
    contain_fit(
        Size::new(f64::from(source_w), f64::from(source_h)),
        canvas.size(),
        f64::from(outer_border),
    )
}

fn centred(source: Size, ratio: f64, container: Size) -> FitPlacement {
    let scaled = Size::new(source.width * ratio, source.height * ratio);
    let origin = Point::new(
        (container.width - scaled.width) * 0.5,
        (container.height - scaled.height) * 0.5,
    );
    FitPlacement {
        ratio,
        rect: Rect::from_origin_size(origin, scaled),
    }
}

fn check_size(what: &str, size: Size) -> CanvasResult<()> {
    let ok = size.width.is_finite() && size.height.is_finite();
    if !ok || size.width <= 0.0 || size.height <= 0.0 {
        return Err(CanvasError::invalid_dimensions(format!(
            "{what} must be positive, got {}x{}",
            size.width, size.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
