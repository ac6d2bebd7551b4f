use crate::{
    foundation::error::CanvasResult,
    layout::fit::{FitPlacement, background_placement, foreground_placement},
    options::model::ProcessingOptions,
    render::{blur::gaussian_blur_rgba8_premul, composite::fill_over_in_place, raster::Raster},
};

/// One step of the compositing pipeline.
///
/// Passes always run in [`PASS_ORDER`]; the stroke must land before the foreground so the
/// foreground hides the inner half of the outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompositePass {
    /// Blurred cover-fit copy of the source over the whole canvas.
    Background,
    /// Solid colour wash at `overlay_opacity`.
    Overlay,
    /// Mitered outline just outside the foreground box.
    Stroke,
    /// Unblurred contain-fit copy of the source.
    Foreground,
}

/// Fixed pass order.
pub const PASS_ORDER: [CompositePass; 4] = [
    CompositePass::Background,
    CompositePass::Overlay,
    CompositePass::Stroke,
    CompositePass::Foreground,
];

/// Composite `source` onto a `canvas.width x canvas.height` raster using all four passes.
pub fn composite(source: &Raster, opts: &ProcessingOptions) -> CanvasResult<Raster> {
    composite_passes(source, opts, &PASS_ORDER)
}

/// Composite with only the passes listed in `enabled`, still in [`PASS_ORDER`].
pub fn composite_passes(
    source: &Raster,
    opts: &ProcessingOptions,
    enabled: &[CompositePass],
) -> CanvasResult<Raster> {
    let background = background_placement(source.width, source.height, opts.canvas)?;
    let foreground =
        foreground_placement(source.width, source.height, opts.canvas, opts.outer_border)?;
    tracing::debug!(
        src_w = source.width,
        src_h = source.height,
        cover = ?background.rect,
        contain = ?foreground.rect,
        "resolved placements"
    );

    let mut out = Raster::for_canvas(opts.canvas)?;
    for pass in PASS_ORDER.iter().filter(|p| enabled.contains(*p)) {
        match pass {
            CompositePass::Background => background_pass(&mut out, source, background, opts)?,
            CompositePass::Overlay => overlay_pass(&mut out, opts),
            CompositePass::Stroke => stroke_pass(&mut out, foreground, opts)?,
            CompositePass::Foreground => foreground_pass(&mut out, source, foreground)?,
        }
    }
    Ok(out)
}

fn background_pass(
    out: &mut Raster,
    source: &Raster,
    placement: FitPlacement,
    opts: &ProcessingOptions,
) -> CanvasResult<()> {
    out.draw_image(source, placement.rect)?;
    if opts.blur_radius > 0.0 {
        out.data = gaussian_blur_rgba8_premul(&out.data, out.width, out.height, opts.blur_radius)?;
    }
    Ok(())
}

fn overlay_pass(out: &mut Raster, opts: &ProcessingOptions) {
    let wash = opts.overlay_color.premul_with_alpha(opts.overlay_alpha());
    fill_over_in_place(&mut out.data, wash);
}

fn stroke_pass(
    out: &mut Raster,
    placement: FitPlacement,
    opts: &ProcessingOptions,
) -> CanvasResult<()> {
    if opts.stroke_width == 0 {
        return Ok(());
    }
    // Centreline sits stroke_width/2 outside the foreground edge; the inner edge touches it.
    let width = f64::from(opts.stroke_width);
    let outline = placement.rect.inflate(width / 2.0, width / 2.0);
    out.stroke_rect(outline, width, opts.stroke_color)
}

fn foreground_pass(out: &mut Raster, source: &Raster, placement: FitPlacement) -> CanvasResult<()> {
    out.draw_image(source, placement.rect)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
