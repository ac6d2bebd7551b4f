use crate::foundation::{
    core::{Canvas, Rgb8},
    error::{CanvasError, CanvasResult},
};

/// Fraction of the larger canvas side that `outer_border` may reserve.
pub const OUTER_BORDER_CAP_RATIO: f64 = 0.125;
/// Fraction of the larger canvas side that `stroke_width` may use.
pub const STROKE_WIDTH_CAP_RATIO: f64 = 0.05;
/// Largest accepted `blur_radius` (Gaussian sigma, output pixels).
pub const MAX_BLUR_RADIUS: f32 = 256.0;

/// Shared parameter snapshot for one batch run.
///
/// The value is `Copy`; a run captures it once and passes it explicitly through every stage, so
/// later edits by the caller never leak into an in-flight run. Canvas changes should go through
/// [`ProcessingOptions::with_canvas`] so the border and stroke caps are re-derived.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingOptions {
    pub canvas: Canvas,
    /// Gaussian standard deviation of the background blur, in output pixels.
    pub blur_radius: f32,
    /// Colour wash opacity in percent (0..=100).
    pub overlay_opacity: u8,
    pub overlay_color: Rgb8,
    /// Encoder quality in `(0, 1]`.
    pub quality: f32,
    /// Margin reserved on every side of the foreground fit box.
    pub outer_border: u32,
    pub stroke_width: u32,
    pub stroke_color: Rgb8,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1080,
                height: 1350,
            },
            blur_radius: 8.0,
            overlay_opacity: 80,
            overlay_color: Rgb8::BLACK,
            quality: 1.0,
            outer_border: 0,
            stroke_width: 0,
            stroke_color: Rgb8::WHITE,
        }
    }
}

impl ProcessingOptions {
    /// Largest `outer_border` allowed for `canvas`.
    pub fn outer_border_cap(canvas: Canvas) -> u32 {
        (f64::from(canvas.max_dimension()) * OUTER_BORDER_CAP_RATIO).floor() as u32
    }

    /// Largest `stroke_width` allowed for `canvas`.
    pub fn stroke_width_cap(canvas: Canvas) -> u32 {
        (f64::from(canvas.max_dimension()) * STROKE_WIDTH_CAP_RATIO).floor() as u32
    }

    /// Copy with a new canvas; border and stroke are clamped to the caps of the new size.
    pub fn with_canvas(self, canvas: Canvas) -> Self {
        Self {
            canvas,
            ..self
        }
        .clamped()
    }

    /// Copy with `outer_border` and `stroke_width` clamped to the current canvas caps.
    pub fn clamped(self) -> Self {
        let border_cap = Self::outer_border_cap(self.canvas);
        let stroke_cap = Self::stroke_width_cap(self.canvas);
        if self.outer_border > border_cap {
            tracing::debug!(
                from = self.outer_border,
                to = border_cap,
                "clamping outer border to canvas cap"
            );
        }
        if self.stroke_width > stroke_cap {
            tracing::debug!(
                from = self.stroke_width,
                to = stroke_cap,
                "clamping stroke width to canvas cap"
            );
        }
        Self {
            outer_border: self.outer_border.min(border_cap),
            stroke_width: self.stroke_width.min(stroke_cap),
            ..self
        }
    }

    /// Overlay opacity as a 0..=255 alpha value.
    pub fn overlay_alpha(&self) -> u8 {
        ((f32::from(self.overlay_opacity.min(100)) / 100.0) * 255.0).round() as u8
    }

    /// Check every field once, before a run starts.
    pub fn validate(&self) -> CanvasResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;

        if !self.quality.is_finite() || self.quality <= 0.0 || self.quality > 1.0 {
            return Err(CanvasError::invalid_quality(format!(
                "quality must be in (0, 1], got {}",
                self.quality
            )));
        }
        if !(0.0..=MAX_BLUR_RADIUS).contains(&self.blur_radius) {
            return Err(CanvasError::invalid_option(format!(
                "blur_radius must be in 0..={MAX_BLUR_RADIUS}, got {}",
                self.blur_radius
            )));
        }
        if self.overlay_opacity > 100 {
            return Err(CanvasError::invalid_option(format!(
                "overlay_opacity must be in 0..=100, got {}",
                self.overlay_opacity
            )));
        }

        let border_cap = Self::outer_border_cap(self.canvas);
        if self.outer_border > border_cap {
            return Err(CanvasError::invalid_option(format!(
                "outer_border {} exceeds cap {border_cap} for {}x{} canvas",
                self.outer_border, self.canvas.width, self.canvas.height
            )));
        }

        let stroke_cap = Self::stroke_width_cap(self.canvas);
        if self.stroke_width > stroke_cap {
            return Err(CanvasError::invalid_option(format!(
                "stroke_width {} exceeds cap {stroke_cap} for {}x{} canvas",
                self.stroke_width, self.canvas.width, self.canvas.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/options/model.rs"]
mod tests;
