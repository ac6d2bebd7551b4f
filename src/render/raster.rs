use std::sync::Arc;

use image::imageops::FilterType;

use crate::{
    foundation::{
        core::{Canvas, Rect, Rgb8, Rgba8Premul},
        error::{CanvasError, CanvasResult},
    },
    render::composite::over,
};

/// Below this scale factor a source is tent-filtered before the image paint samples it.
const PREFILTER_BELOW_SCALE: f64 = 0.5;

/// Premultiplied RGBA8 pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    pub fn for_canvas(canvas: Canvas) -> CanvasResult<Self> {
        Self::new(canvas.width, canvas.height)
    }

    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> CanvasResult<Self> {
        if data.len() != byte_len(width, height)? {
            return Err(CanvasError::invalid_dimensions(format!(
                "raster buffer of {} bytes does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Raster filled with one colour.
    pub fn filled(width: u32, height: u32, color: Rgba8Premul) -> CanvasResult<Self> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: color.to_array().repeat(len / 4),
        })
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Draw `src` scaled into `dest` (canvas coordinates, fractional allowed) with source-over.
    ///
    /// The source is an image paint sampled bilinearly; edge pixels are anti-aliased by the
    /// rasterizer. Parts of `dest` outside the raster are cropped.
    pub fn draw_image(&mut self, src: &Raster, dest: Rect) -> CanvasResult<()> {
        if src.width == 0 || src.height == 0 || dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }

        let prefiltered = prefilter_for(src, dest)?;
        let sample_src = prefiltered.as_ref().unwrap_or(src);
        let paint = image_paint(sample_src)?;

        let (w, h) = (f64::from(sample_src.width), f64::from(sample_src.height));
        let transform = vello_cpu::kurbo::Affine::translate((dest.x0, dest.y0))
            * vello_cpu::kurbo::Affine::scale_non_uniform(dest.width() / w, dest.height() / h);

        self.render_layer(|ctx| {
            ctx.set_transform(transform);
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        })
    }

    /// Stroke the outline of `rect` with mitered corners, centred on the rect's edges.
    pub fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgb8) -> CanvasResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Ok(());
        }

        let stroke =
            vello_cpu::kurbo::Stroke::new(width).with_join(vello_cpu::kurbo::Join::Miter);
        self.render_layer(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_stroke(stroke);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, 255));
            ctx.stroke_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
        })
    }

    /// Rasterize `draw` into a transparent layer of this size and blend it over `self`.
    fn render_layer(
        &mut self,
        draw: impl FnOnce(&mut vello_cpu::RenderContext),
    ) -> CanvasResult<()> {
        let (w, h) = pixmap_size(self.width, self.height)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        draw(&mut ctx);
        ctx.flush();

        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);

        for (d, s) in self
            .data
            .chunks_exact_mut(4)
            .zip(layer.data_as_u8_slice().chunks_exact(4))
        {
            if s[3] == 0 {
                continue;
            }
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 1.0);
            d.copy_from_slice(&out);
        }
        Ok(())
    }
}

fn byte_len(width: u32, height: u32) -> CanvasResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CanvasError::invalid_dimensions("raster size overflow"))
}

fn pixmap_size(width: u32, height: u32) -> CanvasResult<(u16, u16)> {
    let w: u16 = width.try_into().map_err(|_| {
        CanvasError::invalid_dimensions(format!("raster width {width} exceeds u16"))
    })?;
    let h: u16 = height.try_into().map_err(|_| {
        CanvasError::invalid_dimensions(format!("raster height {height} exceeds u16"))
    })?;
    Ok((w, h))
}

/// Image paint over a copy of `src`'s premultiplied pixels.
fn image_paint(src: &Raster) -> CanvasResult<vello_cpu::Image> {
    let (w, h) = pixmap_size(src.width, src.height)?;
    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(src.width as usize * src.height as usize);
    for px in src.data.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        });
    }
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Tent-filtered copy of `src` near the destination size, when bilinear alone would alias.
fn prefilter_for(src: &Raster, dest: Rect) -> CanvasResult<Option<Raster>> {
    let scale_x = dest.width() / f64::from(src.width);
    let scale_y = dest.height() / f64::from(src.height);
    if scale_x >= PREFILTER_BELOW_SCALE && scale_y >= PREFILTER_BELOW_SCALE {
        return Ok(None);
    }

    let target_w = (dest.width().ceil() as u32).clamp(1, src.width);
    let target_h = (dest.height().ceil() as u32).clamp(1, src.height);
    let buf = image::RgbaImage::from_raw(src.width, src.height, src.data.clone())
        .ok_or_else(|| CanvasError::invalid_dimensions("raster buffer does not match its size"))?;
    let resized = image::imageops::resize(&buf, target_w, target_h, FilterType::Triangle);
    tracing::trace!(
        from_w = src.width,
        from_h = src.height,
        to_w = target_w,
        to_h = target_h,
        "prefiltered source before sampling"
    );
    Raster::from_premul(target_w, target_h, resized.into_raw()).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
