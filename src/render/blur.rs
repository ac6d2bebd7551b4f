use crate::foundation::error::{CanvasError, CanvasResult};

/// Kernel half-width for a Gaussian of standard deviation `sigma` (three sigmas each side).
///
/// Saturates at `u32::MAX`; callers clamp it to the image size.
pub fn kernel_radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    let r = (f64::from(sigma) * 3.0).ceil();
    if r >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        r as u32
    }
}

/// Separable Gaussian blur of a premultiplied RGBA8 buffer.
///
/// Samples past the edges clamp to the nearest edge pixel, so an opaque image stays opaque right
/// up to its border. `sigma <= 0` returns the input unchanged.
pub fn gaussian_blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    sigma: f32,
) -> CanvasResult<Vec<u8>> {
    blur_rgba8_premul(src, width, height, kernel_radius_for_sigma(sigma), sigma)
}

pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CanvasResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CanvasError::invalid_dimensions("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(CanvasError::invalid_dimensions(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }
    // Taps past the longer side only repeat clamped edge pixels.
    let radius = radius.min(width.max(height));

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CanvasResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CanvasError::invalid_option("blur sigma must be > 0"));
    }

    let r = radius as usize;
    let mut weights_f = Vec::<f64>::with_capacity(2 * r + 1);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in 0..=2 * r {
        let x = i.abs_diff(r) as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(CanvasError::invalid_option("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Rounding drift goes to the centre tap so the kernel sums to exactly 1.0 (Q16).
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = k.len() / 2;
    let w = width as usize;
    for y in 0..height as usize {
        let row = y * w;
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = clamp_tap(x, ki, radius, w);
                let idx = (row + sx) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = (row + x) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = k.len() / 2;
    let w = width as usize;
    let h = height as usize;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = clamp_tap(y, ki, radius, h);
                let idx = (sy * w + x) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = (y * w + x) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

/// Index of kernel tap `ki` around `pos`, clamped to `0..len`.
fn clamp_tap(pos: usize, ki: usize, radius: usize, len: usize) -> usize {
    (pos + ki).saturating_sub(radius).min(len - 1)
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
