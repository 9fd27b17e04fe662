//! Shadow blur: three successive box blurs approximating a Gaussian.
//!
//! Each box pass keeps a running window sum, so the cost per pixel does not depend on the blur
//! length.

use crate::foundation::error::{WalliError, WalliResult};

/// Largest distance, in pixels, a blur may spread coverage.
pub(crate) const MAX_BLUR_RADIUS: u32 = 1024;

const BOX_PASSES: usize = 3;

/// Three-sigma reach of a Gaussian, capped at [`MAX_BLUR_RADIUS`].
pub(crate) fn kernel_radius(sigma: f64) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    ((sigma * 3.0).ceil() as u32).min(MAX_BLUR_RADIUS)
}

/// Box radii whose successive passes have a combined variance close to `sigma²`.
///
/// Widths are the two odd integers around the ideal width; the count of narrow boxes is chosen
/// to minimize the variance error.
pub(crate) fn box_radii(sigma: f64) -> [u32; BOX_PASSES] {
    if !sigma.is_finite() || sigma <= 0.0 {
        return [0; BOX_PASSES];
    }
    let sigma = sigma.min(f64::from(MAX_BLUR_RADIUS) / BOX_PASSES as f64);
    let n = BOX_PASSES as f64;
    let var12 = 12.0 * sigma * sigma;

    let ideal = (var12 / n + 1.0).sqrt();
    let mut narrow = ideal.floor() as u32;
    if narrow % 2 == 0 {
        narrow = narrow.saturating_sub(1);
    }
    let narrow = narrow.max(1);
    let wide = narrow + 2;

    let wl = f64::from(narrow);
    let narrow_count = ((var12 - n * wl * wl - 4.0 * n * wl - 3.0 * n) / (-4.0 * wl - 4.0))
        .round()
        .clamp(0.0, n) as usize;

    let mut radii = [0; BOX_PASSES];
    for (i, r) in radii.iter_mut().enumerate() {
        let width = if i < narrow_count { narrow } else { wide };
        *r = (width - 1) / 2;
    }
    radii
}

/// Furthest a blur of `sigma` moves coverage, for sizing scratch regions.
pub(crate) fn blur_reach(sigma: f64) -> u32 {
    let boxes: u32 = box_radii(sigma).iter().sum();
    kernel_radius(sigma).max(boxes)
}

/// Blur premultiplied RGBA8 pixels in place. Edges replicate the border pixel.
pub(crate) fn blur_rgba8_premul_in_place(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    sigma: f64,
) -> WalliResult<()> {
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if pixels.len() != expected {
        return Err(WalliError::render("blur buffer size mismatch"));
    }
    if expected == 0 {
        return Ok(());
    }

    let mut tmp = vec![0u8; expected];
    for radius in box_radii(sigma) {
        if radius == 0 {
            continue;
        }
        box_rows(pixels, &mut tmp, width as usize, height as usize, radius as usize);
        box_columns(&tmp, pixels, width as usize, height as usize, radius as usize);
    }
    Ok(())
}

fn box_rows(src: &[u8], dst: &mut [u8], w: usize, h: usize, r: usize) {
    let span = (2 * r + 1) as u32;
    for y in 0..h {
        let row = y * w * 4;
        for c in 0..4 {
            let at = |x: usize| u32::from(src[row + x.min(w - 1) * 4 + c]);
            let mut sum = (0..=r).map(at).sum::<u32>() + r as u32 * at(0);
            for x in 0..w {
                dst[row + x * 4 + c] = average(sum, span);
                sum += at(x + r + 1);
                sum -= at(x.saturating_sub(r));
            }
        }
    }
}

fn box_columns(src: &[u8], dst: &mut [u8], w: usize, h: usize, r: usize) {
    let span = (2 * r + 1) as u32;
    for x in 0..w {
        for c in 0..4 {
            let at = |y: usize| u32::from(src[(y.min(h - 1) * w + x) * 4 + c]);
            let mut sum = (0..=r).map(at).sum::<u32>() + r as u32 * at(0);
            for y in 0..h {
                dst[(y * w + x) * 4 + c] = average(sum, span);
                sum += at(y + r + 1);
                sum -= at(y.saturating_sub(r));
            }
        }
    }
}

fn average(sum: u32, span: u32) -> u8 {
    ((sum + span / 2) / span).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
