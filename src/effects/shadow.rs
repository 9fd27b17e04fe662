use kurbo::Shape as _;

use crate::assets::color::RgbaColor;
use crate::effects::blur::{blur_reach, blur_rgba8_premul_in_place};
use crate::foundation::core::{BezPath, PixelSize, Rect, Vec2};
use crate::foundation::error::WalliResult;
use crate::render::cpu::{affine_to_cpu, bezpath_to_cpu, image_paint};
use crate::scene::style::ShadowStyle;

/// Pre-blurred drop shadow, ready to be drawn at `origin` in target pixels.
pub(crate) struct ShadowLayer {
    pub(crate) origin: (u32, u32),
    pub(crate) size: PixelSize,
    pub(crate) paint: vello_cpu::Image,
}

impl std::fmt::Debug for ShadowLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowLayer")
            .field("origin", &self.origin)
            .field("size", &self.size)
            .finish()
    }
}

/// Shadow color: black at the configured opacity.
pub fn shadow_color(shadow: &ShadowStyle) -> RgbaColor {
    let opacity = if shadow.opacity_percent.is_finite() {
        shadow.opacity_percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    RgbaColor::new(0, 0, 0, opacity / 100.0)
}

/// Gaussian standard deviation matching a blur length of `blur_px`.
pub fn shadow_sigma(blur_px: f64) -> f64 {
    if blur_px.is_finite() {
        blur_px.max(0.0) / 2.0
    } else {
        0.0
    }
}

/// Target-pixel region a shadow of `outline` touches, clipped to the target.
///
/// `None` when the shadow falls entirely outside the target.
pub(crate) fn shadow_region(
    outline: &BezPath,
    offset: Vec2,
    sigma: f64,
    target: PixelSize,
) -> Option<(u32, u32, PixelSize)> {
    let reach = f64::from(blur_reach(sigma));
    let bbox = (outline.bounding_box() + offset).inflate(reach, reach);
    let clipped = bbox
        .intersect(Rect::new(
            0.0,
            0.0,
            f64::from(target.width),
            f64::from(target.height),
        ))
        .expand();
    if !(clipped.width() > 0.0 && clipped.height() > 0.0) {
        return None;
    }
    let x0 = clipped.x0.max(0.0) as u32;
    let y0 = clipped.y0.max(0.0) as u32;
    let x1 = (clipped.x1 as u32).min(target.width);
    let y1 = (clipped.y1 as u32).min(target.height);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((x0, y0, PixelSize::new(x1 - x0, y1 - y0)))
}

/// Rasterize and blur the silhouette of `outline` for the shadow pass.
///
/// Offsets and blur are in export pixels and get multiplied by `scale_factor`. Returns `None`
/// when the shadow is fully transparent or lands outside the target.
pub(crate) fn build_shadow_layer(
    outline: &BezPath,
    shadow: &ShadowStyle,
    scale_factor: f64,
    target: PixelSize,
) -> WalliResult<Option<ShadowLayer>> {
    let color = shadow_color(shadow);
    if color.alpha_u8() == 0 {
        return Ok(None);
    }
    let offset = Vec2::new(
        finite_or_zero(shadow.offset_x) * scale_factor,
        finite_or_zero(shadow.offset_y) * scale_factor,
    );
    let sigma = shadow_sigma(shadow.blur_px) * scale_factor;

    let Some((x0, y0, size)) = shadow_region(outline, offset, sigma, target) else {
        return Ok(None);
    };
    let (w, h) = size.to_u16()?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(affine_to_cpu(kurbo::Affine::translate((
        offset.x - f64::from(x0),
        offset.y - f64::from(y0),
    ))));
    ctx.set_paint(color.to_cpu_color());
    ctx.fill_path(&bezpath_to_cpu(outline));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    blur_rgba8_premul_in_place(pixmap.data_as_u8_slice_mut(), size.width, size.height, sigma)?;

    Ok(Some(ShadowLayer {
        origin: (x0, y0),
        size,
        paint: image_paint(pixmap),
    }))
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
