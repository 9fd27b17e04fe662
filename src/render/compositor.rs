use std::collections::HashMap;
use std::fmt;

use crate::assets::color::hex_to_rgba;
use crate::assets::fonts::{FontLibrary, ResolvedFont, TextLayoutEngine};
use crate::assets::source::SourceImage;
use crate::effects::shadow::{ShadowLayer, build_shadow_layer};
use crate::effects::watermark::{
    PreparedWatermark, WatermarkPlacement, prepare_watermark, watermark_placement,
};
use crate::foundation::core::{PixelSize, Rect};
use crate::foundation::error::{WalliError, WalliResult};
use crate::layout::geometry::{Layout, layout_rects};
use crate::render::cpu::{affine_to_cpu, bezpath_to_cpu, rect_to_cpu};
use crate::render::target::RenderTarget;
use crate::scene::style::StyleParameters;

/// One step of the fixed draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Full-target fill with the background color.
    Background,
    /// Blurred silhouette behind the block.
    Shadow,
    /// Border fill of the outer outline.
    Border,
    /// Source image clipped to the inner outline.
    Image,
    /// Watermark text.
    Watermark,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Background => "background",
            Self::Shadow => "shadow",
            Self::Border => "border",
            Self::Image => "image",
            Self::Watermark => "watermark",
        })
    }
}

/// A pass that was abandoned; later passes still ran.
#[derive(Debug)]
pub struct PassFailure {
    pub pass: Pass,
    pub error: WalliError,
}

/// What a render call actually did.
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Passes that drew, in order.
    pub drawn: Vec<Pass>,
    /// Passes that failed, in order.
    pub failures: Vec<PassFailure>,
    /// Block geometry, when an image was present.
    pub layout: Option<Layout>,
    /// Watermark placement, when the watermark was drawn.
    pub watermark: Option<WatermarkPlacement>,
}

impl RenderReport {
    /// `true` if no pass failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// `true` if `pass` drew.
    pub fn drew(&self, pass: Pass) -> bool {
        self.drawn.contains(&pass)
    }

    /// Failure recorded for `pass`, if any.
    pub fn failure(&self, pass: Pass) -> Option<&WalliError> {
        self.failures
            .iter()
            .find(|f| f.pass == pass)
            .map(|f| &f.error)
    }

    fn fail(&mut self, pass: Pass, error: WalliError) {
        tracing::warn!(%pass, error = %error, "render pass failed");
        self.failures.push(PassFailure { pass, error });
    }
}

struct CachedFont {
    resolved: ResolvedFont,
    data: vello_cpu::peniko::FontData,
}

/// Draws a style snapshot into any [`RenderTarget`].
///
/// The same compositor serves the preview and the export; the only difference between the two
/// is the `scale_factor` passed to [`Compositor::render`]. It keeps a rasterizer context, a
/// text shaper and resolved fonts between calls.
pub struct Compositor {
    fonts: FontLibrary,
    text: TextLayoutEngine,
    font_cache: HashMap<String, CachedFont>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl fmt::Debug for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compositor")
            .field("font_faces", &self.fonts.face_count())
            .field("cached_fonts", &self.font_cache.len())
            .finish()
    }
}

impl Compositor {
    pub fn new(fonts: FontLibrary) -> Self {
        Self {
            fonts,
            text: TextLayoutEngine::new(),
            font_cache: HashMap::new(),
            ctx: None,
        }
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// Mutable access to the font library. Drops every cached font resolution.
    pub fn fonts_mut(&mut self) -> &mut FontLibrary {
        self.font_cache.clear();
        &mut self.fonts
    }

    /// Overwrite every pixel of `target` with `style` drawn at `scale_factor`.
    ///
    /// Passes run in the order background, shadow, border, image, watermark. A failing pass is
    /// logged and recorded in the report and queues no drawing; earlier passes stay committed
    /// and later passes still run. Without a `source` only the background is drawn.
    #[tracing::instrument(skip_all, fields(size = %target.pixel_size(), scale_factor = scale_factor))]
    pub fn render(
        &mut self,
        target: &mut dyn RenderTarget,
        style: &StyleParameters,
        source: Option<&SourceImage>,
        scale_factor: f64,
    ) -> RenderReport {
        let mut report = RenderReport::default();
        let size = target.pixel_size();
        let (w, h) = match size.to_u16() {
            Ok(wh) => wh,
            Err(e) => {
                report.fail(Pass::Background, e);
                return report;
            }
        };

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let background = hex_to_rgba(&style.background_color, 100.0);
        ctx.set_paint(background.to_cpu_color());
        ctx.fill_rect(&rect_to_cpu(Rect::from_origin_size(
            (0.0, 0.0),
            size.to_size(),
        )));
        report.drawn.push(Pass::Background);

        if let Some(source) = source {
            self.draw_block(&mut ctx, &mut report, style, source, scale_factor, size);
        }

        ctx.flush();
        let pixmap = target.pixmap_mut();
        pixmap.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(pixmap);
        self.ctx = Some(ctx);

        tracing::debug!(drawn = report.drawn.len(), failed = report.failures.len(), "rendered");
        report
    }

    fn draw_block(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        report: &mut RenderReport,
        style: &StyleParameters,
        source: &SourceImage,
        scale_factor: f64,
        size: PixelSize,
    ) {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            report.fail(
                Pass::Image,
                WalliError::render(format!("scale factor must be finite and > 0, got {scale_factor}")),
            );
            return;
        }

        let layout = layout_rects(style, scale_factor, source.natural_size(), size.to_size());
        report.layout = Some(layout);
        let outer = bezpath_to_cpu(&layout.outer_path());
        let background = hex_to_rgba(&style.background_color, 100.0).to_cpu_color();

        // Shadow
        match build_shadow_layer(&layout.outer_path(), &style.shadow, scale_factor, size) {
            Ok(layer) => {
                if let Some(layer) = layer {
                    draw_shadow_layer(ctx, layer);
                }
                ctx.set_paint(background);
                ctx.fill_path(&outer);
                report.drawn.push(Pass::Shadow);
            }
            Err(e) => report.fail(Pass::Shadow, e),
        }

        // Border
        if style.border.is_active() && layout.effective_border_width > 0.0 {
            ctx.set_paint(hex_to_rgba(&style.border.color, 100.0).to_cpu_color());
            ctx.fill_path(&outer);
            report.drawn.push(Pass::Border);
        }

        // Image
        if layout.has_image_area() {
            let natural = source.natural_size();
            let sx = layout.scaled_image_size.width / natural.width;
            let sy = layout.scaled_image_size.height / natural.height;
            let placement = kurbo::Affine::translate(layout.image_origin.to_vec2())
                * kurbo::Affine::scale_non_uniform(sx, sy);

            ctx.push_clip_layer(&bezpath_to_cpu(&layout.inner_path()));
            ctx.set_transform(affine_to_cpu(placement));
            ctx.set_paint(source.paint());
            ctx.fill_rect(&rect_to_cpu(Rect::from_origin_size((0.0, 0.0), natural)));
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.pop_layer();
            report.drawn.push(Pass::Image);
        }

        // Watermark
        if let Some(placement) = watermark_placement(style, &layout, scale_factor) {
            match self.prepare_watermark_pass(style, &placement) {
                Ok((prepared, font)) => {
                    ctx.set_transform(affine_to_cpu(prepared.transform));
                    ctx.set_paint(prepared.color.to_cpu_color());
                    ctx.glyph_run(&font)
                        .font_size(prepared.font_size)
                        .fill_glyphs(prepared.glyphs.iter().copied());
                    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    report.watermark = Some(placement);
                    report.drawn.push(Pass::Watermark);
                }
                Err(e) => report.fail(Pass::Watermark, e),
            }
        }
    }

    fn prepare_watermark_pass(
        &mut self,
        style: &StyleParameters,
        placement: &WatermarkPlacement,
    ) -> WalliResult<(PreparedWatermark, vello_cpu::peniko::FontData)> {
        let family_list = style.watermark.font_family.as_str();
        if !self.font_cache.contains_key(family_list) {
            let resolved = self.fonts.resolve(family_list)?;
            let data = vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(resolved.data.as_ref().clone()),
                resolved.index,
            );
            tracing::debug!(family_list, family = %resolved.family, "resolved watermark font");
            self.font_cache
                .insert(family_list.to_owned(), CachedFont { resolved, data });
        }
        let cached = self
            .font_cache
            .get(family_list)
            .ok_or_else(|| WalliError::render("font cache lookup failed"))?;

        let prepared = prepare_watermark(&mut self.text, &cached.resolved, style, placement)?;
        Ok((prepared, cached.data.clone()))
    }
}

fn draw_shadow_layer(ctx: &mut vello_cpu::RenderContext, layer: ShadowLayer) {
    let (x, y) = layer.origin;
    ctx.set_transform(affine_to_cpu(kurbo::Affine::translate((
        f64::from(x),
        f64::from(y),
    ))));
    ctx.set_paint(layer.paint);
    ctx.fill_rect(&rect_to_cpu(Rect::from_origin_size(
        (0.0, 0.0),
        layer.size.to_size(),
    )));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
