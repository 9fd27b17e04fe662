use crate::assets::color::{RgbaColor, hex_to_rgba};
use crate::assets::fonts::{ResolvedFont, TextBrushRgba8, TextLayoutEngine};
use crate::foundation::core::Point;
use crate::foundation::error::{WalliError, WalliResult};
use crate::layout::geometry::Layout;
use crate::scene::style::{StyleParameters, WatermarkPosition};

/// Smallest watermark font size, in export pixels.
pub const MIN_WATERMARK_FONT_PX: f64 = 8.0;

/// Where and how large the watermark text goes, in target pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatermarkPlacement {
    /// Font size in target pixels.
    pub font_size: f64,
    /// Gap between the text and the block's inner edges.
    pub padding: f64,
    /// Horizontal anchor and the y at which the bottom of the text sits.
    pub anchor: Point,
    /// Which edge `anchor.x` refers to.
    pub position: WatermarkPosition,
}

/// Placement of the watermark for `style` over `layout`, or `None` when nothing is drawn.
///
/// Nothing is drawn when the watermark is disabled, its text is empty, the block has no height,
/// or the anchor leaves the band between the image top and one font size below the image
/// bottom.
pub fn watermark_placement(
    style: &StyleParameters,
    layout: &Layout,
    scale_factor: f64,
) -> Option<WatermarkPlacement> {
    let wm = &style.watermark;
    if !wm.is_active() || !(layout.total_size.height > 0.0) {
        return None;
    }

    let font_size = (MIN_WATERMARK_FONT_PX * scale_factor)
        .max(layout.scaled_image_size.height * wm.size_percent / 100.0);
    let padding = font_size * 0.5;
    let border = layout.effective_border_width;
    let origin = layout.outer_origin;
    let total = layout.total_size;

    let x = match wm.position {
        WatermarkPosition::Left => origin.x + padding + border,
        WatermarkPosition::Right => origin.x + total.width - padding - border,
        WatermarkPosition::Center => origin.x + total.width / 2.0,
    };
    let y = origin.y + total.height - padding;

    let top = layout.image_origin.y;
    let bottom = top + layout.scaled_image_size.height + font_size;
    if !(y >= top && y <= bottom) {
        tracing::debug!(y, top, bottom, "watermark anchor outside block; skipped");
        return None;
    }

    Some(WatermarkPlacement {
        font_size,
        padding,
        anchor: Point::new(x, y),
        position: wm.position,
    })
}

/// Watermark text shaped and positioned, ready for glyph filling.
pub(crate) struct PreparedWatermark {
    pub(crate) font_size: f32,
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
    pub(crate) transform: kurbo::Affine,
    pub(crate) color: RgbaColor,
}

/// Single-line text to draw; line breaks become spaces.
pub(crate) fn watermark_text(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

/// Shape the watermark text and align it to `placement`.
pub(crate) fn prepare_watermark(
    engine: &mut TextLayoutEngine,
    font: &ResolvedFont,
    style: &StyleParameters,
    placement: &WatermarkPlacement,
) -> WalliResult<PreparedWatermark> {
    let wm = &style.watermark;
    let color = hex_to_rgba(&wm.color, wm.opacity_percent);
    let [r, g, b, a] = color.to_rgba8();
    let text = watermark_text(&wm.text);
    let font_size = placement.font_size as f32;

    let layout = engine.layout_line(&text, font, font_size, TextBrushRgba8 { r, g, b, a })?;
    let line = layout
        .lines()
        .next()
        .ok_or_else(|| WalliError::render("watermark text produced no line"))?;
    let metrics = line.metrics();
    let bottom = f64::from(metrics.baseline + metrics.descent);

    let mut glyphs = Vec::new();
    for item in line.items() {
        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
            continue;
        };
        glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        }));
    }

    let width = f64::from(layout.width());
    let left = match placement.position {
        WatermarkPosition::Left => placement.anchor.x,
        WatermarkPosition::Center => placement.anchor.x - width / 2.0,
        WatermarkPosition::Right => placement.anchor.x - width,
    };
    let transform = kurbo::Affine::translate((left, placement.anchor.y - bottom));

    Ok(PreparedWatermark {
        font_size,
        glyphs,
        transform,
        color,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/watermark.rs"]
mod tests;
