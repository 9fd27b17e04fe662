use crate::foundation::core::PixelSize;

/// Sizing rules for the on-screen preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOpts {
    /// Longest preview side in pixels.
    pub max_footprint: u32,
    /// Floor applied to each preview side.
    pub min_side: u32,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            max_footprint: 400,
            min_side: 50,
        }
    }
}

/// Preview surface size and the factor mapping export pixels onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewScale {
    /// Pixel size of the preview surface.
    pub preview_size: PixelSize,
    /// Preview pixels per export pixel.
    pub scale_factor: f64,
}

/// Fit `canvas_size` into the preview footprint, preserving aspect ratio.
///
/// The long side is reduced to at most `max_footprint` (never enlarged), each side is floored at
/// `min_side`, and the scale factor is the smaller of the two per-axis ratios. An empty canvas
/// falls back to a factor of 1 on a `min_side` square.
pub fn resolve_preview_scale(canvas_size: PixelSize, opts: PreviewOpts) -> PreviewScale {
    if canvas_size.is_empty() {
        return PreviewScale {
            preview_size: PixelSize::new(opts.min_side.max(1), opts.min_side.max(1)),
            scale_factor: 1.0,
        };
    }

    let cw = f64::from(canvas_size.width);
    let ch = f64::from(canvas_size.height);
    let fit = (f64::from(opts.max_footprint) / cw.max(ch)).min(1.0);

    let side = |v: f64| -> u32 { ((v * fit).round() as u32).max(opts.min_side).max(1) };
    let preview_size = PixelSize::new(side(cw), side(ch));
    let scale_factor =
        (f64::from(preview_size.width) / cw).min(f64::from(preview_size.height) / ch);

    PreviewScale {
        preview_size,
        scale_factor,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/scale.rs"]
mod tests;
