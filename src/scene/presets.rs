use crate::foundation::core::PixelSize;
use crate::foundation::error::{WalliError, WalliResult};
use crate::scene::validate::{MAX_CANVAS_SIDE, MIN_CANVAS_SIDE};

/// A named canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DimensionPreset {
    /// Display name.
    pub name: &'static str,
    /// Grouping shown in listings.
    pub category: &'static str,
    /// Canvas size.
    pub size: PixelSize,
}

const fn preset(name: &'static str, category: &'static str, w: u32, h: u32) -> DimensionPreset {
    DimensionPreset {
        name,
        category,
        size: PixelSize::new(w, h),
    }
}

/// Built-in canvas presets, in display order.
pub const DIMENSION_PRESETS: &[DimensionPreset] = &[
    preset("Instagram Post", "Social Media", 1080, 1080),
    preset("Instagram Story", "Social Media", 1080, 1920),
    preset("Facebook Post", "Social Media", 1200, 630),
    preset("Twitter Post", "Social Media", 1200, 675),
    preset("YouTube Thumbnail", "Video", 1280, 720),
    preset("HD (1080p)", "Video", 1920, 1080),
    preset("4K UHD", "Video", 3840, 2160),
    preset("A4 Print", "Print", 2480, 3508),
    preset("US Letter", "Print", 2550, 3300),
];

/// Find a preset by name, ignoring ASCII case.
pub fn find_preset(name: &str) -> Option<&'static DimensionPreset> {
    DIMENSION_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

/// Presets grouped by category, categories in first-seen order.
pub fn grouped_presets() -> Vec<(&'static str, Vec<&'static DimensionPreset>)> {
    let mut out: Vec<(&'static str, Vec<&'static DimensionPreset>)> = Vec::new();
    for p in DIMENSION_PRESETS {
        match out.iter_mut().find(|(c, _)| *c == p.category) {
            Some((_, v)) => v.push(p),
            None => out.push((p.category, vec![p])),
        }
    }
    out
}

/// Height for `width` at `ratio` (width / height), clamped to the canvas bounds.
pub fn apply_aspect_ratio(width: u32, ratio: f64) -> WalliResult<u32> {
    if width == 0 {
        return Err(WalliError::validation(
            "cannot set aspect ratio: current width is invalid",
        ));
    }
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(WalliError::validation("aspect ratio must be finite and > 0"));
    }
    let h = (f64::from(width) / ratio).round();
    Ok((h as u32).clamp(MIN_CANVAS_SIDE, MAX_CANVAS_SIDE))
}

/// Parse `"16:9"`-style ratios into width / height.
pub fn parse_aspect_ratio(s: &str) -> WalliResult<f64> {
    let (w, h) = s
        .split_once(':')
        .ok_or_else(|| WalliError::validation(format!("aspect ratio \"{s}\" must be W:H")))?;
    let parse = |part: &str| -> WalliResult<f64> {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| WalliError::validation(format!("invalid aspect ratio \"{s}\"")))
    };
    Ok(parse(w)? / parse(h)?)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/presets.rs"]
mod tests;
