use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{PixelSize, Vec2};
use crate::foundation::error::{WalliError, WalliResult};
use crate::scene::validate::{FieldErrors, validate_style, validate_style_json};

/// Every user-controlled compositing input, passed whole into each render.
///
/// JSON field names are camelCase (`canvasSize`, `imageOffset`, `borderRadiusPercent`, ...).
/// Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleParameters {
    /// Target output resolution.
    pub canvas_size: PixelSize,
    /// Canvas fill as `#rgb` or `#rrggbb`.
    pub background_color: String,
    /// Multiplier on the source image's natural size.
    pub image_scale: f64,
    /// Displacement of the image block from canvas center, in export pixels.
    pub image_offset: Vec2,
    /// Corner rounding as a percentage of the scaled image's shorter side.
    pub border_radius_percent: u32,
    /// Border drawn outward from the image edge.
    pub border: BorderStyle,
    /// Drop shadow behind the bordered block.
    pub shadow: ShadowStyle,
    /// Text stamped near the bottom of the block.
    pub watermark: WatermarkStyle,
}

impl Default for StyleParameters {
    fn default() -> Self {
        Self {
            canvas_size: PixelSize::new(1080, 1350),
            background_color: "#ffffff".to_owned(),
            image_scale: 1.0,
            image_offset: Vec2::ZERO,
            border_radius_percent: 0,
            border: BorderStyle::default(),
            shadow: ShadowStyle::default(),
            watermark: WatermarkStyle::default(),
        }
    }
}

/// Border settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderStyle {
    /// Draw the border at all.
    pub enabled: bool,
    /// Width in export pixels, `0..=30`.
    pub width_px: f64,
    /// Border fill as a hex color.
    pub color: String,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            width_px: 4.0,
            color: "#ffffff".to_owned(),
        }
    }
}

/// Drop shadow settings, in export pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowStyle {
    /// Horizontal offset.
    pub offset_x: f64,
    /// Vertical offset.
    pub offset_y: f64,
    /// Blur amount (canvas `shadowBlur` convention).
    pub blur_px: f64,
    /// Shadow opacity, `0..=100`.
    pub opacity_percent: f64,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 4.0,
            blur_px: 8.0,
            opacity_percent: 20.0,
        }
    }
}

/// Horizontal watermark anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkPosition {
    /// Anchored at the left inner edge.
    Left,
    /// Centered on the block.
    Center,
    /// Anchored at the right inner edge.
    #[default]
    Right,
}

/// Watermark settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WatermarkStyle {
    /// Draw the watermark at all.
    pub enabled: bool,
    /// Text to draw; empty disables the watermark.
    pub text: String,
    /// Text opacity, `0..=100`.
    pub opacity_percent: f64,
    /// Font size as a percentage of the scaled image height, `1..=15`.
    pub size_percent: f64,
    /// Text color as a hex color.
    pub color: String,
    /// CSS-style family list.
    pub font_family: String,
    /// Horizontal anchor.
    pub position: WatermarkPosition,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            enabled: false,
            text: String::new(),
            opacity_percent: 50.0,
            size_percent: 5.0,
            color: "#ffffff".to_owned(),
            font_family: "Arial, sans-serif".to_owned(),
            position: WatermarkPosition::Right,
        }
    }
}

impl BorderStyle {
    /// `true` when the border contributes any width.
    pub fn is_active(&self) -> bool {
        self.enabled && self.width_px > 0.0
    }
}

impl WatermarkStyle {
    /// `true` when the watermark is enabled and has text.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.text.is_empty()
    }
}

impl StyleParameters {
    /// Parse style parameters from a JSON reader.
    ///
    /// Non-integer canvas dimensions are reported as field errors rather than a generic parse
    /// failure.
    pub fn from_reader<R: std::io::Read>(r: R) -> WalliResult<Self> {
        let value: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| WalliError::serde(format!("parse style JSON: {e}")))?;
        Self::from_json_value(value)
    }

    /// Parse style parameters from an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> WalliResult<Self> {
        let pre = validate_style_json(&value);
        if !pre.is_empty() {
            return Err(WalliError::validation(FieldErrors { errors: pre }.to_string()));
        }
        serde_json::from_value(value)
            .map_err(|e| WalliError::serde(format!("decode style parameters: {e}")))
    }

    /// Parse style parameters from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> WalliResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            WalliError::validation(format!("open style JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> WalliResult<()> {
        let errors = validate_style(self);
        if errors.is_empty() {
            return Ok(());
        }
        Err(WalliError::validation(FieldErrors { errors }.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/style.rs"]
mod tests;
