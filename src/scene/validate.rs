use std::fmt;

use crate::assets::color::is_valid_hex;
use crate::scene::style::StyleParameters;

/// Smallest accepted canvas side.
pub const MIN_CANVAS_SIDE: u32 = 10;
/// Largest accepted canvas side.
pub const MAX_CANVAS_SIDE: u32 = 8000;

const HEX_MESSAGE: &str = "Invalid hex (#xxx or #xxxxxx)";

/// A single invalid field, addressed by its camelCase JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path, e.g. `canvasSize.height`.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    fn at(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collection of field errors, one per line when displayed.
#[derive(Debug, Clone)]
pub struct FieldErrors {
    /// Individual failures in field order.
    pub errors: Vec<FieldError>,
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

fn check_canvas_side(errors: &mut Vec<FieldError>, field: &'static str, v: u32) {
    if v < MIN_CANVAS_SIDE {
        errors.push(FieldError::at(field, format!("Min {MIN_CANVAS_SIDE}px")));
    } else if v > MAX_CANVAS_SIDE {
        errors.push(FieldError::at(field, format!("Max {MAX_CANVAS_SIDE}px")));
    }
}

fn check_hex(errors: &mut Vec<FieldError>, field: &'static str, v: &str) {
    if !is_valid_hex(v) {
        errors.push(FieldError::at(field, HEX_MESSAGE));
    }
}

fn check_range(errors: &mut Vec<FieldError>, field: &'static str, v: f64, min: f64, max: f64) {
    if !v.is_finite() || v < min || v > max {
        errors.push(FieldError::at(
            field,
            format!("must be between {min} and {max}"),
        ));
    }
}

fn check_finite(errors: &mut Vec<FieldError>, field: &'static str, v: f64) {
    if !v.is_finite() {
        errors.push(FieldError::at(field, "must be a finite number"));
    }
}

/// Check every field of `style` against its documented range.
pub fn validate_style(style: &StyleParameters) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_canvas_side(&mut errors, "canvasSize.width", style.canvas_size.width);
    check_canvas_side(&mut errors, "canvasSize.height", style.canvas_size.height);
    check_hex(&mut errors, "backgroundColor", &style.background_color);
    check_range(&mut errors, "imageScale", style.image_scale, 0.1, 5.0);
    check_finite(&mut errors, "imageOffset.x", style.image_offset.x);
    check_finite(&mut errors, "imageOffset.y", style.image_offset.y);
    if style.border_radius_percent > 50 {
        errors.push(FieldError::at(
            "borderRadiusPercent",
            "must be between 0 and 50",
        ));
    }

    check_range(&mut errors, "border.widthPx", style.border.width_px, 0.0, 30.0);
    check_hex(&mut errors, "border.color", &style.border.color);

    check_finite(&mut errors, "shadow.offsetX", style.shadow.offset_x);
    check_finite(&mut errors, "shadow.offsetY", style.shadow.offset_y);
    if !style.shadow.blur_px.is_finite() || style.shadow.blur_px < 0.0 {
        errors.push(FieldError::at("shadow.blurPx", "must be >= 0"));
    }
    check_range(
        &mut errors,
        "shadow.opacityPercent",
        style.shadow.opacity_percent,
        0.0,
        100.0,
    );

    check_range(
        &mut errors,
        "watermark.opacityPercent",
        style.watermark.opacity_percent,
        0.0,
        100.0,
    );
    check_range(
        &mut errors,
        "watermark.sizePercent",
        style.watermark.size_percent,
        1.0,
        15.0,
    );
    check_hex(&mut errors, "watermark.color", &style.watermark.color);

    errors
}

/// Checks that must run on raw JSON because typed decoding would lose the field context.
pub fn validate_style_json(value: &serde_json::Value) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (pointer, field) in [
        ("/canvasSize/width", "canvasSize.width"),
        ("/canvasSize/height", "canvasSize.height"),
    ] {
        let Some(v) = value.pointer(pointer) else {
            continue;
        };
        match v {
            serde_json::Value::Number(n) if n.is_u64() => {}
            serde_json::Value::Number(n) if n.is_i64() => {
                errors.push(FieldError::at(field, format!("Min {MIN_CANVAS_SIDE}px")));
            }
            serde_json::Value::Null => errors.push(FieldError::at(field, "Required")),
            _ => errors.push(FieldError::at(field, "Integer required")),
        }
    }
    errors
}

/// Holds the last-known-good style and commits valid fields independently.
///
/// An invalid height keeps rendering with the previous height while a simultaneously edited,
/// valid background color is still applied.
#[derive(Debug, Clone, Default)]
pub struct StyleEditor {
    committed: StyleParameters,
}

impl StyleEditor {
    /// Start from a snapshot assumed valid.
    pub fn new(initial: StyleParameters) -> Self {
        Self { committed: initial }
    }

    /// Snapshot to hand to the compositor.
    pub fn committed(&self) -> &StyleParameters {
        &self.committed
    }

    /// Commit every valid field of `candidate`; return errors for the rest.
    pub fn propose(&mut self, candidate: &StyleParameters) -> Vec<FieldError> {
        let errors = validate_style(candidate);
        let ok = |field: &str| !errors.iter().any(|e| e.field == field);
        let c = &mut self.committed;

        if ok("canvasSize.width") {
            c.canvas_size.width = candidate.canvas_size.width;
        }
        if ok("canvasSize.height") {
            c.canvas_size.height = candidate.canvas_size.height;
        }
        if ok("backgroundColor") {
            c.background_color.clone_from(&candidate.background_color);
        }
        if ok("imageScale") {
            c.image_scale = candidate.image_scale;
        }
        if ok("imageOffset.x") {
            c.image_offset.x = candidate.image_offset.x;
        }
        if ok("imageOffset.y") {
            c.image_offset.y = candidate.image_offset.y;
        }
        if ok("borderRadiusPercent") {
            c.border_radius_percent = candidate.border_radius_percent;
        }

        c.border.enabled = candidate.border.enabled;
        if ok("border.widthPx") {
            c.border.width_px = candidate.border.width_px;
        }
        if ok("border.color") {
            c.border.color.clone_from(&candidate.border.color);
        }

        if ok("shadow.offsetX") {
            c.shadow.offset_x = candidate.shadow.offset_x;
        }
        if ok("shadow.offsetY") {
            c.shadow.offset_y = candidate.shadow.offset_y;
        }
        if ok("shadow.blurPx") {
            c.shadow.blur_px = candidate.shadow.blur_px;
        }
        if ok("shadow.opacityPercent") {
            c.shadow.opacity_percent = candidate.shadow.opacity_percent;
        }

        c.watermark.enabled = candidate.watermark.enabled;
        c.watermark.text.clone_from(&candidate.watermark.text);
        c.watermark.font_family.clone_from(&candidate.watermark.font_family);
        c.watermark.position = candidate.watermark.position;
        if ok("watermark.opacityPercent") {
            c.watermark.opacity_percent = candidate.watermark.opacity_percent;
        }
        if ok("watermark.sizePercent") {
            c.watermark.size_percent = candidate.watermark.size_percent;
        }
        if ok("watermark.color") {
            c.watermark.color.clone_from(&candidate.watermark.color);
        }

        if !errors.is_empty() {
            tracing::debug!(rejected = errors.len(), "kept last-known-good values for invalid fields");
        }
        errors
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/validate.rs"]
mod tests;
