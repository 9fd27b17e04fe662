use super::*;
use crate::foundation::core::PixelSize;
use serde_json::json;

#[test]
fn defaults_are_valid() {
    assert!(validate_style(&StyleParameters::default()).is_empty());
}

#[test]
fn canvas_bounds_use_form_messages() {
    let mut s = StyleParameters::default();
    s.canvas_size = PixelSize::new(9, 8001);
    let errs = validate_style(&s);
    assert_eq!(
        errs,
        vec![
            FieldError::at("canvasSize.width", "Min 10px"),
            FieldError::at("canvasSize.height", "Max 8000px"),
        ]
    );
}

#[test]
fn numeric_ranges_are_enforced() {
    let mut s = StyleParameters::default();
    s.image_scale = 5.5;
    s.border_radius_percent = 51;
    s.border.width_px = 31.0;
    s.shadow.blur_px = -1.0;
    s.shadow.opacity_percent = f64::NAN;
    s.watermark.size_percent = 0.5;
    let fields: Vec<&str> = validate_style(&s).iter().map(|e| e.field).collect();
    assert_eq!(
        fields,
        vec![
            "imageScale",
            "borderRadiusPercent",
            "border.widthPx",
            "shadow.blurPx",
            "shadow.opacityPercent",
            "watermark.sizePercent",
        ]
    );
}

#[test]
fn json_precheck_flags_non_integers_and_negatives() {
    let errs = validate_style_json(&json!({"canvasSize": {"width": "wide", "height": -5}}));
    assert_eq!(
        errs,
        vec![
            FieldError::at("canvasSize.width", "Integer required"),
            FieldError::at("canvasSize.height", "Min 10px"),
        ]
    );
    assert!(validate_style_json(&json!({"canvasSize": {"width": 10}})).is_empty());
}

#[test]
fn editor_keeps_last_good_value_for_invalid_fields_only() {
    let mut editor = StyleEditor::new(StyleParameters::default());
    let mut candidate = StyleParameters::default();
    candidate.canvas_size.height = 3;
    candidate.canvas_size.width = 640;
    candidate.background_color = "#00ff00".to_owned();

    let errs = editor.propose(&candidate);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].field, "canvasSize.height");

    let c = editor.committed();
    assert_eq!(c.canvas_size, PixelSize::new(640, 1350));
    assert_eq!(c.background_color, "#00ff00");
}

#[test]
fn field_errors_display_one_per_line() {
    let e = FieldErrors {
        errors: vec![
            FieldError::at("a", "x"),
            FieldError::at("b", "y"),
        ],
    };
    assert_eq!(e.to_string(), "a: x\nb: y");
}
