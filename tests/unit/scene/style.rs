use super::*;
use serde_json::json;

#[test]
fn empty_object_takes_defaults() {
    let s = StyleParameters::from_json_value(json!({})).unwrap();
    assert_eq!(s, StyleParameters::default());
    assert_eq!(s.canvas_size, PixelSize::new(1080, 1350));
    assert_eq!(s.shadow.offset_y, 4.0);
    assert!(s.validate().is_ok());
}

#[test]
fn camel_case_fields_parse() {
    let s = StyleParameters::from_json_value(json!({
        "canvasSize": { "width": 1000, "height": 800 },
        "backgroundColor": "#123",
        "imageScale": 0.5,
        "imageOffset": { "x": -20.0, "y": 15.5 },
        "borderRadiusPercent": 12,
        "border": { "enabled": true, "widthPx": 10, "color": "#000000" },
        "shadow": { "offsetX": 2, "offsetY": 3, "blurPx": 4, "opacityPercent": 50 },
        "watermark": {
            "enabled": true,
            "text": "hello",
            "opacityPercent": 80,
            "sizePercent": 10,
            "color": "#fff",
            "fontFamily": "Georgia, serif",
            "position": "center"
        }
    }))
    .unwrap();

    assert_eq!(s.canvas_size, PixelSize::new(1000, 800));
    assert_eq!(s.image_offset, Vec2::new(-20.0, 15.5));
    assert!(s.border.is_active());
    assert_eq!(s.watermark.position, WatermarkPosition::Center);
    assert!(s.watermark.is_active());
}

#[test]
fn non_integer_canvas_size_is_a_field_error() {
    let err = StyleParameters::from_json_value(json!({
        "canvasSize": { "width": 100.5, "height": 100 }
    }))
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("canvasSize.width: Integer required"), "{msg}");
}

#[test]
fn validate_reports_out_of_range_fields() {
    let mut s = StyleParameters::default();
    s.canvas_size.height = 9000;
    s.background_color = "red".to_owned();
    let msg = s.validate().unwrap_err().to_string();
    assert!(msg.contains("canvasSize.height: Max 8000px"));
    assert!(msg.contains("backgroundColor: Invalid hex"));
}

#[test]
fn activity_helpers_gate_on_enabled_and_content() {
    let mut w = WatermarkStyle {
        enabled: true,
        ..WatermarkStyle::default()
    };
    assert!(!w.is_active());
    w.text = "x".to_owned();
    assert!(w.is_active());

    let b = BorderStyle {
        enabled: true,
        width_px: 0.0,
        ..BorderStyle::default()
    };
    assert!(!b.is_active());
}
