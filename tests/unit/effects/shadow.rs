use super::*;
use crate::layout::geometry::rounded_rect_path;

fn square(x: f64, y: f64, side: f64) -> BezPath {
    rounded_rect_path(x, y, side, side, 0.0)
}

#[test]
fn color_is_black_at_configured_opacity() {
    let c = shadow_color(&ShadowStyle {
        opacity_percent: 20.0,
        ..ShadowStyle::default()
    });
    assert_eq!((c.r, c.g, c.b), (0, 0, 0));
    assert!((c.a - 0.2).abs() < 1e-12);

    let c = shadow_color(&ShadowStyle {
        opacity_percent: 250.0,
        ..ShadowStyle::default()
    });
    assert_eq!(c.a, 1.0);
}

#[test]
fn sigma_is_half_the_blur_length() {
    assert_eq!(shadow_sigma(8.0), 4.0);
    assert_eq!(shadow_sigma(-3.0), 0.0);
    assert_eq!(shadow_sigma(f64::INFINITY), 0.0);
}

#[test]
fn region_covers_offset_outline_plus_kernel_reach() {
    let (x, y, size) = shadow_region(
        &square(40.0, 40.0, 20.0),
        Vec2::new(0.0, 4.0),
        2.0,
        PixelSize::new(200, 200),
    )
    .unwrap();
    // blur reach for sigma 2 is 6px
    assert_eq!((x, y), (34, 38));
    assert_eq!(size, PixelSize::new(32, 32));
}

#[test]
fn region_is_clipped_to_target() {
    let (x, y, size) = shadow_region(
        &square(-10.0, -10.0, 30.0),
        Vec2::ZERO,
        0.0,
        PixelSize::new(100, 100),
    )
    .unwrap();
    assert_eq!((x, y), (0, 0));
    assert_eq!(size, PixelSize::new(20, 20));

    assert!(
        shadow_region(
            &square(500.0, 500.0, 10.0),
            Vec2::ZERO,
            1.0,
            PixelSize::new(100, 100),
        )
        .is_none()
    );
}

#[test]
fn transparent_shadow_builds_nothing() {
    let shadow = ShadowStyle {
        opacity_percent: 0.0,
        ..ShadowStyle::default()
    };
    let layer =
        build_shadow_layer(&square(10.0, 10.0, 20.0), &shadow, 1.0, PixelSize::new(64, 64))
            .unwrap();
    assert!(layer.is_none());
}

#[test]
fn shadow_layer_is_blurred_silhouette() {
    let shadow = ShadowStyle {
        offset_x: 0.0,
        offset_y: 0.0,
        blur_px: 4.0,
        opacity_percent: 100.0,
    };
    let layer = build_shadow_layer(&square(20.0, 20.0, 20.0), &shadow, 1.0, PixelSize::new(64, 64))
        .unwrap()
        .unwrap();
    assert_eq!(layer.origin, (14, 14));
    assert_eq!(layer.size, PixelSize::new(32, 32));
}

#[test]
fn scale_factor_shrinks_the_region() {
    let shadow = ShadowStyle {
        offset_x: 10.0,
        offset_y: 10.0,
        blur_px: 8.0,
        opacity_percent: 50.0,
    };
    let full = build_shadow_layer(&square(100.0, 100.0, 100.0), &shadow, 1.0, PixelSize::new(400, 400))
        .unwrap()
        .unwrap();
    let half = build_shadow_layer(&square(50.0, 50.0, 50.0), &shadow, 0.5, PixelSize::new(200, 200))
        .unwrap()
        .unwrap();
    assert_eq!(full.origin, (98, 98));
    assert_eq!(full.size, PixelSize::new(124, 124));
    assert_eq!(half.origin, (49, 49));
    assert_eq!(half.size, PixelSize::new(62, 62));
}
