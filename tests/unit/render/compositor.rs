use super::*;
use crate::render::target::Surface;

fn solid_image(w: u32, h: u32, px: [u8; 4]) -> SourceImage {
    let mut bytes = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        bytes.extend_from_slice(&px);
    }
    SourceImage::from_rgba8(w, h, bytes).unwrap()
}

fn flat_style(side: u32) -> StyleParameters {
    let mut s = StyleParameters {
        canvas_size: PixelSize::new(side, side),
        ..StyleParameters::default()
    };
    s.shadow.opacity_percent = 0.0;
    s
}

fn render(style: &StyleParameters, source: Option<&SourceImage>, k: f64) -> (Surface, RenderReport) {
    let mut compositor = Compositor::new(FontLibrary::new());
    let mut surface = Surface::new(style.canvas_size).unwrap();
    let report = compositor.render(&mut surface, style, source, k);
    (surface, report)
}

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

#[test]
fn no_image_draws_background_only() {
    let mut style = flat_style(40);
    style.background_color = "#336699".to_owned();
    let (surface, report) = render(&style, None, 1.0);
    assert_eq!(report.drawn, vec![Pass::Background]);
    assert!(report.is_clean());
    assert!(report.layout.is_none());
    for px in surface.premul_rgba8().chunks_exact(4) {
        assert_eq!(px, [0x33, 0x66, 0x99, 255]);
    }
}

#[test]
fn image_is_centered_over_background() {
    let style = flat_style(100);
    let img = solid_image(50, 50, RED);
    let (surface, report) = render(&style, Some(&img), 1.0);
    assert!(report.drew(Pass::Image));
    assert!(!report.drew(Pass::Border));
    assert_eq!(surface.pixel(50, 50), Some(RED));
    assert_eq!(surface.pixel(26, 26), Some(RED));
    assert_eq!(surface.pixel(73, 73), Some(RED));
    assert_eq!(surface.pixel(23, 50), Some(WHITE));
    assert_eq!(surface.pixel(76, 50), Some(WHITE));
}

#[test]
fn border_surrounds_image() {
    let mut style = flat_style(100);
    style.border.enabled = true;
    style.border.width_px = 5.0;
    style.border.color = "#000000".to_owned();
    let img = solid_image(50, 50, RED);
    let (surface, report) = render(&style, Some(&img), 1.0);
    assert!(report.drew(Pass::Border));
    for (x, y) in [(22, 50), (77, 50), (50, 22), (50, 77)] {
        assert_eq!(surface.pixel(x, y), Some(BLACK), "({x}, {y})");
    }
    assert_eq!(surface.pixel(50, 50), Some(RED));
    assert_eq!(surface.pixel(18, 50), Some(WHITE));
}

#[test]
fn full_radius_clips_to_circle() {
    let mut style = flat_style(100);
    style.border_radius_percent = 50;
    let img = solid_image(50, 50, RED);
    let (surface, _) = render(&style, Some(&img), 1.0);
    assert_eq!(surface.pixel(50, 50), Some(RED));
    assert_eq!(surface.pixel(26, 26), Some(WHITE));
    assert_eq!(surface.pixel(73, 26), Some(WHITE));
    assert_eq!(surface.pixel(50, 26), Some(RED));
}

#[test]
fn shadow_darkens_below_the_block() {
    let mut style = flat_style(100);
    style.shadow.opacity_percent = 20.0;
    let img = solid_image(50, 50, RED);
    let (surface, report) = render(&style, Some(&img), 1.0);
    assert!(report.drew(Pass::Shadow));
    let below = surface.pixel(50, 77).unwrap();
    assert!(below[0] < 250, "{below:?}");
    assert_eq!(surface.pixel(2, 2), Some(WHITE));
    assert_eq!(surface.pixel(50, 50), Some(RED));
}

#[test]
fn zero_scale_factor_keeps_background() {
    let style = flat_style(20);
    let img = solid_image(4, 4, RED);
    let (surface, report) = render(&style, Some(&img), 0.0);
    assert!(report.failure(Pass::Image).is_some());
    assert_eq!(report.drawn, vec![Pass::Background]);
    assert_eq!(surface.pixel(10, 10), Some(WHITE));
}

#[test]
fn missing_font_fails_only_the_watermark() {
    let mut style = flat_style(100);
    style.watermark.enabled = true;
    style.watermark.text = "hello".to_owned();
    let img = solid_image(50, 50, RED);

    let (marked, report) = render(&style, Some(&img), 1.0);
    assert!(report.failure(Pass::Watermark).is_some());
    assert!(report.drew(Pass::Image));
    assert!(report.watermark.is_none());

    style.watermark.enabled = false;
    let (plain, report) = render(&style, Some(&img), 1.0);
    assert!(report.is_clean());
    assert_eq!(marked.premul_rgba8(), plain.premul_rgba8());
}

#[test]
fn rerender_overwrites_previous_pixels() {
    let mut compositor = Compositor::new(FontLibrary::new());
    let mut style = flat_style(30);
    let mut surface = Surface::new(style.canvas_size).unwrap();
    let img = solid_image(10, 10, RED);

    compositor.render(&mut surface, &style, Some(&img), 1.0);
    assert_eq!(surface.pixel(15, 15), Some(RED));

    style.background_color = "#000000".to_owned();
    compositor.render(&mut surface, &style, None, 1.0);
    assert_eq!(surface.pixel(15, 15), Some(BLACK));
}

#[test]
fn watermark_draws_with_system_font() {
    let fonts = FontLibrary::with_system_fonts();
    if fonts.face_count() == 0 {
        return;
    }
    let mut compositor = Compositor::new(fonts);
    let mut style = flat_style(200);
    style.watermark.enabled = true;
    style.watermark.text = "WWWW".to_owned();
    style.watermark.color = "#000000".to_owned();
    style.watermark.opacity_percent = 100.0;
    style.watermark.size_percent = 15.0;
    let img = solid_image(160, 160, WHITE);

    let mut surface = Surface::new(style.canvas_size).unwrap();
    let report = compositor.render(&mut surface, &style, Some(&img), 1.0);
    assert!(report.drew(Pass::Watermark), "{report:?}");
    let p = report.watermark.unwrap();
    assert_eq!(p.font_size, 24.0);

    let dark = surface
        .premul_rgba8()
        .chunks_exact(4)
        .filter(|px| px[0] < 128)
        .count();
    assert!(dark > 0);
}
