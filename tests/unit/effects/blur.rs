use super::*;

fn repeat_px(px: [u8; 4], n: usize) -> Vec<u8> {
    let mut v = Vec::with_capacity(n * 4);
    for _ in 0..n {
        v.extend_from_slice(&px);
    }
    v
}

fn box_variance(radii: [u32; 3]) -> f64 {
    radii
        .iter()
        .map(|&r| f64::from(r) * f64::from(r + 1) / 3.0)
        .sum()
}

#[test]
fn radius_covers_three_sigma_and_is_capped() {
    assert_eq!(kernel_radius(0.0), 0);
    assert_eq!(kernel_radius(f64::NAN), 0);
    assert_eq!(kernel_radius(4.0), 12);
    assert_eq!(kernel_radius(1.0e9), MAX_BLUR_RADIUS);
}

#[test]
fn box_passes_match_gaussian_variance() {
    assert_eq!(box_radii(0.0), [0, 0, 0]);
    assert_eq!(box_radii(2.0), [1, 1, 2]);
    assert_eq!(box_radii(8.0), [7, 7, 8]);
    for sigma in [2.0, 5.0, 8.0, 25.0, 120.0] {
        let v = box_variance(box_radii(sigma));
        let target = sigma * sigma;
        assert!((v - target).abs() / target < 0.2, "sigma {sigma}: {v}");
    }
}

#[test]
fn reach_bounds_every_box_pass() {
    for sigma in [0.5, 2.0, 4.0, 33.3, 1.0e6] {
        let boxes: u32 = box_radii(sigma).iter().sum();
        assert!(blur_reach(sigma) >= boxes);
        assert!(blur_reach(sigma) >= kernel_radius(sigma));
        assert!(blur_reach(sigma) <= MAX_BLUR_RADIUS + 3);
    }
}

#[test]
fn zero_sigma_is_identity() {
    let mut px = vec![1, 2, 3, 4, 50, 60, 70, 80];
    let before = px.clone();
    blur_rgba8_premul_in_place(&mut px, 2, 1, 0.0).unwrap();
    assert_eq!(px, before);
}

#[test]
fn constant_image_is_unchanged() {
    let mut px = repeat_px([10, 20, 30, 200], 9 * 7);
    let before = px.clone();
    blur_rgba8_premul_in_place(&mut px, 9, 7, 2.0).unwrap();
    assert_eq!(px, before);
}

#[test]
fn single_dot_spreads_symmetrically() {
    let (w, h) = (15u32, 15u32);
    let mut px = vec![0u8; (w * h * 4) as usize];
    let center = ((7 * w + 7) * 4) as usize;
    px[center + 3] = 255;
    blur_rgba8_premul_in_place(&mut px, w, h, 1.0).unwrap();

    let a = |x: u32, y: u32| px[((y * w + x) * 4 + 3) as usize];
    assert!(a(7, 7) < 255);
    assert!(a(6, 7) > 0);
    assert_eq!(a(6, 7), a(8, 7));
    assert_eq!(a(7, 6), a(7, 8));
    assert!(a(7, 7) >= a(6, 7));
    assert_eq!(a(0, 0), 0);
}

#[test]
fn hard_edge_becomes_monotonic_ramp() {
    let (w, h) = (40u32, 3u32);
    let mut px = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..h {
        for x in 0..w {
            let a = if x < w / 2 { 255 } else { 0 };
            px.extend_from_slice(&[0, 0, 0, a]);
        }
    }
    blur_rgba8_premul_in_place(&mut px, w, h, 3.0).unwrap();

    let row: Vec<u8> = (0..w).map(|x| px[((w + x) * 4 + 3) as usize]).collect();
    assert_eq!(row[0], 255);
    assert_eq!(row[(w - 1) as usize], 0);
    assert!(row.windows(2).all(|p| p[0] >= p[1]), "{row:?}");
    let mid = row[(w / 2) as usize];
    assert!(mid > 0 && mid < 255);
}

#[test]
fn large_sigma_on_large_buffer_stays_linear() {
    // cost per pixel does not grow with sigma
    let side = 512u32;
    let mut px = vec![0u8; (side * side * 4) as usize];
    px[((256 * side + 256) * 4 + 3) as usize] = 255;
    blur_rgba8_premul_in_place(&mut px, side, side, 50.0).unwrap();
    assert!(px.iter().all(|&b| b <= 1));
}

#[test]
fn size_mismatch_is_an_error() {
    let mut px = vec![0u8; 12];
    assert!(blur_rgba8_premul_in_place(&mut px, 2, 2, 1.0).is_err());
}
