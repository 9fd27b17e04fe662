use super::*;

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![128, 64, 0, 128, 10, 20, 30, 255, 9, 9, 9, 0];
    unpremultiply_rgba8(&mut px);
    assert_eq!(&px[0..4], &[255, 128, 0, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..12], &[0, 0, 0, 0]);
}

#[test]
fn png_decodes_back_to_same_pixels() {
    let pixels = vec![
        255, 0, 0, 255, 0, 255, 0, 255, //
        0, 0, 255, 255, 255, 255, 255, 128,
    ];
    let png = encode_png(PixelSize::new(2, 2), pixels.clone()).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.into_raw(), pixels);
}

#[test]
fn wrong_buffer_length_is_a_serialization_error() {
    let err = encode_png(PixelSize::new(4, 4), vec![0; 12]).unwrap_err();
    assert!(matches!(err, WalliError::Serialization(_)));
}
