use super::*;

fn solid(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba8(w, h, vec![200u8; (w * h * 4) as usize]).unwrap()
}

#[test]
fn premultiply_scales_color_by_alpha() {
    let mut px = vec![255u8, 128, 0, 128, 10, 20, 30, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![128, 64, 0, 128, 0, 0, 0, 0]);
}

#[test]
fn zero_sized_images_are_rejected() {
    assert!(SourceImage::from_rgba8(0, 4, Vec::new()).is_err());
}

#[test]
fn latest_ticket_commits() {
    let mut slot = ImageSlot::new();
    let t = slot.begin_upload();
    assert!(slot.is_loading());
    assert!(matches!(slot.finish(t, Ok(solid(2, 2))), SlotEvent::Committed));
    assert_eq!(slot.current().map(|i| i.width()), Some(2));
    assert!(!slot.is_loading());
}

#[test]
fn superseded_decode_is_discarded() {
    let mut slot = ImageSlot::new();
    let old = slot.begin_upload();
    let new = slot.begin_upload();

    assert!(matches!(slot.finish(new, Ok(solid(5, 5))), SlotEvent::Committed));
    assert!(matches!(slot.finish(old, Ok(solid(1, 1))), SlotEvent::Stale));
    assert_eq!(slot.current().map(|i| i.width()), Some(5));
}

#[test]
fn clear_cancels_in_flight_decode() {
    let mut slot = ImageSlot::new();
    let t = slot.begin_upload();
    slot.clear();
    assert!(matches!(slot.finish(t, Ok(solid(3, 3))), SlotEvent::Stale));
    assert!(slot.current().is_none());
}

#[test]
fn failed_decode_clears_previous_image() {
    let mut slot = ImageSlot::new();
    let t = slot.begin_upload();
    slot.finish(t, Ok(solid(4, 4)));

    assert!(matches!(slot.upload(b"garbage"), SlotEvent::Failed(_)));
    assert!(slot.current().is_none());
}
