use super::*;

fn solid(w: u32, h: u32) -> DecodedFrame {
    let len = (w * h * 4) as usize;
    let pixmap =
        crate::assets::decode::pixmap_from_premul_bytes(&vec![255u8; len], w, h).unwrap();
    DecodedFrame::new(w, h, Arc::new(pixmap))
}

#[test]
fn empty_frame_set_is_rejected() {
    assert!(FrameSet::from_frames(Vec::new()).is_err());
}

#[test]
fn indexing_and_first_frame() {
    let set = FrameSet::from_frames(vec![solid(4, 2), solid(4, 2), solid(4, 2)]).unwrap();
    assert_eq!(set.len(), 3);
    assert!(!set.is_empty());
    assert_eq!(set.last_index(), FrameIndex(2));
    assert!(set.get(FrameIndex(2)).is_some());
    assert!(set.get(FrameIndex(3)).is_none());
    assert_eq!(set.first().size(), Size::new(4.0, 2.0));
    assert_eq!(set.iter().count(), 3);
}

#[test]
fn clones_share_pixels() {
    let a = solid(2, 2);
    let b = a.clone();
    assert!(std::ptr::eq(a.pixmap(), b.pixmap()));
}
