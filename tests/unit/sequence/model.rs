use super::*;

#[test]
fn palette_length_limits() {
    assert!(Palette::new(vec![]).is_err());
    assert!(Palette::new(vec![Rgba([0, 0, 0, 255]); MAX_PALETTE_LEN]).is_ok());
    assert!(Palette::new(vec![Rgba([0, 0, 0, 255]); MAX_PALETTE_LEN + 1]).is_err());
}

#[test]
fn rgb_bytes_mark_transparent_entry() {
    let p = Palette::from_rgb_bytes(&[1, 2, 3, 4, 5, 6], Some(1)).unwrap();
    assert_eq!(p.colors(), &[Rgba([1, 2, 3, 255]), Rgba([4, 5, 6, 0])]);
    assert_eq!(p.to_rgb_bytes(), vec![1, 2, 3, 4, 5, 6]);
    assert!(Palette::from_rgb_bytes(&[1, 2], None).is_err());
}

#[test]
fn frame_checks_index_count() {
    let p = Arc::new(Palette::new(vec![Rgba([0, 0, 0, 255])]).unwrap());
    assert!(IndexedFrame::new(2, 2, Arc::clone(&p), vec![0; 4]).is_ok());
    assert!(IndexedFrame::new(2, 2, p, vec![0; 3]).is_err());
}

#[test]
fn to_rgba_expands_and_blanks_unknown_indices() {
    let p = Arc::new(Palette::new(vec![Rgba([9, 8, 7, 255]), Rgba([1, 1, 1, 255])]).unwrap());
    let f = IndexedFrame::new(3, 1, p, vec![1, 0, 7]).unwrap();
    let rgba = f.to_rgba();
    assert_eq!(*rgba.get_pixel(0, 0), Rgba([1, 1, 1, 255]));
    assert_eq!(*rgba.get_pixel(1, 0), Rgba([9, 8, 7, 255]));
    assert_eq!(*rgba.get_pixel(2, 0), Rgba([0, 0, 0, 0]));
}

#[test]
fn with_pixels_keeps_palette_and_timing() {
    let p = Arc::new(Palette::new(vec![Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 255])]).unwrap());
    let mut f = IndexedFrame::new(2, 1, Arc::clone(&p), vec![0, 1]).unwrap();
    f.delay_cs = 7;
    f.disposal = Disposal::Background;
    f.transparent = Some(1);
    f.left = 3;

    let g = f.with_pixels(0, 0, 1, 2, vec![1, 1]);
    assert!(Arc::ptr_eq(g.palette(), &p));
    assert_eq!(g.delay_cs, 7);
    assert_eq!(g.disposal, Disposal::Background);
    assert_eq!(g.transparent, Some(1));
    assert_eq!((g.left, g.width(), g.height()), (0, 1, 2));
    assert_eq!(g.indices(), &[1, 1]);
}
