use super::*;

#[test]
fn over_opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [200, 0, 0, 255], 1.0), [200, 0, 0, 255]);
}

#[test]
fn over_transparent_source_is_noop() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [255, 255, 255, 0], 1.0), dst);
    assert_eq!(over(dst, [255, 255, 255, 255], 0.0), dst);
}

#[test]
fn over_half_alpha_blends() {
    let out = over([0, 0, 255, 255], [128, 0, 0, 128], 1.0);
    assert_eq!(out, [128, 0, 127, 255]);
}

#[test]
fn over_in_place_rejects_length_mismatch() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn flatten_premul_over_black_produces_expected_rgb() {
    let src = vec![128u8, 0u8, 0u8, 128u8];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128u8, 0u8, 0u8, 255u8]);
}

#[test]
fn flatten_transparent_over_white_is_white() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, [255, 255, 255, 255]).unwrap();
    assert_eq!(dst, vec![255u8, 255, 255, 255]);
}

#[test]
fn flatten_straight_over_black_produces_expected_rgb() {
    let src = vec![255u8, 0u8, 0u8, 128u8];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128u8, 0u8, 0u8, 255u8]);
}
