use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    a.write_bytes(b"wheel");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_bytes(b"wh");
    b.write_bytes(b"eel");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn unit_from_seed_is_half_open_and_deterministic() {
    for seed in 0..256u64 {
        let u = unit_from_seed(seed);
        assert!((0.0..1.0).contains(&u), "seed {seed} -> {u}");
        assert_eq!(u, unit_from_seed(seed));
    }
    assert_ne!(unit_from_seed(1), unit_from_seed(2));
}

#[test]
fn premultiply_then_unpremultiply_keeps_opaque_and_clears_transparent() {
    let mut px = [200u8, 100, 50, 255, 9, 9, 9, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[200, 100, 50, 255]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(unpremultiply_rgba8([200, 100, 50, 255]), [200, 100, 50, 255]);
    assert_eq!(unpremultiply_rgba8([0, 0, 0, 0]), [0, 0, 0, 0]);
}

#[test]
fn unpremultiply_half_alpha() {
    let [r, g, b, a] = unpremultiply_rgba8([64, 0, 128, 128]);
    assert_eq!(a, 128);
    assert_eq!(g, 0);
    assert!((r as i32 - 128).abs() <= 1);
    assert_eq!(b, 255);
}
