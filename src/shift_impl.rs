//! Implementation of the logical and arithmetic shift primitives.
//!
//! A shift acts on the `nbits` least significant bits of a non-negative integer's magnitude only:
//! bits shifted out of the window are lost, bits above it are never touched. Shift distances are
//! expected to be normalized into `-nbits..=nbits` already, see
//! [`shift_distance()`](crate::distance::shift_distance). A negative distance shifts in the
//! opposite direction.

use super::integer::Integer;
use super::limb::{lsb_mask_u64, Limb};
use super::limbs_buffer::MpLimbs;
use super::renorm_impl::{demote, replace_low_bits_big, replace_low_bits_small};

fn lshift_window(window: u64, nbits: u32, sdist: i32) -> u64 {
    let n = nbits as i32;
    debug_assert!(-n <= sdist && sdist <= n);
    if sdist >= n || sdist <= -n {
        0
    } else if sdist < 0 {
        window >> -sdist
    } else {
        (window << sdist) & lsb_mask_u64(nbits)
    }
}

fn rshift_window(window: u64, nbits: u32, sdist: i32) -> u64 {
    lshift_window(window, nbits, -sdist)
}

fn arith_rshift_window(window: u64, nbits: u32, sdist: i32) -> u64 {
    if sdist < 0 {
        // Shifting left never replicates the sign bit.
        return lshift_window(window, nbits, -sdist);
    }

    let mask = lsb_mask_u64(nbits);
    let sign_set = (window >> (nbits - 1)) & 1 != 0;
    if sdist >= nbits as i32 {
        return if sign_set { mask } else { 0 };
    }

    let shifted = window >> sdist;
    if sign_set {
        shifted | (mask & !(mask >> sdist))
    } else {
        shifted
    }
}

/// Shared shell for the shift primitives on small values.
fn small_shift<L: Limb>(
    value: i64,
    nbits: u32,
    sdist: i32,
    shift_window: fn(u64, u32, i32) -> u64,
) -> Integer<L> {
    if sdist == 0 {
        return Integer::Small(value);
    }
    let window = value as u64 & lsb_mask_u64(nbits);
    replace_low_bits_small(value, nbits, shift_window(window, nbits, sdist))
}

/// Shared shell for the shift primitives on big values.
fn big_shift<L: Limb>(
    big: &MpLimbs<L>,
    nbits: u32,
    sdist: i32,
    shift_window: fn(u64, u32, i32) -> u64,
) -> Integer<L> {
    // No copy of the limbs for a no-op shift.
    if sdist == 0 {
        return demote(big.clone());
    }
    let window = big.load_low_bits(nbits);
    replace_low_bits_big(big, nbits, shift_window(window, nbits, sdist))
}

pub fn small_lshift<L: Limb>(value: i64, nbits: u32, sdist: i32) -> Integer<L> {
    small_shift(value, nbits, sdist, lshift_window)
}

pub fn big_lshift<L: Limb>(big: &MpLimbs<L>, nbits: u32, sdist: i32) -> Integer<L> {
    big_shift(big, nbits, sdist, lshift_window)
}

pub fn small_rshift<L: Limb>(value: i64, nbits: u32, sdist: i32) -> Integer<L> {
    small_shift(value, nbits, sdist, rshift_window)
}

pub fn big_rshift<L: Limb>(big: &MpLimbs<L>, nbits: u32, sdist: i32) -> Integer<L> {
    big_shift(big, nbits, sdist, rshift_window)
}

pub fn small_arith_rshift<L: Limb>(value: i64, nbits: u32, sdist: i32) -> Integer<L> {
    small_shift(value, nbits, sdist, arith_rshift_window)
}

pub fn big_arith_rshift<L: Limb>(big: &MpLimbs<L>, nbits: u32, sdist: i32) -> Integer<L> {
    big_shift(big, nbits, sdist, arith_rshift_window)
}

#[test]
fn test_lshift_window() {
    assert_eq!(lshift_window(0x44, 8, 2), 0x10);
    assert_eq!(lshift_window(0x44, 8, -2), 0x11);
    assert_eq!(lshift_window(0xff, 8, 8), 0);
    assert_eq!(lshift_window(0xff, 8, -8), 0);
    assert_eq!(lshift_window(0xff, 8, 7), 0x80);
    assert_eq!(lshift_window(!0, 64, 63), 1 << 63);
    assert_eq!(lshift_window(!0, 64, -63), 1);
    assert_eq!(lshift_window(!0, 64, 64), 0);
}

#[test]
fn test_rshift_window() {
    assert_eq!(rshift_window(0xaabb_ccdd, 32, 4), 0x0aab_bccd);
    assert_eq!(rshift_window(0xaabb_ccdd, 32, -4), 0xabbc_cdd0);
    assert_eq!(rshift_window(0xaabb_ccdd, 32, 32), 0);
    assert_eq!(rshift_window(0xaabb_ccdd, 32, -32), 0);
}

#[test]
fn test_arith_rshift_window() {
    assert_eq!(arith_rshift_window(0xaabb_ccdd, 32, 1), 0xd55d_e66e);
    assert_eq!(arith_rshift_window(0x2abb_ccdd, 32, 1), 0x155d_e66e);
    assert_eq!(arith_rshift_window(0x80, 8, 7), 0xff);
    assert_eq!(arith_rshift_window(0x80, 8, 8), 0xff);
    assert_eq!(arith_rshift_window(0x7f, 8, 8), 0);
    assert_eq!(arith_rshift_window(0x81, 8, -1), 0x02);
    assert_eq!(arith_rshift_window(0x81, 8, -8), 0);
    assert_eq!(arith_rshift_window(1 << 63, 64, 63), !0);
    assert_eq!(arith_rshift_window(1 << 63, 64, 64), !0);

    for nbits in [8u32, 16, 32, 64] {
        let top = 1u64 << (nbits - 1);
        let mask = lsb_mask_u64(nbits);
        for sdist in 1..=nbits as i32 {
            // The vacated high bits copy the window's top bit.
            let fill = if sdist == nbits as i32 {
                mask
            } else {
                mask & !(mask >> sdist)
            };
            assert_eq!(arith_rshift_window(top, nbits, sdist) & fill, fill);
            assert_eq!(arith_rshift_window(top - 1, nbits, sdist) & fill, 0);
        }
    }
}

#[cfg(test)]
fn test_shift_against_reference_common<L: Limb>() {
    use super::test_helpers::{from_ref, sample_values, test_rng, to_ref};
    use num_bigint::BigInt;

    let mut rng = test_rng();
    for value in sample_values::<L>(&mut rng) {
        let reference = to_ref(&value);
        for nbits in [8u32, 16, 32, 64] {
            let n = nbits as i32;
            let mask: BigInt = (BigInt::from(1) << nbits) - 1;
            let high = &reference & !mask.clone();
            let window = &reference & &mask;
            let sign_set = window.bit(nbits as u64 - 1);
            for sdist in -n..=n {
                let left = |d: i32| -> BigInt {
                    if d >= 0 {
                        (&window << d as u32) & &mask
                    } else {
                        &window >> (-d) as u32
                    }
                };
                let lshift_ref = left(sdist);
                let rshift_ref = left(-sdist);
                let arith_ref = if sdist <= 0 || !sign_set {
                    left(-sdist)
                } else {
                    let fill = &mask ^ (&mask >> sdist as u32);
                    (&window >> sdist as u32) | fill
                };

                let expected: [Integer<L>; 3] = [
                    from_ref(&(&high | lshift_ref)),
                    from_ref(&(&high | rshift_ref)),
                    from_ref(&(&high | arith_ref)),
                ];
                let got: [Integer<L>; 3] = match &value {
                    Integer::Small(v) => [
                        small_lshift::<L>(*v, nbits, sdist),
                        small_rshift::<L>(*v, nbits, sdist),
                        small_arith_rshift::<L>(*v, nbits, sdist),
                    ],
                    Integer::Big(b) => [
                        big_lshift(b, nbits, sdist),
                        big_rshift(b, nbits, sdist),
                        big_arith_rshift(b, nbits, sdist),
                    ],
                };
                for (got, expected) in got.iter().zip(expected.iter()) {
                    assert_eq!(got, expected);
                    assert_eq!(got.is_small(), expected.is_small());
                }
            }
        }
    }
}

#[test]
fn test_shift_against_reference() {
    test_shift_against_reference_common::<u16>();
    test_shift_against_reference_common::<u32>();
    test_shift_against_reference_common::<u64>();
}
