//! Implementation of the circular shift primitives.
//!
//! A rotation acts on the `nbits` least significant bits of a non-negative integer's magnitude
//! only. The rotation distance is expected to be normalized into `0..nbits` already, see
//! [`rotate_distance()`](crate::distance::rotate_distance).

use super::integer::Integer;
use super::limb::{lsb_mask_u64, Limb};
use super::limbs_buffer::MpLimbs;
use super::renorm_impl::{demote, replace_low_bits_big, replace_low_bits_small};

fn rrot_window(window: u64, nbits: u32, rotd: u32) -> u64 {
    debug_assert!(rotd < nbits);
    if rotd == 0 {
        return window;
    }
    ((window >> rotd) | (window << (nbits - rotd))) & lsb_mask_u64(nbits)
}

fn lrot_window(window: u64, nbits: u32, rotd: u32) -> u64 {
    debug_assert!(rotd < nbits);
    if rotd == 0 {
        return window;
    }
    ((window << rotd) | (window >> (nbits - rotd))) & lsb_mask_u64(nbits)
}

pub fn small_rrot<L: Limb>(value: i64, nbits: u32, rotd: u32) -> Integer<L> {
    if rotd == 0 {
        return Integer::Small(value);
    }
    let window = value as u64 & lsb_mask_u64(nbits);
    replace_low_bits_small(value, nbits, rrot_window(window, nbits, rotd))
}

pub fn big_rrot<L: Limb>(big: &MpLimbs<L>, nbits: u32, rotd: u32) -> Integer<L> {
    if rotd == 0 {
        return demote(big.clone());
    }
    let window = big.load_low_bits(nbits);
    replace_low_bits_big(big, nbits, rrot_window(window, nbits, rotd))
}

pub fn small_lrot<L: Limb>(value: i64, nbits: u32, rotd: u32) -> Integer<L> {
    if rotd == 0 {
        return Integer::Small(value);
    }
    let window = value as u64 & lsb_mask_u64(nbits);
    replace_low_bits_small(value, nbits, lrot_window(window, nbits, rotd))
}

pub fn big_lrot<L: Limb>(big: &MpLimbs<L>, nbits: u32, rotd: u32) -> Integer<L> {
    if rotd == 0 {
        return demote(big.clone());
    }
    let window = big.load_low_bits(nbits);
    replace_low_bits_big(big, nbits, lrot_window(window, nbits, rotd))
}

#[test]
fn test_rotate_window() {
    assert_eq!(rrot_window(0b0111_0001, 8, 1), 0b1011_1000);
    assert_eq!(lrot_window(0b1011_1000, 8, 1), 0b0111_0001);
    assert_eq!(lrot_window(0xaabb_ccdd, 32, 4), 0xabbc_cdda);
    assert_eq!(rrot_window(0xabbc_cdda, 32, 4), 0xaabb_ccdd);
    assert_eq!(rrot_window(1, 64, 1), 1 << 63);
    assert_eq!(lrot_window(1 << 63, 64, 1), 1);
    assert_eq!(rrot_window(0x1234, 16, 0), 0x1234);

    for nbits in [8u32, 16, 32, 64] {
        let window = 0x0123_4567_89ab_cdef & lsb_mask_u64(nbits);
        for rotd in 0..nbits {
            assert_eq!(lrot_window(rrot_window(window, nbits, rotd), nbits, rotd), window);
            assert_eq!(rrot_window(window, nbits, rotd), lrot_window(window, nbits, (nbits - rotd) % nbits));
        }
    }
}

#[cfg(test)]
fn test_rotate_against_reference_common<L: Limb>() {
    use super::test_helpers::{from_ref, sample_values, test_rng, to_ref};
    use num_bigint::BigInt;

    let mut rng = test_rng();
    for value in sample_values::<L>(&mut rng) {
        let reference = to_ref(&value);
        for nbits in [8u32, 16, 32, 64] {
            let mask: BigInt = (BigInt::from(1) << nbits) - 1;
            let high = &reference & !mask.clone();
            let window = &reference & &mask;
            for rotd in 0..nbits {
                let rrot_ref = ((&window >> rotd) | (&window << (nbits - rotd))) & &mask;
                let lrot_ref = ((&window << rotd) | (&window >> (nbits - rotd))) & &mask;
                let expected_rrot: Integer<L> = from_ref(&(&high | rrot_ref));
                let expected_lrot: Integer<L> = from_ref(&(&high | lrot_ref));

                let (rrot, lrot) = match &value {
                    Integer::Small(v) => (
                        small_rrot::<L>(*v, nbits, rotd),
                        small_lrot::<L>(*v, nbits, rotd),
                    ),
                    Integer::Big(b) => (big_rrot(b, nbits, rotd), big_lrot(b, nbits, rotd)),
                };
                assert_eq!(rrot, expected_rrot);
                assert_eq!(rrot.is_small(), expected_rrot.is_small());
                assert_eq!(lrot, expected_lrot);
                assert_eq!(lrot.is_small(), expected_lrot.is_small());
            }
        }
    }
}

#[test]
fn test_rotate_against_reference() {
    test_rotate_against_reference_common::<u16>();
    test_rotate_against_reference_common::<u32>();
    test_rotate_against_reference_common::<u64>();
}
