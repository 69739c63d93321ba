//! Implementation of the byte and bit order reversal primitives.
//!
//! Both reverse the `nbits` least significant bits of a non-negative integer's magnitude, leaving
//! all bits above unchanged.

use super::integer::Integer;
use super::limb::{lsb_mask_u64, Limb};
use super::limbs_buffer::MpLimbs;
use super::renorm_impl::{demote, replace_low_bits_big, replace_low_bits_small};

fn bswap_window(window: u64, nbits: u32) -> u64 {
    debug_assert!(nbits % 8 == 0 && nbits >= 8 && nbits <= u64::BITS);
    window.swap_bytes() >> (u64::BITS - nbits)
}

fn bitreverse_window(window: u64, nbits: u32) -> u64 {
    debug_assert!(nbits >= 1 && nbits <= u64::BITS);
    window.reverse_bits() >> (u64::BITS - nbits)
}

pub fn small_bswap<L: Limb>(value: i64, nbits: u32) -> Integer<L> {
    if nbits == 8 {
        return Integer::Small(value);
    }
    let window = value as u64 & lsb_mask_u64(nbits);
    replace_low_bits_small(value, nbits, bswap_window(window, nbits))
}

pub fn big_bswap<L: Limb>(big: &MpLimbs<L>, nbits: u32) -> Integer<L> {
    if nbits == 8 {
        return demote(big.clone());
    }
    let window = big.load_low_bits(nbits);
    replace_low_bits_big(big, nbits, bswap_window(window, nbits))
}

pub fn small_bitreverse<L: Limb>(value: i64, nbits: u32) -> Integer<L> {
    let window = value as u64 & lsb_mask_u64(nbits);
    replace_low_bits_small(value, nbits, bitreverse_window(window, nbits))
}

pub fn big_bitreverse<L: Limb>(big: &MpLimbs<L>, nbits: u32) -> Integer<L> {
    let window = big.load_low_bits(nbits);
    replace_low_bits_big(big, nbits, bitreverse_window(window, nbits))
}

#[test]
fn test_bswap_window() {
    assert_eq!(bswap_window(0xab, 8), 0xab);
    assert_eq!(bswap_window(0xaabb, 16), 0xbbaa);
    assert_eq!(bswap_window(0xaabb_ccdd, 32), 0xddcc_bbaa);
    assert_eq!(bswap_window(0x0102_0304_0506_0708, 64), 0x0807_0605_0403_0201);
}

#[test]
fn test_bitreverse_window() {
    for (a, b) in [
        (0u64, 0u64),
        (1, 128),
        (2, 64),
        (3, 192),
        (4, 32),
        (11, 208),
        (15, 240),
        (0b1010_1010, 0b0101_0101),
        (254, 127),
        (255, 255),
    ] {
        assert_eq!(bitreverse_window(a, 8), b);
    }
    assert_eq!(bitreverse_window(1, 16), 1 << 15);
    assert_eq!(bitreverse_window(255, 16), 0xff00);
    assert_eq!(bitreverse_window(3, 32), 3 << 30);
    assert_eq!(bitreverse_window(255, 32), 0xff00_0000);
    assert_eq!(bitreverse_window(4, 64), 1 << 61);
    assert_eq!(bitreverse_window(255, 64), 0xff00_0000_0000_0000);
}

#[cfg(test)]
fn test_reorder_against_reference_common<L: Limb>() {
    use super::test_helpers::{from_ref, sample_values, test_rng, to_ref};
    use num_bigint::BigInt;

    let mut rng = test_rng();
    for value in sample_values::<L>(&mut rng) {
        let reference = to_ref(&value);
        for nbits in [8u32, 16, 32, 64] {
            let mask: BigInt = (BigInt::from(1) << nbits) - 1;
            let high = &reference & !mask.clone();
            let window = u64::try_from(&reference & &mask).unwrap();

            let expected_bswap: Integer<L> =
                from_ref(&(high.clone() | BigInt::from(bswap_window_ref(window, nbits))));
            let expected_bitrev: Integer<L> =
                from_ref(&(high | BigInt::from(bitreverse_window(window, nbits))));

            let (bswapped, bitreversed) = match &value {
                Integer::Small(v) => (small_bswap::<L>(*v, nbits), small_bitreverse::<L>(*v, nbits)),
                Integer::Big(b) => (big_bswap(b, nbits), big_bitreverse(b, nbits)),
            };
            assert_eq!(bswapped, expected_bswap);
            assert_eq!(bswapped.is_small(), expected_bswap.is_small());
            assert_eq!(bitreversed, expected_bitrev);
            assert_eq!(bitreversed.is_small(), expected_bitrev.is_small());
        }
    }
}

#[cfg(test)]
fn bswap_window_ref(window: u64, nbits: u32) -> u64 {
    let bytes = window.to_le_bytes();
    let nbytes = (nbits / 8) as usize;
    let mut swapped = 0u64;
    for (i, b) in bytes[..nbytes].iter().enumerate() {
        swapped |= (*b as u64) << (8 * (nbytes - 1 - i));
    }
    swapped
}

#[test]
fn test_reorder_against_reference() {
    test_reorder_against_reference_common::<u16>();
    test_reorder_against_reference_common::<u32>();
    test_reorder_against_reference_common::<u64>();
}

#[cfg(test)]
fn test_bswap64_promotes_small_common<L: Limb>() {
    // 0x80 swapped into the top byte leaves the small range.
    let swapped = small_bswap::<L>(0x80, 64);
    assert!(swapped.is_big());
    assert_eq!(swapped, Integer::from(0x8000_0000_0000_0000u64));

    // And swapping back collapses to small again.
    match &swapped {
        Integer::Big(b) => {
            let back = big_bswap(b, 64);
            assert!(back.is_small());
            assert_eq!(back, Integer::Small(0x80));
        }
        Integer::Small(_) => unreachable!(),
    }
}

#[test]
fn test_bswap64_promotes_small() {
    test_bswap64_promotes_small_common::<u16>();
    test_bswap64_promotes_small_common::<u32>();
    test_bswap64_promotes_small_common::<u64>();
}
