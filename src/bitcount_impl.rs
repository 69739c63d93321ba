//! Implementation of the whole-magnitude bit counting primitives.
//!
//! Unlike the per-width window operations, these look at every bit of the magnitude. Both
//! representations are handled on the magnitude, the caller is responsible for rejecting negative
//! operands.

use super::limb::{find_first_set_bit_l, find_last_set_bit_l, Limb};
use super::limbs_buffer::MpLimbs;

pub fn small_popcount(value: i64) -> u64 {
    value.unsigned_abs().count_ones() as u64
}

pub fn big_popcount<L: Limb>(big: &MpLimbs<L>) -> u64 {
    big.limbs().iter().map(|l| l.count_ones() as u64).sum()
}

/// One-based index of the least significant set bit, zero for zero.
pub fn small_lo_bit(value: i64) -> u64 {
    let magnitude = value.unsigned_abs();
    if magnitude == 0 {
        0
    } else {
        magnitude.trailing_zeros() as u64 + 1
    }
}

/// One-based index of the least significant set bit, zero for zero.
pub fn big_lo_bit<L: Limb>(big: &MpLimbs<L>) -> u64 {
    let mut bits = 0u64;
    for limb in big.limbs() {
        if *limb != L::ZERO {
            return bits + find_first_set_bit_l(*limb) as u64;
        }
        bits += L::BITS as u64;
    }
    0
}

/// One-based index of the most significant set bit, zero for zero.
pub fn small_hi_bit(value: i64) -> u64 {
    (u64::BITS - value.unsigned_abs().leading_zeros()) as u64
}

/// One-based index of the most significant set bit, zero for zero.
pub fn big_hi_bit<L: Limb>(big: &MpLimbs<L>) -> u64 {
    let nlimbs = big.find_last_set_limb();
    if nlimbs == 0 {
        return 0;
    }
    (nlimbs as u64 - 1) * L::BITS as u64 + find_last_set_bit_l(big.load_l(nlimbs - 1)) as u64
}

/// Count the set bits in a byte sequence.
pub fn popcount_bytes(bytes: &[u8]) -> u64 {
    let mut chunks = bytes.chunks_exact(8);
    let mut bits: u64 = 0;
    for chunk in &mut chunks {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        bits += u64::from_ne_bytes(word).count_ones() as u64;
    }
    for b in chunks.remainder() {
        bits += b.count_ones() as u64;
    }
    bits
}

#[test]
fn test_popcount_bytes() {
    assert_eq!(popcount_bytes(&[]), 0);
    assert_eq!(popcount_bytes(&[0xff]), 8);
    assert_eq!(popcount_bytes(&[0x07, 0x00, 0x80]), 4);
    assert_eq!(popcount_bytes(b"abc"), 3 + 3 + 4);

    let long: Vec<u8> = (0..=255u8).collect();
    let expected: u64 = (0..=255u8).map(|b| b.count_ones() as u64).sum();
    assert_eq!(popcount_bytes(&long), expected);
    assert_eq!(popcount_bytes(&long[3..]), expected - (0 + 1 + 1));
}

#[test]
fn test_small_bit_counts() {
    assert_eq!(small_popcount(0), 0);
    assert_eq!(small_popcount(255), 8);
    assert_eq!(small_popcount(7), 3);
    assert_eq!(small_popcount(i64::MAX), 63);

    assert_eq!(small_lo_bit(0), 0);
    assert_eq!(small_hi_bit(0), 0);
    for n in 0..63 {
        assert_eq!(small_lo_bit(1 << n), n + 1);
        assert_eq!(small_lo_bit(3 << n.min(61)), n.min(61) + 1);
        assert_eq!(small_hi_bit(1 << n), n + 1);
        assert_eq!(small_hi_bit((1 << n) - 1), n);
        if n > 0 {
            assert_eq!(small_lo_bit((1 << n) - 1), 1);
        }
    }
}

#[cfg(test)]
fn test_big_bit_counts_common<L: Limb>() {
    for n in 0..200u32 {
        let single = MpLimbs::<L>::new(false, {
            let mut limbs = vec![L::ZERO; (n / L::BITS + 2) as usize];
            limbs[(n / L::BITS) as usize] = L::from_u64(1 << (n % L::BITS));
            limbs
        });
        assert_eq!(big_popcount(&single), 1);
        assert_eq!(big_lo_bit(&single), n as u64 + 1);
        assert_eq!(big_hi_bit(&single), n as u64 + 1);

        // (1 << n) - 1
        let ones = MpLimbs::<L>::new(false, {
            let mut limbs = vec![L::from_u64(!0); (n / L::BITS) as usize];
            limbs.push(L::from_u64((1 << (n % L::BITS)) - 1));
            limbs
        });
        assert_eq!(big_popcount(&ones), n as u64);
        assert_eq!(big_hi_bit(&ones), n as u64);
        assert_eq!(big_lo_bit(&ones), if n == 0 { 0 } else { 1 });
    }

    let zero = MpLimbs::<L>::new(false, vec![L::ZERO; 3]);
    assert_eq!(big_popcount(&zero), 0);
    assert_eq!(big_lo_bit(&zero), 0);
    assert_eq!(big_hi_bit(&zero), 0);
}

#[test]
fn test_big_bit_counts() {
    test_big_bit_counts_common::<u16>();
    test_big_bit_counts_common::<u32>();
    test_big_bit_counts_common::<u64>();
}
