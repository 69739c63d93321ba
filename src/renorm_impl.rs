//! Renormalization between the small and the big integer representations.
//!
//! Results are always handed out in canonical form: a value whose magnitude fits the
//! [`Integer::Small`] range is never returned as [`Integer::Big`], and a big value never carries
//! leading zero limbs.

use tracing::trace;

use super::integer::Integer;
use super::limb::{lsb_mask_u64, nlimbs_for_bits, Limb};
use super::limbs_buffer::MpLimbs;

/// Fit a sign and a 64 bit magnitude into the small range, if possible.
///
/// The small range is asymmetric, `-2^63` fits while `2^63` doesn't.
pub fn small_from_sign_magnitude(negative: bool, magnitude: u64) -> Option<i64> {
    if !negative {
        i64::try_from(magnitude).ok()
    } else if magnitude <= 1 << 63 {
        Some((magnitude as i64).wrapping_neg())
    } else {
        None
    }
}

#[test]
fn test_small_from_sign_magnitude() {
    assert_eq!(small_from_sign_magnitude(false, 0), Some(0));
    assert_eq!(small_from_sign_magnitude(true, 0), Some(0));
    assert_eq!(small_from_sign_magnitude(false, i64::MAX as u64), Some(i64::MAX));
    assert_eq!(small_from_sign_magnitude(false, 1 << 63), None);
    assert_eq!(small_from_sign_magnitude(true, 1 << 63), Some(i64::MIN));
    assert_eq!(small_from_sign_magnitude(true, (1 << 63) + 1), None);
    assert_eq!(small_from_sign_magnitude(true, 5), Some(-5));
}

/// Demote a big value, collapsing it to [`Integer::Small`] if its magnitude fits.
///
/// Leading zero limbs are stripped first. If the value stays big, its limb sequence is shrunk to
/// the trimmed length.
pub fn demote<L: Limb>(mut big: MpLimbs<L>) -> Integer<L> {
    let nlimbs = big.find_last_set_limb();
    if nlimbs == 0 {
        trace!("big zero collapsed to small");
        return Integer::Small(0);
    }

    if nlimbs <= nlimbs_for_bits::<L>(u64::BITS) {
        let magnitude = big.load_low_bits(u64::BITS);
        if let Some(value) = small_from_sign_magnitude(big.is_negative(), magnitude) {
            trace!(nlimbs, "big value collapsed to small");
            return Integer::Small(value);
        }
    }

    big.resize(nlimbs);
    Integer::Big(big)
}

/// Build an integer from a sign and a magnitude of up to 128 bits.
///
/// Values outside the small range get promoted to [`Integer::Big`].
pub fn promote<L: Limb>(negative: bool, magnitude: u128) -> Integer<L> {
    if let Ok(magnitude) = u64::try_from(magnitude) {
        if let Some(value) = small_from_sign_magnitude(negative, magnitude) {
            return Integer::Small(value);
        }
    }
    trace!(negative, "promoting to big");
    demote(MpLimbs::from_u128(negative, magnitude))
}

/// Replace the `nbits` least significant bits of a non-negative small value.
///
/// Bits above the window are kept. The result is promoted if it leaves the small range, which
/// happens for 64 bit windows when the window's top bit ends up set.
pub fn replace_low_bits_small<L: Limb>(value: i64, nbits: u32, window: u64) -> Integer<L> {
    debug_assert!(value >= 0);
    let mask = lsb_mask_u64(nbits);
    let magnitude = (value as u64 & !mask) | (window & mask);
    promote(false, magnitude as u128)
}

/// Replace the `nbits` least significant bits of a big value's magnitude.
///
/// The source is left untouched: the result is built on a private copy of its limbs and then
/// demoted, as the new window contents may have cleared all of the value's significant bits
/// above the small range.
pub fn replace_low_bits_big<L: Limb>(big: &MpLimbs<L>, nbits: u32, window: u64) -> Integer<L> {
    let window_nlimbs = nlimbs_for_bits::<L>(nbits);
    let mut result = big.clone_with_capacity(window_nlimbs);
    result.store_low_bits(nbits, window);
    demote(result)
}

#[cfg(test)]
fn test_demote_common<L: Limb>() {
    // Zero, possibly with excess limbs.
    let zero = MpLimbs::<L>::new(true, vec![L::ZERO; 5]);
    assert!(matches!(demote(zero), Integer::Small(0)));

    // Largest positive small value.
    let max = MpLimbs::<L>::from_u128(false, i64::MAX as u128);
    assert!(matches!(demote(max), Integer::Small(i64::MAX)));

    // One past it.
    let big = MpLimbs::<L>::from_u128(false, 1 << 63);
    match demote(big) {
        Integer::Big(b) => {
            assert_eq!(b.nlimbs(), nlimbs_for_bits::<L>(64));
            assert_eq!(b.magnitude_u64(), Some(1 << 63));
        }
        Integer::Small(_) => panic!("2^63 must stay big"),
    }

    // The most negative small value, and one below it.
    let min = MpLimbs::<L>::from_u128(true, 1 << 63);
    assert!(matches!(demote(min), Integer::Small(i64::MIN)));
    let below_min = MpLimbs::<L>::from_u128(true, (1 << 63) + 1);
    assert!(matches!(demote(below_min), Integer::Big(_)));

    // Leading zero limbs get trimmed off values that stay big.
    let mut padded = MpLimbs::<L>::from_u128(false, 1 << 100);
    padded.resize(padded.nlimbs() + 4);
    match demote(padded) {
        Integer::Big(b) => {
            assert_eq!(b.nlimbs(), (100 / L::BITS + 1) as usize);
            assert_eq!(b.find_last_set_limb(), b.nlimbs());
        }
        Integer::Small(_) => panic!("2^100 must stay big"),
    }
}

#[test]
fn test_demote() {
    test_demote_common::<u16>();
    test_demote_common::<u32>();
    test_demote_common::<u64>();
}

#[cfg(test)]
fn test_promote_common<L: Limb>() {
    assert!(matches!(promote::<L>(false, 0), Integer::Small(0)));
    assert!(matches!(promote::<L>(true, 7), Integer::Small(-7)));
    assert!(matches!(promote::<L>(false, u64::MAX as u128), Integer::Big(_)));
    match promote::<L>(true, 1 << 64) {
        Integer::Big(b) => {
            assert!(b.is_negative());
            assert_eq!(b.nlimbs(), (64 / L::BITS + 1) as usize);
        }
        Integer::Small(_) => panic!("-2^64 must be big"),
    }
}

#[test]
fn test_promote() {
    test_promote_common::<u16>();
    test_promote_common::<u32>();
    test_promote_common::<u64>();
}

#[cfg(test)]
fn test_replace_low_bits_common<L: Limb>() {
    // A small value whose 64 bit window gets its top bit set needs promotion.
    assert!(matches!(
        replace_low_bits_small::<L>(0x80, 64, 0x8000_0000_0000_0000),
        Integer::Big(_)
    ));
    assert!(matches!(
        replace_low_bits_small::<L>(0x1122_3344, 8, 0x10),
        Integer::Small(0x1122_3310)
    ));

    // Clearing the top limb's bits of a one-limb-past-small value makes it small again.
    let big = MpLimbs::<L>::from_u128(false, u64::MAX as u128);
    assert!(matches!(replace_low_bits_big(&big, 64, 0x7f), Integer::Small(0x7f)));
    // The source stays untouched.
    assert_eq!(big.magnitude_u64(), Some(u64::MAX));

    // Bits above the window survive.
    let huge = MpLimbs::<L>::from_u128(false, (1 << 100) | 0xff);
    match replace_low_bits_big(&huge, 8, 0x0f) {
        Integer::Big(b) => {
            assert_eq!(b.load_low_bits(8), 0x0f);
            assert_eq!(b.find_last_set_limb(), (100 / L::BITS + 1) as usize);
        }
        Integer::Small(_) => panic!("2^100 + 15 must stay big"),
    }
}

#[test]
fn test_replace_low_bits() {
    test_replace_low_bits_common::<u16>();
    test_replace_low_bits_common::<u32>();
    test_replace_low_bits_common::<u64>();
}
