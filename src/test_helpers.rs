//! Shared helpers for the unit tests: a reference model based on `num_bigint` and a seeded random
//! number generator.

use num_bigint::{BigInt, BigUint, RandomBits, Sign};
use num_traits::Zero as _;
use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha20Rng;

use super::integer::Integer;
use super::limb::Limb;
use super::limbs_buffer::MpLimbs;

/// Build an [`Integer::Big`] without renormalizing it, i.e. possibly non-canonical.
pub fn forced_big<L: Limb>(negative: bool, magnitude: u128) -> Integer<L> {
    Integer::Big(MpLimbs::from_u128(negative, magnitude))
}

/// Rebuild the exact same value as a non-canonical [`Integer::Big`], padded with two excess zero
/// limbs.
pub fn force_big<L: Limb>(value: &Integer<L>) -> Integer<L> {
    let mut limbs = value.magnitude_limbs();
    limbs.push(L::ZERO);
    limbs.push(L::ZERO);
    Integer::Big(MpLimbs::new(value.is_negative(), limbs))
}

pub fn to_ref<L: Limb>(value: &Integer<L>) -> BigInt {
    let mut magnitude = BigUint::zero();
    for limb in value.magnitude_limbs().iter().rev() {
        magnitude <<= L::BITS;
        magnitude += limb.to_u64();
    }
    let sign = if value.is_negative() {
        Sign::Minus
    } else {
        Sign::Plus
    };
    BigInt::from_biguint(sign, magnitude)
}

pub fn from_ref<L: Limb>(value: &BigInt) -> Integer<L> {
    let (sign, digits) = value.to_u64_digits();
    let mut limbs = Vec::new();
    for digit in digits {
        let mut i = 0;
        while i < u64::BITS {
            limbs.push(L::from_u64(digit >> i));
            i += L::BITS;
        }
    }
    Integer::from_limbs(sign == Sign::Minus, limbs)
}

pub fn test_rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0)
}

/// Draw a random non-negative value of at most `nbits` bits.
pub fn random_nonneg<L: Limb>(rng: &mut ChaCha20Rng, nbits: u64) -> (Integer<L>, BigInt) {
    let reference: BigUint = rng.sample(RandomBits::new(nbits));
    let reference = BigInt::from(reference);
    (from_ref(&reference), reference)
}

/// A sample of non-negative values covering both representations and the boundary between them.
pub fn sample_values<L: Limb>(rng: &mut ChaCha20Rng) -> Vec<Integer<L>> {
    let mut values: Vec<Integer<L>> = vec![
        Integer::zero(),
        Integer::from(1u8),
        Integer::from(0xffu8),
        Integer::from(0xaabb_ccddu32),
        Integer::from(i64::MAX - 1),
        Integer::from(i64::MAX),
        Integer::from(1u64 << 63),
        Integer::from(u64::MAX),
        Integer::from(1u128 << 64),
        Integer::from(u128::MAX),
    ];
    for nbits in [8, 16, 32, 48, 63, 64, 65, 90, 100, 200] {
        for _ in 0..8 {
            values.push(random_nonneg(rng, nbits).0);
        }
    }
    values
}

#[test]
fn test_reference_conversions() {
    fn check<L: Limb>() {
        let mut rng = test_rng();
        for value in sample_values::<L>(&mut rng) {
            let reference = to_ref(&value);
            assert_eq!(from_ref::<L>(&reference), value);
            assert_eq!(from_ref::<L>(&-reference.clone()), Integer::from_limbs(true, value.magnitude_limbs()));
            assert_eq!(to_ref(&force_big(&value)), reference);
        }
    }
    check::<u16>();
    check::<u32>();
    check::<u64>();
}
