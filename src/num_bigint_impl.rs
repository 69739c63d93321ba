//! Conversions between [`Integer`] and [`num_bigint::BigInt`].

use num_bigint::{BigInt, BigUint, Sign};

use super::error::ConversionError;
use super::integer::Integer;
use super::limb::Limb;
use super::ops::ToInteger;

impl<L: Limb> From<&Integer<L>> for BigInt {
    fn from(value: &Integer<L>) -> Self {
        match value {
            Integer::Small(v) => BigInt::from(*v),
            Integer::Big(_) => {
                let mut digits = Vec::new();
                let mut digit = 0u32;
                let mut digit_bits = 0u32;
                // BigUint takes 32 bit digits, split or merge limbs accordingly.
                for limb in value.magnitude_limbs() {
                    let limb = limb.to_u64();
                    let mut consumed = 0;
                    while consumed < L::BITS {
                        let take = (L::BITS - consumed).min(u32::BITS - digit_bits);
                        let bits = (limb >> consumed) & ((1u64 << take) - 1);
                        digit |= (bits as u32) << digit_bits;
                        digit_bits += take;
                        consumed += take;
                        if digit_bits == u32::BITS {
                            digits.push(digit);
                            digit = 0;
                            digit_bits = 0;
                        }
                    }
                }
                if digit_bits != 0 {
                    digits.push(digit);
                }
                let sign = if value.is_negative() {
                    Sign::Minus
                } else {
                    Sign::Plus
                };
                BigInt::from_biguint(sign, BigUint::new(digits))
            }
        }
    }
}

impl<L: Limb> From<&BigInt> for Integer<L> {
    fn from(value: &BigInt) -> Self {
        let (sign, digits) = value.to_u64_digits();
        let mut limbs = Vec::with_capacity(digits.len() * (u64::BITS / L::BITS) as usize);
        for digit in digits {
            let mut shift = 0;
            while shift < u64::BITS {
                limbs.push(L::from_u64(digit >> shift));
                shift += L::BITS;
            }
        }
        Integer::from_limbs(sign == Sign::Minus, limbs)
    }
}

impl<L: Limb> ToInteger<L> for BigInt {
    fn to_integer(&self) -> Result<Integer<L>, ConversionError> {
        Ok(Integer::from(self))
    }
}

#[cfg(test)]
fn test_bigint_conversions_common<L: Limb>() {
    use super::test_helpers::{forced_big, random_nonneg, test_rng};

    for v in [0i128, 1, -1, i64::MAX as i128, i64::MIN as i128, 1 << 64, -(1 << 100), i128::MAX] {
        let value = Integer::<L>::from(v);
        let big = BigInt::from(&value);
        assert_eq!(big, BigInt::from(v));
        let back = Integer::<L>::from(&big);
        assert_eq!(back, value);
        assert_eq!(back.is_small(), value.is_small());
    }

    assert_eq!(BigInt::from(&forced_big::<L>(true, 0)), BigInt::from(0));
    assert_eq!(BigInt::from(&forced_big::<L>(false, 0x1234)), BigInt::from(0x1234));

    let mut rng = test_rng();
    for nbits in [1u64, 63, 64, 65, 100, 257] {
        let (value, reference) = random_nonneg::<L>(&mut rng, nbits);
        assert_eq!(BigInt::from(&value), reference);
        assert_eq!(Integer::<L>::from(&reference), value);
    }
}

#[test]
fn test_bigint_conversions() {
    test_bigint_conversions_common::<u16>();
    test_bigint_conversions_common::<u32>();
    test_bigint_conversions_common::<u64>();
}

#[test]
fn test_bigint_distance() {
    let x = Integer::<u64>::from(0x0fu8);
    assert_eq!(x.lrot8(&BigInt::from(4)).unwrap(), Integer::from(0xf0u8));
    assert_eq!(x.lshift64(&(BigInt::from(1) << 200u32)).unwrap(), Integer::zero());
}
