//! The dual-representation arbitrary-precision integer.

use core::cmp;

use super::error::ConversionError;
use super::limb::{Limb, LimbType};
use super::limbs_buffer::MpLimbs;
use super::renorm_impl::{demote, promote};

/// Smallest value held in the [`Integer::Small`] representation.
pub const SMALL_MIN: i64 = i64::MIN;
/// Largest value held in the [`Integer::Small`] representation.
pub const SMALL_MAX: i64 = i64::MAX;

/// A signed arbitrary-precision integer.
///
/// Values in `SMALL_MIN..=SMALL_MAX` are stored inline as [`Integer::Small`], anything else as a
/// sign and a heap allocated limb sequence in [`Integer::Big`]. All operations of this crate
/// return canonical values, i.e. never a `Big` whose magnitude would fit `Small`. A hand-built
/// `Big` may violate that, [`Integer::normalize()`] brings it back into canonical form.
///
/// Equality compares values, not representations: a non-canonical `Big` compares equal to the
/// `Small` holding the same value. Use [`Integer::is_small()`] to check the representation.
///
/// Integers are immutable. Cloning a `Big` shares its limb buffer.
#[derive(Clone, Debug)]
pub enum Integer<L: Limb = LimbType> {
    Small(i64),
    Big(MpLimbs<L>),
}

impl<L: Limb> Integer<L> {
    pub const fn zero() -> Self {
        Self::Small(0)
    }

    /// Build an integer from a sign and a magnitude, picking the representation.
    pub fn from_sign_magnitude(negative: bool, magnitude: u128) -> Self {
        promote(negative, magnitude)
    }

    /// Build an integer from a sign and little-endian limbs, picking the representation.
    pub fn from_limbs(negative: bool, limbs: Vec<L>) -> Self {
        demote(MpLimbs::new(negative, limbs))
    }

    /// Bring a possibly hand-built value into canonical form.
    pub fn normalize(self) -> Self {
        match self {
            Self::Small(_) => self,
            Self::Big(big) => demote(big),
        }
    }

    pub fn is_small(&self) -> bool {
        matches!(self, Self::Small(_))
    }

    pub fn is_big(&self) -> bool {
        matches!(self, Self::Big(_))
    }

    /// Whether the value is strictly negative.
    ///
    /// A non-canonical negative zero is not negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Small(value) => *value < 0,
            Self::Big(big) => big.is_negative() && big.find_last_set_limb() != 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Small(value) => *value == 0,
            Self::Big(big) => big.find_last_set_limb() == 0,
        }
    }

    /// The value's magnitude as a limb sequence without leading zero limbs.
    ///
    /// Zero yields an empty sequence.
    pub fn magnitude_limbs(&self) -> Vec<L> {
        match self {
            Self::Small(value) => {
                let big = MpLimbs::<L>::from_u128(false, value.unsigned_abs() as u128);
                big.limbs()[..big.find_last_set_limb()].to_vec()
            }
            Self::Big(big) => big.limbs()[..big.find_last_set_limb()].to_vec(),
        }
    }
}

impl<L: Limb> Default for Integer<L> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<L: Limb> cmp::PartialEq for Integer<L> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Small(v0), Self::Small(v1)) => v0 == v1,
            _ => {
                self.is_negative() == other.is_negative()
                    && self.magnitude_limbs() == other.magnitude_limbs()
            }
        }
    }
}

impl<L: Limb> cmp::Eq for Integer<L> {}

macro_rules! impl_from_small_prim {
    ($($t:ty),*) => {
        $(
            impl<L: Limb> From<$t> for Integer<L> {
                fn from(value: $t) -> Self {
                    Self::Small(value as i64)
                }
            }
        )*
    };
}

impl_from_small_prim!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_prim {
    ($($t:ty),*) => {
        $(
            impl<L: Limb> From<$t> for Integer<L> {
                fn from(value: $t) -> Self {
                    let value = value as i128;
                    promote(value < 0, value.unsigned_abs())
                }
            }
        )*
    };
}

impl_from_wide_prim!(isize, u64, usize);

impl<L: Limb> From<i128> for Integer<L> {
    fn from(value: i128) -> Self {
        promote(value < 0, value.unsigned_abs())
    }
}

impl<L: Limb> From<u128> for Integer<L> {
    fn from(value: u128) -> Self {
        promote(false, value)
    }
}

impl<L: Limb> From<MpLimbs<L>> for Integer<L> {
    fn from(value: MpLimbs<L>) -> Self {
        demote(value)
    }
}

impl<L: Limb> TryFrom<&Integer<L>> for i64 {
    type Error = ConversionError;

    fn try_from(value: &Integer<L>) -> Result<Self, Self::Error> {
        match value {
            Integer::Small(value) => Ok(*value),
            Integer::Big(_) => match value.clone().normalize() {
                Integer::Small(value) => Ok(value),
                Integer::Big(_) => Err(ConversionError::OutOfRange),
            },
        }
    }
}

impl<L: Limb> TryFrom<&Integer<L>> for u64 {
    type Error = ConversionError;

    fn try_from(value: &Integer<L>) -> Result<Self, Self::Error> {
        if value.is_negative() {
            return Err(ConversionError::OutOfRange);
        }
        match value {
            Integer::Small(value) => Ok(*value as u64),
            Integer::Big(big) => big.magnitude_u64().ok_or(ConversionError::OutOfRange),
        }
    }
}

#[cfg(test)]
fn test_integer_from_common<L: Limb>() {
    assert!(Integer::<L>::from(-5i8).is_small());
    assert!(Integer::<L>::from(u32::MAX).is_small());
    assert!(Integer::<L>::from(i64::MAX as u64).is_small());
    assert!(Integer::<L>::from(1u64 << 63).is_big());
    assert!(Integer::<L>::from(i64::MIN as i128).is_small());
    assert!(Integer::<L>::from(i64::MIN as i128 - 1).is_big());
    assert!(Integer::<L>::from(u128::MAX).is_big());

    assert_eq!(i64::try_from(&Integer::<L>::from(-42i32)), Ok(-42));
    assert_eq!(
        i64::try_from(&Integer::<L>::from(1u64 << 63)),
        Err(ConversionError::OutOfRange)
    );
    assert_eq!(u64::try_from(&Integer::<L>::from(u64::MAX)), Ok(u64::MAX));
    assert_eq!(
        u64::try_from(&Integer::<L>::from(-1i32)),
        Err(ConversionError::OutOfRange)
    );
    assert_eq!(
        u64::try_from(&Integer::<L>::from(1u128 << 64)),
        Err(ConversionError::OutOfRange)
    );
}

#[test]
fn test_integer_from() {
    test_integer_from_common::<u16>();
    test_integer_from_common::<u32>();
    test_integer_from_common::<u64>();
}

#[cfg(test)]
fn test_integer_eq_by_value_common<L: Limb>() {
    // A hand-built, non-canonical big 5 equals the small 5.
    let forced = Integer::<L>::Big(MpLimbs::new(false, vec![L::from_u64(5), L::ZERO, L::ZERO]));
    assert!(forced.is_big());
    assert_eq!(forced, Integer::Small(5));
    assert_ne!(forced, Integer::Small(-5));

    let normalized = forced.normalize();
    assert!(normalized.is_small());
    assert_eq!(normalized, Integer::Small(5));

    // Negative zero is zero.
    let neg_zero = Integer::<L>::Big(MpLimbs::new(true, vec![L::ZERO; 2]));
    assert!(!neg_zero.is_negative());
    assert!(neg_zero.is_zero());
    assert_eq!(neg_zero, Integer::zero());

    let a = Integer::<L>::from(1u128 << 90);
    let b = Integer::<L>::from(1u128 << 90);
    assert_eq!(a, b);
    assert_ne!(a, Integer::<L>::from(-(1i128 << 90)));
    assert_ne!(a, Integer::<L>::from(1u128 << 91));
}

#[test]
fn test_integer_eq_by_value() {
    test_integer_eq_by_value_common::<u16>();
    test_integer_eq_by_value_common::<u32>();
    test_integer_eq_by_value_common::<u64>();
}

#[cfg(test)]
fn test_integer_from_limbs_common<L: Limb>() {
    let v = Integer::<L>::from_limbs(false, vec![L::from_u64(0x12), L::ZERO]);
    assert!(matches!(v, Integer::Small(0x12)));
    let v = Integer::<L>::from_limbs(true, Vec::new());
    assert!(matches!(v, Integer::Small(0)));

    let limbs = Integer::<L>::from(u128::MAX).magnitude_limbs();
    assert_eq!(limbs.len(), (128 / L::BITS) as usize);
    assert!(limbs.iter().all(|l| *l == L::from_u64(!0)));
    assert!(Integer::<L>::zero().magnitude_limbs().is_empty());
}

#[test]
fn test_integer_from_limbs() {
    test_integer_from_limbs_common::<u16>();
    test_integer_from_limbs_common::<u32>();
    test_integer_from_limbs_common::<u64>();
}
