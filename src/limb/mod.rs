//! Definitions and bit primitives related to [`Limb`], the basic unit of the multiprecision
//! integer representation.
use core::fmt;
use core::hash;

/// The default limb type used by [`Integer`](crate::Integer).
///
/// # Notes
///
/// Any [`Limb`] implementation may be plugged into [`Integer`](crate::Integer) as a type
/// parameter, the limb width is fixed at compile time for a given instantiation. The default
/// follows the target's native word: wider limbs mean fewer limbs to walk for the whole-magnitude
/// operations, while the per-width window operations never touch more than the
/// `64 / Limb::BITS` least significant limbs anyway.
///
#[cfg(not(target_pointer_width = "64"))]
pub type LimbType = u32;
#[cfg(target_pointer_width = "64")]
pub type LimbType = u64;

/// The bit width of a [`LimbType`].
pub const LIMB_BITS: u32 = LimbType::BITS;

#[cfg(feature = "zeroize")]
mod limb_zeroize {
    /// Limbs must be wipeable when the `zeroize` feature is enabled.
    pub trait LimbZeroize: zeroize::DefaultIsZeroes {}

    impl<T: zeroize::DefaultIsZeroes> LimbZeroize for T {}
}

#[cfg(not(feature = "zeroize"))]
mod limb_zeroize {
    pub trait LimbZeroize {}

    impl<T> LimbZeroize for T {}
}

pub use limb_zeroize::LimbZeroize;

/// An unsigned machine word used as a multiprecision integer digit.
///
/// Implemented for `u16`, `u32` and `u64`. A limb must be at least 8 bits wide so that a rotation
/// distance modulo any supported operation width (at most 64) can be read off the least
/// significant limb alone.
pub trait Limb:
    Copy + Default + Eq + Ord + hash::Hash + fmt::Debug + fmt::LowerHex + Send + Sync + LimbZeroize + 'static
{
    /// The bit width of the limb.
    const BITS: u32;
    /// The all-zeroes limb.
    const ZERO: Self;

    /// Truncate a `u64` to the limb's width.
    fn from_u64(v: u64) -> Self;

    /// Zero-extend the limb to a `u64`.
    ///
    /// Limbs wider than 64 bits are not supported, so this is lossless.
    fn to_u64(self) -> u64;

    fn count_ones(self) -> u32;

    fn trailing_zeros(self) -> u32;

    fn leading_zeros(self) -> u32;
}

macro_rules! impl_limb {
    ($($t:ty),*) => {
        $(
            impl Limb for $t {
                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;

                #[inline(always)]
                fn from_u64(v: u64) -> Self {
                    v as $t
                }

                #[inline(always)]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                #[inline(always)]
                fn count_ones(self) -> u32 {
                    <$t>::count_ones(self)
                }

                #[inline(always)]
                fn trailing_zeros(self) -> u32 {
                    <$t>::trailing_zeros(self)
                }

                #[inline(always)]
                fn leading_zeros(self) -> u32 {
                    <$t>::leading_zeros(self)
                }
            }
        )*
    };
}

impl_limb!(u16, u32, u64);

/// Generate a `u64` mask with the `nbits` least significant bits set.
///
/// # Arguments
///
/// * `nbits` - The number of low bits to set, must be `<= 64`.
///
pub const fn lsb_mask_u64(nbits: u32) -> u64 {
    debug_assert!(nbits <= u64::BITS);
    // (1 << nbits) - 1 would overflow for nbits == 64, split off the full-width case.
    let nbits_lo = nbits % u64::BITS;
    let nbits_hi = nbits / u64::BITS;
    let mask_for_lo = (1u64 << nbits_lo) - 1;
    let mask_for_hi = 0u64.wrapping_sub(nbits_hi as u64);
    mask_for_lo | mask_for_hi
}

#[test]
fn test_lsb_mask_u64() {
    for i in 0..u64::BITS {
        let mask = lsb_mask_u64(i);
        assert_eq!(mask, (1 << i) - 1);
    }
    assert_eq!(lsb_mask_u64(u64::BITS), !0);
}

/// Determine the number of limbs needed to cover `nbits` bits.
pub fn nlimbs_for_bits<L: Limb>(nbits: u32) -> usize {
    ((nbits + L::BITS - 1) / L::BITS) as usize
}

#[cfg(test)]
fn test_nlimbs_for_bits_common<L: Limb>() {
    assert_eq!(nlimbs_for_bits::<L>(0), 0);
    assert_eq!(nlimbs_for_bits::<L>(1), 1);
    assert_eq!(nlimbs_for_bits::<L>(L::BITS - 1), 1);
    assert_eq!(nlimbs_for_bits::<L>(L::BITS), 1);
    assert_eq!(nlimbs_for_bits::<L>(L::BITS + 1), 2);
    assert_eq!(nlimbs_for_bits::<L>(64), (64 / L::BITS) as usize);
}

#[test]
fn test_nlimbs_for_bits() {
    test_nlimbs_for_bits_common::<u16>();
    test_nlimbs_for_bits_common::<u32>();
    test_nlimbs_for_bits_common::<u64>();
}

// Position of MSB + 1, if any, zero otherwise.
pub fn find_last_set_bit_l<L: Limb>(v: L) -> u32 {
    L::BITS - v.leading_zeros()
}

// Position of LSB + 1, if any, zero otherwise.
pub fn find_first_set_bit_l<L: Limb>(v: L) -> u32 {
    if v == L::ZERO {
        0
    } else {
        v.trailing_zeros() + 1
    }
}

#[cfg(test)]
fn test_find_set_bit_l_common<L: Limb>() {
    assert_eq!(find_last_set_bit_l(L::ZERO), 0);
    assert_eq!(find_first_set_bit_l(L::ZERO), 0);

    for i in 0..L::BITS {
        let v = L::from_u64(1 << i);
        assert_eq!(find_last_set_bit_l(v), i + 1);
        assert_eq!(find_first_set_bit_l(v), i + 1);

        let below = L::from_u64((1 << i) - 1);
        assert_eq!(find_last_set_bit_l(below), i);
        assert_eq!(find_first_set_bit_l(below), if i == 0 { 0 } else { 1 });
    }

    let all = L::from_u64(!0);
    assert_eq!(find_last_set_bit_l(all), L::BITS);
    assert_eq!(find_first_set_bit_l(all), 1);
}

#[test]
fn test_find_set_bit_l() {
    test_find_set_bit_l_common::<u16>();
    test_find_set_bit_l_common::<u32>();
    test_find_set_bit_l_common::<u64>();
}
