//! The public bit operations on [`Integer`].
//!
//! Every operation dispatches on the receiver's representation to the matching small or big
//! implementation. Operations taking a distance accept anything implementing [`ToInteger`] and
//! normalize it for the operation's width first.
//!
//! All operations reject a negative receiver with [`BitOpError::Domain`]: they observe the bit
//! pattern of the receiver, which isn't well defined for a sign-magnitude value. Distances may
//! be negative.

use tracing::debug;

use super::bitcount_impl::{
    big_hi_bit, big_lo_bit, big_popcount, small_hi_bit, small_lo_bit, small_popcount,
};
use super::distance::{rotate_distance, shift_distance};
use super::error::{BitOpError, ConversionError};
use super::integer::Integer;
use super::limb::{Limb, LimbType};
use super::reorder_impl::{big_bitreverse, big_bswap, small_bitreverse, small_bswap};
use super::rotate_impl::{big_lrot, big_rrot, small_lrot, small_rrot};
use super::shift_impl::{
    big_arith_rshift, big_lshift, big_rshift, small_arith_rshift, small_lshift, small_rshift,
};

/// Conversion of operands into an [`Integer`].
///
/// Implemented for [`Integer`] itself, all primitive integer types and strings. Strings are parsed
/// with [`Integer`]'s `FromStr` implementation.
pub trait ToInteger<L: Limb = LimbType> {
    fn to_integer(&self) -> Result<Integer<L>, ConversionError>;
}

impl<L: Limb> ToInteger<L> for Integer<L> {
    fn to_integer(&self) -> Result<Integer<L>, ConversionError> {
        Ok(self.clone())
    }
}

impl<L: Limb, T: ToInteger<L> + ?Sized> ToInteger<L> for &T {
    fn to_integer(&self) -> Result<Integer<L>, ConversionError> {
        (**self).to_integer()
    }
}

macro_rules! impl_to_integer_prim {
    ($($t:ty),*) => {
        $(
            impl<L: Limb> ToInteger<L> for $t {
                fn to_integer(&self) -> Result<Integer<L>, ConversionError> {
                    Ok(Integer::from(*self))
                }
            }
        )*
    };
}

impl_to_integer_prim!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<L: Limb> ToInteger<L> for str {
    fn to_integer(&self) -> Result<Integer<L>, ConversionError> {
        self.parse()
    }
}

impl<L: Limb> ToInteger<L> for String {
    fn to_integer(&self) -> Result<Integer<L>, ConversionError> {
        self.as_str().parse()
    }
}

impl<L: Limb> Integer<L> {
    fn check_nonnegative(&self, op: &'static str) -> Result<(), BitOpError> {
        if self.is_negative() {
            debug!(op, "rejecting negative receiver");
            return Err(BitOpError::Domain { op });
        }
        Ok(())
    }

    /// Count the set bits of the whole magnitude.
    pub fn popcount(&self) -> Result<u64, BitOpError> {
        self.check_nonnegative("popcount")?;
        Ok(match self {
            Self::Small(value) => small_popcount(*value),
            Self::Big(big) => big_popcount(big),
        })
    }

    /// One-based index of the least significant set bit, zero for zero.
    pub fn lo_bit(&self) -> Result<u64, BitOpError> {
        self.check_nonnegative("lo_bit")?;
        Ok(match self {
            Self::Small(value) => small_lo_bit(*value),
            Self::Big(big) => big_lo_bit(big),
        })
    }

    /// One-based index of the most significant set bit, zero for zero.
    pub fn hi_bit(&self) -> Result<u64, BitOpError> {
        self.check_nonnegative("hi_bit")?;
        Ok(match self {
            Self::Small(value) => small_hi_bit(*value),
            Self::Big(big) => big_hi_bit(big),
        })
    }

    fn bswap_n(&self, nbits: u32, op: &'static str) -> Result<Self, BitOpError> {
        self.check_nonnegative(op)?;
        Ok(match self {
            Self::Small(value) => small_bswap(*value, nbits),
            Self::Big(big) => big_bswap(big, nbits),
        })
    }

    fn bitreverse_n(&self, nbits: u32, op: &'static str) -> Result<Self, BitOpError> {
        self.check_nonnegative(op)?;
        Ok(match self {
            Self::Small(value) => small_bitreverse(*value, nbits),
            Self::Big(big) => big_bitreverse(big, nbits),
        })
    }

    fn rrot_n<D: ToInteger<L> + ?Sized>(
        &self,
        nbits: u32,
        rotdist: &D,
        op: &'static str,
    ) -> Result<Self, BitOpError> {
        self.check_nonnegative(op)?;
        let rotd = rotate_distance(&rotdist.to_integer()?, nbits);
        Ok(match self {
            Self::Small(value) => small_rrot(*value, nbits, rotd),
            Self::Big(big) => big_rrot(big, nbits, rotd),
        })
    }

    fn lrot_n<D: ToInteger<L> + ?Sized>(
        &self,
        nbits: u32,
        rotdist: &D,
        op: &'static str,
    ) -> Result<Self, BitOpError> {
        self.check_nonnegative(op)?;
        let rotd = rotate_distance(&rotdist.to_integer()?, nbits);
        Ok(match self {
            Self::Small(value) => small_lrot(*value, nbits, rotd),
            Self::Big(big) => big_lrot(big, nbits, rotd),
        })
    }

    fn lshift_n<D: ToInteger<L> + ?Sized>(
        &self,
        nbits: u32,
        shiftdist: &D,
        op: &'static str,
    ) -> Result<Self, BitOpError> {
        self.check_nonnegative(op)?;
        let sdist = shift_distance(&shiftdist.to_integer()?, nbits);
        Ok(match self {
            Self::Small(value) => small_lshift(*value, nbits, sdist),
            Self::Big(big) => big_lshift(big, nbits, sdist),
        })
    }

    fn rshift_n<D: ToInteger<L> + ?Sized>(
        &self,
        nbits: u32,
        shiftdist: &D,
        op: &'static str,
    ) -> Result<Self, BitOpError> {
        self.check_nonnegative(op)?;
        let sdist = shift_distance(&shiftdist.to_integer()?, nbits);
        Ok(match self {
            Self::Small(value) => small_rshift(*value, nbits, sdist),
            Self::Big(big) => big_rshift(big, nbits, sdist),
        })
    }

    fn arith_rshift_n<D: ToInteger<L> + ?Sized>(
        &self,
        nbits: u32,
        shiftdist: &D,
        op: &'static str,
    ) -> Result<Self, BitOpError> {
        self.check_nonnegative(op)?;
        let sdist = shift_distance(&shiftdist.to_integer()?, nbits);
        Ok(match self {
            Self::Small(value) => small_arith_rshift(*value, nbits, sdist),
            Self::Big(big) => big_arith_rshift(big, nbits, sdist),
        })
    }
}

macro_rules! impl_width_ops {
    (
        $nbits:literal,
        $bswap:ident,
        $bitreverse:ident,
        $rrot:ident,
        $lrot:ident,
        $lshift:ident,
        $rshift:ident,
        $arith_rshift:ident,
        $shl:ident,
        $shr:ident,
        $sar:ident
    ) => {
        impl<L: Limb> Integer<L> {
            #[doc = concat!("Reverse the byte order of the low ", stringify!($nbits), " bits.")]
            pub fn $bswap(&self) -> Result<Self, BitOpError> {
                self.bswap_n($nbits, stringify!($bswap))
            }

            #[doc = concat!("Reverse the bit order of the low ", stringify!($nbits), " bits.")]
            pub fn $bitreverse(&self) -> Result<Self, BitOpError> {
                self.bitreverse_n($nbits, stringify!($bitreverse))
            }

            #[doc = concat!("Rotate the low ", stringify!($nbits), " bits right by `rotdist`.")]
            ///
            /// A negative distance rotates left.
            pub fn $rrot<D: ToInteger<L> + ?Sized>(&self, rotdist: &D) -> Result<Self, BitOpError> {
                self.rrot_n($nbits, rotdist, stringify!($rrot))
            }

            #[doc = concat!("Rotate the low ", stringify!($nbits), " bits left by `rotdist`.")]
            ///
            /// A negative distance rotates right.
            pub fn $lrot<D: ToInteger<L> + ?Sized>(&self, rotdist: &D) -> Result<Self, BitOpError> {
                self.lrot_n($nbits, rotdist, stringify!($lrot))
            }

            #[doc = concat!("Shift the low ", stringify!($nbits), " bits left by `shiftdist`, filling with zeroes.")]
            ///
            /// Bits shifted past the window are dropped. A negative distance shifts right.
            pub fn $lshift<D: ToInteger<L> + ?Sized>(&self, shiftdist: &D) -> Result<Self, BitOpError> {
                self.lshift_n($nbits, shiftdist, stringify!($lshift))
            }

            #[doc = concat!("Shift the low ", stringify!($nbits), " bits right by `shiftdist`, filling with zeroes.")]
            ///
            /// A negative distance shifts left.
            pub fn $rshift<D: ToInteger<L> + ?Sized>(&self, shiftdist: &D) -> Result<Self, BitOpError> {
                self.rshift_n($nbits, shiftdist, stringify!($rshift))
            }

            #[doc = concat!("Shift the low ", stringify!($nbits), " bits right by `shiftdist`, filling with the window's top bit.")]
            ///
            /// A negative distance shifts left, filling with zeroes.
            pub fn $arith_rshift<D: ToInteger<L> + ?Sized>(&self, shiftdist: &D) -> Result<Self, BitOpError> {
                self.arith_rshift_n($nbits, shiftdist, stringify!($arith_rshift))
            }

            #[doc = concat!("Alias for [`Integer::", stringify!($lshift), "()`].")]
            pub fn $shl<D: ToInteger<L> + ?Sized>(&self, shiftdist: &D) -> Result<Self, BitOpError> {
                self.lshift_n($nbits, shiftdist, stringify!($shl))
            }

            #[doc = concat!("Alias for [`Integer::", stringify!($rshift), "()`].")]
            pub fn $shr<D: ToInteger<L> + ?Sized>(&self, shiftdist: &D) -> Result<Self, BitOpError> {
                self.rshift_n($nbits, shiftdist, stringify!($shr))
            }

            #[doc = concat!("Alias for [`Integer::", stringify!($arith_rshift), "()`].")]
            pub fn $sar<D: ToInteger<L> + ?Sized>(&self, shiftdist: &D) -> Result<Self, BitOpError> {
                self.arith_rshift_n($nbits, shiftdist, stringify!($sar))
            }
        }
    };
}

impl_width_ops!(8, bswap8, bitreverse8, rrot8, lrot8, lshift8, rshift8, arith_rshift8, shl8, shr8, sar8);
impl_width_ops!(16, bswap16, bitreverse16, rrot16, lrot16, lshift16, rshift16, arith_rshift16, shl16, shr16, sar16);
impl_width_ops!(32, bswap32, bitreverse32, rrot32, lrot32, lshift32, rshift32, arith_rshift32, shl32, shr32, sar32);
impl_width_ops!(64, bswap64, bitreverse64, rrot64, lrot64, lshift64, rshift64, arith_rshift64, shl64, shr64, sar64);

#[cfg(test)]
type UnaryOp<L> = fn(&Integer<L>) -> Result<Integer<L>, BitOpError>;

#[cfg(test)]
type DistanceOp<L> = fn(&Integer<L>, &Integer<L>) -> Result<Integer<L>, BitOpError>;

#[cfg(test)]
struct WidthOps<L: Limb> {
    nbits: u32,
    bswap: UnaryOp<L>,
    bitreverse: UnaryOp<L>,
    rrot: DistanceOp<L>,
    lrot: DistanceOp<L>,
    lshift: DistanceOp<L>,
    rshift: DistanceOp<L>,
    arith_rshift: DistanceOp<L>,
}

#[cfg(test)]
fn width_ops<L: Limb>() -> [WidthOps<L>; 4] {
    macro_rules! width_ops_entry {
        ($nbits:literal, $bswap:ident, $bitreverse:ident, $rrot:ident, $lrot:ident,
         $lshift:ident, $rshift:ident, $arith_rshift:ident) => {
            WidthOps {
                nbits: $nbits,
                bswap: |x| x.$bswap(),
                bitreverse: |x| x.$bitreverse(),
                rrot: |x, d| x.$rrot(d),
                lrot: |x, d| x.$lrot(d),
                lshift: |x, d| x.$lshift(d),
                rshift: |x, d| x.$rshift(d),
                arith_rshift: |x, d| x.$arith_rshift(d),
            }
        };
    }
    [
        width_ops_entry!(8, bswap8, bitreverse8, rrot8, lrot8, lshift8, rshift8, arith_rshift8),
        width_ops_entry!(16, bswap16, bitreverse16, rrot16, lrot16, lshift16, rshift16, arith_rshift16),
        width_ops_entry!(32, bswap32, bitreverse32, rrot32, lrot32, lshift32, rshift32, arith_rshift32),
        width_ops_entry!(64, bswap64, bitreverse64, rrot64, lrot64, lshift64, rshift64, arith_rshift64),
    ]
}

#[cfg(test)]
fn test_scenarios_common<L: Limb>() {
    let x = Integer::<L>::from(0b0111_0001u8);
    assert_eq!(x.rrot8(&1).unwrap(), Integer::from(0b1011_1000u8));

    let x = Integer::<L>::from(0xaabb_ccddu32);
    assert_eq!(x.lrot32(&4).unwrap(), Integer::from(0xabbc_cddau32));
    assert_eq!(x.arith_rshift32(&1).unwrap(), Integer::from(0xd55d_e66eu32));
    assert_eq!(x.sar32(&1).unwrap(), Integer::from(0xd55d_e66eu32));
    assert_eq!(x.bswap32().unwrap(), Integer::from(0xddcc_bbaau32));

    assert_eq!(Integer::<L>::from(255).popcount(), Ok(8));
    assert_eq!(Integer::<L>::from(7).popcount(), Ok(3));

    let x = Integer::<L>::from(0x1122_3344u32);
    assert_eq!(x.lshift8(&2).unwrap(), Integer::from(0x1122_3310u32));
    assert_eq!(x.shl8(&2).unwrap(), Integer::from(0x1122_3310u32));

    // Big receivers keep their high bits.
    let x: Integer<L> = "0x1_0000_0000_0000_0000_0000_0071".parse().unwrap();
    assert!(x.is_big());
    let expected: Integer<L> = "0x1_0000_0000_0000_0000_0000_00b8".parse().unwrap();
    assert_eq!(x.rrot8(&1).unwrap(), expected);
}

#[test]
fn test_scenarios() {
    test_scenarios_common::<u16>();
    test_scenarios_common::<u32>();
    test_scenarios_common::<u64>();
}

#[cfg(test)]
fn test_negative_receivers_rejected_common<L: Limb>() {
    let values = [
        Integer::<L>::from(-1),
        Integer::<L>::from(i64::MIN),
        Integer::<L>::from(-(1i128 << 100)),
    ];
    for x in values.iter() {
        assert_eq!(x.popcount(), Err(BitOpError::Domain { op: "popcount" }));
        assert_eq!(x.lo_bit(), Err(BitOpError::Domain { op: "lo_bit" }));
        assert_eq!(x.hi_bit(), Err(BitOpError::Domain { op: "hi_bit" }));
        assert_eq!(x.bswap16(), Err(BitOpError::Domain { op: "bswap16" }));
        assert_eq!(x.bitreverse64(), Err(BitOpError::Domain { op: "bitreverse64" }));
        assert_eq!(x.rrot8(&1), Err(BitOpError::Domain { op: "rrot8" }));
        assert_eq!(x.lrot32(&0), Err(BitOpError::Domain { op: "lrot32" }));
        assert_eq!(x.lshift64(&3), Err(BitOpError::Domain { op: "lshift64" }));
        assert_eq!(x.rshift16(&3), Err(BitOpError::Domain { op: "rshift16" }));
        assert_eq!(x.arith_rshift32(&3), Err(BitOpError::Domain { op: "arith_rshift32" }));
        assert_eq!(x.sar64(&3), Err(BitOpError::Domain { op: "sar64" }));
    }

    // Negative distances are fine.
    let x = Integer::<L>::from(0x44u8);
    assert_eq!(x.lshift8(&-2).unwrap(), Integer::from(0x11u8));
    assert_eq!(x.rshift8(&-2).unwrap(), Integer::from(0x10u8));
}

#[test]
fn test_negative_receivers_rejected() {
    test_negative_receivers_rejected_common::<u16>();
    test_negative_receivers_rejected_common::<u32>();
    test_negative_receivers_rejected_common::<u64>();
}

#[cfg(test)]
fn test_distance_coercion_common<L: Limb>() {
    let x = Integer::<L>::from(0x0fu8);
    assert_eq!(x.lrot8("4").unwrap(), Integer::from(0xf0u8));
    assert_eq!(x.lrot8(&String::from("-4")).unwrap(), Integer::from(0xf0u8));
    assert_eq!(x.lrot8(&4u64).unwrap(), Integer::from(0xf0u8));
    assert_eq!(x.lrot8(&Integer::<L>::from(12)).unwrap(), Integer::from(0xf0u8));
    assert_eq!(x.lrot8("four"), Err(BitOpError::Conversion(ConversionError::InvalidDigit { position: 0 })));
    assert_eq!(x.lshift8(""), Err(BitOpError::Conversion(ConversionError::Empty)));

    // Huge distances.
    let huge = Integer::<L>::from(1u128 << 100);
    assert_eq!(Integer::<L>::from(100).lshift8(&huge).unwrap(), Integer::zero());
    assert_eq!(Integer::<L>::from(100).rshift32(&huge).unwrap(), Integer::zero());
    assert_eq!(Integer::<L>::from(100).arith_rshift16(&huge).unwrap(), Integer::zero());
    assert_eq!(huge.lshift64(&huge).unwrap(), huge);
    assert_eq!(huge.arith_rshift64(&huge).unwrap(), huge);
    let huge_plus_one = Integer::<L>::from((1u128 << 100) + 1);
    assert_eq!(huge_plus_one.arith_rshift64(&Integer::<L>::from(1u128 << 80)).unwrap(), huge);
    assert_eq!(
        Integer::<L>::from(0x80u8).arith_rshift8(&huge).unwrap(),
        Integer::from(0xffu8)
    );
    let x = Integer::<L>::from(0x1234u16);
    assert_eq!(
        x.rrot16(&14143509919777u64).unwrap(),
        x.rrot16(&(14143509919777u64 % 16)).unwrap()
    );
}

#[test]
fn test_distance_coercion() {
    test_distance_coercion_common::<u16>();
    test_distance_coercion_common::<u32>();
    test_distance_coercion_common::<u64>();
}

#[cfg(test)]
fn test_properties_common<L: Limb>() {
    use super::test_helpers::{sample_values, test_rng};

    let mut rng = test_rng();
    let values = sample_values::<L>(&mut rng);
    let distances: Vec<Integer<L>> = [-200i128, -65, -64, -63, -33, -17, -9, -8, -1, 0, 1, 3, 7, 8, 15, 31, 63, 64, 65, 1 << 70, -(1 << 70)]
        .iter()
        .map(|d| Integer::from(*d))
        .collect();

    for ops in width_ops::<L>() {
        let nbits = ops.nbits;
        for x in values.iter() {
            // Byte swap and bit reversal are involutions.
            assert_eq!((ops.bswap)(&(ops.bswap)(x).unwrap()).unwrap(), *x);
            assert_eq!((ops.bitreverse)(&(ops.bitreverse)(x).unwrap()).unwrap(), *x);

            for d in distances.iter() {
                // Rotations are inverse to each other.
                assert_eq!((ops.lrot)(&(ops.rrot)(x, d).unwrap(), d).unwrap(), *x);
                assert_eq!((ops.rrot)(&(ops.lrot)(x, d).unwrap(), d).unwrap(), *x);

                // And periodic.
                let reduced = Integer::<L>::from(rotate_distance(d, nbits));
                assert_eq!((ops.rrot)(x, d).unwrap(), (ops.rrot)(x, &reduced).unwrap());

                // A logical right shift by d is a left shift by -d.
                let negated = Integer::<L>::from(-shift_distance(d, nbits));
                assert_eq!((ops.rshift)(x, d).unwrap(), (ops.lshift)(x, &negated).unwrap());
            }

            // Shifting by the full width clears the window.
            let full = Integer::<L>::from(nbits);
            let neg_full = Integer::<L>::from(-(nbits as i32));
            for shifted in [
                (ops.lshift)(x, &full).unwrap(),
                (ops.lshift)(x, &neg_full).unwrap(),
                (ops.rshift)(x, &full).unwrap(),
                (ops.arith_rshift)(x, &neg_full).unwrap(),
            ] {
                let lo_bit = shifted.lo_bit().unwrap();
                assert!(lo_bit == 0 || lo_bit > nbits as u64);
            }

            // Zero distance is the identity.
            let zero = Integer::<L>::zero();
            assert_eq!((ops.lshift)(x, &zero).unwrap(), *x);
            assert_eq!((ops.arith_rshift)(x, &zero).unwrap(), *x);
            assert_eq!((ops.rrot)(x, &zero).unwrap(), *x);
        }
    }
}

#[test]
fn test_properties() {
    test_properties_common::<u16>();
    test_properties_common::<u32>();
    test_properties_common::<u64>();
}

#[cfg(test)]
fn test_popcount_additivity_common<L: Limb>() {
    use super::test_helpers::{from_ref, random_nonneg, test_rng};
    use num_bigint::BigInt;

    let mut rng = test_rng();
    for nbits in [10u64, 64, 65, 130, 300] {
        for _ in 0..20 {
            let (x, reference) = random_nonneg::<L>(&mut rng, nbits);
            for k in [0u32, 1, 7, 63, 64, 100] {
                let low: Integer<L> = from_ref(&(&reference & ((BigInt::from(1) << k) - 1)));
                let high: Integer<L> = from_ref(&(&reference >> k));
                assert_eq!(
                    x.popcount().unwrap(),
                    low.popcount().unwrap() + high.popcount().unwrap()
                );
            }
        }
    }
}

#[test]
fn test_popcount_additivity() {
    test_popcount_additivity_common::<u16>();
    test_popcount_additivity_common::<u32>();
    test_popcount_additivity_common::<u64>();
}

#[cfg(test)]
fn test_small_big_equivalence_common<L: Limb>() {
    use super::test_helpers::{force_big, sample_values, test_rng};

    let mut rng = test_rng();
    let mut values = sample_values::<L>(&mut rng);
    values.extend([
        Integer::from(i64::MAX - 1),
        Integer::from(i64::MAX as u64 + 1),
        Integer::from(i64::MAX as u64 + 2),
    ]);
    let distances: Vec<Integer<L>> = [-65i64, -8, -1, 0, 1, 4, 31, 64, 1000]
        .iter()
        .map(|d| Integer::from(*d))
        .collect();

    for x in values.iter() {
        let forced = force_big(x);
        assert!(forced.is_big());

        assert_eq!(forced.popcount(), x.popcount());
        assert_eq!(forced.lo_bit(), x.lo_bit());
        assert_eq!(forced.hi_bit(), x.hi_bit());

        for ops in width_ops::<L>() {
            let mut results = vec![
                ((ops.bswap)(x).unwrap(), (ops.bswap)(&forced).unwrap()),
                ((ops.bitreverse)(x).unwrap(), (ops.bitreverse)(&forced).unwrap()),
            ];
            for d in distances.iter() {
                for op in [ops.rrot, ops.lrot, ops.lshift, ops.rshift, ops.arith_rshift] {
                    results.push((op(x, d).unwrap(), op(&forced, d).unwrap()));
                }
            }
            for (native, from_forced) in results {
                assert_eq!(native, from_forced);
                // No residual non-canonical big.
                assert_eq!(from_forced.is_small(), from_forced.clone().normalize().is_small());
                assert_eq!(native.is_small(), from_forced.is_small());
            }
        }
    }
}

#[test]
fn test_small_big_equivalence() {
    test_small_big_equivalence_common::<u16>();
    test_small_big_equivalence_common::<u32>();
    test_small_big_equivalence_common::<u64>();
}

#[cfg(test)]
fn test_operands_unchanged_common<L: Limb>() {
    let x = Integer::<L>::from((1u128 << 100) | 0xaabb_ccdd);
    let before = x.magnitude_limbs();
    let _ = x.bswap32().unwrap();
    let _ = x.lshift64(&5).unwrap();
    let _ = x.rrot16(&-3).unwrap();
    let _ = x.bitreverse8().unwrap();
    assert_eq!(x.magnitude_limbs(), before);
}

#[test]
fn test_operands_unchanged() {
    test_operands_unchanged_common::<u16>();
    test_operands_unchanged_common::<u32>();
    test_operands_unchanged_common::<u64>();
}
