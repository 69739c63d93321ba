//! Bit twiddling primitives over arbitrary-precision integers.
//!
//! The [`Integer`] type stores values fitting an `i64` inline and anything larger as a sign and a
//! limb sequence. Its methods provide population count, lowest and highest set bit queries and,
//! for each of the widths 8, 16, 32 and 64, byte swaps, bit reversals, rotations as well as
//! logical and arithmetic shifts of the value's low bits:
//!
//! ```
//! use mpbits::Integer;
//!
//! let x: Integer = "0xaabbccdd".parse().unwrap();
//! assert_eq!(x.bswap32().unwrap(), Integer::from(0xddccbbaau32));
//! assert_eq!(x.lrot32(&4).unwrap(), Integer::from(0xabbccddau32));
//! assert_eq!(x.arith_rshift32("1").unwrap(), Integer::from(0xd55de66eu32));
//! let y: Integer = Integer::from(255);
//! assert_eq!(y.popcount(), Ok(8));
//! ```
//!
//! All bits above an operation's width are left untouched and results are always in canonical
//! form: a result fitting an `i64` is never stored as a limb sequence.

mod bitcount_impl;
pub mod distance;
mod error;
mod hexstr;
mod integer;
mod limb;
mod limbs_buffer;
#[cfg(feature = "num-bigint")]
mod num_bigint_impl;
mod ops;
mod renorm_impl;
mod reorder_impl;
mod rotate_impl;
mod shift_impl;

#[cfg(test)]
mod test_helpers;

pub use bitcount_impl::popcount_bytes;

pub use error::{BitOpError, ConversionError};

pub use integer::{Integer, SMALL_MAX, SMALL_MIN};

pub use limb::{Limb, LimbType, LIMB_BITS};

pub use limbs_buffer::MpLimbs;

pub use ops::ToInteger;
