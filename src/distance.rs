//! Normalization of shift and rotate distances.
//!
//! Distances are arbitrary-precision integers themselves, but no operation on a `nbits` wide
//! window needs to tell apart distances of magnitude `nbits` or larger: shifting that far clears
//! the window (or fills it with the sign bit), and rotations are periodic in `nbits`.

use super::integer::Integer;
use super::limb::Limb;
#[cfg(test)]
use super::test_helpers::forced_big;

/// Normalize a shift distance for a `nbits` wide window.
///
/// The sign is kept, the magnitude is saturated at `nbits`. The result is thus always within
/// `-nbits..=nbits`.
///
/// # Arguments
///
/// * `distance` - The shift distance, negative values denote a shift in the opposite direction.
/// * `nbits` - The operation's bit width.
///
pub fn shift_distance<L: Limb>(distance: &Integer<L>, nbits: u32) -> i32 {
    let bits = nbits as i64;
    match distance {
        Integer::Small(d) => (*d).clamp(-bits, bits) as i32,
        Integer::Big(big) => {
            let sdist = match big.magnitude_u64() {
                Some(magnitude) if magnitude < nbits as u64 => magnitude as i32,
                _ => nbits as i32,
            };
            if big.is_negative() {
                -sdist
            } else {
                sdist
            }
        }
    }
}

/// Normalize a rotate distance for a `nbits` wide window.
///
/// Returns the equivalent rotation distance in the same direction within `0..nbits`: negative
/// distances are folded into their positive counterpart modulo `nbits`.
///
/// # Arguments
///
/// * `distance` - The rotate distance, negative values denote a rotation in the opposite
///                direction.
/// * `nbits` - The operation's bit width, must be a power of two `<= 64`.
///
pub fn rotate_distance<L: Limb>(distance: &Integer<L>, nbits: u32) -> u32 {
    debug_assert!(nbits.is_power_of_two() && nbits <= u64::BITS);
    match distance {
        Integer::Small(d) => d.rem_euclid(nbits as i64) as u32,
        Integer::Big(big) => {
            // nbits divides 2^L::BITS, so the least significant limb determines the remainder.
            let rdist = (big.load_l(0).to_u64() & (nbits as u64 - 1)) as u32;
            if big.is_negative() {
                (nbits - rdist) % nbits
            } else {
                rdist
            }
        }
    }
}

#[cfg(test)]
fn test_shift_distance_common<L: Limb>() {
    for nbits in [8, 16, 32, 64] {
        let n = nbits as i32;
        assert_eq!(shift_distance(&Integer::<L>::Small(0), nbits), 0);
        assert_eq!(shift_distance(&Integer::<L>::Small(3), nbits), 3);
        assert_eq!(shift_distance(&Integer::<L>::Small(-3), nbits), -3);
        assert_eq!(shift_distance(&Integer::<L>::Small(n as i64 - 1), nbits), n - 1);
        assert_eq!(shift_distance(&Integer::<L>::Small(n as i64), nbits), n);
        assert_eq!(shift_distance(&Integer::<L>::Small(n as i64 + 1), nbits), n);
        assert_eq!(shift_distance(&Integer::<L>::Small(-(n as i64) - 1), nbits), -n);
        assert_eq!(shift_distance(&Integer::<L>::Small(i64::MAX), nbits), n);
        assert_eq!(shift_distance(&Integer::<L>::Small(i64::MIN), nbits), -n);

        assert_eq!(shift_distance(&Integer::<L>::from(1u128 << 100), nbits), n);
        assert_eq!(shift_distance(&Integer::<L>::from(-(1i128 << 100)), nbits), -n);
        // The low limb of a huge distance must not leak through.
        assert_eq!(shift_distance(&Integer::<L>::from((1u128 << 100) + 1), nbits), n);

        // Non-canonical big distances within range.
        let forced = forced_big::<L>(false, 5);
        assert_eq!(shift_distance(&forced, nbits), 5);
        let forced = forced_big::<L>(true, 5);
        assert_eq!(shift_distance(&forced, nbits), -5);
        let forced = forced_big::<L>(true, 0);
        assert_eq!(shift_distance(&forced, nbits), 0);
    }
}

#[test]
fn test_shift_distance() {
    test_shift_distance_common::<u16>();
    test_shift_distance_common::<u32>();
    test_shift_distance_common::<u64>();
}

#[cfg(test)]
fn test_rotate_distance_common<L: Limb>() {
    for nbits in [8u32, 16, 32, 64] {
        for d in -200i64..200 {
            let expected = d.rem_euclid(nbits as i64) as u32;
            assert_eq!(rotate_distance(&Integer::<L>::Small(d), nbits), expected);
            let forced = forced_big::<L>(d < 0, d.unsigned_abs() as u128);
            assert_eq!(rotate_distance(&forced, nbits), expected);
        }

        let huge: i128 = 14143509919777 + (1 << 100);
        assert_eq!(
            rotate_distance(&Integer::<L>::from(huge), nbits),
            huge.rem_euclid(nbits as i128) as u32
        );
        assert_eq!(
            rotate_distance(&Integer::<L>::from(-huge), nbits),
            (-huge).rem_euclid(nbits as i128) as u32
        );
        assert_eq!(rotate_distance(&Integer::<L>::Small(i64::MIN), nbits), 0);
    }
}

#[test]
fn test_rotate_distance() {
    test_rotate_distance_common::<u16>();
    test_rotate_distance_common::<u32>();
    test_rotate_distance_common::<u64>();
}
