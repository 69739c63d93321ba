//! Storage for the magnitude of multiprecision integers in units of [`Limb`].
//!
//! The magnitude of a big integer is kept as a little-endian sequence of limbs, i.e. the limb at
//! index zero is the least significant one, together with a separate sign. The limb buffer is
//! reference counted and copy-on-write: cloning an [`MpLimbs`] is cheap and shares the buffer,
//! a store to a shared buffer first detaches a private copy. A value observed through one handle
//! thus never changes because of a store through another.

use core::fmt;
use std::sync::Arc;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize as _;

use super::limb::{lsb_mask_u64, nlimbs_for_bits, Limb, LimbType};

/// The owned limb vector behind an [`MpLimbs`] handle.
#[derive(Clone)]
struct LimbVec<L: Limb> {
    limbs: Vec<L>,
}

impl<L: Limb> Drop for LimbVec<L> {
    fn drop(&mut self) {
        wipe_limbs(&mut self.limbs);
    }
}

#[cfg(feature = "zeroize")]
fn wipe_limbs<L: Limb>(limbs: &mut [L]) {
    limbs.zeroize();
}

#[cfg(not(feature = "zeroize"))]
fn wipe_limbs<L: Limb>(_limbs: &mut [L]) {}

/// Sign and magnitude of a multiprecision integer.
///
/// The limb sequence is never empty, zero is stored as a single zero limb. Leading zero limbs are
/// permitted here: trimming them is the renormalizer's job, see
/// [`Integer::normalize()`](crate::Integer::normalize).
#[derive(Clone)]
pub struct MpLimbs<L: Limb = LimbType> {
    negative: bool,
    limbs: Arc<LimbVec<L>>,
}

impl<L: Limb> MpLimbs<L> {
    /// Create a multiprecision integer from its sign and little-endian limbs.
    ///
    /// An empty `limbs` vector is taken to mean zero.
    ///
    /// # Arguments
    ///
    /// * `negative` - Whether the value is negative. Ignored by the arithmetic if the magnitude is
    ///                zero.
    /// * `limbs` - The magnitude's limbs, ordered from least to most significant.
    ///
    pub fn new(negative: bool, mut limbs: Vec<L>) -> Self {
        if limbs.is_empty() {
            limbs.push(L::ZERO);
        }
        Self {
            negative,
            limbs: Arc::new(LimbVec { limbs }),
        }
    }

    /// Create a multiprecision integer from a sign and a magnitude of up to 128 bits.
    ///
    /// The result carries exactly as many limbs as needed to cover 128 bits, it is up to the caller
    /// to trim them.
    pub fn from_u128(negative: bool, magnitude: u128) -> Self {
        let nlimbs = nlimbs_for_bits::<L>(u128::BITS);
        let mut limbs = Vec::with_capacity(nlimbs);
        for i in 0..nlimbs {
            let shift = i as u32 * L::BITS;
            limbs.push(L::from_u64((magnitude >> shift) as u64));
        }
        Self::new(negative, limbs)
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The number of limbs stored, including any leading zero limbs.
    pub fn nlimbs(&self) -> usize {
        self.limbs.limbs.len()
    }

    pub fn limbs(&self) -> &[L] {
        &self.limbs.limbs
    }

    /// Load the limb at position `i`, counted from least to most significant.
    ///
    /// Panics if `i >= self.nlimbs()`.
    pub fn load_l(&self, i: usize) -> L {
        self.limbs.limbs[i]
    }

    /// Load the limb at position `i`, with limbs past the end reading as zero.
    fn load_l_ext(&self, i: usize) -> L {
        self.limbs.limbs.get(i).copied().unwrap_or(L::ZERO)
    }

    /// Store `value` at limb position `i`.
    ///
    /// Detaches from any buffer shared with other handles first. Panics if
    /// `i >= self.nlimbs()`.
    pub fn store_l(&mut self, i: usize, value: L) {
        Arc::make_mut(&mut self.limbs).limbs[i] = value;
    }

    /// Produce a copy backed by a private buffer with room for at least `nlimbs` limbs.
    ///
    /// Sign and all limb values are preserved. Subsequent stores to the copy, or resizes up to
    /// `nlimbs`, don't reallocate.
    pub fn clone_with_capacity(&self, nlimbs: usize) -> Self {
        let src = &self.limbs.limbs;
        let mut limbs = Vec::with_capacity(nlimbs.max(src.len()));
        limbs.extend_from_slice(src);
        Self {
            negative: self.negative,
            limbs: Arc::new(LimbVec { limbs }),
        }
    }

    /// Grow or shrink the limb sequence to `nlimbs` limbs.
    ///
    /// Growing fills with zero limbs, shrinking drops the most significant limbs. The sequence
    /// never becomes empty, `nlimbs == 0` leaves a single limb behind.
    pub fn resize(&mut self, nlimbs: usize) {
        let nlimbs = nlimbs.max(1);
        if nlimbs == self.nlimbs() {
            return;
        }
        let limbs = &mut Arc::make_mut(&mut self.limbs).limbs;
        if nlimbs < limbs.len() {
            wipe_limbs(&mut limbs[nlimbs..]);
        }
        limbs.resize(nlimbs, L::ZERO);
    }

    /// Find the number of limbs left after stripping the leading zero limbs.
    ///
    /// Returns zero if the magnitude is zero.
    pub fn find_last_set_limb(&self) -> usize {
        let limbs = &self.limbs.limbs;
        let mut n = limbs.len();
        while n > 0 && limbs[n - 1] == L::ZERO {
            n -= 1;
        }
        n
    }

    /// Load the `nbits` least significant bits of the magnitude.
    ///
    /// Limbs beyond the stored ones read as zero.
    ///
    /// # Arguments
    ///
    /// * `nbits` - The width of the window to load, must be `<= 64`.
    ///
    pub fn load_low_bits(&self, nbits: u32) -> u64 {
        debug_assert!(nbits <= u64::BITS);
        let mut value = 0u64;
        for i in 0..nlimbs_for_bits::<L>(nbits) {
            value |= self.load_l_ext(i).to_u64() << (i as u32 * L::BITS);
        }
        value & lsb_mask_u64(nbits)
    }

    /// Replace the `nbits` least significant bits of the magnitude with those of `value`.
    ///
    /// All bits at position `nbits` and above are left untouched. If the stored limbs don't cover
    /// the window, the sequence is grown first. Bits of `value` above `nbits` are ignored.
    ///
    /// # Arguments
    ///
    /// * `nbits` - The width of the window to store, must be `<= 64`.
    /// * `value` - The window's new contents.
    ///
    pub fn store_low_bits(&mut self, nbits: u32, value: u64) {
        debug_assert!(nbits <= u64::BITS);
        let window_nlimbs = nlimbs_for_bits::<L>(nbits);
        if self.nlimbs() < window_nlimbs {
            self.resize(window_nlimbs);
        }

        let limbs = &mut Arc::make_mut(&mut self.limbs).limbs;
        let window_mask = lsb_mask_u64(nbits);
        for (i, limb) in limbs.iter_mut().enumerate().take(window_nlimbs) {
            let shift = i as u32 * L::BITS;
            let limb_mask = L::from_u64(window_mask >> shift);
            let bits = L::from_u64((value & window_mask) >> shift);
            *limb = L::from_u64((limb.to_u64() & !limb_mask.to_u64()) | bits.to_u64());
        }
    }

    /// The magnitude as a `u64`, if it fits.
    pub fn magnitude_u64(&self) -> Option<u64> {
        let n = self.find_last_set_limb();
        if n > nlimbs_for_bits::<L>(u64::BITS) {
            return None;
        }
        Some(self.load_low_bits(u64::BITS))
    }
}

impl<L: Limb> fmt::Debug for MpLimbs<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MpLimbs")
            .field("negative", &self.negative)
            .field("limbs", &self.limbs())
            .finish()
    }
}

#[cfg(test)]
fn test_mp_limbs_new_common<L: Limb>() {
    let zero = MpLimbs::<L>::new(false, Vec::new());
    assert_eq!(zero.nlimbs(), 1);
    assert_eq!(zero.load_l(0), L::ZERO);
    assert_eq!(zero.find_last_set_limb(), 0);

    let v = MpLimbs::<L>::from_u128(true, 1u128 << 100);
    assert!(v.is_negative());
    assert_eq!(v.nlimbs(), (128 / L::BITS) as usize);
    let top = 100 / L::BITS;
    assert_eq!(v.find_last_set_limb(), top as usize + 1);
    assert_eq!(v.load_l(top as usize), L::from_u64(1 << (100 % L::BITS)));
    assert_eq!(v.magnitude_u64(), None);
}

#[test]
fn test_mp_limbs_new() {
    test_mp_limbs_new_common::<u16>();
    test_mp_limbs_new_common::<u32>();
    test_mp_limbs_new_common::<u64>();
}

#[cfg(test)]
fn test_mp_limbs_store_is_private_common<L: Limb>() {
    let orig = MpLimbs::<L>::from_u128(false, 0x0123_4567_89ab_cdef_0011_2233_4455_6677);
    let mut copy = orig.clone();
    copy.store_l(0, L::ZERO);
    copy.store_l(1, L::from_u64(!0));
    assert_eq!(orig.load_low_bits(32), 0x4455_6677);
    assert_eq!(copy.load_l(0), L::ZERO);

    let mut copy = orig.clone_with_capacity(orig.nlimbs() + 2);
    copy.resize(orig.nlimbs() + 2);
    assert_eq!(copy.nlimbs(), orig.nlimbs() + 2);
    assert_eq!(copy.load_l(orig.nlimbs()), L::ZERO);
    assert_eq!(copy.limbs()[..orig.nlimbs()], *orig.limbs());
}

#[test]
fn test_mp_limbs_store_is_private() {
    test_mp_limbs_store_is_private_common::<u16>();
    test_mp_limbs_store_is_private_common::<u32>();
    test_mp_limbs_store_is_private_common::<u64>();
}

#[cfg(test)]
fn test_mp_limbs_resize_common<L: Limb>() {
    let mut v = MpLimbs::<L>::from_u128(false, !0);
    let n = v.nlimbs();
    v.resize(n + 3);
    assert_eq!(v.nlimbs(), n + 3);
    assert_eq!(v.find_last_set_limb(), n);

    v.resize(1);
    assert_eq!(v.nlimbs(), 1);
    assert_eq!(v.load_l(0), L::from_u64(!0));

    v.resize(0);
    assert_eq!(v.nlimbs(), 1);
}

#[test]
fn test_mp_limbs_resize() {
    test_mp_limbs_resize_common::<u16>();
    test_mp_limbs_resize_common::<u32>();
    test_mp_limbs_resize_common::<u64>();
}

#[cfg(test)]
fn test_mp_limbs_low_bits_common<L: Limb>() {
    let v = MpLimbs::<L>::from_u128(false, 0xffee_ddcc_bbaa_9988_7766_5544_3322_1100);
    assert_eq!(v.load_low_bits(0), 0);
    assert_eq!(v.load_low_bits(8), 0x00);
    assert_eq!(v.load_low_bits(16), 0x1100);
    assert_eq!(v.load_low_bits(32), 0x3322_1100);
    assert_eq!(v.load_low_bits(64), 0x7766_5544_3322_1100);

    for nbits in [8, 16, 32, 64] {
        let mut w = v.clone();
        w.store_low_bits(nbits, 0xa5a5_a5a5_a5a5_a5a5);
        assert_eq!(w.load_low_bits(nbits), 0xa5a5_a5a5_a5a5_a5a5 & lsb_mask_u64(nbits));
        // Nothing above the window changed.
        for i in 0..w.nlimbs() {
            let lo = i as u32 * L::BITS;
            if lo >= nbits {
                assert_eq!(w.load_l(i), v.load_l(i));
            }
        }
        assert_eq!(v.load_low_bits(64), 0x7766_5544_3322_1100);
    }

    // Storing past the end grows the limb sequence.
    let mut short = MpLimbs::<L>::new(false, vec![L::from_u64(1)]);
    short.store_low_bits(64, 0x8000_0000_0000_0001);
    assert_eq!(short.nlimbs(), nlimbs_for_bits::<L>(64));
    assert_eq!(short.magnitude_u64(), Some(0x8000_0000_0000_0001));
}

#[test]
fn test_mp_limbs_low_bits() {
    test_mp_limbs_low_bits_common::<u16>();
    test_mp_limbs_low_bits_common::<u32>();
    test_mp_limbs_low_bits_common::<u64>();
}
