// Copyright (C) myl7
// SPDX-License-Identifier: Apache-2.0

//! See [`Ring`]

use std::fmt::{Debug, LowerHex};
use std::ops::{BitXor, BitXorAssign};

use bitvec::prelude::*;
use rand::Rng;

use crate::{Error, Result};

pub mod big;
pub mod int;

/// Narrowest ring the suite accepts
pub const MIN_WIDTH: usize = 8;

/// Value on a ring of `W` bits, where position `W - 1` is adjacent to position 0.
///
/// Every operation that may move a bit past position `W - 1` takes the [`RingMask`] and masks right after,
/// so a value never carries a set bit at a position `>= W`.
/// Implementations whose storage is wider than `W` rely on this.
///
/// Values entering through [`crate::params::Params`] and the protocol constructors are masked with its mask.
pub trait Ring
where
    Self: BitXor<Output = Self>
        + for<'a> BitXorAssign<&'a Self>
        + PartialEq
        + Eq
        + Debug
        + LowerHex
        + Sized
        + Clone
        + Sync
        + Send,
{
    /// Bit count of the representation. `None` if the representation grows with the width.
    const CAPACITY: Option<usize>;

    /// All bits zero
    fn zero(mask: &RingMask) -> Self;

    /// Uniformly distributed value in `[0, 2^W)`
    fn random<G: Rng + ?Sized>(mask: &RingMask, rng: &mut G) -> Self;

    /// `pos` must be less than `W`
    fn test_bit(&self, pos: usize) -> bool;

    /// `x << 1`, then masked, so bit `W - 1` falls off
    fn shl1(&mut self, mask: &RingMask);

    /// `x + bit`, then masked
    fn add_bit(&mut self, bit: bool, mask: &RingMask);

    /// Clear every bit at a position `>= W`
    fn masked(self, mask: &RingMask) -> Self;

    /// Position of the most significant set bit, `None` for zero
    fn highest_bit(&self) -> Option<usize>;
}

/// Ring width `W` and the all-ones value of `W` bits.
///
/// Immutable once built and passed to every mixing call,
/// so rings of different widths can be used side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingMask {
    width: usize,
    /// Low `width` bits set. Padded with zeros to whole `u64` limbs.
    ones: BitVec<u64, Lsb0>,
}

impl RingMask {
    /// `width` must be a power of two and at least [`MIN_WIDTH`]
    pub fn new(width: usize) -> Result<Self> {
        if !width.is_power_of_two() {
            return Err(Error::WidthNotPowerOfTwo(width));
        }
        if width < MIN_WIDTH {
            return Err(Error::WidthTooSmall {
                width,
                min: MIN_WIDTH,
            });
        }
        let mut ones = BitVec::repeat(false, Self::limbs_of(width) * u64::BITS as usize);
        ones[..width].fill(true);
        Ok(Self { width, ones })
    }

    /// Check that values of `R` can hold `W` bits
    pub fn check<R: Ring>(&self) -> Result<()> {
        match R::CAPACITY {
            Some(capacity) if capacity < self.width => Err(Error::WidthExceedsRepr {
                width: self.width,
                capacity,
            }),
            _ => Ok(()),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn ones(&self) -> &BitVec<u64, Lsb0> {
        &self.ones
    }

    /// Count of `u64` limbs to store `W` bits
    pub fn limbs(&self) -> usize {
        Self::limbs_of(self.width)
    }

    fn limbs_of(width: usize) -> usize {
        width.div_ceil(u64::BITS as usize)
    }
}

#[cfg(test)]
macro_rules! test_ring_laws {
    ($mod_name:ident, $t:ty, $width:expr) => {
        mod $mod_name {
            use rand::prelude::*;

            use crate::ring::{Ring, RingMask};

            fn all_ones(mask: &RingMask) -> $t {
                let mut x = <$t>::zero(mask);
                for _ in 0..mask.width() {
                    x.shl1(mask);
                    x.add_bit(true, mask);
                }
                x
            }

            #[test]
            fn test_zero_has_no_bits() {
                let mask = RingMask::new($width).unwrap();
                assert_eq!(<$t>::zero(&mask).highest_bit(), None);
            }

            #[test]
            fn test_random_is_masked() {
                let mask = RingMask::new($width).unwrap();
                for _ in 0..64 {
                    let x = <$t>::random(&mask, &mut thread_rng());
                    assert!(x.highest_bit().map_or(true, |pos| pos < $width));
                }
            }

            #[test]
            fn test_shl1_drops_top_bit() {
                let mask = RingMask::new($width).unwrap();
                let x = <$t>::random(&mask, &mut thread_rng());
                let mut y = x.clone();
                y.shl1(&mask);
                assert!(!y.test_bit(0));
                (1..$width).for_each(|pos| assert_eq!(y.test_bit(pos), x.test_bit(pos - 1)));
                assert!(y.highest_bit().map_or(true, |pos| pos < $width));
            }

            #[test]
            fn test_add_bit_sets_low_bit_after_shift() {
                let mask = RingMask::new($width).unwrap();
                let mut x = <$t>::random(&mask, &mut thread_rng());
                x.shl1(&mask);
                let before = x.clone();
                x.add_bit(true, &mask);
                assert!(x.test_bit(0));
                (1..$width).for_each(|pos| assert_eq!(x.test_bit(pos), before.test_bit(pos)));
            }

            #[test]
            fn test_add_bit_wraps_at_width() {
                let mask = RingMask::new($width).unwrap();
                let mut x = all_ones(&mask);
                assert_eq!(x.highest_bit(), Some($width - 1));
                x.add_bit(true, &mask);
                assert_eq!(x, <$t>::zero(&mask));
            }

            #[test]
            fn test_xor_is_bitwise() {
                let mask = RingMask::new($width).unwrap();
                let x = <$t>::random(&mask, &mut thread_rng());
                let y = <$t>::random(&mask, &mut thread_rng());
                let z = x.clone() ^ y.clone();
                (0..$width)
                    .for_each(|pos| assert_eq!(z.test_bit(pos), x.test_bit(pos) ^ y.test_bit(pos)));
                let mut w = z;
                w ^= &y;
                assert_eq!(w, x);
                assert_eq!(x.clone() ^ x, <$t>::zero(&mask));
            }
        }
    };
}
#[cfg(test)]
pub(crate) use test_ring_laws;
