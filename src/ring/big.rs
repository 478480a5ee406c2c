// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! Arbitrary-width rings.
//!
//! Bits are stored LSB first in whole `u64` limbs.
//! Limb storage does not truncate at `W` unless `W` is a multiple of 64,
//! so every shift and add is followed by an AND with [`RingMask::ones`].

use std::fmt;
use std::ops::{BitXor, BitXorAssign};

use bitvec::prelude::*;
use rand::Rng;

use super::{Ring, RingMask};
use crate::{Error, Result};

/// See [`self`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigRing(BitVec<u64, Lsb0>);

impl BigRing {
    /// Little-endian limbs.
    /// Missing limbs are zero and extra ones, like bits at positions `>= W`, are dropped.
    pub fn from_limbs(limbs: &[u64], mask: &RingMask) -> Self {
        let mut raw = limbs.to_vec();
        raw.resize(mask.limbs(), 0);
        BigRing(BitVec::from_vec(raw)).masked(mask)
    }

    /// Big-endian hex digits with an optional `0x` prefix. Masked to `W` bits.
    pub fn from_hex(s: &str, mask: &RingMask) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut x = Self::zero(mask);
        let len = x.0.len();
        for (i, c) in digits.chars().rev().enumerate() {
            let nibble = c.to_digit(16).ok_or(Error::InvalidHexDigit(c))?;
            (0..4)
                .filter(|&j| (nibble >> j) & 1 == 1)
                .map(|j| i * 4 + j)
                .take_while(|&pos| pos < len)
                .for_each(|pos| x.0.set(pos, true));
        }
        Ok(x.masked(mask))
    }

    pub fn as_limbs(&self) -> &[u64] {
        self.0.as_raw_slice()
    }

    pub fn bits(&self) -> &BitSlice<u64, Lsb0> {
        &self.0
    }
}

impl Ring for BigRing {
    const CAPACITY: Option<usize> = None;

    fn zero(mask: &RingMask) -> Self {
        BigRing(BitVec::repeat(false, mask.ones().len()))
    }

    fn random<G: Rng + ?Sized>(mask: &RingMask, rng: &mut G) -> Self {
        let raw: Vec<u64> = (0..mask.limbs()).map(|_| rng.gen()).collect();
        BigRing(BitVec::from_vec(raw)).masked(mask)
    }

    /// Positions past the storage read as zero
    fn test_bit(&self, pos: usize) -> bool {
        self.0.get(pos).is_some_and(|bit| *bit)
    }

    fn shl1(&mut self, mask: &RingMask) {
        // Towards higher positions
        self.0.shift_end(1);
        self.mask_in_place(mask);
    }

    fn add_bit(&mut self, bit: bool, mask: &RingMask) {
        if !bit {
            return;
        }
        // Carry up to the first clear bit
        match self.0.first_zero() {
            Some(pos) => {
                self.0[..pos].fill(false);
                self.0.set(pos, true);
            }
            None => self.0.fill(false),
        }
        self.mask_in_place(mask);
    }

    /// Also resizes the storage to that of `mask`
    fn masked(mut self, mask: &RingMask) -> Self {
        self.0.resize(mask.ones().len(), false);
        self.mask_in_place(mask);
        self
    }

    fn highest_bit(&self) -> Option<usize> {
        self.0.last_one()
    }
}

impl BigRing {
    fn mask_in_place(&mut self, mask: &RingMask) {
        debug_assert_eq!(self.0.len(), mask.ones().len());
        self.0
            .as_raw_mut_slice()
            .iter_mut()
            .zip(mask.ones().as_raw_slice())
            .for_each(|(limb, ones)| *limb &= ones);
    }
}

impl BitXor for BigRing {
    type Output = Self;

    fn bitxor(mut self, rhs: Self) -> Self::Output {
        self ^= &rhs;
        self
    }
}

impl BitXorAssign<&BigRing> for BigRing {
    /// Operands of different lengths are XORed as if zero-extended
    fn bitxor_assign(&mut self, rhs: &BigRing) {
        if self.0.len() < rhs.0.len() {
            self.0.resize(rhs.0.len(), false);
        }
        self.0
            .as_raw_mut_slice()
            .iter_mut()
            .zip(rhs.0.as_raw_slice())
            .for_each(|(l, r)| *l ^= r);
    }
}

/// Without padding, like the integer impls
impl fmt::LowerHex for BigRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        let nibbles: Vec<u8> = self
            .0
            .chunks(4)
            .rev()
            .map(|chunk| chunk.load_le::<u8>())
            .skip_while(|&nibble| nibble == 0)
            .collect();
        if nibbles.is_empty() {
            return f.write_str("0");
        }
        nibbles
            .into_iter()
            .try_for_each(|nibble| write!(f, "{:x}", nibble))
    }
}
