// Copyright (C) myl7
// SPDX-License-Identifier: Apache-2.0

//! Seedable randomness source for secrets and plaintexts.
//!
//! Secrets only need *some* uniform source, so any [`rand::Rng`] works with [`crate::ring::Ring::random`].
//! [`Aes256CtrPrg`] is for reproducible runs from a fixed seed.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes256;
use rand::{RngCore, SeedableRng};

const BLK_SIZE: usize = 16;

/// AES256 in counter mode as a PRG.
///
/// Block `i` of the output is `$\mathrm{AES}_{key}(i)$` with `i` encoded as a little-endian `u128`.
pub struct Aes256CtrPrg {
    cipher: Aes256,
    ctr: u128,
    buf: [u8; BLK_SIZE],
    /// Bytes of `buf` already handed out
    used: usize,
}

impl Aes256CtrPrg {
    pub fn new(key: &[u8; 32]) -> Self {
        let cipher = Aes256::new(GenericArray::from_slice(key));
        Self {
            cipher,
            ctr: 0,
            buf: [0; BLK_SIZE],
            used: BLK_SIZE,
        }
    }

    fn refill(&mut self) {
        let mut block = GenericArray::clone_from_slice(&self.ctr.to_le_bytes());
        self.cipher.encrypt_block(&mut block);
        self.buf.copy_from_slice(&block);
        self.ctr = self.ctr.wrapping_add(1);
        self.used = 0;
    }
}

impl RngCore for Aes256CtrPrg {
    fn next_u32(&mut self) -> u32 {
        let mut bs = [0; 4];
        self.fill_bytes(&mut bs);
        u32::from_le_bytes(bs)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bs = [0; 8];
        self.fill_bytes(&mut bs);
        u64::from_le_bytes(bs)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut filled = 0;
        while filled < dest.len() {
            if self.used == BLK_SIZE {
                self.refill();
            }
            let n = (BLK_SIZE - self.used).min(dest.len() - filled);
            dest[filled..filled + n].copy_from_slice(&self.buf[self.used..self.used + n]);
            self.used += n;
            filled += n;
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Aes256CtrPrg {
    type Seed = [u8; 32];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(&seed)
    }
}
