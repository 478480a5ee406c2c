// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! See [`Params`].

use std::marker::PhantomData;

use rand::Rng;
use tracing::warn;

use crate::fscx::{fscx_with, revolve_with, Alignment};
use crate::ring::{Ring, RingMask};
use crate::{Error, Result};

/// How `PUBSIZE` is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PubSize {
    /// Independent of the width
    Fixed(usize),
    /// `W / 4`
    Quarter,
}

impl PubSize {
    pub fn resolve(self, width: usize) -> usize {
        match self {
            PubSize::Fixed(n) => n,
            PubSize::Quarter => width / 4,
        }
    }
}

/// Parameters shared by both parties of an exchange: `W`, `PUBSIZE` and the [`Alignment`].
///
/// Public values are derived with `PUBSIZE` rounds and shared secrets with the remaining `W - PUBSIZE`.
/// All checks happen in [`Params::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params<R> {
    mask: RingMask,
    pub_size: usize,
    alignment: Alignment,
    _ring: PhantomData<fn() -> R>,
}

impl<R: Ring> Params<R> {
    /// `width` must be a power of two in `[8, R::CAPACITY]` and `PUBSIZE` in `(0, width)`
    pub fn new(width: usize, pub_size: PubSize) -> Result<Self> {
        let mask = RingMask::new(width)?;
        mask.check::<R>()?;
        let pub_size = pub_size.resolve(width);
        if pub_size == 0 || pub_size >= width {
            return Err(Error::PubSizeOutOfRange { pub_size, width });
        }
        let params = Self {
            mask,
            pub_size,
            alignment: Alignment::default(),
            _ring: PhantomData,
        };
        if params.is_weak() {
            warn!(
                width,
                pub_size,
                key_rounds = params.key_rounds(),
                "PUBSIZE gives a known weak round count"
            );
        }
        Ok(params)
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// `W`
    pub fn width(&self) -> usize {
        self.mask.width()
    }

    /// `PUBSIZE`. Rounds to derive public values and to encrypt.
    pub fn pub_size(&self) -> usize {
        self.pub_size
    }

    /// `W - PUBSIZE`. Rounds to derive shared secrets and to decrypt.
    pub fn key_rounds(&self) -> usize {
        self.width() - self.pub_size
    }

    pub fn mask(&self) -> &RingMask {
        &self.mask
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Either pass, `PUBSIZE` or `W - PUBSIZE` rounds, runs `W / 2` or `W - 1` rounds.
    /// Observably weak, e.g., 32 and 63 for `W = 64`, but still valid.
    pub fn is_weak(&self) -> bool {
        let w = self.width();
        [self.pub_size, self.key_rounds()]
            .into_iter()
            .any(|rounds| rounds == w / 2 || rounds == w - 1)
    }

    /// Operands are masked to `W` first
    pub fn fscx(&self, up: &R, down: &R) -> R {
        let (up, down) = (self.masked(up.clone()), self.masked(down.clone()));
        fscx_with(&up, &down, &self.mask, self.alignment)
    }

    /// Operands are masked to `W` first, so even 0 rounds give a value of `W` bits
    pub fn revolve(&self, up: &R, down: &R, rounds: usize) -> R {
        let (up, down) = (self.masked(up.clone()), self.masked(down.clone()));
        revolve_with(&up, &down, rounds, &self.mask, self.alignment)
    }

    pub fn random<G: Rng + ?Sized>(&self, rng: &mut G) -> R {
        R::random(&self.mask, rng)
    }

    /// Drop the bits of `x` at positions `>= W`
    pub fn masked(&self, x: R) -> R {
        x.masked(&self.mask)
    }
}
