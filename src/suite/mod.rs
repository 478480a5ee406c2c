// Copyright (C) myl7
// SPDX-License-Identifier: Apache-2.0

//! The rest of the Herradura suite, built from the same REVOLVE rounds as [`crate::hkex`].
//!
//! - [`hske`]: symmetric encryption with a pre-shared key
//! - [`hpks`]: signatures with a [`KeyPair`]
//! - [`hpke`]: public-key encryption with a [`KeyPair`]
//!
//! A key pair is an exchange in which one party holds both sides:
//! `C = REVOLVE(A, B, PUBSIZE)` and `C2 = REVOLVE(A2, B2, PUBSIZE)`,
//! with `{C, B2, A2}` published and `{C2, B, A}` kept.

use rand::Rng;

use crate::hkex::Party;
use crate::params::Params;
use crate::ring::Ring;

pub mod hpke;
pub mod hpks;
pub mod hske;

/// `{C, B2, A2}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey<R> {
    pub c: R,
    pub b2: R,
    pub a2: R,
}

/// `{C2, B, A}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey<R> {
    pub c2: R,
    pub b: R,
    pub a: R,
}

impl<R: Ring> PublicKey<R> {
    /// `REVOLVE(C, B2, W - PUBSIZE) ^ A2`, the value both halves of the pair agree on
    fn session(&self, params: &Params<R>) -> R {
        Party::new(params, self.a2.clone(), self.b2.clone()).shared_secret(params, &self.c)
    }
}

impl<R: Ring> PrivateKey<R> {
    /// `REVOLVE(C2, B, W - PUBSIZE) ^ A`
    fn session(&self, params: &Params<R>) -> R {
        Party::new(params, self.a.clone(), self.b.clone()).shared_secret(params, &self.c2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair<R> {
    pub public: PublicKey<R>,
    pub private: PrivateKey<R>,
}

impl<R: Ring> KeyPair<R> {
    /// `(a, b)` and `(a2, b2)` as the 2 sides of an exchange
    pub fn from_parties(params: &Params<R>, first: &Party<R>, second: &Party<R>) -> Self {
        Self {
            public: PublicKey {
                c: first.public_value(params),
                b2: second.b().clone(),
                a2: second.a().clone(),
            },
            private: PrivateKey {
                c2: second.public_value(params),
                b: first.b().clone(),
                a: first.a().clone(),
            },
        }
    }

    pub fn generate<G: Rng + ?Sized>(params: &Params<R>, rng: &mut G) -> Self {
        let first = Party::generate(params, rng);
        let second = Party::generate(params, rng);
        Self::from_parties(params, &first, &second)
    }
}
