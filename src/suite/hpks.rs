// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! Herradura public key signature (HPKS).
//!
//! - Signing: `$S = \mathrm{REVOLVE}(C2, B, W - PUBSIZE) \oplus A \oplus P$`
//! - Verification: `$V = \mathrm{REVOLVE}(C, B2, W - PUBSIZE) \oplus A2 \oplus S$`, accepted iff `V = P`

use super::{PrivateKey, PublicKey};
use crate::params::Params;
use crate::ring::Ring;

impl<R: Ring> PrivateKey<R> {
    pub fn sign(&self, params: &Params<R>, p: &R) -> R {
        self.session(params) ^ params.masked(p.clone())
    }
}

impl<R: Ring> PublicKey<R> {
    /// `V`, the message `s` signs
    pub fn recover(&self, params: &Params<R>, s: &R) -> R {
        self.session(params) ^ params.masked(s.clone())
    }

    /// `p` is compared on its low `W` bits
    pub fn verify(&self, params: &Params<R>, p: &R, s: &R) -> bool {
        self.recover(params, s) == params.masked(p.clone())
    }
}
