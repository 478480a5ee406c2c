// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! Herradura public key encryption (HPKE).
//!
//! - Encryption with the public key: `$E = \mathrm{REVOLVE}(C, B2, W - PUBSIZE) \oplus A2 \oplus P$`
//! - Decryption with the private key: `$P = \mathrm{REVOLVE}(C2, B, W - PUBSIZE) \oplus A \oplus E$`

use super::{PrivateKey, PublicKey};
use crate::haen::{Decrypt, Encrypt};
use crate::params::Params;
use crate::ring::Ring;

impl<R: Ring> Encrypt<R> for PublicKey<R> {
    fn encrypt(&self, params: &Params<R>, p: &R) -> R {
        self.session(params) ^ params.masked(p.clone())
    }
}

impl<R: Ring> Decrypt<R> for PrivateKey<R> {
    fn decrypt(&self, params: &Params<R>, e: &R) -> R {
        self.session(params) ^ params.masked(e.clone())
    }
}
