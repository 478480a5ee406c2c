// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! Herradura symmetric key encryption (HSKE).
//!
//! - Encryption: `$E = \mathrm{REVOLVE}(P, K, PUBSIZE)$`
//! - Decryption: `$P = \mathrm{REVOLVE}(E, K, W - PUBSIZE)$`

use crate::haen::{Decrypt, Encrypt};
use crate::params::Params;
use crate::ring::Ring;

/// Pre-shared key `K`, used for both directions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key<R>(pub R);

impl<R: Ring> Encrypt<R> for Key<R> {
    fn encrypt(&self, params: &Params<R>, p: &R) -> R {
        params.revolve(p, &self.0, params.pub_size())
    }
}

impl<R: Ring> Decrypt<R> for Key<R> {
    fn decrypt(&self, params: &Params<R>, e: &R) -> R {
        params.revolve(e, &self.0, params.key_rounds())
    }
}
