// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! HAEN1, keys of the same size for both parties.
//!
//! - Alice: `$E = \mathrm{REVOLVE}(P \oplus PSV \oplus A, B, PUBSIZE)$`
//! - Bob: `$P = \mathrm{REVOLVE}(E, B2, W - PUBSIZE) \oplus A2$`
//!
//! `PSV` is the pre-shared value, normally `FA` of the exchange.
//! Another `PSV` still works if Bob also folds `$PSV \oplus FA2$` in, see [`DecryptKey::with_preshared`].

use tracing::debug;

use super::{Decrypt, Encrypt, Transcript};
use crate::hkex;
use crate::params::Params;
use crate::ring::Ring;
use crate::Result;

/// Alice's key `(PSV, A, B)`
#[derive(Debug, Clone)]
pub struct EncryptKey<R> {
    psv: R,
    a: R,
    b: R,
}

impl<R: Ring> EncryptKey<R> {
    /// All values are masked to `W`
    pub fn new(params: &Params<R>, psv: R, a: R, b: R) -> Self {
        Self {
            psv: params.masked(psv),
            a: params.masked(a),
            b: params.masked(b),
        }
    }

    /// `PSV = FA`
    pub fn from_exchange(t: &hkex::Transcript<R>) -> Self {
        Self {
            psv: t.fa.clone(),
            a: t.a.clone(),
            b: t.b.clone(),
        }
    }
}

impl<R: Ring> Encrypt<R> for EncryptKey<R> {
    fn encrypt(&self, params: &Params<R>, p: &R) -> R {
        let k = p.clone() ^ self.psv.clone() ^ self.a.clone();
        let e = params.revolve(&k, &self.b, params.pub_size());
        debug!(e = %format!("{:x}", e), "HAEN1 ciphertext produced");
        e
    }
}

/// Bob's key `(A2, B2)` with the correction `$PSV \oplus FA2$`, zero when `PSV = FA2`
#[derive(Debug, Clone)]
pub struct DecryptKey<R> {
    a2: R,
    b2: R,
    correction: R,
}

impl<R: Ring> DecryptKey<R> {
    /// For `PSV = FA`. `a2` and `b2` are masked to `W`.
    pub fn new(params: &Params<R>, a2: R, b2: R) -> Self {
        Self {
            a2: params.masked(a2),
            b2: params.masked(b2),
            correction: R::zero(params.mask()),
        }
    }

    pub fn from_exchange(params: &Params<R>, t: &hkex::Transcript<R>) -> Self {
        Self::new(params, t.a2.clone(), t.b2.clone())
    }

    /// For a `psv` other than `FA`. `fa2` is Bob's shared secret.
    pub fn with_preshared(mut self, params: &Params<R>, psv: &R, fa2: &R) -> Self {
        self.correction = params.masked(psv.clone() ^ fa2.clone());
        self
    }
}

impl<R: Ring> Decrypt<R> for DecryptKey<R> {
    fn decrypt(&self, params: &Params<R>, e: &R) -> R {
        let mut p = params.revolve(e, &self.b2, params.key_rounds());
        p ^= &self.a2;
        p ^= &self.correction;
        p
    }
}

/// Both keys from the exchange `t`, then [`super::round_trip`]
pub fn round_trip<R: Ring>(
    params: &Params<R>,
    t: &hkex::Transcript<R>,
    p: &R,
) -> Result<Transcript<R>> {
    let ek = EncryptKey::from_exchange(t);
    let dk = DecryptKey::from_exchange(params, t);
    super::round_trip("HAEN1", params, &ek, &dk, p)
}
