// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! Herradura key exchange (HKEX).
//!
//! Each party holds 2 secrets `(A, B)` and publishes `D = REVOLVE(A, B, PUBSIZE)`.
//! With the counterpart's public value `D'` it derives `FA = REVOLVE(D', B, W - PUBSIZE) ^ A`.
//! Both parties get the same `FA`.
//!
//! Only public values cross between the parties.
//! [`Party`] is the party-local side, and [`exchange`] runs both sides in one place.

use rand::Rng;
use tracing::{debug, error};

use crate::params::Params;
use crate::ring::Ring;
use crate::{Error, Result};

/// Secrets of one party.
/// `(A, B)` for Alice and `(A2, B2)` for Bob.
#[derive(Debug, Clone)]
pub struct Party<R> {
    a: R,
    b: R,
}

impl<R: Ring> Party<R> {
    /// `a` and `b` are masked to `W`
    pub fn new(params: &Params<R>, a: R, b: R) -> Self {
        Self {
            a: params.masked(a),
            b: params.masked(b),
        }
    }

    pub fn generate<G: Rng + ?Sized>(params: &Params<R>, rng: &mut G) -> Self {
        Self {
            a: params.random(rng),
            b: params.random(rng),
        }
    }

    pub fn a(&self) -> &R {
        &self.a
    }

    pub fn b(&self) -> &R {
        &self.b
    }

    /// `D = REVOLVE(A, B, PUBSIZE)`
    pub fn public_value(&self, params: &Params<R>) -> R {
        params.revolve(&self.a, &self.b, params.pub_size())
    }

    /// `FA = REVOLVE(D', B, W - PUBSIZE) ^ A` where `D'` is the counterpart's public value
    pub fn shared_secret(&self, params: &Params<R>, counterpart: &R) -> R {
        let mut fa = params.revolve(counterpart, &self.b, params.key_rounds());
        fa ^= &self.a;
        fa
    }
}

/// Every value of an exchange.
///
/// `fa == fa2` for every transcript returned by [`exchange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript<R> {
    /// Alice's secret 1
    pub a: R,
    /// Alice's secret 2
    pub b: R,
    /// Bob's secret 1
    pub a2: R,
    /// Bob's secret 2
    pub b2: R,
    /// Alice's public value
    pub d: R,
    /// Bob's public value
    pub d2: R,
    /// Alice's shared secret
    pub fa: R,
    /// Bob's shared secret
    pub fa2: R,
}

impl<R: Ring> Transcript<R> {
    pub fn alice(&self) -> Party<R> {
        Party {
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }

    pub fn bob(&self) -> Party<R> {
        Party {
            a: self.a2.clone(),
            b: self.b2.clone(),
        }
    }
}

/// Run both sides of an exchange between `alice` and `bob`.
///
/// Returns [`Error::SharedSecretMismatch`] if the 2 shared secrets differ.
/// Both parties use `params` here, so that does not happen.
pub fn exchange<R: Ring>(
    params: &Params<R>,
    alice: &Party<R>,
    bob: &Party<R>,
) -> Result<Transcript<R>> {
    let d = alice.public_value(params);
    let d2 = bob.public_value(params);
    debug!(d = %format!("{:x}", d), d2 = %format!("{:x}", d2), "public values derived");
    let fa = alice.shared_secret(params, &d2);
    let fa2 = bob.shared_secret(params, &d);
    check_shared_secrets(&fa, &fa2)?;
    debug!(
        width = params.width(),
        pub_size = params.pub_size(),
        "shared secret derived"
    );
    Ok(Transcript {
        a: alice.a.clone(),
        b: alice.b.clone(),
        a2: bob.a.clone(),
        b2: bob.b.clone(),
        d,
        d2,
        fa,
        fa2,
    })
}

/// Generate both parties with `rng`, then [`exchange`]
pub fn exchange_random<R: Ring, G: Rng + ?Sized>(
    params: &Params<R>,
    rng: &mut G,
) -> Result<Transcript<R>> {
    let alice = Party::generate(params, rng);
    let bob = Party::generate(params, rng);
    exchange(params, &alice, &bob)
}

pub fn check_shared_secrets<R: Ring>(fa: &R, fa2: &R) -> Result<()> {
    if fa == fa2 {
        return Ok(());
    }
    error!("shared secrets differ");
    Err(Error::SharedSecretMismatch {
        fa: format!("{:x}", fa),
        fa2: format!("{:x}", fa2),
    })
}
