// Copyright (C) myl7
// SPDX-License-Identifier: Apache-2.0

//! Herradura one-to-one asymmetric encryption (HAEN) on top of [`crate::hkex`].
//!
//! Encryption takes `PUBSIZE` rounds and decryption the remaining `W - PUBSIZE`.
//!
//! - [`v1`]: HAEN1. Both parties take part in the exchange and keep keys of the same size.
//! - [`v2`]: HAEN2. Bob runs the exchange alone and hands Alice a smaller encryption key.

#[cfg(feature = "multi-thread")]
use rayon::prelude::*;
use tracing::error;

use crate::params::Params;
use crate::ring::Ring;
use crate::{Error, Result};

pub mod v1;
pub mod v2;

/// Encryption key API.
///
/// `Sync` lets [`Encrypt::encrypt_many_mt`] share one key across the `rayon` workers.
/// The bound stays without the `multi-thread` feature so key types are the same either way.
pub trait Encrypt<R: Ring>: Sync {
    fn encrypt(&self, params: &Params<R>, p: &R) -> R;

    /// Encrypt each of `ps` independently
    fn encrypt_many(&self, params: &Params<R>, ps: &[R]) -> Vec<R> {
        #[cfg(feature = "multi-thread")]
        return self.encrypt_many_mt(params, ps);
        #[cfg(not(feature = "multi-thread"))]
        return self.encrypt_many_st(params, ps);
    }

    /// Encrypt many with single-threading.
    /// See [`Encrypt::encrypt_many`].
    fn encrypt_many_st(&self, params: &Params<R>, ps: &[R]) -> Vec<R> {
        ps.iter().map(|p| self.encrypt(params, p)).collect()
    }

    #[cfg(feature = "multi-thread")]
    /// Encrypt many with multi-threading.
    /// See [`Encrypt::encrypt_many`].
    fn encrypt_many_mt(&self, params: &Params<R>, ps: &[R]) -> Vec<R> {
        ps.par_iter().map(|p| self.encrypt(params, p)).collect()
    }
}

/// Decryption key API.
///
/// See [`Encrypt`] for the `Sync` requirement.
pub trait Decrypt<R: Ring>: Sync {
    fn decrypt(&self, params: &Params<R>, e: &R) -> R;

    /// Decrypt each of `es` independently
    fn decrypt_many(&self, params: &Params<R>, es: &[R]) -> Vec<R> {
        #[cfg(feature = "multi-thread")]
        return self.decrypt_many_mt(params, es);
        #[cfg(not(feature = "multi-thread"))]
        return self.decrypt_many_st(params, es);
    }

    /// Decrypt many with single-threading.
    /// See [`Decrypt::decrypt_many`].
    fn decrypt_many_st(&self, params: &Params<R>, es: &[R]) -> Vec<R> {
        es.iter().map(|e| self.decrypt(params, e)).collect()
    }

    #[cfg(feature = "multi-thread")]
    /// Decrypt many with multi-threading.
    /// See [`Decrypt::decrypt_many`].
    fn decrypt_many_mt(&self, params: &Params<R>, es: &[R]) -> Vec<R> {
        es.par_iter().map(|e| self.decrypt(params, e)).collect()
    }
}

/// Plaintext `p`, ciphertext `e` and the decrypted `p2`.
/// `p == p2` for every transcript returned by [`round_trip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript<R> {
    pub p: R,
    pub e: R,
    pub p2: R,
}

/// Encrypt `p` with `ek`, decrypt with `dk`, and check that `p` comes back.
///
/// `scheme` only names the scheme in [`Error::RoundTripMismatch`].
pub fn round_trip<R, EK, DK>(
    scheme: &'static str,
    params: &Params<R>,
    ek: &EK,
    dk: &DK,
    p: &R,
) -> Result<Transcript<R>>
where
    R: Ring,
    EK: Encrypt<R>,
    DK: Decrypt<R>,
{
    let e = ek.encrypt(params, p);
    let p2 = dk.decrypt(params, &e);
    if &p2 != p {
        error!(scheme, "decrypted plaintext differs");
        return Err(Error::RoundTripMismatch {
            scheme,
            p: format!("{:x}", p),
            p2: format!("{:x}", p2),
        });
    }
    Ok(Transcript {
        p: p.clone(),
        e,
        p2,
    })
}
