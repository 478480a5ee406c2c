// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! HAEN2, keys of different sizes.
//!
//! Bob runs the whole exchange himself and gives `(PSV, B)` to Alice through another channel.
//! Alice never sees `A2` or `B2`.
//!
//! - Alice: `$E = \mathrm{REVOLVE}(P \oplus PSV, B, PUBSIZE)$`
//! - Bob: `$P = \mathrm{REVOLVE}(E, B2, W - PUBSIZE) \oplus A \oplus A2$`
//!
//! Alice's key is 2 values and Bob's is 3 (4 with a pre-shared value other than `FA`).

use tracing::debug;

use super::{Decrypt, Encrypt, Transcript};
use crate::hkex;
use crate::params::Params;
use crate::ring::Ring;
use crate::Result;

/// Alice's key `(PSV, B)`
#[derive(Debug, Clone)]
pub struct EncryptKey<R> {
    psv: R,
    b: R,
}

impl<R: Ring> EncryptKey<R> {
    /// Both values are masked to `W`
    pub fn new(params: &Params<R>, psv: R, b: R) -> Self {
        Self {
            psv: params.masked(psv),
            b: params.masked(b),
        }
    }

    /// `PSV = FA`
    pub fn from_exchange(t: &hkex::Transcript<R>) -> Self {
        Self {
            psv: t.fa.clone(),
            b: t.b.clone(),
        }
    }
}

impl<R: Ring> Encrypt<R> for EncryptKey<R> {
    fn encrypt(&self, params: &Params<R>, p: &R) -> R {
        let k = p.clone() ^ self.psv.clone();
        let e = params.revolve(&k, &self.b, params.pub_size());
        debug!(e = %format!("{:x}", e), "HAEN2 ciphertext produced");
        e
    }
}

/// Bob's key `(A, A2, B2)` with the correction `$PSV \oplus FA2$`
#[derive(Debug, Clone)]
pub struct DecryptKey<R> {
    a: R,
    a2: R,
    b2: R,
    correction: R,
}

impl<R: Ring> DecryptKey<R> {
    /// For `PSV = FA`. All values are masked to `W`.
    pub fn new(params: &Params<R>, a: R, a2: R, b2: R) -> Self {
        Self {
            a: params.masked(a),
            a2: params.masked(a2),
            b2: params.masked(b2),
            correction: R::zero(params.mask()),
        }
    }

    pub fn from_exchange(params: &Params<R>, t: &hkex::Transcript<R>) -> Self {
        Self::new(params, t.a.clone(), t.a2.clone(), t.b2.clone())
    }

    /// For a `psv` other than `FA`. `fa2` is the shared secret of the exchange.
    pub fn with_preshared(mut self, params: &Params<R>, psv: &R, fa2: &R) -> Self {
        self.correction = params.masked(psv.clone() ^ fa2.clone());
        self
    }
}

impl<R: Ring> Decrypt<R> for DecryptKey<R> {
    fn decrypt(&self, params: &Params<R>, e: &R) -> R {
        let mut p = params.revolve(e, &self.b2, params.key_rounds());
        p ^= &self.a;
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
    super::round_trip("HAEN2", params, &ek, &dk, p)
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use super::*;
    use crate::hkex::{exchange, exchange_random, Party};
    use crate::params::PubSize;
    use crate::ring::big::BigRing;
    use crate::Error;

    #[test]
    fn test_haen2_w8() {
        let params = Params::<u8>::new(8, PubSize::Fixed(2)).unwrap();
        let alice = Party::new(&params, 0xe3, 0x4c);
        let bob = Party::new(&params, 0x19, 0x7a);
        let t = exchange(&params, &alice, &bob).unwrap();
        let r = round_trip(&params, &t, &0x55).unwrap();
        assert_eq!(r, Transcript { p: 0x55, e: 0x3a, p2: 0x55 });
    }

    #[test]
    fn test_haen2_w32() {
        let params = Params::<u32>::new(32, PubSize::Fixed(8)).unwrap();
        let alice = Party::new(&params, 0xf6450b29, 0x2e782d9c);
        let bob = Party::new(&params, 0x76ba0107, 0x357dafa2);
        let t = exchange(&params, &alice, &bob).unwrap();
        let r = round_trip(&params, &t, &0x89abcdef).unwrap();
        assert_eq!(r.e, 0x760a8bac);
    }

    #[test]
    fn test_haen2_random() {
        for (width, pub_size) in [(8, 2), (16, 4), (32, 8), (64, 16), (64, 1)] {
            let params = Params::<u64>::new(width, PubSize::Fixed(pub_size)).unwrap();
            let t = exchange_random(&params, &mut thread_rng()).unwrap();
            for _ in 0..8 {
                let p = params.random(&mut thread_rng());
                assert_eq!(round_trip(&params, &t, &p).unwrap().p2, p);
            }
        }
    }

    #[test]
    fn test_haen2_big() {
        let params = Params::<BigRing>::new(128, PubSize::Quarter).unwrap();
        let t = exchange_random(&params, &mut thread_rng()).unwrap();
        let p = params.random(&mut thread_rng());
        assert_eq!(round_trip(&params, &t, &p).unwrap().p2, p);
    }

    #[test]
    fn test_haen2_preshared() {
        let params = Params::<u64>::new(64, PubSize::Fixed(16)).unwrap();
        let t = exchange_random(&params, &mut thread_rng()).unwrap();
        let psv: u64 = params.random(&mut thread_rng());
        let ek = EncryptKey::new(&params, psv, t.b);
        let dk = DecryptKey::from_exchange(&params, &t).with_preshared(&params, &psv, &t.fa2);
        let p = params.random(&mut thread_rng());
        assert_eq!(dk.decrypt(&params, &ek.encrypt(&params, &p)), p);
    }

    #[test]
    fn test_haen2_unmasked_inputs_w16() {
        let params = Params::<u64>::new(16, PubSize::Fixed(4)).unwrap();
        let t = exchange_random(&params, &mut thread_rng()).unwrap();
        let high = 0xbeef_0000;
        let ek = EncryptKey::new(&params, t.fa | high, t.b | high);
        let dk = DecryptKey::new(&params, t.a | high, t.a2 | high, t.b2 | high)
            .with_preshared(&params, &(t.fa | high), &t.fa2);
        let e = ek.encrypt(&params, &(0x5555 | high));
        assert_eq!(e, EncryptKey::from_exchange(&t).encrypt(&params, &0x5555));
        assert_eq!(dk.decrypt(&params, &e), 0x5555);
    }

    #[test]
    fn test_haen2_needs_a() {
        let params = Params::<u64>::new(64, PubSize::Fixed(16)).unwrap();
        let t = exchange_random(&params, &mut thread_rng()).unwrap();
        let ek = EncryptKey::from_exchange(&t);
        // HAEN1's decryption key lacks `A`
        let dk = crate::haen::v1::DecryptKey::from_exchange(&params, &t);
        let p = t.a ^ 0x55;
        assert!(matches!(
            crate::haen::round_trip("HAEN2", &params, &ek, &dk, &p),
            Err(Error::RoundTripMismatch { .. })
        ));
    }
}
