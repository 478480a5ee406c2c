// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! Full surroundings cyclic XOR (FSCX) and its iteration.
//!
//! - `$\mathrm{BITX}(X, p) = X_{p+1} \oplus X_p \oplus X_{p-1}$` with positions taken mod `W`
//! - `$\mathrm{BIT}(U, D, p_U, p_D) = \mathrm{BITX}(U, p_U) \oplus \mathrm{BITX}(D, p_D)$`
//! - FSCX shifts the result left once per position `count` in `0..W` and adds `BIT(Up, Down, count, count)` as the low bit,
//!   so the bit of position `count` lands at position `W - 1 - count`
//! - `$\mathrm{REVOLVE}(U, D, r)$` applies `U <- FSCX(U, D)` `r` times
//!
//! With the default [`Alignment::Aligned`] FSCX is symmetric in its two operands.
//! [`Alignment::Mirrored`] pairs position `count` of `Up` with `W - 1 - count` of `Down`, which is not.
//! Either way REVOLVE depends on which operand is held fixed.

use tracing::trace;

use crate::ring::{Ring, RingMask};

/// Which position of `Down` is folded with position `count` of `Up`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// `count` for both
    #[default]
    Aligned,
    /// `W - 1 - count` for `Down`
    Mirrored,
}

impl Alignment {
    pub fn down_pos(self, count: usize, width: usize) -> usize {
        match self {
            Alignment::Aligned => count,
            Alignment::Mirrored => width - 1 - count,
        }
    }
}

/// `BITX`: XOR of the bit at `pos` and its 2 cyclic neighbors
pub fn bitx<R: Ring>(x: &R, pos: usize, mask: &RingMask) -> bool {
    let w = mask.width();
    debug_assert!(pos < w);
    x.test_bit((pos + 1) % w) ^ x.test_bit(pos) ^ x.test_bit((pos + w - 1) % w)
}

/// `BIT`.
/// `pos_u` and `pos_d` are independent.
pub fn bit<R: Ring>(u: &R, d: &R, pos_u: usize, pos_d: usize, mask: &RingMask) -> bool {
    bitx(u, pos_u, mask) ^ bitx(d, pos_d, mask)
}

/// FSCX with [`Alignment::Aligned`]
pub fn fscx<R: Ring>(up: &R, down: &R, mask: &RingMask) -> R {
    fscx_with(up, down, mask, Alignment::Aligned)
}

pub fn fscx_with<R: Ring>(up: &R, down: &R, mask: &RingMask, alignment: Alignment) -> R {
    let w = mask.width();
    let mut result = R::zero(mask);
    for count in 0..w {
        result.shl1(mask);
        let b = bit(up, down, count, alignment.down_pos(count, w), mask);
        result.add_bit(b, mask);
    }
    result
}

/// REVOLVE with [`Alignment::Aligned`].
///
/// Every round is traced with its operands and result at `TRACE`.
/// These include secrets, so enable `TRACE` for this crate only to inspect a run.
///
/// `rounds` equal to `W / 2` or `W - 1` are accepted but known to be weak.
/// See [`crate::params::Params::is_weak`].
pub fn revolve<R: Ring>(up: &R, down: &R, rounds: usize, mask: &RingMask) -> R {
    revolve_with(up, down, rounds, mask, Alignment::Aligned)
}

pub fn revolve_with<R: Ring>(
    up: &R,
    down: &R,
    rounds: usize,
    mask: &RingMask,
    alignment: Alignment,
) -> R {
    (1..=rounds).fold(up.clone(), |acc, step| {
        let result = fscx_with(&acc, down, mask, alignment);
        trace!(
            step,
            up = %format!("{:x}", acc),
            down = %format!("{:x}", down),
            result = %format!("{:x}", result),
            "REVOLVE round"
        );
        result
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use rand::prelude::*;
    use tracing::{span, Event, Level, Metadata, Subscriber};

    use super::*;
    use crate::ring::big::BigRing;

    fn mask(width: usize) -> RingMask {
        RingMask::new(width).unwrap()
    }

    #[test]
    fn test_bitx_wraps_around() {
        let m = mask(8);
        // Only bit 7 set
        let x = 0x80u8;
        assert!(bitx(&x, 0, &m));
        assert!(bitx(&x, 6, &m));
        assert!(bitx(&x, 7, &m));
        assert!(!bitx(&x, 1, &m));
        // Only bit 0 set
        let x = 0x01u8;
        assert!(bitx(&x, 7, &m));
        assert!(bitx(&x, 1, &m));
        assert!(!bitx(&x, 6, &m));
    }

    #[test]
    fn test_bit_with_mismatched_pos() {
        let m = mask(8);
        let (u, d) = (0x01u8, 0x10u8);
        assert!(bit(&u, &d, 0, 0, &m));
        assert!(!bit(&u, &d, 0, 4, &m));
        assert!(!bit(&u, &d, 6, 0, &m));
        assert!(bit(&u, &d, 6, 4, &m));
    }

    #[test]
    fn test_fscx_vectors() {
        assert_eq!(fscx(&0x01u8, &0x00, &mask(8)), 0xc1);
        assert_eq!(fscx(&0x00u8, &0x01, &mask(8)), 0xc1);
        assert_eq!(fscx(&0xe3u8, &0x4c, &mask(8)), 0xe4);
        assert_eq!(fscx(&0x0001u16, &0x0000, &mask(16)), 0xc001);
        assert_eq!(fscx(&0x1234u16, &0xabcd, &mask(16)), 0x6f68);
        assert_eq!(
            fscx(&0xe8829ccaf6450b29u64, &0x056887012e782d9c, &mask(64)),
            0x211f9a219d84d303
        );
    }

    #[test]
    fn test_fscx_same_in_wider_storage() {
        let m = mask(8);
        assert_eq!(fscx(&0xe3u64, &0x4c, &m), 0xe4);
        assert_eq!(fscx(&0xe3u128, &0x4c, &m), 0xe4);
        let up = BigRing::from_limbs(&[0xe3], &m);
        let down = BigRing::from_limbs(&[0x4c], &m);
        assert_eq!(fscx(&up, &down, &m).as_limbs(), &[0xe4]);
    }

    #[test]
    fn test_fscx_big_matches_u64() {
        let m = mask(64);
        for _ in 0..16 {
            let (up, down): (u64, u64) = thread_rng().gen();
            let big_up = BigRing::from_limbs(&[up], &m);
            let big_down = BigRing::from_limbs(&[down], &m);
            assert_eq!(fscx(&big_up, &big_down, &m).as_limbs(), &[fscx(&up, &down, &m)]);
        }
    }

    #[test]
    fn test_fscx_ring_closure() {
        for width in [8, 16, 32] {
            let m = mask(width);
            for _ in 0..32 {
                let up = u64::random(&m, &mut thread_rng());
                let down = u64::random(&m, &mut thread_rng());
                let y = fscx(&up, &down, &m);
                assert!(y.highest_bit().map_or(true, |pos| pos < width));
            }
        }
        let m = mask(256);
        let y = fscx(
            &BigRing::random(&m, &mut thread_rng()),
            &BigRing::random(&m, &mut thread_rng()),
            &m,
        );
        assert!(y.highest_bit().map_or(true, |pos| pos < 256));
    }

    #[test]
    fn test_fscx_mirrored_not_commutative() {
        let m = mask(8);
        let x = fscx_with(&0xe3u8, &0x4c, &m, Alignment::Mirrored);
        let y = fscx_with(&0x4cu8, &0xe3, &m, Alignment::Mirrored);
        assert_eq!((x, y), (0x59, 0x9a));
        assert_ne!(x, y);
    }

    #[test]
    fn test_fscx_aligned_commutative() {
        let m = mask(32);
        for _ in 0..16 {
            let (x, y): (u32, u32) = thread_rng().gen();
            assert_eq!(fscx(&x, &y, &m), fscx(&y, &x, &m));
        }
    }

    #[test]
    fn test_revolve_zero_rounds() {
        let m = mask(64);
        let (x, y): (u64, u64) = thread_rng().gen();
        assert_eq!(revolve(&x, &y, 0, &m), x);
        let m = mask(256);
        let x = BigRing::random(&m, &mut thread_rng());
        let y = BigRing::random(&m, &mut thread_rng());
        assert_eq!(revolve(&x, &y, 0, &m), x);
    }

    #[test]
    fn test_revolve_holds_down_fixed() {
        let m = mask(8);
        assert_eq!(revolve(&0xe3u8, &0x4c, 1, &m), 0xe4);
        assert_eq!(revolve(&0xe3u8, &0x4c, 2, &m), 0xb5);
        assert_eq!(
            revolve(&0xe3u8, &0x4c, 2, &m),
            fscx(&fscx(&0xe3u8, &0x4c, &m), &0x4c, &m)
        );
    }

    /// Counts `TRACE` events from this module
    struct TraceCounter(Arc<AtomicUsize>);

    impl Subscriber for TraceCounter {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }

        fn record(&self, _: &span::Id, _: &span::Record<'_>) {}

        fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}

        fn event(&self, event: &Event<'_>) {
            let meta = event.metadata();
            if *meta.level() == Level::TRACE && meta.target() == "herradura_rs::fscx" {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn enter(&self, _: &span::Id) {}

        fn exit(&self, _: &span::Id) {}
    }

    #[test]
    fn test_revolve_traces_each_round() {
        let count = Arc::new(AtomicUsize::new(0));
        let y = tracing::subscriber::with_default(TraceCounter(count.clone()), || {
            revolve(&0xe3u8, &0x4c, 5, &mask(8))
        });
        assert_eq!(count.load(Ordering::SeqCst), 5);
        assert_eq!(y, revolve(&0xe3u8, &0x4c, 5, &mask(8)));
    }

    #[test]
    fn test_revolve_not_commutative() {
        let m = mask(8);
        let x = revolve(&0xe3u8, &0x4c, 2, &m);
        let y = revolve(&0x4cu8, &0xe3, 2, &m);
        assert_eq!((x, y), (0xb5, 0x51));
    }
}
