// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! Native unsigned integers as rings.
//!
//! A type carries any power-of-two width up to its bit count.
//! Widths narrower than the type are kept by masking after every shift and add,
//! e.g., an 8-bit ring in a `u64`.

use rand::Rng;

use super::{Ring, RingMask};

macro_rules! decl_int_ring {
    ($t:ty) => {
        impl Ring for $t {
            const CAPACITY: Option<usize> = Some(<$t>::BITS as usize);

            fn zero(_mask: &RingMask) -> Self {
                0
            }

            fn random<G: Rng + ?Sized>(mask: &RingMask, rng: &mut G) -> Self {
                rng.gen::<$t>().masked(mask)
            }

            fn test_bit(&self, pos: usize) -> bool {
                debug_assert!(pos < <$t>::BITS as usize);
                (*self >> pos) & 1 == 1
            }

            fn shl1(&mut self, mask: &RingMask) {
                *self = (*self << 1).masked(mask);
            }

            fn add_bit(&mut self, bit: bool, mask: &RingMask) {
                *self = self.wrapping_add(bit as $t).masked(mask);
            }

            fn masked(self, mask: &RingMask) -> Self {
                debug_assert!(mask.width() <= <$t>::BITS as usize);
                self & (<$t>::MAX >> (<$t>::BITS as usize - mask.width()))
            }

            fn highest_bit(&self) -> Option<usize> {
                (*self != 0).then(|| (<$t>::BITS - 1 - self.leading_zeros()) as usize)
            }
        }
    };
}

decl_int_ring!(u8);
decl_int_ring!(u16);
decl_int_ring!(u32);
decl_int_ring!(u64);
decl_int_ring!(u128);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::test_ring_laws;

    test_ring_laws!(test_u8_ring_laws, u8, 8);
    test_ring_laws!(test_u16_ring_laws, u16, 16);
    test_ring_laws!(test_u32_ring_laws, u32, 32);
    test_ring_laws!(test_u64_ring_laws, u64, 64);
    test_ring_laws!(test_u128_ring_laws, u128, 128);
    test_ring_laws!(test_u64_narrow_ring_laws, u64, 16);

    #[test]
    fn test_narrow_width_masks_storage() {
        let mask = RingMask::new(8).unwrap();
        assert_eq!(0x1e3u64.masked(&mask), 0xe3);
        let mut x = 0xe3u64;
        x.shl1(&mask);
        assert_eq!(x, 0xc6);
        x.add_bit(true, &mask);
        assert_eq!(x, 0xc7);
    }

    #[test]
    fn test_highest_bit() {
        assert_eq!(0u8.highest_bit(), None);
        assert_eq!(1u8.highest_bit(), Some(0));
        assert_eq!(0x80u8.highest_bit(), Some(7));
        assert_eq!(u64::MAX.highest_bit(), Some(63));
    }
}
