// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! Herradura: the FSCX bit-mixing function, its iteration REVOLVE,
//! the HKEX key exchange, and the HAEN1/HAEN2 one-to-one asymmetric encryption built on it.
//!
//! The construction is reproduced bit for bit as designed.
//! No security bound is claimed for it.
//!
//! Variable names follow the Herradura demonstrations: `A`, `B` are Alice's secrets, `A2`, `B2` are Bob's,
//! `D`, `D2` are the exchanged public values and `FA`, `FA2` the shared secrets.
//!
//! ```
//! use herradura_rs::hkex::{exchange, Party};
//! use herradura_rs::haen::v1;
//! use herradura_rs::{Params, PubSize};
//!
//! let params = Params::<u8>::new(8, PubSize::Fixed(2)).unwrap();
//! let alice = Party::new(&params, 0xe3, 0x4c);
//! let bob = Party::new(&params, 0x19, 0x7a);
//! let t = exchange(&params, &alice, &bob).unwrap();
//! assert_eq!(t.fa, t.fa2);
//!
//! let r = v1::round_trip(&params, &t, &0x55).unwrap();
//! assert_eq!(r.p2, 0x55);
//! ```

pub mod error;
pub mod fscx;
pub mod haen;
pub mod hkex;
pub mod params;
#[cfg(feature = "prg")]
pub mod prg;
pub mod ring;
pub mod suite;

pub use error::{Error, Result};
pub use fscx::Alignment;
pub use params::{Params, PubSize};
pub use ring::big::BigRing;
pub use ring::{Ring, RingMask};
