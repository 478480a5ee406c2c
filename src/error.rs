// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2023 Yulong Ming (myl7)

//! See [`Error`].

use thiserror::Error;

/// Errors from building [`crate::params::Params`] or from a failed protocol check.
///
/// Configuration errors are reported when the parameters are built,
/// so no computation ever starts with a malformed ring.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("ring width {0} is not a power of two")]
    WidthNotPowerOfTwo(usize),
    #[error("ring width {width} is less than the minimum {min}")]
    WidthTooSmall { width: usize, min: usize },
    #[error("ring width {width} does not fit in the {capacity}-bit representation")]
    WidthExceedsRepr { width: usize, capacity: usize },
    #[error("PUBSIZE {pub_size} is outside (0, {width})")]
    PubSizeOutOfRange { pub_size: usize, width: usize },
    /// `FA != FA2` after an exchange.
    /// Means mismatched `W` or `PUBSIZE`, or a corrupted public value.
    #[error("shared secrets differ: FA = {fa}, FA2 = {fa2}")]
    SharedSecretMismatch { fa: String, fa2: String },
    /// `P != P2` after encrypting then decrypting.
    #[error("{scheme} round trip failed: P = {p}, P2 = {p2}")]
    RoundTripMismatch {
        scheme: &'static str,
        p: String,
        p2: String,
    },
    #[error("invalid hex digit {0:?}")]
    InvalidHexDigit(char),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_errors() {
        assert_eq!(
            Error::WidthNotPowerOfTwo(24).to_string(),
            "ring width 24 is not a power of two"
        );
        assert_eq!(
            Error::PubSizeOutOfRange {
                pub_size: 64,
                width: 64
            }
            .to_string(),
            "PUBSIZE 64 is outside (0, 64)"
        );
        assert_eq!(
            Error::WidthExceedsRepr {
                width: 128,
                capacity: 64
            }
            .to_string(),
            "ring width 128 does not fit in the 64-bit representation"
        );
    }

    #[test]
    fn test_display_invariant_errors() {
        let err = Error::SharedSecretMismatch {
            fa: "e4".to_owned(),
            fa2: "e5".to_owned(),
        };
        assert_eq!(err.to_string(), "shared secrets differ: FA = e4, FA2 = e5");
        let err = Error::RoundTripMismatch {
            scheme: "HAEN1",
            p: "55".to_owned(),
            p2: "54".to_owned(),
        };
        assert_eq!(err.to_string(), "HAEN1 round trip failed: P = 55, P2 = 54");
    }
}
