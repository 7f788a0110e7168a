// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! Error types for the public API.
//!
//! The raw C-ABI surface funnels every failure into a single public
//! "invalid" signal (one nonzero `int`); internally this crate keeps
//! the two failure modes distinct so callers and tests can tell them
//! apart, with a manual `Display`/`Error` impl rather than pulling in
//! a dependency for it.

use core::fmt;

/// Why a public operation failed. Both variants collapse to the same
/// nonzero `int` at the raw C-ABI boundary (see `api::verify_raw` and
/// friends).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SignatureError {
    /// A 32-byte public key or `R` field failed to decompress: no
    /// square root existed, or a degenerate-branch tag/parity check
    /// failed.
    BadPublicKey,
    /// Decompression succeeded but the quadratic-relation check in
    /// [`crate::verify::check`] found at least one relation nonzero.
    BadSignature,
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureError::BadPublicKey => f.write_str("malformed or undecompressible public key"),
            SignatureError::BadSignature => f.write_str("signature failed verification"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignatureError {}
