// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! Known-answer vectors for the BobJr sponge, precomputed with an
//! independent Python model of the reduced-round Keccak-f\[800\]
//! permutation so this crate's own implementation isn't its only
//! witness.

use qdsa_gs254::sponge::hash64;

fn from_hex64(s: &str) -> [u8; 64] {
    let bytes = hex::decode(s).expect("valid hex");
    let mut out = [0u8; 64];
    out.copy_from_slice(&bytes);
    out
}

#[test]
fn empty_absorb_kat() {
    let expected = from_hex64(
        "dbd684e50a19864886ffd2890350ecd95e9611c8ba5fefb3e104cb073be85620b6a5de7950eedbf3e1bacca6a113fd72a9cba370163dca7cd41049c57351340b",
    );
    assert_eq!(hash64(&[]), expected);
}

#[test]
fn rate_boundary_kat() {
    // 68 bytes of 0x00 (exactly one full rate block), then 1 more 0x00 byte.
    let expected = from_hex64(
        "07685327d4c1d43fb2732e2cf98010c35165cf3e2e414fadfb3022681229112793876a469e53734e0790fdd685bfb1a383a65d51bf671eb8e05fc2ed14b27d71",
    );
    let block = [0u8; 68];
    let tail = [0u8; 1];
    assert_eq!(hash64(&[&block, &tail]), expected);
}

#[test]
fn short_ascii_kat() {
    let expected = from_hex64(
        "81eefc5de5ed9d1be0e7452057b10d14de94dc7d93e931c53747814de292d1a7235b7ab1c9e3e9d61e0e11da202c30a4805dd374d97d37396351fa9cb0f55e12",
    );
    assert_eq!(hash64(&[b"abc"]), expected);
}
