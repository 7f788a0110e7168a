// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! The glue layer: `qdsa_verify`, `qdsa_sign`, `qdsa_keypair`,
//! `qdsa_dh_keygen`, `qdsa_dh_exchange`.
//!
//! Fallible entry points return `Result<_, SignatureError>`; thin
//! `*_raw` shims re-expose a C-ABI-flavored `0`/`1` `int` contract for
//! embedding in the bootloader's own glue.

use crate::backend::serial::u32::scalar::Scalar;
use crate::compress::{self, CompressedPoint};
use crate::error::SignatureError;
use crate::kummer;
use crate::ladder;
use crate::sponge;
use crate::verify;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

#[cfg(feature = "rand_core")]
use rand_core::CryptoRngCore;

/// A generated key pair: a 32-byte compressed public key and a 64-byte
/// secret key (the finalized BobJr sponge state over the caller's
/// seed).
#[derive(Clone)]
pub struct Keypair {
    pub pk: [u8; 32],
    pub sk: [u8; 64],
}

#[cfg(feature = "zeroize")]
impl Drop for Keypair {
    fn drop(&mut self) {
        self.sk.zeroize();
    }
}

/// `verify(sig[64], pk[32], msg[32])`: `Ok(())` iff the signature is
/// valid.
pub fn verify(sig: &[u8; 64], pk: &[u8; 32], msg: &[u8; 32]) -> Result<(), SignatureError> {
    let pk_point = compress::decompress(pk).ok_or(SignatureError::BadPublicKey)?;

    let s_bytes: [u8; 32] = sig[32..64].try_into().unwrap();
    let s = Scalar::from_bytes_256(&s_bytes);

    let r_compressed: CompressedPoint = sig[0..32].try_into().unwrap();
    let hash = sponge::hash64(&[&r_compressed[..], &pk[..], &msg[..]]);
    let h = Scalar::from_bytes_512(&hash);

    let pxw = kummer::x_wrap(&pk_point);
    let (h_q, _) = ladder::ladder_250(&pk_point, &pxw, &h.to_bytes());
    let (s_p, _) = ladder::ladder_base_250(&s.to_bytes());

    if verify::check(&s_p, &h_q, &r_compressed) == 0 {
        Ok(())
    } else {
        Err(SignatureError::BadSignature)
    }
}

/// `keypair(seed[32])`: `sk` is the 64-byte finalized sponge state
/// over `seed`; `pk` is the compressed base-point multiple `[d']P`
/// where `d' = sk[32..64]` reduced mod `N`.
pub fn keypair(seed: &[u8; 32]) -> Keypair {
    let sk = sponge::hash64(&[&seed[..]]);
    let d_bytes: [u8; 32] = sk[32..64].try_into().unwrap();
    let d = Scalar::from_bytes_256(&d_bytes);
    let (p, _) = ladder::ladder_base_250(&d.to_bytes());
    let pk = compress::compress(&p);
    Keypair { pk, sk }
}

/// `sign(msg[32], pk[32], sk[64])`: nonce `r = H(sk[0..32] || msg)`
/// reduced mod `N`; `R = compress([r]P)`; `h = H(R || pk || msg)`
/// reduced mod `N`; `s = (r - h*d') mod N` where `d' = sk[32..64]`
/// reduced mod `N`; returns `R || s`.
pub fn sign(msg: &[u8; 32], pk: &[u8; 32], sk: &[u8; 64]) -> [u8; 64] {
    let sk_seed: [u8; 32] = sk[0..32].try_into().unwrap();
    let d_bytes: [u8; 32] = sk[32..64].try_into().unwrap();
    let d = Scalar::from_bytes_256(&d_bytes);

    let r_hash = sponge::hash64(&[&sk_seed[..], &msg[..]]);
    let r = Scalar::from_bytes_512(&r_hash);

    let (r_point, _) = ladder::ladder_base_250(&r.to_bytes());
    let r_compressed = compress::compress(&r_point);

    let h_hash = sponge::hash64(&[&r_compressed[..], &pk[..], &msg[..]]);
    let h = Scalar::from_bytes_512(&h_hash);

    let s = r.sub(&h.mul(&d));

    let mut sig = [0u8; 64];
    sig[0..32].copy_from_slice(&r_compressed);
    sig[32..64].copy_from_slice(&s.to_bytes());
    sig
}

/// `dh_keygen(sk[32])`: `pk = compress([sk]P)`, `sk` reduced mod `N`
/// directly (no hashing step, unlike `keypair`/`sign`'s derivation).
pub fn dh_keygen(sk: &[u8; 32]) -> [u8; 32] {
    let d = Scalar::from_bytes_256(sk);
    let (p, _) = ladder::ladder_base_250(&d.to_bytes());
    compress::compress(&p)
}

/// Draws a 32-byte seed from `rng` and calls [`keypair`]. Sugar over
/// the raw from-bytes constructor for callers that hold a CSPRNG
/// instead of a pre-generated seed.
#[cfg(feature = "rand_core")]
pub fn keypair_from_rng<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Keypair {
    let mut seed = [0u8; 32];
    rng.fill_bytes(&mut seed);
    keypair(&seed)
}

/// Draws a 32-byte secret from `rng` and calls [`dh_keygen`].
#[cfg(feature = "rand_core")]
pub fn dh_keygen_from_rng<R: CryptoRngCore + ?Sized>(rng: &mut R) -> ([u8; 32], [u8; 32]) {
    let mut sk = [0u8; 32];
    rng.fill_bytes(&mut sk);
    (dh_keygen(&sk), sk)
}

/// `dh_exchange(pk_remote[32], sk_local[32])`: decompress the remote
/// key, multiply by the local (reduced) secret, compress.
pub fn dh_exchange(pk_remote: &[u8; 32], sk_local: &[u8; 32]) -> Result<[u8; 32], SignatureError> {
    let remote_point = compress::decompress(pk_remote).ok_or(SignatureError::BadPublicKey)?;
    let remote_w = kummer::x_wrap(&remote_point);
    let d = Scalar::from_bytes_256(sk_local);
    let (shared, _) = ladder::ladder_250(&remote_point, &remote_w, &d.to_bytes());
    Ok(compress::compress(&shared))
}

/// A raw `int`-returning contract: `0` on success, nonzero on failure,
/// for embedding directly in the bootloader's C ABI glue.
pub fn verify_raw(sig: &[u8; 64], pk: &[u8; 32], msg: &[u8; 32]) -> i32 {
    match verify(sig, pk, msg) {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Raw-`int` form of [`dh_exchange`]: writes into `ss_out`, returns
/// `0` on success.
pub fn dh_exchange_raw(ss_out: &mut [u8; 32], pk_remote: &[u8; 32], sk_local: &[u8; 32]) -> i32 {
    match dh_exchange(pk_remote, sk_local) {
        Ok(ss) => {
            *ss_out = ss;
            0
        }
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_sign_verify() {
        let seed = [0u8; 32];
        let msg = [0u8; 32];
        let kp = keypair(&seed);
        let sig = sign(&msg, &kp.pk, &kp.sk);
        assert!(verify(&sig, &kp.pk, &msg).is_ok());
    }

    #[test]
    fn sequential_seed_sign_verify() {
        for i in 0u8..9 {
            let seed = [i; 32];
            let msg = [i.wrapping_add(128); 32];
            let kp = keypair(&seed);
            let sig = sign(&msg, &kp.pk, &kp.sk);
            assert!(verify(&sig, &kp.pk, &msg).is_ok(), "iteration {i} failed");
        }
    }

    #[test]
    fn tampered_signature_rejected() {
        let seed = [3u8; 32];
        let msg = [4u8; 32];
        let kp = keypair(&seed);
        let mut sig = sign(&msg, &kp.pk, &kp.sk);
        sig[0] ^= 0x01;
        assert!(verify(&sig, &kp.pk, &msg).is_err());
    }

    #[test]
    fn tampered_message_rejected() {
        let seed = [5u8; 32];
        let msg = [6u8; 32];
        let kp = keypair(&seed);
        let sig = sign(&msg, &kp.pk, &kp.sk);
        let mut bad_msg = msg;
        bad_msg[31] ^= 0x80;
        assert!(verify(&sig, &kp.pk, &bad_msg).is_err());
    }

    #[test]
    fn malformed_public_key_rejected() {
        let sig = [0u8; 64];
        let pk = [0xFFu8; 32];
        let msg = [0u8; 32];
        assert!(verify(&sig, &pk, &msg).is_err());
    }

    #[test]
    fn dh_agreement() {
        let seed_a = [1u8; 32];
        let seed_b = [2u8; 32];
        let pk_a = dh_keygen(&seed_a);
        let pk_b = dh_keygen(&seed_b);
        let ss_ab = dh_exchange(&pk_b, &seed_a).expect("dh_exchange a");
        let ss_ba = dh_exchange(&pk_a, &seed_b).expect("dh_exchange b");
        assert_eq!(ss_ab, ss_ba);
    }
}
