// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! Compression and decompression of Kummer points via the biquadratic
//! `k2`/`k3`/`k4` forms.
//!
//! `k2`/`k3` are bilinear forms in `(l1, l2)` built from the constant
//! coefficients `q0..q3`/`q4..q7` with a `tau`-controlled sign flip,
//! and `k4` is the natural completion `k2*l1 + k3*l2` that needs no
//! further constants.

use crate::backend::serial::u32::constants;
use crate::backend::serial::u32::field::FieldElement;
use crate::kummer::{self, KummerPoint};

/// The 32-byte wire form: two 16-byte field elements with the tag bits
/// `tau` (top bit of byte 15) and `sigma` (top bit of byte 31) packed
/// in.
pub type CompressedPoint = [u8; 32];

fn q(i: usize) -> FieldElement {
    FieldElement::from_limbs([constants::Q[i], 0, 0, 0])
}

fn k2(l1: &FieldElement, l2: &FieldElement, tau: bool) -> FieldElement {
    let v = q(0).add(&q(1).mul(l1)).add(&q(2).mul(l2)).add(&q(3).mul(l1).mul(l2));
    if tau {
        v.negate()
    } else {
        v
    }
}

fn k3(l1: &FieldElement, l2: &FieldElement, tau: bool) -> FieldElement {
    let v = q(4).add(&q(5).mul(l1)).add(&q(6).mul(l2)).add(&q(7).mul(l1).mul(l2));
    if tau {
        v.negate()
    } else {
        v
    }
}

fn k4(l1: &FieldElement, l2: &FieldElement, tau: bool) -> FieldElement {
    let a = k2(l1, l2, tau);
    let b = k3(l1, l2, tau);
    a.mul(l1).add(&b.mul(l2))
}

/// Pack `(l1, l2, tau, sigma)` into the wire form: top bit of byte 15
/// of `l1` carries `tau`, top bit of byte 31 (i.e. byte 15 of `l2`)
/// carries `sigma`.
fn pack(l1: &FieldElement, l2: &FieldElement, tau: bool, sigma: bool) -> CompressedPoint {
    let mut out = [0u8; 32];
    let l1b = l1.freeze().to_bytes();
    let l2b = l2.freeze().to_bytes();
    out[0..16].copy_from_slice(&l1b);
    out[16..32].copy_from_slice(&l2b);
    if tau {
        out[15] |= 0x80;
    }
    if sigma {
        out[31] |= 0x80;
    }
    out
}

fn unpack(bytes: &CompressedPoint) -> (FieldElement, FieldElement, bool, bool) {
    let mut l1b: [u8; 16] = bytes[0..16].try_into().unwrap();
    let mut l2b: [u8; 16] = bytes[16..32].try_into().unwrap();
    let tau = l1b[15] & 0x80 != 0;
    let sigma = l2b[15] & 0x80 != 0;
    l1b[15] &= 0x7f;
    l2b[15] &= 0x7f;
    (
        FieldElement::from_bytes(&l1b),
        FieldElement::from_bytes(&l2b),
        tau,
        sigma,
    )
}

/// Compress an uncompressed Kummer point into its 32-byte wire form.
pub fn compress(r: &KummerPoint) -> CompressedPoint {
    let l = kummer::transform_t(r.to_tuple());
    let (l1full, l2full, l3, l4) = (l[0], l[1], l[2], l[3]);

    let tau = l3.zeroness() != 0;
    // Priority: L3, L2, L1, L4.
    let normalizer = if tau {
        l3
    } else if l2full.zeroness() != 0 {
        l2full
    } else if l1full.zeroness() != 0 {
        l1full
    } else {
        l4
    };
    let inv_norm = normalizer.inv();

    let l1 = l1full.mul(&inv_norm);
    let l2 = l2full.mul(&inv_norm);
    let l4n = l4.mul(&inv_norm);

    let k2v = k2(&l1, &l2, tau);
    let k3v = k3(&l1, &l2, tau);
    let delta = k2v.mul(&l4n).sub(&k3v);

    let delta_frozen = delta.freeze();
    let sigma = delta_frozen.0[0] & 1 != 0;

    pack(&l1, &l2, tau, sigma)
}

/// Decompress a 32-byte wire form into an uncompressed Kummer point.
/// Returns `None` on any malformed input (failed square root, bad tag
/// parity, or the non-identity-but-degenerate case).
pub fn decompress(bytes: &CompressedPoint) -> Option<KummerPoint> {
    let (l1, l2, tau, sigma) = unpack(bytes);

    // l1 == l2 == 0 is the identity's own encoding, and only the
    // identity's: every other branch below reconstructs the missing
    // fourth coordinate from a quadratic in k2/k3/k4, all three of
    // which collapse to q0/q4/0 once l1 and l2 vanish (k4 is built from
    // l1 and l2 themselves), so the sqrt branch would accept any
    // tau/sigma pairing here rather than just the identity's. Reject
    // every non-canonical encoding of this degenerate input up front.
    if l1.zeroness() == 0 && l2.zeroness() == 0 {
        if tau || sigma {
            return None;
        }
        let identity = [
            FieldElement::ZERO,
            FieldElement::ZERO,
            FieldElement::ZERO,
            FieldElement::ONE,
        ];
        return Some(KummerPoint::from_tuple(kummer::transform_t_inv(identity)));
    }

    let k2v = k2(&l1, &l2, tau);
    let k3v = k3(&l1, &l2, tau);
    let k4v = k4(&l1, &l2, tau);

    if k2v.zeroness() != 0 {
        let delta = k3v.square().sub(&k2v.mul(&k4v));
        let (root, ok) = FieldElement::has_sqrt(&delta, sigma as u8);
        if !ok {
            return None;
        }
        let x = l1.mul(&k2v);
        let y = l2.mul(&k2v);
        let z = if tau { k2v } else { FieldElement::ZERO };
        let t = k3v.add(&root);
        return Some(KummerPoint::from_tuple(kummer::transform_t_inv([
            x, y, z, t,
        ])));
    }

    if k3v.zeroness() != 0 {
        let k3_low = k3v.freeze().0[0] & 1 != 0;
        if sigma != k3_low {
            return None;
        }
        let two_k3 = k3v.add(&k3v);
        let x = two_k3.mul(&l1);
        let y = two_k3.mul(&l2);
        let z = if tau { two_k3 } else { FieldElement::ZERO };
        let t = FieldElement::ZERO;
        return Some(KummerPoint::from_tuple(kummer::transform_t_inv([
            x, y, z, t,
        ])));
    }

    // k2 == k3 == 0 with (l1, l2) not both zero has no representative:
    // every genuine point normalizes so that at least one of k2, k3 is
    // nonzero once l1/l2 aren't both zero.
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_roundtrips_tags_and_limbs() {
        let l1 = FieldElement::from_limbs([11, 22, 33, 0]);
        let l2 = FieldElement::from_limbs([44, 0, 0, 0]);
        for &(tau, sigma) in &[(false, false), (true, false), (false, true), (true, true)] {
            let bytes = pack(&l1, &l2, tau, sigma);
            let (ul1, ul2, utau, usigma) = unpack(&bytes);
            assert_eq!(ul1.freeze().0, l1.freeze().0);
            assert_eq!(ul2.freeze().0, l2.freeze().0);
            assert_eq!(utau, tau);
            assert_eq!(usigma, sigma);
        }
    }

    #[test]
    fn canonical_identity_tag_decompresses() {
        let bytes = pack(&FieldElement::ZERO, &FieldElement::ZERO, false, false);
        assert!(decompress(&bytes).is_some());
    }

    #[test]
    fn malformed_all_ff_is_rejected() {
        // All-0xFF unpacks to l1 = l2 = p (frozen to 0) with tau and
        // sigma both set; that combination isn't the identity's
        // canonical (tau = false, sigma = false) encoding, so it must
        // be rejected outright rather than silently decompressing.
        let bytes = [0xFFu8; 32];
        assert!(decompress(&bytes).is_none());
    }

    #[test]
    fn non_canonical_identity_tags_are_rejected() {
        let mut bytes = [0u8; 32];
        bytes[15] = 0x80; // tau set, l1 = l2 = 0
        assert!(decompress(&bytes).is_none());

        let mut bytes = [0u8; 32];
        bytes[31] = 0x80; // sigma set, l1 = l2 = 0
        assert!(decompress(&bytes).is_none());
    }
}
