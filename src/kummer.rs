// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! The Kummer-surface point representation and its arithmetic:
//! coordinate-wise helpers, differential add-double (`xDBLADD`),
//! wrap/unwrap, and the `T`/`T_inv` basis-change transforms used by
//! compression and decompression.
//!
//! Every Kummer algorithm here follows the sign convention that the
//! first coordinate of a non-wrapped point is handled negated by
//! [`hdmrd`]; call sites never decompose that fused primitive (see its
//! doc comment).

use subtle::{Choice, ConditionallySelectable};

use crate::backend::serial::u32::constants;
use crate::backend::serial::u32::field::{hdmrd, FieldElement};

/// An uncompressed Kummer point `(X, Y, Z, T)`, 64 bytes of field
/// elements, one of a class of projectively-equivalent
/// representatives.
#[derive(Copy, Clone, Debug, Default)]
pub struct KummerPoint {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
    pub t: FieldElement,
}

impl KummerPoint {
    pub fn from_tuple(v: [FieldElement; 4]) -> KummerPoint {
        KummerPoint {
            x: v[0],
            y: v[1],
            z: v[2],
            t: v[3],
        }
    }

    pub fn to_tuple(self) -> [FieldElement; 4] {
        [self.x, self.y, self.z, self.t]
    }

    /// The neutral element, `(mu_1, mu_2, mu_3, mu_4)`.
    pub fn neutral() -> KummerPoint {
        KummerPoint::from_tuple([
            FieldElement::from_limbs([constants::MU[0], 0, 0, 0]),
            FieldElement::from_limbs([constants::MU[1], 0, 0, 0]),
            FieldElement::from_limbs([constants::MU[2], 0, 0, 0]),
            FieldElement::from_limbs([constants::MU[3], 0, 0, 0]),
        ])
    }
}

impl ConditionallySelectable for KummerPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        KummerPoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t: FieldElement::conditional_select(&a.t, &b.t, choice),
        }
    }

    fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        FieldElement::conditional_swap(&mut a.x, &mut b.x, choice);
        FieldElement::conditional_swap(&mut a.y, &mut b.y, choice);
        FieldElement::conditional_swap(&mut a.z, &mut b.z, choice);
        FieldElement::conditional_swap(&mut a.t, &mut b.t, choice);
    }
}

/// A Kummer point with `(X, Y, Z)` replaced by the ratios
/// `(X/Y, X/Z, X/T)`, sharing one inversion. Used as the fixed
/// "difference" operand `D` in the ladder.
#[derive(Copy, Clone, Debug, Default)]
pub struct WrappedPoint {
    pub y: FieldElement,
    pub z: FieldElement,
    pub t: FieldElement,
}

/// Coordinate-wise product of two 4-vectors.
pub fn mul4(a: [FieldElement; 4], b: [FieldElement; 4]) -> [FieldElement; 4] {
    [
        a[0].mul(&b[0]),
        a[1].mul(&b[1]),
        a[2].mul(&b[2]),
        a[3].mul(&b[3]),
    ]
}

/// Coordinate-wise square of a 4-vector.
pub fn sqr4(a: [FieldElement; 4]) -> [FieldElement; 4] {
    [a[0].square(), a[1].square(), a[2].square(), a[3].square()]
}

/// Coordinate-wise multiply by a constant 4-vector whose entries fit
/// in 16 bits (`ehat`, `e_cons`, `muhat`, `khat`).
pub fn mul4_const(a: [FieldElement; 4], c: [u32; 4]) -> [FieldElement; 4] {
    [
        a[0].mul_small(c[0] as u16),
        a[1].mul_small(c[1] as u16),
        a[2].mul_small(c[2] as u16),
        a[3].mul_small(c[3] as u16),
    ]
}

/// One step of differential add-double. `d` is the wrapped difference
/// of `p` and `q`. On return `p` holds `2P` and `q` holds `P + Q` (up
/// to the sign/projective conventions the rest of the design relies
/// on).
pub fn x_dbl_add(p: &mut KummerPoint, q: &mut KummerPoint, d: &WrappedPoint) {
    let e_cons = constants::E_CONS;

    let mut pv = hdmrd(&p.to_tuple());
    let mut qv = hdmrd(&q.to_tuple());

    qv = mul4(qv, pv);
    pv = sqr4(pv);

    qv = mul4_const(qv, constants::EHAT);
    pv = mul4_const(pv, constants::EHAT);

    qv = hdmrd(&qv);
    pv = hdmrd(&pv);

    qv = sqr4(qv);
    pv = sqr4(pv);

    qv[1] = qv[1].mul(&d.y);
    qv[2] = qv[2].mul(&d.z);
    qv[3] = qv[3].mul(&d.t);

    pv = mul4_const(pv, e_cons);

    *p = KummerPoint::from_tuple(pv);
    *q = KummerPoint::from_tuple(qv);
}

/// Replace `(X, Y, Z)` with `(X/Y, X/Z, X/T)` using one shared
/// inversion: `inv_d = inv(Y*Z*T)`, then each ratio is `X` times the
/// product of the other two denominators times `inv_d`.
pub fn x_wrap(p: &KummerPoint) -> WrappedPoint {
    let yz = p.y.mul(&p.z);
    let yt = p.y.mul(&p.t);
    let zt = p.z.mul(&p.t);
    let d = yz.mul(&p.t);
    let inv_d = d.inv();

    WrappedPoint {
        y: p.x.mul(&zt).mul(&inv_d),
        z: p.x.mul(&yt).mul(&inv_d),
        t: p.x.mul(&yz).mul(&inv_d),
    }
}

/// Reconstruct a projective point whose wrapped form equals `pw`,
/// without any inversion: pick `X = y*z*t` so that `Y = z*t`,
/// `Z = y*t`, `T = y*z` recovers exactly the ratios `X/Y = y`, etc.
pub fn x_unwrap(pw: &WrappedPoint) -> KummerPoint {
    let y = pw.y;
    let z = pw.z;
    let t = pw.t;
    KummerPoint {
        x: y.mul(&z).mul(&t),
        y: z.mul(&t),
        z: y.mul(&t),
        t: y.mul(&z),
    }
}

/// The `T` basis-change transform used by compression: scale by
/// `muhat` then apply the fused Hadamard primitive.
pub fn transform_t(v: [FieldElement; 4]) -> [FieldElement; 4] {
    hdmrd(&mul4_const(v, constants::MUHAT))
}

/// The exact two-sided inverse of [`transform_t`], used by
/// decompression: apply `hdmrd` again, reverse the four coordinates,
/// then scale by [`constants::INV_MUHAT_SCALED`].
///
/// `hdmrd` applied twice returns `4 * reverse(v)` (squaring the fused
/// Hadamard matrix folds the input's first-coordinate negation and the
/// output's fourth-coordinate negation into a plain reversal scaled by
/// 4), so undoing `hdmrd(mul4_const(v, muhat))` takes another `hdmrd`,
/// a reversal, and a scale by `-(4*muhat)^-1` per coordinate.
pub fn transform_t_inv(v: [FieldElement; 4]) -> [FieldElement; 4] {
    let h = hdmrd(&v);
    let reversed = [h[3], h[2], h[1], h[0]];
    [
        reversed[0].mul(&constants::INV_MUHAT_SCALED[0]),
        reversed[1].mul(&constants::INV_MUHAT_SCALED[1]),
        reversed[2].mul(&constants::INV_MUHAT_SCALED[2]),
        reversed[3].mul(&constants::INV_MUHAT_SCALED[3]),
    ]
}
