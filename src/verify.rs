// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! Biquadratic forms and the `check` routine.
//!
//! `B_ii[i]` folds the squared coordinates and their cross
//! dot-products through `k1..k4`/`muhat` with a `(+, -, -, +)` sign
//! pattern and first-entry negation; `B_ij(i, j)` is built from the
//! complementary index pair `(k, l) = {0,1,2,3} \ {i,j}` via a
//! product-of-differences shape.

use crate::backend::serial::u32::constants;
use crate::backend::serial::u32::field::{hdmrd, FieldElement};
use crate::compress::{self, CompressedPoint};
use crate::kummer::KummerPoint;

fn fe_const(v: u32) -> FieldElement {
    FieldElement::from_limbs([v, 0, 0, 0])
}

fn k_vector() -> [FieldElement; 4] {
    [
        fe_const(constants::K[0]),
        fe_const(constants::K[1]),
        fe_const(constants::K[2]),
        fe_const(constants::K[3]),
    ]
}

fn muhat_vector() -> [FieldElement; 4] {
    [
        fe_const(constants::MUHAT[0]),
        fe_const(constants::MUHAT[1]),
        fe_const(constants::MUHAT[2]),
        fe_const(constants::MUHAT[3]),
    ]
}

/// The `B_ii` 4-tuple, first entry negated by convention, built from
/// `squared(p)`, `squared(q)`, and their cross dot-products, scaled by
/// `k1..k4` (pattern `+, -, -, +`) and `muhat`.
fn b_ii_vector(p: &[FieldElement; 4], q: &[FieldElement; 4]) -> [FieldElement; 4] {
    let k = k_vector();
    let muhat = muhat_vector();

    let dot_pp = p[0].square().add(&p[1].square()).add(&p[2].square()).add(&p[3].square());
    let dot_qq = q[0].square().add(&q[1].square()).add(&q[2].square()).add(&q[3].square());

    let sign_negative = [false, true, true, false];
    let mut out = [FieldElement::ZERO; 4];
    for i in 0..4 {
        let cross = p[i].square().mul(&dot_qq).sub(&q[i].square().mul(&dot_pp));
        let mut v = k[i].mul(&muhat[i]).mul(&cross);
        if sign_negative[i] {
            v = v.negate();
        }
        out[i] = v;
    }
    out[0] = out[0].negate();
    out
}

/// The complementary pair of indices in `{0,1,2,3} \ {i, j}`.
fn complementary(i: usize, j: usize) -> (usize, usize) {
    let mut rest = [0usize, 1, 2, 3].into_iter().filter(|&x| x != i && x != j);
    (rest.next().unwrap(), rest.next().unwrap())
}

/// `B_ij` for one coordinate pair, following the documented
/// product-of-differences shape, scaled through the `k1..k4` constants
/// via the complementary pair `(k, l)`.
fn b_ij(p: &[FieldElement; 4], q: &[FieldElement; 4], c: &[FieldElement; 4], i: usize, j: usize) -> FieldElement {
    let (k, l) = complementary(i, j);

    let p_diff = p[i].mul(&p[j]).sub(&p[k].mul(&p[l]));
    let q_diff = q[i].mul(&q[j]).sub(&q[k].mul(&q[l]));
    let c_kl = c[k].mul(&c[l]);
    let c_ij = c[i].mul(&c[j]);

    let term1 = p_diff.mul(&q_diff).mul(&c_kl);
    let term2 = p[k].mul(&p[l]).mul(&q[k]).mul(&q[l]).mul(&c_kl.add(&c_ij));
    let mut v = term1.sub(&term2);
    v = v.mul(&c_ij);

    let cross_a = c[j].mul(&c[l]).add(&c[i].mul(&c[k]));
    let cross_b = c[j].mul(&c[k]).add(&c[i].mul(&c[l]));
    v.mul(&cross_a).mul(&cross_b)
}

/// `B_jj R_i^2 - 2 C B_ij R_i R_j + B_ii R_j^2`; returns `0` iff this
/// is the zero field element.
fn quad_relation(
    b_ii_i: &FieldElement,
    b_ii_j: &FieldElement,
    b_ij: &FieldElement,
    r: &[FieldElement; 4],
    i: usize,
    j: usize,
    c: &FieldElement,
) -> u32 {
    let cross = c.mul(b_ij).mul(&r[i]).mul(&r[j]).mul_small(2);
    let lhs = b_ii_j.mul(&r[i].square()).sub(&cross).add(&b_ii_i.mul(&r[j].square()));
    lhs.zeroness()
}

/// The six unordered `(i, j)` index pairs over `{0,1,2,3}`, with the
/// negation flag for `(1,2), (1,3), (2,3)`.
const PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
const NEGATE_PAIR: [bool; 6] = [false, false, false, true, true, true];

/// `check(sP, hQ, R_compressed)`: returns `0` iff `R = ±(sP ± hQ)`.
pub fn check(sp: &KummerPoint, hq: &KummerPoint, r_compressed: &CompressedPoint) -> u32 {
    let p = hdmrd(&sp.to_tuple());
    let q = hdmrd(&hq.to_tuple());
    let b_ii = b_ii_vector(&p, &q);

    let r_point = match compress::decompress(r_compressed) {
        Some(pt) => pt,
        None => return 1,
    };
    let r = hdmrd(&r_point.to_tuple());

    let c_vec = k_vector();
    let c_const = constants::c();

    let mut fail: u32 = 0;
    for (idx, &(i, j)) in PAIRS.iter().enumerate() {
        let mut bij = b_ij(&p, &q, &c_vec, i, j);
        if NEGATE_PAIR[idx] {
            bij = bij.negate();
        }
        fail |= quad_relation(&b_ii[i], &b_ii[j], &bij, &r, i, j, &c_const);
    }
    fail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::compress;

    #[test]
    fn check_accepts_trivial_equal_points() {
        // sP = hQ = R = the neutral point is a degenerate but
        // well-defined instance of R = sP + hQ (both summands the
        // identity); check must not panic and must return a u32.
        let neutral = KummerPoint::neutral();
        let r_bytes = compress(&neutral);
        let _ = check(&neutral, &neutral, &r_bytes);
    }
}
