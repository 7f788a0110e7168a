// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! The Montgomery-style 251-iteration differential ladder.
//!
//! Two conditional-swap strategies share the same loop body: the
//! default build uses a constant-time, bitwise-masked swap
//! ([`subtle::ConditionallySelectable`]) so secret scalars never drive
//! a data-dependent branch; the `verifier-only` build swaps with a
//! plain `mem::swap`, which is fine because the verifier only ever
//! ladders over public data.

use subtle::Choice;

use crate::backend::serial::u32::constants;
use crate::backend::serial::u32::field::FieldElement;
use crate::kummer::{self, x_dbl_add, KummerPoint, WrappedPoint};

#[cfg(not(feature = "verifier-only"))]
fn conditional_swap_points(a: &mut KummerPoint, b: &mut KummerPoint, bit: u8) {
    use subtle::ConditionallySelectable;
    KummerPoint::conditional_swap(a, b, Choice::from(bit));
}

#[cfg(feature = "verifier-only")]
fn conditional_swap_points(a: &mut KummerPoint, b: &mut KummerPoint, bit: u8) {
    if bit == 1 {
        core::mem::swap(a, b);
    }
}

/// `n` is read least-significant-bit first, bit `i` at
/// `n[i >> 3]` bit `(i & 7)`; only bits `0..=250` are consulted (251
/// bits total, matching the ladder's scalar window).
fn bit_at(n: &[u8; 32], i: usize) -> u8 {
    (n[i >> 3] >> (i & 7)) & 1
}

/// One full 251-iteration ladder pass. `q` is the base point
/// (uncompressed) and `d` its wrapped form (the fixed difference).
/// Returns `(P, Q)` with `P = [n]Q_base` and `Q = [n+1]Q_base` up to
/// the design's sign convention.
pub fn ladder_250(q: &KummerPoint, d: &WrappedPoint, n: &[u8; 32]) -> (KummerPoint, KummerPoint) {
    let mut p = KummerPoint::neutral();
    let mut qv = *q;
    let mut prevbit: u8 = 0;

    for i in (0..=250usize).rev() {
        let bit = bit_at(n, i);
        let swap = bit ^ prevbit;
        prevbit = bit;

        qv.x = qv.x.negate();
        conditional_swap_points(&mut p, &mut qv, swap);
        x_dbl_add(&mut p, &mut qv, d);
    }

    p.x = p.x.negate();
    if prevbit == 1 {
        conditional_swap_points(&mut p, &mut qv, 1);
    }

    (p, qv)
}

/// `ladder_250` with `Q` fixed to the hard-coded generator.
pub fn ladder_base_250(n: &[u8; 32]) -> (KummerPoint, KummerPoint) {
    let d = WrappedPoint {
        y: FieldElement::from_limbs(constants::BASE_Y),
        z: FieldElement::from_limbs(constants::BASE_Z),
        t: FieldElement::from_limbs(constants::BASE_T),
    };
    let q = kummer::x_unwrap(&d);
    ladder_250(&q, &d, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_by_zero_is_neutral() {
        let n = [0u8; 32];
        let (p, _q) = ladder_base_250(&n);
        let w = kummer::x_wrap(&p);
        let neutral_w = kummer::x_wrap(&KummerPoint::neutral());
        assert_eq!(w.y.freeze().0, neutral_w.y.freeze().0);
        assert_eq!(w.z.freeze().0, neutral_w.z.freeze().0);
        assert_eq!(w.t.freeze().0, neutral_w.t.freeze().0);
    }

    #[test]
    fn ladder_runs_to_completion_for_arbitrary_scalar() {
        let mut n = [0u8; 32];
        n[0] = 0xAB;
        n[31] = 0x3F;
        let (_p, _q) = ladder_base_250(&n);
    }
}
