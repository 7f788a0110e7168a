// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! Arithmetic in the base field `F_p`, `p = 2^127 - 1`.
//!
//! Elements are held as four 32-bit limbs in little-endian limb order
//! (128 bits of storage for a 127-bit value). Addition and subtraction
//! are lazy: the result may exceed `p` but stays small enough that a
//! bounded number of further lazy ops remain safe before a caller must
//! call [`FieldElement::freeze`].

use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use super::bigint;

/// Number of 32-bit limbs in a field element.
pub const FIELD_LIMBS: usize = 4;

/// An element of `F_p`, `p = 2^127 - 1`, stored as four little-endian
/// 32-bit limbs.
///
/// The representation is not required to be canonical except where a
/// method's documentation says so. [`FieldElement::freeze`] produces the
/// unique canonical representative in `[0, p)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct FieldElement(pub [u32; FIELD_LIMBS]);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: FieldElement = FieldElement([0, 0, 0, 0]);
    /// The multiplicative identity.
    pub const ONE: FieldElement = FieldElement([1, 0, 0, 0]);

    /// Build a field element from raw limbs, taken as-is (not reduced).
    pub const fn from_limbs(limbs: [u32; FIELD_LIMBS]) -> FieldElement {
        FieldElement(limbs)
    }

    /// Build a field element from a 16-byte little-endian buffer.
    pub fn from_bytes(bytes: &[u8; 16]) -> FieldElement {
        let mut limbs = [0u32; FIELD_LIMBS];
        for i in 0..FIELD_LIMBS {
            limbs[i] = u32::from_le_bytes(bytes[4 * i..4 * i + 4].try_into().unwrap());
        }
        FieldElement(limbs)
    }

    /// Serialize to a 16-byte little-endian buffer. Does **not** freeze
    /// first; callers that need a canonical encoding must freeze.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        for i in 0..FIELD_LIMBS {
            out[4 * i..4 * i + 4].copy_from_slice(&self.0[i].to_le_bytes());
        }
        out
    }

    /// Pack the limbs into a `u128` for reduction bookkeeping. Internal
    /// only: the public contract is limb-wise, matching a 32-bit target.
    fn to_u128(&self) -> u128 {
        (self.0[0] as u128)
            | ((self.0[1] as u128) << 32)
            | ((self.0[2] as u128) << 64)
            | ((self.0[3] as u128) << 96)
    }

    fn from_u128(v: u128) -> FieldElement {
        FieldElement([
            v as u32,
            (v >> 32) as u32,
            (v >> 64) as u32,
            (v >> 96) as u32,
        ])
    }

    /// Fold a `u128` overflow carry (weight `2^128 ≡ 2 (mod p)`) back
    /// into the container. The carry is tiny (0, 1, or 2 on entry) so
    /// this converges in at most a couple of iterations.
    fn fold_overflow(mut v: u128, carry: bool) -> u128 {
        let mut pending: u128 = if carry { 2 } else { 0 };
        while pending != 0 {
            let (sum, of) = v.overflowing_add(pending);
            v = sum;
            pending = if of { 2 } else { 0 };
        }
        v
    }

    /// `r = x + y` in `F_p`. Lazy in the sense that the result may equal
    /// `p` exactly (non-canonical) but never exceeds `2p - 1`; callers
    /// needing canonical form call [`FieldElement::freeze`].
    #[inline]
    pub fn add(&self, other: &FieldElement) -> FieldElement {
        let (sum, carry) = self.to_u128().overflowing_add(other.to_u128());
        FieldElement::from_u128(Self::fold_overflow(sum, carry))
    }

    /// `r = x - y` in `F_p`, computed by biasing with `p` before
    /// subtracting so the result is always non-negative. Both operands
    /// are frozen first so the bias cannot be exceeded.
    #[inline]
    pub fn sub(&self, other: &FieldElement) -> FieldElement {
        const P: u128 = (1u128 << 127) - 1;
        let a = self.freeze().to_u128();
        let b = other.freeze().to_u128();
        // a < p, b < p, so a + p - b is in [1, 2p-1], well within u128.
        let diff = a + P - b;
        FieldElement::from_u128(diff)
    }

    /// `x <- -x mod p`.
    pub fn negate(&self) -> FieldElement {
        FieldElement::ZERO.sub(self)
    }

    /// Fast multiply by a constant that fits in 16 bits, via
    /// double-and-add over the constant's 16 bits. A 128-by-16-bit
    /// product can exceed what fits in a single machine word pair, so
    /// this builds the result from the already-reduction-safe `add`
    /// rather than attempting one wide schoolbook multiply.
    pub fn mul_small(&self, c: u16) -> FieldElement {
        let mut result = FieldElement::ZERO;
        let mut base = *self;
        let mut c = c;
        while c != 0 {
            if c & 1 != 0 {
                result = result.add(&base);
            }
            base = base.add(&base);
            c >>= 1;
        }
        result
    }

    /// `r = x * y` via a 256-bit schoolbook product followed by
    /// pseudo-Mersenne reduction.
    pub fn mul(&self, other: &FieldElement) -> FieldElement {
        let wide = bigint::bigint_mul(&self.0, &other.0);
        FieldElement(bigint::bigint_red(&wide))
    }

    /// `r = x^2`.
    pub fn square(&self) -> FieldElement {
        let wide = bigint::bigint_sqr(&self.0);
        FieldElement(bigint::bigint_red(&wide))
    }

    /// Canonicalize into `[0, p)`.
    pub fn freeze(&self) -> FieldElement {
        // self.0 fits in 128 bits, i.e. < 2^128 < 4p, so a handful of
        // conditional subtractions of p always reaches the canonical
        // representative.
        const P: u128 = (1u128 << 127) - 1;
        let mut v = self.to_u128();
        while v >= P {
            v -= P;
        }
        FieldElement::from_u128(v)
    }

    /// Returns `0` if `self == 0 (mod p)`, `1` otherwise.
    pub fn zeroness(&self) -> u32 {
        let f = self.freeze();
        (f.to_u128() != 0) as u32
    }

    /// `x^(p-2) = x^(2^127 - 3)`, by a fixed addition chain.
    pub fn inv(&self) -> FieldElement {
        // p - 2 = 2^127 - 3. We build it from the (p-3)/4 chain: note
        // 2^127 - 3 = 4*((p-3)/4) + 1, so x^(p-2) = (x^((p-3)/4))^4 * x.
        let q = self.pow_minus_half_internal();
        let q4 = q.square().square();
        q4.mul(self)
    }

    /// `x^((p-3)/4) = x^(2^125 - 1)`, by a fixed addition chain.
    pub fn pow_minus_half(&self) -> FieldElement {
        self.pow_minus_half_internal()
    }

    fn pow_minus_half_internal(&self) -> FieldElement {
        // e(k) := x^(2^k - 1). The combine rule e(a+b) = e(a)^(2^b) * e(b)
        // lets every new e(k) be built from two already-computed values
        // with one multiply and (b) squarings. (p-3)/4 = 2^125 - 1 = e(125)
        // for our p = 2^127 - 1.
        fn combine(ea: FieldElement, b_exp: u32, eb: &FieldElement) -> FieldElement {
            let mut t = ea;
            for _ in 0..b_exp {
                t = t.square();
            }
            t.mul(eb)
        }

        let e1 = *self;
        let e2 = combine(e1, 1, &e1); // x^2; x^3 = x^2*x
        let e4 = combine(e2, 2, &e2); // x^6, x^12; x^15 = x^12*x^3
        let e5 = combine(e4, 1, &e1);
        let e10 = combine(e5, 5, &e5);
        let e20 = combine(e10, 10, &e10);
        let e40 = combine(e20, 20, &e20);
        let e80 = combine(e40, 40, &e40);
        let e120 = combine(e80, 40, &e40);
        let e124 = combine(e120, 4, &e4);
        combine(e124, 1, &e1) // e125 = x^(2^125 - 1)
    }

    /// If `delta` is a square in `F_p`, sets `r` to a square root whose
    /// low bit equals `sigma` and returns `true`. Otherwise returns
    /// `false` and the value of `r` is unspecified.
    ///
    /// Precondition (not checked here): `delta != 0`. Callers must only
    /// invoke this once they have independently established `delta`
    /// cannot be the degenerate zero case (see decompression branches).
    pub fn has_sqrt(delta: &FieldElement, sigma: u8) -> (FieldElement, bool) {
        let t = delta.pow_minus_half();
        let mut r = t.mul(delta);
        let check = r.square();
        let ok = fe_eq(&check.freeze(), &delta.freeze());
        r = r.freeze();
        let low = r.0[0] & 1;
        if (low as u8) != (sigma & 1) {
            r = r.negate().freeze();
        }
        (r, ok)
    }
}

fn fe_eq(a: &FieldElement, b: &FieldElement) -> bool {
    a.0 == b.0
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        let a = self.freeze();
        let b = other.freeze();
        a.0.ct_eq(&b.0)
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u32; FIELD_LIMBS];
        for i in 0..FIELD_LIMBS {
            out[i] = u32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement(out)
    }

    fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        for i in 0..FIELD_LIMBS {
            u32::conditional_swap(&mut a.0[i], &mut b.0[i], choice);
        }
    }
}

impl Add for FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: FieldElement) -> FieldElement {
        FieldElement::add(&self, &rhs)
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: FieldElement) -> FieldElement {
        FieldElement::sub(&self, &rhs)
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: FieldElement) -> FieldElement {
        FieldElement::mul(&self, &rhs)
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        FieldElement::negate(&self)
    }
}

/// The Hadamard-row primitive: treat four consecutive field elements as
/// a 4-vector, first negate `x0`, take the Hadamard transform, then
/// negate the result's fourth entry. This fused sequence is the
/// bit-exact contract the rest of the design (xDBLADD, the biquadratic
/// forms) relies on; do not decompose it at call sites.
pub fn hdmrd(x: &[FieldElement; 4]) -> [FieldElement; 4] {
    let x0 = x[0].negate();
    let x1 = x[1];
    let x2 = x[2];
    let x3 = x[3];
    let r0 = x0.add(&x1).add(&x2).add(&x3);
    let r1 = x0.add(&x1).sub(&x2).sub(&x3);
    let r2 = x0.sub(&x1).add(&x2).sub(&x3);
    let r3 = x0.sub(&x1).sub(&x2).add(&x3).negate();
    [r0, r1, r2, r3]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(v: u32) -> FieldElement {
        FieldElement([v, 0, 0, 0])
    }

    #[test]
    fn add_sub_roundtrip() {
        let a = small(12345);
        let b = small(6789);
        let s = a.add(&b);
        let back = s.sub(&b).freeze();
        assert_eq!(back.0, a.freeze().0);
    }

    #[test]
    fn mul_one_is_identity() {
        let a = small(987654321);
        let prod = a.mul(&FieldElement::ONE).freeze();
        assert_eq!(prod.0, a.freeze().0);
    }

    #[test]
    fn square_matches_mul() {
        let a = small(424242);
        assert_eq!(a.square().freeze().0, a.mul(&a).freeze().0);
    }

    #[test]
    fn freeze_is_idempotent() {
        let a = small(u32::MAX);
        let once = a.freeze();
        let twice = once.freeze();
        assert_eq!(once.0, twice.0);
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(FieldElement::ZERO.zeroness(), 0);
        assert_eq!(small(1).zeroness(), 1);
    }

    #[test]
    fn negate_then_add_is_zero() {
        let a = small(424242);
        let sum = a.add(&a.negate()).freeze();
        assert_eq!(sum.zeroness(), 0);
    }

    #[test]
    fn mul_small_matches_repeated_add() {
        let a = small(1000);
        let by_mul_small = a.mul_small(7).freeze();
        let mut by_add = FieldElement::ZERO;
        for _ in 0..7 {
            by_add = by_add.add(&a);
        }
        assert_eq!(by_mul_small.0, by_add.freeze().0);
    }

    #[test]
    fn hdmrd_is_involutive_up_to_scale() {
        // Applying the underlying (unsigned) Hadamard transform twice
        // scales every coordinate by 4; check that structurally via the
        // fused primitive composed with its own inverse pattern would be
        // overkill here, so we just sanity check it doesn't panic and
        // produces the documented additive combination for simple inputs.
        let v = [small(1), small(2), small(3), small(4)];
        let r = hdmrd(&v);
        // r0 = -x0+x1+x2+x3 = -1+2+3+4 = 8
        assert_eq!(r[0].freeze().0[0], 8);
    }
}
