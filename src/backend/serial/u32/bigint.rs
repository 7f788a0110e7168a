// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! Fixed-width big-integer primitives backing [`super::field`] (128-bit,
//! mod `p = 2^127 - 1`) and [`super::scalar`] (250-bit, mod the group
//! order `N`).
//!
//! Everything here is schoolbook: multiply by accumulating partial
//! products limb-by-limb with full carry propagation, then fold the
//! wide product back down using the modulus's pseudo-Mersenne shape.
//! No Karatsuba, no Montgomery form — the operands are small enough
//! (four or eight 32-bit limbs) that schoolbook is both simplest and
//! fast enough for a firmware signature verifier.

use subtle::{Choice, ConditionallySelectable};

use super::constants;

/// `r = x * y`, exact 128×128 → 256-bit product, little-endian limbs.
pub fn bigint_mul(x: &[u32; 4], y: &[u32; 4]) -> [u32; 8] {
    let mut out = [0u32; 8];
    for i in 0..4 {
        let mut carry: u64 = 0;
        for j in 0..4 {
            let idx = i + j;
            let t = (x[i] as u64) * (y[j] as u64) + out[idx] as u64 + carry;
            out[idx] = t as u32;
            carry = t >> 32;
        }
        let mut k = i + 4;
        while carry != 0 {
            let t = out[k] as u64 + carry;
            out[k] = t as u32;
            carry = t >> 32;
            k += 1;
        }
    }
    out
}

/// `r = x^2`, exact 128-bit squaring. Delegates to [`bigint_mul`]: the
/// usual cross-term-doubling trick saves multiplies but this path is
/// not the verifier's hot loop (`ladder::ladder_250`'s `sqr4` calls
/// are, and field squaring is a small fraction of each of those).
pub fn bigint_sqr(x: &[u32; 4]) -> [u32; 8] {
    bigint_mul(x, x)
}

/// Reduce a 256-bit integer modulo `p = 2^127 - 1` into a 128-bit
/// value. The pseudo-Mersenne shape gives `2^128 ≡ 2 (mod p)`, so
/// splitting `a` into two 128-bit halves `lo + hi*2^128` lets the
/// result be folded as `lo + 2*hi (mod p)`. The result is not
/// necessarily canonical (may be up to `2p - 1`); callers that need
/// `[0, p)` call [`super::field::FieldElement::freeze`].
pub fn bigint_red(a: &[u32; 8]) -> [u32; 4] {
    let lo = limbs4_to_u128(&[a[0], a[1], a[2], a[3]]);
    let hi = limbs4_to_u128(&[a[4], a[5], a[6], a[7]]);

    let carry_bit = hi >> 127; // weight 2^128 in the true value of 2*hi
    let hi_shifted = hi << 1; // low 128 bits of 2*hi
    let (sum, overflowed) = lo.overflowing_add(hi_shifted);

    let mut pending: u128 = carry_bit * 2 + if overflowed { 2 } else { 0 };
    let mut v = sum;
    while pending != 0 {
        let (s, of) = v.overflowing_add(pending);
        v = s;
        pending = if of { 2 } else { 0 };
    }
    u128_to_limbs4(v)
}

fn limbs4_to_u128(x: &[u32; 4]) -> u128 {
    (x[0] as u128) | ((x[1] as u128) << 32) | ((x[2] as u128) << 64) | ((x[3] as u128) << 96)
}

fn u128_to_limbs4(v: u128) -> [u32; 4] {
    [v as u32, (v >> 32) as u32, (v >> 64) as u32, (v >> 96) as u32]
}

/// `r = x * y`, exact 256×256 → 512-bit product, little-endian limbs.
pub fn large_mul(x: &[u32; 8], y: &[u32; 8]) -> [u32; 16] {
    let mut out = [0u32; 16];
    for i in 0..8 {
        let mut carry: u64 = 0;
        for j in 0..8 {
            let idx = i + j;
            let t = (x[i] as u64) * (y[j] as u64) + out[idx] as u64 + carry;
            out[idx] = t as u32;
            carry = t >> 32;
        }
        let mut k = i + 8;
        while carry != 0 {
            let t = out[k] as u64 + carry;
            out[k] = t as u32;
            carry = t >> 32;
            k += 1;
        }
    }
    out
}

/// `x[offset..] += y`, propagating carry through the rest of `x`.
pub fn large_add(x: &mut [u32], y: &[u32; 8], offset: usize) {
    let mut carry: u64 = 0;
    for j in 0..8 {
        let t = x[offset + j] as u64 + y[j] as u64 + carry;
        x[offset + j] = t as u32;
        carry = t >> 32;
    }
    let mut k = offset + 8;
    while carry != 0 {
        let t = x[k] as u64 + carry;
        x[k] = t as u32;
        carry = t >> 32;
        k += 1;
    }
}

/// `out[0..9] = x[0..8] * c`, a small-constant multiply used internally
/// by [`large_red`]'s folding passes. `c` fits in 16 bits, so the
/// product of an 8-limb (256-bit) value by `c` fits in 9 limbs.
fn large_mul_small(x: &[u32; 8], c: u32) -> [u32; 9] {
    let mut out = [0u32; 9];
    let mut carry: u64 = 0;
    for i in 0..8 {
        let t = (x[i] as u64) * (c as u64) + carry;
        out[i] = t as u32;
        carry = t >> 32;
    }
    out[8] = carry as u32;
    out
}

/// `a[0..9] += b[0..9]`, returning the carry out of the ninth limb
/// (always tiny in the caller's use, but kept honest).
fn add9(a: &mut [u32; 9], b: &[u32; 9]) -> u32 {
    let mut carry: u64 = 0;
    for i in 0..9 {
        let t = a[i] as u64 + b[i] as u64 + carry;
        a[i] = t as u32;
        carry = t >> 32;
    }
    carry as u32
}

/// `a - N`, computed unconditionally (wraps if `a < N`); returns the
/// difference and a borrow flag (`1` iff `a < N`, meaning the
/// difference is not meaningful and the caller should keep `a`).
fn sub_n8(a: &[u32; 8]) -> ([u32; 8], u32) {
    let n = constants::N;
    let mut out = [0u32; 8];
    let mut borrow: i64 = 0;
    for i in 0..8 {
        let d = a[i] as i64 - n[i] as i64 - borrow;
        if d < 0 {
            out[i] = (d + (1i64 << 32)) as u32;
            borrow = 1;
        } else {
            out[i] = d as u32;
            borrow = 0;
        }
    }
    (out, borrow as u32)
}

fn ct_select8(choice: Choice, a: &[u32; 8], b: &[u32; 8]) -> [u32; 8] {
    let mut out = [0u32; 8];
    for i in 0..8 {
        out[i] = u32::conditional_select(&a[i], &b[i], choice);
    }
    out
}

/// Reduce a 512-bit integer modulo the group order `N = 2^250 - 207`
/// to a canonical value in `[0, N)`, stored as eight 32-bit limbs.
///
/// Folds directly via the congruences `2^256 ≡ 13248 (mod N)` and
/// `2^250 ≡ 207 (mod N)` (`constants::FOLD_256`, `constants::FOLD_250`)
/// rather than a Barrett-style scaled-modulus reduction, since a direct
/// congruence fold needs no bit-alignment step and is easy to verify
/// by hand.
pub fn large_red(x: &[u32; 16]) -> [u32; 8] {
    let mut lo: [u32; 8] = x[0..8].try_into().unwrap();
    let mut hi: [u32; 8] = x[8..16].try_into().unwrap();

    // Five folding passes: each replaces (lo, hi) with a pair where hi
    // has shrunk by roughly 256 - 14 = 242 bits. 256 bits of starting
    // `hi` need at most two passes to collapse into a single carry
    // limb; five is a comfortable fixed margin, with a fixed,
    // data-independent trip count.
    for _ in 0..5 {
        let scaled = large_mul_small(&hi, constants::FOLD_256);
        let mut acc = [0u32; 9];
        for i in 0..8 {
            acc[i] = lo[i];
        }
        add9(&mut acc, &scaled);
        lo = [
            acc[0], acc[1], acc[2], acc[3], acc[4], acc[5], acc[6], acc[7],
        ];
        // Whatever spilled into acc[8] becomes the new (tiny) hi.
        hi = [acc[8], 0, 0, 0, 0, 0, 0, 0];
    }
    debug_assert_eq!(hi, [0u32; 8]);
    let mut v = lo;

    // v is now < 2^256 and within a small fixed multiple of N; bring
    // it under N with a fixed number of conditional subtractions
    // (data-independent iteration count, so this has no secret-
    // dependent timing even though `v` may derive from a secret
    // scalar).
    for _ in 0..68 {
        let (diff, borrow) = sub_n8(&v);
        // subtle's conditional_select(a, b, choice) returns `a` when
        // choice == 0 and `b` when choice == 1, so put the fallback
        // (`v`) first and the candidate (`diff`) second.
        let keep_diff = Choice::from((1 - borrow) as u8);
        v = ct_select8(keep_diff, &v, &diff);
    }
    v
}

/// `r = (N - x) mod N`, assuming `0 <= x < N`, always returned in
/// canonical form: `N - 0` is `N` itself, not `0`, so the one case that
/// needs a final conditional subtraction is `x == 0`.
pub fn large_neg(x: &[u32; 8]) -> [u32; 8] {
    let n = constants::N;
    let mut out = [0u32; 8];
    let mut borrow: i64 = 0;
    for i in 0..8 {
        let d = n[i] as i64 - x[i] as i64 - borrow;
        if d < 0 {
            out[i] = (d + (1i64 << 32)) as u32;
            borrow = 1;
        } else {
            out[i] = d as u32;
            borrow = 0;
        }
    }
    debug_assert_eq!(borrow, 0, "N - x underflowed: precondition x < N violated");

    let is_n = {
        let mut acc = 0u32;
        for i in 0..8 {
            acc |= out[i] ^ n[i];
        }
        acc
    };
    let x_was_zero = Choice::from((is_n == 0) as u8);
    ct_select8(x_was_zero, &out, &[0u32; 8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bigint_mul_one_is_identity() {
        let x = [0xdead_beefu32, 0x1234_5678, 0x0000_0001, 0x0000_0000];
        let one = [1u32, 0, 0, 0];
        let p = bigint_mul(&x, &one);
        assert_eq!(&p[0..4], &x[..]);
        assert_eq!(&p[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn bigint_sqr_matches_mul() {
        let x = [11u32, 22, 33, 44];
        assert_eq!(bigint_sqr(&x), bigint_mul(&x, &x));
    }

    #[test]
    fn bigint_red_small_value_is_fixed_point() {
        let a = [42u32, 0, 0, 0, 0, 0, 0, 0];
        let r = bigint_red(&a);
        assert_eq!(r, [42, 0, 0, 0]);
    }

    #[test]
    fn large_red_small_value_is_fixed_point() {
        let mut a = [0u32; 16];
        a[0] = 12345;
        let r = large_red(&a);
        assert_eq!(r, [12345, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn large_red_of_n_is_zero() {
        let mut a = [0u32; 16];
        a[..8].copy_from_slice(&constants::N);
        let r = large_red(&a);
        assert_eq!(r, [0u32; 8]);
    }

    #[test]
    fn large_neg_involution() {
        let x = [7u32, 0, 0, 0, 0, 0, 0, 0];
        let nx = large_neg(&x);
        let back = large_neg(&nx);
        assert_eq!(back, x);
    }

    #[test]
    fn large_neg_of_zero_is_canonical_zero() {
        let x = [0u32; 8];
        let nx = large_neg(&x);
        assert_eq!(nx, [0u32; 8]);
    }

    #[test]
    fn large_neg_of_nonzero_stays_below_n() {
        let x = [7u32, 0, 0, 0, 0, 0, 0, 0];
        let nx = large_neg(&x);
        let n = constants::N;
        let mut less = false;
        for i in (0..8).rev() {
            if nx[i] < n[i] {
                less = true;
                break;
            } else if nx[i] > n[i] {
                break;
            }
        }
        assert!(less);
    }
}
