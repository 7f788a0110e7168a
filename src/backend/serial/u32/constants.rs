// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! Curve, field, and sponge constants for the Gaudry–Schost Kummer
//! surface over `F_p`, `p = 2^127 - 1`.
//!
//! Every table here is immutable compile-time data, matching the
//! upstream design note that these belong in read-only sections.

use super::field::FieldElement;

/// `ehat`, used by `xDBLADD`'s `mul4_const(Q, ehat)` / `mul4_const(P, ehat)` step.
pub const EHAT: [u32; 4] = [0x341, 0x9C3, 0x651, 0x231];

/// `muhat`, the constant-vector used by the `T`/`T_inv` transforms and
/// by `B_ii`.
pub const MUHAT: [u32; 4] = [0x0021, 0x000B, 0x0011, 0x0031];

/// `mu_1..mu_4`, the neutral-element coordinates used to seed the
/// ladder's accumulator `P`.
pub const MU: [u32; 4] = [0x0b, 0x16, 0x13, 0x03];

/// `q0..q7`, the coefficients of the `k2`/`k3`/`k4` polynomial forms
/// used by compression and decompression.
pub const Q: [u32; 8] = [
    0xDF7, 0x2599, 0x1211, 0x2FE3, 0x2C0B, 0x1D33, 0x1779, 0xABD7,
];

/// `khat_1..khat_4`. Kept as part of the documented constant-table set;
/// `T_inv` is derived algebraically from [`MUHAT`] rather than scaled by
/// this table directly (see [`INV_MUHAT_SCALED`]).
pub const KHAT: [u32; 4] = [0x3C1, 0x80, 0x239, 0x449];

/// `-(4*muhat_i)^-1 mod p`, the per-coordinate scale `T_inv` applies
/// after `hdmrd` and the coordinate reversal, derived so that `T_inv` is
/// the exact two-sided inverse of [`transform_t`](crate::kummer::transform_t):
/// `hdmrd` composed with itself satisfies `hdmrd(hdmrd(v)) = 4*reverse(v)`,
/// so undoing a `muhat`-scaled `hdmrd` takes one more `hdmrd`, a
/// coordinate reversal, and a scale by the inverse of `4*muhat`, negated
/// to absorb the sign `hdmrd`'s first-coordinate negation introduces.
pub const INV_MUHAT_SCALED: [FieldElement; 4] = [
    FieldElement::from_limbs([0x26c9b26c, 0xc9b26c9b, 0xb26c9b26, 0x4c9b26c9]),
    FieldElement::from_limbs([0x745d1745, 0x5d1745d1, 0x1745d174, 0x65d1745d]),
    FieldElement::from_limbs([0x3c3c3c3c, 0x3c3c3c3c, 0x3c3c3c3c, 0x1c3c3c3c]),
    FieldElement::from_limbs([0x72f05397, 0xc14e5e0a, 0x397829cb, 0x40a72f05]),
];

/// `k1..k4`, the per-coordinate constants folded into `B_ii`/`B_ij`.
pub const K: [u32; 4] = [0x1259, 0x173F, 0x1679, 0x07C7];

/// `e_cons`, the constant used in the final `mul4_const(P, e_cons)`
/// step of `xDBLADD`.
pub const E_CONS: [u32; 4] = [0x72, 0x39, 0x42, 0x1a2];

/// The curve constant `C` used in the quadratic relation
/// `B_jj R_i^2 - 2 C B_ij R_i R_j + B_ii R_j^2 = 0`.
pub const C_BYTES: [u8; 16] = [
    0x43, 0xA8, 0xDD, 0xCD, 0xD8, 0xE3, 0xF7, 0x46, 0xDD, 0xA2, 0x20, 0xA3, 0xEF, 0x0E, 0xF5, 0x40,
];

/// `C` as a field element, built lazily from [`C_BYTES`] since
/// `FieldElement::from_bytes` is not a `const fn`.
pub fn c() -> FieldElement {
    FieldElement::from_bytes(&C_BYTES)
}

/// The hard-coded wrapped base point's `Y` limbs.
pub const BASE_Y: [u32; 4] = [0x4e931a48, 0xaeb351a6, 0x2049c2e7, 0x1be0c3dc];
/// The hard-coded wrapped base point's `Z` limbs.
pub const BASE_Z: [u32; 4] = [0xe07e36df, 0x64659818, 0x8eaba630, 0x23b416cd];
/// The hard-coded wrapped base point's `T` limbs.
pub const BASE_T: [u32; 4] = [0x7215441e, 0xc7ae3d05, 0x4447a24d, 0x5db35c38];

/// Group order `N`, a 250-bit prime, little-endian 32-bit limbs (top
/// two bits of the top limb always zero). `N = 2^250 - 207`, confirmed
/// prime.
pub const N: [u32; 8] = [
    0xffffff31, 0xffffffff, 0xffffffff, 0xffffffff, 0xffffffff, 0xffffffff, 0xffffffff, 0x03ffffff,
];

/// The 14-bit constant `c` such that `2^256 ≡ c (mod N)`, derived from
/// `N = 2^250 - 207` (so `64*N = 2^256 - 13248`, i.e. `2^256 - 13248`
/// is a multiple of `N`). Used by `bigint::large_red`'s folding passes.
pub const FOLD_256: u32 = 13248;

/// The constant `c` such that `2^250 ≡ c (mod N)`, i.e. `207`,
/// directly from `N`'s definition.
pub const FOLD_250: u32 = 207;

/// Keccak-f\[800\] round constants for rounds 12..21 (the last ten of
/// the standard 22), in application order.
pub const KECCAK_RC: [u32; 10] = [
    0x8000808b, 0x0000008b, 0x00008089, 0x00008003, 0x00008002, 0x00000080, 0x0000800a,
    0x8000000a, 0x80008081, 0x00008080,
];

/// Keccak-f\[800\] round constants for the full 22 rounds, used when
/// the `keccak-full-rounds` feature is enabled.
pub const KECCAK_RC_FULL: [u32; 22] = [
    0x00000001, 0x00008082, 0x0000808a, 0x80008000, 0x0000808b, 0x80000001, 0x80008081,
    0x00008009, 0x0000008a, 0x00000088, 0x80008009, 0x8000000a, 0x8000808b, 0x0000008b,
    0x00008089, 0x00008003, 0x00008002, 0x00000080, 0x0000800a, 0x8000000a, 0x80008081,
    0x00008080,
];

/// Left-rotation amounts for the 24 non-trivial lanes, in the standard
/// Keccak-f lane traversal order.
pub const KECCAK_RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 4, 13, 23, 2, 14, 27, 9, 24, 8, 25, 11, 30, 18, 7, 29, 20, 12,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n_limbs_match_fold_constants() {
        // N = 2^250 - 207, so 2^250 mod N = 207 and 2^256 mod N = 64*207 mod N... no:
        // 2^256 = 64 * 2^250 = 64*(N + 207) = 64*N + 13248, so 2^256 mod N = 13248.
        assert_eq!(FOLD_250, 207);
        assert_eq!(FOLD_256, 64 * FOLD_250);
    }
}
