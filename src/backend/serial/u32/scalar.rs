// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! Canonical scalars mod the group order `N = 2^250 - 207`.
//!
//! A [`Scalar`] always holds a reduced value in `[0, N)`, stored as
//! eight little-endian 32-bit limbs (the top two bits of the top limb
//! are always zero, since `N` is a 250-bit value).

use core::ops::{Add, Mul, Neg, Sub};

use subtle::ConstantTimeEq;
#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use super::bigint;
use super::constants;

/// A scalar mod `N`, always held in canonical form.
#[derive(Copy, Clone, Debug, Default)]
pub struct Scalar(pub [u32; 8]);

impl Scalar {
    pub const ZERO: Scalar = Scalar([0; 8]);

    /// Reduce a 256-bit little-endian value (the natural width of a
    /// signature's `s` field or a raw secret half) modulo `N`.
    pub fn from_bytes_256(bytes: &[u8; 32]) -> Scalar {
        let mut wide = [0u32; 16];
        for i in 0..8 {
            wide[i] = u32::from_le_bytes(bytes[4 * i..4 * i + 4].try_into().unwrap());
        }
        Scalar(bigint::large_red(&wide))
    }

    /// Reduce a 512-bit little-endian value (a finalized 64-byte hash
    /// state) modulo `N`.
    pub fn from_bytes_512(bytes: &[u8; 64]) -> Scalar {
        let mut wide = [0u32; 16];
        for i in 0..16 {
            wide[i] = u32::from_le_bytes(bytes[4 * i..4 * i + 4].try_into().unwrap());
        }
        Scalar(bigint::large_red(&wide))
    }

    /// Serialize the canonical 250-bit value as 32 little-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for i in 0..8 {
            out[4 * i..4 * i + 4].copy_from_slice(&self.0[i].to_le_bytes());
        }
        out
    }

    pub fn add(&self, other: &Scalar) -> Scalar {
        let mut wide = [0u32; 16];
        for i in 0..8 {
            wide[i] = self.0[i];
        }
        bigint::large_add(&mut wide, &other.0, 0);
        Scalar(bigint::large_red(&wide))
    }

    pub fn sub(&self, other: &Scalar) -> Scalar {
        self.add(&other.negate())
    }

    pub fn negate(&self) -> Scalar {
        Scalar(bigint::large_neg(&self.0))
    }

    pub fn mul(&self, other: &Scalar) -> Scalar {
        let wide = bigint::large_mul(&self.0, &other.0);
        Scalar(bigint::large_red(&wide))
    }

    /// `self * other + add` mod `N`, the shape `sign`'s `s = r - h*d'`
    /// equation needs (with `other` and `add` already negated as the
    /// caller requires).
    pub fn mul_add(&self, other: &Scalar, add: &Scalar) -> Scalar {
        self.mul(other).add(add)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Scalar {}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar::add(&self, &rhs)
    }
}

impl Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar::sub(&self, &rhs)
    }
}

impl Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar::mul(&self, &rhs)
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        Scalar::negate(&self)
    }
}

/// The group order, for callers (e.g. tests) that need to compare
/// against it directly.
pub fn group_order() -> [u32; 8] {
    constants::N
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_roundtrip() {
        let z = Scalar::from_bytes_256(&[0u8; 32]);
        assert_eq!(z.0, [0u32; 8]);
    }

    #[test]
    fn add_sub_roundtrip() {
        let a = Scalar::from_bytes_256(&{
            let mut b = [0u8; 32];
            b[0] = 7;
            b
        });
        let b = Scalar::from_bytes_256(&{
            let mut b = [0u8; 32];
            b[0] = 19;
            b
        });
        let sum = a.add(&b);
        let back = sum.sub(&b);
        assert_eq!(back.0, a.0);
    }

    #[test]
    fn negate_then_add_is_zero() {
        let a = Scalar::from_bytes_256(&{
            let mut b = [0u8; 32];
            b[3] = 0x11;
            b
        });
        let sum = a.add(&a.negate());
        assert_eq!(sum.0, [0u32; 8]);
    }

    #[test]
    fn mul_by_one_is_identity() {
        let one = Scalar::from_bytes_256(&{
            let mut b = [0u8; 32];
            b[0] = 1;
            b
        });
        let a = Scalar::from_bytes_256(&{
            let mut b = [0u8; 32];
            b[1] = 0xAB;
            b
        });
        assert_eq!(a.mul(&one).0, a.0);
    }

    #[test]
    fn from_bytes_256_of_max_is_reduced_below_n() {
        let a = Scalar::from_bytes_256(&[0xFFu8; 32]);
        // a.0 must be strictly less than N limb-wise (as a big integer).
        let n = group_order();
        let mut less = false;
        for i in (0..8).rev() {
            if a.0[i] < n[i] {
                less = true;
                break;
            } else if a.0[i] > n[i] {
                break;
            }
        }
        assert!(less);
    }
}
