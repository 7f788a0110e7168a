// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! 32-bit-limb field, big-integer, and scalar arithmetic, plus the
//! curve/sponge constant tables.

pub mod bigint;
pub mod constants;
pub mod field;
pub mod scalar;
