// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! Low-level arithmetic backends. Only a 32-bit serial backend is
//! implemented; the field width (four 32-bit limbs) and target (a
//! firmware bootloader, not a 64-bit server) make a `u64` backend
//! unnecessary here.

pub mod serial;
