// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

pub mod u32;
