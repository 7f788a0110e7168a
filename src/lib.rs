// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! qDSA (Renes–Smith) on the Gaudry–Schost Kummer surface over
//! `F_p`, `p = 2^127 - 1`.
//!
//! A compact, fixed-size signature scheme meant for firmware
//! bootloader verification: a 32-byte message, a 32-byte public key,
//! and a 64-byte signature, built on genus-2 Kummer-surface
//! arithmetic. Key generation, signing, and Diffie–Hellman exchange
//! share the same primitives.
//!
//! This crate is `#![no_std]` and allocation-free; every buffer is a
//! fixed-size array on the caller's stack.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

pub mod backend;
pub mod compress;
pub mod error;
pub mod kummer;
pub mod ladder;
pub mod sponge;
pub mod verify;

mod api;

pub use api::{dh_exchange, dh_exchange_raw, dh_keygen, keypair, sign, verify, verify_raw, Keypair};
#[cfg(feature = "rand_core")]
pub use api::{dh_keygen_from_rng, keypair_from_rng};
pub use error::SignatureError;
