// -*- mode: rust; -*-
//
// This file is part of qdsa-gs254.
// See LICENSE for licensing information.

//! End-to-end scenarios for the public `verify`/`sign`/`keypair`/`dh_*`
//! surface.

use qdsa_gs254::{dh_exchange, dh_keygen, keypair, sign, verify};

#[test]
fn zero_seed_sign_verify() {
    let seed = [0u8; 32];
    let msg = [0u8; 32];
    let kp = keypair(&seed);
    let sig = sign(&msg, &kp.pk, &kp.sk);
    assert!(verify(&sig, &kp.pk, &msg).is_ok());
}

#[test]
fn sequential_seed_sign_verify() {
    for i in 0u8..9 {
        let seed = [i; 32];
        let msg = [i.wrapping_add(128); 32];
        let kp = keypair(&seed);
        let sig = sign(&msg, &kp.pk, &kp.sk);
        assert!(verify(&sig, &kp.pk, &msg).is_ok(), "iteration {i} failed");
    }
}

#[test]
fn tampered_signature_bit_rejected() {
    let seed = [7u8; 32];
    let msg = [9u8; 32];
    let kp = keypair(&seed);
    let mut sig = sign(&msg, &kp.pk, &kp.sk);
    assert!(verify(&sig, &kp.pk, &msg).is_ok());
    sig[0] ^= 0x01;
    assert!(verify(&sig, &kp.pk, &msg).is_err());
}

#[test]
fn tampered_message_bit_rejected() {
    let seed = [11u8; 32];
    let msg = [13u8; 32];
    let kp = keypair(&seed);
    let sig = sign(&msg, &kp.pk, &kp.sk);
    let mut bad_msg = msg;
    bad_msg[31] ^= 0x80;
    assert!(verify(&sig, &kp.pk, &bad_msg).is_err());
}

#[test]
fn malformed_public_key_rejected() {
    let sig = [0u8; 64];
    let pk = [0xFFu8; 32];
    let msg = [0u8; 32];
    assert!(verify(&sig, &pk, &msg).is_err());
}

#[test]
fn dh_agreement() {
    let seed_a = [1u8; 32];
    let seed_b = [2u8; 32];
    let pk_a = dh_keygen(&seed_a);
    let pk_b = dh_keygen(&seed_b);
    let ss_ab = dh_exchange(&pk_b, &seed_a).expect("dh_exchange a->b");
    let ss_ba = dh_exchange(&pk_a, &seed_b).expect("dh_exchange b->a");
    assert_eq!(ss_ab, ss_ba);
}

#[test]
fn sequential_seeds_produce_distinct_keys() {
    let pk0 = keypair(&[0u8; 32]).pk;
    let pk1 = keypair(&[1u8; 32]).pk;
    assert_ne!(pk0, pk1);
}
