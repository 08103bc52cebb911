// -*- mode: rust; -*-
//
// This file is part of ed25519-quill.
// Copyright (c) 2017-2019 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

#![deny(missing_docs)]

//! # ed25519-quill
//!
//! A Rust implementation of ed25519 key generation, signing, and
//! verification, as specified in [RFC 8032], over the twisted Edwards
//! curve edwards25519.
//!
//! Everything below the three public operations lives in this crate:
//! the prime-field arithmetic mod \\( 2\^{255} - 19 \\), the
//! multi-precision scalar arithmetic mod the group order, the
//! extended-coordinate group law, and the precomputed-table scalar
//! multiplication.  SHA-512 and the random number generator are the
//! only outside collaborators.
//!
//! # Example
//!
//! Creating an ed25519 keypair and signing a message:
//!
//! ```
//! use ed25519_quill::{KeyPair, Signature};
//! use rand::rngs::OsRng;
//!
//! # fn main() -> Result<(), ed25519_quill::SignatureError> {
//! let mut csprng = OsRng;
//! let keypair: KeyPair = KeyPair::generate(&mut csprng)?;
//!
//! let message: &[u8] = b"This is a test of the tsunami alert system.";
//! let signature: Signature = keypair.sign(message);
//!
//! assert!(keypair.public_key().verify(message, &signature));
//! # Ok(())
//! # }
//! ```
//!
//! Anyone else, given the `public_key`, can verify the signature:
//!
//! ```
//! # use ed25519_quill::{KeyPair, PublicKey, Signature};
//! # use rand::rngs::OsRng;
//! # fn main() -> Result<(), ed25519_quill::SignatureError> {
//! # let mut csprng = OsRng;
//! # let keypair: KeyPair = KeyPair::generate(&mut csprng)?;
//! # let message: &[u8] = b"This is a test of the tsunami alert system.";
//! # let signature: Signature = keypair.sign(message);
//! let public_key: PublicKey = PublicKey::from_bytes(&keypair.public_key().to_bytes());
//! assert!(public_key.verify(message, &signature));
//! # Ok(())
//! # }
//! ```
//!
//! Verification is *cofactorless*, matching the original 2011
//! verification rule and RFC 8032 §5.1.7: the scalar half of a
//! signature must be canonical, and no subgroup check is made on the
//! public key.  Signing is deterministic; equal seed and message
//! produce bit-identical signatures on every machine and release.
//!
//! [RFC 8032]: https://tools.ietf.org/html/rfc8032

mod constants;
mod edwards;
mod errors;
mod field;
mod scalar;
mod signature;
mod signing;
mod verifying;
mod window;

pub use crate::constants::{PUBLIC_KEY_LENGTH, SEED_LENGTH, SIGNATURE_LENGTH};
pub use crate::errors::SignatureError;
pub use crate::signature::Signature;
pub use crate::signing::KeyPair;
pub use crate::verifying::PublicKey;
