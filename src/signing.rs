// -*- mode: rust; -*-
//
// This file is part of ed25519-quill.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! ed25519 keypairs and signing.

use core::fmt::Debug;

use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::constants;
use crate::constants::SEED_LENGTH;
use crate::errors::{InternalError, SignatureError};
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::verifying::PublicKey;

/// An ed25519 keypair: the 32-byte secret seed together with the
/// public key derived from it.
///
/// The public key is logically derivable from the seed, but deriving it
/// costs a SHA-512 invocation and a fixed-base scalar multiplication,
/// so it is computed once at construction and cached.  Nothing else is
/// kept at rest: the expanded secret scalar is recomputed inside each
/// [`KeyPair::sign`] call and wiped afterwards.
///
/// The seed is automatically overwritten with zeroes when the keypair
/// is dropped.
pub struct KeyPair {
    seed: [u8; SEED_LENGTH],
    public: PublicKey,
}

impl Drop for KeyPair {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // The seed is deliberately omitted.
        write!(f, "KeyPair {{ public: {:?} }}", self.public)
    }
}

impl KeyPair {
    /// Generate an ed25519 keypair from a cryptographically secure
    /// random number generator.
    ///
    /// # Errors
    ///
    /// Fails only when the generator fails to produce bytes; the
    /// underlying error is preserved as the
    /// [`source`](std::error::Error::source) of the returned
    /// `SignatureError`.
    pub fn generate<R>(csprng: &mut R) -> Result<KeyPair, SignatureError>
    where
        R: CryptoRng + RngCore,
    {
        let mut seed = [0u8; SEED_LENGTH];
        csprng
            .try_fill_bytes(&mut seed)
            .map_err(InternalError::Rng)?;

        let keypair = KeyPair::from_seed(&seed);
        seed.zeroize();
        Ok(keypair)
    }

    /// Construct an ed25519 keypair from a previously generated seed.
    ///
    /// The seed is hashed with SHA-512; the lower half is clamped and
    /// reduced to form the secret scalar `a`, and the public key is the
    /// encoding of `[a]B`.  The upper half of the hash is not retained;
    /// it is recomputed when signing.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> KeyPair {
        let expanded = ExpandedSecretKey::from_seed(seed);
        let public = PublicKey(
            constants::basepoint_table()
                .mul_base(&expanded.scalar)
                .compress(),
        );

        KeyPair {
            seed: *seed,
            public,
        }
    }

    /// The public half of this keypair, as an independent copy.
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// The secret seed, as an independent copy.
    pub fn seed(&self) -> [u8; SEED_LENGTH] {
        self.seed
    }

    /// Sign a message with this keypair's secret key.
    ///
    /// Deterministic: equal `(seed, message)` inputs produce
    /// bit-identical signatures, per RFC 8032.  No randomness is
    /// consulted.
    #[allow(non_snake_case)]
    pub fn sign(&self, message: &[u8]) -> Signature {
        let expanded = ExpandedSecretKey::from_seed(&self.seed);

        // r = H(prefix ‖ M) mod ℓ, the deterministic nonce.
        let mut h = Sha512::new();
        h.update(expanded.prefix);
        h.update(message);
        let r = Scalar::from_hash(h);

        let R = constants::basepoint_table().mul_base(&r).compress();

        // k = H(R ‖ A ‖ M) mod ℓ, the challenge.
        let mut h = Sha512::new();
        h.update(R.as_bytes());
        h.update(self.public.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        // S = r + k·a mod ℓ.
        let s = Scalar::multiply_add(&k, &expanded.scalar, &r);

        Signature {
            R,
            s: s.to_bytes(),
        }
    }

    /// Verify a signature on a message with this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public.verify(message, signature)
    }
}

impl TryFrom<&[u8]> for KeyPair {
    type Error = SignatureError;

    /// Construct a keypair from a seed given as a slice.
    ///
    /// Fails when the slice is not exactly [`SEED_LENGTH`] bytes.
    fn try_from(bytes: &[u8]) -> Result<KeyPair, SignatureError> {
        if bytes.len() != SEED_LENGTH {
            return Err(InternalError::BytesLength {
                name: "KeyPair",
                length: SEED_LENGTH,
            }
            .into());
        }
        let mut seed = [0u8; SEED_LENGTH];
        seed.copy_from_slice(bytes);
        let keypair = KeyPair::from_seed(&seed);
        seed.zeroize();
        Ok(keypair)
    }
}

/// The expanded form of a secret seed: the clamped, reduced secret
/// scalar `a` and the 32-byte `prefix` used to derive deterministic
/// nonces.
///
/// Instances are scoped to a single key-derivation or signing operation
/// and are overwritten with zeroes when they fall out of scope.
pub(crate) struct ExpandedSecretKey {
    pub(crate) scalar: Scalar,
    pub(crate) prefix: [u8; 32],
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
        self.prefix.zeroize();
    }
}

impl ExpandedSecretKey {
    /// Expand a seed: `h = SHA-512(seed)`, clamp the lower half into
    /// the secret scalar, keep the upper half as the nonce prefix.
    ///
    /// Clamping clears the three cofactor bits and pins the top of the
    /// scalar: `h[0] &= 248; h[31] = (h[31] & 127) | 64`.
    fn from_seed(seed: &[u8; SEED_LENGTH]) -> ExpandedSecretKey {
        let mut hash: [u8; 64] = [0u8; 64];
        let mut lower: [u8; 32] = [0u8; 32];
        let mut prefix: [u8; 32] = [0u8; 32];

        let mut h = Sha512::new();
        h.update(seed);
        hash.copy_from_slice(h.finalize().as_slice());

        lower.copy_from_slice(&hash[00..32]);
        prefix.copy_from_slice(&hash[32..64]);

        lower[0] &= 248;
        lower[31] &= 127;
        lower[31] |= 64;

        let scalar = Scalar::from_bytes_mod_order(lower);

        hash.zeroize();
        lower.zeroize();

        ExpandedSecretKey { scalar, prefix }
    }
}

impl<'a> From<&'a KeyPair> for PublicKey {
    /// Re-derive the public key from a keypair (equal to the cached
    /// copy).
    fn from(keypair: &'a KeyPair) -> PublicKey {
        keypair.public_key()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn expanded_scalar_is_canonical() {
        let expanded = ExpandedSecretKey::from_seed(&[0x1fu8; 32]);
        assert!(Scalar::is_canonical_vartime(&expanded.scalar.to_bytes()));
    }

    #[test]
    fn public_key_is_cached_derivation() {
        let keypair = KeyPair::from_seed(&[0x42u8; 32]);
        let rederived: PublicKey = (&keypair).into();
        assert_eq!(rederived.to_bytes(), keypair.public_key().to_bytes());
    }

    #[test]
    fn keypair_from_slice_length_check() {
        assert!(KeyPair::try_from(&[0u8; 32][..]).is_ok());
        assert!(KeyPair::try_from(&[0u8; 31][..]).is_err());
        assert!(KeyPair::try_from(&[0u8; 33][..]).is_err());
    }
}
