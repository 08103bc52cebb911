// -*- mode: rust; -*-
//
// This file is part of ed25519-quill.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! ed25519 public keys and signature verification.

use core::fmt::Debug;

use sha2::{Digest, Sha512};

use crate::constants::PUBLIC_KEY_LENGTH;
use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::errors::{InternalError, SignatureError};
use crate::scalar::Scalar;
use crate::signature::Signature;

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ed25519 public key.
///
/// Holds the 32-byte compressed Edwards-y encoding.  Construction never
/// validates the encoding: decoding happens inside [`PublicKey::verify`],
/// and an undecodable key simply fails to verify anything.  This keeps
/// malformed wire input from ever being an error path.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct PublicKey(pub(crate) CompressedEdwardsY);

impl Debug for PublicKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PublicKey({:?})", self.0)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PublicKey {
    /// Construct a `PublicKey` from its 32-byte encoding.
    #[inline]
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> PublicKey {
        PublicKey(CompressedEdwardsY(*bytes))
    }

    /// Convert this public key to its byte encoding.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// View this public key as its byte encoding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Verify a signature on a message with this public key.
    ///
    /// Returns `true` iff the signature is valid.  All failure modes
    /// (a non-canonical `S`, an undecodable public key or `R`, a
    /// failed group equation) collapse into `false`, so no oracle for
    /// *which* check failed is exposed.
    ///
    /// The checks follow RFC 8032 §5.1.7: `S` must be canonical
    /// (strictly below the group order, closing the malleability
    /// vector), while no subgroup check is made on `A` or `R`, so
    /// low-order (torsion-component) points are accepted.
    #[allow(non_snake_case)]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        if !Scalar::is_canonical_vartime(signature.s_bytes()) {
            return false;
        }

        let A = match self.0.decompress() {
            Some(point) => point,
            None => return false,
        };

        // k = H(R ‖ A ‖ M) mod ℓ.
        let mut h = Sha512::new();
        h.update(signature.r_bytes());
        h.update(self.as_bytes());
        h.update(message);
        let k = Scalar::from_hash(h);

        let s = Scalar::from_bytes_mod_order(*signature.s_bytes());

        // The verification equation [S]B = R + [k]A is checked as
        // R = [S]B + [k](-A), recomputing the expected R and comparing
        // encodings.  The byte comparison means a non-canonically
        // encoded R never verifies.
        let minus_A = -(&A);
        let expected_R =
            EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, &s).compress();

        expected_R.as_bytes() == signature.r_bytes()
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = SignatureError;

    /// Construct a `PublicKey` from a slice, checking only the length.
    fn try_from(bytes: &[u8]) -> Result<PublicKey, SignatureError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(InternalError::BytesLength {
                name: "PublicKey",
                length: PUBLIC_KEY_LENGTH,
            }
            .into());
        }
        let mut array = [0u8; PUBLIC_KEY_LENGTH];
        array.copy_from_slice(bytes);
        Ok(PublicKey::from_bytes(&array))
    }
}

#[cfg(feature = "serde")]
impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct PublicKeyVisitor;

        impl<'d> Visitor<'d> for PublicKeyVisitor {
            type Value = PublicKey;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("An ed25519 public key as 32 bytes.")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<PublicKey, E>
            where
                E: SerdeError,
            {
                PublicKey::try_from(bytes)
                    .or(Err(SerdeError::invalid_length(bytes.len(), &self)))
            }
        }
        deserializer.deserialize_bytes(PublicKeyVisitor)
    }
}
