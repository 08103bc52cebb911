// -*- mode: rust; -*-
//
// This file is part of ed25519-quill.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! An ed25519 signature.

use core::fmt::Debug;

use crate::constants::SIGNATURE_LENGTH;
use crate::edwards::CompressedEdwardsY;
use crate::errors::{InternalError, SignatureError};

#[cfg(feature = "serde")]
use serde::de::Error as SerdeError;
#[cfg(feature = "serde")]
use serde::de::Visitor;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ed25519 signature.
///
/// The 64-byte wire format is the canonical encoding of the commitment
/// point `R` followed by the 32-byte little-endian scalar `S`.
///
/// # Note
///
/// These signatures are "detached", that is, they do **not** include a
/// copy of the message which has been signed.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R` is the compressed commitment point `[r]B`, where `r` is the
    /// deterministic nonce scalar derived from the secret prefix and
    /// the message.
    pub(crate) R: CompressedEdwardsY,

    /// `S` is the response scalar `r + H(R ‖ A ‖ M)·a (mod ℓ)`.
    ///
    /// Kept as raw bytes: verification must be able to observe a
    /// non-canonical encoding in order to reject it, so parsing into a
    /// reduced scalar here would be wrong.
    pub(crate) s: [u8; 32],
}

impl Debug for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s[..])
    }
}

impl Signature {
    /// Construct a `Signature` from its 64-byte wire encoding.
    ///
    /// No validation is performed here; whether `S` is canonical and
    /// `R` decodable is the verifier's concern.
    #[inline]
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Signature {
        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];

        lower.copy_from_slice(&bytes[..32]);
        upper.copy_from_slice(&bytes[32..]);

        Signature {
            R: CompressedEdwardsY(lower),
            s: upper,
        }
    }

    /// Convert this `Signature` to its 64-byte wire encoding.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(self.R.as_bytes());
        signature_bytes[32..].copy_from_slice(&self.s);
        signature_bytes
    }

    /// The first half of the signature, the encoding of `R`.
    pub(crate) fn r_bytes(&self) -> &[u8; 32] {
        self.R.as_bytes()
    }

    /// The second half of the signature, the encoding of `S`.
    pub(crate) fn s_bytes(&self) -> &[u8; 32] {
        &self.s
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<Signature, SignatureError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(InternalError::BytesLength {
                name: "Signature",
                length: SIGNATURE_LENGTH,
            }
            .into());
        }
        let mut array = [0u8; SIGNATURE_LENGTH];
        array.copy_from_slice(bytes);
        Ok(Signature::from_bytes(&array))
    }
}

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.to_bytes()[..])
    }
}

#[cfg(feature = "serde")]
impl<'d> Deserialize<'d> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'d>,
    {
        struct SignatureVisitor;

        impl<'d> Visitor<'d> for SignatureVisitor {
            type Value = Signature;

            fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                formatter.write_str("An ed25519 signature as 64 bytes, as specified in RFC8032.")
            }

            fn visit_bytes<E>(self, bytes: &[u8]) -> Result<Signature, E>
            where
                E: SerdeError,
            {
                Signature::try_from(bytes)
                    .or(Err(SerdeError::invalid_length(bytes.len(), &self)))
            }
        }
        deserializer.deserialize_bytes(SignatureVisitor)
    }
}
