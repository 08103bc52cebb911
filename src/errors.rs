// -*- mode: rust; -*-
//
// This file is part of ed25519-quill.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Errors which may occur when parsing keys or signatures from wire
//! formats, or when gathering entropy for key generation.
//!
//! Cryptographic validation failures during verification are *not*
//! errors: `PublicKey::verify` collapses them all into `false`, so that
//! the caller cannot (and an attacker watching the caller cannot)
//! distinguish which check failed.

use core::fmt;
use core::fmt::Display;

/// Internal errors.  Most application-level developers will likely not
/// need to pay any attention to these.
#[derive(Debug)]
pub(crate) enum InternalError {
    /// An error in the length of bytes handed to a constructor.
    ///
    /// `name` is the type which is returning the error, and `length`
    /// is the length in bytes which its constructor expects.
    BytesLength {
        name: &'static str,
        length: usize,
    },
    /// The random number generator failed to produce seed bytes.
    Rng(rand_core::Error),
}

impl Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::BytesLength { name: n, length: l } => {
                write!(f, "{} must be {} bytes in length", n, l)
            }
            InternalError::Rng(_) => write!(f, "Failed to read bytes from the RNG"),
        }
    }
}

/// Errors which may occur while processing keypairs and signatures.
///
/// This error may arise due to:
///
/// * Being given bytes with a length different to what was expected.
///
/// * The random number generator failing during key generation.
#[derive(Debug)]
pub struct SignatureError(pub(crate) InternalError);

impl Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SignatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            InternalError::Rng(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InternalError> for SignatureError {
    fn from(err: InternalError) -> SignatureError {
        SignatureError(err)
    }
}
