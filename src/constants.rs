// -*- mode: rust; -*-
//
// This file is part of ed25519-quill.
// Copyright (c) 2016-2021 isis lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - Isis Agora Lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Curve constants and the shared precomputed basepoint tables.

use std::sync::OnceLock;

use crate::edwards::{CompressedEdwardsY, EdwardsBasepointTable, EdwardsPoint};
use crate::field::FieldElement;
use crate::window::NafLookupTable5;

/// The length of an Ed25519 seed (private key entropy), in bytes.
pub const SEED_LENGTH: usize = 32;

/// The length of an Ed25519 public key, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// The length of an Ed25519 signature, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Edwards `d` value, equal to `-121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// Edwards `2*d` value.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// Precomputed value of one of the square roots of -1 (mod p).
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// The Ed25519 basepoint, with `y = 4/5` and positive `x`.
pub(crate) const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement([
        1738742601995546,
        1146398526822698,
        2070867633025821,
        562264141797630,
        587772402128613,
    ]),
    Y: FieldElement([
        1801439850948184,
        1351079888211148,
        450359962737049,
        900719925474099,
        1801439850948198,
    ]),
    Z: FieldElement([1, 0, 0, 0, 0]),
    T: FieldElement([
        1841354044333475,
        16398895984059,
        755974180946558,
        900171276175154,
        1821297809914039,
    ]),
};

/// The canonical encoding of the basepoint.
pub(crate) const ED25519_BASEPOINT_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66,
]);

/// The shared radix-16 table of basepoint multiples used by fixed-base
/// multiplication.
///
/// Generated from `ED25519_BASEPOINT_POINT` on first use and read-only
/// afterwards, so it can be shared between threads without
/// synchronisation beyond the initialisation itself.
pub(crate) fn basepoint_table() -> &'static EdwardsBasepointTable {
    static TABLE: OnceLock<EdwardsBasepointTable> = OnceLock::new();
    TABLE.get_or_init(|| EdwardsBasepointTable::create(&ED25519_BASEPOINT_POINT))
}

/// The shared table of odd basepoint multiples `[B, 3B, ..., 15B]` used
/// by the variable-time double-scalar multiplication.
pub(crate) fn basepoint_naf_table() -> &'static NafLookupTable5 {
    static TABLE: OnceLock<NafLookupTable5> = OnceLock::new();
    TABLE.get_or_init(|| NafLookupTable5::from(&ED25519_BASEPOINT_POINT))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basepoint_constant_matches_compressed_form() {
        assert_eq!(
            ED25519_BASEPOINT_POINT.compress(),
            ED25519_BASEPOINT_COMPRESSED
        );
        assert_eq!(
            ED25519_BASEPOINT_COMPRESSED.decompress().unwrap(),
            ED25519_BASEPOINT_POINT
        );
    }

    #[test]
    fn basepoint_has_y_equal_four_fifths() {
        // 4/5 (mod p)
        let four = FieldElement([4, 0, 0, 0, 0]);
        let five = FieldElement([5, 0, 0, 0, 0]);
        let y = &four * &five.invert();
        assert_eq!(y, ED25519_BASEPOINT_POINT.Y);
    }

    #[test]
    fn basepoint_t_is_xy() {
        let b = &ED25519_BASEPOINT_POINT;
        assert_eq!(&b.X * &b.Y, b.T);
    }
}
