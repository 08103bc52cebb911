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

//! Lookup tables of precomputed point multiples.

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::edwards::AffineNielsPoint;
use crate::edwards::EdwardsPoint;
use crate::edwards::ProjectiveNielsPoint;

/// A table of precomputed multiples `[P, 2P, ..., 8P]` of a point, for
/// constant-time selection by a signed radix-16 digit.
#[derive(Copy, Clone)]
pub(crate) struct LookupTable(pub(crate) [AffineNielsPoint; 8]);

impl LookupTable {
    /// Given `-8 <= x <= 8`, return `x * P` in constant time: the whole
    /// row is scanned and the match copied under a mask, then the
    /// result is negated under a mask derived from the sign of `x`.
    pub(crate) fn select(&self, x: i8) -> AffineNielsPoint {
        debug_assert!(x >= -8);
        debug_assert!(x <= 8);

        // Compute xabs = |x|.
        let xmask = (x as i16) >> 7;
        let xabs = ((x as i16 + xmask) ^ xmask) as u16;

        // Scan the row; t ends up as |x| * P (or the identity if x = 0).
        let mut t = AffineNielsPoint::identity();
        for j in 1..9 {
            let hit = xabs.ct_eq(&(j as u16));
            t.conditional_assign(&self.0[j - 1], hit);
        }

        // Now negate under the sign mask, so t = x * P.
        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_negate(neg_mask);

        t
    }
}

impl Default for LookupTable {
    fn default() -> LookupTable {
        LookupTable([AffineNielsPoint::identity(); 8])
    }
}

impl From<&EdwardsPoint> for LookupTable {
    fn from(p: &EdwardsPoint) -> LookupTable {
        let pn = p.to_projective_niels();
        let mut points = [p.to_affine_niels(); 8];
        let mut q = *p;
        for j in 0..7 {
            q = (&q + &pn).to_extended();
            points[j + 1] = q.to_affine_niels();
        }
        LookupTable(points)
    }
}

/// A table of odd multiples `[P, 3P, 5P, ..., 15P]` of a point, for
/// variable-time selection by a width-5 NAF digit.
pub(crate) struct NafLookupTable5(pub(crate) [ProjectiveNielsPoint; 8]);

impl NafLookupTable5 {
    /// Given odd `x` with `0 < x < 16`, return `x * P`.
    ///
    /// Indexed directly; only for public inputs.
    pub(crate) fn select(&self, x: usize) -> ProjectiveNielsPoint {
        debug_assert!(x & 1 == 1);
        debug_assert!(x < 16);

        self.0[x / 2]
    }
}

impl From<&EdwardsPoint> for NafLookupTable5 {
    fn from(a: &EdwardsPoint) -> NafLookupTable5 {
        let mut ai = [a.to_projective_niels(); 8];
        let a2 = a.double();
        for i in 0..7 {
            ai[i + 1] = (&a2 + &ai[i]).to_extended().to_projective_niels();
        }
        // Now ai = [A, 3A, 5A, 7A, 9A, 11A, 13A, 15A].
        NafLookupTable5(ai)
    }
}
