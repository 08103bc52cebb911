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

//! Group operations on the twisted Edwards curve
//! \\( -x\^2 + y\^2 = 1 + d x\^2 y\^2 \\) over
//! \\( \mathbb F\_{2\^{255} - 19} \\) with \\( d = -121665/121666 \\).
//!
//! Following the ref10 implementation strategy, several models of the
//! curve are used internally:
//!
//! * `EdwardsPoint`: points in extended coordinates \\( \mathbb P\^3 \\),
//!   with \\( x = X/Z \\), \\( y = Y/Z \\), \\( xy = T/Z \\);
//! * `ProjectivePoint`: points in \\( \mathbb P\^2 \\);
//! * `CompletedPoint`: points in \\( \mathbb P\^1 \times \mathbb P\^1 \\),
//!   the output space of the addition and doubling formulas;
//!
//! plus two cached formats holding precomputed combinations that
//! accelerate addition (introduced by Niels Duif in the ed25519 paper):
//!
//! * `AffineNielsPoint`: `(y+x, y-x, 2dxy)`
//! * `ProjectiveNielsPoint`: `(Y+X, Y-X, Z, 2dXY)`
//!
//! The addition and doubling formulas are those of Hisil, Wong, Carter,
//! and Dawson, "Twisted Edwards Curves Revisited" (ASIACRYPT 2008).

// Coordinates in projective space are traditionally capitalised, as in
// the papers the formulas come from.
#![allow(non_snake_case)]

use core::ops::{Add, Neg, Sub};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::window::{LookupTable, NafLookupTable5};

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" format, a curve point `(x, y)` is determined by the
/// y-coordinate and the sign of x, marshalled into 32 bytes: the
/// little-endian encoding of y with the sign bit of x in the high bit
/// of the final byte.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct CompressedEdwardsY(pub(crate) [u8; 32]);

impl core::fmt::Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub(crate) fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Attempt to decompress to an `EdwardsPoint`.
    ///
    /// Returns `None` if:
    ///
    /// * the y-coordinate is not the canonical representative of a
    ///   field element (the encoded value, sign bit aside, is \\( \geq
    ///   p \\));
    /// * the recovered \\( x\^2 = (y\^2 - 1)/(d y\^2 + 1) \\) is not a
    ///   square;
    /// * the sign bit is set but \\( x = 0 \\).
    ///
    /// Not constant time; the input is public.
    pub(crate) fn decompress(&self) -> Option<EdwardsPoint> {
        let sign = self.0[31] >> 7;
        let Y = FieldElement::from_bytes(&self.0);

        // from_bytes masks the sign bit away; an encoding is canonical
        // exactly when re-encoding reproduces the remaining 255 bits.
        let mut y_bytes = self.0;
        y_bytes[31] &= 0x7f;
        if Y.to_bytes() != y_bytes {
            return None;
        }

        let Z = FieldElement::ONE;
        let YY = Y.square();
        let u = &YY - &Z; // u =  y^2 - 1
        let v = &(&YY * &constants::EDWARDS_D) + &Z; // v = dy^2 + 1
        let (is_square, mut X) = FieldElement::sqrt_ratio_i(&u, &v);

        if !bool::from(is_square) {
            return None;
        }

        // x = 0 admits only the encoding with sign bit zero.
        if bool::from(X.is_zero()) && sign == 1 {
            return None;
        }

        // Flip the sign of X if it does not match the encoding.
        X.conditional_negate(X.is_negative() ^ Choice::from(sign));

        Some(EdwardsPoint {
            X,
            Y,
            Z,
            T: &X * &Y,
        })
    }
}

// ------------------------------------------------------------------------
// Internal point representations
// ------------------------------------------------------------------------

/// A point on the curve in extended coordinates: the \\( \mathbb P\^3 \\)
/// model, where `(x, y)` corresponds to `(x : y : 1 : xy)`.
///
/// Invariant: \\( X Y = Z T \\) and `(X/Z, Y/Z)` satisfies the curve
/// equation.
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

/// A point in the \\( \mathbb P\^2 \\) model: `(x, y)` corresponds to
/// `(x : y : 1)`.  Doubling here is cheaper than in extended
/// coordinates, which matters in the doubling-heavy multiplication
/// loops.
#[derive(Copy, Clone)]
pub(crate) struct ProjectivePoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
}

/// A point in the \\( \mathbb P\^1 \times \mathbb P\^1 \\) model:
/// `((X : Z), (Y : T))`.  The addition and doubling formulas land
/// here, and conversion out costs a few multiplications, so sums are
/// kept completed until the next operation is chosen.
#[derive(Copy, Clone)]
pub(crate) struct CompletedPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

/// A precomputed point in the affine model, stored as
/// `(y+x, y-x, 2dxy)`.
#[derive(Copy, Clone)]
pub(crate) struct AffineNielsPoint {
    pub(crate) y_plus_x: FieldElement,
    pub(crate) y_minus_x: FieldElement,
    pub(crate) xy2d: FieldElement,
}

/// A precomputed point in the \\( \mathbb P\^3 \\) model, stored as
/// `(Y+X, Y-X, Z, 2dT)`.
#[derive(Copy, Clone)]
pub(crate) struct ProjectiveNielsPoint {
    pub(crate) Y_plus_X: FieldElement,
    pub(crate) Y_minus_X: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T2d: FieldElement,
}

// ------------------------------------------------------------------------
// Identity constructors
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Return the identity element of the curve.
    pub(crate) fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl ProjectivePoint {
    fn identity() -> ProjectivePoint {
        ProjectivePoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
        }
    }
}

impl AffineNielsPoint {
    /// The identity in cached-affine form.
    pub(crate) fn identity() -> AffineNielsPoint {
        AffineNielsPoint {
            y_plus_x: FieldElement::ONE,
            y_minus_x: FieldElement::ONE,
            xy2d: FieldElement::ZERO,
        }
    }
}

// ------------------------------------------------------------------------
// Constant-time traits
// ------------------------------------------------------------------------

impl ConditionallySelectable for AffineNielsPoint {
    fn conditional_select(
        a: &AffineNielsPoint,
        b: &AffineNielsPoint,
        choice: Choice,
    ) -> AffineNielsPoint {
        AffineNielsPoint {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            xy2d: FieldElement::conditional_select(&a.xy2d, &b.xy2d, choice),
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    /// Constant-time equality, on the projective equivalence classes:
    /// `(X1 : Y1 : Z1)` equals `(X2 : Y2 : Z2)` iff the cross products
    /// agree.
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
            & (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    fn to_projective(self) -> ProjectivePoint {
        // Passing to P^2 is free: drop T.
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Convert to the cached \\( \mathbb P\^3 \\) format.
    pub(crate) fn to_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Dehomogenize to the cached affine format.  Costs a field
    /// inversion, so this is only used when building long-lived tables.
    pub(crate) fn to_affine_niels(&self) -> AffineNielsPoint {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d: &(&x * &y) * &constants::EDWARDS_D2,
        }
    }

    /// Compress this point to the 32-byte Edwards-y format.
    pub(crate) fn compress(&self) -> CompressedEdwardsY {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let mut s = y.to_bytes();
        s[31] ^= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }
}

impl ProjectivePoint {
    /// Pass to extended coordinates, at a cost of 3M + 1S:
    /// `(X : Y : Z)` maps to `(XZ : YZ : Z^2 : XY)`.
    fn to_extended(self) -> EdwardsPoint {
        EdwardsPoint {
            X: &self.X * &self.Z,
            Y: &self.Y * &self.Z,
            Z: self.Z.square(),
            T: &self.X * &self.Y,
        }
    }
}

impl CompletedPoint {
    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
        }
    }

    pub(crate) fn to_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: &self.X * &self.T,
            Y: &self.Y * &self.Z,
            Z: &self.Z * &self.T,
            T: &self.X * &self.Y,
        }
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl ProjectivePoint {
    /// Double this point.
    pub(crate) fn double(&self) -> CompletedPoint {
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ2 = self.Z.square2();
        let X_plus_Y_sq = (&self.X + &self.Y).square();
        let YY_plus_XX = &YY + &XX;
        let YY_minus_XX = &YY - &XX;

        CompletedPoint {
            X: &X_plus_Y_sq - &YY_plus_XX,
            Y: YY_plus_XX,
            Z: YY_minus_XX,
            T: &ZZ2 - &YY_minus_XX,
        }
    }
}

impl EdwardsPoint {
    /// Add this point to itself.
    pub(crate) fn double(&self) -> EdwardsPoint {
        self.to_projective().double().to_extended()
    }

    /// Compute `2^k * self` by successive doublings, staying in
    /// \\( \mathbb P\^2 \\) between them.  Requires `k > 0`.
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut s = self.to_projective();
        for _ in 0..(k - 1) {
            s = s.double().to_projective();
        }
        // Unroll the last doubling so the output lands in extended
        // coordinates directly.
        s.double().to_extended()
    }
}

// ------------------------------------------------------------------------
// Addition and subtraction
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b ProjectiveNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn add(self, other: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let Y_plus_X = &self.Y + &self.X;
        let Y_minus_X = &self.Y - &self.X;
        let PP = &Y_plus_X * &other.Y_plus_X;
        let MM = &Y_minus_X * &other.Y_minus_X;
        let TT2d = &self.T * &other.T2d;
        let ZZ = &self.Z * &other.Z;
        let ZZ2 = &ZZ + &ZZ;

        CompletedPoint {
            X: &PP - &MM,
            Y: &PP + &MM,
            Z: &ZZ2 + &TT2d,
            T: &ZZ2 - &TT2d,
        }
    }
}

impl<'a, 'b> Sub<&'b ProjectiveNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn sub(self, other: &'b ProjectiveNielsPoint) -> CompletedPoint {
        let Y_plus_X = &self.Y + &self.X;
        let Y_minus_X = &self.Y - &self.X;
        let PM = &Y_plus_X * &other.Y_minus_X;
        let MP = &Y_minus_X * &other.Y_plus_X;
        let TT2d = &self.T * &other.T2d;
        let ZZ = &self.Z * &other.Z;
        let ZZ2 = &ZZ + &ZZ;

        CompletedPoint {
            X: &PM - &MP,
            Y: &PM + &MP,
            Z: &ZZ2 - &TT2d,
            T: &ZZ2 + &TT2d,
        }
    }
}

impl<'a, 'b> Add<&'b AffineNielsPoint> for &'a EdwardsPoint {
    type Output = CompletedPoint;

    fn add(self, other: &'b AffineNielsPoint) -> CompletedPoint {
        let Y_plus_X = &self.Y + &self.X;
        let Y_minus_X = &self.Y - &self.X;
        let PP = &Y_plus_X * &other.y_plus_x;
        let MM = &Y_minus_X * &other.y_minus_x;
        let Txy2d = &self.T * &other.xy2d;
        let Z2 = &self.Z + &self.Z;

        CompletedPoint {
            X: &PP - &MM,
            Y: &PP + &MM,
            Z: &Z2 + &Txy2d,
            T: &Z2 - &Txy2d,
        }
    }
}

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.to_projective_niels()).to_extended()
    }
}

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl<'a> Neg for &'a AffineNielsPoint {
    type Output = AffineNielsPoint;

    fn neg(self) -> AffineNielsPoint {
        AffineNielsPoint {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            xy2d: -(&self.xy2d),
        }
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

/// A precomputed table of multiples of the basepoint, for accelerating
/// fixed-base scalar multiplication.
///
/// The table holds, for `i` in `0..32`, the multiples
/// `[16^(2i) B, 2 16^(2i) B, ..., 8 16^(2i) B]` in cached affine form.
/// It is built once from the basepoint at process start and shared
/// read-only afterwards.
pub(crate) struct EdwardsBasepointTable([LookupTable; 32]);

impl EdwardsBasepointTable {
    /// Generate the table from a basepoint.
    pub(crate) fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut table = EdwardsBasepointTable([LookupTable::default(); 32]);
        let mut P = *basepoint;
        for i in 0..32 {
            // P = 16^(2i) B
            table.0[i] = LookupTable::from(&P);
            P = P.mul_by_pow_2(8);
        }
        table
    }

    /// Compute `scalar * B`, where `B` is the table's basepoint.
    ///
    /// Write the scalar in radix 16 with signed digits,
    ///
    /// \\( a = a\_0 + a\_1 16\^1 + \cdots + a\_{63} 16\^{63}, \\)
    ///
    /// and split the sum into even and odd digit positions:
    ///
    /// \\( a B = \sum\_{i\ \mathrm{even}} a\_i 16\^i B + 16 \sum\_{i\
    /// \mathrm{odd}} a\_i 16\^{i-1} B. \\)
    ///
    /// Each term is a table lookup (a full constant-time row scan);
    /// the factor of 16 between the halves costs four doublings.
    pub(crate) fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.as_radix_16();

        let mut P = EdwardsPoint::identity();

        for i in (0..64).filter(|x| x % 2 == 1) {
            P = (&P + &self.0[i / 2].select(a[i])).to_extended();
        }

        P = P.mul_by_pow_2(4);

        for i in (0..64).filter(|x| x % 2 == 0) {
            P = (&P + &self.0[i / 2].select(a[i])).to_extended();
        }

        P
    }
}

impl EdwardsPoint {
    /// Compute `a * A + b * B` in variable time, where `B` is the
    /// basepoint.
    ///
    /// Both scalars are recoded into width-5 NAF and consumed jointly,
    /// sharing one doubling chain; `A`'s odd multiples are computed on
    /// the fly and `B`'s come from the precomputed table.  Verification
    /// inputs are public, so no constant-time discipline applies here.
    pub(crate) fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        let a_naf = a.non_adjacent_form(5);
        let b_naf = b.non_adjacent_form(5);

        let table_A = NafLookupTable5::from(A);
        let table_B = constants::basepoint_naf_table();

        // Find the most significant nonzero digit.
        let mut i: usize = 255;
        for j in (0..256).rev() {
            i = j;
            if a_naf[i] != 0 || b_naf[i] != 0 {
                break;
            }
        }

        let mut r = ProjectivePoint::identity();
        loop {
            let mut t = r.double();

            if a_naf[i] > 0 {
                t = &t.to_extended() + &table_A.select(a_naf[i] as usize);
            } else if a_naf[i] < 0 {
                t = &t.to_extended() - &table_A.select(-a_naf[i] as usize);
            }

            if b_naf[i] > 0 {
                t = &t.to_extended() + &table_B.select(b_naf[i] as usize);
            } else if b_naf[i] < 0 {
                t = &t.to_extended() - &table_B.select(-b_naf[i] as usize);
            }

            r = t.to_projective();

            if i == 0 {
                break;
            }
            i -= 1;
        }

        r.to_extended()
    }
}

// ------------------------------------------------------------------------
// Debug traits
// ------------------------------------------------------------------------

impl core::fmt::Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
