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

//! Field arithmetic modulo \\(p = 2\^{255} - 19\\), using 64-bit limbs
//! with 128-bit products.
//!
//! A `FieldElement` is represented in radix \\(2\^{51}\\) as five
//! `u64`s.  Operations defined directly in terms of machine arithmetic
//! (multiplication, squaring, carrying) live at the top of this module;
//! operations defined in terms of other field operations (inversion,
//! square roots) are at the bottom.

use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallyNegatable;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::constants;

/// An element of the field \\( \mathbb Z / (2\^{255} - 19) \\).
///
/// The limbs are permitted to grow up to \\(2\^{54}\\) between
/// reductions mod \\(p\\); every operation below restores that bound on
/// its output.
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) [u64; 5]);

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// The limbs of \\(16p\\), used to bias subtractions so that the
/// per-limb differences cannot underflow.  \\(16p\\) exceeds any
/// 54-bit-limb operand.
const SIXTEEN_P: [u64; 5] = [
    36028797018963664,
    36028797018963952,
    36028797018963952,
    36028797018963952,
    36028797018963952,
];

impl core::fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s.
    ///
    /// The internal representation is not canonical, so both sides are
    /// normalized to wire format before comparison.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }
}

impl<'b> AddAssign<&'b FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &'b FieldElement) {
        for i in 0..5 {
            self.0[i] += rhs.0[i];
        }
        *self = FieldElement::weak_reduce(self.0);
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut sum = *self;
        sum += rhs;
        sum
    }
}

impl<'b> SubAssign<&'b FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &'b FieldElement) {
        *self = (self as &FieldElement) - rhs;
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        // Bias by 16p before subtracting so each limb stays nonnegative.
        FieldElement::weak_reduce([
            (self.0[0] + SIXTEEN_P[0]) - rhs.0[0],
            (self.0[1] + SIXTEEN_P[1]) - rhs.0[1],
            (self.0[2] + SIXTEEN_P[2]) - rhs.0[2],
            (self.0[3] + SIXTEEN_P[3]) - rhs.0[3],
            (self.0[4] + SIXTEEN_P[4]) - rhs.0[4],
        ])
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        FieldElement::weak_reduce([
            SIXTEEN_P[0] - self.0[0],
            SIXTEEN_P[1] - self.0[1],
            SIXTEEN_P[2] - self.0[2],
            SIXTEEN_P[3] - self.0[3],
            SIXTEEN_P[4] - self.0[4],
        ])
    }
}

impl<'b> MulAssign<&'b FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &'b FieldElement) {
        *self = (self as &FieldElement) * rhs;
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        /// Multiply two 64-bit integers with 128 bits of output.
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a = &self.0;
        let b = &rhs.0;

        // Precompute the wraparound coefficients: limb j of b at weight
        // 2^(51j) wraps past 2^255 with a factor of 19.
        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        // Schoolbook 5x5 with the high diagonal folded back in.  With
        // 54-bit inputs each column is below 2^(108 + 6.3) < 2^115, so
        // the u128 accumulators cannot overflow.
        let mut c0: u128 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let mut c1: u128 = m(a[1], b[0]) + m(a[0], b[1]) + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let mut c2: u128 = m(a[2], b[0]) + m(a[1], b[1]) + m(a[0], b[2]) + m(a[4], b3_19) + m(a[3], b4_19);
        let mut c3: u128 = m(a[3], b[0]) + m(a[2], b[1]) + m(a[1], b[2]) + m(a[0], b[3]) + m(a[4], b4_19);
        let mut c4: u128 = m(a[4], b[0]) + m(a[3], b[1]) + m(a[2], b[2]) + m(a[1], b[3]) + m(a[0], b[4]);

        debug_assert!(a.iter().all(|&x| x < (1 << 54)));
        debug_assert!(b.iter().all(|&x| x < (1 << 54)));

        // One carry pass brings every limb under 64 bits; weak_reduce
        // then restores the 2^51 radix bound.
        c1 += (c0 >> 51) as u128;
        c2 += (c1 >> 51) as u128;
        c3 += (c2 >> 51) as u128;
        c4 += (c3 >> 51) as u128;
        c0 = ((c0 as u64) & LOW_51_BIT_MASK) as u128;
        c0 += (((c4 >> 51) as u64) * 19) as u128;

        FieldElement::weak_reduce([
            c0 as u64,
            (c1 as u64) & LOW_51_BIT_MASK,
            (c2 as u64) & LOW_51_BIT_MASK,
            (c3 as u64) & LOW_51_BIT_MASK,
            (c4 as u64) & LOW_51_BIT_MASK,
        ])
    }
}

impl FieldElement {
    /// The zero element.
    pub(crate) const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0]);

    /// The multiplicative identity.
    pub(crate) const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0]);

    /// Carry excess bits upwards, folding the top carry back in at
    /// weight 19, to enforce `limb < 2^52` on the output.
    #[inline(always)]
    fn weak_reduce(mut limbs: [u64; 5]) -> FieldElement {
        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[0] += (limbs[4] >> 51) * 19;
        limbs[4] &= LOW_51_BIT_MASK;

        FieldElement(limbs)
    }

    /// Load a `FieldElement` from the low 255 bits of a 256-bit input.
    ///
    /// # Warning
    ///
    /// This function masks the high bit of `bytes[31]` but does not
    /// check that the remaining value is a canonical representative;
    /// callers that need canonicity must re-encode and compare.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        #[inline(always)]
        fn word(bytes: &[u8; 32], i: usize) -> u64 {
            let mut w = [0u8; 8];
            w.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            u64::from_le_bytes(w)
        }

        let w0 = word(bytes, 0);
        let w1 = word(bytes, 1);
        let w2 = word(bytes, 2);
        let w3 = word(bytes, 3);

        // Split four 64-bit words into five 51-bit limbs; the final
        // mask also discards bit 255.
        FieldElement([
            w0 & LOW_51_BIT_MASK,
            ((w0 >> 51) | (w1 << 13)) & LOW_51_BIT_MASK,
            ((w1 >> 38) | (w2 << 26)) & LOW_51_BIT_MASK,
            ((w2 >> 25) | (w3 << 39)) & LOW_51_BIT_MASK,
            (w3 >> 12) & LOW_51_BIT_MASK,
        ])
    }

    /// Serialize to a 32-byte little-endian array.  The encoding is
    /// canonical.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        // First reduce to [0, 2^255); then subtract p once if needed.
        let mut limbs = FieldElement::weak_reduce(self.0).0;

        // h >= p iff h + 19 >= 2^255, so the quotient bit q is the
        // carry out of adding 19.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        // r = h - pq = h + 19q - 2^255 q: add 19q, carry, and let the
        // top carry (2^255 q) fall off.
        limbs[0] += 19 * q;
        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        // Repack five 51-bit limbs into four 64-bit words.
        let words = [
            limbs[0] | (limbs[1] << 51),
            (limbs[1] >> 13) | (limbs[2] << 38),
            (limbs[2] >> 26) | (limbs[3] << 25),
            (limbs[3] >> 39) | (limbs[4] << 12),
        ];

        let mut s = [0u8; 32];
        for i in 0..4 {
            s[i * 8..(i + 1) * 8].copy_from_slice(&words[i].to_le_bytes());
        }

        debug_assert!(s[31] & 0b1000_0000 == 0);

        s
    }

    /// Compute `self^2`.
    pub(crate) fn square(&self) -> FieldElement {
        FieldElement::weak_reduce(self.square_limbs())
    }

    /// Compute `2 * self^2`.
    pub(crate) fn square2(&self) -> FieldElement {
        // Carry first: the unreduced column sums do not have the
        // headroom for doubling.
        let mut sq = FieldElement::weak_reduce(self.square_limbs());
        for limb in sq.0.iter_mut() {
            *limb *= 2;
        }
        sq
    }

    #[inline(always)]
    fn square_limbs(&self) -> [u64; 5] {
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a = &self.0;

        let a3_19 = a[3] * 19;
        let a4_19 = a[4] * 19;

        // Symmetric cross terms are collected once and doubled.
        let mut c0: u128 = m(a[0], a[0]) + 2 * (m(a[1], a4_19) + m(a[2], a3_19));
        let mut c1: u128 = m(a[3], a3_19) + 2 * (m(a[0], a[1]) + m(a[2], a4_19));
        let mut c2: u128 = m(a[1], a[1]) + 2 * (m(a[0], a[2]) + m(a[4], a3_19));
        let mut c3: u128 = m(a[4], a4_19) + 2 * (m(a[0], a[3]) + m(a[1], a[2]));
        let mut c4: u128 = m(a[2], a[2]) + 2 * (m(a[0], a[4]) + m(a[1], a[3]));

        debug_assert!(a.iter().all(|&x| x < (1 << 54)));

        c1 += (c0 >> 51) as u128;
        c2 += (c1 >> 51) as u128;
        c3 += (c2 >> 51) as u128;
        c4 += (c3 >> 51) as u128;
        c0 = ((c0 as u64) & LOW_51_BIT_MASK) as u128;
        c0 += (((c4 >> 51) as u64) * 19) as u128;

        [
            c0 as u64,
            (c1 as u64) & LOW_51_BIT_MASK,
            (c2 as u64) & LOW_51_BIT_MASK,
            (c3 as u64) & LOW_51_BIT_MASK,
            (c4 as u64) & LOW_51_BIT_MASK,
        ]
    }

    /// Compute `self^(2^k)` by `k` successive squarings.  Requires
    /// `k > 0`.
    pub(crate) fn pow2k(&self, k: u32) -> FieldElement {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Determine whether this field element is negative in the sense
    /// used by the ed25519 encoding: the low bit of the canonical
    /// representative is set.
    pub(crate) fn is_negative(&self) -> Choice {
        (self.to_bytes()[0] & 1).into()
    }

    /// Determine whether this field element is zero.
    pub(crate) fn is_zero(&self) -> Choice {
        self.to_bytes().ct_eq(&[0u8; 32])
    }

    /// Compute `(self^(2^250 - 1), self^11)`, the shared prefix of the
    /// exponentiation chains for `invert` and `pow_p58`.
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        // Each intermediate t_i below is self^e_i; squaring doubles the
        // exponent, pow2k shifts it, multiplying adds exponents.  The
        // comments track the nonzero bit positions of e_i.
        let t0 = self.square(); // 1
        let t1 = t0.square().square(); // 3
        let t2 = self * &t1; // 3,0
        let t3 = &t0 * &t2; // 3,1,0
        let t4 = t3.square(); // 4,2,1
        let t5 = &t2 * &t4; // 4,3,2,1,0
        let t6 = t5.pow2k(5); // 9,8,7,6,5
        let t7 = &t6 * &t5; // 9..0
        let t8 = t7.pow2k(10); // 19..10
        let t9 = &t8 * &t7; // 19..0
        let t10 = t9.pow2k(20); // 39..20
        let t11 = &t10 * &t9; // 39..0
        let t12 = t11.pow2k(10); // 49..10
        let t13 = &t12 * &t7; // 49..0
        let t14 = t13.pow2k(50); // 99..50
        let t15 = &t14 * &t13; // 99..0
        let t16 = t15.pow2k(100); // 199..100
        let t17 = &t16 * &t15; // 199..0
        let t18 = t17.pow2k(50); // 249..50
        let t19 = &t18 * &t13; // 249..0

        (t19, t3)
    }

    /// Compute the multiplicative inverse of this field element as
    /// `self^(p-2)`.
    ///
    /// Returns zero on input zero.
    pub(crate) fn invert(&self) -> FieldElement {
        // The bits of p-2 are 0111...111 0 1 0 1 1.
        let (t19, t3) = self.pow22501(); // 249..0, and 3,1,0
        let t20 = t19.pow2k(5); // 254..5
        &t20 * &t3 // 254..5,3,1,0
    }

    /// Raise this field element to the power \\((p-5)/8 = 2\^{252} -
    /// 3\\), used inside the combined square-root computation.
    fn pow_p58(&self) -> FieldElement {
        // The bits of (p-5)/8 are 101111...11.
        let (t19, _) = self.pow22501(); // 249..0
        let t20 = t19.pow2k(2); // 251..2
        self * &t20 // 251..2,0
    }

    /// Given `u` and `v`, compute either `sqrt(u/v)` or
    /// `sqrt(i*u/v)` in constant time, where `i = sqrt(-1)`.
    ///
    /// Always returns the nonnegative square root.
    ///
    /// # Return
    ///
    /// - `(Choice(1), +sqrt(u/v))  ` if `v` is nonzero and `u/v` is square;
    /// - `(Choice(1), zero)        ` if `u` is zero;
    /// - `(Choice(0), zero)        ` if `v` is zero and `u` is nonzero;
    /// - `(Choice(0), +sqrt(i*u/v))` if `u/v` is nonsquare.
    pub(crate) fn sqrt_ratio_i(u: &FieldElement, v: &FieldElement) -> (Choice, FieldElement) {
        // With p = 5 (mod 8), a candidate root of u/v is
        //
        //    r = u v^3 (u v^7)^((p-5)/8),
        //
        // which merges the inversion, the square root, and the
        // quadratic-residuosity test: v r^2 is u, -u, or ±i*u, and the
        // last two cases are repaired by multiplying r by sqrt(-1).
        let v3 = &v.square() * v;
        let v7 = &v3.square() * v;
        let mut r = &(u * &v3) * &(u * &v7).pow_p58();
        let check = v * &r.square();

        let i = &constants::SQRT_M1;

        let correct_sign_sqrt = check.ct_eq(u);
        let flipped_sign_sqrt = check.ct_eq(&(-u));
        let flipped_sign_sqrt_i = check.ct_eq(&(&(-u) * i));

        let r_prime = &constants::SQRT_M1 * &r;
        r.conditional_assign(&r_prime, flipped_sign_sqrt | flipped_sign_sqrt_i);

        // Choose the nonnegative root.
        let r_is_negative = r.is_negative();
        r.conditional_negate(r_is_negative);

        (correct_sign_sqrt | flipped_sign_sqrt, r)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Random element a of GF(2^255-19), from Sage:
    /// a = 1070314506888354081329385823235218444233221\
    ///     2228051251926706380353716438957572
    static A_BYTES: [u8; 32] = [
        0x04, 0xfe, 0xdf, 0x98, 0xa7, 0xfa, 0x0a, 0x68, 0x84, 0x92, 0xbd, 0x59, 0x08, 0x07, 0xa7,
        0x03, 0x9e, 0xd1, 0xf6, 0xf2, 0xe1, 0xd9, 0xe2, 0xa4, 0xa4, 0x51, 0x47, 0x36, 0xf3, 0xc3,
        0xa9, 0x17,
    ];

    /// Byte representation of a^2
    static ASQ_BYTES: [u8; 32] = [
        0x75, 0x97, 0x24, 0x9e, 0xe6, 0x06, 0xfe, 0xab, 0x24, 0x04, 0x56, 0x68, 0x07, 0x91, 0x2d,
        0x5d, 0x0b, 0x0f, 0x3f, 0x1c, 0xb2, 0x6e, 0xf2, 0xe2, 0x63, 0x9c, 0x12, 0xba, 0x73, 0x0b,
        0xe3, 0x62,
    ];

    /// Byte representation of 1/a
    static AINV_BYTES: [u8; 32] = [
        0x96, 0x1b, 0xcd, 0x8d, 0x4d, 0x5e, 0xa2, 0x3a, 0xe9, 0x36, 0x37, 0x93, 0xdb, 0x7b, 0x4d,
        0x70, 0xb8, 0x0d, 0xc0, 0x55, 0xd0, 0x4c, 0x1d, 0x7b, 0x90, 0x71, 0xd8, 0xe9, 0xb6, 0x18,
        0xe6, 0x30,
    ];

    #[test]
    fn mul_matches_squaring() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, &a * &a);
        assert_eq!(asq, a.square());
    }

    #[test]
    fn square2_is_twice_square() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(a.square2(), &asq + &asq);
    }

    #[test]
    fn invert_matches_inverse_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        let should_be_inverse = a.invert();
        assert_eq!(ainv, should_be_inverse);
        assert_eq!(FieldElement::ONE, &a * &should_be_inverse);
    }

    #[test]
    fn sqrt_ratio_behavior() {
        let zero = FieldElement::ZERO;
        let one = FieldElement::ONE;
        let i = constants::SQRT_M1;
        let two = &one + &one; // 2 is nonsquare mod p
        let four = &two + &two; // 4 is square mod p

        // 0/0 should return (1, 0) since u is 0
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&zero, &zero);
        assert!(bool::from(choice));
        assert_eq!(sqrt, zero);
        assert!(!bool::from(sqrt.is_negative()));

        // 1/0 should return (0, 0) since v is 0, u is nonzero
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&one, &zero);
        assert!(!bool::from(choice));
        assert_eq!(sqrt, zero);

        // 2/1 is nonsquare, so we expect (0, sqrt(i*2))
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&two, &one);
        assert!(!bool::from(choice));
        assert_eq!(sqrt.square(), &two * &i);
        assert!(!bool::from(sqrt.is_negative()));

        // 4/1 is square, so we expect (1, sqrt(4))
        let (choice, sqrt) = FieldElement::sqrt_ratio_i(&four, &one);
        assert!(bool::from(choice));
        assert_eq!(sqrt.square(), four);
        assert!(!bool::from(sqrt.is_negative()));
    }

    #[test]
    fn from_bytes_ignores_high_bit() {
        let mut bytes = A_BYTES;
        bytes[31] |= 0x80;
        let with_bit = FieldElement::from_bytes(&bytes);
        let without_bit = FieldElement::from_bytes(&A_BYTES);
        assert_eq!(with_bit, without_bit);
    }

    #[test]
    fn encoding_is_canonical() {
        // Encode 2^255 - 18, the largest noncanonical representative.
        let mut noncanonical = [0xffu8; 32];
        noncanonical[0] = 0xee;
        noncanonical[31] = 0x7f;
        let x = FieldElement::from_bytes(&noncanonical);
        // It should decode to 1 and re-encode canonically.
        assert_eq!(x.to_bytes(), FieldElement::ONE.to_bytes());
    }

    #[test]
    fn conditional_negate_round_trips() {
        let one = FieldElement::ONE;
        let minus_one = -(&one);
        let mut x = one;
        x.conditional_negate(Choice::from(1));
        assert_eq!(x, minus_one);
        x.conditional_negate(Choice::from(0));
        assert_eq!(x, minus_one);
        x.conditional_negate(Choice::from(1));
        assert_eq!(x, one);
    }

    #[test]
    fn d_is_ratio_of_curve_constants() {
        // d = -121665/121666 (mod p)
        let num = FieldElement([121665, 0, 0, 0, 0]);
        let den = FieldElement([121666, 0, 0, 0, 0]);
        let d = -(&(&num * &den.invert()));
        assert_eq!(d, constants::EDWARDS_D);
        assert_eq!(&d + &d, constants::EDWARDS_D2);
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        let minus_one = -(&FieldElement::ONE);
        assert_eq!(constants::SQRT_M1.square(), minus_one);
    }
}
