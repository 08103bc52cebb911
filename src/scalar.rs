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

//! Arithmetic on scalars (integers mod the group order).
//!
//! The Ed25519 basepoint has prime order
//!
//! \\( \ell = 2\^{252} + 27742317777372353535851937790883648493. \\)
//!
//! A `Scalar` represents an element of \\( \mathbb Z / \ell \mathbb Z
//! \\) as four little-endian `u64` limbs, and every constructed
//! `Scalar` is canonical (less than \\( \ell \\)).  Conversion to and
//! from byte strings happens only at the SHA-512 and wire-format
//! boundaries.
//!
//! Reduction mod \\( \ell \\) is division-free, specialised to the
//! shape \\( \ell = 2\^{252} + \ell\_0 \\) with \\( \ell\_0 <
//! 2\^{125} \\): the upper limbs of a wide value are folded down by
//! multiplying with a precomputed residue of the limb weight, and a
//! short Barrett step removes what remains above \\( 2\^{252} \\)
//! (Handbook of Applied Cryptography, Algorithms 14.47 and 14.52).

use core::fmt::Debug;

use digest::generic_array::typenum::U64;
use digest::Digest;
use zeroize::Zeroize;

/// The low 128 bits of \\( \ell \\), little-endian.
const ELL0: u64 = 0x5812_631a_5cf5_d3ed;
const ELL1: u64 = 0x14de_f9de_a2f7_9cd6;

/// \\( 16 (\ell - 2\^{252}) \\), the three-limb constant used to fold
/// the upper half of a wide value: \\( 2\^{256} \equiv -(\mathtt{ELL16})
/// \pmod \ell \\).
const ELL16_0: u64 = 0x8126_31a5_cf5d_3ed0;
const ELL16_1: u64 = 0x4def_9dea_2f79_cd65;
const ELL16_2: u64 = 0x0000_0000_0000_0001;

/// The limbs of \\( \ell \\).
const ELL: [u64; 4] = [ELL0, ELL1, 0, 0x1000_0000_0000_0000];

/// The canonical little-endian encoding of \\( \ell \\).
const ELL_BYTES: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
];

/// Multiply two 64-bit integers, producing the high and low halves of
/// the 128-bit product.
#[inline(always)]
fn mul_wide(x: u64, y: u64) -> (u64, u64) {
    let z = (x as u128) * (y as u128);
    ((z >> 64) as u64, z as u64)
}

/// Add with carry-in; returns the sum and the carry-out.
#[inline(always)]
fn adc(x: u64, y: u64, carry: u64) -> (u64, u64) {
    let z = (x as u128) + (y as u128) + (carry as u128);
    (z as u64, (z >> 64) as u64)
}

/// Subtract with borrow-in; returns the difference and the borrow-out.
#[inline(always)]
fn sbb(x: u64, y: u64, borrow: u64) -> (u64, u64) {
    let z = (x as u128).wrapping_sub((y as u128) + (borrow as u128));
    (z as u64, (z >> 127) as u64)
}

/// An element of \\( \mathbb Z / \ell \mathbb Z \\), where \\( \ell \\)
/// is the order of the basepoint.
///
/// Invariant: the represented integer is less than \\( \ell \\).
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Scalar(pub(crate) [u64; 4]);

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar({:?})", &self.0[..])
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Scalar {
    /// The additive identity.
    pub(crate) const ZERO: Scalar = Scalar([0, 0, 0, 0]);

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// mod \\( \ell \\).
    pub(crate) fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        let w = load_words(&bytes);
        Scalar::reduce_short([w[0], w[1], w[2], w[3], 0])
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// mod \\( \ell \\).
    pub(crate) fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        let mut lo = [0u8; 32];
        let mut hi = [0u8; 32];
        lo.copy_from_slice(&input[..32]);
        hi.copy_from_slice(&input[32..]);
        let l = load_words(&lo);
        let h = load_words(&hi);
        Scalar::reduce_wide([l[0], l[1], l[2], l[3], h[0], h[1], h[2], h[3]])
    }

    /// Construct a `Scalar` from the 512-bit output of a hash function.
    pub(crate) fn from_hash<D>(hash: D) -> Scalar
    where
        D: Digest<OutputSize = U64>,
    {
        let mut output = [0u8; 64];
        output.copy_from_slice(hash.finalize().as_slice());
        Scalar::from_bytes_mod_order_wide(&output)
    }

    /// Serialize as a 32-byte little-endian string.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        for i in 0..4 {
            s[i * 8..(i + 1) * 8].copy_from_slice(&self.0[i].to_le_bytes());
        }
        s
    }

    /// Compute \\( ab + c \pmod \ell \\).
    ///
    /// Schoolbook 4x4 limb multiplication into an 8-limb accumulator
    /// preloaded with `c`, followed by the wide reduction.  All loop
    /// bounds are constant and no branch depends on the operands.
    pub(crate) fn multiply_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        let mut z = [c.0[0], c.0[1], c.0[2], c.0[3], 0, 0, 0, 0];

        for i in 0..4 {
            let bi = b.0[i];

            // One row of partial products: (h, l) columns for a * b_i.
            let (h0, l0) = mul_wide(a.0[0], bi);
            let (h1, l1) = mul_wide(a.0[1], bi);
            let (h2, l2) = mul_wide(a.0[2], bi);
            let (h3, l3) = mul_wide(a.0[3], bi);

            let (l1, carry) = adc(h0, l1, 0);
            let (l2, carry) = adc(h1, l2, carry);
            let (l3, carry) = adc(h2, l3, carry);
            let (l4, _) = adc(h3, 0, carry);

            // Accumulate the row at limb offset i.  The final carry is
            // dropped: the full product plus c is below 2^512.
            let (z0, carry) = adc(z[i], l0, 0);
            let (z1, carry) = adc(z[i + 1], l1, carry);
            let (z2, carry) = adc(z[i + 2], l2, carry);
            let (z3, carry) = adc(z[i + 3], l3, carry);
            let (z4, _) = adc(z[i + 4], l4, carry);
            z[i] = z0;
            z[i + 1] = z1;
            z[i + 2] = z2;
            z[i + 3] = z3;
            z[i + 4] = z4;
        }

        Scalar::reduce_wide(z)
    }

    /// Reduce an 8-limb (512-bit) integer to the canonical residue mod
    /// \\( \ell \\).
    ///
    /// Three folding rounds eliminate the upper four limbs: each round
    /// multiplies them by \\( 16(\ell - 2\^{252}) \\) and pushes the
    /// product back into the accumulator, with alternating sign because
    /// \\( 2\^{256} \\) is congruent to the *negative* of that
    /// constant.  When the upper limbs are already zero the round's
    /// contribution is cancelled with a mask rather than skipped, so
    /// the sequence of operations does not depend on the data.
    fn reduce_wide(x: [u64; 8]) -> Scalar {
        let (mut r0, mut r1, mut r2, mut r3, mut r4) = (x[0], x[1], x[2], x[3], 0u64);
        let (mut q0, mut q1, mut q2, mut q3) = (x[4], x[5], x[6], x[7]);

        for round in 0..3 {
            let (h0, s0) = mul_wide(q0, ELL16_0);
            let (h1, s1) = mul_wide(q1, ELL16_0);
            let (h2, s2) = mul_wide(q2, ELL16_0);
            let (h3, s3) = mul_wide(q3, ELL16_0);

            let (s1, carry) = adc(h0, s1, 0);
            let (s2, carry) = adc(h1, s2, carry);
            let (s3, carry) = adc(h2, s3, carry);
            let (s4, _) = adc(h3, 0, carry);

            let (h0, l0) = mul_wide(q0, ELL16_1);
            let (h1, l1) = mul_wide(q1, ELL16_1);
            let (h2, l2) = mul_wide(q2, ELL16_1);
            let (h3, l3) = mul_wide(q3, ELL16_1);

            let (l1, carry) = adc(h0, l1, 0);
            let (l2, carry) = adc(h1, l2, carry);
            let (l3, carry) = adc(h2, l3, carry);
            let (l4, _) = adc(h3, 0, carry);

            let (s1, carry) = adc(s1, l0, 0);
            let (s2, carry) = adc(s2, l1, carry);
            let (s3, carry) = adc(s3, l2, carry);
            let (s4, carry) = adc(s4, l3, carry);
            let (s5, s6) = adc(l4, 0, carry);

            // The third limb of the constant is 1: add q shifted up by
            // two limb positions.
            let (s2, carry) = adc(s2, q0, 0);
            let (s3, carry) = adc(s3, q1, carry);
            let (s4, carry) = adc(s4, q2, carry);
            let (s5, carry) = adc(s5, q3, carry);
            let (s6, s7) = adc(s6, 0, carry);

            // m is all-ones iff q is nonzero.
            let q = q0 | q1 | q2 | q3;
            let m = ((q | q.wrapping_neg()) >> 63).wrapping_neg();
            let s0 = s0 & m;
            let s1 = s1 & m;
            let s2 = s2 & m;
            let s3 = s3 & m;

            q0 = s4;
            q1 = s5;
            q2 = s6;
            q3 = s7;

            if (round + 1) % 2 == 0 {
                let (t0, carry) = adc(r0, s0, 0);
                let (t1, carry) = adc(r1, s1, carry);
                let (t2, carry) = adc(r2, s2, carry);
                let (t3, carry) = adc(r3, s3, carry);
                let (t4, _) = adc(r4, 0, carry);
                r0 = t0;
                r1 = t1;
                r2 = t2;
                r3 = t3;
                r4 = t4;
            } else {
                let (t0, borrow) = sbb(r0, s0, 0);
                let (t1, borrow) = sbb(r1, s1, borrow);
                let (t2, borrow) = sbb(r2, s2, borrow);
                let (t3, borrow) = sbb(r3, s3, borrow);
                let (t4, _) = sbb(r4, 0, borrow);
                r0 = t0;
                r1 = t1;
                r2 = t2;
                r3 = t3;
                r4 = t4;
            }
        }

        // The rounds ended on a subtraction; if the accumulator went
        // negative, add the folding constant back in (it represents
        // \\( -2^{256} \\), so this adds a multiple of \\( \ell \\)
        // together with the reappearing 2^256 bit in r4).
        let m = (r4 >> 63).wrapping_neg();
        let (t0, carry) = adc(r0, m & ELL16_0, 0);
        let (t1, carry) = adc(r1, m & ELL16_1, carry);
        let (t2, carry) = adc(r2, m & ELL16_2, carry);
        let (t3, carry) = adc(r3, 0, carry);
        let (t4, _) = adc(r4, m & 1, carry);

        Scalar::reduce_short([t0, t1, t2, t3, t4])
    }

    /// Short Barrett step: canonicalise a value below \\( 2\^{260} \\)
    /// held in five limbs.
    ///
    /// The bits at and above \\( 2\^{252} \\) form the quotient
    /// estimate `q`; subtracting \\( q (\ell - 2\^{252}) \\) from the
    /// low 252 bits reduces the value below \\( \ell \\), except that
    /// the subtraction may borrow, in which case one \\( \ell \\) is
    /// added back under a mask.
    fn reduce_short(r: [u64; 5]) -> Scalar {
        let q = (r[4] << 4) | (r[3] >> 60);
        let r3 = r[3] & ((1u64 << 60) - 1);

        let (h0, s0) = mul_wide(ELL0, q);
        let (h1, s1) = mul_wide(ELL1, q);
        let (s1, carry) = adc(h0, s1, 0);
        let (s2, _) = adc(h1, 0, carry);

        let (r0, borrow) = sbb(r[0], s0, 0);
        let (r1, borrow) = sbb(r[1], s1, borrow);
        let (r2, borrow) = sbb(r[2], s2, borrow);
        let (r3, borrow) = sbb(r3, 0, borrow);

        // Conditionally add one ell, keyed on the borrow bit.
        let m = borrow.wrapping_neg();
        let (r0, carry) = adc(r0, m & ELL[0], 0);
        let (r1, carry) = adc(r1, m & ELL[1], carry);
        let (r2, carry) = adc(r2, m & ELL[2], carry);
        let (r3, _) = adc(r3, m & ELL[3], carry);

        Scalar([r0, r1, r2, r3])
    }

    /// Check whether a 32-byte little-endian string encodes a value
    /// strictly below \\( \ell \\).
    ///
    /// # Warning
    ///
    /// This comparison short-circuits and must only be used on public
    /// data (it is called on signature bytes, which the verifier
    /// receives in the clear).  Never reuse it on secret scalars.
    pub(crate) fn is_canonical_vartime(bytes: &[u8; 32]) -> bool {
        let mut i = 31;
        while i > 0 && bytes[i] == ELL_BYTES[i] {
            i -= 1;
        }
        bytes[i] < ELL_BYTES[i]
    }

    /// Write this scalar in radix 16, with 64 signed digits in
    /// `[-8, 8)`, so that
    ///
    /// \\( a = a\_0 + a\_1 16\^1 + \cdots + a\_{63} 16\^{63}. \\)
    ///
    /// Since the scalar is canonical its top nibble is at most 1, so
    /// the final digit absorbs the last carry without overflowing.
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        let bytes = self.to_bytes();
        debug_assert!(bytes[31] <= 127);
        let mut output = [0i8; 64];

        // Radix 256 to radix 16.
        for i in 0..32 {
            output[2 * i] = (bytes[i] & 15) as i8;
            output[2 * i + 1] = ((bytes[i] >> 4) & 15) as i8;
        }

        // Recenter coefficients from [0,16) to [-8,8).
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }

        output
    }

    /// Compute a width-`w` "Non-Adjacent Form" of this scalar: a
    /// recoding \\( a = \sum\_i a\_i 2\^i \\) in which every nonzero
    /// digit is odd, bounded by \\( 2\^{w-1} \\) in absolute value, and
    /// followed by at least \\( w - 1 \\) zero digits.
    ///
    /// Used only with public scalars: the recoding is not constant
    /// time.
    pub(crate) fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        debug_assert!((2..=8).contains(&w));

        let mut naf = [0i8; 256];

        let mut x_u64 = [0u64; 5];
        x_u64[..4].copy_from_slice(&self.0);

        let width = 1u64 << w;
        let window_mask = width - 1;

        let mut pos = 0;
        let mut carry = 0;
        while pos < 256 {
            // Construct a buffer of bits of the scalar, starting at
            // `pos`, possibly spanning a limb boundary.
            let idx = pos / 64;
            let bit_idx = pos % 64;
            let bit_buf = if bit_idx < 64 - w {
                x_u64[idx] >> bit_idx
            } else {
                (x_u64[idx] >> bit_idx) | (x_u64[idx + 1] << (64 - bit_idx))
            };

            let window = carry + (bit_buf & window_mask);

            if window & 1 == 0 {
                // No odd digit here; try the next position.
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i8).wrapping_sub(width as i8);
            }

            pos += w;
        }

        naf
    }
}

fn load_words(bytes: &[u8; 32]) -> [u64; 4] {
    let mut words = [0u64; 4];
    for i in 0..4 {
        let mut w = [0u8; 8];
        w.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
        words[i] = u64::from_le_bytes(w);
    }
    words
}

#[cfg(test)]
mod test {
    use super::*;

    fn from_hex(s: &str) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hex::decode(s).unwrap());
        Scalar::from_bytes_mod_order(bytes)
    }

    /// Wide inputs and their residues mod ell, from Sage.
    static WIDE_VECTORS: [(&str, &str); 3] = [
        (
            "9d79b1a37f31801cd11a6706fb40d6bd57526846903bb13ede562439e9c1b823\
             a96089bca71f3d1a6d2d3cadb3669cbd50e165e434249d8b829f411669842a97",
            "e6edd58289922dc315fab52287276221f512d18d1b3ea1cb1e6d2787c1615806",
        ),
        (
            "9911036cf3e822086ecaa0075a69fc178ba8f83718aa8f3bd1f65e8144e61d9a\
             b30fcb06a6c1ad8f2906e732b10f4db789d35ea68c088ab3f648818ba4a6656b",
            "16cde73312ecd2b588396c5a3ef5741bd9abf2325a9bf748dda6ce4fdbc33304",
        ),
        (
            "e0cb6e382a5dff72ac1dda96908137478bd536cf4b778ade1fe7a9010b3341c2\
             bd2b4acec46edf287a43b9b21175306c76a81a57899322473081cd277bcd1e37",
            "467989ac22e96bfa8758495afcf39f959995007b9e11f7cf73fb972904bd780b",
        ),
    ];

    #[test]
    fn wide_reduction_vectors() {
        for (input, expected) in WIDE_VECTORS.iter() {
            let mut wide = [0u8; 64];
            wide.copy_from_slice(&hex::decode(input).unwrap());
            let reduced = Scalar::from_bytes_mod_order_wide(&wide);
            assert_eq!(hex::encode(reduced.to_bytes()), *expected);
        }
    }

    #[test]
    fn reduction_of_ell_is_zero() {
        // ell itself, ell in the low half of a wide input, and ell
        // shifted into the upper half must all reduce to zero.
        assert_eq!(Scalar::from_bytes_mod_order(ELL_BYTES), Scalar::ZERO);

        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&ELL_BYTES);
        assert_eq!(Scalar::from_bytes_mod_order_wide(&wide), Scalar::ZERO);

        // 2^256 * ell mod ell == 0
        let mut wide = [0u8; 64];
        wide[32..].copy_from_slice(&ELL_BYTES);
        assert_eq!(Scalar::from_bytes_mod_order_wide(&wide), Scalar::ZERO);
    }

    #[test]
    fn reduction_is_the_identity_below_ell() {
        let x = from_hex("e6edd58289922dc315fab52287276221f512d18d1b3ea1cb1e6d2787c1615806");
        assert_eq!(Scalar::from_bytes_mod_order(x.to_bytes()), x);
    }

    #[test]
    fn ell_plus_one_reduces_to_one() {
        let mut bytes = ELL_BYTES;
        bytes[0] += 1;
        let one = Scalar([1, 0, 0, 0]);
        assert_eq!(Scalar::from_bytes_mod_order(bytes), one);
    }

    #[test]
    fn multiply_add_vector() {
        let a = from_hex("63ea0bf5ee5974c3790f2b56ed732a1a1131be177dea42619767c21851c27c0b");
        let b = from_hex("1364f5d8717b0d5803ca8d9aa6a3b7437ff59fce63911f0bd0b3cfbacc9bb30e");
        let c = from_hex("853e4689789bf41f4c1d1ef9a18c1bec13a1e760e83f2c14f188528d68b76109");
        let expected = "e543919c124837b2fac0b572fe61f8aa8c27a92d08a5e7070141d98b66c60006";
        assert_eq!(
            hex::encode(Scalar::multiply_add(&a, &b, &c).to_bytes()),
            expected
        );
    }

    #[test]
    fn multiply_add_identities() {
        let one = Scalar([1, 0, 0, 0]);
        let x = from_hex("467989ac22e96bfa8758495afcf39f959995007b9e11f7cf73fb972904bd780b");
        // 1*x + 0 == x, x*0 + x == x
        assert_eq!(Scalar::multiply_add(&one, &x, &Scalar::ZERO), x);
        assert_eq!(Scalar::multiply_add(&x, &Scalar::ZERO, &x), x);
    }

    #[test]
    fn canonical_check_brackets_ell() {
        assert!(Scalar::is_canonical_vartime(&[0u8; 32]));
        let mut below = ELL_BYTES;
        below[0] -= 1;
        assert!(Scalar::is_canonical_vartime(&below));
        assert!(!Scalar::is_canonical_vartime(&ELL_BYTES));
        let mut above = ELL_BYTES;
        above[0] += 1;
        assert!(!Scalar::is_canonical_vartime(&above));
        assert!(!Scalar::is_canonical_vartime(&[0xffu8; 32]));
    }

    #[test]
    fn radix_16_reconstructs_small_scalars() {
        for &v in &[0u64, 1, 7, 8, 15, 16, 0xdead_beef, u64::MAX >> 1] {
            let digits = Scalar([v, 0, 0, 0]).as_radix_16();
            let mut acc: i128 = 0;
            for i in (0..64).rev() {
                acc = acc * 16 + digits[i] as i128;
            }
            assert_eq!(acc, v as i128);
            for &d in digits.iter() {
                assert!((-8..8).contains(&d));
            }
        }
    }

    #[test]
    fn naf_reconstructs_small_scalars() {
        for w in 2..=8 {
            for &v in &[0u64, 1, 7, 249, 0xdead_beef, u64::MAX >> 2] {
                let naf = Scalar([v, 0, 0, 0]).non_adjacent_form(w);
                let mut acc: i128 = 0;
                for i in (0..128).rev() {
                    acc = acc * 2 + naf[i] as i128;
                }
                assert_eq!(acc, v as i128);
                for &d in naf.iter() {
                    assert!(d == 0 || (d & 1 == 1 && d.unsigned_abs() < (1 << (w - 1))));
                }
            }
        }
    }
}
