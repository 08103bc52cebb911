// -*- mode: rust; -*-
//
// This file is part of ed25519-quill.
// Copyright (c) 2017-2019 isis lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>

//! Integration tests for ed25519-quill.

use ed25519_quill::*;

fn decode_seed(hex_str: &str) -> [u8; SEED_LENGTH] {
    let mut seed = [0u8; SEED_LENGTH];
    seed.copy_from_slice(&hex::decode(hex_str).unwrap());
    seed
}

fn decode_signature(hex_str: &str) -> Signature {
    let mut sig = [0u8; SIGNATURE_LENGTH];
    sig.copy_from_slice(&hex::decode(hex_str).unwrap());
    Signature::from_bytes(&sig)
}

fn decode_public(hex_str: &str) -> PublicKey {
    let mut pk = [0u8; PUBLIC_KEY_LENGTH];
    pk.copy_from_slice(&hex::decode(hex_str).unwrap());
    PublicKey::from_bytes(&pk)
}

mod vectors {
    use super::*;

    struct TestVector {
        seed: &'static str,
        public: &'static str,
        message: &'static str,
        signature: &'static str,
    }

    // From RFC 8032 §7.1.
    static RFC_VECTORS: [TestVector; 3] = [
        TestVector {
            seed: "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            public: "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            message: "",
            signature: "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
                        5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        },
        TestVector {
            seed: "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
            public: "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
            message: "72",
            signature: "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
                        085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        },
        TestVector {
            seed: "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
            public: "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
            message: "af82",
            signature: "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac\
                        18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
        },
    ];

    #[test]
    fn rfc8032_key_derivation() {
        for vector in RFC_VECTORS.iter() {
            let keypair = KeyPair::from_seed(&decode_seed(vector.seed));
            assert_eq!(
                hex::encode(keypair.public_key().to_bytes()),
                vector.public,
                "public key mismatch for seed {}",
                vector.seed
            );
        }
    }

    #[test]
    fn rfc8032_signatures() {
        for vector in RFC_VECTORS.iter() {
            let keypair = KeyPair::from_seed(&decode_seed(vector.seed));
            let message = hex::decode(vector.message).unwrap();

            let signature = keypair.sign(&message);
            assert_eq!(
                hex::encode(signature.to_bytes()),
                vector.signature,
                "signature mismatch for seed {}",
                vector.seed
            );
            assert!(
                keypair.public_key().verify(&message, &signature),
                "own signature failed to verify for seed {}",
                vector.seed
            );
        }
    }

    #[test]
    fn signing_is_deterministic() {
        for vector in RFC_VECTORS.iter() {
            let keypair = KeyPair::from_seed(&decode_seed(vector.seed));
            let message = hex::decode(vector.message).unwrap();
            assert_eq!(
                keypair.sign(&message).to_bytes()[..],
                keypair.sign(&message).to_bytes()[..]
            );
        }
    }

    #[test]
    fn bit_flips_invalidate() {
        // Vector 3, with every byte of the signature perturbed in turn,
        // and with the message perturbed.
        let vector = &RFC_VECTORS[2];
        let public = decode_public(vector.public);
        let message = hex::decode(vector.message).unwrap();
        let good = decode_signature(vector.signature);

        assert!(public.verify(&message, &good));

        for i in 0..SIGNATURE_LENGTH {
            let mut bad = good.to_bytes();
            bad[i] ^= 0x40;
            assert!(
                !public.verify(&message, &Signature::from_bytes(&bad)),
                "corrupted signature byte {} still verified",
                i
            );
        }

        let mut bad_message = message.clone();
        bad_message[0] ^= 0x01;
        assert!(!public.verify(&bad_message, &good));
        assert!(!public.verify(b"", &good));
    }

    #[test]
    fn noncanonical_s_is_rejected() {
        // Vector 1 with ℓ added to its (small) S scalar: the same
        // residue class mod ℓ, encoded non-canonically.  RFC 8032
        // §5.1.7 requires rejection.
        let vector = &RFC_VECTORS[0];
        let public = decode_public(vector.public);

        let bumped = decode_signature(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
             4c8c7872aa064e049dbb3013fbf29380d25bf5f0595bbe24655141438e7a101b",
        );
        assert!(!public.verify(b"", &bumped));
    }

    #[test]
    fn undecodable_public_keys_fail_closed() {
        let vector = &RFC_VECTORS[0];
        let signature = decode_signature(vector.signature);

        // y >= p.
        let y_equals_p =
            decode_public("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert!(!y_equals_p.verify(b"", &signature));

        // x^2 recovery hits a non-residue (y = 2).
        let nonsquare =
            decode_public("0200000000000000000000000000000000000000000000000000000000000000");
        assert!(!nonsquare.verify(b"", &signature));
    }

    #[test]
    fn low_order_public_key_is_accepted() {
        // Cofactorless verification performs no subgroup check: this
        // signature is valid under a public key of order 2 (and its R
        // carries a torsion component), and must be accepted.
        // Stricter "cofactored" rules would reject it; RFC 8032
        // §5.1.7 does not.
        let weak =
            decode_public("ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        let signature = decode_signature(
            "f980b6062f852d3e9f94b26bf983be068882b00258f648e25e2779d7031cb27a\
             0600000000000000000000000000000000000000000000000000000000000000",
        );
        assert!(weak.verify(b"weak key acceptance", &signature));
        assert!(!weak.verify(b"weak key acceptancex", &signature));
    }
}

mod integrations {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn sign_verify() {
        let good: &[u8] = "test message".as_bytes();
        let bad: &[u8] = "wrong message".as_bytes();

        let mut csprng = OsRng;
        let keypair = KeyPair::generate(&mut csprng).unwrap();
        let good_sig = keypair.sign(good);
        let bad_sig = keypair.sign(bad);

        assert!(
            keypair.verify(good, &good_sig),
            "Verification of a valid signature failed!"
        );
        assert!(
            !keypair.verify(good, &bad_sig),
            "Verification of a signature on a different message passed!"
        );
        assert!(
            !keypair.verify(bad, &good_sig),
            "Verification of a signature on a different message passed!"
        );
    }

    #[test]
    fn signatures_are_not_transferable_between_keys() {
        let message: &[u8] = b"this signature belongs to someone else";

        let mut csprng = OsRng;
        let keypair1 = KeyPair::generate(&mut csprng).unwrap();
        let keypair2 = KeyPair::generate(&mut csprng).unwrap();
        let signature = keypair1.sign(message);

        assert!(keypair1.public_key().verify(message, &signature));
        assert!(!keypair2.public_key().verify(message, &signature));
    }

    #[test]
    fn accessors_return_copies() {
        let seed = [0x5au8; SEED_LENGTH];
        let keypair = KeyPair::from_seed(&seed);

        assert_eq!(keypair.seed(), seed);

        // The public key round-trips through its byte encoding.
        let public = keypair.public_key();
        let reconstructed = PublicKey::from_bytes(&public.to_bytes());
        assert_eq!(public, reconstructed);

        // Same seed, same derived keypair.
        let again = KeyPair::from_seed(&seed);
        assert_eq!(keypair.public_key(), again.public_key());
    }

    #[test]
    fn wire_format_round_trips() {
        let keypair = KeyPair::from_seed(&[0x21u8; SEED_LENGTH]);
        let message = b"round trip";
        let signature = keypair.sign(message);

        let sig2 = Signature::try_from(&signature.to_bytes()[..]).unwrap();
        assert_eq!(signature, sig2);

        let pk2 = PublicKey::try_from(&keypair.public_key().to_bytes()[..]).unwrap();
        assert!(pk2.verify(message, &sig2));
    }

    #[test]
    fn wrong_length_inputs_are_errors() {
        assert!(Signature::try_from(&[0u8; 63][..]).is_err());
        assert!(Signature::try_from(&[0u8; 65][..]).is_err());
        assert!(PublicKey::try_from(&[0u8; 31][..]).is_err());
        assert!(KeyPair::try_from(&[0u8; 16][..]).is_err());

        let err = Signature::try_from(&[0u8; 63][..]).unwrap_err();
        assert_eq!(format!("{}", err), "Signature must be 64 bytes in length");
    }
}
