//! Property tests for the public digest and distance API.

use hexmix::{digest, digest_batch, hamming, Constraint, Error};
use proptest::prelude::*;

fn valid_len() -> impl Strategy<Value = usize> {
    (1usize..=32).prop_map(|bytes| bytes * 2)
}

fn hex_string() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<u8>(), 0..40).prop_map(hex::encode)
}

proptest! {
    #[test]
    fn digest_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..200), len in valid_len()) {
        prop_assert_eq!(digest(&data, len).unwrap(), digest(&data, len).unwrap());
    }

    #[test]
    fn digest_has_exact_lowercase_hex_length(data in proptest::collection::vec(any::<u8>(), 0..200), len in valid_len()) {
        let out = digest(&data, len).unwrap();
        prop_assert_eq!(out.len(), len);
        prop_assert!(out.bytes().all(|c| c.is_ascii_digit() || (b'a'..=b'f').contains(&c)));
    }

    #[test]
    fn odd_lengths_are_rejected(data in proptest::collection::vec(any::<u8>(), 0..32), half in 0usize..40) {
        let len = half * 2 + 1;
        prop_assert_eq!(digest(&data, len), Err(Error::InvalidParameter(Constraint::OddLength(len))));
    }

    #[test]
    fn oversized_lengths_are_rejected(extra in 1usize..100) {
        let len = 64 + extra * 2;
        prop_assert_eq!(digest(b"x", len), Err(Error::InvalidParameter(Constraint::TooLong(len))));
    }

    #[test]
    fn shorter_outputs_are_prefixes_of_longer(data in proptest::collection::vec(any::<u8>(), 0..64), len in valid_len()) {
        let full = digest(&data, 64).unwrap();
        prop_assert_eq!(digest(&data, len).unwrap(), &full[..len]);
    }

    #[test]
    fn hamming_with_self_is_zero(h in hex_string()) {
        prop_assert_eq!(hamming(&h, &h).unwrap(), 0);
    }

    #[test]
    fn hamming_is_symmetric(a in hex_string(), b in hex_string()) {
        prop_assert_eq!(hamming(&a, &b).unwrap(), hamming(&b, &a).unwrap());
    }

    #[test]
    fn batch_agrees_with_single_calls(inputs in proptest::collection::vec("[ -~]{0,40}", 0..100)) {
        let batch = digest_batch(inputs.as_slice(), 32).unwrap();
        for (input, out) in inputs.iter().zip(&batch) {
            prop_assert_eq!(out, &digest(input.as_bytes(), 32).unwrap());
        }
    }
}

#[test]
fn near_identical_pairs_average_near_half_the_bits() {
    let total: u32 = (0..256u32)
        .map(|i| {
            let a = format!("sample input {i}");
            let b = format!("sample input {}", i ^ 1);
            hamming(&digest(a.as_bytes(), 32).unwrap(), &digest(b.as_bytes(), 32).unwrap()).unwrap()
        })
        .sum();
    let mean = f64::from(total) / 256.0;
    assert!((48.0..=80.0).contains(&mean), "mean avalanche distance {mean}");
}
