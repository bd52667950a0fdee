//! Differential tests against the RustCrypto `blake2` implementation.

use blake2::digest::{FixedOutput, KeyInit, Update};
use blake2::{Blake2b512, Blake2bMac512, Digest};
use blake2b512::{hash, hash_keyed, Blake2b, BLOCK_SIZE, MAX_KEY_LENGTH};
use proptest::prelude::*;

fn to_array(digest: &[u8]) -> [u8; 64] {
    let mut output = [0; 64];
    output.copy_from_slice(digest);
    output
}

fn reference_hash(message: &[u8]) -> [u8; 64] {
    to_array(&Blake2b512::digest(message))
}

fn reference_hash_keyed(key: &[u8], message: &[u8]) -> [u8; 64] {
    let mut mac = <Blake2bMac512 as KeyInit>::new_from_slice(key).unwrap();
    Update::update(&mut mac, message);
    to_array(&mac.finalize_fixed())
}

fn pattern(length: usize) -> Vec<u8> {
    (0..length).map(|n| (n.wrapping_mul(31) ^ (n >> 8)) as u8).collect()
}

#[test]
fn lengths_around_block_boundaries() {
    for blocks in 0..4 {
        for delta in [-2_isize, -1, 0, 1, 2] {
            let length = (blocks * BLOCK_SIZE) as isize + delta;
            if length < 0 {
                continue;
            }

            let message = pattern(length as usize);
            assert_eq!(hash(&message), reference_hash(&message), "length = {length}");
        }
    }
}

#[test]
fn keyed_lengths_around_block_boundaries() {
    let key = pattern(MAX_KEY_LENGTH);
    for length in [0, 1, 127, 128, 129, 255, 256, 257] {
        let message = pattern(length);
        assert_eq!(
            hash_keyed(&key, &message).unwrap(),
            reference_hash_keyed(&key, &message),
            "length = {length}"
        );
    }
}

#[test]
fn large_message() {
    let message = pattern(1 << 20);
    let mut state = Blake2b::new();
    for chunk in message.chunks(4093) {
        state.write(chunk).unwrap();
    }
    assert_eq!(state.sum().unwrap(), reference_hash(&message));
    assert_eq!(state.bytes_processed(), message.len() as u128);
}

proptest! {
    #[test]
    fn chunking_does_not_change_the_digest(
        message in proptest::collection::vec(any::<u8>(), 0..1024),
        cuts in proptest::collection::vec(any::<prop::sample::Index>(), 0..16),
    ) {
        let mut cuts: Vec<usize> = cuts.iter().map(|index| index.index(message.len() + 1)).collect();
        cuts.sort_unstable();

        let mut state = Blake2b::new();
        let mut start = 0;
        for cut in cuts.into_iter().chain(core::iter::once(message.len())) {
            prop_assert_eq!(state.write(&message[start..cut]).unwrap(), cut - start);
            start = cut;
        }

        prop_assert_eq!(state.sum().unwrap(), hash(&message));
        prop_assert_eq!(hash(&message), reference_hash(&message));
    }

    #[test]
    fn keyed_matches_reference(
        key in proptest::collection::vec(any::<u8>(), 1..=MAX_KEY_LENGTH),
        message in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let digest = hash_keyed(&key, &message).unwrap();
        prop_assert_eq!(digest, reference_hash_keyed(&key, &message));
        prop_assert_ne!(digest, hash(&message));
    }

    #[test]
    fn different_keys_give_different_digests(
        first in proptest::collection::vec(any::<u8>(), 1..=MAX_KEY_LENGTH),
        second in proptest::collection::vec(any::<u8>(), 1..=MAX_KEY_LENGTH),
        message in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assume!(first != second);
        prop_assert_ne!(hash_keyed(&first, &message).unwrap(), hash_keyed(&second, &message).unwrap());
    }
}
