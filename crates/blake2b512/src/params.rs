use crate::constants::{DIGEST_SIZE, IV};

/// The BLAKE2b parameter block for sequential (non-tree) hashing.
///
/// Only the digest length and key length vary; salt and personalization are
/// always zero, so words 4..8 of the block are zero as well.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct ParamBlock {
    digest_length: u8,
    key_length: u8,
    fanout: u8,
    depth: u8,
    leaf_length: u32,
    node_offset: u64,
    node_depth: u8,
    inner_length: u8,
}

impl ParamBlock {
    /// Caller guarantees `key_length <= MAX_KEY_LENGTH`.
    pub(crate) fn sequential(key_length: u8) -> Self {
        ParamBlock {
            digest_length: DIGEST_SIZE as u8,
            key_length,
            fanout: 1,
            depth: 1,
            leaf_length: 0,
            node_offset: 0,
            node_depth: 0,
            inner_length: 0,
        }
    }

    pub(crate) fn to_words(self) -> [u64; 8] {
        let word0 = u64::from(self.digest_length)
            | (u64::from(self.key_length) << 8)
            | (u64::from(self.fanout) << 16)
            | (u64::from(self.depth) << 24)
            | (u64::from(self.leaf_length) << 32);
        let word2 = u64::from(self.node_depth) | (u64::from(self.inner_length) << 8);
        [word0, self.node_offset, word2, 0, 0, 0, 0, 0]
    }

    /// The chaining value a fresh state starts from: `IV ^ params`.
    pub(crate) fn initial_chain(self) -> [u64; 8] {
        let mut h = IV;
        for (word, param) in h.iter_mut().zip(self.to_words()) {
            *word ^= param;
        }
        h
    }
}
