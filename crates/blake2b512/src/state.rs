use core::sync::atomic::{compiler_fence, Ordering};

use crate::compress::compress;
use crate::constants::{BLOCK_SIZE, DIGEST_SIZE, MAX_KEY_LENGTH};
use crate::error::Error;
use crate::params::ParamBlock;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An incremental BLAKE2b-512 hasher, optionally keyed.
///
/// Feed input with [`write`](Self::write), then call [`sum`](Self::sum) exactly
/// once to obtain the digest. After that the state only accepts [`reset`](Self::reset),
/// which puts it back to its initial configuration (including the key).
///
/// A state is not internally synchronized; use one state per thread.
#[derive(Clone)]
pub struct Blake2b {
    chain: [u64; 8],
    counter: [u64; 2],
    buffer: [u8; BLOCK_SIZE],
    buffer_length: usize,
    key_block: [u8; BLOCK_SIZE],
    key_length: u8,
    finalized: bool,
}

/// Adds `count` to the 128-bit byte counter, carrying into the high word.
#[inline(always)]
pub(crate) fn advance_counter(counter: &mut [u64; 2], count: u64) {
    counter[0] = counter[0].wrapping_add(count);
    if counter[0] < count {
        counter[1] = counter[1].wrapping_add(1);
    }
}

fn wipe(bytes: &mut [u8]) {
    for byte in bytes.iter_mut() {
        // SAFETY: `byte` comes from a live exclusive borrow, so it's valid and aligned.
        unsafe { core::ptr::write_volatile(byte, 0) };
    }
    compiler_fence(Ordering::SeqCst);
}

impl Blake2b {
    /// Creates an unkeyed state.
    pub fn new() -> Self {
        Self::from_key_block([0; BLOCK_SIZE], 0)
    }

    /// Creates a keyed state.
    ///
    /// The key is zero-padded to a full block which is hashed ahead of any
    /// data. An empty key gives the same results as [`Blake2b::new`].
    pub fn new_keyed(key: &[u8]) -> Result<Self, Error> {
        if key.len() > MAX_KEY_LENGTH {
            log::debug!("Rejecting a {}-byte key (maximum is {MAX_KEY_LENGTH})", key.len());
            return Err(Error::InvalidKeyLength {
                length: key.len(),
                max: MAX_KEY_LENGTH,
            });
        }

        let mut key_block = [0; BLOCK_SIZE];
        key_block[..key.len()].copy_from_slice(key);
        Ok(Self::from_key_block(key_block, key.len() as u8))
    }

    fn from_key_block(key_block: [u8; BLOCK_SIZE], key_length: u8) -> Self {
        let mut state = Blake2b {
            chain: [0; 8],
            counter: [0; 2],
            buffer: [0; BLOCK_SIZE],
            buffer_length: 0,
            key_block,
            key_length,
            finalized: false,
        };
        state.reset();
        state
    }

    /// Returns the state to the configuration it was created with.
    pub fn reset(&mut self) {
        self.chain = ParamBlock::sequential(self.key_length).initial_chain();
        self.counter = [0; 2];
        wipe(&mut self.buffer);
        if self.key_length > 0 {
            self.buffer = self.key_block;
            self.buffer_length = BLOCK_SIZE;
        } else {
            self.buffer_length = 0;
        }
        self.finalized = false;

        log::trace!("Initialized BLAKE2b-512 state (keyed: {})", self.is_keyed());
    }

    /// Appends `data` to the message; returns the number of bytes accepted,
    /// which is always `data.len()`.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        if self.finalized {
            log::debug!("Refusing to write {} bytes to a finalized state", data.len());
            return Err(Error::WriteAfterFinalize);
        }

        self.update(data);
        Ok(data.len())
    }

    /// Finalizes the state and returns the digest.
    ///
    /// Fails if the digest was already taken; call [`reset`](Self::reset) to hash another message.
    pub fn sum(&mut self) -> Result<[u8; DIGEST_SIZE], Error> {
        if self.finalized {
            log::debug!("Refusing to finalize an already finalized state");
            return Err(Error::AlreadyFinalized);
        }

        Ok(self.finalize())
    }

    /// Finalizes the state and appends the digest to `output`.
    #[cfg(feature = "alloc")]
    pub fn sum_into(&mut self, output: &mut Vec<u8>) -> Result<(), Error> {
        let digest = self.sum()?;
        output.extend_from_slice(&digest);
        Ok(())
    }

    #[inline]
    #[allow(clippy::unused_self)]
    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    #[inline]
    #[allow(clippy::unused_self)]
    pub fn size(&self) -> usize {
        DIGEST_SIZE
    }

    pub fn is_keyed(&self) -> bool {
        self.key_length > 0
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// The number of bytes compressed so far, including the key block.
    ///
    /// Bytes still sitting in the pending block are not counted until they are compressed.
    pub fn bytes_processed(&self) -> u128 {
        (u128::from(self.counter[1]) << 64) | u128::from(self.counter[0])
    }

    pub(crate) fn update(&mut self, mut input: &[u8]) {
        debug_assert!(!self.finalized);

        while !input.is_empty() {
            // A full buffer is only compressed once we know more input follows it,
            // since the last block has to be compressed with the finalization flag.
            if self.buffer_length == BLOCK_SIZE {
                advance_counter(&mut self.counter, BLOCK_SIZE as u64);
                compress(&mut self.chain, &self.buffer, self.counter, false);
                self.buffer_length = 0;
            }

            let count = core::cmp::min(BLOCK_SIZE - self.buffer_length, input.len());
            let (chunk, rest) = input.split_at(count);
            self.buffer[self.buffer_length..self.buffer_length + count].copy_from_slice(chunk);
            self.buffer_length += count;
            input = rest;
        }
    }

    pub(crate) fn finalize(&mut self) -> [u8; DIGEST_SIZE] {
        debug_assert!(!self.finalized);

        advance_counter(&mut self.counter, self.buffer_length as u64);
        self.buffer[self.buffer_length..].fill(0);
        compress(&mut self.chain, &self.buffer, self.counter, true);
        self.finalized = true;

        log::trace!("Finalized BLAKE2b-512 state after {} bytes", self.bytes_processed());

        let mut digest = [0; DIGEST_SIZE];
        for (chunk, word) in digest.chunks_exact_mut(8).zip(self.chain) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        digest
    }
}

impl Default for Blake2b {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Blake2b {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        fmt.debug_struct("Blake2b")
            .field("keyed", &self.is_keyed())
            .field("finalized", &self.finalized)
            .field("bytes_processed", &self.bytes_processed())
            .field("pending", &self.buffer_length)
            .finish_non_exhaustive()
    }
}

impl Drop for Blake2b {
    fn drop(&mut self) {
        wipe(&mut self.key_block);
        wipe(&mut self.buffer);
    }
}

#[cfg(feature = "std")]
impl std::io::Write for Blake2b {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        Ok(Blake2b::write(self, data)?)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
