//! BLAKE2b-512 hashing (RFC 7693), optionally keyed.
//!
//! The digest length is fixed at 64 bytes and salt/personalization are always
//! zero. Digests are returned as raw bytes.
//!
//! ```
//! let digest = blake2b512::hash(b"abc");
//!
//! let mut state = blake2b512::Blake2b::new();
//! state.write(b"a").unwrap();
//! state.write(b"bc").unwrap();
//! assert_eq!(state.sum().unwrap(), digest);
//! ```

#![no_std]
#![forbid(unused_must_use)]
#![deny(clippy::undocumented_unsafe_blocks)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

mod compress;
mod constants;
mod error;
mod params;
mod state;


pub use crate::compress::compress;
pub use crate::constants::{BLOCK_SIZE, DIGEST_SIZE, IV, MAX_KEY_LENGTH, SIGMA};
pub use crate::error::Error;
pub use crate::state::Blake2b;

/// Hashes `message` with an unkeyed state.
pub fn hash(message: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut state = Blake2b::new();
    state.update(message);
    state.finalize()
}

/// Hashes `message` with a state keyed by `key`.
///
/// An empty key is the same as calling [`hash`].
pub fn hash_keyed(key: &[u8], message: &[u8]) -> Result<[u8; DIGEST_SIZE], Error> {
    let mut state = Blake2b::new_keyed(key)?;
    state.update(message);
    Ok(state.finalize())
}
