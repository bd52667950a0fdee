use crate::constants::{BLOCK_SIZE, IV, ROUNDS, SIGMA};

/// Indices of the working vector mixed by each `G` call within a round:
/// four columns followed by four diagonals.
const MIX_LANES: [[usize; 4]; 8] = [
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [1, 6, 11, 12],
    [2, 7, 8, 13],
    [3, 4, 9, 14],
];

#[inline(always)]
fn g(v: &mut [u64; 16], [a, b, c, d]: [usize; 4], x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

#[inline(always)]
fn load_message(block: &[u8; BLOCK_SIZE]) -> [u64; 16] {
    let mut m = [0_u64; 16];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut bytes = [0_u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_le_bytes(bytes);
    }
    m
}

/// The BLAKE2b compression function `F`.
///
/// Mixes one 128-byte `block` into the chaining value `h`. `counter` is the
/// total number of message bytes fed so far *including* this block, as
/// `[low, high]` words. `is_final` must be set only for the last block.
///
/// The working vector lives on the stack; the function touches nothing but
/// its arguments.
pub fn compress(h: &mut [u64; 8], block: &[u8; BLOCK_SIZE], counter: [u64; 2], is_final: bool) {
    let m = load_message(block);

    #[rustfmt::skip]
    let mut v = [
        h[0], h[1], h[2], h[3],
        h[4], h[5], h[6], h[7],
        IV[0], IV[1], IV[2], IV[3],
        IV[4] ^ counter[0], IV[5] ^ counter[1], IV[6], IV[7],
    ];

    if is_final {
        v[14] = !v[14];
    }

    for s in &SIGMA[..ROUNDS] {
        for (step, lanes) in MIX_LANES.iter().enumerate() {
            let x = m[usize::from(s[2 * step])];
            let y = m[usize::from(s[2 * step + 1])];
            g(&mut v, *lanes, x, y);
        }
    }

    for (i, word) in h.iter_mut().enumerate() {
        *word ^= v[i] ^ v[i + 8];
    }
}
