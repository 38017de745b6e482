//! Digest engine: state setup, block mixing, finalization, output expansion.
//!
//! **NOT CRYPTOGRAPHICALLY SECURE.** The constants below define the digest;
//! changing any of them changes every output.

use crate::error::{Constraint, Result};

/// Initial state words, XORed with byte-shifted views of the input length.
const IV: [u32; 4] = [0x243F6A88, 0x85A308D3, 0x13198A2E, 0x03707344];

/// Per-lane additive constant in the word mixing pass.
const C1: u32 = 0x9E3779B1;
/// Multiplier applied to the neighbouring word.
const C2: u32 = 0x5bd1e995;
/// Additive constant in the state update pass.
const C3: u32 = 0x6A09E667;

/// Added to every expanded output byte after the counter XOR.
const EXPAND_BIAS: u8 = 0xA3;

/// Mixing rounds per block.
const ROUNDS: u32 = 4;

/// Bytes consumed per block.
pub const BLOCK_LEN: usize = 16;

/// Hex length of the default 128-bit output.
pub const DEFAULT_HEX_LEN: usize = 32;

/// Largest hex length `digest` accepts (32 bytes).
pub const MAX_HEX_LEN: usize = 64;

/// Circular 32-bit left rotate. `r` is taken mod 32, so 0 and 32 are identity.
#[inline(always)]
pub fn rotl32(x: u32, r: u32) -> u32 {
    x.rotate_left(r % 32)
}

#[inline(always)]
fn init_state(len: usize) -> [u32; 4] {
    let len = len as u32;
    [
        IV[0] ^ len,
        IV[1] ^ (len << 8),
        IV[2] ^ (len << 16),
        IV[3] ^ (len << 24),
    ]
}

/// Load a block as four big-endian words, padding a short tail.
#[inline(always)]
fn load_block(chunk: &[u8]) -> [u32; 4] {
    let mut block = [0u8; BLOCK_LEN];
    let pad_len = BLOCK_LEN - chunk.len();
    block[..chunk.len()].copy_from_slice(chunk);
    block[chunk.len()..].fill((pad_len as u8).wrapping_mul(31));

    let mut words = [0u32; 4];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    words
}

/// Fold one block into the state.
///
/// Both passes update their array in place, slot by slot: the read of slot
/// `(j + 1) % 4` sees whatever that slot holds at that moment.
#[inline(always)]
fn mix_block(state: &mut [u32; 4], mut words: [u32; 4]) {
    for round in 0..ROUNDS {
        for j in 0..4 {
            let shift = (words[j] >> 24) % 31 + 1;
            let lane = words[j]
                .wrapping_add(state[j])
                .wrapping_add((j as u32).wrapping_mul(C1));
            words[j] = rotl32(lane, shift) ^ words[(j + 1) % 4].wrapping_mul(C2);
        }
        for j in 0..4 {
            let shift = (round * 7 + j as u32 * 3) % 32;
            state[j] = rotl32(state[j].wrapping_add(words[j]), shift)
                ^ state[(j + 1) % 4].wrapping_add(C3);
        }
    }
}

#[inline(always)]
fn finalize(s: &[u32; 4]) -> [u8; 16] {
    let a = s[0] ^ (s[1] << 5) ^ (s[2] >> 7);
    let b = s[1] ^ (s[2] << 3) ^ (s[3] >> 11);
    let c = s[2] ^ (s[3] << 7) ^ (s[0] >> 13);
    let d = s[3] ^ (s[0] << 11) ^ (s[1] >> 3);

    let mut output = [0u8; 16];
    output[0..4].copy_from_slice(&a.to_be_bytes());
    output[4..8].copy_from_slice(&b.to_be_bytes());
    output[8..12].copy_from_slice(&c.to_be_bytes());
    output[12..16].copy_from_slice(&d.to_be_bytes());
    output
}

/// Check a requested hex length: even, then at least 2, then at most 64.
pub(crate) fn validate_hex_len(output_hex_len: usize) -> Result<()> {
    if output_hex_len % 2 != 0 {
        return Err(Constraint::OddLength(output_hex_len).into());
    }
    if output_hex_len < 2 {
        return Err(Constraint::TooShort(output_hex_len).into());
    }
    if output_hex_len > MAX_HEX_LEN {
        return Err(Constraint::TooLong(output_hex_len).into());
    }
    Ok(())
}

/// The 16-byte base digest: state setup, every block, finalization.
///
/// Empty input processes no blocks and finalizes the initial state directly.
pub fn base_digest(data: &[u8]) -> [u8; 16] {
    let mut state = init_state(data.len());
    for chunk in data.chunks(BLOCK_LEN) {
        mix_block(&mut state, load_block(chunk));
    }
    finalize(&state)
}

/// Stretch the base digest to `needed` bytes with a running counter.
fn expand(base: &[u8; 16], needed: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(needed.next_multiple_of(BLOCK_LEN));
    let mut counter: u32 = 0;
    while out.len() < needed {
        let ctr = counter.to_le_bytes();
        out.extend(
            base.iter()
                .enumerate()
                .map(|(idx, &byte)| (byte ^ ctr[idx % 4]).wrapping_add(EXPAND_BIAS)),
        );
        counter = counter.wrapping_add(1);
    }
    out.truncate(needed);
    out
}

/// Digest bytes before hex encoding: `output_hex_len / 2` of them.
pub fn digest_bytes(data: &[u8], output_hex_len: usize) -> Result<Vec<u8>> {
    validate_hex_len(output_hex_len)?;
    Ok(expand(&base_digest(data), output_hex_len / 2))
}

/// Digest `data` into a lowercase hex string of exactly `output_hex_len` chars.
///
/// `output_hex_len` must be even and in `2..=64`; anything else fails with
/// [`Error::InvalidParameter`](crate::Error::InvalidParameter).
///
/// ```
/// let hex = hexmix::digest(b"", 32).unwrap();
/// assert_eq!(hex, "331be69fc012da504ec4ac788b33f501");
/// ```
pub fn digest(data: &[u8], output_hex_len: usize) -> Result<String> {
    let bytes = digest_bytes(data, output_hex_len)?;
    let mut hex = hex::encode(bytes);
    hex.truncate(output_hex_len);
    Ok(hex)
}

/// Digest many inputs on the rayon pool, preserving input order.
///
/// The length is validated once up front; no input is touched on failure.
pub fn digest_batch<I>(inputs: &[I], output_hex_len: usize) -> Result<Vec<String>>
where
    I: AsRef<[u8]> + Sync,
{
    use rayon::prelude::*;

    validate_hex_len(output_hex_len)?;

    if inputs.len() < 64 {
        return inputs
            .iter()
            .map(|input| digest(input.as_ref(), output_hex_len))
            .collect();
    }

    inputs
        .par_iter()
        .map(|input| digest(input.as_ref(), output_hex_len))
        .collect()
}
