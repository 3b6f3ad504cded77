//! Chained-XOR transcoding between the on-disk and in-memory save images.
//!
//! The file is cut into 8-byte blocks. Block 0 is XORed with the seed key;
//! every later block is XORed with the previous *ciphertext* block. The last
//! block may be short and is only XORed over its own length.

use crate::types::{BLOCK_SIZE, MAGIC_KEY};

// ─── XOR ────────────────────────────────────────────────────────────────────

/// XOR `src` with `key` into `dst`, truncated to the shorter operand.
/// Bytes of `src` past the key are copied through unchanged.
#[inline]
fn xor_block_into(dst: &mut Vec<u8>, src: &[u8], key: &[u8]) {
    let n = src.len().min(key.len());
    dst.extend(src[..n].iter().zip(&key[..n]).map(|(s, k)| s ^ k));
    dst.extend_from_slice(&src[n..]);
}

#[inline]
fn block_count(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE)
}

// ─── Decode ─────────────────────────────────────────────────────────────────

/// Decode an on-disk image with the standard seed key.
#[inline]
pub fn decode(cipher: &[u8]) -> Vec<u8> {
    decode_with_key(cipher, &MAGIC_KEY)
}

/// Decode an on-disk image. Never fails; any byte sequence decodes.
pub fn decode_with_key(cipher: &[u8], seed: &[u8; BLOCK_SIZE]) -> Vec<u8> {
    let mut plain = Vec::with_capacity(cipher.len());
    let mut key: &[u8] = seed;
    for i in 0..block_count(cipher.len()) {
        let start = i * BLOCK_SIZE;
        let block = &cipher[start..(start + BLOCK_SIZE).min(cipher.len())];
        xor_block_into(&mut plain, block, key);
        key = block;
    }
    tracing::trace!(bytes = cipher.len(), blocks = block_count(cipher.len()), "decoded save image");
    plain
}

// ─── Encode ─────────────────────────────────────────────────────────────────

/// Encode a plain buffer with the standard seed key.
#[inline]
pub fn encode(plain: &[u8]) -> Vec<u8> {
    encode_with_key(plain, &MAGIC_KEY)
}

/// Encode a plain buffer. The key for each block after the first is the
/// ciphertext block just produced.
pub fn encode_with_key(plain: &[u8], seed: &[u8; BLOCK_SIZE]) -> Vec<u8> {
    let mut cipher = Vec::with_capacity(plain.len());
    let mut key = *seed;
    for i in 0..block_count(plain.len()) {
        let start = i * BLOCK_SIZE;
        let block = &plain[start..(start + BLOCK_SIZE).min(plain.len())];
        xor_block_into(&mut cipher, block, &key);
        // Only a full block can feed the next one; a short block is always last.
        if let Ok(produced) = <[u8; BLOCK_SIZE]>::try_from(&cipher[start..]) {
            key = produced;
        }
    }
    tracing::trace!(bytes = plain.len(), blocks = block_count(plain.len()), "encoded save image");
    cipher
}
