//! GFRX-128 block cipher: a 128-bit Feistel-ARX transform. Forward and
//! inverse full-block operations over the expanded round-key schedule.

use crate::gfrx_cofb::codec::{read_u32_le, write_u32_le};
use crate::gfrx_cofb::core::primitives::{fadl, fadl_inv, fadr, fadr_inv, fan};
use crate::gfrx_cofb::core::schedule::{self, ROUNDS};
use crate::gfrx_cofb::ct::zeroize;

/// Owns the expanded round-key schedule for one GFRX key. Read-only during
/// block operations, zeroized on drop.
pub(crate) struct GfrxContext {
    round_keys: [[u32; 4]; ROUNDS],
}

impl GfrxContext {
    pub(crate) fn new(key: &[u8; 16]) -> Self {
        Self {
            round_keys: schedule::expand_key(key),
        }
    }

    /// Encrypts one 16-byte block.
    pub(crate) fn encrypt_block(&self, plaintext: &[u8; 16]) -> [u8; 16] {
        let mut l0 = read_u32_le(&plaintext[0..4]);
        let mut l1 = read_u32_le(&plaintext[4..8]);
        let mut r0 = read_u32_le(&plaintext[8..12]);
        let mut r1 = read_u32_le(&plaintext[12..16]);

        for &[k0, k1, k2, k3] in self.round_keys.iter() {
            let s0 = fan(l0, l1, k0);
            let s1 = fadl(l1, r0) ^ k1;
            let s2 = fadr(r0, s1);
            let s3 = fan(r1, r0, k2);

            l0 = s1;
            l1 = s3;
            r0 = s0;
            r1 = s2;
        }

        let mut out = [0u8; 16];
        write_u32_le(&mut out[0..4], l0);
        write_u32_le(&mut out[4..8], l1);
        write_u32_le(&mut out[8..12], r0);
        write_u32_le(&mut out[12..16], r1);
        out
    }

    /// Decrypts one 16-byte block. Inverse of [`GfrxContext::encrypt_block`]
    /// for every key.
    pub(crate) fn decrypt_block(&self, ciphertext: &[u8; 16]) -> [u8; 16] {
        // state is interpreted as the encrypt loop's final (s1, s3, s0, s2)
        let mut s1 = read_u32_le(&ciphertext[0..4]);
        let mut s3 = read_u32_le(&ciphertext[4..8]);
        let mut s0 = read_u32_le(&ciphertext[8..12]);
        let mut s2 = read_u32_le(&ciphertext[12..16]);

        for &[k0, k1, k2, _k3] in self.round_keys.iter().rev() {
            let r0 = fadr_inv(s2, s1);
            let l1 = fadl_inv(s1 ^ k1, r0);
            let l0 = s0 ^ (l1.rotate_left(1) & l1.rotate_left(8)) ^ l1.rotate_left(2) ^ k0;
            let r1 = s3 ^ (r0.rotate_left(1) & r0.rotate_left(8)) ^ r0.rotate_left(2) ^ k2;

            s1 = l0;
            s3 = l1;
            s0 = r0;
            s2 = r1;
        }

        let mut out = [0u8; 16];
        write_u32_le(&mut out[0..4], s1);
        write_u32_le(&mut out[4..8], s3);
        write_u32_le(&mut out[8..12], s0);
        write_u32_le(&mut out[12..16], s2);
        out
    }
}

impl Drop for GfrxContext {
    fn drop(&mut self) {
        for quad in self.round_keys.iter_mut() {
            for word in quad.iter_mut() {
                let mut bytes = word.to_ne_bytes();
                zeroize(&mut bytes);
                *word = u32::from_ne_bytes(bytes);
            }
        }
    }
}
