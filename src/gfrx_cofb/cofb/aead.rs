//! The COFB AEAD driver: nonce-derived initialization, associated-data
//! absorption, message processing, and tag finalization/verification.
//!
//! State machine per call (spec §4.8): `Init -> AbsorbAD -> ProcessMsg ->
//! Finalize`. `AbsorbAD` is skipped when `ad` is empty; `ProcessMsg` is
//! skipped when the message is empty, in which case `Finalize` runs one
//! explicit masking + block-cipher call instead of reusing the last message
//! block's output as the tag.

use crate::gfrx_cofb::codec::read_u64_le;
use crate::gfrx_cofb::core::GfrxContext;
use crate::gfrx_cofb::cofb::mask::compute_mask;
use crate::gfrx_cofb::cofb::rho::{g, rho, rho_inv};
use crate::gfrx_cofb::ct::{ct_eq, zeroize};
use crate::gfrx_cofb::error::{Error, Result};
use crate::gfrx_cofb::key::{Key, Nonce, Tag};

/// Owns the expanded GFRX schedule for one key. Keys are expensive to
/// schedule but cheap to reuse: construct once, call [`Cofb::seal`]/
/// [`Cofb::open`] for every (nonce, ad, message).
pub struct Cofb {
    gfrx: GfrxContext,
}

impl Cofb {
    /// Expands `key`'s round-key schedule and stores it for reuse.
    pub fn new(key: &Key) -> Self {
        Self {
            gfrx: GfrxContext::new(key.as_bytes()),
        }
    }

    /// Encrypts `plaintext` under `nonce`, authenticating `ad` alongside it.
    /// `nonce` must never repeat for this key. Returns `(ciphertext, tag)`.
    pub fn seal(&self, nonce: &Nonce, ad: &[u8], plaintext: &[u8]) -> (Vec<u8>, Tag) {
        let mut state = CallState::init(&self.gfrx, nonce);

        let ad_blocks = state.absorb_ad(&self.gfrx, ad);

        let mut ciphertext = vec![0u8; plaintext.len()];
        if plaintext.is_empty() {
            state.finalize_empty(&self.gfrx, ad_blocks);
        } else {
            state.encrypt_message(&self.gfrx, ad_blocks, plaintext, &mut ciphertext);
        }

        let tag = Tag::new(state.y);
        (ciphertext, tag)
    }

    /// Decrypts `ciphertext` under `nonce` and verifies it (and `ad`)
    /// against `tag` in constant time. Returns the plaintext on success, or
    /// [`Error::Authentication`] on tag mismatch; on mismatch the output
    /// buffer that would have held plaintext is never returned to the
    /// caller.
    pub fn open(&self, nonce: &Nonce, ad: &[u8], ciphertext: &[u8], tag: &Tag) -> Result<Vec<u8>> {
        let mut state = CallState::init(&self.gfrx, nonce);

        let ad_blocks = state.absorb_ad(&self.gfrx, ad);

        let mut plaintext = vec![0u8; ciphertext.len()];
        if ciphertext.is_empty() {
            state.finalize_empty(&self.gfrx, ad_blocks);
        } else {
            state.decrypt_message(&self.gfrx, ad_blocks, ciphertext, &mut plaintext);
        }

        if !ct_eq(&state.y, tag.as_bytes()) {
            zeroize(&mut plaintext);
            return Err(Error::Authentication);
        }

        Ok(plaintext)
    }
}

/// Per-call mutable state: the feedback register `Y` and the mask seed
/// `delta`. Zeroized unconditionally on every exit path, success or error.
struct CallState {
    y: [u8; 16],
    delta: u64,
}

impl Drop for CallState {
    fn drop(&mut self) {
        zeroize(&mut self.y);
        let mut delta_bytes = self.delta.to_ne_bytes();
        zeroize(&mut delta_bytes);
        self.delta = u64::from_ne_bytes(delta_bytes);
    }
}

impl CallState {
    /// spec §4.8 "Initialization from nonce".
    fn init(gfrx: &GfrxContext, nonce: &Nonce) -> Self {
        let mut nonce_block = [0u8; 16];
        nonce_block[..8].copy_from_slice(nonce.as_bytes());

        let y = gfrx.encrypt_block(&nonce_block);
        let delta = read_u64_le(&y[..8]);

        Self { y, delta }
    }

    fn xor_mask_into_low8(x: &mut [u8; 16], mask: u64) {
        let mask_bytes = mask.to_le_bytes();
        for i in 0..8 {
            x[i] ^= mask_bytes[i];
        }
    }

    /// spec §4.8 "Associated-data phase". Returns the number of AD blocks
    /// absorbed (0 if `ad` is empty), used as the block-index offset for the
    /// message phase.
    fn absorb_ad(&mut self, gfrx: &GfrxContext, ad: &[u8]) -> usize {
        if ad.is_empty() {
            return 0;
        }

        let mut ad_blocks = 0usize;
        let mut offset = 0usize;

        while ad.len() - offset >= 16 {
            let block: &[u8; 16] = ad[offset..offset + 16].try_into().unwrap();
            let mut x = rho(&self.y, block, 16, None);
            Self::xor_mask_into_low8(&mut x, compute_mask(self.delta, ad_blocks, false));
            self.y = gfrx.encrypt_block(&x);

            offset += 16;
            ad_blocks += 1;
        }

        let remaining = ad.len() - offset;
        if remaining > 0 {
            let mut x = rho(&self.y, &ad[offset..], remaining, None);
            Self::xor_mask_into_low8(&mut x, compute_mask(self.delta, ad_blocks, true));
            self.y = gfrx.encrypt_block(&x);
            ad_blocks += 1;
        }

        ad_blocks
    }

    /// spec §4.8 "Message phase", encrypt direction. `plaintext` and
    /// `ciphertext` must have equal, non-zero length.
    fn encrypt_message(
        &mut self,
        gfrx: &GfrxContext,
        ad_blocks: usize,
        plaintext: &[u8],
        ciphertext: &mut [u8],
    ) {
        let mut msg_blocks = 0usize;
        let mut offset = 0usize;

        while plaintext.len() - offset >= 16 {
            let block: &[u8; 16] = plaintext[offset..offset + 16].try_into().unwrap();
            let mut c = [0u8; 16];
            let mut x = rho(&self.y, block, 16, Some(&mut c));
            ciphertext[offset..offset + 16].copy_from_slice(&c);

            Self::xor_mask_into_low8(&mut x, compute_mask(self.delta, ad_blocks + msg_blocks, false));
            self.y = gfrx.encrypt_block(&x);

            offset += 16;
            msg_blocks += 1;
        }

        let remaining = plaintext.len() - offset;
        if remaining > 0 {
            let mut c = vec![0u8; remaining];
            let mut x = rho(&self.y, &plaintext[offset..], remaining, Some(&mut c));
            ciphertext[offset..].copy_from_slice(&c);

            Self::xor_mask_into_low8(&mut x, compute_mask(self.delta, ad_blocks + msg_blocks, true));
            self.y = gfrx.encrypt_block(&x);
        }
    }

    /// spec §4.8 "Message phase", decrypt direction.
    fn decrypt_message(
        &mut self,
        gfrx: &GfrxContext,
        ad_blocks: usize,
        ciphertext: &[u8],
        plaintext: &mut [u8],
    ) {
        let mut msg_blocks = 0usize;
        let mut offset = 0usize;

        while ciphertext.len() - offset >= 16 {
            let block: &[u8; 16] = ciphertext[offset..offset + 16].try_into().unwrap();
            let mut x = rho_inv(&self.y, block, 16, &mut plaintext[offset..offset + 16]);

            Self::xor_mask_into_low8(&mut x, compute_mask(self.delta, ad_blocks + msg_blocks, false));
            self.y = gfrx.encrypt_block(&x);

            offset += 16;
            msg_blocks += 1;
        }

        let remaining = ciphertext.len() - offset;
        if remaining > 0 {
            let mut x = rho_inv(
                &self.y,
                &ciphertext[offset..],
                remaining,
                &mut plaintext[offset..],
            );

            Self::xor_mask_into_low8(&mut x, compute_mask(self.delta, ad_blocks + msg_blocks, true));
            self.y = gfrx.encrypt_block(&x);
        }
    }

    /// spec §4.8 "Empty-message branch": one explicit finalization call when
    /// there is no message phase at all.
    fn finalize_empty(&mut self, gfrx: &GfrxContext, ad_blocks: usize) {
        let mut x = g(&self.y);
        Self::xor_mask_into_low8(&mut x, compute_mask(self.delta, ad_blocks, true));
        self.y = gfrx.encrypt_block(&x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_all(b: u8) -> Key {
        Key::new([b; 16])
    }

    /// S2: COFB empty message, empty AD.
    #[test]
    fn empty_message_empty_ad_round_trips_and_rejects_tampered_tag() {
        let key = Key::try_from_slice(&[
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D,
            0x0E, 0x0F,
        ])
        .unwrap();
        let nonce = Nonce::try_from_slice(&[0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17]).unwrap();

        let cofb = Cofb::new(&key);
        let (ct, tag) = cofb.seal(&nonce, &[], &[]);
        assert!(ct.is_empty());

        assert!(cofb.open(&nonce, &[], &ct, &tag).is_ok());

        let mut bad_tag_bytes = *tag.as_bytes();
        bad_tag_bytes[0] ^= 0x01;
        let bad_tag = Tag::new(bad_tag_bytes);
        assert!(matches!(
            cofb.open(&nonce, &[], &ct, &bad_tag),
            Err(Error::Authentication)
        ));
    }

    /// Empty message with non-empty AD: `finalize_empty` must fold the AD
    /// phase's block count into the finalization mask (`ad_blocks > 0`),
    /// not just the `ad_blocks == 0` case the empty/empty scenario above
    /// exercises.
    #[test]
    fn empty_message_with_ad_round_trips_and_rejects_tampered_tag() {
        let key = key_all(0x22);
        let nonce = Nonce::try_from_slice(&[0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27]).unwrap();
        let ad: Vec<u8> = (0u8..40).collect(); // 2 full AD blocks + 1 partial

        let cofb = Cofb::new(&key);
        let (ct, tag) = cofb.seal(&nonce, &ad, &[]);
        assert!(ct.is_empty());

        assert!(cofb.open(&nonce, &ad, &ct, &tag).is_ok());

        let mut bad_tag_bytes = *tag.as_bytes();
        bad_tag_bytes[0] ^= 0x01;
        let bad_tag = Tag::new(bad_tag_bytes);
        assert!(matches!(
            cofb.open(&nonce, &ad, &ct, &bad_tag),
            Err(Error::Authentication)
        ));

        // same AD length, different tag than a genuinely empty-AD call: if
        // `finalize_empty` ignored `ad_blocks`, these would collide.
        let (_, tag_no_ad) = cofb.seal(&nonce, &[], &[]);
        assert_ne!(tag.as_bytes(), tag_no_ad.as_bytes());
    }

    /// S3: COFB 16-byte full block, no AD.
    #[test]
    fn single_full_block_round_trips() {
        let key = key_all(0);
        let nonce = Nonce::try_from_slice(&[0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37]).unwrap();
        let plaintext: Vec<u8> = (0u8..16).collect();

        let cofb = Cofb::new(&key);
        let (ct, tag) = cofb.seal(&nonce, &[], &plaintext);
        assert_eq!(ct.len(), 16);

        let recovered = cofb.open(&nonce, &[], &ct, &tag).unwrap();
        assert_eq!(recovered, plaintext);
    }

    /// S4: COFB with AD — flipping any AD bit makes decrypt fail.
    #[test]
    fn tampering_with_ad_is_detected() {
        let key = key_all(0x00);
        let nonce = Nonce::try_from_slice(&[0x50, 0x51, 0x52, 0x53, 0x54, 0x55, 0x56, 0x57]).unwrap();
        let ad: Vec<u8> = (0xAAu8..=0xB9).collect();
        let plaintext: Vec<u8> = (0u8..32).collect();

        let cofb = Cofb::new(&key);
        let (ct, tag) = cofb.seal(&nonce, &ad, &plaintext);
        assert!(cofb.open(&nonce, &ad, &ct, &tag).is_ok());

        for bit in 0..(ad.len() * 8) {
            let mut tampered_ad = ad.clone();
            tampered_ad[bit / 8] ^= 1 << (bit % 8);
            assert!(
                cofb.open(&nonce, &tampered_ad, &ct, &tag).is_err(),
                "bit {bit} of AD should have been detected"
            );
        }
    }

    /// S5: partial final block.
    #[test]
    fn partial_final_block_round_trips() {
        let key = key_all(0x7A);
        let nonce = Nonce::try_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let plaintext = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];

        let cofb = Cofb::new(&key);
        let (ct, tag) = cofb.seal(&nonce, &[], &plaintext);
        assert_eq!(ct.len(), 8);

        let recovered = cofb.open(&nonce, &[], &ct, &tag).unwrap();
        assert_eq!(recovered, plaintext);
    }

    /// S6: long message, 256 bytes (16 full blocks), deterministic tag.
    #[test]
    fn long_message_round_trips_and_is_deterministic() {
        let key = key_all(0x11);
        let nonce = Nonce::try_from_slice(&[9, 9, 9, 9, 9, 9, 9, 9]).unwrap();
        let plaintext: Vec<u8> = (0u16..256).map(|b| b as u8).collect();

        let cofb = Cofb::new(&key);
        let (ct1, tag1) = cofb.seal(&nonce, &[], &plaintext);
        let (ct2, tag2) = cofb.seal(&nonce, &[], &plaintext);

        assert_eq!(ct1, ct2);
        assert_eq!(tag1.as_bytes(), tag2.as_bytes());

        let recovered = cofb.open(&nonce, &[], &ct1, &tag1).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn single_bit_flip_in_ciphertext_is_detected() {
        let key = key_all(0x03);
        let nonce = Nonce::try_from_slice(&[4, 4, 4, 4, 4, 4, 4, 4]).unwrap();
        let plaintext: Vec<u8> = (0u8..40).collect();

        let cofb = Cofb::new(&key);
        let (mut ct, tag) = cofb.seal(&nonce, &[], &plaintext);
        ct[0] ^= 0x01;

        assert!(matches!(
            cofb.open(&nonce, &[], &ct, &tag),
            Err(Error::Authentication)
        ));
    }

    #[test]
    fn single_bit_flip_in_nonce_is_detected() {
        let key = key_all(0x03);
        let nonce = Nonce::try_from_slice(&[4, 4, 4, 4, 4, 4, 4, 4]).unwrap();
        let other_nonce = Nonce::try_from_slice(&[5, 4, 4, 4, 4, 4, 4, 4]).unwrap();
        let plaintext: Vec<u8> = (0u8..40).collect();

        let cofb = Cofb::new(&key);
        let (ct, tag) = cofb.seal(&nonce, &[], &plaintext);

        assert!(matches!(
            cofb.open(&other_nonce, &[], &ct, &tag),
            Err(Error::Authentication)
        ));
    }

    #[test]
    fn decrypt_failure_zeroes_returned_plaintext_path() {
        // the returned Err carries no plaintext at all; this documents the
        // "no partial plaintext is ever released" contract.
        let key = key_all(0x09);
        let nonce = Nonce::try_from_slice(&[1, 1, 1, 1, 1, 1, 1, 1]).unwrap();
        let plaintext = [1u8, 2, 3, 4];

        let cofb = Cofb::new(&key);
        let (ct, mut tag_bytes) = {
            let (ct, tag) = cofb.seal(&nonce, &[], &plaintext);
            (ct, *tag.as_bytes())
        };
        tag_bytes[15] ^= 0x80;
        let bad_tag = Tag::new(tag_bytes);

        let err = cofb.open(&nonce, &[], &ct, &bad_tag).unwrap_err();
        assert!(matches!(err, Error::Authentication));
    }
}
